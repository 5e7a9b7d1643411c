use futures::executor::block_on;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// openrouteservice free tier allows 40 directions requests per minute.
pub fn ors_limiter() -> Limiter {
    let quota = Quota::per_minute(NonZeroU32::new(40).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Photon's fair-use policy: about one request per second.
pub fn photon_limiter() -> Limiter {
    let quota = Quota::per_second(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(quota))
}

/// Blocks the calling thread until the limiter admits one more request.
pub fn wait(limiter: &Limiter) {
    block_on(limiter.until_ready());
}
