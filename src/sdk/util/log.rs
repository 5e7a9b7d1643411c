use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is unset. Our own modules get one level more
/// per `-v`; HTTP internals stay at `warn` until `-vv`.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,leetroute=info",
        1 => "warn,leetroute=debug",
        _ => "debug",
    }
}

/// Installs the process logger. `RUST_LOG` wins over `verbosity` when set.
/// Calling it a second time leaves the first logger in place.
pub fn init_logging(verbosity: u8) {
    let installed = Builder::from_env(Env::default().default_filter_or(default_filter(verbosity)))
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();
    if installed.is_err() {
        log::debug!("logger already installed");
    }
}
