use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Earth radius used for mile distances.
pub const EARTH_RADIUS_MI: f64 = 3959.0;
/// Earth radius used for kilometre distances. Kept at 6357 so distances match
/// previously exported data, even though the mean radius is 6371.
pub const EARTH_RADIUS_KM: f64 = 6357.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Miles,
    Kilometers,
}

impl DistanceUnit {
    pub fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Miles => EARTH_RADIUS_MI,
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
        }
    }
}

/// A latitude/longitude pair in degrees.
///
/// Ranges are not enforced on construction: routing engine output is trusted
/// as-is. Use [`Point::is_valid`] or the `FromStr` impl when the value comes
/// from a user.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    pub fn to_radians(self) -> Self {
        Self::new(self.lat.to_radians(), self.lon.to_radians())
    }

    /// Haversine great-circle distance to `other`.
    pub fn distance(&self, other: &Point, unit: DistanceUnit) -> f64 {
        let a = self.to_radians();
        let b = other.to_radians();
        let dlat = b.lat - a.lat;
        let dlon = b.lon - a.lon;

        let h = (dlat / 2.0).sin().powi(2) + a.lat.cos() * b.lat.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * h.sqrt().asin() * unit.earth_radius()
    }

    /// Initial great-circle bearing towards `other`, in degrees within (-180, 180].
    ///
    /// Identical points give 0.
    pub fn bearing(&self, other: &Point) -> f64 {
        let a = self.to_radians();
        let b = other.to_radians();
        let dlon = b.lon - a.lon;

        let x = dlon.sin() * b.lat.cos();
        let y = a.lat.cos() * b.lat.sin() - a.lat.sin() * b.lat.cos() * dlon.cos();
        x.atan2(y).to_degrees()
    }

    /// Same as [`Point::bearing`], normalised to a compass heading in [0, 360).
    pub fn compass_bearing(&self, other: &Point) -> f64 {
        self.bearing(other).rem_euclid(360.0)
    }

    /// Returns `(lat, lon)`, or `(lon, lat)` when `swap` is set.
    ///
    /// Routing engines and KML want longitude first; GPX, Google Maps and the
    /// decoded polyline use latitude first.
    pub fn to_pair(self, swap: bool) -> (f64, f64) {
        if swap {
            (self.lon, self.lat)
        } else {
            (self.lat, self.lon)
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"` and rejects out-of-range values.
impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got \"{}\"", s))?;
        let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude: {}", lat))?;
        let lon: f64 = lon.trim().parse().map_err(|_| format!("invalid longitude: {}", lon))?;

        let point = Point::new(lat, lon);
        if !point.is_valid() {
            return Err(format!("coordinates out of range: {}", point));
        }
        Ok(point)
    }
}

/// A resolved start or destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub coords: Point,
    /// Plain label, used for file names and URLs.
    pub name: String,
    /// Label for interactive display; may carry terminal styling.
    pub displayname: String,
}

impl Location {
    pub fn new(coords: Point, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            coords,
            displayname: name.clone(),
            name,
        }
    }

    pub fn with_displayname(mut self, displayname: impl Into<String>) -> Self {
        self.displayname = displayname.into();
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
