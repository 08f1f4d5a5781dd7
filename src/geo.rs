use std::fmt;

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

/// A position in signed decimal degrees, latitude first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon(f64, f64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// `Some(true)` when the hemisphere flips the sign, `None` when it belongs to the other axis.
    fn is_negative(self, hemisphere: &str) -> Option<bool> {
        match (self, hemisphere) {
            (Axis::Latitude, "N") | (Axis::Longitude, "E") => Some(false),
            (Axis::Latitude, "S") | (Axis::Longitude, "W") => Some(true),
            _ => None,
        }
    }
}

lazy_static! {
    static ref DMS_REGEX: Regex =
        Regex::new(r"^\s*(\d+)-(\d+)-(\d+(?:\.\d+)?)-?([NSEW])\s*$").unwrap();
    static ref DECIMAL_PAIR_REGEX: Regex =
        Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)\s*,\s*([+-]?\d+(?:\.\d+)?)\s*$").unwrap();
}

impl LatLon {
    /// Builds a coordinate, rejecting values outside [-90, 90] / [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if valid {
            Some(LatLon(lat, lon))
        } else {
            None
        }
    }

    pub fn lat(self) -> f64 {
        self.0
    }

    pub fn lon(self) -> f64 {
        self.1
    }

    //Ex: 31-53-00.510N, 097-12-30.000W
    pub fn from_faa(lat: &str, lon: &str) -> Option<Self> {
        Self::parse(&format!("{},{}", lat.trim(), lon.trim()))
    }

    /// Parses a combined `lat,lon` string, trying DMS with hemisphere suffixes first and
    /// plain decimal degrees second. Anything else yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_dms_pair(raw).or_else(|| Self::from_decimal_pair(raw))
    }

    pub fn from_dms_pair(raw: &str) -> Option<Self> {
        let (lat, lon) = raw.split_once(',')?;
        let lat = dms_to_dd(lat, Axis::Latitude)?;
        let lon = dms_to_dd(lon, Axis::Longitude)?;
        LatLon::new(lat, lon)
    }

    pub fn from_decimal_pair(raw: &str) -> Option<Self> {
        let cap = DECIMAL_PAIR_REGEX.captures(raw)?;
        LatLon::new(cap[1].parse().ok()?, cap[2].parse().ok()?)
    }

    /// `lat,lon` in decimal degrees, as used by map links.
    pub fn to_ll(self) -> String {
        [self.0, self.1].iter().copied().map(format_decimal).join(",")
    }
}

/// Shortest float form, but whole values keep one decimal (`-77.0`, not `-77`).
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn dms_to_dd(token: &str, axis: Axis) -> Option<f64> {
    fn to_dd(d: f64, m: f64, s: f64) -> f64 {
        d + m / 60.0 + s / 3600.0
    }

    let cap = DMS_REGEX.captures(token)?;
    let (d, m, s, dir) = (&cap[1], &cap[2], &cap[3], &cap[4]);
    let (d, m, s): (f64, f64, f64) = (d.parse().ok()?, m.parse().ok()?, s.parse().ok()?);
    if m >= 60.0 || s >= 60.0 {
        return None;
    }
    let dd = to_dd(d, m, s);
    if axis.is_negative(dir)? {
        Some(-dd)
    } else {
        Some(dd)
    }
}

impl fmt::Display for LatLon {
    /// Whole-second DMS, e.g. `38°30'0"N 77°0'0"W`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn to_dms(dd: f64) -> (u64, u64, u64) {
            let total = (dd.abs() * 3600.0).round() as u64;
            (total / 3600, total / 60 % 60, total % 60)
        }

        let (d, m, s) = to_dms(self.0);
        let ns = if self.0.is_sign_negative() { "S" } else { "N" };
        write!(f, "{}°{}'{}\"{} ", d, m, s, ns)?;

        let (d, m, s) = to_dms(self.1);
        let ew = if self.1.is_sign_negative() { "W" } else { "E" };
        write!(f, "{}°{}'{}\"{}", d, m, s, ew)
    }
}
