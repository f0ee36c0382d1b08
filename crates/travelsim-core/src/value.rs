//! Non-negative numeric value types
//!
//! Every constructor rejects negative (and NaN) input with
//! [`Error::Range`], so a value that exists is always valid.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::ops::Add;

fn check_non_negative(what: &'static str, value: f64) -> Result<f64> {
    // `!(x >= 0)` also rejects NaN
    if !(value >= 0.0) {
        return Err(Error::Range {
            what,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Segment length and exploration budget
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
pub struct Miles(f64);

impl Miles {
    pub const ZERO: Miles = Miles(0.0);

    pub fn new(value: f64) -> Result<Self> {
        check_non_negative("Miles", value).map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Miles {
    type Output = Miles;

    // Sum of two non-negative values is non-negative
    fn add(self, rhs: Miles) -> Miles {
        Miles(self.0 + rhs.0)
    }
}

impl TryFrom<f64> for Miles {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Miles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle capacity in passengers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PassengerCount(u32);

impl PassengerCount {
    pub fn new(value: i64) -> Result<Self> {
        u32::try_from(value).map(Self).map_err(|_| Error::Range {
            what: "PassengerCount",
            value: value.to_string(),
        })
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for PassengerCount {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PassengerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle speed
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
pub struct MilesPerHour(f64);

impl MilesPerHour {
    pub fn new(value: f64) -> Result<Self> {
        check_non_negative("MilesPerHour", value).map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for MilesPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle operating cost
///
/// Equality is tolerant to [`DollarsPerMile::TOLERANCE`] so that values
/// parsed from text compare equal to their literal counterparts.
#[derive(Debug, Clone, Copy, Default, PartialOrd, Serialize)]
pub struct DollarsPerMile(f64);

impl DollarsPerMile {
    pub const TOLERANCE: f64 = 1e-4;

    pub fn new(value: f64) -> Result<Self> {
        check_non_negative("DollarsPerMile", value).map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for DollarsPerMile {
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() < Self::TOLERANCE
    }
}

impl fmt::Display for DollarsPerMile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_values_rejected() {
        assert!(Miles::new(-0.5).is_err());
        assert!(Miles::new(f64::NAN).is_err());
        assert!(PassengerCount::new(-49).is_err());
        assert!(MilesPerHour::new(-12.802).is_err());
        assert!(DollarsPerMile::new(-57.19).is_err());
    }

    #[test]
    fn test_range_error_names_type() {
        let err = Miles::new(-23.0).unwrap_err();
        assert_eq!(err.to_string(), "Miles cannot be negative ('-23')");

        let err = PassengerCount::new(-49).unwrap_err();
        assert_eq!(err.to_string(), "PassengerCount cannot be negative ('-49')");
    }

    #[test]
    fn test_zero_is_valid() {
        assert!(Miles::new(0.0).unwrap().is_zero());
        assert_eq!(PassengerCount::new(0).unwrap().value(), 0);
        assert_eq!(Miles::default(), Miles::ZERO);
    }

    #[test]
    fn test_miles_addition() {
        let total = Miles::new(20.0).unwrap() + Miles::new(5.0).unwrap();
        assert_eq!(total, Miles::new(25.0).unwrap());
        assert_eq!(total.to_string(), "25");
    }

    #[test]
    fn test_passenger_count_overflow() {
        assert!(PassengerCount::new(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_cost_tolerance() {
        let a = DollarsPerMile::new(0.75).unwrap();
        let b = DollarsPerMile::new(0.75004).unwrap();
        let c = DollarsPerMile::new(0.76).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
