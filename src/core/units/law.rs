//! Conversion laws
//!
//! Every unit relates to its category's base quantity through one of a small,
//! closed set of laws. Uses enum_dispatch so the engine calls `to_base` /
//! `from_base` through static dispatch instead of boxed closures.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Normalize/denormalize against a category's base quantity
#[enum_dispatch]
pub trait BaseConversion {
    /// Convert a value expressed in this unit into the base quantity
    fn to_base(&self, value: f64) -> f64;

    /// Convert a base-quantity value back into this unit
    fn from_base(&self, value: f64) -> f64;

    /// Check the law's parameters; returns a human-readable reason on failure
    fn validate(&self) -> Result<(), String>;

    fn kind(&self) -> LawKind;
}

/// Law family, exposed to front ends for display and grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "omniconvert/")]
pub enum LawKind {
    Linear,
    Affine,
    Reciprocal,
    Logarithmic,
}

impl fmt::Display for LawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LawKind::Linear => "linear",
            LawKind::Affine => "affine",
            LawKind::Reciprocal => "reciprocal",
            LawKind::Logarithmic => "logarithmic",
        };
        f.write_str(label)
    }
}

/// Pure scaling: `base = value * factor / divisor`
///
/// Ratios such as km/h (1000 / 3600) keep numerator and divisor apart so that
/// round values like 36 km/h land exactly on 10 m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub factor: f64,
    pub divisor: f64,
}

/// Scale plus offset: `base = (value - offset) * numerator / denominator`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub offset: f64,
    pub numerator: f64,
    pub denominator: f64,
}

/// Inverse proportionality: `base = numerator / value` (an involution)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reciprocal {
    pub numerator: f64,
}

/// Decibel-style scale: `base = reference * 10^(value / multiplier)`
///
/// `multiplier` is 20 for field quantities (sound pressure) and 10 for power
/// quantities (dBm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logarithmic {
    pub reference: f64,
    pub multiplier: f64,
}

impl BaseConversion for Linear {
    fn to_base(&self, value: f64) -> f64 {
        value * self.factor / self.divisor
    }

    fn from_base(&self, value: f64) -> f64 {
        value * self.divisor / self.factor
    }

    fn validate(&self) -> Result<(), String> {
        check_scale("factor", self.factor)?;
        check_scale("divisor", self.divisor)
    }

    fn kind(&self) -> LawKind {
        LawKind::Linear
    }
}

impl BaseConversion for Affine {
    fn to_base(&self, value: f64) -> f64 {
        (value - self.offset) * self.numerator / self.denominator
    }

    fn from_base(&self, value: f64) -> f64 {
        value * self.denominator / self.numerator + self.offset
    }

    fn validate(&self) -> Result<(), String> {
        if !self.offset.is_finite() {
            return Err(format!("offset must be finite, got {}", self.offset));
        }
        check_scale("numerator", self.numerator)?;
        check_scale("denominator", self.denominator)
    }

    fn kind(&self) -> LawKind {
        LawKind::Affine
    }
}

impl BaseConversion for Reciprocal {
    fn to_base(&self, value: f64) -> f64 {
        self.numerator / value
    }

    fn from_base(&self, value: f64) -> f64 {
        self.numerator / value
    }

    fn validate(&self) -> Result<(), String> {
        check_scale("numerator", self.numerator)
    }

    fn kind(&self) -> LawKind {
        LawKind::Reciprocal
    }
}

impl BaseConversion for Logarithmic {
    fn to_base(&self, value: f64) -> f64 {
        self.reference * 10f64.powf(value / self.multiplier)
    }

    fn from_base(&self, value: f64) -> f64 {
        self.multiplier * (value / self.reference).log10()
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.reference.is_finite() && self.reference > 0.0) {
            return Err(format!(
                "reference must be finite and positive, got {}",
                self.reference
            ));
        }
        check_scale("multiplier", self.multiplier)
    }

    fn kind(&self) -> LawKind {
        LawKind::Logarithmic
    }
}

fn check_scale(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value != 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be finite and non-zero, got {}", name, value))
    }
}

/// Tagged law attached to every unit
#[enum_dispatch(BaseConversion)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionLaw {
    Linear(Linear),
    Affine(Affine),
    Reciprocal(Reciprocal),
    Logarithmic(Logarithmic),
}

impl ConversionLaw {
    /// The base unit itself
    pub const fn identity() -> Self {
        ConversionLaw::Linear(Linear { factor: 1.0, divisor: 1.0 })
    }

    pub const fn linear(factor: f64) -> Self {
        ConversionLaw::Linear(Linear { factor, divisor: 1.0 })
    }

    pub const fn ratio(factor: f64, divisor: f64) -> Self {
        ConversionLaw::Linear(Linear { factor, divisor })
    }

    pub const fn affine(offset: f64, numerator: f64, denominator: f64) -> Self {
        ConversionLaw::Affine(Affine { offset, numerator, denominator })
    }

    pub const fn reciprocal(numerator: f64) -> Self {
        ConversionLaw::Reciprocal(Reciprocal { numerator })
    }

    pub const fn logarithmic(reference: f64, multiplier: f64) -> Self {
        ConversionLaw::Logarithmic(Logarithmic { reference, multiplier })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_linear_ratio_is_exact_for_round_values() {
        let kph = ConversionLaw::ratio(1000.0, 3600.0);
        assert_eq!(kph.to_base(36.0), 10.0);
        assert_eq!(kph.from_base(10.0), 36.0);
    }

    #[test]
    fn test_affine_matches_fahrenheit_formula() {
        let fahrenheit = ConversionLaw::affine(32.0, 5.0, 9.0);
        assert_eq!(fahrenheit.to_base(212.0), 100.0);
        assert_eq!(fahrenheit.from_base(100.0), 212.0);
        assert_eq!(fahrenheit.to_base(-40.0), -40.0);
    }

    #[test]
    fn test_reciprocal_is_an_involution() {
        let law = ConversionLaw::reciprocal(100.0);
        assert_eq!(law.to_base(5.0), 20.0);
        assert_eq!(law.from_base(20.0), 5.0);
        assert!(law.to_base(0.0).is_infinite());
    }

    #[test]
    fn test_logarithmic_reference_maps_to_zero() {
        let spl = ConversionLaw::logarithmic(2e-5, 20.0);
        assert_eq!(spl.from_base(2e-5), 0.0);
        assert_close(spl.to_base(94.0), 1.0023744672545447);
        assert_close(spl.from_base(spl.to_base(60.0)), 60.0);
    }

    #[test]
    fn test_validate_rejects_degenerate_parameters() {
        assert!(ConversionLaw::linear(0.0).validate().is_err());
        assert!(ConversionLaw::ratio(1.0, f64::NAN).validate().is_err());
        assert!(ConversionLaw::affine(f64::INFINITY, 1.0, 1.0).validate().is_err());
        assert!(ConversionLaw::reciprocal(0.0).validate().is_err());
        assert!(ConversionLaw::logarithmic(-1.0, 10.0).validate().is_err());
        assert!(ConversionLaw::logarithmic(1e-3, 10.0).validate().is_ok());
    }

    #[test]
    fn test_kind_follows_variant() {
        assert_eq!(ConversionLaw::identity().kind(), LawKind::Linear);
        assert_eq!(ConversionLaw::affine(0.0, 1.0, 1.0).kind(), LawKind::Affine);
        assert_eq!(ConversionLaw::reciprocal(1.0).kind(), LawKind::Reciprocal);
        assert_eq!(LawKind::Logarithmic.to_string(), "logarithmic");
    }
}
