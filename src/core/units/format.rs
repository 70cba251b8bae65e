//! Display formatting for conversion results
//!
//! Fixed policy so every front end renders the same string:
//! - NaN or infinite -> empty string
//! - 0 < |v| < 1e-6 -> exponential with 4 fractional digits (`1.2340e-7`)
//! - fractional part -> fixed point with `clamp(8 - integer digits, 0, 8)` decimals
//! - integral -> plain integer, no trailing `.0`

/// Below this magnitude results switch to exponential notation
const EXPONENTIAL_THRESHOLD: f64 = 1e-6;
const EXPONENT_DIGITS: usize = 4;
const SIGNIFICANT_DIGITS: usize = 8;

/// Render a conversion result for display
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let magnitude = value.abs();

    if magnitude > 0.0 && magnitude < EXPONENTIAL_THRESHOLD {
        return format!("{:.*e}", EXPONENT_DIGITS, value);
    }

    if value.fract() != 0.0 {
        let precision = SIGNIFICANT_DIGITS.saturating_sub(integer_digits(magnitude));
        return format!("{:.*}", precision, value);
    }

    // Covers -0.0 as well
    if value == 0.0 {
        return "0".to_string();
    }

    format!("{}", value)
}

/// Number of digits in the integer part of a non-negative value (`0.5` -> 1)
fn integer_digits(magnitude: f64) -> usize {
    format!("{:.0}", magnitude.trunc()).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_and_infinity_are_blank() {
        assert_eq!(format_number(f64::NAN), "");
        assert_eq!(format_number(f64::INFINITY), "");
        assert_eq!(format_number(f64::NEG_INFINITY), "");
    }

    #[test]
    fn test_tiny_values_use_exponential() {
        assert_eq!(format_number(0.0000001234), "1.2340e-7");
        assert_eq!(format_number(-1.5e-7), "-1.5000e-7");
        assert_eq!(format_number(2e-5 / 100.0), "2.0000e-7");
    }

    #[test]
    fn test_threshold_value_is_fixed_point() {
        // 1e-6 itself is not below the threshold
        assert_eq!(format_number(0.000001), "0.0000010");
    }

    #[test]
    fn test_integral_values_have_no_decimals() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-212.0), "-212");
        assert_eq!(format_number(1000000.0), "1000000");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_fraction_precision_shrinks_with_magnitude() {
        assert_eq!(format_number(0.5), "0.5000000");
        assert_eq!(format_number(3.14159), "3.1415900");
        assert_eq!(format_number(12345.678), "12345.678");
        assert_eq!(format_number(1234567.26), "1234567.3");
        assert_eq!(format_number(123456789.25), "123456789");
        assert_eq!(format_number(-2.5), "-2.5000000");
    }

    #[test]
    fn test_pi_keeps_eight_significant_digits() {
        let rendered = format_number(3.14159265);
        assert!(rendered.starts_with("3.141592"));
        let digits = rendered.chars().filter(char::is_ascii_digit).count();
        assert_eq!(digits, 8);
    }

    #[test]
    fn test_integer_digits() {
        assert_eq!(integer_digits(0.25), 1);
        assert_eq!(integer_digits(9.99), 1);
        assert_eq!(integer_digits(10.0), 2);
        assert_eq!(integer_digits(99999.5), 5);
        assert_eq!(integer_digits(100000000.0), 9);
    }
}
