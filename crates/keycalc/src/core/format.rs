//! Display formatting
//!
//! Maps the expression text to the string shown on the display and picks
//! one of eight font-size tiers from the rendered length.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integers at or above this magnitude switch to exponential notation
pub const EXPONENT_THRESHOLD: f64 = 1e10;

/// Integer digits plus decimal digits never exceed this count
pub const MAX_DISPLAY_DIGITS: usize = 10;

/// Fractional digits kept in an exponential mantissa
pub const MANTISSA_DIGITS: usize = 4;

/// Below this magnitude the shortest decimal form is exponential
const SMALL_MAGNITUDE: f64 = 1e-6;

/// Significant digits that hold any `f64` exactly
const EXACT_PRECISION: usize = 800;

/// Formats a numeric result for the display.
///
/// - integers below `1e10` keep all digits
/// - integers from `1e10` up use exponential notation with 4 mantissa digits
/// - non-integers keep at most `10 - integer_digits` decimals, trailing
///   zeros dropped; more than 10 integer digits or a magnitude below `1e-6`
///   switches to exponential notation
///
/// Rounding works on the exact binary value and sends ties away from zero,
/// so `1234567890.5` shows as `1234567891`.
///
/// ```rust
/// use keycalc::core::format::format_number;
///
/// assert_eq!(format_number(20.0), "20");
/// assert_eq!(format_number(12345678901.0), "1.2346e10");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();

    if value.fract() == 0.0 {
        if magnitude >= EXPONENT_THRESHOLD {
            return exponential(value);
        }
        return format!("{value}");
    }

    if magnitude < SMALL_MAGNITUDE {
        return exponential(value);
    }

    let integer_digits = integer_digit_count(magnitude);
    if integer_digits > MAX_DISPLAY_DIGITS {
        return exponential(value);
    }

    fixed(value, MAX_DISPLAY_DIGITS.saturating_sub(integer_digits))
}

/// Plain shortest rendering of a number, used when rewriting operands.
///
/// Unlike [`format_number`] this applies no digit cap; it only falls back
/// to exponential notation where a plain rendering would be unreadable.
pub(crate) fn plain_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(SMALL_MAGNITUDE..1e21).contains(&magnitude) {
        return format!("{value:e}");
    }
    format!("{value}")
}

/// Parses `text` when it is wholly a finite number
#[must_use]
pub fn parse_finite(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Exact significant digits of `magnitude` with the decimal exponent of
/// the first one: `(digits, e)` stands for `d0.d1d2... * 10^e`.
fn exact_digits(magnitude: f64) -> (Vec<u8>, i32) {
    let repr = format!("{magnitude:.prec$e}", prec = EXACT_PRECISION);
    let (mantissa, exponent) = repr.split_once('e').unwrap_or((repr.as_str(), "0"));
    let digits = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Keeps `keep` significant digits, rounding ties away from zero.
///
/// A carry out of the first digit prepends a `1` and bumps the exponent;
/// the last digit keeps its decimal place.
fn round_digits(mut digits: Vec<u8>, mut exponent: i32, keep: usize) -> (Vec<u8>, i32) {
    let round_up = digits.get(keep).is_some_and(|&d| d >= 5);
    digits.resize(keep, 0);
    if round_up {
        match digits.iter().rposition(|&d| d != 9) {
            Some(i) => {
                digits[i] += 1;
                digits[i + 1..].fill(0);
            }
            None => {
                digits.fill(0);
                digits.insert(0, 1);
                exponent += 1;
            }
        }
    }
    (digits, exponent)
}

fn fixed(value: f64, decimals: usize) -> String {
    let (digits, exponent) = exact_digits(value.abs());
    let keep = exponent + 1 + i32::try_from(decimals).unwrap_or(0);
    let Ok(keep) = usize::try_from(keep) else {
        return "0".to_string();
    };
    let (digits, _) = round_digits(digits, exponent, keep);

    // The last digit sits at 10^-decimals
    let mut text: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();
    if text.len() <= decimals {
        text.insert_str(0, &"0".repeat(decimals + 1 - text.len()));
    }
    if decimals > 0 {
        text.insert(text.len() - decimals, '.');
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    if value < 0.0 && text != "0" {
        text.insert(0, '-');
    }
    text
}

fn exponential(value: f64) -> String {
    let (digits, exponent) = exact_digits(value.abs());
    let (digits, exponent) = round_digits(digits, exponent, MANTISSA_DIGITS + 1);
    let fraction: String = digits[1..=MANTISSA_DIGITS]
        .iter()
        .map(|&d| char::from(b'0' + d))
        .collect();
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{fraction}e{exponent}", digits[0])
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_negative() {
        "-Infinity".to_string()
    } else {
        "Infinity".to_string()
    }
}

fn integer_digit_count(magnitude: f64) -> usize {
    format!("{}", magnitude.trunc()).len()
}

/// Font-size tier of the display, largest text first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeTier {
    /// Up to 8 characters
    Tier1,
    /// Up to 10 characters
    Tier2,
    /// Up to 12 characters
    Tier3,
    /// Up to 16 characters
    Tier4,
    /// Up to 20 characters
    Tier5,
    /// Up to 25 characters
    Tier6,
    /// Up to 30 characters
    Tier7,
    /// Anything longer
    Tier8,
}

impl SizeTier {
    /// All tiers, largest text first
    pub const ALL: [Self; 8] = [
        Self::Tier1,
        Self::Tier2,
        Self::Tier3,
        Self::Tier4,
        Self::Tier5,
        Self::Tier6,
        Self::Tier7,
        Self::Tier8,
    ];

    /// Longest rendered length for each tier except the last
    const LIMITS: [usize; 7] = [8, 10, 12, 16, 20, 25, 30];

    /// Selects the tier for a rendered string of `len` characters
    #[must_use]
    pub fn for_length(len: usize) -> Self {
        Self::LIMITS
            .iter()
            .position(|&limit| len <= limit)
            .map_or(Self::Tier8, |index| Self::ALL[index])
    }

    /// One-based tier number
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// CSS class applied to the display for this tier
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Tier1 => "text-6xl",
            Self::Tier2 => "text-5xl",
            Self::Tier3 => "text-4xl",
            Self::Tier4 => "text-3xl",
            Self::Tier5 => "text-2xl",
            Self::Tier6 => "text-xl",
            Self::Tier7 => "text-lg",
            Self::Tier8 => "text-base",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier-{}", self.number())
    }
}

/// What the display shows for a given expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendering {
    /// Text shown on the display
    pub text: String,
    /// Font-size tier for that text
    pub tier: SizeTier,
}

impl Rendering {
    /// Number of characters on the display
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when nothing is shown (never the case for buffer output)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Renders expression text for the display.
///
/// Text that is wholly a finite number goes through [`format_number`];
/// anything else (an expression mid-entry, the error sentinel) is shown
/// verbatim.
#[must_use]
pub fn render(text: &str) -> Rendering {
    let shown = parse_finite(text).map_or_else(|| text.to_string(), format_number);
    let tier = SizeTier::for_length(shown.chars().count());
    Rendering { text: shown, tier }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== format_number =====

    #[test]
    fn test_small_integers_render_plainly() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(9_999_999_999.0), "9999999999");
    }

    #[test]
    fn test_large_integers_use_exponent() {
        assert_eq!(format_number(12_345_678_901.0), "1.2346e10");
        assert_eq!(format_number(1e10), "1.0000e10");
        assert_eq!(format_number(-25_000_000_000.0), "-2.5000e10");
    }

    #[test]
    fn test_decimals_that_fit_are_unchanged() {
        assert_eq!(format_number(0.123456789), "0.123456789");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.75), "-0.75");
    }

    #[test]
    fn test_decimals_are_capped_by_integer_digits() {
        assert_eq!(format_number(1234567890.123), "1234567890");
        assert_eq!(format_number(12345.6789012345), "12345.6789");
        assert_eq!(format_number(1.0 / 3.0), "0.333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.666666667");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_number(1_234_567_890.5), "1234567891");
        assert_eq!(format_number(123_456_789.25), "123456789.3");
        assert_eq!(format_number(-123_456_789.25), "-123456789.3");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(render("1234567890.5").text, "1234567891");
    }

    #[test]
    fn test_exponent_ties_round_away_from_zero() {
        assert_eq!(format_number(12_344_500_000.0), "1.2345e10");
        assert_eq!(format_number(-12_344_500_000.0), "-1.2345e10");
        assert_eq!(format_number(12_344_499_999.0), "1.2344e10");
    }

    #[test]
    fn test_rounding_carries_into_a_new_digit() {
        assert_eq!(format_number(9_999_999_999.5), "10000000000");
        assert_eq!(format_number(99_999_500_000.0), "1.0000e11");
        assert_eq!(format_number(0.999_999_999_9), "1");
        assert_eq!(format_number(1e-6), "0.000001");
    }

    #[test]
    fn test_float_noise_is_rounded_away() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.1 * 3.0), "3.3");
    }

    #[test]
    fn test_tiny_values_use_exponent() {
        assert_eq!(format_number(1.5e-7), "1.5000e-7");
        assert_eq!(format_number(-2.0e-9), "-2.0000e-9");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(5.5), "5.5");
        assert_eq!(plain_number(12_345_678_901.0), "12345678901");
        assert_eq!(plain_number(1e22), "1e22");
        assert_eq!(plain_number(-0.0), "0");
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite("12.5"), Some(12.5));
        assert_eq!(parse_finite("1.2346e10"), Some(1.2346e10));
        assert_eq!(parse_finite("-3"), Some(-3.0));
        assert_eq!(parse_finite("3+4"), None);
        assert_eq!(parse_finite("(-5)"), None);
        assert_eq!(parse_finite("Error"), None);
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_finite("NaN"), None);
    }

    // ===== SizeTier =====

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(SizeTier::for_length(1), SizeTier::Tier1);
        assert_eq!(SizeTier::for_length(8), SizeTier::Tier1);
        assert_eq!(SizeTier::for_length(9), SizeTier::Tier2);
        assert_eq!(SizeTier::for_length(10), SizeTier::Tier2);
        assert_eq!(SizeTier::for_length(11), SizeTier::Tier3);
        assert_eq!(SizeTier::for_length(16), SizeTier::Tier4);
        assert_eq!(SizeTier::for_length(20), SizeTier::Tier5);
        assert_eq!(SizeTier::for_length(25), SizeTier::Tier6);
        assert_eq!(SizeTier::for_length(30), SizeTier::Tier7);
        assert_eq!(SizeTier::for_length(31), SizeTier::Tier8);
        assert_eq!(SizeTier::for_length(500), SizeTier::Tier8);
    }

    #[test]
    fn test_tier_is_monotone() {
        let tiers: Vec<SizeTier> = (0..40).map(SizeTier::for_length).collect();
        assert!(tiers.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_tier_classes_are_distinct() {
        let mut classes: Vec<&str> = SizeTier::ALL.iter().map(|t| t.css_class()).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), 8);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(SizeTier::Tier1.to_string(), "tier-1");
        assert_eq!(SizeTier::Tier8.to_string(), "tier-8");
    }

    // ===== render =====

    #[test]
    fn test_render_expression_verbatim() {
        let r = render("12+8×3");
        assert_eq!(r.text, "12+8×3");
        assert_eq!(r.tier, SizeTier::Tier1);
    }

    #[test]
    fn test_render_formats_numbers() {
        assert_eq!(render("12345678901").text, "1.2346e10");
        assert_eq!(render("0.30000000000000004").text, "0.3");
    }

    #[test]
    fn test_render_error_sentinel() {
        let r = render("Error");
        assert_eq!(r.text, "Error");
        assert_eq!(r.len(), 5);
    }

    #[test]
    fn test_render_counts_characters_not_bytes() {
        // × and ÷ are two bytes each
        let r = render("1×2÷3×4÷5");
        assert_eq!(r.len(), 9);
        assert_eq!(r.tier, SizeTier::Tier2);
    }
}
