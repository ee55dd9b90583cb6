//! Trailing operand scanner
//!
//! Sign toggling and percent both act on the operand at the very end of the
//! expression. The scanner recognises two shapes:
//!
//! - a number matching `-?[0-9]+\.?[0-9]*`, longest match anchored at the end
//! - a parenthesised negation `(-n)`
//!
//! A `-` that directly follows a digit, `.` or `)` is the subtraction
//! operator and is left out of the number. This narrows the plain greedy
//! match on purpose: toggling the sign of `3-5` gives `3-(-5)`, where the
//! greedy rule would treat `-5` as the operand and produce `35`.

use regex::Regex;
use std::sync::OnceLock;

fn number_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?[0-9]+\.?[0-9]*$").expect("number suffix regex is valid"))
}

fn negation_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\(-([0-9]+\.?[0-9]*)\)$").expect("negation suffix regex is valid")
    })
}

/// Operand found at the end of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand<'a> {
    /// A number, possibly carrying a unary minus: `12`, `-3.5`
    Number {
        /// Byte offset where the operand starts
        start: usize,
        /// The matched text
        literal: &'a str,
    },
    /// A parenthesised negation `(-n)`
    Negated {
        /// Byte offset of the opening parenthesis
        start: usize,
        /// The unsigned number inside the parentheses
        magnitude: &'a str,
    },
}

impl Operand<'_> {
    /// Byte offset where the operand starts
    pub(crate) const fn start(&self) -> usize {
        match self {
            Self::Number { start, .. } | Self::Negated { start, .. } => *start,
        }
    }

    /// Numeric value of the operand
    pub(crate) fn value(&self) -> Option<f64> {
        match self {
            Self::Number { literal, .. } => literal.parse().ok(),
            Self::Negated { magnitude, .. } => magnitude.parse::<f64>().ok().map(|m| -m),
        }
    }
}

/// Finds the operand at the end of `text`, if any
pub(crate) fn trailing_operand(text: &str) -> Option<Operand<'_>> {
    if let Some(caps) = negation_suffix().captures(text) {
        let whole = caps.get(0)?;
        let magnitude = caps.get(1)?;
        return Some(Operand::Negated {
            start: whole.start(),
            magnitude: magnitude.as_str(),
        });
    }

    let found = number_suffix().find(text)?;
    let mut start = found.start();
    let follows_operand = text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ')');
    if follows_operand && text[start..].starts_with('-') {
        start += 1;
    }

    Some(Operand::Number {
        start,
        literal: &text[start..],
    })
}
