//! Expression buffer
//!
//! Holds the in-progress expression as display text and applies edit
//! actions to it. The text is never empty; `"0"` is the reset value.

use super::action::Action;
use super::format::{format_number, parse_finite, plain_number};
use super::operand::{trailing_operand, Operand};

/// Value of a freshly reset buffer
pub const RESET_TEXT: &str = "0";

/// Text shown after a failed evaluation
pub const ERROR_TEXT: &str = "Error";

/// Appends that bring the expression to this many characters raise a notice
pub const LONG_EXPRESSION_CHARS: usize = 20;

/// Mutable expression text driven by keypad actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionBuffer {
    text: String,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBuffer {
    /// Creates a buffer holding `"0"`
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: RESET_TEXT.to_string(),
        }
    }

    /// Creates a buffer holding `text` (empty text becomes `"0"`)
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        Self {
            text: text.to_string(),
        }
    }

    /// Current expression text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the buffer holds the reset value
    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.text == RESET_TEXT
    }

    /// True when the buffer holds the error sentinel
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.text == ERROR_TEXT
    }

    /// Applies an edit action.
    ///
    /// Returns `true` when an append made the expression long enough to
    /// warrant a visual notice. [`Action::Evaluate`] is not an edit and
    /// leaves the buffer untouched.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Clear => {
                self.clear();
                false
            }
            Action::Backspace => {
                self.backspace();
                false
            }
            Action::ToggleSign => {
                self.toggle_sign();
                false
            }
            Action::Percent => {
                self.percent();
                false
            }
            Action::Digit(_) | Action::Decimal | Action::Operator(_) => action
                .to_char()
                .is_some_and(|c| self.append(c.encode_utf8(&mut [0; 4]))),
            Action::Evaluate => false,
        }
    }

    /// Resets to `"0"`
    pub fn clear(&mut self) {
        self.text.clear();
        self.text.push_str(RESET_TEXT);
    }

    /// Drops the last character; a single character becomes `"0"`
    pub fn backspace(&mut self) {
        if self.text.chars().count() <= 1 {
            self.clear();
        } else {
            self.text.pop();
        }
    }

    /// Appends `token`, replacing the reset value instead of extending it.
    ///
    /// Returns `true` when the expression was extended to
    /// [`LONG_EXPRESSION_CHARS`] characters or more.
    pub fn append(&mut self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        if self.is_reset() {
            self.text = token.to_string();
            return false;
        }
        self.text.push_str(token);
        self.text.chars().count() >= LONG_EXPRESSION_CHARS
    }

    /// Negates the trailing operand.
    ///
    /// A whole positive number becomes `(-n)` and a whole negative number
    /// loses its sign. Inside an expression the trailing number is wrapped
    /// in `(-n)`, a trailing `(-n)` is unwrapped, and a unary minus is
    /// stripped. `"0"` and text without a trailing operand are unchanged.
    pub fn toggle_sign(&mut self) {
        if self.is_reset() {
            return;
        }

        if let Some(value) = parse_finite(&self.text) {
            if value > 0.0 {
                self.text = format!("(-{})", plain_number(value));
            } else if value < 0.0 {
                self.text = plain_number(value.abs());
            }
            return;
        }

        let Some(operand) = trailing_operand(&self.text) else {
            return;
        };
        let replacement = match operand {
            Operand::Negated { magnitude, .. } => magnitude.to_string(),
            Operand::Number { literal, .. } => match literal.strip_prefix('-') {
                Some(unsigned) => unsigned.to_string(),
                None => format!("(-{literal})"),
            },
        };
        self.text.replace_range(operand.start().., &replacement);
    }

    /// Replaces the trailing number with its value divided by 100.
    ///
    /// A trailing `(-n)` keeps its parentheses. Nothing happens when there
    /// is no trailing number or it is zero.
    pub fn percent(&mut self) {
        if let Some(value) = parse_finite(&self.text) {
            if value != 0.0 {
                self.text = format_number(value / 100.0);
            }
            return;
        }

        let Some(operand) = trailing_operand(&self.text) else {
            return;
        };
        let Some(value) = operand.value().filter(|v| *v != 0.0) else {
            return;
        };
        let replacement = match operand {
            Operand::Negated { .. } => format!("(-{})", format_number(value.abs() / 100.0)),
            Operand::Number { .. } => format_number(value / 100.0),
        };
        self.text.replace_range(operand.start().., &replacement);
    }

    /// Replaces the whole expression with a formatted result
    pub fn set_result(&mut self, value: f64) {
        self.text = format_number(value);
    }

    /// Replaces the whole expression with the error sentinel
    pub fn set_error(&mut self) {
        self.text = ERROR_TEXT.to_string();
    }
}
