//! Keypad actions
//!
//! Every button on the calculator maps to exactly one [`Action`]. Labels are
//! the strings printed on the buttons, so a click handler can translate the
//! button's text content straight into an action.

/// Binary operators available on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`×`)
    Multiply,
    /// Division (`÷`)
    Divide,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Glyph shown on the button and stored in the expression
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// ASCII symbol understood by the remote evaluator
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses a display glyph or its ASCII spelling
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '×' | '*' | 'x' => Some(Self::Multiply),
            '÷' | '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Short name used in element IDs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
        }
    }
}

/// A single button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Insert a binary operator
    Operator(Operator),
    /// Send the expression to the evaluator (`=`)
    Evaluate,
    /// Reset the expression (`AC`)
    Clear,
    /// Delete the last character (`⌫`)
    Backspace,
    /// Negate the trailing operand (`+/-`)
    ToggleSign,
    /// Divide the trailing number by 100 (`%`)
    Percent,
}

impl Action {
    /// Label for the clear button
    pub const CLEAR_LABEL: &'static str = "AC";
    /// Label for the backspace button
    pub const BACKSPACE_LABEL: &'static str = "⌫";
    /// Label for the sign toggle button
    pub const TOGGLE_SIGN_LABEL: &'static str = "+/-";
    /// Label for the percent button
    pub const PERCENT_LABEL: &'static str = "%";
    /// Label for the equals button
    pub const EVALUATE_LABEL: &'static str = "=";

    /// Maps a button label to its action.
    ///
    /// Accepts the glyph labels plus the ASCII operator spellings and `,`
    /// as an alternative decimal separator.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            Self::CLEAR_LABEL | "C" => Some(Self::Clear),
            Self::BACKSPACE_LABEL => Some(Self::Backspace),
            Self::TOGGLE_SIGN_LABEL | "±" => Some(Self::ToggleSign),
            Self::PERCENT_LABEL => Some(Self::Percent),
            Self::EVALUATE_LABEL => Some(Self::Evaluate),
            "." | "," => Some(Self::Decimal),
            other => {
                let mut chars = other.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                if let Some(d) = c.to_digit(10) {
                    Some(Self::Digit(d as u8))
                } else {
                    Operator::from_char(c).map(Self::Operator)
                }
            }
        }
    }

    /// Label printed on the button for this action
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.glyph().to_string(),
            Self::Evaluate => Self::EVALUATE_LABEL.to_string(),
            Self::Clear => Self::CLEAR_LABEL.to_string(),
            Self::Backspace => Self::BACKSPACE_LABEL.to_string(),
            Self::ToggleSign => Self::TOGGLE_SIGN_LABEL.to_string(),
            Self::Percent => Self::PERCENT_LABEL.to_string(),
        }
    }

    /// Character appended to the expression, if this action appends one
    #[must_use]
    pub fn to_char(self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(op.glyph()),
            Self::Evaluate | Self::Clear | Self::Backspace | Self::ToggleSign | Self::Percent => {
                None
            }
        }
    }
}
