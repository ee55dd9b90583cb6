//! Keypad layout and keyboard mapping
//!
//! Layout:
//! ```text
//! [ AC ] [+/-] [ % ] [ ÷ ]
//! [ 7  ] [ 8 ] [ 9 ] [ × ]
//! [ 4  ] [ 5 ] [ 6 ] [ - ]
//! [ 1  ] [ 2 ] [ 3 ] [ + ]
//! [ ⌫  ] [ 0 ] [ . ] [ = ]
//! ```

use super::dom::{DomElement, MockDom, BUTTON_CLASS};
use crate::core::{Action, Operator};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: Action,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a button definition, deriving its element ID from the action
    #[must_use]
    pub fn new(action: Action, row: usize, col: usize) -> Self {
        let id = match action {
            Action::Digit(d) => format!("btn-{d}"),
            Action::Decimal => "btn-decimal".to_string(),
            Action::Operator(op) => format!("btn-{}", op.name()),
            Action::Evaluate => "btn-equals".to_string(),
            Action::Clear => "btn-clear".to_string(),
            Action::Backspace => "btn-backspace".to_string(),
            Action::ToggleSign => "btn-sign".to_string(),
            Action::Percent => "btn-percent".to_string(),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }

    /// Label shown on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.action.label()
    }
}

/// Calculator keypad
#[derive(Debug, Clone)]
pub struct WebKeypad {
    buttons: Vec<KeypadButtonDef>,
}

impl Default for WebKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WebKeypad {
    /// Creates the standard five-row keypad
    #[must_use]
    pub fn new() -> Self {
        let layout = [
            [
                Action::Clear,
                Action::ToggleSign,
                Action::Percent,
                Action::Operator(Operator::Divide),
            ],
            [
                Action::Digit(7),
                Action::Digit(8),
                Action::Digit(9),
                Action::Operator(Operator::Multiply),
            ],
            [
                Action::Digit(4),
                Action::Digit(5),
                Action::Digit(6),
                Action::Operator(Operator::Subtract),
            ],
            [
                Action::Digit(1),
                Action::Digit(2),
                Action::Digit(3),
                Action::Operator(Operator::Add),
            ],
            [
                Action::Backspace,
                Action::Digit(0),
                Action::Decimal,
                Action::Evaluate,
            ],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButtonDef::new(*action, row, col))
            })
            .collect();

        Self { buttons }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Finds the button for an action
    #[must_use]
    pub fn find_button_by_action(&self, action: Action) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Creates DOM elements for all keypad buttons
    #[must_use]
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.label())
                    .with_class(BUTTON_CLASS)
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col))
                    .with_attr("data-action", &format!("{:?}", btn.action))
            })
            .collect()
    }

    /// Registers every button element in `dom`
    pub fn mount(&self, dom: &mut MockDom) {
        for element in self.create_dom_elements() {
            dom.register_element(element);
        }
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<Action> {
        match key {
            "Enter" => Some(Action::Evaluate),
            "Escape" | "c" | "C" => Some(Action::Clear),
            "Backspace" | "Delete" => Some(Action::Backspace),
            other => Action::from_label(other),
        }
    }
}
