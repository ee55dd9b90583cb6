//! Keycalc: a keypad calculator front end
//!
//! The calculator edits an infix expression one key at a time, renders it
//! for a fixed-width display, and hands the finished expression to a remote
//! evaluator over HTTP. No arithmetic happens locally.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   Action   ┌─────────────┐  ticket   ┌──────────────┐
//! │  Keypad  │──────────►│   Session   │─────────►│  Evaluator   │
//! │ DOM/TTY  │           │  (buffer +  │◄─────────│ POST /calc.. │
//! └──────────┘           │  generation)│  result   └──────────────┘
//!      ▲                 └──────┬──────┘
//!      │     Rendering          │
//!      └────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use keycalc::prelude::*;
//!
//! let mut buffer = ExpressionBuffer::new();
//! for action in [Action::Digit(1), Action::Digit(2), Action::Operator(Operator::Add)] {
//!     buffer.apply(action);
//! }
//! assert_eq!(buffer.text(), "12+");
//!
//! let rendering = render("12345678901");
//! assert_eq!(rendering.text, "1.2346e10");
//! assert_eq!(rendering.tier, SizeTier::Tier2);
//! ```

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]

pub mod core;
pub mod driver;
pub mod evaluator;
pub mod session;
pub mod web;

/// Commonly used types
pub mod prelude {
    pub use super::core::{
        format_number, render, Action, ExpressionBuffer, Operator, Rendering, SizeTier,
        ERROR_TEXT, RESET_TEXT,
    };
    pub use super::driver::{press_all, CalculatorDriver, DriverError, DriverResult};
    pub use super::evaluator::{
        normalize_expression, CalculateRequest, CalculateResponse, CalculationError,
        CalculationResult, Evaluator, EvaluatorConfig, HttpEvaluator,
    };
    pub use super::session::{Completion, EvaluationTicket, Notice, Press, Session};
    pub use super::web::{Alert, DomDriver, MockDom, WebKeypad};
}
