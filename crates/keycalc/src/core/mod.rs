//! Calculator core: keypad actions, the expression buffer and the display
//! formatter.
//!
//! Everything here is synchronous and free of I/O. Evaluation lives in
//! [`crate::evaluator`] and the state that ties both together in
//! [`crate::session`].

pub mod action;
pub mod buffer;
pub mod format;
mod operand;

pub use action::{Action, Operator};
pub use buffer::{ExpressionBuffer, ERROR_TEXT, LONG_EXPRESSION_CHARS, RESET_TEXT};
pub use format::{format_number, render, Rendering, SizeTier};
