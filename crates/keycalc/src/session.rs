//! Calculator session
//!
//! A [`Session`] owns the expression buffer for one calculator instance and
//! tracks a generation counter so that evaluation results arriving after
//! further edits are discarded instead of overwriting the newer input.
//!
//! Evaluation is split in two steps so callers can run the request
//! concurrently with more key presses:
//!
//! ```rust,no_run
//! # async fn demo(evaluator: &keycalc::evaluator::HttpEvaluator) {
//! use keycalc::prelude::*;
//!
//! let mut session = Session::new();
//! for label in ["1", "2", "+", "8"] {
//!     session.press_label(label);
//! }
//! let ticket = session.begin_evaluation();
//! let outcome = evaluator.evaluate(ticket.expression()).await;
//! session.complete(&ticket, outcome);
//! # }
//! ```

use crate::core::{render, Action, ExpressionBuffer, Rendering};
use crate::evaluator::{normalize_expression, CalculationError, Evaluator};
use tracing::{debug, warn};

/// Something the display should draw attention to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The expression has grown long
    LongExpression,
    /// Evaluation failed with the given message
    CalculationFailed(String),
}

/// An evaluation request tagged with the generation it was issued at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationTicket {
    generation: u64,
    expression: String,
}

impl EvaluationTicket {
    /// Generation of the buffer when the request was issued
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Normalised expression to send to the evaluator
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

/// Result of pressing a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Press {
    /// The buffer was edited (possibly left unchanged)
    Edited {
        /// Notice raised by the edit
        notice: Option<Notice>,
    },
    /// `=` was pressed; the ticket must be evaluated and completed
    Evaluate(EvaluationTicket),
}

/// How an evaluation completion was applied
#[derive(Debug)]
pub enum Completion {
    /// The result replaced the expression
    Applied {
        /// Value returned by the evaluator
        value: f64,
    },
    /// The expression was replaced by the error sentinel
    Failed(CalculationError),
    /// The buffer changed since the request was issued; nothing applied
    Stale {
        /// Generation carried by the ticket
        ticket: u64,
        /// Generation of the buffer at completion time
        current: u64,
    },
}

impl Completion {
    /// Notice the display should raise for this completion
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Failed(err) => Some(Notice::CalculationFailed(err.to_string())),
            Self::Applied { .. } | Self::Stale { .. } => None,
        }
    }

    /// True when the completion changed the buffer
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        !matches!(self, Self::Stale { .. })
    }
}

/// State of one calculator instance
#[derive(Debug, Clone, Default)]
pub struct Session {
    buffer: ExpressionBuffer,
    generation: u64,
}

impl Session {
    /// Creates a session showing `"0"`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session starting from `text`
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: ExpressionBuffer::with_text(text),
            generation: 0,
        }
    }

    /// Current expression text
    #[must_use]
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// The underlying buffer
    #[must_use]
    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    /// Number of changes applied to the expression so far
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// What the display should show right now
    #[must_use]
    pub fn rendering(&self) -> Rendering {
        render(self.buffer.text())
    }

    /// Applies one key press.
    ///
    /// Edits are applied immediately; `=` returns a ticket instead.
    pub fn press(&mut self, action: Action) -> Press {
        if action == Action::Evaluate {
            return Press::Evaluate(self.begin_evaluation());
        }

        let before = self.buffer.text().to_string();
        let long = self.buffer.apply(action);
        if self.buffer.text() != before {
            self.generation += 1;
        }
        debug!(?action, text = self.buffer.text(), generation = self.generation, "key press");

        Press::Edited {
            notice: long.then_some(Notice::LongExpression),
        }
    }

    /// Applies a key press given by its button label.
    ///
    /// Returns `None` for labels that are not on the keypad.
    pub fn press_label(&mut self, label: &str) -> Option<Press> {
        Action::from_label(label).map(|action| self.press(action))
    }

    /// Issues an evaluation request for the current expression
    #[must_use]
    pub fn begin_evaluation(&self) -> EvaluationTicket {
        EvaluationTicket {
            generation: self.generation,
            expression: normalize_expression(self.buffer.text()),
        }
    }

    /// Applies the outcome of an evaluation request.
    ///
    /// Outcomes for tickets issued before the latest change are dropped.
    pub fn complete(
        &mut self,
        ticket: &EvaluationTicket,
        outcome: Result<f64, CalculationError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale evaluation result"
            );
            return Completion::Stale {
                ticket: ticket.generation,
                current: self.generation,
            };
        }

        let outcome = outcome.and_then(|value| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(CalculationError::MalformedResponse(format!(
                    "non-finite result {value}"
                )))
            }
        });

        self.generation += 1;
        match outcome {
            Ok(value) => {
                self.buffer.set_result(value);
                debug!(value, text = self.buffer.text(), "evaluation applied");
                Completion::Applied { value }
            }
            Err(err) => {
                warn!(error = %err, expression = ticket.expression(), "calculation error");
                self.buffer.set_error();
                Completion::Failed(err)
            }
        }
    }

    /// Evaluates the current expression and applies the outcome
    pub async fn evaluate<E: Evaluator + ?Sized>(&mut self, evaluator: &E) -> Completion {
        let ticket = self.begin_evaluation();
        let outcome = evaluator.evaluate(ticket.expression()).await;
        self.complete(&ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Operator, SizeTier};
    use crate::evaluator::CalculationResult;
    use async_trait::async_trait;

    struct Fixed(f64);

    #[async_trait]
    impl Evaluator for Fixed {
        async fn evaluate(&self, _expression: &str) -> CalculationResult<f64> {
            Ok(self.0)
        }
    }

    struct Failing;

    #[async_trait]
    impl Evaluator for Failing {
        async fn evaluate(&self, _expression: &str) -> CalculationResult<f64> {
            Err(CalculationError::Status {
                status: 500,
                body: String::new(),
            })
        }
    }

    fn press_all(session: &mut Session, labels: &[&str]) {
        for label in labels {
            session.press_label(label).unwrap();
        }
    }

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.text(), "0");
        assert_eq!(session.generation(), 0);
        assert_eq!(session.rendering().tier, SizeTier::Tier1);
    }

    #[test]
    fn test_edits_bump_generation() {
        let mut session = Session::new();
        press_all(&mut session, &["1", "2"]);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_noop_edits_keep_generation() {
        let mut session = Session::new();
        session.press(Action::Backspace);
        session.press(Action::ToggleSign);
        session.press(Action::Clear);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_unknown_label() {
        let mut session = Session::new();
        assert!(session.press_label("sqrt").is_none());
        assert_eq!(session.text(), "0");
    }

    #[test]
    fn test_long_expression_notice() {
        let mut session = Session::with_text("1234567890+12345678");
        let press = session.press(Action::Digit(9));
        assert_eq!(
            press,
            Press::Edited {
                notice: Some(Notice::LongExpression)
            }
        );
    }

    #[test]
    fn test_evaluate_press_returns_normalised_ticket() {
        let mut session = Session::new();
        press_all(&mut session, &["6", "×", "7", "÷", "2"]);
        let Press::Evaluate(ticket) = session.press(Action::Evaluate) else {
            panic!("expected an evaluation ticket");
        };
        assert_eq!(ticket.expression(), "6*7/2");
        assert_eq!(ticket.generation(), session.generation());
        assert_eq!(session.text(), "6×7÷2");
    }

    #[test]
    fn test_complete_success() {
        let mut session = Session::new();
        press_all(&mut session, &["1", "2", "+", "8"]);
        let ticket = session.begin_evaluation();
        let completion = session.complete(&ticket, Ok(20.0));
        assert!(matches!(completion, Completion::Applied { value } if value == 20.0));
        assert_eq!(session.text(), "20");
        assert!(completion.notice().is_none());
    }

    #[test]
    fn test_complete_failure() {
        let mut session = Session::with_text("1÷0");
        let ticket = session.begin_evaluation();
        let completion = session.complete(
            &ticket,
            Err(CalculationError::Rejected("division by zero".into())),
        );
        assert_eq!(session.text(), "Error");
        assert_eq!(
            completion.notice(),
            Some(Notice::CalculationFailed("division by zero".into()))
        );
    }

    #[test]
    fn test_non_finite_result_is_failure() {
        let mut session = Session::with_text("1÷0");
        let ticket = session.begin_evaluation();
        let completion = session.complete(&ticket, Ok(f64::INFINITY));
        assert!(matches!(completion, Completion::Failed(_)));
        assert_eq!(session.text(), "Error");
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = Session::new();
        press_all(&mut session, &["1", "+", "1"]);
        let ticket = session.begin_evaluation();
        session.press(Action::Operator(Operator::Add));
        session.press(Action::Digit(5));

        let completion = session.complete(&ticket, Ok(2.0));
        assert!(matches!(completion, Completion::Stale { .. }));
        assert!(!completion.is_applied());
        assert_eq!(session.text(), "1+1+5");
    }

    #[test]
    fn test_second_completion_for_same_ticket_is_stale() {
        let mut session = Session::with_text("2+2");
        let first = session.begin_evaluation();
        let second = session.begin_evaluation();
        assert!(session.complete(&first, Ok(4.0)).is_applied());
        assert!(!session.complete(&second, Ok(4.0)).is_applied());
        assert_eq!(session.text(), "4");
    }

    #[test]
    fn test_clear_recovers_from_error() {
        let mut session = Session::with_text("1+");
        let ticket = session.begin_evaluation();
        session.complete(&ticket, Err(CalculationError::Rejected("syntax".into())));
        session.press(Action::Clear);
        assert_eq!(session.text(), "0");
    }

    #[tokio::test]
    async fn test_evaluate_with_evaluator() {
        let mut session = Session::new();
        press_all(&mut session, &["1", "2", "+", "8"]);
        let completion = session.evaluate(&Fixed(20.0)).await;
        assert!(completion.is_applied());
        assert_eq!(session.text(), "20");
    }

    #[tokio::test]
    async fn test_evaluate_with_failing_evaluator() {
        let mut session = Session::with_text("12+8");
        let completion = session.evaluate(&Failing).await;
        assert_eq!(session.text(), "Error");
        assert_eq!(
            completion.notice(),
            Some(Notice::CalculationFailed("HTTP Error: 500".into()))
        );
    }

    #[tokio::test]
    async fn test_evaluate_through_trait_object() {
        let evaluator: Box<dyn Evaluator> = Box::new(Fixed(1e12));
        let mut session = Session::with_text("1000000×1000000");
        session.evaluate(evaluator.as_ref()).await;
        assert_eq!(session.text(), "1.0000e12");
        assert_eq!(session.rendering().text, "1.0000e12");
    }
}
