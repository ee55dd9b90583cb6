//! Terminal driver
//!
//! Drives a [`Session`] from typed key labels. Unlike the DOM front end
//! there is no time: an error alert lasts until the next key press.

use async_trait::async_trait;
use keycalc::core::{Action, Rendering, SizeTier};
use keycalc::driver::{CalculatorDriver, DriverError, DriverResult};
use keycalc::evaluator::Evaluator;
use keycalc::session::{Notice, Press, Session};
use tracing::info;

/// Calculator driven from the terminal
#[derive(Debug)]
pub struct TerminalDriver<E> {
    session: Session,
    evaluator: E,
    notices: Vec<Notice>,
}

impl<E: Evaluator> TerminalDriver<E> {
    /// Creates a driver showing `"0"`
    pub fn new(evaluator: E) -> Self {
        Self {
            session: Session::new(),
            evaluator,
            notices: Vec::new(),
        }
    }

    /// The calculator session
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current rendering of the display
    #[must_use]
    pub fn rendering(&self) -> Rendering {
        self.session.rendering()
    }

    /// Notices raised by the most recent key press
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Presses every key in a whitespace separated line.
    ///
    /// Notices from all presses on the line are kept. Stops at the first
    /// unknown token, leaving earlier presses applied.
    pub async fn press_line(&mut self, line: &str) -> DriverResult<Vec<Notice>> {
        let mut raised = Vec::new();
        for token in line.split_whitespace() {
            for action in expand_token(token)? {
                self.apply(action).await;
                raised.extend(self.notices.iter().cloned());
            }
        }
        Ok(raised)
    }

    /// Applies one action, awaiting the evaluator on `=`
    pub async fn apply(&mut self, action: Action) {
        self.notices.clear();
        match self.session.press(action) {
            Press::Edited { notice } => self.notices.extend(notice),
            Press::Evaluate(ticket) => {
                let outcome = self.evaluator.evaluate(ticket.expression()).await;
                let completion = self.session.complete(&ticket, outcome);
                self.notices.extend(completion.notice());
            }
        }
    }
}

/// Splits a typed token into actions.
///
/// A token that is itself a label (`AC`, `+/-`, `7`) is one action;
/// otherwise each character must be a label, so `12+8=` is five presses.
pub fn expand_token(token: &str) -> DriverResult<Vec<Action>> {
    if let Some(action) = Action::from_label(token) {
        return Ok(vec![action]);
    }
    token
        .chars()
        .map(|c| {
            Action::from_label(c.encode_utf8(&mut [0; 4]))
                .ok_or_else(|| DriverError::UnknownLabel(token.to_string()))
        })
        .collect()
}

#[async_trait]
impl<E: Evaluator> CalculatorDriver for TerminalDriver<E> {
    async fn press(&mut self, label: &str) -> DriverResult<()> {
        let action = Action::from_label(label)
            .ok_or_else(|| DriverError::UnknownLabel(label.to_string()))?;
        info!(label, "press");
        self.apply(action).await;
        Ok(())
    }

    fn display_text(&self) -> String {
        self.session.rendering().text
    }

    fn size_tier(&self) -> SizeTier {
        self.session.rendering().tier
    }

    fn expression(&self) -> String {
        self.session.text().to_string()
    }

    fn error_alert(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n, Notice::CalculationFailed(_)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use keycalc::core::Operator;
    use keycalc::driver::press_all;
    use keycalc::evaluator::{CalculationError, CalculationResult};

    /// Evaluates `a+b`; rejects anything else
    struct Sum;

    #[async_trait]
    impl Evaluator for Sum {
        async fn evaluate(&self, expression: &str) -> CalculationResult<f64> {
            let (a, b) = expression
                .split_once('+')
                .ok_or_else(|| CalculationError::Rejected("Invalid expression".into()))?;
            match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(a), Ok(b)) => Ok(a + b),
                _ => Err(CalculationError::Rejected("Invalid expression".into())),
            }
        }
    }

    #[test]
    fn test_expand_single_label() {
        assert_eq!(expand_token("AC").unwrap(), vec![Action::Clear]);
        assert_eq!(expand_token("+/-").unwrap(), vec![Action::ToggleSign]);
        assert_eq!(expand_token("×").unwrap(), vec![Action::Operator(Operator::Multiply)]);
    }

    #[test]
    fn test_expand_run_of_characters() {
        assert_eq!(
            expand_token("12+8=").unwrap(),
            vec![
                Action::Digit(1),
                Action::Digit(2),
                Action::Operator(Operator::Add),
                Action::Digit(8),
                Action::Evaluate,
            ]
        );
    }

    #[test]
    fn test_expand_unknown() {
        assert_eq!(
            expand_token("sqrt"),
            Err(DriverError::UnknownLabel("sqrt".into()))
        );
    }

    #[tokio::test]
    async fn test_press_all_and_evaluate() {
        let mut driver = TerminalDriver::new(Sum);
        press_all(&mut driver, &["1", "2", "+", "8", "="]).await.unwrap();
        assert_eq!(driver.display_text(), "20");
        assert_eq!(driver.size_tier(), SizeTier::Tier1);
        assert!(!driver.error_alert());
    }

    #[tokio::test]
    async fn test_error_alert_until_next_press() {
        let mut driver = TerminalDriver::new(Sum);
        press_all(&mut driver, &["7", "="]).await.unwrap();
        assert_eq!(driver.display_text(), "Error");
        assert!(driver.error_alert());
        driver.press("AC").await.unwrap();
        assert!(!driver.error_alert());
        assert_eq!(driver.expression(), "0");
    }

    #[tokio::test]
    async fn test_press_line() {
        let mut driver = TerminalDriver::new(Sum);
        let notices = driver.press_line("12 + 8 =").await.unwrap();
        assert!(notices.is_empty());
        assert_eq!(driver.display_text(), "20");
    }

    #[tokio::test]
    async fn test_press_line_collects_failure() {
        let mut driver = TerminalDriver::new(Sum);
        let notices = driver.press_line("5= 3").await.unwrap();
        assert_eq!(
            notices,
            vec![Notice::CalculationFailed("Invalid expression".into())]
        );
        assert_eq!(driver.expression(), "Error3");
    }

    #[tokio::test]
    async fn test_press_line_stops_at_unknown_token() {
        let mut driver = TerminalDriver::new(Sum);
        let err = driver.press_line("4 sqrt 2").await.unwrap_err();
        assert_eq!(err, DriverError::UnknownLabel("sqrt".into()));
        assert_eq!(driver.expression(), "4");
    }

    #[tokio::test]
    async fn test_unknown_label() {
        let mut driver = TerminalDriver::new(Sum);
        assert!(driver.press("?").await.is_err());
    }
}
