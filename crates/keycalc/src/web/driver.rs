//! DOM driver
//!
//! Wires a [`Session`] to a [`MockDom`]: clicks on `.btn` elements are
//! translated through the button's text content, and after every change
//! the display element's text and size class are synchronised. Alerts are
//! transient class sets that expire as mock time advances.

use super::dom::{DomEvent, MockDom, BUTTON_CLASS, DISPLAY_ID};
use super::keypad::WebKeypad;
use crate::core::{Action, SizeTier};
use crate::driver::{CalculatorDriver, DriverError, DriverResult};
use crate::evaluator::Evaluator;
use crate::session::{Notice, Press, Session};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Transient highlight applied to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alert {
    /// Evaluation failed: red text and a shake
    Error,
    /// The expression has grown long: amber flash
    LongExpression,
}

impl Alert {
    /// Classes added to the display while the alert is active
    #[must_use]
    pub const fn classes(self) -> &'static [&'static str] {
        match self {
            Self::Error => &["text-red-500", "animate-shake"],
            Self::LongExpression => &["text-amber-400"],
        }
    }

    /// How long the alert stays on
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Error => Duration::from_millis(500),
            Self::LongExpression => Duration::from_millis(300),
        }
    }

    /// Alert raised for a session notice
    #[must_use]
    pub const fn for_notice(notice: &Notice) -> Self {
        match notice {
            Notice::LongExpression => Self::LongExpression,
            Notice::CalculationFailed(_) => Self::Error,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveAlert {
    alert: Alert,
    remaining: Duration,
}

/// Calculator bound to a mock DOM and an evaluator
#[derive(Debug)]
pub struct DomDriver<E> {
    session: Session,
    dom: MockDom,
    keypad: WebKeypad,
    evaluator: E,
    alerts: Vec<ActiveAlert>,
}

impl<E: Evaluator> DomDriver<E> {
    /// Builds the display and keypad and renders the initial `"0"`
    pub fn new(evaluator: E) -> Self {
        let keypad = WebKeypad::new();
        let mut dom = MockDom::with_display();
        keypad.mount(&mut dom);
        let mut driver = Self {
            session: Session::new(),
            dom,
            keypad,
            evaluator,
            alerts: Vec::new(),
        };
        driver.sync_display();
        driver
    }

    /// The calculator session
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The document
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// The keypad layout
    #[must_use]
    pub fn keypad(&self) -> &WebKeypad {
        &self.keypad
    }

    /// Clicks the element with `element_id`.
    ///
    /// Only `.btn` elements have a listener. The button's text content
    /// decides the action, as a listener reading `textContent` would.
    pub async fn click(&mut self, element_id: &str) -> DriverResult<()> {
        let element = self
            .dom
            .get_element(element_id)
            .ok_or_else(|| DriverError::UnknownElement(element_id.to_string()))?;
        let label = element
            .has_class(BUTTON_CLASS)
            .then(|| element.text_content.clone());
        self.dom.dispatch_event(DomEvent::click(element_id));

        let Some(label) = label else {
            return Ok(());
        };
        let action = Action::from_label(&label).ok_or(DriverError::UnknownLabel(label))?;
        self.apply(action).await;
        Ok(())
    }

    /// Presses a keyboard key; unmapped keys are ignored
    pub async fn key_press(&mut self, key: &str) {
        self.dom.dispatch_event(DomEvent::key_press(key));
        if let Some(action) = WebKeypad::key_to_action(key) {
            self.apply(action).await;
        }
    }

    /// Applies an action, awaiting the evaluator on `=`
    pub async fn apply(&mut self, action: Action) {
        match self.session.press(action) {
            Press::Edited { notice } => {
                self.sync_display();
                if let Some(notice) = notice {
                    self.raise(Alert::for_notice(&notice));
                }
            }
            Press::Evaluate(ticket) => {
                let outcome = self.evaluator.evaluate(ticket.expression()).await;
                let completion = self.session.complete(&ticket, outcome);
                self.sync_display();
                if let Some(notice) = completion.notice() {
                    self.raise(Alert::for_notice(&notice));
                }
            }
        }
    }

    /// Advances mock time, removing alerts that have run out
    pub fn advance(&mut self, elapsed: Duration) {
        let mut expired = Vec::new();
        self.alerts.retain_mut(|active| {
            active.remaining = active.remaining.saturating_sub(elapsed);
            if active.remaining.is_zero() {
                expired.push(active.alert);
                false
            } else {
                true
            }
        });
        if let Some(display) = self.dom.get_element_mut(DISPLAY_ID) {
            for alert in expired {
                for class in alert.classes() {
                    display.remove_class(class);
                }
            }
        }
    }

    /// Alerts currently showing
    #[must_use]
    pub fn active_alerts(&self) -> Vec<Alert> {
        self.alerts.iter().map(|a| a.alert).collect()
    }

    /// True when the display carries `class`
    #[must_use]
    pub fn display_has_class(&self, class: &str) -> bool {
        self.dom
            .get_element(DISPLAY_ID)
            .is_some_and(|e| e.has_class(class))
    }

    /// Size-tier classes currently on the display
    #[must_use]
    pub fn tier_classes(&self) -> Vec<&'static str> {
        SizeTier::ALL
            .iter()
            .map(|tier| tier.css_class())
            .filter(|class| self.display_has_class(class))
            .collect()
    }

    fn raise(&mut self, alert: Alert) {
        debug!(?alert, "raising display alert");
        if let Some(display) = self.dom.get_element_mut(DISPLAY_ID) {
            for class in alert.classes() {
                display.add_class(class);
            }
        }
        match self.alerts.iter_mut().find(|a| a.alert == alert) {
            Some(active) => active.remaining = alert.duration(),
            None => self.alerts.push(ActiveAlert {
                alert,
                remaining: alert.duration(),
            }),
        }
    }

    fn sync_display(&mut self) {
        let rendering = self.session.rendering();
        let Some(display) = self.dom.get_element_mut(DISPLAY_ID) else {
            return;
        };
        display.set_text(&rendering.text);
        for tier in SizeTier::ALL {
            display.remove_class(tier.css_class());
        }
        display.add_class(rendering.tier.css_class());
    }
}

#[async_trait]
impl<E: Evaluator> CalculatorDriver for DomDriver<E> {
    async fn press(&mut self, label: &str) -> DriverResult<()> {
        let action = Action::from_label(label)
            .ok_or_else(|| DriverError::UnknownLabel(label.to_string()))?;
        let id = self
            .keypad
            .find_button_by_action(action)
            .map(|btn| btn.id.clone())
            .ok_or_else(|| DriverError::UnknownLabel(label.to_string()))?;
        self.click(&id).await
    }

    fn display_text(&self) -> String {
        self.dom
            .get_element_text(DISPLAY_ID)
            .unwrap_or_default()
            .to_string()
    }

    fn size_tier(&self) -> SizeTier {
        SizeTier::ALL
            .into_iter()
            .find(|tier| self.display_has_class(tier.css_class()))
            .unwrap_or(SizeTier::Tier1)
    }

    fn expression(&self) -> String {
        self.session.text().to_string()
    }

    fn error_alert(&self) -> bool {
        self.alerts.iter().any(|a| a.alert == Alert::Error)
    }
}
