//! Unified calculator driver
//!
//! Front ends (the mock DOM, the terminal) implement [`CalculatorDriver`] so
//! that the same key sequences can be replayed against any of them.
//!
//! ```rust,ignore
//! async fn twelve_plus_eight<D: CalculatorDriver + Send>(driver: &mut D) {
//!     press_all(driver, &["1", "2", "+", "8", "="]).await.unwrap();
//!     assert_eq!(driver.display_text(), "20");
//! }
//! ```

use crate::core::SizeTier;
use async_trait::async_trait;

/// Errors raised by drivers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    /// Label does not match any keypad button
    #[error("Unknown key label: {0}")]
    UnknownLabel(String),
    /// No element with this ID exists
    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Abstract front end for calculator interactions
#[async_trait]
pub trait CalculatorDriver {
    /// Presses the button with the given label, awaiting evaluation on `=`
    async fn press(&mut self, label: &str) -> DriverResult<()>;

    /// Text currently on the display
    fn display_text(&self) -> String;

    /// Size tier currently applied to the display
    fn size_tier(&self) -> SizeTier;

    /// Raw expression text behind the display
    fn expression(&self) -> String;

    /// True while an error alert is showing
    fn error_alert(&self) -> bool;
}

/// Presses each label in order, stopping at the first unknown one
pub async fn press_all<D: CalculatorDriver + Send + ?Sized>(
    driver: &mut D,
    labels: &[&str],
) -> DriverResult<()> {
    for label in labels {
        driver.press(label).await?;
    }
    Ok(())
}
