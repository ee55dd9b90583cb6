//! Browser-style front end
//!
//! The page is a display element plus a grid of `.btn` buttons. Clicking a
//! button or pressing a mapped key feeds the session, and the display's
//! text and size class follow every change. [`MockDom`] stands in for the
//! document so the whole front end runs in plain `cargo test`.

mod dom;
mod driver;
mod keypad;

pub use dom::{DomElement, DomEvent, MockDom, BUTTON_CLASS, DISPLAY_ID};
pub use driver::{Alert, DomDriver};
pub use keypad::{KeypadButtonDef, WebKeypad};
