//! Terminal output

use console::{style, Term};
use keycalc::core::{Rendering, ERROR_TEXT};
use std::io;

/// Writes display lines to stdout and diagnostics to stderr
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Styled display line for `rendering`
    #[must_use]
    pub fn display_line(&self, rendering: &Rendering) -> String {
        if !self.use_color {
            return rendering.text.clone();
        }
        let styled = style(&rendering.text).bold().force_styling(true);
        if rendering.text == ERROR_TEXT {
            styled.red().to_string()
        } else {
            styled.to_string()
        }
    }

    /// Formatted number followed by its size tier
    #[must_use]
    pub fn tier_line(&self, rendering: &Rendering) -> String {
        let tier = format!("{} ({})", rendering.tier, rendering.tier.css_class());
        if self.use_color {
            format!(
                "{}  {}",
                style(&rendering.text).bold().force_styling(true),
                style(tier).dim().force_styling(true)
            )
        } else {
            format!("{}  {tier}", rendering.text)
        }
    }

    /// Prints what the display shows. Printed even in quiet mode.
    pub fn display(&self, rendering: &Rendering) -> io::Result<()> {
        self.out.write_line(&self.display_line(rendering))
    }

    /// Prints a raw line to stdout
    pub fn line(&self, text: &str) -> io::Result<()> {
        self.out.write_line(text)
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().force_styling(true).to_string()
        } else {
            "ERROR".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().force_styling(true).to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }
}
