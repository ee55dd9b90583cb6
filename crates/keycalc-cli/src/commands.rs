//! CLI command definitions using clap

use crate::config::{CliConfig, ColorChoice, Verbosity};
use clap::{Parser, Subcommand, ValueEnum};
use keycalc::evaluator::EvaluatorConfig;

/// Keycalc: keypad calculator in the terminal
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Evaluator endpoint
    #[arg(
        long,
        env = "KEYCALC_API_URL",
        default_value = EvaluatorConfig::DEFAULT_ENDPOINT,
        global = true
    )]
    pub api_url: String,

    /// Evaluator request timeout in seconds
    #[arg(long, default_value_t = EvaluatorConfig::DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Builds the runtime configuration from the parsed flags
    #[must_use]
    pub fn config(&self) -> CliConfig {
        CliConfig::new()
            .with_verbosity(Verbosity::from_flags(self.quiet, self.verbose))
            .with_color(self.color.into())
            .with_evaluator(
                EvaluatorConfig::new()
                    .with_endpoint(self.api_url.clone())
                    .with_timeout_secs(self.timeout_secs),
            )
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keys in order and print the display
    ///
    /// Each argument is a key label (`7`, `+`, `×`, `AC`, `+/-`, `=` ...)
    /// or a run of single-character labels such as `12+8=`.
    Press(PressArgs),

    /// Read key labels from stdin, printing the display after each line
    Repl,

    /// Format a number the way the display would
    Format(FormatArgs),
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Key labels to press
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub labels: Vec<String>,
}

/// Arguments for the format command
#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Number to format
    #[arg(allow_hyphen_values = true)]
    pub number: String,

    /// Print the rendering as JSON
    #[arg(long)]
    pub json: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_press() {
        let cli = Cli::try_parse_from(["keycalc", "press", "5", "-", "+/-", "="]).unwrap();
        let Commands::Press(args) = cli.command else {
            panic!("expected press");
        };
        assert_eq!(args.labels, vec!["5", "-", "+/-", "="]);
    }

    #[test]
    fn test_press_requires_labels() {
        assert!(Cli::try_parse_from(["keycalc", "press"]).is_err());
    }

    #[test]
    fn test_parse_format_negative() {
        let cli = Cli::try_parse_from(["keycalc", "format", "-12.5", "--json"]).unwrap();
        let Commands::Format(args) = cli.command else {
            panic!("expected format");
        };
        assert_eq!(args.number, "-12.5");
        assert!(args.json);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "keycalc",
            "-vv",
            "--color",
            "never",
            "--api-url",
            "http://10.0.0.2/calculate",
            "--timeout-secs",
            "3",
            "repl",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.verbosity, Verbosity::Debug);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.evaluator.endpoint, "http://10.0.0.2/calculate");
        assert_eq!(config.evaluator.timeout_secs, 3);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cli = Cli::try_parse_from(["keycalc", "-q", "-v", "repl"]).unwrap();
        assert_eq!(cli.config().verbosity, Verbosity::Quiet);
    }
}
