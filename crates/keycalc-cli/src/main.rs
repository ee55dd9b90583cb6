//! Keycalc CLI: keypad calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! keycalc press 1 2 + 8 =          # 20
//! keycalc press 12+8=              # same, one token
//! keycalc format 12345678901       # 1.2346e10  tier-2 (text-5xl)
//! keycalc --api-url http://calc.local/calculate repl
//! ```

use clap::Parser;
use keycalc::core::{format::parse_finite, format_number, render};
use keycalc::evaluator::HttpEvaluator;
use keycalc::session::Notice;
use keycalc_cli::{
    expand_token, init_tracing, Cli, CliConfig, CliError, CliResult, Commands, FormatArgs,
    PressArgs, Reporter, TerminalDriver,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = cli.config();
    let use_color = config.color.should_color();
    init_tracing(config.verbosity, use_color);
    debug!(?config, "starting");

    let reporter = Reporter::new(use_color, config.verbosity.is_quiet());

    match cli.command {
        Commands::Press(args) => run_press(&config, &reporter, &args).await,
        Commands::Repl => run_repl(&config, &reporter).await,
        Commands::Format(args) => run_format(&reporter, &args),
    }
}

fn driver(config: &CliConfig) -> TerminalDriver<HttpEvaluator> {
    TerminalDriver::new(HttpEvaluator::new(&config.evaluator))
}

fn report_notices(reporter: &Reporter, notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::CalculationFailed(message) => reporter.failure(message),
            Notice::LongExpression => reporter.warning("expression is getting long"),
        }
    }
}

async fn run_press(config: &CliConfig, reporter: &Reporter, args: &PressArgs) -> CliResult<()> {
    // Validate every label before anything is sent to the evaluator
    let mut actions = Vec::new();
    for label in &args.labels {
        actions.extend(expand_token(label)?);
    }

    let mut driver = driver(config);
    for action in actions {
        driver.apply(action).await;
        report_notices(reporter, driver.notices());
    }
    reporter.display(&driver.rendering())?;
    Ok(())
}

async fn run_repl(config: &CliConfig, reporter: &Reporter) -> CliResult<()> {
    let interactive = std::io::stdin().is_terminal();
    let mut driver = driver(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if interactive {
        reporter.display(&driver.rendering())?;
    }

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }
        match driver.press_line(line).await {
            Ok(notices) => report_notices(reporter, &notices),
            Err(e) => reporter.failure(&e.to_string()),
        }
        reporter.display(&driver.rendering())?;
    }
    Ok(())
}

fn run_format(reporter: &Reporter, args: &FormatArgs) -> CliResult<()> {
    let value = parse_finite(&args.number)
        .ok_or_else(|| CliError::invalid_argument(format!("not a number: {}", args.number)))?;
    let rendering = render(&format_number(value));

    if args.json {
        reporter.line(&serde_json::to_string(&rendering)?)?;
    } else {
        reporter.line(&reporter.tier_line(&rendering))?;
    }
    Ok(())
}
