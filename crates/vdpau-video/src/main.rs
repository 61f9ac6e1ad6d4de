use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use vdpau_video_diag::{
    debug_message, error_message, info_message, parse_indent_width, parse_yesno, trace_print,
    DiagLogger, DEBUG_ENV, DEFAULT_LOG_PATH, TRACE_ENV, TRACE_INDENT_WIDTH_ENV,
};

#[derive(Parser, Debug)]
#[command(
    name = "vdpau-diag",
    about = "Exercise the vdpau-video diagnostics channels",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how the diagnostic gates resolve in the current environment
    Probe,
    /// Push sample messages through every diagnostic channel
    Emit {
        /// Message body to send
        #[arg(short, long, default_value = "diagnostics check")]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Probe => probe(),
        Command::Emit { message } => emit(&message),
    }

    Ok(())
}

/// Report the gate state the driver would see, without touching the log
/// file. Resolution mirrors the library: absent or unparseable values mean
/// disabled, and an unparseable width falls back to 4.
fn probe() {
    println!("log file: {}", DEFAULT_LOG_PATH);
    print_gate(DEBUG_ENV);
    print_gate(TRACE_ENV);

    match std::env::var(TRACE_INDENT_WIDTH_ENV) {
        Ok(value) => match parse_indent_width(&value) {
            Ok(width) => println!("{}: {} spaces", TRACE_INDENT_WIDTH_ENV, width),
            Err(err) => println!("{}: default 4 ({})", TRACE_INDENT_WIDTH_ENV, err),
        },
        Err(_) => println!("{}: default 4 (unset)", TRACE_INDENT_WIDTH_ENV),
    }
}

fn print_gate(name: &str) {
    match std::env::var(name) {
        Ok(value) => match parse_yesno(&value) {
            Ok(true) => println!("{}: {}", name, "enabled".bright_green()),
            Ok(false) => println!("{}: {}", name, "disabled".dimmed()),
            Err(err) => println!("{}: {} ({})", name, "disabled".dimmed(), err),
        },
        Err(_) => println!("{}: {} (unset)", name, "disabled".dimmed()),
    }
}

fn emit(message: &str) {
    let logger = DiagLogger::new();

    error_message!(logger, "{}\n", message);
    info_message!(logger, "{}\n", message);
    debug_message!(logger, "{}\n", message);

    let trace_on = logger.trace_enabled();
    if trace_on {
        trace_print!(logger, "emit begin\n");
        logger.trace_indent(1);
        trace_print!(logger, "message: ");
        trace_print!(logger, "{}\n", message);
        logger.trace_indent(-1);
        trace_print!(logger, "emit end\n");
    }

    let debug_on = std::env::var(DEBUG_ENV)
        .ok()
        .and_then(|value| parse_yesno(&value).ok())
        .unwrap_or(false);

    println!();
    if debug_on {
        println!(
            "{} debug output appended to {}",
            "✓".bright_green(),
            DEFAULT_LOG_PATH
        );
    } else {
        println!(
            "{} debug logging disabled; set {}=1 to capture it",
            "-".dimmed(),
            DEBUG_ENV
        );
    }
    if trace_on {
        println!(
            "{} trace output appended to {}",
            "✓".bright_green(),
            DEFAULT_LOG_PATH
        );
    } else {
        println!(
            "{} tracing disabled; set {}=1 to capture it",
            "-".dimmed(),
            TRACE_ENV
        );
    }
}
