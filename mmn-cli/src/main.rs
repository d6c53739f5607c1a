//! MMN CLI entry point: run core checks and conversions from the shell.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use is_terminal::IsTerminal;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mmn_core::{
    format_amount, parse_amount, truncate_address, validate_address, validate_amount,
    validate_nonce, validate_transfer, AgentError, MmnError, OutputMode, TransferRequest,
    DEFAULT_DECIMALS,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Auto,
    Json,
    Human,
}

#[derive(Debug, Parser)]
#[command(name = "mmn-cli", version)]
#[command(about = "MMN pre-flight checks: validate addresses, amounts, and nonces; convert amounts")]
struct Cli {
    /// Output format: auto (tty=human, pipe=agent), json (agent), human (operator).
    #[arg(long, value_enum, default_value = "auto", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a smallest-unit integer as a decimal string.
    Format {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u8,
    },
    /// Convert a decimal string into smallest units.
    Parse {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u8,
    },
    /// Check that an address is base-58 text for a 32-byte public key.
    ValidateAddress { address: String },
    /// Check that an amount is spendable from a balance.
    ValidateAmount {
        #[arg(allow_hyphen_values = true)]
        balance: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Check that a nonce is non-negative.
    ValidateNonce {
        #[arg(allow_hyphen_values = true)]
        nonce: i64,
    },
    /// Run every pre-flight check for a transfer.
    CheckTransfer {
        /// Recipient address (base-58).
        #[arg(long)]
        to: String,
        /// Available balance in smallest units.
        #[arg(long, allow_hyphen_values = true)]
        balance: String,
        /// Transfer amount in smallest units.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long, allow_hyphen_values = true)]
        nonce: i64,
    },
}

impl Command {
    /// Stable name used in agent payloads and human tables.
    fn check_name(&self) -> &'static str {
        match self {
            Command::Format { .. } => "format",
            Command::Parse { .. } => "parse",
            Command::ValidateAddress { .. } => "address",
            Command::ValidateAmount { .. } => "amount",
            Command::ValidateNonce { .. } => "nonce",
            Command::CheckTransfer { .. } => "transfer",
        }
    }
}

/// Agent-mode success payload.
#[derive(Debug, Serialize)]
struct AgentSuccess {
    check: &'static str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

/// Detect output mode based on CLI flags and TTY detection.
fn detect_output_mode(output: OutputFormat) -> OutputMode {
    match output {
        OutputFormat::Human => OutputMode::Human,
        OutputFormat::Json => OutputMode::Agent,
        OutputFormat::Auto => {
            if io::stdout().is_terminal() {
                OutputMode::Human
            } else {
                OutputMode::Agent
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run the selected command. `Ok(Some(value))` for conversions, `Ok(None)`
/// for checks that passed.
fn execute(command: &Command) -> Result<Option<String>, MmnError> {
    match command {
        Command::Format { amount, decimals } => {
            format_amount(amount.as_str(), *decimals).map(Some)
        }
        Command::Parse { amount, decimals } => parse_amount(amount, *decimals).map(Some),
        Command::ValidateAddress { address } => validate_address(address).map(|_| None),
        Command::ValidateAmount { balance, amount } => {
            validate_amount(balance, amount).map(|_| None)
        }
        Command::ValidateNonce { nonce } => validate_nonce(*nonce).map(|_| None),
        Command::CheckTransfer {
            to,
            balance,
            amount,
            nonce,
        } => {
            let request = TransferRequest {
                recipient: to.clone(),
                balance: balance.clone(),
                amount: amount.clone(),
                nonce: *nonce,
            };
            validate_transfer(&request).map(|_| None)
        }
    }
}

fn subject(command: &Command) -> String {
    match command {
        Command::Format { amount, decimals } | Command::Parse { amount, decimals } => {
            format!("{amount} ({decimals} decimals)")
        }
        Command::ValidateAddress { address } => truncate_address(address),
        Command::ValidateAmount { balance, amount } => format!("{amount} of {balance}"),
        Command::ValidateNonce { nonce } => nonce.to_string(),
        Command::CheckTransfer { to, amount, .. } => {
            format!("{amount} to {}", truncate_address(to))
        }
    }
}

fn render_result_table(
    check: &str,
    subject: &str,
    outcome: &Result<Option<String>, MmnError>,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Check").add_attribute(Attribute::Bold),
        Cell::new("Input").add_attribute(Attribute::Bold),
        Cell::new("Result").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
    ]);

    let (result, status) = match outcome {
        Ok(value) => (
            value.clone().unwrap_or_default(),
            format!("{} {}", "✓".green(), "Valid".green()),
        ),
        Err(err) => (
            err.message().to_string(),
            format!("{} {}", "✗".red(), "Invalid".red()),
        ),
    };
    table.add_row(vec![
        Cell::new(check),
        Cell::new(subject),
        Cell::new(result),
        Cell::new(status),
    ]);

    table
}

fn emit_agent_error(err: AgentError) -> Result<()> {
    let json = serde_json::to_string(&err).context("failed to serialize agent error")?;
    eprintln!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    let mode = detect_output_mode(cli.output);
    let check = cli.command.check_name();

    let outcome = execute(&cli.command);
    tracing::debug!(check, ok = outcome.is_ok(), "check finished");

    match mode {
        OutputMode::Human => {
            let table = render_result_table(check, &subject(&cli.command), &outcome);
            println!("{table}");
            if let Err(err) = &outcome {
                println!();
                println!("{} {}", "✗".red(), err.to_string().red());
            }
        }
        OutputMode::Agent => match &outcome {
            Ok(value) => {
                let payload = AgentSuccess {
                    check,
                    valid: true,
                    value: value.clone(),
                };
                let json =
                    serde_json::to_string(&payload).context("failed to serialize result")?;
                print!("{json}");
            }
            Err(err) => emit_agent_error(AgentError::from_error(check, err))?,
        },
    }

    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
