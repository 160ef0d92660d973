//! # Console Adapter
//!
//! Translates text commands into orchestrator calls and records metrics
//! for every outcome. One command per line:
//!
//! ```text
//! request <id> <phone>      otp <id> <code>         status <id>
//! launch <id>               check <id> <token>      cancel <id>
//! transfer <id> send|request
//! input <id> <text>         confirm <id>
//! sweep                     metrics                 help | quit
//! ```

use gate_telemetry::metrics;
use sg_01_rate_limiter::{OTP_REQUEST, OTP_VERIFY};
use sg_04_verification::{
    SessionState, TransferIntent, TransferKind, TransferState, VerificationApi, VerificationError,
};
use shared_types::{Identity, IdentityError, TimeSource};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Request { identity: Identity, phone: String },
    Otp { identity: Identity, code: String },
    Status { identity: Identity },
    Launch { identity: Identity },
    Check { identity: Identity, token: String },
    Transfer { identity: Identity, kind: TransferKind },
    Input { identity: Identity, text: String },
    Confirm { identity: Identity },
    Cancel { identity: Identity },
    Sweep,
    Metrics,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),

    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] IdentityError),

    #[error("transfer kind must be `send` or `request`, got {0:?}")]
    InvalidKind(String),
}

const HELP: &str = "\
commands:
  request <id> <phone>        send a verification code
  otp <id> <code>             submit a verification code
  status <id>                 show verification state
  launch <id>                 mint a mini-app launch URL
  check <id> <token>          verify a launch token or URL
  transfer <id> send|request  start a transfer
  input <id> <text>           answer the current transfer prompt
  confirm <id>                confirm the pending transfer
  cancel <id>                 cancel the current operation
  sweep                       drop expired records now
  metrics                     print Prometheus metrics
  quit";

/// Parse one input line. Returns `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    let Some((verb, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match verb.to_lowercase().as_str() {
        "request" => {
            let (identity, rest) = identity_arg(rest)?;
            Command::Request {
                identity,
                phone: required(rest, "phone")?,
            }
        }
        "otp" => {
            let (identity, rest) = identity_arg(rest)?;
            Command::Otp {
                identity,
                code: required(rest, "code")?,
            }
        }
        "check" => {
            let (identity, rest) = identity_arg(rest)?;
            Command::Check {
                identity,
                token: required(rest, "token")?,
            }
        }
        "transfer" => {
            let (identity, rest) = identity_arg(rest)?;
            let kind = match required(rest, "kind")?.to_lowercase().as_str() {
                "send" => TransferKind::Send,
                "request" => TransferKind::Request,
                other => return Err(CommandError::InvalidKind(other.to_string())),
            };
            Command::Transfer { identity, kind }
        }
        "input" => {
            let (identity, rest) = identity_arg(rest)?;
            Command::Input {
                identity,
                text: required(rest, "text")?,
            }
        }
        "status" => Command::Status {
            identity: identity_arg(rest)?.0,
        },
        "launch" => Command::Launch {
            identity: identity_arg(rest)?.0,
        },
        "confirm" => Command::Confirm {
            identity: identity_arg(rest)?.0,
        },
        "cancel" => Command::Cancel {
            identity: identity_arg(rest)?.0,
        },
        "sweep" => Command::Sweep,
        "metrics" => Command::Metrics,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    Some(match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    })
}

fn identity_arg(input: &str) -> Result<(Identity, &str), CommandError> {
    let (raw, rest) = split_word(input).ok_or(CommandError::MissingArgument("id"))?;
    Ok((Identity::new(raw)?, rest))
}

fn required(input: &str, name: &'static str) -> Result<String, CommandError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    Ok(value.to_string())
}

fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

fn describe_intent(intent: &TransferIntent) -> String {
    match intent.kind {
        TransferKind::Send => format!(
            "send {} to {}",
            format_cents(intent.amount_cents),
            intent.counterparty
        ),
        TransferKind::Request => format!(
            "request {} from {}",
            format_cents(intent.amount_cents),
            intent.counterparty
        ),
    }
}

fn transfer_prompt(identity: &Identity, state: &TransferState) -> String {
    match state {
        TransferState::Idle => "No transfer in progress.".to_string(),
        TransferState::AwaitingCounterparty {
            kind: TransferKind::Send,
        } => "Enter the recipient's phone number (e.g. +1234567890).".to_string(),
        TransferState::AwaitingCounterparty {
            kind: TransferKind::Request,
        } => "Enter the sender's phone number (e.g. +1234567890).".to_string(),
        TransferState::AwaitingAmount { .. } => {
            format!(
                "Enter the amount (max {}).",
                format_cents(sg_04_verification::MAX_TRANSFER_CENTS)
            )
        }
        TransferState::AwaitingConfirmation { intent } => format!(
            "About to {}. Type `confirm {}` to proceed or `cancel {}` to abort.",
            describe_intent(intent),
            identity,
            identity
        ),
    }
}

/// Console front end over any [`VerificationApi`].
pub struct Console<V: VerificationApi, C: TimeSource> {
    service: Arc<V>,
    clock: C,
}

impl<V: VerificationApi, C: TimeSource> Console<V, C> {
    pub fn new(service: Arc<V>, clock: C) -> Self {
        Self { service, clock }
    }

    /// Execute one command and render the reply.
    pub async fn execute(&self, command: Command) -> String {
        match command {
            Command::Request { identity, phone } => {
                match self.service.request_verification(&identity, &phone).await {
                    Ok(phone) => {
                        metrics::record_otp_request("sent");
                        format!("Verification code sent to {}.", phone)
                    }
                    Err(e) => {
                        metrics::record_otp_request(e.as_str());
                        if e == VerificationError::RateLimited {
                            metrics::record_rate_limit_denial(OTP_REQUEST);
                        }
                        format!("Error: {}", e)
                    }
                }
            }
            Command::Otp { identity, code } => match self.service.submit_otp(&identity, &code) {
                Ok(phone) => {
                    metrics::record_otp_verification("verified");
                    format!("Phone {} verified. Use `launch {}` to open the app.", phone, identity)
                }
                Err(e) => {
                    metrics::record_otp_verification(e.as_str());
                    if e == VerificationError::RateLimited {
                        metrics::record_rate_limit_denial(OTP_VERIFY);
                    }
                    format!("Error: {}", e)
                }
            },
            Command::Status { identity } => match self.service.session_state(&identity) {
                SessionState::Unverified => format!("{}: not verified", identity),
                SessionState::AwaitingOtp { phone } => {
                    format!("{}: awaiting code sent to {}", identity, phone)
                }
                SessionState::Verified { phone } => format!("{}: verified ({})", identity, phone),
            },
            Command::Launch { identity } => {
                let url = self.service.mint_launch_url(&identity);
                metrics::record_launch_token("mint", "ok");
                url
            }
            Command::Check { identity, token } => {
                let verdict = self.service.verify_launch_token(&token, &identity);
                match verdict.reason {
                    None => {
                        metrics::record_launch_token("verify", "ok");
                        "Token valid.".to_string()
                    }
                    Some(reason) => {
                        metrics::record_launch_token("verify", reason.as_str());
                        format!("Token rejected: {}", reason)
                    }
                }
            }
            Command::Transfer { identity, kind } => {
                match self.service.begin_transfer(&identity, kind) {
                    Ok(state) => transfer_prompt(&identity, &state),
                    Err(e) => format!("Error: {}", e),
                }
            }
            Command::Input { identity, text } => {
                match self.service.submit_transfer_input(&identity, &text) {
                    Ok(state) => transfer_prompt(&identity, &state),
                    Err(e) => format!("Error: {}", e),
                }
            }
            Command::Confirm { identity } => match self.service.confirm_transfer(&identity) {
                Ok(intent) => format!("Transfer recorded: {}.", describe_intent(&intent)),
                Err(e) => format!("Error: {}", e),
            },
            Command::Cancel { identity } => {
                if self.service.cancel(&identity) {
                    "Operation cancelled.".to_string()
                } else {
                    "Nothing to cancel.".to_string()
                }
            }
            Command::Sweep => {
                let report = self.service.sweep(self.clock.now());
                metrics::record_sweep(report.otps_removed, report.rate_limits_removed);
                format!(
                    "Swept {} expired codes and {} idle rate-limit records.",
                    report.otps_removed, report.rate_limits_removed
                )
            }
            Command::Metrics => match metrics::encode_metrics() {
                Ok(text) => text,
                Err(e) => format!("Error: {}", e),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => "Bye.".to_string(),
        }
    }

    /// Serve commands from `reader` until EOF or `quit`.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let reply = match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => {
                    writer.write_all(b"Bye.\n").await?;
                    break;
                }
                Ok(Some(command)) => {
                    debug!(command = ?command, "Console command");
                    self.execute(command).await
                }
                Err(e) => format!("Error: {}", e),
            };
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        writer.flush().await
    }
}
