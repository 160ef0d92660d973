//! # Transfer Flow
//!
//! Collects a counterparty and an amount, then a confirmation. Nothing is
//! moved; confirming yields a [`TransferIntent`] for the caller to act on.

use shared_types::{PhoneError, PhoneNumber};
use thiserror::Error;

/// Largest transfer amount, in cents ($1000.00).
pub const MAX_TRANSFER_CENTS: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferKind {
    /// Send money to a recipient.
    Send,
    /// Request money from a sender.
    Request,
}

impl TransferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Request => "request",
        }
    }
}

/// A confirmed transfer, ready to hand to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
    pub kind: TransferKind,
    pub counterparty: PhoneNumber,
    pub amount_cents: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransferState {
    #[default]
    Idle,
    /// Waiting for the recipient (send) or sender (request) phone.
    AwaitingCounterparty { kind: TransferKind },
    AwaitingAmount {
        kind: TransferKind,
        counterparty: PhoneNumber,
    },
    AwaitingConfirmation { intent: TransferIntent },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("no transfer in progress")]
    NotInProgress,

    #[error("invalid counterparty phone: {0}")]
    InvalidCounterparty(#[from] PhoneError),

    #[error("amount must be a number with at most two decimal places")]
    InvalidAmount,

    #[error("amount must be greater than 0 and at most 1000.00")]
    AmountOutOfRange,

    #[error("transfer is awaiting confirmation")]
    AwaitingConfirmation,

    #[error("transfer is not ready to confirm")]
    NotReadyToConfirm,
}

impl TransferState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Next state for `input`. On error the caller keeps the current state.
    pub fn advance(&self, input: &str) -> Result<TransferState, TransferError> {
        match self {
            Self::Idle => Err(TransferError::NotInProgress),
            Self::AwaitingCounterparty { kind } => Ok(Self::AwaitingAmount {
                kind: *kind,
                counterparty: PhoneNumber::parse(input)?,
            }),
            Self::AwaitingAmount { kind, counterparty } => Ok(Self::AwaitingConfirmation {
                intent: TransferIntent {
                    kind: *kind,
                    counterparty: counterparty.clone(),
                    amount_cents: parse_amount_cents(input)?,
                },
            }),
            Self::AwaitingConfirmation { .. } => Err(TransferError::AwaitingConfirmation),
        }
    }

    pub fn confirm(&self) -> Result<TransferIntent, TransferError> {
        match self {
            Self::AwaitingConfirmation { intent } => Ok(intent.clone()),
            Self::Idle => Err(TransferError::NotInProgress),
            _ => Err(TransferError::NotReadyToConfirm),
        }
    }
}

/// Parse an amount like `25`, `25.5` or `$25.50` into cents.
///
/// Must be greater than zero and at most [`MAX_TRANSFER_CENTS`].
pub fn parse_amount_cents(raw: &str) -> Result<u64, TransferError> {
    let trimmed = raw.trim();
    let amount = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty()
        || !all_digits(whole)
        || !all_digits(fraction)
        || fraction.len() > 2
        || (amount.contains('.') && fraction.is_empty())
    {
        return Err(TransferError::InvalidAmount);
    }

    // Anything longer than this is far above the ceiling anyway
    if whole.len() > 9 {
        return Err(TransferError::AmountOutOfRange);
    }
    let whole: u64 = whole.parse().map_err(|_| TransferError::InvalidAmount)?;
    let cents: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().map_err(|_| TransferError::InvalidAmount)? * 10,
        _ => fraction.parse().map_err(|_| TransferError::InvalidAmount)?,
    };

    let total = whole * 100 + cents;
    if total == 0 || total > MAX_TRANSFER_CENTS {
        return Err(TransferError::AmountOutOfRange);
    }
    Ok(total)
}
