use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ─── Transaction status ──────────────────────────────────────────────

/// Lifecycle status of an escrow transaction, as recorded in the
/// append-only status log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxStatus {
    Pending,
    Completed,
    Failed,
}

impl TxStatus {
    /// Canonical string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "PENDING",
            TxStatus::Completed => "COMPLETED",
            TxStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TxStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TxStatus::Pending),
            "COMPLETED" => Ok(TxStatus::Completed),
            "FAILED" => Ok(TxStatus::Failed),
            _ => Err(AppError::InvalidInput(format!("Unknown transaction status: {}", s))),
        }
    }
}

// ─── Withdraw intent status ──────────────────────────────────────────

/// Status of a deposit withdraw intent. Unlike transaction statuses this is
/// a mutable field: pending moves to completed or failed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentStatus {
    Pending,
    Completed,
    Failed,
}

impl IntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentStatus::Pending => "pending",
            IntentStatus::Completed => "completed",
            IntentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IntentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(IntentStatus::Pending),
            "completed" => Ok(IntentStatus::Completed),
            "failed" => Ok(IntentStatus::Failed),
            _ => Err(AppError::InvalidInput(format!("Unknown intent status: {}", s))),
        }
    }
}

// ─── Address namespace ───────────────────────────────────────────────

/// Derivation-path branch separating the escrow and deposit address spaces.
/// Two entities with the same uuid in different namespaces never share an
/// address because the branch differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressNamespace {
    Escrow,
    Deposit,
}

impl AddressNamespace {
    /// Non-hardened branch segment of the derivation path.
    pub fn branch(&self) -> u32 {
        match self {
            AddressNamespace::Escrow => 0,
            AddressNamespace::Deposit => 1,
        }
    }
}

impl fmt::Display for AddressNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressNamespace::Escrow => write!(f, "escrow"),
            AddressNamespace::Deposit => write!(f, "deposit"),
        }
    }
}
