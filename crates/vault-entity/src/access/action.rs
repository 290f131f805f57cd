//! Ledger action enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An action recorded in the access ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "access_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessAction {
    /// File bytes were written.
    Upload,
    /// File bytes were read by the owner.
    Download,
    /// File bytes and record were removed by the owner.
    Delete,
}

impl AccessAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessAction {
    type Err = vault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upload" => Ok(Self::Upload),
            "download" => Ok(Self::Download),
            "delete" => Ok(Self::Delete),
            _ => Err(vault_core::AppError::validation(format!(
                "Invalid access action: '{s}'. Expected one of: upload, download, delete"
            ))),
        }
    }
}
