//! Typed identifiers for users, file records, and ledger entries.
//!
//! All three are UUID v7, so ids sort roughly by creation time in the
//! database. They encode as plain `uuid` columns and bare JSON strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Mint a fresh id.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_id!(
    /// Primary key of `users`.
    UserId
);

uuid_id!(
    /// Primary key of `files`. Ledger entries keep it after the record is deleted.
    FileId
);

uuid_id!(
    /// Primary key of `access_logs`.
    AccessLogId
);
