// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Outcome taxonomy for every book-keeping operation. Validation and
/// conflict failures abort before any write; not-found failures have no
/// side effects.
#[derive(Debug, Error)]
pub enum CaisseError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, CaisseError>;

impl CaisseError {
    /// UNIQUE-constraint violations are conflicts (duplicate party name,
    /// duplicate consumption period), not internal failures.
    pub fn from_sqlite(e: rusqlite::Error, conflict_msg: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(code, _) = &e {
            if code.code == rusqlite::ErrorCode::ConstraintViolation {
                return CaisseError::Conflict(conflict_msg.to_string());
            }
        }
        CaisseError::Db(e)
    }
}
