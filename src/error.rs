// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the ledger core. Command handlers run on `anyhow`
/// and pick these up through the std error impl; `NotFound` is the only
/// variant callers branch on (missing goal/transaction ids).
#[derive(Debug, Error)]
pub enum Error {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("bank API is not configured: {0}")]
    NotConfigured(String),

    #[error("bank API request failed: {0}")]
    ExternalService(String),

    #[error("aggregation failed: {0}")]
    Aggregation(String),
}

impl Error {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Error::NotFound { entity, id }
    }
}
