// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for footprint model and interchange operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing or exchanging a roof project
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed DXF content (bad group code, non-numeric coordinate, ...)
    #[error("DXF parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// DXF parsed fine but held no footprint, obstacle or drain
    #[error("DXF import rejected: no usable entities")]
    ImportRejected,

    #[error("Unknown obstacle: {0}")]
    UnknownObstacle(String),

    #[error("Unknown drain: {0}")]
    UnknownDrain(String),

    #[error("Project serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error at a 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Whether this error is an "import failed" outcome.
    ///
    /// Parse failures and rejected imports are reported the same way to the
    /// end user; in both cases the existing project must stay untouched.
    pub fn is_import_failure(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::ImportRejected)
    }
}
