// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pdr_domain::DomainError;

/// Errors that can occur while applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The actor's permissions do not cover the operation.
    PermissionDenied {
        /// The operation that was attempted.
        operation: String,
        /// Why the operation is not permitted.
        reason: String,
    },
    /// The PDR content does not meet the transition's requirements.
    RequirementsNotMet(Vec<String>),
    /// A goal or behavior index does not exist.
    IndexOutOfRange {
        /// The collection that was indexed.
        field: &'static str,
        /// The requested index.
        index: usize,
        /// The collection length.
        len: usize,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::PermissionDenied { operation, reason } => {
                write!(f, "Permission denied for '{operation}': {reason}")
            }
            Self::RequirementsNotMet(errors) => {
                write!(f, "Requirements not met: {}", errors.join("; "))
            }
            Self::IndexOutOfRange { field, index, len } => {
                write!(f, "No {field} at index {index} (have {len})")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
