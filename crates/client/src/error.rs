// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use signup_domain::{Field, SUMMARY_NOTICE, ValidationResult};
use thiserror::Error;

/// Notice shown for any failed submission, whatever the cause.
pub const GENERIC_FAILURE_NOTICE: &str = "Submission failed. Please try again.";

/// Errors raised while turning a draft into a request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A value required on the wire is absent.
    #[error("Cannot encode draft: {field} is not set")]
    Incomplete {
        /// The absent field.
        field: Field,
    },
    /// The birth date could not be rendered as an instant.
    #[error("Cannot format date of birth: {0}")]
    DateFormat(String),
    /// The attachment MIME type is not a valid media type.
    #[error("Invalid attachment content type '{0}'")]
    InvalidContentType(String),
    /// The JSON body could not be built.
    #[error("Cannot build JSON body: {0}")]
    Json(String),
}

/// Errors surfaced by a submit action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The draft failed validation; nothing was sent.
    #[error("Please fix the highlighted errors.")]
    Invalid(ValidationResult),
    /// A previous submission has not completed yet.
    #[error("A submission is already in progress")]
    AlreadyInFlight,
    /// The server answered with a non-success status.
    #[error("Submission failed with status {status}")]
    SubmissionFailed {
        /// The HTTP status code.
        status: u16,
    },
    /// The request did not complete.
    #[error("Submission failed: {reason}")]
    Transport {
        /// Description of the transport failure.
        reason: String,
    },
    /// The draft could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl SubmitError {
    /// Returns whether this is a network or server-side failure that the
    /// user can retry by submitting again.
    #[must_use]
    pub const fn is_submission_failure(&self) -> bool {
        matches!(self, Self::SubmissionFailed { .. } | Self::Transport { .. })
    }

    /// Returns the notice shown to the user for this error.
    #[must_use]
    pub const fn notice(&self) -> &'static str {
        match self {
            Self::Invalid(_) => SUMMARY_NOTICE,
            Self::AlreadyInFlight => "Please wait for the current submission to finish.",
            Self::SubmissionFailed { .. } | Self::Transport { .. } | Self::Encode(_) => {
                GENERIC_FAILURE_NOTICE
            }
        }
    }
}
