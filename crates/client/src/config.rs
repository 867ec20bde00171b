// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use signup_domain::{CountryCatalog, PortraitOverrides, ValidationPolicy};
use std::str::FromStr;

/// Registration endpoint used when none is configured.
///
/// The path reads as a login route; it is the path the deployed backend
/// listens on and is kept configurable.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3002/login";

/// How the draft is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionEncoding {
    /// `multipart/form-data` with one part per field and a binary attachment part.
    #[default]
    Multipart,
    /// A single JSON object; the attachment is described but not uploaded.
    Json,
}

impl SubmissionEncoding {
    /// Returns the flag value for this encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Multipart => "multipart",
            Self::Json => "json",
        }
    }
}

impl FromStr for SubmissionEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multipart" => Ok(Self::Multipart),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid encoding: '{s}'. Must be 'multipart' or 'json'"
            )),
        }
    }
}

impl std::fmt::Display for SubmissionEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// When field errors are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Only on submit; after the first attempt, every edit revalidates.
    #[default]
    OnSubmit,
    /// On every edit, for the fields the user has touched.
    OnChange,
}

/// Configuration for a [`crate::FormController`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the registration endpoint.
    pub endpoint: String,
    /// Wire encoding of the request body.
    pub encoding: SubmissionEncoding,
    /// Whether the bot-check token is sent to the server.
    pub forward_bot_token: bool,
    /// When field errors are computed.
    pub validation_mode: ValidationMode,
    /// Whether the avatar and rule hints are derived.
    pub show_feedback: bool,
    /// Validation rule parameters.
    pub policy: ValidationPolicy,
    /// Countries offered by the selector.
    pub countries: CountryCatalog,
    /// Names that show a portrait instead of initials.
    pub portraits: PortraitOverrides,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            encoding: SubmissionEncoding::default(),
            forward_bot_token: false,
            validation_mode: ValidationMode::default(),
            show_feedback: true,
            policy: ValidationPolicy::default(),
            countries: CountryCatalog::default(),
            portraits: PortraitOverrides::default(),
        }
    }
}
