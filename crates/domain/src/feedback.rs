// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cosmetic state derived from the draft: avatar text and rule hints.
//!
//! Nothing here affects whether a draft is accepted. Every value is a
//! projection recomputed from the current field contents.

use crate::password_policy::PasswordPolicy;
use crate::validation::{ValidationResult, is_valid_email};
use std::collections::BTreeMap;

/// Avatar text shown before a name is entered.
pub const PLACEHOLDER_AVATAR: &str = "SU";

/// Banner shown above the form while any field is invalid.
pub const SUMMARY_NOTICE: &str = "Please fix the highlighted errors.";

/// Returns the first character of each space-separated word of a name.
///
/// Case is kept as typed, so `"jane Doe"` gives `"jD"`.
#[must_use]
pub fn initials(full_name: &str) -> String {
    full_name
        .split(' ')
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Returns the summary banner text when the result has errors.
#[must_use]
pub fn summary_notice(result: &ValidationResult) -> Option<&'static str> {
    if result.is_valid() {
        None
    } else {
        Some(SUMMARY_NOTICE)
    }
}

/// What the avatar circle displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarDisplay {
    /// No name entered yet.
    Placeholder,
    /// Initials derived from the name.
    Initials(String),
    /// A configured portrait image path.
    Portrait(String),
}

impl AvatarDisplay {
    /// Returns the text rendered in the avatar, if it is not an image.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Placeholder => Some(PLACEHOLDER_AVATAR),
            Self::Initials(initials) => Some(initials),
            Self::Portrait(_) => None,
        }
    }
}

/// Names that display a portrait image instead of initials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortraitOverrides {
    by_name: BTreeMap<String, String>,
}

impl PortraitOverrides {
    /// Creates an empty set of overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a portrait for an exact full name.
    #[must_use]
    pub fn with(mut self, full_name: impl Into<String>, image_path: impl Into<String>) -> Self {
        self.by_name.insert(full_name.into(), image_path.into());
        self
    }

    /// Resolves the avatar for the current name.
    #[must_use]
    pub fn resolve(&self, full_name: &str) -> AvatarDisplay {
        if let Some(path) = self.by_name.get(full_name) {
            return AvatarDisplay::Portrait(path.clone());
        }

        let initials: String = initials(full_name);
        if initials.is_empty() {
            AvatarDisplay::Placeholder
        } else {
            AvatarDisplay::Initials(initials)
        }
    }
}

/// Display state of one rule hint under an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintState {
    /// The rule holds.
    Satisfied,
    /// The rule fails but the field has no reported error yet.
    Pending,
    /// The rule fails and the field currently shows an error.
    Violated,
}

impl HintState {
    const fn derive(passes: bool, field_has_error: bool) -> Self {
        if passes {
            Self::Satisfied
        } else if field_has_error {
            Self::Violated
        } else {
            Self::Pending
        }
    }
}

/// Hints listed under the password input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHints {
    pub min_length: HintState,
    pub special_char: HintState,
    pub digit: HintState,
}

impl PasswordHints {
    /// Derives the hints for the current password.
    #[must_use]
    pub fn derive(policy: &PasswordPolicy, password: &str, field_has_error: bool) -> Self {
        Self {
            min_length: HintState::derive(policy.meets_length(password), field_has_error),
            special_char: HintState::derive(policy.has_special_char(password), field_has_error),
            digit: HintState::derive(PasswordPolicy::has_digit(password), field_has_error),
        }
    }
}

/// Hints listed under the username input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsernameHints {
    pub min_length: HintState,
    pub no_whitespace: HintState,
}

impl UsernameHints {
    /// Derives the hints for the current username.
    #[must_use]
    pub fn derive(min_length: usize, username: &str, field_has_error: bool) -> Self {
        Self {
            min_length: HintState::derive(username.chars().count() >= min_length, field_has_error),
            no_whitespace: HintState::derive(
                !username.chars().any(char::is_whitespace),
                field_has_error,
            ),
        }
    }
}

/// Hint listed under the email input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailHint {
    pub format: HintState,
}

impl EmailHint {
    /// Derives the hint for the current email address.
    #[must_use]
    pub fn derive(email: &str, field_has_error: bool) -> Self {
        Self {
            format: HintState::derive(is_valid_email(email), field_has_error),
        }
    }
}
