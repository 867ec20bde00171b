// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces the credential rules of the sign-up form and exposes
//! the per-rule checks used for live hints.

use crate::error::ValidationErrorKind;

/// Characters that satisfy the special character rule.
pub const DEFAULT_SPECIAL_CHARS: &str = "@$!%*?&#";

/// Password policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum password length, in characters.
    pub min_length: usize,
    /// At least one of these characters must appear.
    pub special_chars: String,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            special_chars: String::from(DEFAULT_SPECIAL_CHARS),
        }
    }
}

impl PasswordPolicy {
    /// Checks a non-empty password against every rule.
    ///
    /// Returns all violated rules in rule order: length, special character,
    /// digit. An empty vector means the password is acceptable.
    #[must_use]
    pub fn violations(&self, password: &str) -> Vec<ValidationErrorKind> {
        let mut violations: Vec<ValidationErrorKind> = Vec::new();

        if !self.meets_length(password) {
            violations.push(ValidationErrorKind::TooShort);
        }

        if !self.has_special_char(password) {
            violations.push(ValidationErrorKind::MissingSpecialChar);
        }

        if !Self::has_digit(password) {
            violations.push(ValidationErrorKind::MissingDigit);
        }

        violations
    }

    /// Checks that the confirmation matches the password exactly.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrorKind::Mismatch` if the two values differ.
    pub fn check_confirmation(
        password: &str,
        confirmation: &str,
    ) -> Result<(), ValidationErrorKind> {
        if password == confirmation {
            Ok(())
        } else {
            Err(ValidationErrorKind::Mismatch)
        }
    }

    /// Returns whether the password reaches the minimum length.
    #[must_use]
    pub fn meets_length(&self, password: &str) -> bool {
        password.chars().count() >= self.min_length
    }

    /// Returns whether the password contains a character from the special set.
    #[must_use]
    pub fn has_special_char(&self, password: &str) -> bool {
        password.chars().any(|c| self.special_chars.contains(c))
    }

    /// Returns whether the password contains an ASCII digit.
    #[must_use]
    pub fn has_digit(password: &str) -> bool {
        password.chars().any(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert!(policy.violations("Ab1!defgh").is_empty());

        // Exactly 8 characters
        assert!(policy.violations("abcdef1#").is_empty());
    }

    #[test]
    fn test_password_too_short() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert_eq!(
            policy.violations("Ab1!"),
            vec![ValidationErrorKind::TooShort]
        );
    }

    #[test]
    fn test_missing_special_char() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert_eq!(
            policy.violations("abcdefgh1"),
            vec![ValidationErrorKind::MissingSpecialChar]
        );
        assert_eq!(
            policy.violations("abcd12345"),
            vec![ValidationErrorKind::MissingSpecialChar]
        );
    }

    #[test]
    fn test_missing_digit() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert_eq!(
            policy.violations("abc!defgh"),
            vec![ValidationErrorKind::MissingDigit]
        );
    }

    #[test]
    fn test_all_rules_reported_together() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert_eq!(
            policy.violations("abc"),
            vec![
                ValidationErrorKind::TooShort,
                ValidationErrorKind::MissingSpecialChar,
                ValidationErrorKind::MissingDigit,
            ]
        );
    }

    #[test]
    fn test_symbols_outside_the_set_do_not_count() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert_eq!(
            policy.violations("abcdefg1^"),
            vec![ValidationErrorKind::MissingSpecialChar]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        // Seven characters, more than eight bytes
        assert!(!policy.meets_length("äöü1!éè"));
    }

    #[test]
    fn test_custom_special_set() {
        let policy: PasswordPolicy = PasswordPolicy {
            min_length: 4,
            special_chars: String::from("^"),
        };

        assert!(policy.violations("ab1^").is_empty());
        assert_eq!(
            policy.violations("ab1!"),
            vec![ValidationErrorKind::MissingSpecialChar]
        );
    }

    #[test]
    fn test_confirmation_mismatch() {
        assert_eq!(
            PasswordPolicy::check_confirmation("Ab1!defgh", "Ab1!defgi"),
            Err(ValidationErrorKind::Mismatch)
        );
        assert!(PasswordPolicy::check_confirmation("Ab1!defgh", "Ab1!defgh").is_ok());
    }
}
