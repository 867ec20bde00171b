// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ValidationErrorKind;
use crate::password_policy::PasswordPolicy;
use crate::types::{ALLOWED_ATTACHMENT_TYPES, Attachment, Field, RegistrationDraft};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use time::{Date, Month, OffsetDateTime};

// local@domain.tld, where the domain has at least one dot and no empty labels.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)+$").expect("email pattern is a valid regex")
});

/// Returns whether an address matches the accepted email format.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Parameters of the validation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Minimum username length, in characters.
    pub username_min_length: usize,
    /// Password rules.
    pub password: PasswordPolicy,
    /// Largest accepted attachment, in bytes.
    pub max_attachment_bytes: u64,
    /// Accepted attachment MIME types.
    pub allowed_attachment_types: Vec<String>,
    /// Minimum age in whole calendar years.
    pub minimum_age_years: u8,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            username_min_length: 4,
            password: PasswordPolicy::default(),
            max_attachment_bytes: 2_000_000,
            allowed_attachment_types: ALLOWED_ATTACHMENT_TYPES
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
            minimum_age_years: 18,
        }
    }
}

/// A single failed rule on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The rule that failed.
    pub kind: ValidationErrorKind,
    /// The message shown next to the field.
    pub message: String,
}

/// The outcome of one validation pass.
///
/// Only invalid fields appear. Each field lists its violations in rule order;
/// the first one is the message displayed inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, Vec<Violation>>,
}

impl ValidationResult {
    fn push(&mut self, field: Field, kind: ValidationErrorKind, message: String) {
        self.errors
            .entry(field)
            .or_default()
            .push(Violation { kind, message });
    }

    /// Returns true when no field is invalid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of invalid fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the invalid fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// Returns every violation reported for a field.
    #[must_use]
    pub fn violations(&self, field: Field) -> &[Violation] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the violated rule kinds for a field.
    #[must_use]
    pub fn kinds(&self, field: Field) -> Vec<ValidationErrorKind> {
        self.violations(field).iter().map(|v| v.kind).collect()
    }

    /// Returns whether a field reported a specific rule.
    #[must_use]
    pub fn has(&self, field: Field, kind: ValidationErrorKind) -> bool {
        self.violations(field).iter().any(|v| v.kind == kind)
    }

    /// Returns whether a field reported any violation.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Returns the message displayed for a field, if it is invalid.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&str> {
        self.violations(field).first().map(|v| v.message.as_str())
    }

    /// Keeps only the fields for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.errors.retain(|field, _| keep(*field));
    }

    /// Returns `(field, displayed message)` for every invalid field.
    pub fn messages(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors
            .iter()
            .filter_map(|(field, violations)| {
                violations.first().map(|v| (*field, v.message.as_str()))
            })
    }
}

/// Computes the latest birth date that satisfies the minimum age.
///
/// The year is subtracted on the calendar, keeping month and day. When
/// `today` is 29 February and the target year has no such day, the cutoff
/// rolls over to 1 March.
///
/// Returns `None` only if the target year is outside the supported range.
#[must_use]
pub fn adulthood_cutoff(today: Date, years: u8) -> Option<Date> {
    let year: i32 = today.year() - i32::from(years);
    Date::from_calendar_date(year, today.month(), today.day())
        .or_else(|_| Date::from_calendar_date(year, Month::March, 1))
        .ok()
}

/// Validates a draft with the default policy.
///
/// This function is pure and deterministic for a given `now`.
#[must_use]
pub fn validate_draft(draft: &RegistrationDraft, now: OffsetDateTime) -> ValidationResult {
    Validator::default().validate(draft, now)
}

/// Runs every rule of a [`ValidationPolicy`] against a draft.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    /// Creates a validator for the given policy.
    #[must_use]
    pub const fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validates a draft against the reference time `now`.
    ///
    /// Rules are independent; every invalid field is reported. A field that
    /// is missing is not checked further.
    #[must_use]
    pub fn validate(&self, draft: &RegistrationDraft, now: OffsetDateTime) -> ValidationResult {
        let mut result: ValidationResult = ValidationResult::default();

        for (field, value) in [
            (Field::FullName, &draft.full_name),
            (Field::PhoneNumber, &draft.phone_number),
            (Field::Address, &draft.address),
            (Field::City, &draft.city),
            (Field::Postcode, &draft.postcode),
        ] {
            if is_missing(value) {
                self.report(&mut result, field, ValidationErrorKind::Missing);
            }
        }

        if draft.country.is_none() {
            self.report(&mut result, Field::Country, ValidationErrorKind::Missing);
        }

        self.check_email(&mut result, &draft.email);
        self.check_username(&mut result, &draft.username);
        self.check_password(&mut result, &draft.password, &draft.confirm_password);
        self.check_date_of_birth(&mut result, draft.date_of_birth, now);
        self.check_attachment(&mut result, draft.id_confirmation.as_ref());

        if !draft.terms_accepted {
            self.report(&mut result, Field::TermsAccepted, ValidationErrorKind::Missing);
        }

        if is_missing(&draft.bot_check_token) {
            self.report(&mut result, Field::BotCheckToken, ValidationErrorKind::Missing);
        }

        result
    }

    fn check_email(&self, result: &mut ValidationResult, email: &str) {
        if is_missing(email) {
            self.report(result, Field::Email, ValidationErrorKind::Missing);
        } else if !is_valid_email(email) {
            self.report(result, Field::Email, ValidationErrorKind::FormatInvalid);
        }
    }

    fn check_username(&self, result: &mut ValidationResult, username: &str) {
        if is_missing(username) {
            self.report(result, Field::Username, ValidationErrorKind::Missing);
            return;
        }

        // Rule: minimum length
        if username.chars().count() < self.policy.username_min_length {
            self.report(result, Field::Username, ValidationErrorKind::TooShort);
        }

        // Rule: no whitespace anywhere
        if username.chars().any(char::is_whitespace) {
            self.report(result, Field::Username, ValidationErrorKind::ContainsWhitespace);
        }
    }

    fn check_password(&self, result: &mut ValidationResult, password: &str, confirmation: &str) {
        let password_missing: bool = is_missing(password);
        if password_missing {
            self.report(result, Field::Password, ValidationErrorKind::Missing);
        } else {
            for kind in self.policy.password.violations(password) {
                self.report(result, Field::Password, kind);
            }
        }

        // A missing password is reported once, on the password field only.
        if is_missing(confirmation) {
            self.report(result, Field::ConfirmPassword, ValidationErrorKind::Missing);
        } else if !password_missing
            && let Err(kind) = PasswordPolicy::check_confirmation(password, confirmation)
        {
            self.report(result, Field::ConfirmPassword, kind);
        }
    }

    fn check_date_of_birth(
        &self,
        result: &mut ValidationResult,
        date_of_birth: Option<Date>,
        now: OffsetDateTime,
    ) {
        let Some(date_of_birth) = date_of_birth else {
            self.report(result, Field::DateOfBirth, ValidationErrorKind::Missing);
            return;
        };

        let old_enough: bool = adulthood_cutoff(now.date(), self.policy.minimum_age_years)
            .is_some_and(|cutoff| date_of_birth <= cutoff);
        if !old_enough {
            self.report(result, Field::DateOfBirth, ValidationErrorKind::TooYoung);
        }
    }

    fn check_attachment(&self, result: &mut ValidationResult, attachment: Option<&Attachment>) {
        let Some(attachment) = attachment else {
            self.report(result, Field::IdConfirmation, ValidationErrorKind::Missing);
            return;
        };

        if attachment.declared_size > self.policy.max_attachment_bytes {
            self.report(result, Field::IdConfirmation, ValidationErrorKind::TooLarge);
        }

        let accepted: bool = self
            .policy
            .allowed_attachment_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&attachment.content_type));
        if !accepted {
            self.report(
                result,
                Field::IdConfirmation,
                ValidationErrorKind::UnsupportedType,
            );
        }
    }

    fn report(&self, result: &mut ValidationResult, field: Field, kind: ValidationErrorKind) {
        result.push(field, kind, self.message_for(field, kind));
    }

    fn message_for(&self, field: Field, kind: ValidationErrorKind) -> String {
        match (field, kind) {
            (_, ValidationErrorKind::Missing) => format!("{} is required", field.label()),
            (_, ValidationErrorKind::FormatInvalid) => String::from("Invalid email format"),
            (Field::Password, ValidationErrorKind::TooShort) => {
                format!("At least {} characters", self.policy.password.min_length)
            }
            (_, ValidationErrorKind::TooShort) => {
                format!("At least {} characters", self.policy.username_min_length)
            }
            (_, ValidationErrorKind::ContainsWhitespace) => String::from("No whitespaces allowed"),
            (_, ValidationErrorKind::MissingSpecialChar) => {
                String::from("At least one special character")
            }
            (_, ValidationErrorKind::MissingDigit) => String::from("At least one number"),
            (_, ValidationErrorKind::Mismatch) => String::from("Passwords must match"),
            (_, ValidationErrorKind::TooYoung) => format!(
                "You must be at least {} years old",
                self.policy.minimum_age_years
            ),
            (_, ValidationErrorKind::TooLarge) => String::from("File size is too large"),
            (_, ValidationErrorKind::UnsupportedType) => String::from("Unsupported file format"),
        }
    }
}

// Whitespace-only text is present; only an empty string is missing.
const fn is_missing(value: &str) -> bool {
    value.is_empty()
}
