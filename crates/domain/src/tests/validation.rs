// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_valid_draft, reference_now};
use crate::{
    Attachment, Field, RegistrationDraft, ValidationErrorKind, ValidationPolicy,
    ValidationResult, Validator, adulthood_cutoff, validate_draft,
};
use time::macros::{date, datetime};

/// Returns a valid draft with exactly one field cleared.
fn draft_missing(field: Field) -> RegistrationDraft {
    let mut draft: RegistrationDraft = create_valid_draft();
    match field {
        Field::FullName => draft.full_name.clear(),
        Field::PhoneNumber => draft.phone_number.clear(),
        Field::Address => draft.address.clear(),
        Field::City => draft.city.clear(),
        Field::Postcode => draft.postcode.clear(),
        Field::Country => draft.country = None,
        Field::Email => draft.email.clear(),
        Field::Username => draft.username.clear(),
        Field::Password => draft.password.clear(),
        Field::ConfirmPassword => draft.confirm_password.clear(),
        Field::DateOfBirth => draft.date_of_birth = None,
        Field::IdConfirmation => draft.id_confirmation = None,
        Field::TermsAccepted => draft.terms_accepted = false,
        Field::BotCheckToken => draft.bot_check_token.clear(),
    }
    draft
}

fn password_kinds(password: &str) -> Vec<ValidationErrorKind> {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.password = password.to_string();
    draft.confirm_password = password.to_string();
    validate_draft(&draft, reference_now()).kinds(Field::Password)
}

#[test]
fn test_valid_draft_has_no_errors() {
    let result: ValidationResult = validate_draft(&create_valid_draft(), reference_now());
    assert!(result.is_valid());
    assert_eq!(result.len(), 0);
}

#[test]
fn test_empty_draft_reports_every_field_missing() {
    let result: ValidationResult = validate_draft(&RegistrationDraft::new(), reference_now());

    assert_eq!(result.len(), Field::ALL.len());
    for field in Field::ALL {
        assert_eq!(result.kinds(field), vec![ValidationErrorKind::Missing]);
    }
}

#[test]
fn test_single_missing_field_is_reported_alone() {
    for field in Field::ALL {
        let result: ValidationResult = validate_draft(&draft_missing(field), reference_now());

        let fields: Vec<Field> = result.fields().collect();
        assert_eq!(fields, vec![field], "unexpected errors for {field}");
        assert_eq!(result.kinds(field), vec![ValidationErrorKind::Missing]);
    }
}

#[test]
fn test_whitespace_only_text_is_not_missing() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.full_name = String::from(" ");
    draft.city = String::from("   ");
    draft.username = String::from("    ");

    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert!(!result.contains(Field::FullName));
    assert!(!result.contains(Field::City));
    assert_eq!(
        result.kinds(Field::Username),
        vec![ValidationErrorKind::ContainsWhitespace]
    );
    assert_eq!(result.len(), 1);
}

#[test]
fn test_whitespace_only_values_run_remaining_rules() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.email = String::from("   ");
    draft.confirm_password = String::from(" ");

    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(
        result.kinds(Field::Email),
        vec![ValidationErrorKind::FormatInvalid]
    );
    assert_eq!(
        result.kinds(Field::ConfirmPassword),
        vec![ValidationErrorKind::Mismatch]
    );
}

#[test]
fn test_missing_messages() {
    let result: ValidationResult = validate_draft(&RegistrationDraft::new(), reference_now());

    assert_eq!(result.message(Field::FullName), Some("Full Name is required"));
    assert_eq!(
        result.message(Field::ConfirmPassword),
        Some("Confirm Password is required")
    );
    assert_eq!(
        result.message(Field::IdConfirmation),
        Some("ID Confirmation is required")
    );
    assert_eq!(
        result.message(Field::TermsAccepted),
        Some("Accept Terms & Conditions is required")
    );
    assert_eq!(
        result.message(Field::BotCheckToken),
        Some("Bot verification is required")
    );
}

#[test]
fn test_email_format() {
    let mut draft: RegistrationDraft = create_valid_draft();

    for invalid in ["jane", "jane@", "jane@example", "@example.com", "ja ne@example.com", "jane@example."] {
        draft.email = invalid.to_string();
        let result: ValidationResult = validate_draft(&draft, reference_now());
        assert_eq!(
            result.kinds(Field::Email),
            vec![ValidationErrorKind::FormatInvalid],
            "expected {invalid} to be rejected"
        );
        assert_eq!(result.message(Field::Email), Some("Invalid email format"));
    }

    for valid in ["jane@example.com", "first.last@mail.example.co.uk", "j+tag@x.io"] {
        draft.email = valid.to_string();
        let result: ValidationResult = validate_draft(&draft, reference_now());
        assert!(!result.contains(Field::Email), "expected {valid} to be accepted");
    }
}

#[test]
fn test_username_too_short() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.username = String::from("abc");

    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(result.kinds(Field::Username), vec![ValidationErrorKind::TooShort]);
    assert_eq!(result.message(Field::Username), Some("At least 4 characters"));
}

#[test]
fn test_username_with_whitespace() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.username = String::from("jane doe");

    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(
        result.kinds(Field::Username),
        vec![ValidationErrorKind::ContainsWhitespace]
    );
    assert_eq!(result.message(Field::Username), Some("No whitespaces allowed"));
}

#[test]
fn test_username_reports_both_rules() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.username = String::from("a b");

    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(
        result.kinds(Field::Username),
        vec![
            ValidationErrorKind::TooShort,
            ValidationErrorKind::ContainsWhitespace
        ]
    );
}

#[test]
fn test_username_at_minimum_length_is_valid() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.username = String::from("jane");

    assert!(validate_draft(&draft, reference_now()).is_valid());
}

#[test]
fn test_password_rules() {
    assert_eq!(
        password_kinds("abcdefgh1"),
        vec![ValidationErrorKind::MissingSpecialChar]
    );
    assert_eq!(
        password_kinds("abcd12345"),
        vec![ValidationErrorKind::MissingSpecialChar]
    );
    assert_eq!(
        password_kinds("abc!defgh"),
        vec![ValidationErrorKind::MissingDigit]
    );
    assert_eq!(password_kinds("Ab1!"), vec![ValidationErrorKind::TooShort]);
    assert!(password_kinds("Ab1!defgh").is_empty());
}

#[test]
fn test_password_messages() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.password = String::from("abc");
    draft.confirm_password = String::from("abc");

    let result: ValidationResult = validate_draft(&draft, reference_now());
    let messages: Vec<&str> = result
        .violations(Field::Password)
        .iter()
        .map(|v| v.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "At least 8 characters",
            "At least one special character",
            "At least one number"
        ]
    );
    assert_eq!(result.message(Field::Password), Some("At least 8 characters"));
}

#[test]
fn test_confirm_password_matches() {
    let draft: RegistrationDraft = create_valid_draft();
    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert!(!result.has(Field::ConfirmPassword, ValidationErrorKind::Mismatch));
}

#[test]
fn test_confirm_password_mismatch() {
    let mut draft: RegistrationDraft = create_valid_draft();

    for different in ["Ab1!defgH", "Ab1!defgh ", "x"] {
        draft.confirm_password = different.to_string();
        let result: ValidationResult = validate_draft(&draft, reference_now());
        assert_eq!(
            result.kinds(Field::ConfirmPassword),
            vec![ValidationErrorKind::Mismatch]
        );
        assert_eq!(
            result.message(Field::ConfirmPassword),
            Some("Passwords must match")
        );
    }
}

#[test]
fn test_date_of_birth_exactly_eighteen_years_is_valid() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.date_of_birth = Some(date!(2008 - 10 - 18));

    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert!(result.is_valid());
}

#[test]
fn test_date_of_birth_one_day_short_is_too_young() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.date_of_birth = Some(date!(2008 - 10 - 19));

    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(
        result.kinds(Field::DateOfBirth),
        vec![ValidationErrorKind::TooYoung]
    );
    assert_eq!(
        result.message(Field::DateOfBirth),
        Some("You must be at least 18 years old")
    );
}

#[test]
fn test_date_of_birth_uses_date_in_reference_offset() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.date_of_birth = Some(date!(2008 - 10 - 19));

    // Already 19 October in UTC+02:00
    let now = datetime!(2026-10-18 23:30 UTC).to_offset(time::macros::offset!(+2));
    assert!(validate_draft(&draft, now).is_valid());
}

#[test]
fn test_adulthood_cutoff_uses_calendar_years() {
    assert_eq!(
        adulthood_cutoff(date!(2026 - 10 - 18), 18),
        Some(date!(2008 - 10 - 18))
    );
    assert_eq!(
        adulthood_cutoff(date!(2026 - 03 - 01), 18),
        Some(date!(2008 - 03 - 01))
    );
}

#[test]
fn test_adulthood_cutoff_on_leap_day_rolls_to_march() {
    assert_eq!(
        adulthood_cutoff(date!(2028 - 02 - 29), 18),
        Some(date!(2010 - 03 - 01))
    );
    // Leap year to leap year keeps the day
    assert_eq!(
        adulthood_cutoff(date!(2032 - 02 - 29), 4),
        Some(date!(2028 - 02 - 29))
    );
}

#[test]
fn test_attachment_size_limit() {
    let mut draft: RegistrationDraft = create_valid_draft();

    draft.id_confirmation = Some(Attachment::metadata_only("id.png", "image/png", 2_000_001));
    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(
        result.kinds(Field::IdConfirmation),
        vec![ValidationErrorKind::TooLarge]
    );
    assert_eq!(
        result.message(Field::IdConfirmation),
        Some("File size is too large")
    );

    draft.id_confirmation = Some(Attachment::metadata_only("id.png", "image/png", 2_000_000));
    assert!(validate_draft(&draft, reference_now()).is_valid());
}

#[test]
fn test_attachment_type() {
    let mut draft: RegistrationDraft = create_valid_draft();

    draft.id_confirmation = Some(Attachment::metadata_only("id.txt", "text/plain", 10));
    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(
        result.kinds(Field::IdConfirmation),
        vec![ValidationErrorKind::UnsupportedType]
    );
    assert_eq!(
        result.message(Field::IdConfirmation),
        Some("Unsupported file format")
    );

    for accepted in ["image/jpeg", "image/jpg", "image/png", "application/pdf"] {
        draft.id_confirmation = Some(Attachment::metadata_only("id", accepted, 10));
        assert!(validate_draft(&draft, reference_now()).is_valid());
    }
}

#[test]
fn test_attachment_reports_size_and_type_together() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.id_confirmation = Some(Attachment::metadata_only("movie.mp4", "video/mp4", 9_000_000));

    let result: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(
        result.kinds(Field::IdConfirmation),
        vec![
            ValidationErrorKind::TooLarge,
            ValidationErrorKind::UnsupportedType
        ]
    );
}

#[test]
fn test_independent_rules_all_reported() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.email = String::from("not-an-email");
    draft.username = String::from("ab");
    draft.confirm_password = String::from("other");
    draft.terms_accepted = false;

    let result: ValidationResult = validate_draft(&draft, reference_now());
    let fields: Vec<Field> = result.fields().collect();
    assert_eq!(
        fields,
        vec![
            Field::Email,
            Field::Username,
            Field::ConfirmPassword,
            Field::TermsAccepted
        ]
    );
}

#[test]
fn test_validation_is_idempotent() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.password = String::from("short");
    draft.date_of_birth = Some(date!(2015 - 01 - 01));

    let first: ValidationResult = validate_draft(&draft, reference_now());
    let second: ValidationResult = validate_draft(&draft, reference_now());
    assert_eq!(first, second);
}

#[test]
fn test_custom_policy() {
    let policy: ValidationPolicy = ValidationPolicy {
        username_min_length: 8,
        minimum_age_years: 21,
        max_attachment_bytes: 10,
        ..ValidationPolicy::default()
    };
    let validator: Validator = Validator::new(policy);

    let mut draft: RegistrationDraft = create_valid_draft();
    draft.date_of_birth = Some(date!(2006 - 01 - 01));
    draft.id_confirmation = Some(Attachment::metadata_only("id.pdf", "application/pdf", 11));

    let result: ValidationResult = validator.validate(&draft, reference_now());
    assert_eq!(result.kinds(Field::Username), vec![ValidationErrorKind::TooShort]);
    assert_eq!(result.message(Field::Username), Some("At least 8 characters"));
    assert_eq!(
        result.message(Field::DateOfBirth),
        Some("You must be at least 21 years old")
    );
    assert!(result.has(Field::IdConfirmation, ValidationErrorKind::TooLarge));
}

#[test]
fn test_messages_iterates_first_message_per_field() {
    let mut draft: RegistrationDraft = create_valid_draft();
    draft.password = String::from("abc");
    draft.confirm_password = String::from("abc");
    draft.city.clear();

    let result: ValidationResult = validate_draft(&draft, reference_now());
    let messages: Vec<(Field, &str)> = result.messages().collect();
    assert_eq!(
        messages,
        vec![
            (Field::City, "City is required"),
            (Field::Password, "At least 8 characters"),
        ]
    );
}
