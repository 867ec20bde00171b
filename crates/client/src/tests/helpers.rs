// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ClientConfig, FixedClock, FormController};
use signup_domain::{Attachment, CountryCatalog, FieldUpdate, RegistrationDraft};
use time::OffsetDateTime;
use time::macros::{date, datetime};

/// The reference time used across controller tests.
pub fn reference_now() -> OffsetDateTime {
    datetime!(2026-10-18 12:00 UTC)
}

pub fn create_test_attachment() -> Attachment {
    Attachment::from_bytes("passport.pdf", "application/pdf", b"%PDF-1.4 test".to_vec())
}

/// Creates a draft that satisfies every rule at `reference_now()`.
pub fn create_valid_draft() -> RegistrationDraft {
    RegistrationDraft {
        full_name: String::from("Jane Doe"),
        phone_number: String::from("+41 44 123 45 67"),
        address: String::from("Bahnhofstrasse 1"),
        city: String::from("Zurich"),
        postcode: String::from("8001"),
        country: Some(CountryCatalog::default().select("Switzerland").unwrap()),
        email: String::from("jane.doe@example.com"),
        username: String::from("janedoe"),
        password: String::from("Ab1!defgh"),
        confirm_password: String::from("Ab1!defgh"),
        date_of_birth: Some(date!(1990 - 05 - 17)),
        id_confirmation: Some(create_test_attachment()),
        terms_accepted: true,
        bot_check_token: String::from("03AGdBq24-token"),
    }
}

/// The input events that fill in `create_valid_draft()` through the UI.
pub fn valid_updates() -> Vec<FieldUpdate> {
    let draft: RegistrationDraft = create_valid_draft();
    vec![
        FieldUpdate::FullName(draft.full_name),
        FieldUpdate::PhoneNumber(draft.phone_number),
        FieldUpdate::Address(draft.address),
        FieldUpdate::City(draft.city),
        FieldUpdate::Postcode(draft.postcode),
        FieldUpdate::Country(draft.country),
        FieldUpdate::Email(draft.email),
        FieldUpdate::Username(draft.username),
        FieldUpdate::Password(draft.password),
        FieldUpdate::ConfirmPassword(draft.confirm_password),
        FieldUpdate::DateOfBirth(draft.date_of_birth),
        FieldUpdate::IdConfirmation(draft.id_confirmation),
        FieldUpdate::TermsAccepted(draft.terms_accepted),
        FieldUpdate::BotCheckToken(draft.bot_check_token),
    ]
}

/// Creates a controller frozen at `reference_now()`.
pub fn create_test_controller(config: ClientConfig) -> FormController<FixedClock> {
    FormController::new(config, FixedClock(reference_now()))
}

/// Creates a controller with every field filled in.
pub fn create_filled_controller(config: ClientConfig) -> FormController<FixedClock> {
    let mut controller: FormController<FixedClock> = create_test_controller(config);
    for update in valid_updates() {
        controller.update(update);
    }
    controller
}
