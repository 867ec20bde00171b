// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Attachment, CountryCatalog, RegistrationDraft};
use time::macros::{date, datetime};
use time::OffsetDateTime;

/// The reference time used across validation tests.
pub fn reference_now() -> OffsetDateTime {
    datetime!(2026-10-18 12:00 UTC)
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
        id_confirmation: Some(Attachment::from_bytes(
            "passport.png",
            "image/png",
            vec![0x89, 0x50, 0x4E, 0x47],
        )),
        terms_accepted: true,
        bot_check_token: String::from("03AGdBq24-token"),
    }
}
