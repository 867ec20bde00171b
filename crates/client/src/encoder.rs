// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request body construction for the registration endpoint.

use crate::config::{ClientConfig, SubmissionEncoding};
use crate::error::EncodeError;
use serde::Serialize;
use signup_domain::{Attachment, Country, Field, RegistrationDraft};
use time::Date;
use time::format_description::well_known::Rfc3339;

/// The value carried by one multipart part.
#[derive(Clone, PartialEq, Eq)]
pub enum PartValue {
    /// A plain text part.
    Text(String),
    /// A binary file part.
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl std::fmt::Debug for PartValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::File {
                file_name,
                content_type,
                bytes,
            } => f
                .debug_struct("File")
                .field("file_name", file_name)
                .field("content_type", content_type)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// One named part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    /// The part name.
    pub name: &'static str,
    /// The part value.
    pub value: PartValue,
}

impl FormPart {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: PartValue::Text(value.into()),
        }
    }

    /// Returns the text of a text part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            PartValue::Text(text) => Some(text),
            PartValue::File { .. } => None,
        }
    }
}

/// An encoded request body, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedSubmission {
    /// Parts of a `multipart/form-data` body, in send order.
    Multipart(Vec<FormPart>),
    /// A JSON document.
    Json(serde_json::Value),
}

impl EncodedSubmission {
    /// Returns the multipart part with the given name.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&FormPart> {
        match self {
            Self::Multipart(parts) => parts.iter().find(|part| part.name == name),
            Self::Json(_) => None,
        }
    }

    /// Returns the multipart part names in send order.
    #[must_use]
    pub fn part_names(&self) -> Vec<&'static str> {
        match self {
            Self::Multipart(parts) => parts.iter().map(|part| part.name).collect(),
            Self::Json(_) => Vec::new(),
        }
    }

    /// Returns the encoding this body uses.
    #[must_use]
    pub const fn encoding(&self) -> SubmissionEncoding {
        match self {
            Self::Multipart(_) => SubmissionEncoding::Multipart,
            Self::Json(_) => SubmissionEncoding::Json,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRegistration<'a> {
    name: &'a str,
    address: &'a str,
    city: &'a str,
    phone_number: &'a str,
    postcode: &'a str,
    country: &'a str,
    username: &'a str,
    email: &'a str,
    password: &'a str,
    date_of_birth: String,
    id_confirmation: JsonAttachment<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bot_check_token: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonAttachment<'a> {
    file_name: &'a str,
    content_type: &'a str,
    size: u64,
}

/// Turns a validated draft into a request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionEncoder {
    encoding: SubmissionEncoding,
    forward_bot_token: bool,
}

impl SubmissionEncoder {
    /// Creates an encoder.
    #[must_use]
    pub const fn new(encoding: SubmissionEncoding, forward_bot_token: bool) -> Self {
        Self {
            encoding,
            forward_bot_token,
        }
    }

    /// Creates an encoder from the client configuration.
    #[must_use]
    pub const fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.encoding, config.forward_bot_token)
    }

    /// Encodes a draft that has passed validation.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::Incomplete` if the country, birth date or
    /// attachment is unset, and a format error if the birth date or JSON body
    /// cannot be rendered.
    pub fn encode(&self, draft: &RegistrationDraft) -> Result<EncodedSubmission, EncodeError> {
        let country: &Country = draft.country.as_ref().ok_or(EncodeError::Incomplete {
            field: Field::Country,
        })?;
        let date_of_birth: Date = draft.date_of_birth.ok_or(EncodeError::Incomplete {
            field: Field::DateOfBirth,
        })?;
        let attachment: &Attachment =
            draft
                .id_confirmation
                .as_ref()
                .ok_or(EncodeError::Incomplete {
                    field: Field::IdConfirmation,
                })?;
        let date_of_birth: String = birth_instant(date_of_birth)?;

        match self.encoding {
            SubmissionEncoding::Multipart => Ok(EncodedSubmission::Multipart(
                self.multipart_parts(draft, country, date_of_birth, attachment),
            )),
            SubmissionEncoding::Json => {
                let body: JsonRegistration<'_> = JsonRegistration {
                    name: &draft.full_name,
                    address: &draft.address,
                    city: &draft.city,
                    phone_number: &draft.phone_number,
                    postcode: &draft.postcode,
                    country: country.name(),
                    username: &draft.username,
                    email: &draft.email,
                    password: &draft.password,
                    date_of_birth,
                    id_confirmation: JsonAttachment {
                        file_name: &attachment.file_name,
                        content_type: &attachment.content_type,
                        size: attachment.declared_size,
                    },
                    bot_check_token: self
                        .forward_bot_token
                        .then_some(draft.bot_check_token.as_str()),
                };
                serde_json::to_value(&body)
                    .map(EncodedSubmission::Json)
                    .map_err(|e| EncodeError::Json(e.to_string()))
            }
        }
    }

    fn multipart_parts(
        &self,
        draft: &RegistrationDraft,
        country: &Country,
        date_of_birth: String,
        attachment: &Attachment,
    ) -> Vec<FormPart> {
        let mut parts: Vec<FormPart> = vec![
            FormPart::text("name", draft.full_name.as_str()),
            FormPart::text("address", draft.address.as_str()),
            FormPart::text("city", draft.city.as_str()),
            FormPart::text("phoneNumber", draft.phone_number.as_str()),
            FormPart::text("postcode", draft.postcode.as_str()),
            FormPart::text("country", country.name()),
            FormPart::text("username", draft.username.as_str()),
            FormPart::text("email", draft.email.as_str()),
            FormPart::text("password", draft.password.as_str()),
            FormPart::text("dateOfBirth", date_of_birth),
            FormPart {
                name: "idConfirmation",
                value: PartValue::File {
                    file_name: attachment.file_name.clone(),
                    content_type: attachment.content_type.clone(),
                    bytes: attachment.bytes.clone(),
                },
            },
        ];

        if self.forward_bot_token {
            parts.push(FormPart::text(
                "botCheckToken",
                draft.bot_check_token.as_str(),
            ));
        }

        parts
    }
}

/// Renders a birth date as the UTC instant at the start of that day.
fn birth_instant(date: Date) -> Result<String, EncodeError> {
    date.midnight()
        .assume_utc()
        .format(&Rfc3339)
        .map_err(|e| EncodeError::DateFormat(e.to_string()))
}
