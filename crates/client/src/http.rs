// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::encoder::{EncodedSubmission, FormPart, PartValue};
use crate::error::{EncodeError, SubmitError};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

/// A successful response from the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// The 2xx status code.
    pub status: u16,
    /// The response body, uninterpreted.
    pub body: String,
}

/// Sends encoded submissions to the registration endpoint.
///
/// Every call to [`RegistrationClient::send`] performs exactly one POST.
/// There is no retry and no idempotency key.
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    http: Client,
    endpoint: String,
}

impl RegistrationClient {
    /// Creates a client for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts a submission.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::SubmissionFailed` for a non-2xx status and
    /// `SubmitError::Transport` if the request or response body fails.
    pub async fn send(
        &self,
        submission: EncodedSubmission,
    ) -> Result<SubmissionReceipt, SubmitError> {
        info!(
            endpoint = %self.endpoint,
            encoding = %submission.encoding(),
            "Sending registration"
        );

        let request = self.http.post(&self.endpoint);
        let request = match submission {
            EncodedSubmission::Multipart(parts) => request.multipart(build_form(parts)?),
            EncodedSubmission::Json(body) => request.json(&body),
        };

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "Registration request failed");
            SubmitError::Transport {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "Registration rejected"
            );
            return Err(SubmitError::SubmissionFailed {
                status: status.as_u16(),
            });
        }

        let body: String = response.text().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "Failed to read registration response");
            SubmitError::Transport {
                reason: e.to_string(),
            }
        })?;

        info!(status = status.as_u16(), "Registration accepted");

        Ok(SubmissionReceipt {
            status: status.as_u16(),
            body,
        })
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form, EncodeError> {
    let mut form: Form = Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let file: Part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|_| EncodeError::InvalidContentType(content_type.clone()))?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}
