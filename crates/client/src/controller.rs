// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The registration form controller.
//!
//! The controller is the single mutator of the draft. It is driven by UI
//! events: field edits, country selection, and submit. A submission is split
//! into [`FormController::begin_submission`] and
//! [`FormController::complete_submission`] so an event loop can hand the
//! network call to a task while the controller keeps rejecting further
//! submit attempts until the outcome is reported back.

use crate::clock::Clock;
use crate::config::{ClientConfig, ValidationMode};
use crate::encoder::{EncodedSubmission, SubmissionEncoder};
use crate::error::{GENERIC_FAILURE_NOTICE, SubmitError};
use crate::http::{RegistrationClient, SubmissionReceipt};
use signup_domain::{
    AvatarDisplay, DomainError, EmailHint, Field, FieldUpdate, PasswordHints, RegistrationDraft,
    UsernameHints, ValidationResult, Validator, summary_notice,
};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Display state of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Never edited and not yet validated.
    Untouched,
    /// Edited but not yet validated.
    Touched,
    /// Validated with no error.
    Valid,
    /// Validated with an error shown.
    Invalid,
}

/// Owns the draft and drives validation and submission.
#[derive(Debug)]
pub struct FormController<C: Clock> {
    config: ClientConfig,
    validator: Validator,
    encoder: SubmissionEncoder,
    clock: C,
    draft: RegistrationDraft,
    touched: BTreeSet<Field>,
    errors: ValidationResult,
    submit_attempted: bool,
    in_flight: bool,
    last_submission_failed: bool,
}

impl<C: Clock> FormController<C> {
    /// Creates a controller with an empty draft.
    #[must_use]
    pub fn new(config: ClientConfig, clock: C) -> Self {
        Self {
            validator: Validator::new(config.policy.clone()),
            encoder: SubmissionEncoder::from_config(&config),
            config,
            clock,
            draft: RegistrationDraft::new(),
            touched: BTreeSet::new(),
            errors: ValidationResult::default(),
            submit_attempted: false,
            in_flight: false,
            last_submission_failed: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the current draft.
    #[must_use]
    pub const fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Returns the errors currently shown next to fields.
    #[must_use]
    pub const fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// Returns whether a submission is outstanding.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Returns whether the submit control is enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.in_flight
    }

    /// Applies one input event.
    pub fn update(&mut self, update: FieldUpdate) {
        let field: Field = update.field();
        debug!(field = %field, "Field updated");

        self.draft.apply(update);
        self.touched.insert(field);

        if self.submit_attempted || self.config.validation_mode == ValidationMode::OnChange {
            self.revalidate();
        }
    }

    /// Selects a country by name from the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCountry` if the name is not listed; the
    /// draft is left unchanged.
    pub fn select_country(&mut self, name: &str) -> Result<(), DomainError> {
        let country = self.config.countries.select(name)?;
        self.update(FieldUpdate::Country(Some(country)));
        Ok(())
    }

    /// Returns the display state of a field.
    #[must_use]
    pub fn field_status(&self, field: Field) -> FieldStatus {
        if self.errors.contains(field) {
            FieldStatus::Invalid
        } else if self.is_checked(field) {
            FieldStatus::Valid
        } else if self.touched.contains(&field) {
            FieldStatus::Touched
        } else {
            FieldStatus::Untouched
        }
    }

    /// Validates the whole draft and shows every error, as a submit would.
    pub fn validate(&mut self) -> &ValidationResult {
        self.submit_attempted = true;
        self.revalidate();
        &self.errors
    }

    /// Starts a submission.
    ///
    /// Validates the draft against the clock's current time and, if it is
    /// valid, marks a submission as outstanding and returns the encoded body.
    /// The caller must report the outcome through
    /// [`FormController::complete_submission`].
    ///
    /// # Errors
    ///
    /// - `SubmitError::AlreadyInFlight` if a submission is outstanding
    /// - `SubmitError::Invalid` if any rule fails; nothing is marked in flight
    /// - `SubmitError::Encode` if the draft cannot be encoded
    pub fn begin_submission(&mut self) -> Result<EncodedSubmission, SubmitError> {
        if self.in_flight {
            warn!("Submit rejected: a submission is already in progress");
            return Err(SubmitError::AlreadyInFlight);
        }

        self.submit_attempted = true;
        self.last_submission_failed = false;
        self.revalidate();

        if !self.errors.is_valid() {
            info!(invalid_fields = self.errors.len(), "Submit blocked by validation");
            return Err(SubmitError::Invalid(self.errors.clone()));
        }

        let submission: EncodedSubmission = self.encoder.encode(&self.draft)?;
        self.in_flight = true;
        Ok(submission)
    }

    /// Records the outcome of the outstanding submission.
    ///
    /// On success the draft is discarded and the form returns to its initial
    /// state. On failure the draft is kept for resubmission.
    pub fn complete_submission(&mut self, outcome: &Result<SubmissionReceipt, SubmitError>) {
        self.in_flight = false;

        match outcome {
            Ok(receipt) => {
                info!(status = receipt.status, "Registration submitted");
                self.draft.clear();
                self.touched.clear();
                self.errors = ValidationResult::default();
                self.submit_attempted = false;
                self.last_submission_failed = false;
            }
            Err(err) => {
                warn!(error = %err, "Registration submission failed");
                self.last_submission_failed = true;
            }
        }
    }

    /// Validates, sends and records one submission.
    ///
    /// If the returned future is dropped before the response arrives, the
    /// submission is recorded as failed and the submit control is enabled
    /// again.
    ///
    /// # Errors
    ///
    /// Returns any error from [`FormController::begin_submission`] or from
    /// the network call.
    pub async fn submit(
        &mut self,
        client: &RegistrationClient,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let submission: EncodedSubmission = self.begin_submission()?;
        let pending: PendingSubmission<'_, C> = PendingSubmission {
            controller: self,
            settled: false,
        };
        let outcome: Result<SubmissionReceipt, SubmitError> = client.send(submission).await;
        pending.settle(&outcome);
        outcome
    }

    /// Returns the banner text above the form, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        if self.last_submission_failed {
            Some(GENERIC_FAILURE_NOTICE)
        } else {
            summary_notice(&self.errors)
        }
    }

    /// Returns the avatar for the current name, when feedback is enabled.
    #[must_use]
    pub fn avatar(&self) -> Option<AvatarDisplay> {
        self.config
            .show_feedback
            .then(|| self.config.portraits.resolve(&self.draft.full_name))
    }

    /// Returns the password rule hints, when feedback is enabled.
    #[must_use]
    pub fn password_hints(&self) -> Option<PasswordHints> {
        self.config.show_feedback.then(|| {
            PasswordHints::derive(
                &self.config.policy.password,
                &self.draft.password,
                self.errors.contains(Field::Password),
            )
        })
    }

    /// Returns the email format hint, when feedback is enabled.
    #[must_use]
    pub fn email_hint(&self) -> Option<EmailHint> {
        self.config.show_feedback.then(|| {
            EmailHint::derive(&self.draft.email, self.errors.contains(Field::Email))
        })
    }

    /// Returns the username rule hints, when feedback is enabled.
    #[must_use]
    pub fn username_hints(&self) -> Option<UsernameHints> {
        self.config.show_feedback.then(|| {
            UsernameHints::derive(
                self.config.policy.username_min_length,
                &self.draft.username,
                self.errors.contains(Field::Username),
            )
        })
    }

    /// Returns whether errors are currently computed for a field.
    fn is_checked(&self, field: Field) -> bool {
        self.submit_attempted
            || (self.config.validation_mode == ValidationMode::OnChange
                && self.touched.contains(&field))
    }

    fn abandon_submission(&mut self) {
        warn!("Registration submission abandoned before completion");
        self.in_flight = false;
        self.last_submission_failed = true;
    }

    fn revalidate(&mut self) {
        let mut errors: ValidationResult = self.validator.validate(&self.draft, self.clock.now());
        errors.retain(|field| self.is_checked(field));
        self.errors = errors;
    }
}

/// Releases the in-flight flag if a submission is dropped mid-request.
struct PendingSubmission<'a, C: Clock> {
    controller: &'a mut FormController<C>,
    settled: bool,
}

impl<C: Clock> PendingSubmission<'_, C> {
    fn settle(mut self, outcome: &Result<SubmissionReceipt, SubmitError>) {
        self.controller.complete_submission(outcome);
        self.settled = true;
    }
}

impl<C: Clock> Drop for PendingSubmission<'_, C> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.abandon_submission();
        }
    }
}
