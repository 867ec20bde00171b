// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client side of the sign-up form.
//!
//! The [`FormController`] owns the draft and drives validation and
//! submission. Encoding is handled by [`SubmissionEncoder`] and the single
//! network call by [`RegistrationClient`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod clock;
mod config;
mod controller;
mod encoder;
mod error;
mod http;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, SubmissionEncoding, ValidationMode};
pub use controller::{FieldStatus, FormController};
pub use encoder::{EncodedSubmission, FormPart, PartValue, SubmissionEncoder};
pub use error::{EncodeError, GENERIC_FAILURE_NOTICE, SubmitError};
pub use http::{RegistrationClient, SubmissionReceipt};
