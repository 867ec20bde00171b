// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod draft;

use clap::{Args as ClapArgs, Parser, Subcommand};
use draft::{DraftFile, load_attachment, parse_now};
use signup_client::{
    Clock, ClientConfig, DEFAULT_ENDPOINT, FixedClock, FormController, RegistrationClient,
    SubmissionEncoding, SubmissionReceipt, SubmitError, SystemClock,
};
use signup_domain::{FieldUpdate, ValidationResult};
use signup_stub::{StubConfig, StubState};
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::{error, info};

/// Sign-up form - validate and submit registrations from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a draft and print every field error
    Validate(DraftArgs),
    /// Validate a draft and post it to the registration endpoint
    Submit {
        #[command(flatten)]
        draft: DraftArgs,

        /// Registration endpoint URL
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Request body encoding
        #[arg(long, default_value_t = SubmissionEncoding::Multipart)]
        encoding: SubmissionEncoding,

        /// Include the bot-check token in the request body
        #[arg(long)]
        forward_bot_token: bool,
    },
    /// Run the stub registration backend
    ServeStub {
        /// Port to bind the stub to
        #[arg(short, long, default_value_t = 3002)]
        port: u16,

        /// Route that accepts registrations
        #[arg(long, default_value = "/login")]
        path: String,

        /// Status code returned for every registration
        #[arg(long, default_value_t = 200)]
        status: u16,
    },
}

/// Inputs shared by `validate` and `submit`.
#[derive(ClapArgs, Debug)]
struct DraftArgs {
    /// Path to the draft JSON file
    #[arg(short, long)]
    draft: PathBuf,

    /// Path to the ID confirmation file
    #[arg(short, long)]
    attachment: Option<PathBuf>,

    /// MIME type of the attachment. Inferred from the extension if omitted.
    #[arg(long)]
    attachment_type: Option<String>,

    /// Reference time for the age rule (RFC 3339). Defaults to now.
    #[arg(long)]
    now: Option<String>,
}

impl DraftArgs {
    /// Reads the draft and attachment into input events.
    fn updates(&self, config: &ClientConfig) -> Result<Vec<FieldUpdate>, draft::InputError> {
        let mut updates: Vec<FieldUpdate> =
            DraftFile::load(&self.draft)?.into_updates(&config.countries)?;
        let attachment = self
            .attachment
            .as_deref()
            .map(|path| load_attachment(path, self.attachment_type.as_deref()))
            .transpose()?;
        updates.push(FieldUpdate::IdConfirmation(attachment));
        Ok(updates)
    }

    fn reference_time(&self) -> Result<Option<OffsetDateTime>, draft::InputError> {
        self.now.as_deref().map(parse_now).transpose()
    }
}

/// Builds a controller with the draft filled in.
fn filled_controller<C: Clock>(
    config: ClientConfig,
    clock: C,
    updates: Vec<FieldUpdate>,
) -> FormController<C> {
    let mut controller: FormController<C> = FormController::new(config, clock);
    for update in updates {
        controller.update(update);
    }
    controller
}

fn report_errors(errors: &ValidationResult) {
    for (field, message) in errors.messages() {
        println!("{}: {message}", field.label());
    }
}

/// Validates the draft, printing the outcome.
fn run_validate<C: Clock>(
    config: ClientConfig,
    clock: C,
    updates: Vec<FieldUpdate>,
) -> Result<(), SubmitError> {
    let mut controller: FormController<C> = filled_controller(config, clock, updates);
    let errors: ValidationResult = controller.validate().clone();

    if errors.is_valid() {
        println!("Draft is valid");
        Ok(())
    } else {
        report_errors(&errors);
        Err(SubmitError::Invalid(errors))
    }
}

/// Validates and posts the draft.
async fn run_submit<C: Clock>(
    config: ClientConfig,
    clock: C,
    updates: Vec<FieldUpdate>,
) -> Result<SubmissionReceipt, SubmitError> {
    let client: RegistrationClient = RegistrationClient::new(config.endpoint.clone());
    let mut controller: FormController<C> = filled_controller(config, clock, updates);

    match controller.submit(&client).await {
        Ok(receipt) => {
            println!("Registration submitted ({})", receipt.status);
            Ok(receipt)
        }
        Err(SubmitError::Invalid(errors)) => {
            report_errors(&errors);
            Err(SubmitError::Invalid(errors))
        }
        Err(err) => {
            error!(error = %err, "Submission failed");
            if let Some(notice) = controller.notice() {
                println!("{notice}");
            }
            Err(err)
        }
    }
}

async fn serve_stub(port: u16, path: String, status: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr: std::net::SocketAddr = format!("127.0.0.1:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, path = %path, status, "Stub registration backend listening");

    let state: StubState = StubState::new(StubConfig {
        path,
        status,
        ..StubConfig::default()
    });
    signup_stub::serve(listener, state).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match args.command {
        Command::Validate(draft) => {
            let config: ClientConfig = ClientConfig::default();
            let updates: Vec<FieldUpdate> = draft.updates(&config)?;
            match draft.reference_time()? {
                Some(now) => run_validate(config, FixedClock(now), updates)?,
                None => run_validate(config, SystemClock, updates)?,
            }
        }
        Command::Submit {
            draft,
            endpoint,
            encoding,
            forward_bot_token,
        } => {
            let config: ClientConfig = ClientConfig {
                endpoint,
                encoding,
                forward_bot_token,
                ..ClientConfig::default()
            };
            let updates: Vec<FieldUpdate> = draft.updates(&config)?;
            match draft.reference_time()? {
                Some(now) => run_submit(config, FixedClock(now), updates).await?,
                None => run_submit(config, SystemClock, updates).await?,
            };
        }
        Command::ServeStub { port, path, status } => serve_stub(port, path, status).await?,
    }

    Ok(())
}
