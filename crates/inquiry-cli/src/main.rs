//! Inquiry CLI: send the contact form from a terminal and inspect what the
//! service stored.
//!
//! `submit` talks to the API at INQUIRY_API_URL. The other commands read the
//! store directly and use the same environment as the server
//! (STORE_BACKEND, REDIS_URL, KV_REST_API_URL, ...).

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquiry_cli::{init_tracing, prompt, submission_header, submission_row};
use inquiry_client::{ContactClient, FormController, SubmitContext, SubmitOutcome};
use inquiry_core::models::FORM_SUBMISSION_EVENT;
use inquiry_core::timestamp::day_key;
use inquiry_core::{CaptchaSession, Config, SubmissionId};
use inquiry_storage::{create_store, SubmissionGateway};
use serde::Serialize;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "inquiry", about = "Contact form intake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in and send the contact form
    Submit {
        /// Referrer to report with the submission
        #[arg(long, default_value = "")]
        referrer: String,
    },
    /// Stored submissions
    Submissions {
        #[command(subcommand)]
        sub: SubmissionCommands,
    },
    /// Show the analytics counter of an event for one day
    Analytics {
        /// Event type
        #[arg(default_value = FORM_SUBMISSION_EVENT)]
        event: String,
        /// Day as YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        day: Option<String>,
    },
    /// Show an error log entry by its epoch-millisecond key
    ErrorLog {
        millis: i64,
    },
    /// Print a CAPTCHA challenge and its answer
    Captcha,
}

#[derive(Subcommand)]
enum SubmissionCommands {
    /// List the newest submissions
    List {
        /// Maximum number of submissions
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Output format: json or table
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one submission
    Show {
        /// Submission ID (sub_<millis>_<suffix>)
        id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

async fn gateway() -> anyhow::Result<SubmissionGateway> {
    let config = Config::from_env()?;
    config.validate().context("Invalid store configuration")?;
    let store = create_store(&config)
        .await
        .context("Failed to connect to the key-value store")?;
    Ok(SubmissionGateway::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit { referrer } => submit(referrer).await?,
        Commands::Submissions { sub } => {
            let gateway = gateway().await?;
            match sub {
                SubmissionCommands::List { limit, format } => {
                    let mut submissions = Vec::new();
                    for id in gateway.list_submission_ids(limit).await? {
                        let parsed = SubmissionId::parse(&id)
                            .with_context(|| format!("Malformed id in index: {}", id))?;
                        match gateway.get_submission(&parsed).await? {
                            Some(submission) => submissions.push(submission),
                            None => tracing::warn!(submission_id = %id, "Indexed submission is missing"),
                        }
                    }

                    if format == "json" {
                        print_json(&submissions)?;
                    } else {
                        println!("{}", submission_header());
                        for submission in &submissions {
                            println!("{}", submission_row(submission));
                        }
                        println!("\n{} submission(s)", submissions.len());
                    }
                }
                SubmissionCommands::Show { id } => {
                    let id = SubmissionId::parse(&id)?;
                    let submission = gateway
                        .get_submission(&id)
                        .await?
                        .with_context(|| format!("Submission {} not found", id))?;
                    print_json(&submission)?;
                }
            }
        }
        Commands::Analytics { event, day } => {
            let day = day.unwrap_or_else(|| day_key(&Utc::now()));
            let counter = gateway().await?.get_analytics(&event, &day).await?;
            match counter {
                Some(counter) => print_json(&counter)?,
                None => println!("No {} events recorded on {}", event, day),
            }
        }
        Commands::ErrorLog { millis } => {
            let entry = gateway()
                .await?
                .get_error_log(millis)
                .await?
                .with_context(|| format!("No error log entry at {} (entries expire after 7 days)", millis))?;
            print_json(&entry)?;
        }
        Commands::Captcha => {
            let session = CaptchaSession::new();
            println!("{} = {}", session.current().question(), session.expected_answer());
        }
    }

    Ok(())
}

/// Interactive form: ask for each field, then send through the form controller.
///
/// Rejected input is reported and the form asked again; the CAPTCHA stays
/// the same until a submission goes through.
async fn submit(referrer: String) -> anyhow::Result<()> {
    let client = ContactClient::from_env()?;
    tracing::debug!(api = client.base_url(), "Sending to API");

    let mut form = FormController::new(client);
    let context = SubmitContext {
        referrer,
        ..SubmitContext::default()
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    loop {
        fill_form(&mut form, &mut input, &mut output)?;

        let outcome = form.submit(&context).await;
        if let Some(message) = form.message() {
            writeln!(output, "{}", message.text)?;
        }

        match outcome {
            SubmitOutcome::Sent(success) => {
                writeln!(output, "Submission ID: {}", success.submission_id)?;
                return Ok(());
            }
            SubmitOutcome::Rejected(_) => continue,
            SubmitOutcome::Failed(e) => return Err(e.context("Submission failed")),
        }
    }
}

fn fill_form<R: BufRead, W: Write>(
    form: &mut FormController<ContactClient>,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let name = prompt(input, output, "Name")?;
    let email = prompt(input, output, "Email")?;
    let company = prompt(input, output, "Company (optional)")?;
    let service = prompt(
        input,
        output,
        "Service (bookkeeping, cfo, premium, consultation; optional)",
    )?;

    {
        let fields = form.fields_mut();
        fields.name = name;
        fields.email = email;
        fields.company = company;
        fields.message.clear();
    }
    if form.select_service(service.trim()) {
        writeln!(output, "Message: {}", form.fields().message)?;
        let edited = prompt(input, output, "Press Enter to keep, or type a new message")?;
        if !edited.trim().is_empty() {
            form.fields_mut().message = edited;
        }
    } else {
        form.fields_mut().message = prompt(input, output, "Message")?;
    }

    let question = form.captcha_question();
    form.fields_mut().captcha_answer = prompt(input, output, &format!("What is {}?", question))?;
    Ok(())
}
