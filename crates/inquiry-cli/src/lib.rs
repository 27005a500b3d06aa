use inquiry_core::models::Submission;
use inquiry_core::timestamp::iso_millis;
use std::io::{self, BufRead, Write};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One line of `submissions list` table output
pub fn submission_row(submission: &Submission) -> String {
    format!(
        "{:<28} {:<24} {:<20} {:<28} {:<18} {}",
        submission.id.as_str(),
        iso_millis(&submission.submitted_at),
        truncate_string(&submission.name, 20),
        truncate_string(&submission.email, 28),
        truncate_string(&submission.service, 18),
        truncate_string(&submission.message.replace('\n', " "), 40),
    )
}

pub fn submission_header() -> String {
    format!(
        "{:<28} {:<24} {:<20} {:<28} {:<18} {}",
        "ID", "SUBMITTED", "NAME", "EMAIL", "SERVICE", "MESSAGE"
    )
}

/// Print `label`, then read one line without its line ending.
///
/// Fails with `UnexpectedEof` once input is exhausted.
pub fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> io::Result<String> {
    write!(writer, "{}: ", label)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the form was complete",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}
