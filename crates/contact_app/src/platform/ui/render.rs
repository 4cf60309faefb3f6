use std::io::Write;

use contact_core::{FormViewModel, OutcomeKind, Presenter, SubmissionPhase};
use form_logging::form_warn;

/// Renders presentation effects as plain lines on a terminal (or any sink).
pub struct TerminalPresenter<W: Write> {
    out: W,
    busy: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, busy: false }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints every field with its current value and any error next to it.
    pub fn render_summary(&mut self, view: &FormViewModel) {
        let phase = match view.phase {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Invalid => "needs corrections",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Succeeded => "sent",
            SubmissionPhase::Failed => "not sent",
        };
        self.line(&format!("Form ({phase}):"));
        for row in &view.fields {
            let value = if row.value.is_empty() { "-" } else { row.value.as_str() };
            match &row.error {
                Some(error) => self.line(&format!("  {}: {value}  <- {error}", row.label)),
                None => self.line(&format!("  {}: {value}", row.label)),
            }
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            form_warn!("Failed to write to terminal: {}", err);
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_field_error(&mut self, field: &str, message: &str) {
        self.line(&format!("  ✗ {field}: {message}"));
    }

    fn clear_field_error(&mut self, field: &str) {
        self.line(&format!("  ✓ {field}"));
    }

    fn show_busy(&mut self, busy: bool) {
        self.busy = busy;
        if busy {
            self.line("Submitting...");
        }
    }

    fn show_outcome_message(&mut self, kind: OutcomeKind, html: &str) {
        let prefix = match kind {
            OutcomeKind::Success => "[success]",
            OutcomeKind::Error => "[error]",
        };
        self.line(&format!("{prefix} {}", html_to_text(html)));
    }

    fn clear_form(&mut self) {
        self.line("Form cleared.");
    }
}

/// Converts outcome markup to a single readable line.
pub fn html_to_text(html: &str) -> String {
    html2md::parse_html(html)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
