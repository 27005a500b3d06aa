//! Form Controller
//!
//! Mirrors the page's contact form: trimmed field values, a per-form CAPTCHA
//! session, the submit button and the status message under the form.
//! Validation runs the same rules as the server, then the CAPTCHA check,
//! before anything is sent.

use std::time::{Duration, Instant};

use chrono::Utc;
use inquiry_core::captcha::parse_answer;
use inquiry_core::models::{ContactPayload, ContactReply, ContactSuccess, DIRECT_REFERRER};
use inquiry_core::timestamp::iso_millis;
use inquiry_core::validation::validate_with_captcha;
use inquiry_core::{CaptchaSession, ContactFields, ValidationFailure};

use crate::transport::Transport;
use crate::ui::service_message;

pub const SEND_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const SENDING_MESSAGE: &str = "Sending your message...";
pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you soon.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again or contact us directly.";

/// How long a success message stays visible
pub const SUCCESS_AUTO_HIDE: Duration = Duration::from_secs(5);

/// Raw field values as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub service: String,
    pub message: String,
    pub captcha_answer: String,
}

impl FormFields {
    /// Trimmed copy; `service` is a select value and is kept as is
    fn trimmed(&self) -> FormFields {
        FormFields {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self.company.trim().to_string(),
            service: self.service.clone(),
            message: self.message.trim().to_string(),
            captcha_answer: self.captcha_answer.clone(),
        }
    }

    fn contact_fields(&self) -> ContactFields<'_> {
        ContactFields {
            name: Some(&self.name),
            email: Some(&self.email),
            message: Some(&self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Loading,
    Success,
    Error,
}

/// Status line under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub text: String,
    pub kind: MessageKind,
    shown_at: Instant,
    dismissed: bool,
}

impl FormMessage {
    fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
            dismissed: false,
        }
    }

    /// Success messages hide themselves after [`SUCCESS_AUTO_HIDE`]
    pub fn is_visible_at(&self, now: Instant) -> bool {
        if self.dismissed {
            return false;
        }
        match self.kind {
            MessageKind::Success => now.saturating_duration_since(self.shown_at) < SUCCESS_AUTO_HIDE,
            MessageKind::Loading | MessageKind::Error => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub label: &'static str,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            disabled: false,
            label: SEND_LABEL,
        }
    }
}

/// What the page knows about itself when the form is sent
#[derive(Debug, Clone)]
pub struct SubmitContext {
    pub user_agent: String,
    /// Empty when the visitor arrived directly
    pub referrer: String,
}

impl Default for SubmitContext {
    fn default() -> Self {
        Self {
            user_agent: concat!("inquiry-client/", env!("CARGO_PKG_VERSION")).to_string(),
            referrer: String::new(),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Stopped before sending; nothing left the client
    Rejected(ValidationFailure),
    Sent(ContactSuccess),
    /// The server refused the submission or could not be reached
    Failed(anyhow::Error),
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent(_))
    }
}

pub struct FormController<T> {
    transport: T,
    fields: FormFields,
    captcha: CaptchaSession,
    button: SubmitButton,
    message: Option<FormMessage>,
}

impl<T: Transport> FormController<T> {
    /// New form with a fresh CAPTCHA
    pub fn new(transport: T) -> Self {
        Self::with_captcha(transport, CaptchaSession::new())
    }

    pub fn with_captcha(transport: T, captcha: CaptchaSession) -> Self {
        Self {
            transport,
            fields: FormFields::default(),
            captcha,
            button: SubmitButton::default(),
            message: None,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn captcha(&self) -> &CaptchaSession {
        &self.captcha
    }

    pub fn captcha_mut(&mut self) -> &mut CaptchaSession {
        &mut self.captcha
    }

    /// Question to show next to the answer field, e.g. `7 + 3`
    pub fn captcha_question(&self) -> String {
        self.captcha.current().question()
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    /// The status message, if one is showing at `now`
    pub fn message_at(&self, now: Instant) -> Option<&FormMessage> {
        self.message.as_ref().filter(|m| m.is_visible_at(now))
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message_at(Instant::now())
    }

    /// Selecting a service pre-fills its canned message into an empty message field.
    ///
    /// Returns whether the message was filled.
    pub fn select_service(&mut self, service: &str) -> bool {
        self.fields.service = service.to_string();
        match service_message(service) {
            Some(text) if self.fields.message.trim().is_empty() => {
                self.fields.message = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Escape hides whatever message is showing
    pub fn handle_key(&mut self, key: &str) {
        if key == "Escape" {
            if let Some(message) = self.message.as_mut() {
                message.dismissed = true;
            }
        }
    }

    /// Validate the form and, when it passes, enter the sending state.
    ///
    /// On failure the error message is shown and the button is untouched.
    pub fn prepare(&mut self, context: &SubmitContext) -> Result<ContactPayload, ValidationFailure> {
        let fields = self.fields.trimmed();
        let answer = parse_answer(&fields.captcha_answer);

        if let Err(failure) =
            validate_with_captcha(&fields.contact_fields(), answer, self.captcha.expected_answer())
        {
            self.show(failure.to_string(), MessageKind::Error);
            return Err(failure);
        }

        self.button = SubmitButton {
            disabled: true,
            label: SENDING_LABEL,
        };
        self.show(SENDING_MESSAGE, MessageKind::Loading);

        Ok(ContactPayload {
            name: fields.name,
            email: fields.email,
            company: Some(fields.company).filter(|c| !c.is_empty()),
            service: Some(fields.service).filter(|s| !s.is_empty()),
            message: fields.message,
            captcha_answer: answer,
            timestamp: iso_millis(&Utc::now()),
            user_agent: context.user_agent.clone(),
            referrer: if context.referrer.is_empty() {
                DIRECT_REFERRER.to_string()
            } else {
                context.referrer.clone()
            },
        })
    }

    /// Apply the server's answer and leave the sending state.
    pub fn complete(&mut self, result: anyhow::Result<ContactReply>) -> SubmitOutcome {
        let outcome = match result {
            Ok(ContactReply::Success(success)) if success.success => {
                self.show(SUCCESS_MESSAGE, MessageKind::Success);
                self.fields = FormFields::default();
                self.captcha.regenerate();
                SubmitOutcome::Sent(success)
            }
            Ok(ContactReply::Success(_)) => {
                self.show(FAILURE_MESSAGE, MessageKind::Error);
                SubmitOutcome::Failed(anyhow::anyhow!("Failed to send message"))
            }
            Ok(ContactReply::Failure(failure)) => {
                tracing::warn!(error = %failure.error, "Contact submission refused");
                self.show(FAILURE_MESSAGE, MessageKind::Error);
                SubmitOutcome::Failed(anyhow::anyhow!(failure.error))
            }
            Err(e) => {
                tracing::error!(error = %e, "Form submission error");
                self.show(FAILURE_MESSAGE, MessageKind::Error);
                SubmitOutcome::Failed(e)
            }
        };

        self.button = SubmitButton::default();
        outcome
    }

    /// Validate, send and render the result
    pub async fn submit(&mut self, context: &SubmitContext) -> SubmitOutcome {
        let payload = match self.prepare(context) {
            Ok(payload) => payload,
            Err(failure) => return SubmitOutcome::Rejected(failure),
        };

        let result = self.transport.send(&payload).await;
        self.complete(result)
    }

    fn show(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.message = Some(FormMessage::new(text, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use inquiry_core::captcha::{Challenge, Operator};
    use inquiry_core::models::ContactFailure;
    use std::sync::Mutex;

    /// Records payloads and answers with a canned reply
    struct MockTransport {
        reply: fn() -> anyhow::Result<ContactReply>,
        sent: Mutex<Vec<ContactPayload>>,
    }

    impl MockTransport {
        fn replying(reply: fn() -> anyhow::Result<ContactReply>) -> Self {
            Self {
                reply,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<ContactPayload> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, payload: &ContactPayload) -> anyhow::Result<ContactReply> {
            self.sent.lock().unwrap().push(payload.clone());
            (self.reply)()
        }
    }

    fn accepted() -> anyhow::Result<ContactReply> {
        Ok(ContactReply::Success(ContactSuccess::new(
            "sub_1714558830123_k3j9x2",
            "2024-05-01T10:20:30.123Z",
        )))
    }

    fn refused() -> anyhow::Result<ContactReply> {
        Ok(ContactReply::Failure(ContactFailure::new(
            "Internal server error. Please try again later or contact us directly.",
        )))
    }

    fn unreachable() -> anyhow::Result<ContactReply> {
        Err(anyhow::anyhow!("Failed to send request: connection refused"))
    }

    /// 7 + 3
    fn controller(reply: fn() -> anyhow::Result<ContactReply>) -> FormController<MockTransport> {
        let challenge = Challenge {
            left: 7,
            right: 3,
            operator: Operator::Add,
        };
        FormController::with_captcha(
            MockTransport::replying(reply),
            CaptchaSession::from_challenge(challenge),
        )
    }

    fn fill(form: &mut FormController<MockTransport>) {
        let fields = form.fields_mut();
        fields.name = "  Jane Doe ".to_string();
        fields.email = "jane@example.com ".to_string();
        fields.message = " I need help with my books. ".to_string();
        fields.captcha_answer = "10".to_string();
    }

    #[tokio::test]
    async fn test_successful_submission_resets_form() {
        let mut form = controller(accepted);
        fill(&mut form);
        form.fields_mut().company = "Acme".to_string();

        let outcome = form.submit(&SubmitContext::default()).await;

        assert!(outcome.is_sent());
        let sent = form.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].name, "Jane Doe");
        assert_eq!(sent[0].email, "jane@example.com");
        assert_eq!(sent[0].message, "I need help with my books.");
        assert_eq!(sent[0].company.as_deref(), Some("Acme"));
        assert_eq!(sent[0].service, None);
        assert_eq!(sent[0].captcha_answer, 10);
        assert_eq!(sent[0].referrer, "Direct");

        assert_eq!(form.fields(), &FormFields::default());
        assert_eq!(form.button(), &SubmitButton::default());
        let message = form.message().unwrap();
        assert_eq!(message.kind, MessageKind::Success);
        assert_eq!(message.text, SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_wrong_captcha_is_never_sent() {
        let mut form = controller(accepted);
        fill(&mut form);
        form.fields_mut().captcha_answer = "eleven".to_string();

        let outcome = form.submit(&SubmitContext::default()).await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(ValidationFailure::CaptchaMismatch)
        ));
        assert!(form.transport.sent().is_empty());
        assert_eq!(
            form.message().unwrap().text,
            "Please solve the math problem correctly."
        );
        assert_eq!(form.button(), &SubmitButton::default());
    }

    #[tokio::test]
    async fn test_field_rules_run_before_captcha() {
        let mut form = controller(accepted);
        fill(&mut form);
        form.fields_mut().email = "bad-email".to_string();
        form.fields_mut().captcha_answer = String::new();

        let outcome = form.submit(&SubmitContext::default()).await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(ValidationFailure::InvalidEmail)
        ));
        assert_eq!(form.message().unwrap().kind, MessageKind::Error);
    }

    #[tokio::test]
    async fn test_server_refusal_keeps_fields() {
        for reply in [refused, unreachable] {
            let mut form = controller(reply);
            fill(&mut form);
            let question = form.captcha_question();

            let outcome = form.submit(&SubmitContext::default()).await;

            assert!(matches!(outcome, SubmitOutcome::Failed(_)));
            assert_eq!(form.fields().name, "  Jane Doe ");
            assert_eq!(form.captcha_question(), question);
            assert_eq!(form.message().unwrap().text, FAILURE_MESSAGE);
            assert_eq!(form.button(), &SubmitButton::default());
        }
    }

    #[test]
    fn test_prepare_enters_sending_state() {
        let mut form = controller(accepted);
        fill(&mut form);

        let payload = form
            .prepare(&SubmitContext {
                user_agent: "Mozilla/5.0".to_string(),
                referrer: "https://example.com/".to_string(),
            })
            .unwrap();

        assert_eq!(payload.user_agent, "Mozilla/5.0");
        assert_eq!(payload.referrer, "https://example.com/");
        assert!(payload.timestamp.ends_with('Z'));
        assert_eq!(
            form.button(),
            &SubmitButton {
                disabled: true,
                label: SENDING_LABEL
            }
        );
        let message = form.message().unwrap();
        assert_eq!(message.kind, MessageKind::Loading);
        assert_eq!(message.text, SENDING_MESSAGE);
    }

    #[test]
    fn test_success_message_hides_after_five_seconds() {
        let mut form = controller(accepted);
        let _ = form.complete(accepted());
        let shown_at = form.message.as_ref().unwrap().shown_at;

        assert!(form.message_at(shown_at + Duration::from_secs(4)).is_some());
        assert!(form.message_at(shown_at + SUCCESS_AUTO_HIDE).is_none());

        let _ = form.complete(refused());
        let shown_at = form.message.as_ref().unwrap().shown_at;
        assert!(form.message_at(shown_at + Duration::from_secs(60)).is_some());
    }

    #[test]
    fn test_escape_dismisses_message() {
        let mut form = controller(refused);
        let _ = form.complete(refused());
        form.handle_key("Enter");
        assert!(form.message().is_some());

        form.handle_key("Escape");
        assert!(form.message().is_none());
    }

    #[test]
    fn test_select_service_fills_only_empty_message() {
        let mut form = controller(accepted);

        assert!(form.select_service("cfo"));
        assert!(form.fields().message.starts_with("I'd like to learn more"));
        assert_eq!(form.fields().service, "cfo");

        assert!(!form.select_service("premium"));
        assert!(form.fields().message.starts_with("I'd like to learn more"));

        form.fields_mut().message = "   ".to_string();
        assert!(!form.select_service("other"));
        assert!(form.select_service("bookkeeping"));
    }
}
