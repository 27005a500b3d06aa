//! Client side of the contact form.
//!
//! [`FormController`] owns one form's state (fields, CAPTCHA session, submit
//! button, status message) and sends accepted input through a [`Transport`].
//! [`ContactClient`] is the HTTP transport; the `ui` module holds the page
//! helpers that do not touch the form.

pub mod form;
pub mod transport;
pub mod ui;

pub use form::{
    FormController, FormFields, FormMessage, MessageKind, SubmitButton, SubmitContext,
    SubmitOutcome,
};
pub use transport::{ContactClient, Transport};
