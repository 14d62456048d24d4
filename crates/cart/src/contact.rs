//! Contact form validation.

use serde::{Deserialize, Serialize};
use shopfront_core::{Email, EmailError, Notice};
use thiserror::Error;

/// Contact form fields as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A contact message that passed validation. All fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
}

/// Why a contact form was rejected. Display text is shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail(#[source] EmailError),
}

impl ContactError {
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

impl ContactForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingFields` if any field is blank after
    /// trimming, or `ContactError::InvalidEmail` if the email does not look
    /// like `name@domain.tld`.
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let subject = self.subject.trim();
        let message = self.message.trim();

        if [name, email, subject, message].iter().any(|f| f.is_empty()) {
            return Err(ContactError::MissingFields);
        }

        let email = Email::parse(email).map_err(ContactError::InvalidEmail)?;

        Ok(ContactSubmission {
            name: name.to_owned(),
            email,
            subject: subject.to_owned(),
            message: message.to_owned(),
        })
    }
}

impl ContactSubmission {
    /// Thank-you notice shown after a successful submission.
    #[must_use]
    pub fn acknowledgement(&self) -> Notice {
        Notice::success(format!(
            "Thank you, {}! We'll get back to you soon.",
            self.name
        ))
    }
}
