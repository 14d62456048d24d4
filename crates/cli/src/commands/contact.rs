//! Contact form command.
//!
//! # Usage
//!
//! ```bash
//! shopfront contact --name Jane --email jane@example.com \
//!     --subject "Sizing" --message "Do the boots run small?"
//! ```

use shopfront_cart::ContactForm;
use tracing::info;

/// Validate a contact submission and print the acknowledgement.
///
/// # Errors
///
/// Returns the `ContactError` describing the first invalid field.
pub fn submit(
    name: String,
    email: String,
    subject: String,
    message: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = ContactForm {
        name,
        email,
        subject,
        message,
    };

    let submission = form.validate()?;
    info!(email = %submission.email, subject = %submission.subject, "Contact form accepted");
    println!("{}", submission.acknowledgement());
    Ok(())
}
