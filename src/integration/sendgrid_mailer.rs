use crate::config::CONFIG;
use crate::helper_model::MailerError;
use sendgrid::v3::*;

/// Shown by clients that cannot display the HTML part.
pub const PLAIN_TEXT_FALLBACK: &str =
    "Please view this email in an HTML-capable email client to see your reservation details.";

pub async fn send_email(
    from_name: Option<&str>,
    to: Email,
    subject: &str,
    html: &str,
    text: Option<&str>,
    reply_to: Option<Email>,
) -> Result<(), MailerError> {
    let Some(api_key) = CONFIG.sendgrid_api_key.clone() else {
        return Err(MailerError::ProviderNotConfigured);
    };
    let p = Personalization::new(to);

    let from = make_email_obj(&CONFIG.from_address, from_name.unwrap_or(&CONFIG.from_name));
    // text/plain has to precede text/html for SendGrid
    let mut m = Message::new(from)
        .set_subject(subject)
        .add_content(
            Content::new()
                .set_content_type("text/plain")
                .set_value(text.unwrap_or(PLAIN_TEXT_FALLBACK)),
        )
        .add_content(Content::new().set_content_type("text/html").set_value(html))
        .add_personalization(p);
    if let Some(reply_to) = reply_to {
        m = m.set_reply_to(reply_to);
    }

    let sender = Sender::new(api_key, None);
    let resp = sender
        .send(&m)
        .await
        .map_err(|err| MailerError::Provider(err.to_string()))?;
    if !resp.status().is_success() {
        tracing::warn!(status = %resp.status(), subject, "sendgrid did not accept the message");
        return Err(MailerError::Provider(format!("status {}", resp.status())));
    }
    tracing::info!(subject, "email handed to sendgrid");
    Ok(())
}

pub fn make_email_obj(addr: &str, name: &str) -> Email {
    Email::new(addr).set_name(name)
}
