use crate::helper_model::SendEmailRequest;
use crate::{integration, methods};
use regex::Regex;
use sendgrid::v3::Email;
use tracing::Instrument;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

lazy_static::lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+(?:\.[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+)+$"
    ).unwrap();
}

// RFC 5321 caps a path at 254 bytes
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("send")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: SendEmailRequest| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            if !is_valid_email(&body.to_email) {
                return methods::standard_replies::bad_request("to_email is not an email address");
            }
            if let Some(reply_to) = &body.reply_to {
                if !is_valid_email(reply_to) {
                    return methods::standard_replies::bad_request("reply_to is not an email address");
                }
            }

            let to = integration::sendgrid_mailer::make_email_obj(
                body.to_email.trim(),
                body.to_name.as_deref().unwrap_or(body.to_email.trim()),
            );
            let reply_to = body.reply_to.as_deref().map(|addr| Email::new(addr.trim()));
            let span = tracing::info_span!("send", render_id = %uuid::Uuid::new_v4());
            let result = integration::sendgrid_mailer::send_email(
                body.from_name.as_deref(),
                to,
                &body.subject,
                &body.html,
                body.text.as_deref(),
                reply_to,
            )
            .instrument(span)
            .await;
            match result {
                Ok(()) => methods::standard_replies::response_with_obj(serde_json::json!({}), StatusCode::ACCEPTED),
                Err(err) => methods::standard_replies::render_error_response("email/send", err),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_check() {
        assert!(is_valid_email("guest@example.com"));
        assert!(is_valid_email(" Guest.Name+rv@camp-site.example.org "));
        assert!(!is_valid_email("guest@localhost"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("guest"));
    }

    #[test]
    fn malformed_addresses_are_refused() {
        for addr in ["a b@ex ample.com", "x@y@z.com", "<b>@evil.com", "guest@.", "guest@a..b"] {
            assert!(!is_valid_email(addr), "{addr} accepted");
        }
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(!is_valid_email(&long));
    }
}
