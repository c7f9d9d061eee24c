use crate::helper_model;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

type ReplyResult = Result<(warp::reply::Response,), Rejection>;

fn error_reply(status: StatusCode, title: &str, message: &str) -> ReplyResult {
    let msg = helper_model::ErrorResponse {
        title: title.to_string(),
        message: message.to_string(),
    };
    response_with_obj(msg, status)
}

pub fn bad_request(err_msg: &str) -> ReplyResult {
    error_reply(StatusCode::BAD_REQUEST, "Bad Request", err_msg)
}

pub fn internal_server_error_response(msg: String) -> ReplyResult {
    tracing::error!(detail = %msg, "internal server error");
    error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        "Please try again later. If the issue persists, contact the site administrator.",
    )
}

pub fn method_not_allowed_response() -> ReplyResult {
    error_reply(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        "Email endpoints only accept POST requests.",
    )
}

/// SendGrid refused the message or is not configured.
pub fn provider_unavailable(err_msg: &str) -> ReplyResult {
    error_reply(StatusCode::BAD_GATEWAY, "Email Not Sent", err_msg)
}

pub fn response_with_obj<T>(obj: T, status_code: StatusCode) -> ReplyResult
where
    T: serde::Serialize,
{
    Ok((warp::reply::with_status(warp::reply::json(&obj), status_code).into_response(),))
}

/// Maps a render failure onto the matching reply.
pub fn render_error_response(
    endpoint: &str,
    err: helper_model::MailerError,
) -> ReplyResult {
    use helper_model::MailerError;
    match err {
        MailerError::MissingOrganizationSettings
        | MailerError::InvalidTimezone(_)
        | MailerError::InvalidTimestamp(_) => bad_request(&err.to_string()),
        MailerError::ProviderNotConfigured | MailerError::Provider(_) => {
            provider_unavailable(&err.to_string())
        }
        MailerError::Template(_) => {
            internal_server_error_response(format!("{}: {}", endpoint, err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helper_model::MailerError;

    fn status_of(reply: ReplyResult) -> StatusCode {
        match reply {
            Ok((response,)) => response.status(),
            Err(_) => panic!("reply was rejected"),
        }
    }

    #[test]
    fn render_errors_map_to_statuses() {
        assert_eq!(
            status_of(render_error_response("email/quote", MailerError::MissingOrganizationSettings)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(render_error_response("email/send", MailerError::Provider(String::from("status 401")))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(render_error_response("email/send", MailerError::ProviderNotConfigured)),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_of(method_not_allowed_response()), StatusCode::METHOD_NOT_ALLOWED);
    }
}
