mod abandoned_checkout;
mod booking_confirmation;
mod cancel;
mod completed_reservation;
mod pricing_table;
mod quote;
mod reject;
mod reservation_details;
mod send;

use crate::helper_model::{MailerError, RenderedEmail};
use crate::methods;
use warp::http::StatusCode;
use warp::{Filter, Rejection};

pub fn api_v1_email() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("email")
        .and(
            pricing_table::main()
                .or(quote::main())
                .or(reservation_details::main())
                .or(booking_confirmation::main())
                .or(completed_reservation::main())
                .or(abandoned_checkout::main())
                .or(cancel::main())
                .or(reject::main())
                .or(send::main()),
        )
        .and(warp::path::end())
}

/// Runs one render inside its own span and turns the outcome into a reply.
fn render_email<F>(email: &'static str, render: F) -> Result<(warp::reply::Response,), Rejection>
where
    F: FnOnce() -> Result<RenderedEmail, MailerError>,
{
    let render_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("render", email, %render_id);
    let result = span.in_scope(|| {
        let result = render();
        if let Ok(rendered) = &result {
            tracing::info!(warnings = rendered.warnings.len(), "email rendered");
        }
        result
    });
    match result {
        Ok(rendered) => methods::standard_replies::response_with_obj(rendered, StatusCode::OK),
        Err(err) => methods::standard_replies::render_error_response(email, err),
    }
}
