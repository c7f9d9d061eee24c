use crate::emails;
use crate::helper_model::BookingConfirmationRequest;
use crate::methods;
use warp::http::Method;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("booking-confirmation")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: BookingConfirmationRequest| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            super::render_email("booking_confirmation", || emails::booking_confirmation::render(&body))
        })
}
