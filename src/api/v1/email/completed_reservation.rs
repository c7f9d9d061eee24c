use crate::emails;
use crate::helper_model::CompletedReservationRequest;
use crate::methods;
use warp::http::Method;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("completed-reservation")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: CompletedReservationRequest| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            super::render_email("completed_reservation", || emails::completed_reservation::render(&body))
        })
}
