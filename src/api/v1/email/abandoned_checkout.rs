use crate::emails;
use crate::helper_model::AbandonedCheckoutRequest;
use crate::methods;
use warp::http::Method;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("abandoned-checkout")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: AbandonedCheckoutRequest| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            super::render_email("abandoned_checkout", || emails::abandoned_checkout::render(&body))
        })
}
