use crate::emails;
use crate::emails::notice::NoticeKind;
use crate::helper_model::NoticeEmailRequest;
use crate::methods;
use warp::http::Method;
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("reject")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: NoticeEmailRequest| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            super::render_email("reject", || emails::notice::render(NoticeKind::Rejection, &body))
        })
}
