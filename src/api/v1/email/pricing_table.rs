use crate::emails;
use crate::helper_model::PricingTableResponse;
use crate::methods;
use crate::methods::pricing_table::build_pricing_table;
use crate::model::PriceSummary;
use warp::http::{Method, StatusCode};
use warp::{Filter, Reply};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("pricing-table")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: PriceSummary| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            let table = build_pricing_table(&body);
            emails::report_warnings("pricing_table", body.reservation_id.as_deref(), &table.warnings);
            let msg = PricingTableResponse {
                rows: table.display_rows(),
                taxes: table.tax_lines().into_iter().cloned().collect(),
                warnings: table.warnings,
            };
            methods::standard_replies::response_with_obj(msg, StatusCode::OK)
        })
}
