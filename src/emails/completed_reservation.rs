use crate::config::CONFIG;
use crate::emails::{self, OrgHeader, PriceSummaryBlock, Stop};
use crate::helper_model::{CompletedReservationRequest, MailerError, RenderedEmail};
use crate::methods::pricing_table::build_pricing_table;
use crate::methods::timestamps;
use askama::Template;

#[derive(Template)]
#[template(path = "completed_reservation.html")]
struct CompletedReservationHtml {
    header: String,
    rv_name: String,
    rv_image_url: String,
    departure: Stop,
    arrival: Stop,
    price_summary: String,
    notes: Vec<String>,
    pdf_url: Option<String>,
}

pub fn receipt_url(base_url: &str, reservation_id: &str) -> String {
    format!(
        "{}/public/reservations/{}/view-pdf",
        base_url.trim_end_matches('/'),
        urlencoding::encode(reservation_id)
    )
}

pub fn render(req: &CompletedReservationRequest) -> Result<RenderedEmail, MailerError> {
    render_with_base(req, &CONFIG.receipt_base_url)
}

pub fn render_with_base(req: &CompletedReservationRequest, receipt_base_url: &str) -> Result<RenderedEmail, MailerError> {
    let tz = emails::timezone_of(req.organization_settings.as_ref())?;

    let table = build_pricing_table(&req.price_summary);
    let reservation_id = req.price_summary.reservation_id.as_deref().filter(|id| !id.is_empty());
    emails::report_warnings("completed_reservation", reservation_id, &table.warnings);

    let rv_name = emails::rv_name(req.rv_details.as_ref());
    let check_in = emails::format_optional_date(Some(req.dates.check_in.as_str()), tz, timestamps::DATE_ONLY, "Not set")?;
    let check_out = emails::format_optional_date(Some(req.dates.check_out.as_str()), tz, timestamps::DATE_ONLY, "Not set")?;
    let pdf_url = reservation_id.map(|id| receipt_url(receipt_base_url, id));

    let mut sections = vec![
        format!(
            "Congratulations, you have reserved the {} from {} to {}.",
            rv_name, check_in, check_out
        ),
        emails::price_summary_text(&table),
    ];
    if !req.email_text.trim().is_empty() {
        sections.push(req.email_text.trim().to_string());
    }
    if let Some(url) = &pdf_url {
        sections.push(format!("Download PDF Receipt: {}", url));
    }

    let html = CompletedReservationHtml {
        header: OrgHeader::new(&req.organization).render()?,
        rv_name,
        rv_image_url: emails::rv_image_url(req.rv_details.as_ref()),
        departure: Stop::new("Departure", check_in),
        arrival: Stop::new("Return", check_out),
        price_summary: PriceSummaryBlock::new(&table).render()?,
        notes: emails::text_lines(&req.email_text),
        pdf_url,
    }
    .render()?;

    Ok(RenderedEmail {
        subject: String::from("Your Reservation is Confirmed!"),
        html,
        text: sections.join("\n\n"),
        warnings: table.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emails::fixtures;
    use crate::helper_model::DateRange;

    fn request() -> CompletedReservationRequest {
        CompletedReservationRequest {
            rv_details: Some(fixtures::adventure_camper()),
            dates: DateRange {
                check_in: String::from("2025-04-01T14:00:00Z"),
                check_out: String::from("2025-04-05T11:00:00Z"),
            },
            price_summary: fixtures::four_night_summary(),
            email_text: String::from("See you soon"),
            organization_settings: Some(fixtures::eastern()),
            organization: fixtures::organization(),
        }
    }

    #[test]
    fn congratulations_with_receipt_link() {
        let email = render_with_base(&request(), "https://rvrentals.com/").unwrap();
        assert!(email.html.contains("Congratulations, you have reserved the Adventure Camper"));
        assert!(email.html.contains("Apr 01, 2025"));
        assert!(email.html.contains("Apr 05, 2025"));
        assert!(email.html.contains("Download PDF Receipt"));
        assert!(email.html.contains("res_123"));
        assert!(email.html.contains("view-pdf"));
        assert!(email.text.ends_with("Download PDF Receipt: https://rvrentals.com/public/reservations/res_123/view-pdf"));
    }

    #[test]
    fn no_receipt_without_reservation_id() {
        let mut req = request();
        req.price_summary.reservation_id = None;
        let email = render_with_base(&req, "https://rvrentals.com").unwrap();
        assert!(!email.html.contains("Download PDF Receipt"));
    }

    #[test]
    fn blank_dates_read_not_set() {
        let mut req = request();
        req.dates.check_out = String::new();
        let email = render_with_base(&req, "https://rvrentals.com").unwrap();
        assert!(email.html.contains("to Not set"));
    }
}
