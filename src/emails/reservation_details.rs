use crate::emails::{self, LabelledValue, OrgHeader, PriceSummaryBlock, Stop, TransactionRow};
use crate::helper_model::{MailerError, RenderedEmail, ReservationDetailsRequest};
use crate::methods::pricing_table::build_pricing_table;
use crate::methods::{formatters, timestamps};
use crate::model::Reservation;
use askama::Template;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

#[derive(Template)]
#[template(path = "reservation_details.html")]
struct ReservationDetailsHtml {
    header: String,
    message: Vec<String>,
    reservation_number: String,
    customer_name: String,
    rv_name: String,
    rv_image_url: String,
    departure: Stop,
    arrival: Stop,
    price_summary: String,
    transactions: Vec<TransactionRow>,
    unit_details: Vec<LabelledValue>,
    sent_at: String,
}

pub fn customer_name(reservation: &Reservation) -> String {
    format!(
        "{} {}",
        reservation.first_name.as_deref().unwrap_or_default(),
        reservation.last_name.as_deref().unwrap_or_default()
    )
    .trim()
    .to_string()
}

/// Delivery rentals show the delivery address at both ends; everything else
/// shows the pickup store.
fn stops(req: &ReservationDetailsRequest, tz: Tz) -> Result<(Stop, Stop), MailerError> {
    let reservation = &req.reservation;
    let check_in = emails::format_optional_date(reservation.check_in_date.as_deref(), tz, timestamps::DATE_TIME, "Not set")?;
    let check_out = emails::format_optional_date(reservation.check_out_date.as_deref(), tz, timestamps::DATE_TIME, "Not set")?;
    let (labels, address) = if reservation.is_delivery {
        let address = reservation
            .delivery_location
            .as_ref()
            .and_then(|l| l.formatted_address.clone())
            .unwrap_or_else(|| String::from(formatters::ADDRESS_UNAVAILABLE));
        (("Delivery", "Pickup"), address)
    } else {
        let address = req
            .stores
            .iter()
            .find(|s| s.id.is_some() && s.id == reservation.store_uuid)
            .map(|s| s.single_line_address())
            .unwrap_or_else(|| String::from(formatters::ADDRESS_UNAVAILABLE));
        (("Departure", "Return"), address)
    };
    Ok((
        Stop::new(labels.0, check_in).at(&address),
        Stop::new(labels.1, check_out).at(&address),
    ))
}

pub fn render(req: &ReservationDetailsRequest) -> Result<RenderedEmail, MailerError> {
    render_at(req, Utc::now())
}

pub fn render_at(req: &ReservationDetailsRequest, now: DateTime<Utc>) -> Result<RenderedEmail, MailerError> {
    let settings = req
        .organization_settings
        .as_ref()
        .ok_or(MailerError::MissingOrganizationSettings)?;
    let tz = emails::timezone_of(Some(settings))?;

    let table = build_pricing_table(&req.price_summary);
    let reservation_id = req
        .price_summary
        .reservation_id
        .as_deref()
        .or(req.reservation.reservation_number.as_deref());
    emails::report_warnings("reservation_details", reservation_id, &table.warnings);

    let reservation_number = req.reservation.reservation_number.clone().unwrap_or_default();
    let customer_name = customer_name(&req.reservation);
    let rv = req.reservation.rvs.as_ref();
    let (departure, arrival) = stops(req, tz)?;
    let transactions = emails::transaction_rows(&req.transactions, tz);
    let message = req.email_text.as_deref().map(emails::text_lines).unwrap_or_default();

    let text = [
        format!("Reservation #{} for {}", reservation_number, customer_name),
        format!(
            "{}: {}\n{}: {}",
            departure.label, departure.when, arrival.label, arrival.when
        ),
        emails::price_summary_text(&table),
        emails::payments_text(&req.price_summary),
        emails::transactions_text(&transactions),
    ]
    .join("\n\n");

    let html = ReservationDetailsHtml {
        header: OrgHeader::new(&req.organization).render()?,
        message,
        reservation_number: reservation_number.clone(),
        customer_name,
        rv_name: emails::rv_name(rv),
        rv_image_url: emails::rv_image_url(rv),
        departure,
        arrival,
        price_summary: PriceSummaryBlock::new(&table)
            .with_payments(&req.price_summary)
            .render()?,
        transactions,
        unit_details: emails::unit_details(rv, Some(settings)),
        sent_at: timestamps::format_utc_in_timezone(now, tz, timestamps::FULL_DATE_TIME),
    }
    .render()?;

    Ok(RenderedEmail {
        subject: format!("Reservation #{} Details", reservation_number),
        html,
        text,
        warnings: table.warnings,
    })
}
