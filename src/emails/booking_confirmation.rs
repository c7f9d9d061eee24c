use crate::emails::{self, LabelledValue, OrgHeader, PriceSummaryBlock, Stop, TransactionRow};
use crate::helper_model::{BookingConfirmationRequest, MailerError, RenderedEmail};
use crate::methods::pricing_table::build_pricing_table;
use crate::methods::formatters::{self, Link};
use crate::methods::timestamps;
use crate::model::{DriverVerification, OrganizationSettings, PriceSummary, Store};
use askama::Template;
use chrono_tz::Tz;
use rust_decimal::Decimal;

const REQUEST_RECEIVED: &str =
    "Your reservation request has been submitted for review. You will be notified when the request is approved!";
const CONFIRMED: &str = "Your reservation is confirmed!";

#[derive(Template)]
#[template(path = "booking_confirmation.html")]
struct BookingConfirmationHtml {
    header: String,
    title: &'static str,
    headline: &'static str,
    customer_name: String,
    reservation_number: String,
    rv_name: String,
    unit_details: Vec<LabelledValue>,
    primary_driver: DriverLine,
    secondary_drivers: Vec<DriverLine>,
    security_deposit: String,
    mileage_policy: Option<String>,
    departure: Stop,
    arrival: Stop,
    price_summary: String,
    transactions: Vec<TransactionRow>,
    contact: Contact,
    organization_name: String,
}

struct DriverLine {
    name: String,
    status: &'static str,
}

impl DriverLine {
    fn new(name: String, verification: Option<&DriverVerification>) -> DriverLine {
        let verified = verification.is_some_and(DriverVerification::is_verified);
        DriverLine {
            name,
            status: if verified { "Verified" } else { "Not Verified" },
        }
    }

    fn text(&self) -> String {
        format!("{} - {}", self.name, self.status)
    }
}

struct Contact {
    name: String,
    host: Option<Link>,
    phone: Option<Link>,
}

impl Contact {
    fn new(store: Option<&Store>, organization_email: Option<&str>) -> Contact {
        Contact {
            name: store
                .and_then(|s| s.contact_name.clone())
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| String::from("your host")),
            host: formatters::email_link(organization_email),
            phone: formatters::phone_link(store.and_then(|s| s.contact_phone.as_deref())),
        }
    }

    fn text(&self) -> String {
        let mut lines = vec![format!(
            "Contact {} to coordinate arrival time and key exchange",
            self.name
        )];
        let reach: Vec<String> = self
            .host
            .iter()
            .map(|l| format!("Message host: {}", l.label))
            .chain(self.phone.iter().map(|l| l.label.clone()))
            .collect();
        if !reach.is_empty() {
            lines.push(reach.join(" · "));
        }
        lines.join("\n")
    }
}

/// The primary driver falls back to the booking name; secondary drivers pair
/// with verifications by position.
fn drivers(req: &BookingConfirmationRequest) -> (DriverLine, Vec<DriverLine>) {
    let reservation = &req.reservation;
    let primary_name = reservation
        .primary_driver_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| super::reservation_details::customer_name(reservation));
    let primary = DriverLine::new(primary_name, req.primary_driver_verification.as_ref());
    let secondary = reservation
        .secondary_drivers
        .iter()
        .enumerate()
        .map(|(i, driver)| {
            let verification = req.additional_driver_verifications.get(i).and_then(Option::as_ref);
            DriverLine::new(driver.full_name(), verification)
        })
        .collect();
    (primary, secondary)
}

/// `$0.30 per mile`, from the mileage fee spread over the billable distance.
fn mileage_policy(summary: &PriceSummary, settings: Option<&OrganizationSettings>) -> Option<String> {
    let fee = summary.mileage_fee.filter(|f| *f > Decimal::ZERO)?;
    let distance = summary
        .billable_miles
        .filter(|d| !d.is_zero())
        .unwrap_or(Decimal::ONE);
    let per_unit = fee.checked_div(distance)?;
    let metric = settings
        .and_then(|s| s.measurement_units.as_ref())
        .and_then(|m| m.distance.as_deref())
        == Some("km");
    Some(format!(
        "${} {}",
        formatters::format_money(per_unit),
        if metric { "per kilometer" } else { "per mile" }
    ))
}

/// `Tuesday, April 1 at 10:00 EDT`
fn day_and_time(raw: Option<&str>, tz: Tz) -> Result<String, MailerError> {
    let day = emails::format_optional_date(raw, tz, timestamps::HEADLINE_DAY, "Not set")?;
    match raw.filter(|r| !r.trim().is_empty()) {
        Some(raw) => Ok(format!(
            "{} at {}",
            day,
            emails::format_date(raw, tz, timestamps::TIME_WITH_ZONE)?
        )),
        None => Ok(day),
    }
}

pub fn render(req: &BookingConfirmationRequest) -> Result<RenderedEmail, MailerError> {
    let settings = req.organization_settings.as_ref();
    let tz = emails::timezone_of(settings)?;

    let table = build_pricing_table(&req.price_summary);
    let reservation_number = req.reservation.reservation_number.clone().unwrap_or_default();
    let reservation_id = req
        .price_summary
        .reservation_id
        .as_deref()
        .or(Some(reservation_number.as_str()));
    emails::report_warnings("booking_confirmation", reservation_id, &table.warnings);

    let check_in = day_and_time(req.reservation.check_in_date.as_deref(), tz)?;
    let check_out = day_and_time(req.reservation.check_out_date.as_deref(), tz)?;
    let (labels, address) = match req.reservation.delivery_location.as_ref() {
        Some(location) => (
            ("Delivery", "Pickup"),
            formatters::two_line_delivery_address(location.formatted_address.as_deref()),
        ),
        None => (
            ("Departure", "Return"),
            req.store
                .as_ref()
                .map(|s| s.two_line_address())
                .unwrap_or_else(|| String::from(formatters::ADDRESS_UNAVAILABLE)),
        ),
    };
    let mut departure = Stop::new(labels.0, check_in).at(&address);
    let mut arrival = Stop::new(labels.1, check_out).at(&address);
    if address != formatters::ADDRESS_UNAVAILABLE {
        departure = departure.with_map(&address);
        arrival = arrival.with_map(&address);
    }

    let (title, headline, subject) = if req.is_request_only {
        ("Reservation Request", REQUEST_RECEIVED, format!("Reservation Request #{}", reservation_number))
    } else {
        ("Reservation Confirmation", CONFIRMED, format!("Reservation Confirmation #{}", reservation_number))
    };

    let customer_name = super::reservation_details::customer_name(&req.reservation);
    let rv = req.reservation.rvs.as_ref();
    let transactions = emails::transaction_rows(&req.transactions, tz);
    let (primary_driver, secondary_drivers) = drivers(req);
    let security_deposit =
        "$".to_owned() + &formatters::format_optional_money(req.price_summary.security_deposit);
    let policy_line = mileage_policy(&req.price_summary, settings);
    let contact = Contact::new(req.store.as_ref(), req.organization.email.as_deref());

    let mut customer_text = format!("Customer Information\nPrimary Driver: {}", primary_driver.text());
    if !secondary_drivers.is_empty() {
        customer_text.push_str("\nSecondary Drivers:");
        for driver in &secondary_drivers {
            customer_text = customer_text + "\n" + &driver.text();
        }
    }
    let mut important_text = format!("Important Information\nSecurity Deposit: {}", security_deposit);
    if let Some(policy) = &policy_line {
        important_text = important_text + "\nMileage Policy: " + policy;
    }

    let text = [
        format!("{}\n{}, reservation #{}", headline, customer_name, reservation_number),
        customer_text,
        important_text,
        format!(
            "{}: {}\n{}\n{}: {}",
            departure.label, departure.when, address, arrival.label, arrival.when
        ),
        emails::price_summary_text(&table),
        emails::payments_text(&req.price_summary),
        emails::transactions_text(&transactions),
        format!("Contact\n{}", contact.text()),
        format!(
            "Thank you for choosing {}. We look forward to serving you!",
            req.organization.name
        ),
    ]
    .join("\n\n");

    let html = BookingConfirmationHtml {
        header: OrgHeader::new(&req.organization).render()?,
        title,
        headline,
        customer_name,
        reservation_number,
        rv_name: emails::rv_name(rv),
        unit_details: emails::unit_details(rv, settings),
        primary_driver,
        secondary_drivers,
        security_deposit,
        mileage_policy: policy_line,
        departure,
        arrival,
        price_summary: PriceSummaryBlock::new(&table)
            .with_payments(&req.price_summary)
            .render()?,
        transactions,
        contact,
        organization_name: req.organization.name.clone(),
    }
    .render()?;

    Ok(RenderedEmail {
        subject,
        html,
        text,
        warnings: table.warnings,
    })
}
