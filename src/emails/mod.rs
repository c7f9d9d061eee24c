pub mod abandoned_checkout;
pub mod booking_confirmation;
pub mod completed_reservation;
pub mod notice;
pub mod quote;
pub mod reservation_details;

use crate::config::CONFIG;
use crate::helper_model::{MailerError, PricingWarning};
use crate::methods::formatters::{self, Link};
use crate::methods::pricing_table::{self, DisplayRow, PricingTable, RowKind};
use crate::methods::{tax_aggregator, timestamps};
use crate::model::{Organization, OrganizationSettings, PriceSummary, RvDetails, Transaction};
use askama::Template;
use chrono_tz::Tz;

pub const NO_TRANSACTIONS: &str = "No transactions available";

#[derive(Template)]
#[template(path = "partials/org_header.html")]
pub struct OrgHeader {
    name: String,
    logo_url: Option<String>,
    phone: Option<Link>,
    email: Option<Link>,
    website: Option<Link>,
}

impl OrgHeader {
    pub fn new(organization: &Organization) -> OrgHeader {
        OrgHeader {
            name: organization.name.clone(),
            logo_url: organization.logo_url.clone().filter(|u| !u.is_empty()),
            phone: formatters::phone_link(organization.phone_number.as_deref()),
            email: formatters::email_link(organization.email.as_deref()),
            website: formatters::website_link(organization.website_url.as_deref()),
        }
    }
}

pub struct LabelledValue {
    pub label: String,
    pub value: String,
}

impl LabelledValue {
    pub fn new(label: &str, value: String) -> LabelledValue {
        LabelledValue {
            label: label.to_string(),
            value,
        }
    }
}

/// One end of a rental: departure or delivery, return or pickup.
pub struct Stop {
    pub label: &'static str,
    pub when: String,
    pub address_lines: Vec<String>,
    pub map_url: Option<String>,
}

impl Stop {
    pub fn new(label: &'static str, when: String) -> Stop {
        Stop {
            label,
            when,
            address_lines: Vec::new(),
            map_url: None,
        }
    }

    pub fn at(mut self, address: &str) -> Stop {
        self.address_lines = address
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    pub fn with_map(mut self, address: &str) -> Stop {
        self.map_url = Some(formatters::google_maps_link(&address.replace('\n', ", ")));
        self
    }
}

pub struct TransactionRow {
    pub date: String,
    pub description: String,
    pub method: String,
    pub amount: String,
}

#[derive(Template)]
#[template(path = "partials/price_summary.html")]
pub struct PriceSummaryBlock {
    fees: Vec<DisplayRow>,
    subtotal: String,
    taxes: Vec<DisplayRow>,
    total: String,
    payments: Vec<LabelledValue>,
}

impl PriceSummaryBlock {
    pub fn new(table: &PricingTable) -> PriceSummaryBlock {
        let rows = table.display_rows();
        let pick = |kind: RowKind| -> Vec<DisplayRow> {
            rows.iter().filter(|r| r.kind == kind).cloned().collect()
        };
        PriceSummaryBlock {
            fees: pick(RowKind::Fee),
            subtotal: "$".to_owned() + &formatters::format_money(table.subtotal()),
            taxes: pick(RowKind::Tax),
            total: "$".to_owned() + &formatters::format_money(table.grand_total()),
            payments: Vec::new(),
        }
    }

    /// Adds the Paid / Balance Due / Security Deposit lines shown once a
    /// reservation has been booked.
    pub fn with_payments(mut self, summary: &PriceSummary) -> PriceSummaryBlock {
        self.payments = payment_lines(summary);
        self
    }
}

fn payment_lines(summary: &PriceSummary) -> Vec<LabelledValue> {
    let deposit_status = summary
        .security_deposit_status
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| String::from("N/A"));
    vec![
        LabelledValue::new(
            "Paid",
            "$".to_owned() + &formatters::format_optional_money(summary.amount_paid),
        ),
        LabelledValue::new(
            "Balance Due",
            "$".to_owned() + &formatters::format_optional_money(summary.balance_due),
        ),
        LabelledValue::new(
            "Security Deposit",
            format!(
                "${} ({})",
                formatters::format_optional_money(summary.security_deposit),
                deposit_status
            ),
        ),
    ]
}

/// Plain-text rendition of a pricing table for the text/plain part.
pub fn price_summary_text(table: &PricingTable) -> String {
    let mut lines: Vec<String> = table
        .fee_rows()
        .into_iter()
        .map(|row| {
            format!(
                "{}: {} x {} = {}",
                row.description,
                pricing_table::quantity_display(row),
                pricing_table::unit_amount_display(row),
                pricing_table::line_total_display(row)
            )
        })
        .collect();
    lines.push(format!("Subtotal: ${}", formatters::format_money(table.subtotal())));
    lines.extend(table.tax_lines().into_iter().map(tax_aggregator::display_line));
    lines.push(format!("Total: ${}", formatters::format_money(table.grand_total())));
    lines.join("\n")
}

pub fn payments_text(summary: &PriceSummary) -> String {
    payment_lines(summary)
        .iter()
        .map(|p| format!("{}: {}", p.label, p.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Transactions whose timestamp cannot be read are left out.
pub fn transaction_rows(transactions: &[Transaction], tz: Tz) -> Vec<TransactionRow> {
    transactions
        .iter()
        .filter_map(|t| {
            let created_at = timestamps::parse_utc(t.created_at.as_deref()?).ok()?;
            Some(TransactionRow {
                date: timestamps::format_utc_in_timezone(created_at, tz, timestamps::DATE_ONLY),
                description: t.description.clone().unwrap_or_default(),
                method: t.method.clone().unwrap_or_default(),
                amount: "$".to_owned() + &formatters::format_optional_money(t.amount),
            })
        })
        .collect()
}

pub fn transactions_text(rows: &[TransactionRow]) -> String {
    if rows.is_empty() {
        return String::from(NO_TRANSACTIONS);
    }
    rows.iter()
        .map(|r| format!("{} {} ({}) {}", r.date, r.description, r.method, r.amount))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Year, length and height arrive as numbers or strings.
pub fn value_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn unit_details(rv: Option<&RvDetails>, settings: Option<&OrganizationSettings>) -> Vec<LabelledValue> {
    let default = RvDetails::default();
    let rv = rv.unwrap_or(&default);
    let length_unit = settings
        .and_then(|s| s.measurement_units.as_ref())
        .and_then(|m| m.length.clone())
        .unwrap_or_default();
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let measure = |v: &Option<serde_json::Value>| match value_text(v.as_ref()) {
        value if value.is_empty() => value,
        value => format!("{} {}", value, length_unit).trim().to_string(),
    };
    vec![
        LabelledValue::new("Unit Name", text(&rv.name)),
        LabelledValue::new("Unit ID", text(&rv.unit_number)),
        LabelledValue::new("Year", value_text(rv.year.as_ref())),
        LabelledValue::new("Make", text(&rv.make)),
        LabelledValue::new("Model", text(&rv.model)),
        LabelledValue::new("Class", text(&rv.class)),
        LabelledValue::new("Length", measure(&rv.length)),
        LabelledValue::new("Height", measure(&rv.height)),
        LabelledValue::new("VIN", text(&rv.vin)),
        LabelledValue::new(
            "License Plate",
            format!("{} ({})", text(&rv.license_plate), text(&rv.state)),
        ),
    ]
}

pub fn rv_name(details: Option<&RvDetails>) -> String {
    details
        .and_then(|d| d.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| String::from("RV"))
}

pub fn rv_image_url(details: Option<&RvDetails>) -> String {
    details
        .and_then(|d| d.primary_image_url.clone())
        .unwrap_or_default()
}

pub fn timezone_of(settings: Option<&OrganizationSettings>) -> Result<Tz, MailerError> {
    let name = settings
        .and_then(|s| s.timezone.clone())
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| CONFIG.default_timezone.clone());
    timestamps::parse_timezone(&name).map_err(|_| MailerError::InvalidTimezone(name))
}

pub fn format_date(raw: &str, tz: Tz, fmt: &str) -> Result<String, MailerError> {
    timestamps::format_in_timezone(raw, tz, fmt).map_err(|_| MailerError::InvalidTimestamp(raw.to_string()))
}

pub fn format_optional_date(raw: Option<&str>, tz: Tz, fmt: &str, placeholder: &str) -> Result<String, MailerError> {
    timestamps::format_optional(raw, tz, fmt, placeholder)
        .map_err(|_| MailerError::InvalidTimestamp(raw.unwrap_or_default().to_string()))
}

/// Free text from staff keeps its line breaks; the template puts a `<br>`
/// between the lines.
pub fn text_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.lines().map(str::to_string).collect()
}

pub fn report_warnings(email: &str, reservation_id: Option<&str>, warnings: &[PricingWarning]) {
    for warning in warnings {
        tracing::warn!(
            email,
            reservation_id = reservation_id.unwrap_or("unknown"),
            "{}",
            warning
        );
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{Organization, OrganizationSettings, PriceSummary, RvDetails, SelectedUnit, TaxLine, TaxType};
    use rust_decimal::Decimal;

    pub fn organization() -> Organization {
        Organization {
            name: String::from("RV Rentals Inc"),
            logo_url: None,
            phone_number: Some(String::from("+1-555-123-4567")),
            email: Some(String::from("bookings@rvrentals.com")),
            website_url: Some(String::from("https://rvrentals.com/")),
        }
    }

    pub fn eastern() -> OrganizationSettings {
        OrganizationSettings {
            timezone: Some(String::from("America/New_York")),
            ..Default::default()
        }
    }

    pub fn adventure_camper() -> RvDetails {
        RvDetails {
            name: Some(String::from("Adventure Camper")),
            primary_image_url: Some(String::from("https://cdn.rvrentals.com/camper.png")),
            ..Default::default()
        }
    }

    pub fn four_night_summary() -> PriceSummary {
        PriceSummary {
            reservation_id: Some(String::from("res_123")),
            rental_fee: Some(Decimal::from(500)),
            charge_periods: Some(4),
            selected_unit: Some(SelectedUnit {
                name: Some(String::from("Adventure Camper")),
                cost_per_period: Some(Decimal::from(125)),
            }),
            total_before_tax: Some(Decimal::from(500)),
            tax_rate_collection: vec![TaxLine::new("State Tax", Decimal::from(6), Decimal::from(30), TaxType::Sales)],
            grand_total: Some(Decimal::from(530)),
            reservation_deposit: Some(Decimal::from(150)),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::pricing_table::build_pricing_table;
    use crate::model::{TaxLine, TaxType};
    use rust_decimal::Decimal;

    #[test]
    fn org_header_omits_missing_contacts() {
        let organization = Organization {
            name: String::from("RV Rentals Inc"),
            phone_number: Some(String::from("+1-555-123-4567")),
            ..Default::default()
        };
        let html = OrgHeader::new(&organization).render().unwrap();
        assert!(html.contains("RV Rentals Inc"));
        assert!(html.contains("tel:15551234567"));
        assert!(!html.contains("mailto:"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn price_summary_block_lists_every_line() {
        let summary = PriceSummary {
            rental_fee: Some(Decimal::from(500)),
            charge_periods: Some(4),
            total_before_tax: Some(Decimal::from(500)),
            tax_rate_collection: vec![TaxLine::new("State Tax", Decimal::from(6), Decimal::from(30), TaxType::Sales)],
            grand_total: Some(Decimal::from(530)),
            amount_paid: Some(Decimal::from(150)),
            ..Default::default()
        };
        let table = build_pricing_table(&summary);
        let html = PriceSummaryBlock::new(&table).with_payments(&summary).render().unwrap();
        assert!(html.contains("RV Rental Fee"));
        assert!(html.contains("$500.00"));
        assert!(html.contains("State Tax (6%)"));
        assert!(html.contains("$530.00"));
        assert!(html.contains("Balance Due"));
        assert!(html.contains("$0.00 (N"));

        let text = price_summary_text(&table);
        assert!(text.contains("RV Rental Fee: 4 x $0.00 = $500.00"));
        assert!(text.contains("State Tax (6%): $30.00"));
        assert!(text.ends_with("Total: $530.00"));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let settings = OrganizationSettings {
            timezone: Some(String::from("Mars/Olympus")),
            ..Default::default()
        };
        assert!(matches!(timezone_of(Some(&settings)), Err(MailerError::InvalidTimezone(_))));
    }

    #[test]
    fn unreadable_transactions_are_skipped() {
        let transactions = vec![
            Transaction {
                created_at: Some(String::from("2025-04-01T14:00:00Z")),
                description: Some(String::from("Deposit")),
                method: Some(String::from("card")),
                amount: Some(Decimal::from(150)),
            },
            Transaction {
                created_at: Some(String::from("sometime")),
                ..Default::default()
            },
            Transaction::default(),
        ];
        let rows = transaction_rows(&transactions, chrono_tz::America::New_York);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "Apr 01, 2025");
        assert_eq!(rows[0].amount, "$150.00");
        assert_eq!(transactions_text(&[]), NO_TRANSACTIONS);
    }

    #[test]
    fn unit_details_with_measurements() {
        let rv = RvDetails {
            name: Some(String::from("Adventure Camper")),
            year: Some(serde_json::json!(2021)),
            length: Some(serde_json::json!("24")),
            license_plate: Some(String::from("RV1234")),
            state: Some(String::from("UT")),
            ..Default::default()
        };
        let settings = OrganizationSettings {
            measurement_units: Some(crate::model::MeasurementUnits {
                length: Some(String::from("ft")),
                ..Default::default()
            }),
            ..Default::default()
        };
        let details = unit_details(Some(&rv), Some(&settings));
        let value = |label: &str| {
            details
                .iter()
                .find(|d| d.label == label)
                .map(|d| d.value.clone())
                .unwrap()
        };
        assert_eq!(value("Year"), "2021");
        assert_eq!(value("Length"), "24 ft");
        assert_eq!(value("Height"), "");
        assert_eq!(value("License Plate"), "RV1234 (UT)");
    }

    #[test]
    fn staff_text_is_split_into_lines() {
        assert_eq!(text_lines("Bring ID\nArrive early"), vec!["Bring ID", "Arrive early"]);
        assert!(text_lines("").is_empty());
    }
}
