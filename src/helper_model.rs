use rust_decimal::Decimal;
use serde_derive::{Deserialize, Serialize};
use crate::model;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
}

/// Data-quality findings raised while pricing a reservation. None of them
/// stops a render; they travel beside the output and get logged.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingWarning {
    #[error("mileage fee {fee} has neither a manual flag nor an applied mileage rule; mileage row omitted")]
    MileageWithoutRule { fee: Decimal },
    #[error("generator hours did not change ({hours}); hourly generator rate unavailable")]
    GeneratorZeroHours { hours: Decimal },
    #[error("generator return hours {returned} are below departure hours {departed}")]
    GeneratorHoursReversed { departed: Decimal, returned: Decimal },
    #[error("grand total {grand_total} differs from subtotal {subtotal} plus taxes {taxes}")]
    TotalMismatch {
        subtotal: Decimal,
        taxes: Decimal,
        grand_total: Decimal,
    },
    #[error("{field} is out of range for decimal arithmetic; supplied values shown as-is")]
    AmountOverflow { field: String },
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("organization settings are required for this email")]
    MissingOrganizationSettings,
    #[error("unknown timezone {0}")]
    InvalidTimezone(String),
    #[error("unreadable timestamp {0}")]
    InvalidTimestamp(String),
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
    #[error("email provider is not configured")]
    ProviderNotConfigured,
    #[error("email provider rejected the message: {0}")]
    Provider(String),
}

#[derive(Serialize, Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
    pub warnings: Vec<PricingWarning>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DateRange {
    #[serde(alias = "checkIn")]
    pub check_in: String,
    #[serde(alias = "checkOut")]
    pub check_out: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct QuoteEmailRequest {
    pub rv_details: Option<model::RvDetails>,
    pub customer_first_name: String,
    #[serde(default)]
    pub customer_last_name: String,
    pub dates: DateRange,
    pub price_summary: model::PriceSummary,
    #[serde(default)]
    pub email_text: String,
    pub checkout_url: String,
    pub reservation_id: Option<String>,
    pub organization_settings: Option<model::OrganizationSettings>,
    pub organization: model::Organization,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReservationDetailsRequest {
    pub reservation: model::Reservation,
    pub price_summary: model::PriceSummary,
    pub organization: model::Organization,
    pub organization_settings: Option<model::OrganizationSettings>,
    #[serde(default)]
    pub transactions: Vec<model::Transaction>,
    #[serde(default)]
    pub stores: Vec<model::Store>,
    pub email_text: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BookingConfirmationRequest {
    pub reservation: model::Reservation,
    pub price_summary: model::PriceSummary,
    pub organization: model::Organization,
    pub store: Option<model::Store>,
    pub organization_settings: Option<model::OrganizationSettings>,
    #[serde(default)]
    pub is_request_only: bool,
    #[serde(default)]
    pub transactions: Vec<model::Transaction>,
    #[serde(alias = "primaryDriverVerification")]
    pub primary_driver_verification: Option<model::DriverVerification>,
    /// Index-aligned with `reservation.secondary_drivers`.
    #[serde(default, alias = "additionalDriverVerifications")]
    pub additional_driver_verifications: Vec<Option<model::DriverVerification>>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CompletedReservationRequest {
    pub rv_details: Option<model::RvDetails>,
    pub dates: DateRange,
    pub price_summary: model::PriceSummary,
    #[serde(default)]
    pub email_text: String,
    pub organization_settings: Option<model::OrganizationSettings>,
    pub organization: model::Organization,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AbandonedCheckoutRequest {
    pub customer_name: Option<String>,
    pub customer_first_name: String,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub rv_name: Option<String>,
    pub rv_details: Option<model::RvDetails>,
    pub resume_url: String,
    pub organization_settings: Option<model::OrganizationSettings>,
    pub organization: model::Organization,
    #[serde(default)]
    pub is_second_reminder: bool,
    pub price_summary: Option<model::PriceSummary>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NoticeEmailRequest {
    pub customer_name: String,
    pub reservation_number: String,
    pub custom_message: Option<String>,
    pub organization: Option<model::Organization>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SendEmailRequest {
    pub to_email: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: Option<String>,
    pub from_name: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct PricingTableResponse {
    pub rows: Vec<crate::methods::pricing_table::DisplayRow>,
    pub taxes: Vec<model::TaxLine>,
    pub warnings: Vec<PricingWarning>,
}
