use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

// Price data arrives from the booking platform in camelCase, organization and
// reservation records arrive in the platform's snake_case.

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceSummary {
    pub reservation_id: Option<String>,
    pub rental_fee: Option<Decimal>,
    pub charge_periods: Option<u32>,
    pub selected_unit: Option<SelectedUnit>,
    pub mileage_fee: Option<Decimal>,
    #[serde(deserialize_with = "nullable_flag")]
    pub manual_mileage_fee: bool,
    pub applied_mileage_rule: Option<MileageRule>,
    #[serde(alias = "billable_miles")]
    pub billable_miles: Option<Decimal>,
    pub generator_fee: Option<Decimal>,
    #[serde(deserialize_with = "presence_flag")]
    pub applied_generator_rule: bool,
    pub departure_generator_hours: Option<Decimal>,
    pub return_generator_hours: Option<Decimal>,
    #[serde(deserialize_with = "nullable_list")]
    pub selected_addons: Vec<Addon>,
    #[serde(deserialize_with = "nullable_list")]
    pub tax_rate_collection: Vec<TaxLine>,
    pub total_before_tax: Option<Decimal>,
    pub grand_total: Option<Decimal>,
    pub reservation_deposit: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub balance_due: Option<Decimal>,
    pub security_deposit: Option<Decimal>,
    pub security_deposit_status: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectedUnit {
    pub name: Option<String>,
    pub cost_per_period: Option<Decimal>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MileageRule {
    #[serde(deserialize_with = "nullable_list")]
    pub tiers: Vec<MileageTier>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MileageTier {
    pub rate: Option<Decimal>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Addon {
    pub name: String,
    pub quantity: Decimal,
    pub base_fee: Option<Decimal>,
    pub total_fee: Option<Decimal>,
}

/// Tax category as reported by the booking platform. Unknown categories are
/// kept verbatim so they still take part in merging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TaxType {
    Sales,
    RentalVehicle,
    #[default]
    Unspecified,
    Other(String),
}

impl From<String> for TaxType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SALES" => TaxType::Sales,
            "RENTAL_VEHICLE" => TaxType::RentalVehicle,
            "" => TaxType::Unspecified,
            _ => TaxType::Other(value),
        }
    }
}

impl From<TaxType> for String {
    fn from(value: TaxType) -> Self {
        match value {
            TaxType::Sales => String::from("SALES"),
            TaxType::RentalVehicle => String::from("RENTAL_VEHICLE"),
            TaxType::Unspecified => String::new(),
            TaxType::Other(other) => other,
        }
    }
}

impl Serialize for TaxType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from(self.clone()))
    }
}

impl<'de> Deserialize<'de> for TaxType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(TaxType::from).unwrap_or_default())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TaxLine {
    pub name: String,
    /// Percentage points, `6` means 6%.
    pub rate: Decimal,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub tax_type: TaxType,
    pub source: Option<String>,
}

impl TaxLine {
    pub fn new(name: &str, rate: Decimal, amount: Decimal, tax_type: TaxType) -> TaxLine {
        TaxLine {
            name: name.to_string(),
            rate,
            amount,
            tax_type,
            source: None,
        }
    }
}

/// Quantity column of a fee row; `None` renders as `-`.
pub type Quantity = Option<Decimal>;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUnit {
    Mile,
    Hour,
}

impl RateUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            RateUnit::Mile => "/mile",
            RateUnit::Hour => "/hour",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PricingRow {
    pub description: String,
    pub quantity: Quantity,
    /// `None` when the amount is not applicable or could not be derived.
    pub unit_amount: Option<Decimal>,
    pub rate_unit: Option<RateUnit>,
    pub line_total: Decimal,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Organization {
    pub name: String,
    pub logo_url: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OrganizationSettings {
    pub timezone: Option<String>,
    #[serde(alias = "measurementUnits")]
    pub measurement_units: Option<MeasurementUnits>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MeasurementUnits {
    pub length: Option<String>,
    /// `mi` or `km`.
    pub distance: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RvDetails {
    pub name: Option<String>,
    pub primary_image_url: Option<String>,
    pub unit_number: Option<String>,
    pub year: Option<serde_json::Value>,
    pub make: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub class: Option<String>,
    pub length: Option<serde_json::Value>,
    pub height: Option<serde_json::Value>,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub state: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DeliveryLocation {
    pub formatted_address: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Reservation {
    pub reservation_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub is_delivery: bool,
    pub delivery_location: Option<DeliveryLocation>,
    pub store_uuid: Option<String>,
    pub rvs: Option<RvDetails>,
    pub primary_driver_name: Option<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub secondary_drivers: Vec<Driver>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Driver {
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(alias = "last_name")]
    pub last_name: String,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Identity check result for one driver, as stored by the verification
/// provider.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverVerification {
    pub verification_data: Option<VerificationData>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct VerificationData {
    pub master_verified: Option<bool>,
}

impl DriverVerification {
    pub fn is_verified(&self) -> bool {
        self.verification_data
            .as_ref()
            .and_then(|d| d.master_verified)
            .unwrap_or(false)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Store {
    pub id: Option<String>,
    pub address: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(alias = "zipCode")]
    pub zip_code: Option<String>,
    #[serde(alias = "contactName")]
    pub contact_name: Option<String>,
    #[serde(alias = "contactPhone")]
    pub contact_phone: Option<String>,
}

impl Store {
    /// Single-line address: `street[, suite], city, state zip`.
    pub fn single_line_address(&self) -> String {
        let mut street = self.address.clone().unwrap_or_default();
        if let Some(suite) = self.suite.as_deref().filter(|s| !s.is_empty()) {
            street = street + ", " + suite;
        }
        format!(
            "{}, {}, {} {}",
            street,
            self.city.as_deref().unwrap_or_default(),
            self.state.as_deref().unwrap_or_default(),
            self.zip_code.as_deref().unwrap_or_default()
        )
    }

    /// Street line and city line separated by a newline.
    pub fn two_line_address(&self) -> String {
        let mut street = self.address.clone().unwrap_or_default();
        if let Some(suite) = self.suite.as_deref().filter(|s| !s.is_empty()) {
            street = street + ", " + suite;
        }
        format!(
            "{}\n{}, {} {}",
            street,
            self.city.as_deref().unwrap_or_default(),
            self.state.as_deref().unwrap_or_default(),
            self.zip_code.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Transaction {
    pub created_at: Option<String>,
    pub description: Option<String>,
    pub method: Option<String>,
    pub amount: Option<Decimal>,
}

fn nullable_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

// Any non-null rule object counts as applied; an explicit `false` does not.
fn presence_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(!matches!(value, serde_json::Value::Null | serde_json::Value::Bool(false)))
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
