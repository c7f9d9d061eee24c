use currency_rs::Currency;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

lazy_static::lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"\D").unwrap();
    static ref URL_SCHEME: Regex = Regex::new(r"^https?://").unwrap();
    static ref STATE_ZIP: Regex = Regex::new(r",\s*([A-Z]{2})\s+(\d{5}(?:-\d{4})?)$").unwrap();
}

pub const ADDRESS_UNAVAILABLE: &str = "Address unavailable";

/// Rounds half away from zero and always keeps exactly two decimals.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // drop a negative sign left over from rounding tiny negatives
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    rounded
}

/// `12.5` -> `"12.50"`. No currency symbol.
pub fn format_money(amount: Decimal) -> String {
    // amounts too wide to rescale still get their two zero decimals
    format!("{:.2}", round_money(amount))
}

/// Missing amounts print as zero.
pub fn format_optional_money(amount: Option<Decimal>) -> String {
    format_money(amount.unwrap_or_default())
}

/// `1234.5` -> `"$1,234.50"`, used for call-to-action labels.
pub fn format_currency(amount: Decimal) -> String {
    let plain = format_money(amount);
    match Currency::new_string(&plain, None) {
        Ok(currency) => currency.format(),
        Err(_) => "$".to_owned() + &plain,
    }
}

/// Percent points without trailing zeros: `6.00` -> `"6"`, `8.50` -> `"8.5"`.
pub fn format_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub label: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn phone_link(phone: Option<&str>) -> Option<Link> {
    let phone = non_empty(phone)?;
    Some(Link {
        href: "tel:".to_owned() + &phone_digits(phone),
        label: phone.to_string(),
    })
}

pub fn email_link(email: Option<&str>) -> Option<Link> {
    let email = non_empty(email)?;
    Some(Link {
        href: "mailto:".to_owned() + email,
        label: email.to_string(),
    })
}

pub fn website_link(url: Option<&str>) -> Option<Link> {
    let url = non_empty(url)?;
    let href = url.strip_suffix('/').unwrap_or(url).to_string();
    let label = URL_SCHEME.replace(&href, "").to_string();
    Some(Link { href, label })
}

pub fn phone_digits(phone: &str) -> String {
    NON_DIGIT.replace_all(phone, "").to_string()
}

pub fn google_maps_link(address: &str) -> String {
    "https://www.google.com/maps/search/?api=1&query=".to_owned() + &urlencoding::encode(address)
}

/// Splits a geocoder address into `street, city` and `ST 12345` lines and
/// drops a trailing `, USA`. Addresses that do not end in a state and ZIP are
/// returned as a single line.
pub fn two_line_delivery_address(formatted: Option<&str>) -> String {
    let Some(formatted) = non_empty(formatted) else {
        return String::from(ADDRESS_UNAVAILABLE);
    };
    let address = formatted.strip_suffix(", USA").unwrap_or(formatted);
    let Some(found) = STATE_ZIP.find(address) else {
        return address.to_string();
    };
    let state_zip = found.as_str().trim_start_matches(',').trim();
    let head = &address[..found.start()];
    match head.rfind(',') {
        Some(comma) => format!(
            "{}, {}\n{}",
            head[..comma].trim(),
            head[comma + 1..].trim(),
            state_zip
        ),
        None => address.to_string(),
    }
}
