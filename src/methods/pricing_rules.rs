use crate::helper_model::PricingWarning;
use crate::model::{PriceSummary, PricingRow, RateUnit};
use rust_decimal::Decimal;

fn charged(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|a| !a.is_zero())
}

// miles and hours always show two decimals
fn measured(quantity: Decimal) -> Decimal {
    let mut rounded = quantity.round_dp(2);
    rounded.rescale(2);
    rounded
}

pub fn rental_row(summary: &PriceSummary) -> Option<PricingRow> {
    let rental_fee = charged(summary.rental_fee)?;
    let unit = summary.selected_unit.as_ref();
    let unit_name = unit
        .and_then(|u| u.name.as_deref())
        .filter(|n| !n.is_empty())
        .unwrap_or("RV");
    Some(PricingRow {
        description: format!("{} Rental Fee", unit_name),
        quantity: Some(Decimal::from(summary.charge_periods.unwrap_or(0))),
        unit_amount: Some(unit.and_then(|u| u.cost_per_period).unwrap_or_default()),
        rate_unit: None,
        line_total: rental_fee,
    })
}

/// A mileage fee with neither a manual flag nor a rule cannot be broken
/// down; the row is left out and the gap reported.
pub fn mileage_row(summary: &PriceSummary, warnings: &mut Vec<PricingWarning>) -> Option<PricingRow> {
    let mileage_fee = charged(summary.mileage_fee)?;
    if summary.manual_mileage_fee {
        return Some(PricingRow {
            description: String::from("Mileage Fee"),
            quantity: None,
            unit_amount: None,
            rate_unit: None,
            line_total: mileage_fee,
        });
    }
    let Some(rule) = summary.applied_mileage_rule.as_ref() else {
        warnings.push(PricingWarning::MileageWithoutRule { fee: mileage_fee });
        return None;
    };
    let miles = measured(summary.billable_miles.unwrap_or_default());
    let rate = rule.tiers.first().and_then(|t| t.rate).unwrap_or_default();
    Some(PricingRow {
        description: String::from("Mileage Fee"),
        quantity: Some(miles),
        unit_amount: Some(rate),
        rate_unit: Some(RateUnit::Mile),
        line_total: mileage_fee,
    })
}

pub fn generator_row(summary: &PriceSummary, warnings: &mut Vec<PricingWarning>) -> Option<PricingRow> {
    let generator_fee = charged(summary.generator_fee)?;
    if !summary.applied_generator_rule {
        return None;
    }
    let departed = summary.departure_generator_hours.unwrap_or_default();
    let returned = summary.return_generator_hours.unwrap_or_default();
    if returned < departed {
        warnings.push(PricingWarning::GeneratorHoursReversed { departed, returned });
    }
    let Some(hours_used) = returned.checked_sub(departed) else {
        warnings.push(PricingWarning::AmountOverflow {
            field: String::from("generator hours"),
        });
        return Some(PricingRow {
            description: String::from("Generator Fee"),
            quantity: None,
            unit_amount: None,
            rate_unit: Some(RateUnit::Hour),
            line_total: generator_fee,
        });
    };
    let hourly = if hours_used.is_zero() {
        warnings.push(PricingWarning::GeneratorZeroHours { hours: returned });
        None
    } else {
        let hourly = generator_fee.checked_div(hours_used);
        if hourly.is_none() {
            warnings.push(PricingWarning::AmountOverflow {
                field: String::from("generator hourly rate"),
            });
        }
        hourly
    };
    Some(PricingRow {
        description: String::from("Generator Fee"),
        quantity: Some(measured(hours_used)),
        unit_amount: hourly,
        rate_unit: Some(RateUnit::Hour),
        line_total: generator_fee,
    })
}

pub fn addon_rows(summary: &PriceSummary) -> Vec<PricingRow> {
    summary
        .selected_addons
        .iter()
        .map(|addon| PricingRow {
            description: addon.name.clone(),
            quantity: Some(addon.quantity),
            unit_amount: Some(addon.base_fee.unwrap_or_default()),
            rate_unit: None,
            line_total: addon.total_fee.unwrap_or_default(),
        })
        .collect()
}

/// Every billable line of a reservation in display order: rental, mileage,
/// generator, then addons in the order they were selected.
pub fn fee_rows(summary: &PriceSummary) -> (Vec<PricingRow>, Vec<PricingWarning>) {
    let mut warnings = Vec::new();
    let mut rows = Vec::new();
    rows.extend(rental_row(summary));
    rows.extend(mileage_row(summary, &mut warnings));
    rows.extend(generator_row(summary, &mut warnings));
    rows.extend(addon_rows(summary));
    (rows, warnings)
}
