use crate::helper_model::PricingWarning;
use crate::methods::formatters;
use crate::model::{TaxLine, TaxType};

fn same_tax(a: &TaxLine, b: &TaxLine) -> bool {
    a.name == b.name && a.rate == b.rate && a.tax_type == b.tax_type
}

/// Merge taxes sharing name, rate and type (amounts summed, first entry wins
/// for everything else), then move rental-vehicle taxes ahead of sales taxes.
///
/// Only the slots held by `RENTAL_VEHICLE` and `SALES` entries are
/// reordered; entries of any other type keep their position, and entries of
/// the same type keep their encounter order.
pub fn aggregate_taxes(taxes: &[TaxLine]) -> Vec<TaxLine> {
    merge_taxes(taxes, &mut Vec::new())
}

/// [`aggregate_taxes`], reporting merges whose sum leaves the decimal range.
/// Such a merge keeps the amount accumulated so far.
pub fn merge_taxes(taxes: &[TaxLine], warnings: &mut Vec<PricingWarning>) -> Vec<TaxLine> {
    let mut merged: Vec<TaxLine> = Vec::with_capacity(taxes.len());
    for tax in taxes {
        match merged.iter_mut().find(|seen| same_tax(seen, tax)) {
            Some(seen) => match seen.amount.checked_add(tax.amount) {
                Some(sum) => seen.amount = sum,
                None => warnings.push(PricingWarning::AmountOverflow {
                    field: label(seen),
                }),
            },
            None => merged.push(tax.clone()),
        }
    }

    let slots: Vec<usize> = merged
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t.tax_type, TaxType::RentalVehicle | TaxType::Sales))
        .map(|(i, _)| i)
        .collect();
    let (rental_vehicle, sales): (Vec<TaxLine>, Vec<TaxLine>) = slots
        .iter()
        .map(|&i| merged[i].clone())
        .partition(|t| t.tax_type == TaxType::RentalVehicle);
    for (slot, tax) in slots.into_iter().zip(rental_vehicle.into_iter().chain(sales)) {
        merged[slot] = tax;
    }
    merged
}

/// `State Tax (6%): $30.00`
pub fn display_line(tax: &TaxLine) -> String {
    format!("{}: ${}", label(tax), formatters::format_money(tax.amount))
}

/// `State Tax (6%)`
pub fn label(tax: &TaxLine) -> String {
    format!("{} ({}%)", tax.name, formatters::format_rate(tax.rate))
}
