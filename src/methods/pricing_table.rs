use crate::helper_model::PricingWarning;
use crate::methods::{formatters, pricing_rules, tax_aggregator};
use crate::model::{PriceSummary, PricingRow, TaxLine};
use rust_decimal::Decimal;
use serde_derive::Serialize;

const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Fee(PricingRow),
    Subtotal(Decimal),
    Tax(TaxLine),
    GrandTotal(Decimal),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Fee,
    Subtotal,
    Tax,
    GrandTotal,
}

/// A table row with every column already formatted for display.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub kind: RowKind,
    pub description: String,
    pub quantity: String,
    pub unit_amount: String,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    pub rows: Vec<TableRow>,
    pub warnings: Vec<PricingWarning>,
}

impl PricingTable {
    pub fn fee_rows(&self) -> Vec<&PricingRow> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                TableRow::Fee(fee) => Some(fee),
                _ => None,
            })
            .collect()
    }

    pub fn tax_lines(&self) -> Vec<&TaxLine> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                TableRow::Tax(tax) => Some(tax),
                _ => None,
            })
            .collect()
    }

    pub fn subtotal(&self) -> Decimal {
        self.rows
            .iter()
            .find_map(|row| match row {
                TableRow::Subtotal(amount) => Some(*amount),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn grand_total(&self) -> Decimal {
        self.rows
            .iter()
            .find_map(|row| match row {
                TableRow::GrandTotal(amount) => Some(*amount),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn display_rows(&self) -> Vec<DisplayRow> {
        self.rows.iter().map(display_row).collect()
    }
}

pub fn quantity_display(row: &PricingRow) -> String {
    match row.quantity {
        Some(quantity) => quantity.to_string(),
        None => String::from(PLACEHOLDER),
    }
}

pub fn unit_amount_display(row: &PricingRow) -> String {
    match row.unit_amount {
        Some(amount) => {
            let suffix = row.rate_unit.map(|u| u.suffix()).unwrap_or_default();
            format!("${}{}", formatters::format_money(amount), suffix)
        }
        None => String::from(PLACEHOLDER),
    }
}

pub fn line_total_display(row: &PricingRow) -> String {
    "$".to_owned() + &formatters::format_money(row.line_total)
}

fn display_row(row: &TableRow) -> DisplayRow {
    match row {
        TableRow::Fee(fee) => DisplayRow {
            kind: RowKind::Fee,
            description: fee.description.clone(),
            quantity: quantity_display(fee),
            unit_amount: unit_amount_display(fee),
            line_total: line_total_display(fee),
        },
        TableRow::Subtotal(amount) => DisplayRow {
            kind: RowKind::Subtotal,
            description: String::from("Subtotal"),
            quantity: String::new(),
            unit_amount: String::new(),
            line_total: "$".to_owned() + &formatters::format_money(*amount),
        },
        TableRow::Tax(tax) => DisplayRow {
            kind: RowKind::Tax,
            description: tax_aggregator::label(tax),
            quantity: String::new(),
            unit_amount: String::new(),
            line_total: "$".to_owned() + &formatters::format_money(tax.amount),
        },
        TableRow::GrandTotal(amount) => DisplayRow {
            kind: RowKind::GrandTotal,
            description: String::from("Total"),
            quantity: String::new(),
            unit_amount: String::new(),
            line_total: "$".to_owned() + &formatters::format_money(*amount),
        },
    }
}

/// `grandTotal` is expected to equal `totalBeforeTax` plus every tax amount.
/// Only checked when both totals were supplied.
pub fn check_totals(summary: &PriceSummary) -> Option<PricingWarning> {
    let subtotal = summary.total_before_tax?;
    let grand_total = summary.grand_total?;
    let overflow = || PricingWarning::AmountOverflow {
        field: String::from("subtotal plus taxes"),
    };
    let Some(taxes) = summary
        .tax_rate_collection
        .iter()
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.amount))
    else {
        return Some(overflow());
    };
    let Some(expected) = subtotal.checked_add(taxes) else {
        return Some(overflow());
    };
    if formatters::round_money(expected) == formatters::round_money(grand_total) {
        None
    } else {
        Some(PricingWarning::TotalMismatch {
            subtotal,
            taxes,
            grand_total,
        })
    }
}

pub fn build_pricing_table(summary: &PriceSummary) -> PricingTable {
    let (fees, mut warnings) = pricing_rules::fee_rows(summary);
    let taxes = tax_aggregator::merge_taxes(&summary.tax_rate_collection, &mut warnings);
    warnings.extend(check_totals(summary));

    let mut rows: Vec<TableRow> = Vec::with_capacity(fees.len() + taxes.len() + 2);
    rows.extend(fees.into_iter().map(TableRow::Fee));
    rows.push(TableRow::Subtotal(summary.total_before_tax.unwrap_or_default()));
    rows.extend(taxes.into_iter().map(TableRow::Tax));
    rows.push(TableRow::GrandTotal(summary.grand_total.unwrap_or_default()));
    PricingTable { rows, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Addon, MileageRule, MileageTier, SelectedUnit, TaxType};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn adventure_camper() -> PriceSummary {
        PriceSummary {
            rental_fee: Some(dec(500)),
            charge_periods: Some(4),
            selected_unit: Some(SelectedUnit {
                name: Some(String::from("Adventure Camper")),
                cost_per_period: Some(dec(125)),
            }),
            mileage_fee: Some(Decimal::ZERO),
            total_before_tax: Some(dec(500)),
            tax_rate_collection: vec![TaxLine::new("State Tax", dec(6), dec(30), TaxType::Sales)],
            grand_total: Some(dec(530)),
            ..Default::default()
        }
    }

    fn is_money(text: &str) -> bool {
        let digits = text.trim_start_matches('$');
        let Some((whole, cents)) = digits.split_once('.') else {
            return false;
        };
        !whole.is_empty()
            && whole.trim_start_matches('-').chars().all(|c| c.is_ascii_digit())
            && cents.len() == 2
            && cents.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn quote_for_adventure_camper() {
        let table = build_pricing_table(&adventure_camper());
        assert!(table.warnings.is_empty());

        let rows = table.display_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            DisplayRow {
                kind: RowKind::Fee,
                description: String::from("Adventure Camper Rental Fee"),
                quantity: String::from("4"),
                unit_amount: String::from("$125.00"),
                line_total: String::from("$500.00"),
            }
        );
        assert_eq!(rows[1].kind, RowKind::Subtotal);
        assert_eq!(rows[1].line_total, "$500.00");
        assert_eq!(tax_aggregator::display_line(table.tax_lines()[0]), "State Tax (6%): $30.00");
        assert_eq!(rows[3].kind, RowKind::GrandTotal);
        assert_eq!(rows[3].line_total, "$530.00");
        assert_eq!(table.subtotal(), dec(500));
        assert_eq!(table.grand_total(), dec(530));
    }

    #[test]
    fn manual_mileage_shows_placeholders() {
        let summary = PriceSummary {
            mileage_fee: Some(dec(75)),
            manual_mileage_fee: true,
            ..Default::default()
        };
        let rows = build_pricing_table(&summary).display_rows();
        assert_eq!(rows[0].description, "Mileage Fee");
        assert_eq!(rows[0].quantity, "-");
        assert_eq!(rows[0].unit_amount, "-");
        assert_eq!(rows[0].line_total, "$75.00");
    }

    #[test]
    fn generator_without_elapsed_hours() {
        let summary = PriceSummary {
            generator_fee: Some(dec(45)),
            applied_generator_rule: true,
            departure_generator_hours: Some(dec(10)),
            return_generator_hours: Some(dec(10)),
            ..Default::default()
        };
        let table = build_pricing_table(&summary);
        let rows = table.display_rows();
        assert_eq!(rows[0].unit_amount, "-");
        assert_eq!(rows[0].line_total, "$45.00");
        assert!(!rows[0].unit_amount.contains("NaN"));
        assert!(matches!(table.warnings[0], PricingWarning::GeneratorZeroHours { .. }));
    }

    #[test]
    fn rate_rows_carry_units() {
        let summary = PriceSummary {
            mileage_fee: Some(Decimal::new(3614, 2)),
            billable_miles: Some(Decimal::new(120456, 3)),
            applied_mileage_rule: Some(MileageRule {
                tiers: vec![MileageTier { rate: Some(Decimal::new(3, 1)) }],
            }),
            generator_fee: Some(dec(20)),
            applied_generator_rule: true,
            return_generator_hours: Some(dec(3)),
            ..Default::default()
        };
        let rows = build_pricing_table(&summary).display_rows();
        assert_eq!(rows[0].quantity, "120.46");
        assert_eq!(rows[0].unit_amount, "$0.30/mile");
        assert_eq!(rows[1].quantity, "3.00");
        assert_eq!(rows[1].unit_amount, "$6.67/hour");
    }

    #[test]
    fn row_count_matches_fees_plus_taxes() {
        let mut summary = adventure_camper();
        summary.selected_addons = vec![Addon {
            name: String::from("Camp Chairs"),
            quantity: dec(2),
            base_fee: Some(dec(10)),
            total_fee: Some(dec(20)),
        }];
        summary.tax_rate_collection.push(TaxLine::new("State Tax", dec(6), dec(1), TaxType::Sales));
        summary.tax_rate_collection.push(TaxLine::new("Vehicle Tax", dec(2), dec(10), TaxType::RentalVehicle));
        let table = build_pricing_table(&summary);
        assert_eq!(table.fee_rows().len(), 2);
        assert_eq!(table.tax_lines().len(), 2);
        assert_eq!(table.rows.len(), 2 + 1 + 2 + 1);
        assert_eq!(table.tax_lines()[0].name, "Vehicle Tax");
    }

    #[test]
    fn empty_summary_never_panics() {
        let table = build_pricing_table(&PriceSummary::default());
        let rows = table.display_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line_total, "$0.00");
        assert_eq!(rows[1].line_total, "$0.00");
    }

    #[test]
    fn money_columns_are_two_decimal_amounts() {
        let summaries = vec![
            adventure_camper(),
            PriceSummary {
                rental_fee: Some(Decimal::new(1234567, 4)),
                selected_unit: Some(SelectedUnit {
                    name: None,
                    cost_per_period: Some(Decimal::new(3333333, 5)),
                }),
                generator_fee: Some(dec(10)),
                applied_generator_rule: true,
                return_generator_hours: Some(dec(3)),
                total_before_tax: Some(Decimal::new(1, 3)),
                ..Default::default()
            },
            PriceSummary {
                generator_fee: Some(dec(10)),
                applied_generator_rule: true,
                departure_generator_hours: Some(dec(5)),
                return_generator_hours: Some(dec(5)),
                ..Default::default()
            },
        ];
        for summary in summaries.into_iter().chain(extreme_summaries()) {
            for row in build_pricing_table(&summary).display_rows() {
                assert!(is_money(&row.line_total), "bad total {}", row.line_total);
                if row.kind == RowKind::Fee && row.unit_amount != "-" {
                    let amount = row.unit_amount.split('/').next().unwrap_or_default();
                    assert!(is_money(amount), "bad unit amount {}", row.unit_amount);
                }
            }
        }
    }

    fn extreme_summaries() -> Vec<PriceSummary> {
        let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        let state = |amount| TaxLine::new("State", dec(6), amount, TaxType::Sales);
        vec![
            PriceSummary {
                rental_fee: Some(Decimal::MAX),
                charge_periods: Some(u32::MAX),
                total_before_tax: Some(Decimal::MAX),
                tax_rate_collection: vec![state(Decimal::MAX), state(Decimal::MAX)],
                grand_total: Some(Decimal::MIN),
                ..Default::default()
            },
            PriceSummary {
                generator_fee: Some(huge),
                applied_generator_rule: true,
                departure_generator_hours: Some(Decimal::MAX),
                return_generator_hours: Some(Decimal::MIN),
                ..Default::default()
            },
            PriceSummary {
                generator_fee: Some(Decimal::MAX),
                applied_generator_rule: true,
                departure_generator_hours: Some(huge),
                return_generator_hours: Some(dec(1)),
                ..Default::default()
            },
            PriceSummary {
                generator_fee: Some(Decimal::MAX),
                applied_generator_rule: true,
                return_generator_hours: Some(Decimal::new(1, 28)),
                mileage_fee: Some(Decimal::MIN),
                billable_miles: Some(Decimal::MAX),
                applied_mileage_rule: Some(MileageRule {
                    tiers: vec![MileageTier { rate: Some(Decimal::new(-1, 28)) }],
                }),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn oversized_taxes_still_render() {
        let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        let raw = serde_json::json!({
            "totalBeforeTax": 10,
            "grandTotal": 20,
            "taxRateCollection": [
                {"name": "State", "rate": 6, "amount": "50000000000000000000000000000", "type": "SALES"},
                {"name": "State", "rate": 6, "amount": "50000000000000000000000000000", "type": "SALES"}
            ]
        });
        let summary: PriceSummary = serde_json::from_value(raw).unwrap();
        let table = build_pricing_table(&summary);
        assert_eq!(table.tax_lines()[0].amount, huge);
        assert!(table.warnings.contains(&PricingWarning::AmountOverflow {
            field: String::from("State (6%)"),
        }));
        assert!(table.warnings.contains(&PricingWarning::AmountOverflow {
            field: String::from("subtotal plus taxes"),
        }));
        let rows = table.display_rows();
        assert_eq!(rows[1].line_total, "$50000000000000000000000000000.00");
    }

    #[test]
    fn extreme_amounts_never_panic() {
        for summary in extreme_summaries() {
            let table = build_pricing_table(&summary);
            assert!(!table.warnings.is_empty());
            assert_eq!(table.display_rows().len(), table.rows.len());
        }
    }

    #[test]
    fn grand_total_invariant_is_checked() {
        assert_eq!(check_totals(&adventure_camper()), None);

        let mut drifted = adventure_camper();
        drifted.grand_total = Some(dec(531));
        let table = build_pricing_table(&drifted);
        assert_eq!(
            table.warnings,
            vec![PricingWarning::TotalMismatch {
                subtotal: dec(500),
                taxes: dec(30),
                grand_total: dec(531),
            }]
        );
        // the table still renders the supplied grand total
        assert_eq!(table.grand_total(), dec(531));
    }
}
