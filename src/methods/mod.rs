pub mod formatters;
pub mod pricing_rules;
pub mod pricing_table;
pub mod standard_replies;
pub mod tax_aggregator;
pub mod timestamps;
