use std::collections::HashMap;

use iso_currency::Currency;
use serde_derive::Deserialize;

use super::vat::{DeadlineTable, VatRateTable};

/// Injected reporting configuration: the statutory constants that change
/// over time (VAT rates, filing deadlines, exchange rates). Kept out of the
/// code so historical periods can be evaluated against the values in force
/// at the time; deserializable from RON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    pub vat: VatRateTable,
    pub deadlines: DeadlineTable,
    /// Window for the "due soon" deadline status, in days.
    pub due_soon_days: i64,
    pub base_currency: String,
    /// Static conversion rates into the base currency, keyed by ISO code.
    pub exchange_rates: HashMap<String, f64>,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            vat: VatRateTable::default(),
            deadlines: DeadlineTable::default(),
            due_soon_days: 30,
            base_currency: "CHF".to_string(),
            exchange_rates: [
                ("CHF".to_string(), 1.0),
                ("EUR".to_string(), 0.94),
                ("USD".to_string(), 0.88),
                ("GBP".to_string(), 1.12),
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl ReportingConfig {
    /// Static conversion into the base currency. Unknown currencies pass
    /// through at 1:1 rather than failing the aggregation.
    pub fn to_base(&self, amount: f64, currency: Currency) -> f64 {
        let rate = self
            .exchange_rates
            .get(currency.code())
            .copied()
            .unwrap_or(1.0);
        amount * rate
    }
}
