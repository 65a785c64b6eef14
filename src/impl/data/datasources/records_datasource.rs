use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::entities::Period;
use crate::errors::LedgerError;

/// Collection names of the schema-less record backend.
pub mod collections {
    pub const ACCOUNTING_ENTRIES: &str = "accounting_entries";
    pub const CLIENT_INVOICES: &str = "client_invoices";
    pub const SUPPLIER_INVOICES: &str = "supplier_invoices";
    pub const BANK_TRANSACTIONS: &str = "bank_transactions";
    pub const VAT_DECLARATIONS: &str = "vat_declarations";
}

/// Server-side filter for a record listing, mirroring what the backend can
/// apply before records reach the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub scope: Option<String>,
    /// Inclusive date range, matched against the record's date field.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Matched against a numeric `year` field (declaration records).
    pub year: Option<i32>,
}

impl RecordFilter {
    pub fn for_period(period: &Period) -> Self {
        Self {
            scope: period.scope.clone(),
            date_range: Some((period.start, period.end)),
            year: None,
        }
    }

    pub fn for_year(year: i32, scope: Option<&str>) -> Self {
        Self {
            scope: scope.map(str::to_string),
            date_range: None,
            year: Some(year),
        }
    }
}

/// Boundary to the schema-less record backend. Transport, auth and
/// pagination live behind this trait; the engine only needs filtered reads
/// plus the single declaration write path.
#[async_trait]
pub trait RecordsDatasource: Send + Sync {
    async fn list(
        &self,
        collection: &str,
        filter: &RecordFilter,
    ) -> Result<Vec<Value>, LedgerError>;

    async fn create(&self, collection: &str, item: Value) -> Result<(), LedgerError>;

    async fn update(&self, collection: &str, id: &str, item: Value) -> Result<(), LedgerError>;
}
