use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    data::{
        datasources::records_datasource::{collections, RecordFilter, RecordsDatasource},
        models::vat_filing_model,
    },
    domain::repositories::declaration_store::DeclarationStore,
    entities::{Quarter, VatFiling},
    errors::LedgerError,
};

/// `DeclarationStore` over the schema-less record backend. The upsert lists
/// the year's declarations, updates the record matching
/// `(year, quarter, scope)` if one exists and creates it otherwise, so a
/// re-submission never duplicates.
pub struct RecordsDeclarationStore<DS: RecordsDatasource> {
    datasource: Arc<DS>,
}

impl<DS: RecordsDatasource> RecordsDeclarationStore<DS> {
    pub fn new(datasource: Arc<DS>) -> Self {
        Self { datasource }
    }
}

#[async_trait]
impl<DS: RecordsDatasource> DeclarationStore for RecordsDeclarationStore<DS> {
    async fn mark_filed(&self, filing: &VatFiling) -> Result<(), LedgerError> {
        let period = filing.period_label();
        let filter = RecordFilter::for_year(filing.year, filing.scope.as_deref());
        let existing = self
            .datasource
            .list(collections::VAT_DECLARATIONS, &filter)
            .await
            .map_err(|e| LedgerError::declaration_persist(period.clone(), e))?;

        let payload = vat_filing_model::to_value(filing);
        let previous = existing
            .iter()
            .find(|r| vat_filing_model::matches_key(r, filing))
            .and_then(vat_filing_model::record_id);

        let result = match previous {
            Some(id) => {
                self.datasource
                    .update(collections::VAT_DECLARATIONS, &id, payload)
                    .await
            }
            None => {
                self.datasource
                    .create(collections::VAT_DECLARATIONS, payload)
                    .await
            }
        };
        result.map_err(|e| LedgerError::declaration_persist(period, e))
    }

    async fn filed_quarters(
        &self,
        year: i32,
        scope: Option<&str>,
    ) -> Result<Vec<Quarter>, LedgerError> {
        let records = self
            .datasource
            .list(
                collections::VAT_DECLARATIONS,
                &RecordFilter::for_year(year, scope),
            )
            .await?;
        let mut quarters: Vec<Quarter> = records
            .iter()
            .filter_map(vat_filing_model::filed_quarter)
            .collect();
        quarters.sort();
        quarters.dedup();
        Ok(quarters)
    }
}
