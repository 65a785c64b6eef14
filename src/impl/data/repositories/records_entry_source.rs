use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    data::{
        datasources::records_datasource::{collections, RecordFilter, RecordsDatasource},
        models::{
            bank_transaction_model, client_invoice_model, ledger_entry_model,
            supplier_invoice_model,
        },
    },
    domain::repositories::entry_source::EntrySource,
    entities::{BankTransaction, ClientInvoice, LedgerEntry, Period, SupplierInvoice},
    errors::LedgerError,
};

/// `EntrySource` over the schema-less record backend: lists the relevant
/// collection for the period and maps raw records through the field
/// resolvers. Unusable records are dropped, never fatal.
pub struct RecordsEntrySource<DS: RecordsDatasource> {
    datasource: Arc<DS>,
}

impl<DS: RecordsDatasource> RecordsEntrySource<DS> {
    pub fn new(datasource: Arc<DS>) -> Self {
        Self { datasource }
    }
}

#[async_trait]
impl<DS: RecordsDatasource> EntrySource for RecordsEntrySource<DS> {
    async fn native_entries(&self, period: &Period) -> Result<Vec<LedgerEntry>, LedgerError> {
        let records = self
            .datasource
            .list(collections::ACCOUNTING_ENTRIES, &RecordFilter::for_period(period))
            .await?;
        Ok(records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| ledger_entry_model::from_value(r, (i + 1) as u64))
            .collect())
    }

    async fn client_invoices(&self, period: &Period) -> Result<Vec<ClientInvoice>, LedgerError> {
        let records = self
            .datasource
            .list(collections::CLIENT_INVOICES, &RecordFilter::for_period(period))
            .await?;
        Ok(records.iter().filter_map(client_invoice_model::from_value).collect())
    }

    async fn supplier_invoices(
        &self,
        period: &Period,
    ) -> Result<Vec<SupplierInvoice>, LedgerError> {
        let records = self
            .datasource
            .list(collections::SUPPLIER_INVOICES, &RecordFilter::for_period(period))
            .await?;
        Ok(records.iter().filter_map(supplier_invoice_model::from_value).collect())
    }

    async fn bank_transactions(
        &self,
        period: &Period,
    ) -> Result<Vec<BankTransaction>, LedgerError> {
        let records = self
            .datasource
            .list(collections::BANK_TRANSACTIONS, &RecordFilter::for_period(period))
            .await?;
        Ok(records.iter().filter_map(bank_transaction_model::from_value).collect())
    }
}
