use async_trait::async_trait;
use chrono::NaiveDate;
use futures::join;

use crate::{
    domain::{
        logic::{
            journal::filter_entries,
            materializer::EntryMaterializer,
            sequencer::LedgerSequencer,
            trial_balance::TrialBalanceBuilder,
            vat::{declaration_period, VatReporter},
        },
        repositories::{declaration_store::DeclarationStore, entry_source::EntrySource},
    },
    entities::{
        AccountLedger, ChartOfAccounts, CoherenceCheck, FilingDeadline, JournalFilter,
        LedgerEntry, Period, Quarter, ReportingConfig, TrialBalance, VatBreakdown, VatFiling,
    },
    errors::LedgerError,
};

/// The engine's query surface. Every call reads an immutable snapshot and
/// aggregates into locally scoped accumulators; concurrent invocations for
/// different periods or scopes need no synchronization.
#[async_trait]
pub trait ReportingUsecase: Send + Sync {
    /// Canonical entry set for the period, newest first.
    async fn materialize(&self, period: &Period) -> Vec<LedgerEntry>;

    async fn trial_balance(&self, period: &Period) -> TrialBalance;

    async fn account_ledger(&self, period: &Period, account_code: &str) -> AccountLedger;

    async fn journal(&self, period: &Period, filter: &JournalFilter) -> Vec<LedgerEntry>;

    /// VAT declaration figures for one quarter. Runs on the raw invoices,
    /// independently of ledger materialization.
    async fn vat_breakdown(
        &self,
        year: i32,
        quarter: Quarter,
        scope: Option<String>,
    ) -> VatBreakdown;

    async fn filing_deadlines(
        &self,
        year: i32,
        scope: Option<&str>,
        today: NaiveDate,
    ) -> Vec<FilingDeadline>;

    /// Persists the filed flag. A failure is surfaced here and only here;
    /// the already-computed breakdown stays valid and the call can be
    /// retried.
    async fn mark_filed(&self, filing: &VatFiling) -> Result<(), LedgerError>;

    fn coherence_checks(&self, breakdown: &VatBreakdown) -> Vec<CoherenceCheck>;
}

pub(crate) struct ReportingUsecaseImpl<S, D>
where
    S: EntrySource,
    D: DeclarationStore,
{
    source: S,
    store: D,
    chart: ChartOfAccounts,
    config: ReportingConfig,
}

impl<S, D> ReportingUsecaseImpl<S, D>
where
    S: EntrySource,
    D: DeclarationStore,
{
    pub(crate) fn new(source: S, store: D, config: ReportingConfig) -> Self {
        Self {
            source,
            store,
            chart: ChartOfAccounts::kafer(),
            config,
        }
    }

    pub(crate) fn config(&self) -> &ReportingConfig {
        &self.config
    }
}

#[async_trait]
impl<S, D> ReportingUsecase for ReportingUsecaseImpl<S, D>
where
    S: EntrySource,
    D: DeclarationStore,
{
    async fn materialize(&self, period: &Period) -> Vec<LedgerEntry> {
        EntryMaterializer::new(&self.source, &self.chart)
            .materialize(period)
            .await
    }

    async fn trial_balance(&self, period: &Period) -> TrialBalance {
        let entries = self.materialize(period).await;
        TrialBalanceBuilder::new(&self.chart).build(&entries)
    }

    async fn account_ledger(&self, period: &Period, account_code: &str) -> AccountLedger {
        let entries = self.materialize(period).await;
        LedgerSequencer::new(&self.chart).ledger_for(&entries, account_code)
    }

    async fn journal(&self, period: &Period, filter: &JournalFilter) -> Vec<LedgerEntry> {
        let entries = self.materialize(period).await;
        filter_entries(&entries, filter)
    }

    async fn vat_breakdown(
        &self,
        year: i32,
        quarter: Quarter,
        scope: Option<String>,
    ) -> VatBreakdown {
        let period = declaration_period(year, quarter, scope);
        // Independent reads; either source failing degrades to an empty
        // contribution, mirroring the ledger fallback behavior.
        let (clients, suppliers) = join!(
            self.source.client_invoices(&period),
            self.source.supplier_invoices(&period),
        );
        let clients = clients.unwrap_or_else(|e| {
            log::warn!("client_invoices unavailable for VAT report: {}", e);
            Vec::new()
        });
        let suppliers = suppliers.unwrap_or_else(|e| {
            log::warn!("supplier_invoices unavailable for VAT report: {}", e);
            Vec::new()
        });
        VatReporter::new(&self.config).breakdown(&clients, &suppliers)
    }

    async fn filing_deadlines(
        &self,
        year: i32,
        scope: Option<&str>,
        today: NaiveDate,
    ) -> Vec<FilingDeadline> {
        let filed = self
            .store
            .filed_quarters(year, scope)
            .await
            .unwrap_or_else(|e| {
                log::warn!("filed declarations unavailable, assuming none: {}", e);
                Vec::new()
            });
        VatReporter::new(&self.config).deadlines(year, &filed, today)
    }

    async fn mark_filed(&self, filing: &VatFiling) -> Result<(), LedgerError> {
        self.store.mark_filed(filing).await
    }

    fn coherence_checks(&self, breakdown: &VatBreakdown) -> Vec<CoherenceCheck> {
        VatReporter::new(&self.config).coherence_checks(breakdown)
    }
}
