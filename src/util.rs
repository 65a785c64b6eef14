use chrono::NaiveDate;

use crate::{
    domain::usecases::reporting_usecase::{ReportingUsecase as _, ReportingUsecaseImpl},
    entities::{
        AccountLedger, CoherenceCheck, FilingDeadline, JournalFilter, LedgerEntry, Period,
        Quarter, ReportingConfig, TrialBalance, VatBreakdown, VatFiling,
    },
    errors::LedgerError,
    presentation::{balance_csv::BalanceCsvPrinter, vat_csv::VatFormPrinter},
    sources::{DeclarationStore, EntrySource},
};

pub use crate::presentation::amount_fmt::format_swiss_amount;

/// Top-level engine facade: bundles the reporting usecase with the tabular
/// printers over an injected entry source and declaration store.
///
/// All queries are pure aggregations over freshly fetched snapshots, so one
/// engine can serve concurrent callers for different periods or scopes.
pub struct LedgerEngine<S, D>
where
    S: EntrySource,
    D: DeclarationStore,
{
    usecase: ReportingUsecaseImpl<S, D>,
    balance_printer: BalanceCsvPrinter,
    vat_printer: VatFormPrinter,
}

impl<S, D> LedgerEngine<S, D>
where
    S: EntrySource,
    D: DeclarationStore,
{
    pub fn new(source: S, store: D) -> Self {
        Self::with_config(source, store, ReportingConfig::default())
    }

    pub fn with_config(source: S, store: D, config: ReportingConfig) -> Self {
        Self {
            usecase: ReportingUsecaseImpl::new(source, store, config),
            balance_printer: BalanceCsvPrinter::new(),
            vat_printer: VatFormPrinter::new(),
        }
    }

    pub fn config(&self) -> &ReportingConfig {
        self.usecase.config()
    }

    /// Canonical entry set for the period, newest first. Recomputed on
    /// every call; a partially unavailable backend yields a partial result
    /// rather than an error.
    pub async fn entries(&self, period: &Period) -> Vec<LedgerEntry> {
        self.usecase.materialize(period).await
    }

    pub async fn trial_balance(&self, period: &Period) -> TrialBalance {
        self.usecase.trial_balance(period).await
    }

    pub async fn account_ledger(&self, period: &Period, account_code: &str) -> AccountLedger {
        self.usecase.account_ledger(period, account_code).await
    }

    pub async fn journal(&self, period: &Period, filter: &JournalFilter) -> Vec<LedgerEntry> {
        self.usecase.journal(period, filter).await
    }

    pub async fn vat_breakdown(
        &self,
        year: i32,
        quarter: Quarter,
        scope: Option<String>,
    ) -> VatBreakdown {
        self.usecase.vat_breakdown(year, quarter, scope).await
    }

    pub async fn filing_deadlines(
        &self,
        year: i32,
        scope: Option<&str>,
        today: NaiveDate,
    ) -> Vec<FilingDeadline> {
        self.usecase.filing_deadlines(year, scope, today).await
    }

    /// Persists the filed flag for a quarter. On failure the computed
    /// report stays valid and the call can simply be retried.
    pub async fn mark_filed(&self, filing: &VatFiling) -> Result<(), LedgerError> {
        self.usecase.mark_filed(filing).await
    }

    pub fn coherence_checks(&self, breakdown: &VatBreakdown) -> Vec<CoherenceCheck> {
        self.usecase.coherence_checks(breakdown)
    }

    pub fn trial_balance_csv(&self, balance: &TrialBalance) -> Result<String, LedgerError> {
        self.balance_printer.print(balance)
    }

    pub fn vat_form_csv(
        &self,
        breakdown: &VatBreakdown,
        period_label: &str,
    ) -> Result<String, LedgerError> {
        self.vat_printer.print(breakdown, period_label)
    }
}

/// Loads a `ReportingConfig` from a RON file.
pub async fn load_config<P>(path: P) -> Result<ReportingConfig, LedgerError>
where
    P: AsRef<std::path::Path>,
{
    let raw = tokio::fs::read_to_string(path).await?;
    ron::from_str(&raw).map_err(|e| LedgerError::invalid_config(e))
}
