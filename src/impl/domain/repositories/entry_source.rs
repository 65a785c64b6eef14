use async_trait::async_trait;

use crate::entities::{BankTransaction, ClientInvoice, LedgerEntry, Period, SupplierInvoice};
use crate::errors::LedgerError;

/// Capability giving the engine access to the native ledger and the
/// commercial document collaborators for one period.
///
/// Canonical entries are never persisted by the engine; they are recomputed
/// per query from these sources. Implementations decide where the records
/// live, so a native ledger backend can be swapped in without touching any
/// aggregation logic. The four reads are independent; callers await them
/// concurrently and tolerate any subset failing.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Entries from a native ledger collection, already canonical.
    async fn native_entries(&self, period: &Period) -> Result<Vec<LedgerEntry>, LedgerError>;

    async fn client_invoices(&self, period: &Period) -> Result<Vec<ClientInvoice>, LedgerError>;

    async fn supplier_invoices(&self, period: &Period)
        -> Result<Vec<SupplierInvoice>, LedgerError>;

    async fn bank_transactions(&self, period: &Period)
        -> Result<Vec<BankTransaction>, LedgerError>;
}
