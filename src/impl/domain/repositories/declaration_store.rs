use async_trait::async_trait;

use crate::entities::{Quarter, VatFiling};
use crate::errors::LedgerError;

/// Persistence for the filed flag, the only mutable fact in this subsystem.
#[async_trait]
pub trait DeclarationStore: Send + Sync {
    /// Idempotent upsert keyed by `(year, quarter, scope)`; concurrent
    /// duplicate submissions resolve last-write-wins. A failure here never
    /// invalidates an already-computed report and the action is retryable.
    async fn mark_filed(&self, filing: &VatFiling) -> Result<(), LedgerError>;

    /// Quarters of `year` already marked filed for the given scope.
    async fn filed_quarters(
        &self,
        year: i32,
        scope: Option<&str>,
    ) -> Result<Vec<Quarter>, LedgerError>;
}
