#[cfg(not(test))]
use crate::entities::{AccountLedger, ChartOfAccounts, LedgerEntry, LedgerRow};
#[cfg(test)]
use crate::entities::{AccountLedger, ChartOfAccounts, LedgerEntry, LedgerRow, Side};

/// Builds the chronological ledger of one account with a running balance.
///
/// The recurrence is signed by the account's normal side and applied
/// strictly in chronological order from an opening balance of 0; it is not
/// commutative under reordering, so the input is re-sorted ascending by
/// `occurred_at` regardless of how the caller ordered it. One filter, one
/// sort, one scan per requested account.
pub(crate) struct LedgerSequencer<'a> {
    chart: &'a ChartOfAccounts,
}

impl<'a> LedgerSequencer<'a> {
    pub(crate) fn new(chart: &'a ChartOfAccounts) -> Self {
        Self { chart }
    }

    pub(crate) fn ledger_for(&self, entries: &[LedgerEntry], account_code: &str) -> AccountLedger {
        let mut selected: Vec<LedgerEntry> = entries
            .iter()
            .filter(|e| e.account_code == account_code)
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at));

        let class = self.chart.class_for(account_code);
        let normal_side = class.normal_side();
        let account_label = match self.chart.get(account_code) {
            Some(account) => account.label.to_string(),
            None => selected
                .iter()
                .find(|e| !e.account_label.is_empty())
                .map(|e| e.account_label.clone())
                .unwrap_or_else(|| format!("Compte {}", account_code)),
        };

        let mut balance = 0.0;
        let rows = selected
            .into_iter()
            .map(|entry| {
                let signed = if entry.side == normal_side {
                    entry.amount
                } else {
                    -entry.amount
                };
                balance += signed;
                LedgerRow {
                    entry,
                    running_balance: balance,
                }
            })
            .collect();

        AccountLedger {
            account_code: account_code.to_string(),
            account_label,
            class,
            normal_side,
            rows,
        }
    }
}
