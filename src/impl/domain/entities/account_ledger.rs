use super::account::AccountClass;
use super::entry::{LedgerEntry, Side};

/// One ledger line: a canonical entry annotated with the running balance
/// after applying it. Only meaningful inside one account's chronological
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub entry: LedgerEntry,
    pub running_balance: f64,
}

/// Chronological ledger of one account, oldest first, with a running
/// balance signed by the account's normal side. The closing balance is the
/// last row's running balance.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountLedger {
    pub account_code: String,
    pub account_label: String,
    pub class: AccountClass,
    pub normal_side: Side,
    pub rows: Vec<LedgerRow>,
}

impl AccountLedger {
    pub fn closing_balance(&self) -> f64 {
        self.rows.last().map(|r| r.running_balance).unwrap_or(0.0)
    }
}
