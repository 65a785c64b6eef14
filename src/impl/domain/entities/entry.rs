use chrono::NaiveDateTime;

use super::account::AccountClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    pub fn flip(self) -> Side {
        match self {
            Side::Debit => Side::Credit,
            Side::Credit => Side::Debit,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Debit => "debit",
            Side::Credit => "credit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Draft,
    Validated,
}

/// Where a canonical entry comes from: passed through from a native ledger
/// collection, or synthesized from a commercial document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Native,
    Synthesized,
}

/// Canonical double-entry record. One entry is a single leg; when a
/// commercial document is synthesized, exactly two legs are produced with
/// identical amount and swapped account/counterpart, linked by the same
/// `source_ref`.
///
/// `amount` is strictly positive; the direction is carried by `side`.
/// `sequence` follows materialization (insertion) order and is NOT a
/// chronological order; the materialized list is presented newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub sequence: u64,
    pub entry_number: String,
    pub description: String,
    pub amount: f64,
    pub side: Side,
    pub account_code: String,
    pub account_label: String,
    pub counterpart_code: String,
    pub counterpart_label: String,
    pub occurred_at: NaiveDateTime,
    pub status: EntryStatus,
    pub scope: Option<String>,
    pub provenance: Provenance,
    pub source_ref: Option<String>,
}

impl LedgerEntry {
    pub fn class(&self) -> AccountClass {
        AccountClass::from_code(&self.account_code)
    }
}
