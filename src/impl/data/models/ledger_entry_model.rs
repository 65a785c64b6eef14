use serde_json::Value;

use super::field::FieldResolver;
use crate::entities::{EntryStatus, LedgerEntry, Provenance, Side};

const ID: FieldResolver = FieldResolver::new(&["id"]);
const ENTRY_NUMBER: FieldResolver = FieldResolver::new(&["entry_number"]);
const DESCRIPTION: FieldResolver = FieldResolver::new(&["description", "label"]);
const AMOUNT: FieldResolver = FieldResolver::new(&["amount"]);
const SIDE: FieldResolver = FieldResolver::new(&["type", "side"]);
const ACCOUNT_CODE: FieldResolver = FieldResolver::new(&["account_code"]);
const ACCOUNT_LABEL: FieldResolver = FieldResolver::new(&["account_label"]);
const COUNTERPART_CODE: FieldResolver = FieldResolver::new(&["counterpart_code"]);
const COUNTERPART_LABEL: FieldResolver = FieldResolver::new(&["counterpart_label"]);
const DATE: FieldResolver = FieldResolver::new(&["date_created", "date"]);
const STATUS: FieldResolver = FieldResolver::new(&["status"]);
const SCOPE: FieldResolver = FieldResolver::new(&["owner_company"]);

/// Maps a native `accounting_entries` record, already canonical, onto the
/// domain shape. A record without a side, a positive amount or a date is
/// not a usable ledger leg and is dropped with a warning.
pub(crate) fn from_value(record: &Value, sequence: u64) -> Option<LedgerEntry> {
    let side = match SIDE.string(record).as_deref().map(str::to_ascii_lowercase) {
        Some(ref s) if s == "debit" => Side::Debit,
        Some(ref s) if s == "credit" => Side::Credit,
        other => {
            log::warn!("native entry with unusable side {:?} skipped", other);
            return None;
        }
    };
    let amount = AMOUNT.amount(record);
    if amount <= 0.0 {
        log::warn!("native entry with non-positive amount {} skipped", amount);
        return None;
    }
    let occurred_at = match DATE.datetime(record) {
        Some(dt) => dt,
        None => {
            log::warn!("native entry without usable date skipped");
            return None;
        }
    };

    let status = match STATUS.string(record).as_deref().map(str::to_ascii_lowercase) {
        Some(ref s) if s == "draft" => EntryStatus::Draft,
        _ => EntryStatus::Validated,
    };

    Some(LedgerEntry {
        sequence,
        entry_number: ENTRY_NUMBER
            .string(record)
            .unwrap_or_else(|| format!("E-{:04}", sequence)),
        description: DESCRIPTION.string(record).unwrap_or_default(),
        amount,
        side,
        account_code: ACCOUNT_CODE.string(record).unwrap_or_default(),
        account_label: ACCOUNT_LABEL.string(record).unwrap_or_default(),
        counterpart_code: COUNTERPART_CODE.string(record).unwrap_or_default(),
        counterpart_label: COUNTERPART_LABEL.string(record).unwrap_or_default(),
        occurred_at,
        status,
        scope: SCOPE.string(record),
        provenance: Provenance::Native,
        source_ref: ID.string(record),
    })
}
