use crate::entities::{JournalFilter, LedgerEntry};

/// Applies a journal query to materialized entries, preserving their order.
pub(crate) fn filter_entries(entries: &[LedgerEntry], filter: &JournalFilter) -> Vec<LedgerEntry> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    entries
        .iter()
        .filter(|entry| {
            if let Some(needle) = &needle {
                let hit = entry.description.to_lowercase().contains(needle)
                    || entry.entry_number.to_lowercase().contains(needle)
                    || entry.account_code.contains(needle.as_str())
                    || entry.counterpart_code.contains(needle.as_str());
                if !hit {
                    return false;
                }
            }
            let date = entry.occurred_at.date();
            if let Some(from) = filter.from {
                if date < from {
                    return false;
                }
            }
            if let Some(to) = filter.to {
                if date > to {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}
