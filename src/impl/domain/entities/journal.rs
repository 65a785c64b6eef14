use chrono::NaiveDate;

/// Journal query over materialized entries: free-text search across
/// description, entry number and account codes, plus an inclusive date
/// range. An empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalFilter {
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl JournalFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }
}
