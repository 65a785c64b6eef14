use thiserror::Error;

/// Errors surfaced across the engine boundary.
///
/// Per-source fetch failures are recoverable: the aggregation pipelines
/// degrade a failing collaborator to an empty contribution instead of
/// propagating, so `Fetch` mostly shows up in logs. The variants that reach
/// callers are the persistence, config and export ones.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("fetch failed for collection '{collection}': {details}")]
    Fetch { collection: String, details: String },

    #[error("invalid record in '{collection}': {details}")]
    InvalidRecord { collection: String, details: String },

    #[error("invalid reporting config: {details}")]
    InvalidConfig { details: String },

    #[error("failed to persist VAT declaration for {period}: {details}")]
    DeclarationPersist { period: String, details: String },

    #[error("export failed: {details}")]
    Export { details: String },

    #[error("error reading file")]
    Read(#[from] std::io::Error),
}

impl LedgerError {
    pub fn fetch(collection: impl Into<String>, details: impl ToString) -> Self {
        LedgerError::Fetch {
            collection: collection.into(),
            details: details.to_string(),
        }
    }

    pub fn invalid_record(collection: impl Into<String>, details: impl ToString) -> Self {
        LedgerError::InvalidRecord {
            collection: collection.into(),
            details: details.to_string(),
        }
    }

    pub fn invalid_config(details: impl ToString) -> Self {
        LedgerError::InvalidConfig {
            details: details.to_string(),
        }
    }

    pub fn declaration_persist(period: impl Into<String>, details: impl ToString) -> Self {
        LedgerError::DeclarationPersist {
            period: period.into(),
            details: details.to_string(),
        }
    }

    pub fn export(details: impl ToString) -> Self {
        LedgerError::Export {
            details: details.to_string(),
        }
    }
}
