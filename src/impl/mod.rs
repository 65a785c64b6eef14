// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod memory;
        pub(crate) mod records_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod bank_transaction_model;
        pub(crate) mod client_invoice_model;
        pub(crate) mod field;
        pub(crate) mod ledger_entry_model;
        pub(crate) mod supplier_invoice_model;
        pub(crate) mod vat_filing_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod records_declaration_store;
        pub(crate) mod records_entry_source;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod account;
        pub(crate) mod account_ledger;
        pub(crate) mod config;
        pub(crate) mod document;
        pub(crate) mod entry;
        pub(crate) mod journal;
        pub(crate) mod period;
        pub(crate) mod trial_balance;
        pub(crate) mod vat;
    }
    pub(crate) mod logic {
        pub(crate) mod journal;
        pub(crate) mod materializer;
        pub(crate) mod sequencer;
        pub(crate) mod trial_balance;
        pub(crate) mod vat;
    }
    pub(crate) mod repositories {
        pub(crate) mod declaration_store;
        pub(crate) mod entry_source;
    }
    pub(crate) mod usecases {
        pub(crate) mod reporting_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod amount_fmt;
    pub(crate) mod balance_csv;
    pub(crate) mod csv_writer;
    pub(crate) mod vat_csv;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from
    // the internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::account::*;
        pub use crate::domain::entities::account_ledger::*;
        pub use crate::domain::entities::config::*;
        pub use crate::domain::entities::document::*;
        pub use crate::domain::entities::entry::*;
        pub use crate::domain::entities::journal::*;
        pub use crate::domain::entities::period::*;
        pub use crate::domain::entities::trial_balance::*;
        pub use crate::domain::entities::vat::*;
    }

    pub mod sources {
        pub use crate::data::datasources::memory::MemoryRecordsDatasource;
        pub use crate::data::datasources::records_datasource::{
            collections, RecordFilter, RecordsDatasource,
        };
        pub use crate::data::repositories::records_declaration_store::RecordsDeclarationStore;
        pub use crate::data::repositories::records_entry_source::RecordsEntrySource;
        pub use crate::domain::repositories::declaration_store::DeclarationStore;
        pub use crate::domain::repositories::entry_source::EntrySource;
    }
}
