//! Shared plumbing for the semicolon-delimited exports.

use crate::errors::LedgerError;

pub(crate) fn semicolon_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_writer(Vec::new())
}

pub(crate) fn write_row(
    writer: &mut csv::Writer<Vec<u8>>,
    cells: &[&str],
) -> Result<(), LedgerError> {
    writer
        .write_record(cells)
        .map_err(|e| LedgerError::export(e))
}

pub(crate) fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String, LedgerError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::export(e.error()))?;
    String::from_utf8(bytes).map_err(|e| LedgerError::export(e))
}
