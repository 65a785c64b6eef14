use serde_json::Value;

use super::client_invoice_model::parse_currency;
use super::field::FieldResolver;
use crate::entities::{SupplierInvoice, SupplierInvoiceStatus};

const ID: FieldResolver = FieldResolver::new(&["id"]);
const NUMBER: FieldResolver = FieldResolver::new(&["invoice_number", "number"]);
const NAME: FieldResolver = FieldResolver::new(&["supplier_name", "vendor_name"]);
const NET: FieldResolver = FieldResolver::new(&["amount", "total_amount", "total"]);
const TAX_AMOUNT: FieldResolver = FieldResolver::new(&["tax_amount", "vat_amount"]);
const TAX_RATE: FieldResolver = FieldResolver::new(&["tax_rate", "vat_rate"]);
const CURRENCY: FieldResolver = FieldResolver::new(&["currency"]);
const DATE: FieldResolver = FieldResolver::new(&["date_issued", "date_created"]);
const STATUS: FieldResolver = FieldResolver::new(&["status"]);
const SCOPE: FieldResolver = FieldResolver::new(&["owner_company"]);

pub(crate) fn from_value(record: &Value) -> Option<SupplierInvoice> {
    let issued_at = match DATE.datetime(record) {
        Some(dt) => dt,
        None => {
            log::debug!("supplier invoice without usable date skipped");
            return None;
        }
    };

    Some(SupplierInvoice {
        id: ID.string(record).unwrap_or_default(),
        invoice_number: NUMBER.string(record),
        supplier_name: NAME.string(record),
        net_amount: NET.amount(record),
        tax_amount: TAX_AMOUNT.number(record),
        tax_rate: TAX_RATE.number(record),
        currency: parse_currency(CURRENCY.string(record)),
        issued_at,
        status: SupplierInvoiceStatus::parse(&STATUS.string(record).unwrap_or_default()),
        scope: SCOPE.string(record),
    })
}
