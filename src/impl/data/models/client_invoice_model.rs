use iso_currency::Currency;
use serde_json::Value;

use super::field::FieldResolver;
use crate::entities::{ClientInvoice, ClientInvoiceStatus};

const ID: FieldResolver = FieldResolver::new(&["id"]);
const NUMBER: FieldResolver = FieldResolver::new(&["invoice_number", "number"]);
const NAME: FieldResolver = FieldResolver::new(&["client_name", "customer_name"]);
const NET: FieldResolver = FieldResolver::new(&["total_amount", "amount", "total"]);
const TAX_AMOUNT: FieldResolver = FieldResolver::new(&["tax_amount", "vat_amount"]);
const TAX_RATE: FieldResolver = FieldResolver::new(&["tax_rate", "vat_rate"]);
const CURRENCY: FieldResolver = FieldResolver::new(&["currency"]);
const DATE: FieldResolver = FieldResolver::new(&["date_issued", "date_created"]);
const STATUS: FieldResolver = FieldResolver::new(&["status"]);
const SCOPE: FieldResolver = FieldResolver::new(&["owner_company"]);

/// Maps a raw `client_invoices` record to the domain shape. Records without
/// a resolvable date are unusable for period aggregation and are skipped
/// upstream.
pub(crate) fn from_value(record: &Value) -> Option<ClientInvoice> {
    let issued_at = match DATE.datetime(record) {
        Some(dt) => dt,
        None => {
            log::debug!("client invoice without usable date skipped");
            return None;
        }
    };

    Some(ClientInvoice {
        id: ID.string(record).unwrap_or_default(),
        invoice_number: NUMBER.string(record),
        client_name: NAME.string(record),
        net_amount: NET.amount(record),
        tax_amount: TAX_AMOUNT.number(record),
        tax_rate: TAX_RATE.number(record),
        currency: parse_currency(CURRENCY.string(record)),
        issued_at,
        status: ClientInvoiceStatus::parse(&STATUS.string(record).unwrap_or_default()),
        scope: SCOPE.string(record),
    })
}

pub(crate) fn parse_currency(code: Option<String>) -> Currency {
    code.and_then(|c| Currency::from_code(&c.to_ascii_uppercase()))
        .unwrap_or(Currency::CHF)
}
