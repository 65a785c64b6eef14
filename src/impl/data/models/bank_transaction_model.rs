use serde_json::Value;

use super::client_invoice_model::parse_currency;
use super::field::FieldResolver;
use crate::entities::{BankTransaction, TransactionKind};

const ID: FieldResolver = FieldResolver::new(&["id"]);
const REFERENCE: FieldResolver = FieldResolver::new(&["reference"]);
const DESCRIPTION: FieldResolver = FieldResolver::new(&["description", "label"]);
const AMOUNT: FieldResolver = FieldResolver::new(&["amount"]);
const KIND: FieldResolver = FieldResolver::new(&["type"]);
const CURRENCY: FieldResolver = FieldResolver::new(&["currency"]);
const DATE: FieldResolver = FieldResolver::new(&["date", "date_created"]);
const SCOPE: FieldResolver = FieldResolver::new(&["owner_company"]);

pub(crate) fn from_value(record: &Value) -> Option<BankTransaction> {
    let occurred_at = match DATE.datetime(record) {
        Some(dt) => dt,
        None => {
            log::debug!("bank transaction without usable date skipped");
            return None;
        }
    };

    let kind = KIND
        .string(record)
        .and_then(|raw| match raw.to_ascii_lowercase().as_str() {
            "credit" => Some(TransactionKind::Credit),
            "debit" => Some(TransactionKind::Debit),
            _ => None,
        });

    Some(BankTransaction {
        id: ID.string(record).unwrap_or_default(),
        reference: REFERENCE.string(record),
        description: DESCRIPTION.string(record),
        amount: AMOUNT.amount(record),
        kind,
        currency: parse_currency(CURRENCY.string(record)),
        occurred_at,
        scope: SCOPE.string(record),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_the_sign_and_type() {
        let record = json!({
            "id": "bt-1",
            "amount": -250.0,
            "type": "debit",
            "description": "Paiement fournisseur",
            "date": "2025-01-22"
        });
        let tx = from_value(&record).unwrap();
        assert_eq!(tx.amount, -250.0);
        assert_eq!(tx.kind, Some(TransactionKind::Debit));
        assert!(!tx.is_inflow());
    }
}
