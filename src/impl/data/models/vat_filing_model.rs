use serde_json::{json, Value};

use super::field::FieldResolver;
use crate::entities::{Quarter, VatFiling};

const ID: FieldResolver = FieldResolver::new(&["id"]);
const QUARTER: FieldResolver = FieldResolver::new(&["quarter"]);
const STATUS: FieldResolver = FieldResolver::new(&["status"]);
const SCOPE: FieldResolver = FieldResolver::new(&["owner_company"]);

/// Payload for the `vat_declarations` collection.
pub(crate) fn to_value(filing: &VatFiling) -> Value {
    let mut payload = json!({
        "quarter": filing.quarter.index(),
        "year": filing.year,
        "status": "filed",
        "filed_date": filing.filed_on.format("%Y-%m-%d").to_string(),
        "total_collected": filing.total_collected,
        "total_deductible": filing.total_deductible,
        "net_balance": filing.net_balance,
    });
    if let Some(scope) = &filing.scope {
        payload["owner_company"] = Value::String(scope.clone());
    }
    payload
}

pub(crate) fn record_id(record: &Value) -> Option<String> {
    ID.string(record)
}

pub(crate) fn filed_quarter(record: &Value) -> Option<Quarter> {
    if STATUS.string(record).as_deref() != Some("filed") {
        return None;
    }
    QUARTER
        .number(record)
        .and_then(|q| Quarter::from_index(q as u32))
}

pub(crate) fn matches_key(record: &Value, filing: &VatFiling) -> bool {
    let quarter = QUARTER.number(record).map(|q| q as u32);
    let scope = SCOPE.string(record);
    quarter == Some(filing.quarter.index()) && scope.as_deref() == filing.scope.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filing() -> VatFiling {
        VatFiling {
            year: 2025,
            quarter: Quarter::Q2,
            scope: Some("hypervisual".to_string()),
            filed_on: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            total_collected: 81.0,
            total_deductible: 13.0,
            net_balance: 68.0,
        }
    }

    #[test]
    fn round_trips_the_key() {
        let payload = to_value(&filing());
        assert_eq!(filed_quarter(&payload), Some(Quarter::Q2));
        assert!(matches_key(&payload, &filing()));
    }

    #[test]
    fn non_filed_records_are_ignored() {
        let mut payload = to_value(&filing());
        payload["status"] = Value::String("draft".to_string());
        assert_eq!(filed_quarter(&payload), None);
    }
}
