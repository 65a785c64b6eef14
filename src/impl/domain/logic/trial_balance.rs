use std::collections::BTreeMap;

use crate::entities::{
    AccountRow, ChartOfAccounts, ClassSection, LedgerEntry, Side, TrialBalance,
};

/// Currency minor-unit epsilon used for the double-entry invariant check.
pub(crate) const BALANCE_EPSILON: f64 = 0.01;

/// Aggregates canonical entries into per-account, per-class totals.
///
/// Every chart account is seeded at zero so known accounts keep their
/// reference labels; accounts outside the chart are created ad hoc with the
/// class derived from the code's first digit. Rows left at zero on both
/// sides are excluded from the result. Single pass over the entry set.
pub(crate) struct TrialBalanceBuilder<'a> {
    chart: &'a ChartOfAccounts,
}

impl<'a> TrialBalanceBuilder<'a> {
    pub(crate) fn new(chart: &'a ChartOfAccounts) -> Self {
        Self { chart }
    }

    pub(crate) fn build(&self, entries: &[LedgerEntry]) -> TrialBalance {
        // BTreeMap keeps accounts in code order and classes in class order.
        let mut accounts: BTreeMap<String, AccountRow> = self
            .chart
            .accounts()
            .iter()
            .map(|a| {
                (
                    a.code.to_string(),
                    AccountRow {
                        code: a.code.to_string(),
                        label: a.label.to_string(),
                        class: a.class,
                        debit: 0.0,
                        credit: 0.0,
                    },
                )
            })
            .collect();

        for entry in entries {
            if entry.account_code.is_empty() {
                continue;
            }
            let row = accounts
                .entry(entry.account_code.clone())
                .or_insert_with(|| AccountRow {
                    code: entry.account_code.clone(),
                    label: if entry.account_label.is_empty() {
                        self.chart.label_for(&entry.account_code)
                    } else {
                        entry.account_label.clone()
                    },
                    class: self.chart.class_for(&entry.account_code),
                    debit: 0.0,
                    credit: 0.0,
                });
            match entry.side {
                Side::Debit => row.debit += entry.amount,
                Side::Credit => row.credit += entry.amount,
            }
        }

        let mut classes: BTreeMap<u32, ClassSection> = BTreeMap::new();
        for row in accounts.into_values() {
            if row.debit == 0.0 && row.credit == 0.0 {
                continue;
            }
            let section = classes
                .entry(row.class.digit())
                .or_insert_with(|| ClassSection {
                    class: row.class,
                    accounts: Vec::new(),
                    debit_total: 0.0,
                    credit_total: 0.0,
                });
            section.debit_total += row.debit;
            section.credit_total += row.credit;
            section.accounts.push(row);
        }

        let classes: Vec<ClassSection> = classes.into_values().collect();
        let grand_debit: f64 = classes.iter().map(|c| c.debit_total).sum();
        let grand_credit: f64 = classes.iter().map(|c| c.credit_total).sum();
        let unbalanced = (grand_debit - grand_credit).abs() > BALANCE_EPSILON;
        if unbalanced {
            log::warn!(
                "trial balance out of balance: debit {:.2} vs credit {:.2}",
                grand_debit,
                grand_credit
            );
        }

        TrialBalance {
            classes,
            grand_debit,
            grand_credit,
            unbalanced,
        }
    }
}
