use super::account::AccountClass;

/// Aggregated debit/credit totals for one account over a period.
/// The numeric balance convention is always `debit - credit`; presenting it
/// as a debit-side or credit-side figure is a display concern.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    pub code: String,
    pub label: String,
    pub class: AccountClass,
    pub debit: f64,
    pub credit: f64,
}

impl AccountRow {
    pub fn net_balance(&self) -> f64 {
        self.debit - self.credit
    }
}

/// Accounts of one statutory class, with class-level totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSection {
    pub class: AccountClass,
    pub accounts: Vec<AccountRow>,
    pub debit_total: f64,
    pub credit_total: f64,
}

/// Trial balance for one period: class sections in class order, accounts in
/// code order, plus grand totals. `unbalanced` is a surfaced warning signal,
/// never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBalance {
    pub classes: Vec<ClassSection>,
    pub grand_debit: f64,
    pub grand_credit: f64,
    pub unbalanced: bool,
}

impl TrialBalance {
    pub fn net_balance(&self) -> f64 {
        self.grand_debit - self.grand_credit
    }

    pub fn rows(&self) -> impl Iterator<Item = &AccountRow> {
        self.classes.iter().flat_map(|c| c.accounts.iter())
    }

    /// Headline totals per broad category, summing absolute account
    /// balances, with the period result derived as income minus expenses.
    pub fn class_totals(&self) -> ClassTotals {
        let mut totals = ClassTotals::default();
        for row in self.rows() {
            let balance = row.net_balance().abs();
            match row.class {
                AccountClass::Assets => totals.assets += balance,
                AccountClass::Liabilities => totals.liabilities += balance,
                class if class.is_income() => totals.income += balance,
                class if class.is_expense() => totals.expenses += balance,
                _ => {}
            }
        }
        totals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassTotals {
    pub assets: f64,
    pub liabilities: f64,
    pub income: f64,
    pub expenses: f64,
}

impl ClassTotals {
    pub fn result(&self) -> f64 {
        self.income - self.expenses
    }
}
