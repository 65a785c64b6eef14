use super::entry::Side;

/// Statutory account class, keyed by the leading digit of the account code
/// (Kafer SME chart numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccountClass {
    Assets,
    Liabilities,
    Revenue,
    MaterialExpenses,
    PersonnelExpenses,
    OperatingExpenses,
    NonOperatingIncome,
    NonOperatingExpenses,
    Closing,
}

impl AccountClass {
    pub const ALL: [AccountClass; 9] = [
        AccountClass::Assets,
        AccountClass::Liabilities,
        AccountClass::Revenue,
        AccountClass::MaterialExpenses,
        AccountClass::PersonnelExpenses,
        AccountClass::OperatingExpenses,
        AccountClass::NonOperatingIncome,
        AccountClass::NonOperatingExpenses,
        AccountClass::Closing,
    ];

    pub fn from_digit(digit: u32) -> Option<AccountClass> {
        match digit {
            1 => Some(AccountClass::Assets),
            2 => Some(AccountClass::Liabilities),
            3 => Some(AccountClass::Revenue),
            4 => Some(AccountClass::MaterialExpenses),
            5 => Some(AccountClass::PersonnelExpenses),
            6 => Some(AccountClass::OperatingExpenses),
            7 => Some(AccountClass::NonOperatingIncome),
            8 => Some(AccountClass::NonOperatingExpenses),
            9 => Some(AccountClass::Closing),
            _ => None,
        }
    }

    /// Class of an ad-hoc account, derived from the first digit of its code.
    /// Codes that do not start with a digit fall into the closing class.
    pub fn from_code(code: &str) -> AccountClass {
        code.chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .and_then(AccountClass::from_digit)
            .unwrap_or(AccountClass::Closing)
    }

    pub fn digit(self) -> u32 {
        match self {
            AccountClass::Assets => 1,
            AccountClass::Liabilities => 2,
            AccountClass::Revenue => 3,
            AccountClass::MaterialExpenses => 4,
            AccountClass::PersonnelExpenses => 5,
            AccountClass::OperatingExpenses => 6,
            AccountClass::NonOperatingIncome => 7,
            AccountClass::NonOperatingExpenses => 8,
            AccountClass::Closing => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountClass::Assets => "Actifs",
            AccountClass::Liabilities => "Passifs",
            AccountClass::Revenue => "Produits",
            AccountClass::MaterialExpenses => "Charges matieres",
            AccountClass::PersonnelExpenses => "Charges de personnel",
            AccountClass::OperatingExpenses => "Autres charges",
            AccountClass::NonOperatingIncome => "Produits hors exploitation",
            AccountClass::NonOperatingExpenses => "Charges hors exploitation",
            AccountClass::Closing => "Cloture",
        }
    }

    /// Assets (1) and the expense classes (4, 5, 6, 8) rest on the debit
    /// side; everything else rests on the credit side.
    pub fn normal_side(self) -> Side {
        match self {
            AccountClass::Assets
            | AccountClass::MaterialExpenses
            | AccountClass::PersonnelExpenses
            | AccountClass::OperatingExpenses
            | AccountClass::NonOperatingExpenses => Side::Debit,
            _ => Side::Credit,
        }
    }

    pub fn is_income(self) -> bool {
        matches!(
            self,
            AccountClass::Revenue | AccountClass::NonOperatingIncome
        )
    }

    pub fn is_expense(self) -> bool {
        matches!(
            self,
            AccountClass::MaterialExpenses
                | AccountClass::PersonnelExpenses
                | AccountClass::OperatingExpenses
                | AccountClass::NonOperatingExpenses
        )
    }
}

/// One account of the reference chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub code: &'static str,
    pub label: &'static str,
    pub class: AccountClass,
}

/// Role accounts the fallback synthesis books against.
pub mod codes {
    pub const BANK: &str = "1020";
    pub const DEBTORS: &str = "1100";
    pub const CREDITORS: &str = "2000";
    pub const SERVICE_REVENUE: &str = "3200";
    pub const OTHER_OPERATING_INCOME: &str = "3400";
    pub const THIRD_PARTY_SERVICES: &str = "4400";
    pub const ADMIN_EXPENSES: &str = "6500";
}

/// Fixed Kafer SME chart of accounts. Static reference data; accounts seen
/// in entries but absent here are created ad hoc with their class derived
/// from the code's first digit.
#[derive(Debug, Clone)]
pub struct ChartOfAccounts {
    accounts: &'static [Account],
}

const fn acc(code: &'static str, label: &'static str, class: AccountClass) -> Account {
    Account { code, label, class }
}

const KAFER_ACCOUNTS: &[Account] = &[
    acc("1000", "Caisse", AccountClass::Assets),
    acc("1020", "Banque (PostFinance, Raiffeisen)", AccountClass::Assets),
    acc("1100", "Debiteurs (creances clients)", AccountClass::Assets),
    acc("1200", "Stock marchandises", AccountClass::Assets),
    acc("2000", "Creanciers (dettes fournisseurs)", AccountClass::Liabilities),
    acc("2100", "Dettes bancaires CT", AccountClass::Liabilities),
    acc("2200", "TVA due", AccountClass::Liabilities),
    acc("3000", "Ventes de marchandises", AccountClass::Revenue),
    acc("3200", "Ventes de services", AccountClass::Revenue),
    acc("3400", "Autres produits d'exploitation", AccountClass::Revenue),
    acc("4000", "Achats de marchandises", AccountClass::MaterialExpenses),
    acc("4400", "Prestations de tiers", AccountClass::MaterialExpenses),
    acc("5000", "Salaires", AccountClass::PersonnelExpenses),
    acc("5200", "Charges sociales (AVS, AI, APG, AC)", AccountClass::PersonnelExpenses),
    acc("6000", "Loyers", AccountClass::OperatingExpenses),
    acc("6100", "Entretien", AccountClass::OperatingExpenses),
    acc("6500", "Frais d'administration", AccountClass::OperatingExpenses),
    acc("6800", "Charges financieres", AccountClass::OperatingExpenses),
    acc("7000", "Produits hors exploitation", AccountClass::NonOperatingIncome),
    acc("8000", "Charges hors exploitation", AccountClass::NonOperatingExpenses),
];

impl Default for ChartOfAccounts {
    fn default() -> Self {
        Self::kafer()
    }
}

impl ChartOfAccounts {
    pub fn kafer() -> Self {
        Self {
            accounts: KAFER_ACCOUNTS,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        self.accounts
    }

    pub fn get(&self, code: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.code == code)
    }

    pub fn label_for(&self, code: &str) -> String {
        match self.get(code) {
            Some(account) => account.label.to_string(),
            None => format!("Compte {}", code),
        }
    }

    /// Class of any account code: chart class when known, first digit
    /// otherwise.
    pub fn class_for(&self, code: &str) -> AccountClass {
        self.get(code)
            .map(|a| a.class)
            .unwrap_or_else(|| AccountClass::from_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_from_code_first_digit() {
        assert_eq!(AccountClass::from_code("1100"), AccountClass::Assets);
        assert_eq!(AccountClass::from_code("6999"), AccountClass::OperatingExpenses);
        assert_eq!(AccountClass::from_code("x"), AccountClass::Closing);
        assert_eq!(AccountClass::from_code(""), AccountClass::Closing);
    }

    #[test]
    fn normal_sides() {
        assert_eq!(AccountClass::Assets.normal_side(), Side::Debit);
        assert_eq!(AccountClass::NonOperatingExpenses.normal_side(), Side::Debit);
        assert_eq!(AccountClass::Liabilities.normal_side(), Side::Credit);
        assert_eq!(AccountClass::Revenue.normal_side(), Side::Credit);
        assert_eq!(AccountClass::NonOperatingIncome.normal_side(), Side::Credit);
        assert_eq!(AccountClass::Closing.normal_side(), Side::Credit);
    }

    #[test]
    fn chart_lookup_and_fallback() {
        let chart = ChartOfAccounts::kafer();
        assert_eq!(chart.label_for("1100"), "Debiteurs (creances clients)");
        assert_eq!(chart.label_for("9999"), "Compte 9999");
        assert_eq!(chart.class_for("5200"), AccountClass::PersonnelExpenses);
        assert_eq!(chart.class_for("7777"), AccountClass::NonOperatingIncome);
    }
}
