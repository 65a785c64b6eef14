use chrono::NaiveDateTime;
use futures::join;

use crate::{
    domain::repositories::entry_source::EntrySource,
    entities::{
        codes, BankTransaction, ChartOfAccounts, ClientInvoice, EntryStatus, LedgerEntry,
        Period, Provenance, Side, SupplierInvoice,
    },
    errors::LedgerError,
};

/// Produces the canonical entry set for a period.
///
/// A non-empty native ledger result is always preferred and passed through
/// unchanged. Otherwise double-entry legs are synthesized from the
/// commercial documents. Either way the result is a pure computed view:
/// re-running on unchanged sources yields identical entries.
pub(crate) struct EntryMaterializer<'a, S: EntrySource> {
    source: &'a S,
    chart: &'a ChartOfAccounts,
}

impl<'a, S: EntrySource> EntryMaterializer<'a, S> {
    pub(crate) fn new(source: &'a S, chart: &'a ChartOfAccounts) -> Self {
        Self { source, chart }
    }

    pub(crate) async fn materialize(&self, period: &Period) -> Vec<LedgerEntry> {
        let native = degrade(
            self.source.native_entries(period).await,
            "accounting_entries",
        );
        if !native.is_empty() {
            log::debug!("using {} native ledger entries", native.len());
            return native;
        }

        // Fallback reconstruction. The three document fetches are
        // independent reads; a failing one contributes nothing without
        // aborting the others.
        let (clients, suppliers, banks) = join!(
            self.source.client_invoices(period),
            self.source.supplier_invoices(period),
            self.source.bank_transactions(period),
        );
        let clients = degrade(clients, "client_invoices");
        let suppliers = degrade(suppliers, "supplier_invoices");
        let banks = degrade(banks, "bank_transactions");

        let mut builder = EntryBuilder::new(self.chart);
        for invoice in &clients {
            builder.push_client_invoice(invoice);
        }
        for invoice in &suppliers {
            builder.push_supplier_invoice(invoice);
        }
        for tx in &banks {
            builder.push_bank_transaction(tx);
        }

        let mut entries = builder.into_entries();
        log::debug!(
            "synthesized {} entries from {} client invoices, {} supplier invoices, {} bank transactions",
            entries.len(),
            clients.len(),
            suppliers.len(),
            banks.len()
        );

        // Newest first for presentation. Sequence numbers keep insertion
        // order and are not chronological.
        entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        entries
    }
}

fn degrade<T>(result: Result<Vec<T>, LedgerError>, collection: &str) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) => {
            log::warn!("source '{}' unavailable, contributing no entries: {}", collection, e);
            Vec::new()
        }
    }
}

/// Accumulates synthesized legs with monotonic sequence numbering.
struct EntryBuilder<'a> {
    chart: &'a ChartOfAccounts,
    entries: Vec<LedgerEntry>,
    next_seq: u64,
}

impl<'a> EntryBuilder<'a> {
    fn new(chart: &'a ChartOfAccounts) -> Self {
        Self {
            chart,
            entries: Vec::new(),
            next_seq: 1,
        }
    }

    fn into_entries(self) -> Vec<LedgerEntry> {
        self.entries
    }

    fn push_leg(
        &mut self,
        description: String,
        amount: f64,
        side: Side,
        account_code: &str,
        counterpart_code: &str,
        occurred_at: NaiveDateTime,
        scope: Option<String>,
        source_ref: String,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(LedgerEntry {
            sequence: seq,
            entry_number: format!("R-{:04}", seq),
            description,
            amount,
            side,
            account_code: account_code.to_string(),
            account_label: self.chart.label_for(account_code),
            counterpart_code: counterpart_code.to_string(),
            counterpart_label: self.chart.label_for(counterpart_code),
            occurred_at,
            status: EntryStatus::Validated,
            scope,
            provenance: Provenance::Synthesized,
            source_ref: Some(source_ref),
        });
    }

    /// Paid/validated customer invoice: debit the debtors account, credit
    /// service revenue, identical amount on both legs.
    fn push_client_invoice(&mut self, invoice: &ClientInvoice) {
        if !invoice.status.is_booked() || invoice.net_amount <= 0.0 {
            return;
        }
        let description = format!(
            "Facture client {} - {}",
            invoice.invoice_number.as_deref().unwrap_or(""),
            invoice.client_name.as_deref().unwrap_or("Client"),
        );
        self.push_leg(
            description.clone(),
            invoice.net_amount,
            Side::Debit,
            codes::DEBTORS,
            codes::SERVICE_REVENUE,
            invoice.issued_at,
            invoice.scope.clone(),
            invoice.id.clone(),
        );
        self.push_leg(
            description,
            invoice.net_amount,
            Side::Credit,
            codes::SERVICE_REVENUE,
            codes::DEBTORS,
            invoice.issued_at,
            invoice.scope.clone(),
            invoice.id.clone(),
        );
    }

    /// Approved/paid supplier invoice: debit accrued third-party services,
    /// credit the creditors account.
    fn push_supplier_invoice(&mut self, invoice: &SupplierInvoice) {
        if !invoice.status.is_booked() || invoice.net_amount <= 0.0 {
            return;
        }
        let description = format!(
            "Facture fournisseur {} - {}",
            invoice.invoice_number.as_deref().unwrap_or(""),
            invoice.supplier_name.as_deref().unwrap_or("Fournisseur"),
        );
        self.push_leg(
            description.clone(),
            invoice.net_amount,
            Side::Debit,
            codes::THIRD_PARTY_SERVICES,
            codes::CREDITORS,
            invoice.issued_at,
            invoice.scope.clone(),
            invoice.id.clone(),
        );
        self.push_leg(
            description,
            invoice.net_amount,
            Side::Credit,
            codes::CREDITORS,
            codes::THIRD_PARTY_SERVICES,
            invoice.issued_at,
            invoice.scope.clone(),
            invoice.id.clone(),
        );
    }

    /// Bank transaction: a single leg against the bank account. The
    /// counterpart is chosen by the transaction's sign, a coarse heuristic
    /// (inflow -> other operating income, outflow -> administrative
    /// expenses), not a true categorization.
    fn push_bank_transaction(&mut self, tx: &BankTransaction) {
        let amount = tx.amount.abs();
        if amount <= 0.0 {
            return;
        }
        let inflow = tx.is_inflow();
        let description = tx
            .description
            .clone()
            .or_else(|| tx.reference.clone())
            .unwrap_or_else(|| "Transaction bancaire".to_string());
        self.push_leg(
            description,
            amount,
            if inflow { Side::Debit } else { Side::Credit },
            codes::BANK,
            if inflow {
                codes::OTHER_OPERATING_INCOME
            } else {
                codes::ADMIN_EXPENSES
            },
            tx.occurred_at,
            tx.scope.clone(),
            tx.id.clone(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        ClientInvoiceStatus, SupplierInvoiceStatus, TransactionKind,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use iso_currency::Currency;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn client_invoice(id: &str, amount: f64, status: ClientInvoiceStatus, day: u32) -> ClientInvoice {
        ClientInvoice {
            id: id.to_string(),
            invoice_number: Some(format!("F-{}", id)),
            client_name: Some("Rolex SA".to_string()),
            net_amount: amount,
            tax_amount: None,
            tax_rate: None,
            currency: Currency::CHF,
            issued_at: at(2025, 1, day),
            status,
            scope: None,
        }
    }

    fn supplier_invoice(id: &str, amount: f64, status: SupplierInvoiceStatus, day: u32) -> SupplierInvoice {
        SupplierInvoice {
            id: id.to_string(),
            invoice_number: Some(format!("S-{}", id)),
            supplier_name: Some("Dupont".to_string()),
            net_amount: amount,
            tax_amount: None,
            tax_rate: None,
            currency: Currency::CHF,
            issued_at: at(2025, 1, day),
            status,
            scope: None,
        }
    }

    #[derive(Default)]
    struct FakeSource {
        native: Vec<LedgerEntry>,
        clients: Vec<ClientInvoice>,
        suppliers: Vec<SupplierInvoice>,
        banks: Vec<BankTransaction>,
        fail_banks: bool,
    }

    #[async_trait]
    impl EntrySource for FakeSource {
        async fn native_entries(&self, _: &Period) -> Result<Vec<LedgerEntry>, LedgerError> {
            Ok(self.native.clone())
        }
        async fn client_invoices(&self, _: &Period) -> Result<Vec<ClientInvoice>, LedgerError> {
            Ok(self.clients.clone())
        }
        async fn supplier_invoices(&self, _: &Period) -> Result<Vec<SupplierInvoice>, LedgerError> {
            Ok(self.suppliers.clone())
        }
        async fn bank_transactions(&self, _: &Period) -> Result<Vec<BankTransaction>, LedgerError> {
            if self.fail_banks {
                return Err(LedgerError::fetch("bank_transactions", "boom"));
            }
            Ok(self.banks.clone())
        }
    }

    fn sum_side(entries: &[LedgerEntry], side: Side) -> f64 {
        entries.iter().filter(|e| e.side == side).map(|e| e.amount).sum()
    }

    #[tokio::test]
    async fn synthesized_batch_is_balanced() {
        let source = FakeSource {
            clients: vec![
                client_invoice("c1", 1000.0, ClientInvoiceStatus::Paid, 10),
                client_invoice("c2", 250.5, ClientInvoiceStatus::Validated, 12),
                client_invoice("c3", 99.0, ClientInvoiceStatus::Draft, 13),
            ],
            suppliers: vec![supplier_invoice("s1", 500.0, SupplierInvoiceStatus::Approved, 11)],
            ..Default::default()
        };
        let chart = ChartOfAccounts::kafer();
        let entries = EntryMaterializer::new(&source, &chart)
            .materialize(&Period::year(2025))
            .await;

        // Two booked client invoices and one supplier invoice, two legs each.
        assert_eq!(entries.len(), 6);
        let debits = sum_side(&entries, Side::Debit);
        let credits = sum_side(&entries, Side::Credit);
        assert!((debits - credits).abs() < 0.01);
        assert_eq!(debits, 1750.5);
        assert!(entries.iter().all(|e| e.amount > 0.0));
        assert!(entries.iter().all(|e| e.provenance == Provenance::Synthesized));
    }

    #[tokio::test]
    async fn legs_share_source_ref_and_swap_accounts() {
        let source = FakeSource {
            clients: vec![client_invoice("c1", 1000.0, ClientInvoiceStatus::Paid, 10)],
            ..Default::default()
        };
        let chart = ChartOfAccounts::kafer();
        let entries = EntryMaterializer::new(&source, &chart)
            .materialize(&Period::year(2025))
            .await;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source_ref, entries[1].source_ref);
        let debit = entries.iter().find(|e| e.side == Side::Debit).unwrap();
        let credit = entries.iter().find(|e| e.side == Side::Credit).unwrap();
        assert_eq!(debit.account_code, codes::DEBTORS);
        assert_eq!(debit.counterpart_code, codes::SERVICE_REVENUE);
        assert_eq!(credit.account_code, codes::SERVICE_REVENUE);
        assert_eq!(credit.counterpart_code, codes::DEBTORS);
        assert_eq!(debit.account_label, "Debiteurs (creances clients)");
    }

    #[tokio::test]
    async fn bank_counterpart_follows_sign() {
        let tx = |id: &str, amount: f64| BankTransaction {
            id: id.to_string(),
            reference: None,
            description: Some("Virement".to_string()),
            amount,
            kind: None,
            currency: Currency::CHF,
            occurred_at: at(2025, 2, 1),
            scope: None,
        };
        let source = FakeSource {
            banks: vec![tx("t1", 120.0), tx("t2", -80.0)],
            ..Default::default()
        };
        let chart = ChartOfAccounts::kafer();
        let entries = EntryMaterializer::new(&source, &chart)
            .materialize(&Period::year(2025))
            .await;

        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert_eq!(entry.account_code, codes::BANK);
            assert!(entry.amount > 0.0);
        }
        let inflow = entries.iter().find(|e| e.source_ref.as_deref() == Some("t1")).unwrap();
        assert_eq!(inflow.side, Side::Debit);
        assert_eq!(inflow.counterpart_code, codes::OTHER_OPERATING_INCOME);
        let outflow = entries.iter().find(|e| e.source_ref.as_deref() == Some("t2")).unwrap();
        assert_eq!(outflow.side, Side::Credit);
        assert_eq!(outflow.counterpart_code, codes::ADMIN_EXPENSES);
    }

    #[tokio::test]
    async fn typed_credit_transaction_counts_as_inflow() {
        let source = FakeSource {
            banks: vec![BankTransaction {
                id: "t1".to_string(),
                reference: Some("REF".to_string()),
                description: None,
                amount: -50.0,
                kind: Some(TransactionKind::Credit),
                currency: Currency::CHF,
                occurred_at: at(2025, 2, 1),
                scope: None,
            }],
            ..Default::default()
        };
        let chart = ChartOfAccounts::kafer();
        let entries = EntryMaterializer::new(&source, &chart)
            .materialize(&Period::year(2025))
            .await;
        assert_eq!(entries[0].side, Side::Debit);
        assert_eq!(entries[0].description, "REF");
    }

    #[tokio::test]
    async fn native_entries_win_over_synthesis() {
        let native = LedgerEntry {
            sequence: 1,
            entry_number: "E-1".to_string(),
            description: "Ecriture native".to_string(),
            amount: 42.0,
            side: Side::Debit,
            account_code: "1020".to_string(),
            account_label: "Banque".to_string(),
            counterpart_code: "3200".to_string(),
            counterpart_label: "Ventes de services".to_string(),
            occurred_at: at(2025, 1, 1),
            status: EntryStatus::Validated,
            scope: None,
            provenance: Provenance::Native,
            source_ref: None,
        };
        let source = FakeSource {
            native: vec![native.clone()],
            clients: vec![client_invoice("c1", 1000.0, ClientInvoiceStatus::Paid, 10)],
            ..Default::default()
        };
        let chart = ChartOfAccounts::kafer();
        let entries = EntryMaterializer::new(&source, &chart)
            .materialize(&Period::year(2025))
            .await;
        assert_eq!(entries, vec![native]);
    }

    #[tokio::test]
    async fn failing_source_is_isolated() {
        let source = FakeSource {
            clients: vec![client_invoice("c1", 1000.0, ClientInvoiceStatus::Paid, 10)],
            fail_banks: true,
            ..Default::default()
        };
        let chart = ChartOfAccounts::kafer();
        let entries = EntryMaterializer::new(&source, &chart)
            .materialize(&Period::year(2025))
            .await;
        // Bank source contributes nothing, invoice legs still materialize.
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn materialization_is_deterministic() {
        let source = FakeSource {
            clients: vec![
                client_invoice("c1", 1000.0, ClientInvoiceStatus::Paid, 10),
                client_invoice("c2", 300.0, ClientInvoiceStatus::Paid, 5),
            ],
            suppliers: vec![supplier_invoice("s1", 500.0, SupplierInvoiceStatus::Paid, 8)],
            ..Default::default()
        };
        let chart = ChartOfAccounts::kafer();
        let materializer = EntryMaterializer::new(&source, &chart);
        let first = materializer.materialize(&Period::year(2025)).await;
        let second = materializer.materialize(&Period::year(2025)).await;
        assert_eq!(first, second);
        // Presented newest first.
        assert!(first.windows(2).all(|w| w[0].occurred_at >= w[1].occurred_at));
        // Sequence numbering follows insertion, not chronology.
        assert_eq!(first.iter().map(|e| e.sequence).max(), Some(6));
    }
}
