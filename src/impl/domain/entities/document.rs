use chrono::NaiveDateTime;
use iso_currency::Currency;

/// Customer invoice as fetched from the document collaborator.
///
/// `tax_rate` may arrive either as a percentage (8.1) or as a fraction
/// (0.081); normalization happens at classification time, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientInvoice {
    pub id: String,
    pub invoice_number: Option<String>,
    pub client_name: Option<String>,
    /// Net (HT) amount.
    pub net_amount: f64,
    pub tax_amount: Option<f64>,
    pub tax_rate: Option<f64>,
    pub currency: Currency,
    pub issued_at: NaiveDateTime,
    pub status: ClientInvoiceStatus,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientInvoiceStatus {
    Draft,
    Sent,
    Validated,
    Paid,
    Cancelled,
    Other,
}

impl ClientInvoiceStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "draft" => ClientInvoiceStatus::Draft,
            "sent" => ClientInvoiceStatus::Sent,
            "validated" => ClientInvoiceStatus::Validated,
            "paid" => ClientInvoiceStatus::Paid,
            "cancelled" | "canceled" => ClientInvoiceStatus::Cancelled,
            _ => ClientInvoiceStatus::Other,
        }
    }

    /// Statuses that qualify for ledger reconstruction.
    pub fn is_booked(self) -> bool {
        matches!(self, ClientInvoiceStatus::Paid | ClientInvoiceStatus::Validated)
    }
}

/// Supplier invoice as fetched from the document collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierInvoice {
    pub id: String,
    pub invoice_number: Option<String>,
    pub supplier_name: Option<String>,
    pub net_amount: f64,
    pub tax_amount: Option<f64>,
    pub tax_rate: Option<f64>,
    pub currency: Currency,
    pub issued_at: NaiveDateTime,
    pub status: SupplierInvoiceStatus,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierInvoiceStatus {
    Pending,
    Approved,
    Paid,
    Rejected,
    Other,
}

impl SupplierInvoiceStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => SupplierInvoiceStatus::Pending,
            "approved" => SupplierInvoiceStatus::Approved,
            "paid" => SupplierInvoiceStatus::Paid,
            "rejected" => SupplierInvoiceStatus::Rejected,
            _ => SupplierInvoiceStatus::Other,
        }
    }

    pub fn is_booked(self) -> bool {
        matches!(self, SupplierInvoiceStatus::Approved | SupplierInvoiceStatus::Paid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Credit,
    Debit,
}

/// Bank transaction as fetched from the banking collaborator. `amount` keeps
/// its sign; some deployments additionally type the direction via `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct BankTransaction {
    pub id: String,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub amount: f64,
    pub kind: Option<TransactionKind>,
    pub currency: Currency,
    pub occurred_at: NaiveDateTime,
    pub scope: Option<String>,
}

impl BankTransaction {
    /// Money coming into the bank account (positive amount, or explicitly
    /// typed as a credit).
    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0 || matches!(self.kind, Some(TransactionKind::Credit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_status_parsing() {
        assert_eq!(ClientInvoiceStatus::parse("Paid"), ClientInvoiceStatus::Paid);
        assert_eq!(ClientInvoiceStatus::parse("canceled"), ClientInvoiceStatus::Cancelled);
        assert_eq!(ClientInvoiceStatus::parse("weird"), ClientInvoiceStatus::Other);
        assert!(ClientInvoiceStatus::Validated.is_booked());
        assert!(!ClientInvoiceStatus::Sent.is_booked());
    }

    #[test]
    fn supplier_status_parsing() {
        assert!(SupplierInvoiceStatus::parse("approved").is_booked());
        assert!(SupplierInvoiceStatus::parse("paid").is_booked());
        assert!(!SupplierInvoiceStatus::parse("pending").is_booked());
    }
}
