use chrono::NaiveDate;

use crate::domain::logic::trial_balance::BALANCE_EPSILON;
use crate::entities::{
    ClientInvoice, ClientInvoiceStatus, CoherenceCheck, DeadlineStatus, FilingDeadline, Period,
    Quarter, RateLine, ReportingConfig, SupplierInvoice, VatBreakdown, VatBucketKey,
};

/// Classifies invoice tax rates into the statutory buckets and derives the
/// declaration figures for a period.
pub(crate) struct VatReporter<'a> {
    config: &'a ReportingConfig,
}

impl<'a> VatReporter<'a> {
    pub(crate) fn new(config: &'a ReportingConfig) -> Self {
        Self { config }
    }

    /// Accumulates collected (customer side) and deductible (supplier side)
    /// VAT per bucket. An explicit positive `tax_amount` wins; otherwise the
    /// tax is derived from the net amount and the bucket's nominal rate.
    /// The net amount feeds the bucket's turnover either way. Cancelled
    /// customer invoices are ignored.
    pub(crate) fn breakdown(
        &self,
        clients: &[ClientInvoice],
        suppliers: &[SupplierInvoice],
    ) -> VatBreakdown {
        let table = &self.config.vat;
        let mut turnover = BucketAccumulator::default();
        let mut collected = BucketAccumulator::default();
        let mut deductible = BucketAccumulator::default();

        let mut client_count = 0usize;
        for invoice in clients {
            if invoice.status == ClientInvoiceStatus::Cancelled {
                continue;
            }
            client_count += 1;
            let key = table.classify(invoice.tax_rate);
            let net = self.config.to_base(invoice.net_amount, invoice.currency);
            let tax = match invoice.tax_amount {
                Some(explicit) if explicit > 0.0 => {
                    self.config.to_base(explicit, invoice.currency)
                }
                _ => net * table.bucket(key).rate,
            };
            collected.add(key, tax);
            turnover.add(key, net);
        }

        for invoice in suppliers {
            let key = table.classify(invoice.tax_rate);
            let net = self.config.to_base(invoice.net_amount, invoice.currency);
            let tax = match invoice.tax_amount {
                Some(explicit) if explicit > 0.0 => {
                    self.config.to_base(explicit, invoice.currency)
                }
                _ => net * table.bucket(key).rate,
            };
            deductible.add(key, tax);
        }

        let lines: Vec<RateLine> = VatBucketKey::ALL
            .into_iter()
            .map(|key| RateLine {
                key,
                display: table.bucket(key).display.clone(),
                turnover: turnover.get(key),
                collected: collected.get(key),
                deductible: deductible.get(key),
            })
            .collect();

        let total_collected = collected.total();
        let total_deductible = deductible.total();
        let balance = total_collected - total_deductible;

        VatBreakdown {
            lines,
            total_turnover: turnover.total(),
            total_collected,
            total_deductible,
            net_payable: balance.max(0.0),
            net_credit: (-balance).max(0.0),
            client_invoice_count: client_count,
            supplier_invoice_count: suppliers.len(),
        }
    }

    /// The four quarters of a year with their computed deadline, the
    /// persisted filed flags merged in, and the status derived against the
    /// supplied evaluation date.
    pub(crate) fn deadlines(
        &self,
        year: i32,
        filed: &[Quarter],
        today: NaiveDate,
    ) -> Vec<FilingDeadline> {
        Quarter::ALL
            .into_iter()
            .map(|quarter| {
                let deadline = self.config.deadlines.deadline(quarter, year);
                let is_filed = filed.contains(&quarter);
                FilingDeadline {
                    year,
                    quarter,
                    deadline,
                    filed: is_filed,
                    status: self.deadline_status(deadline, is_filed, today),
                }
            })
            .collect()
    }

    pub(crate) fn deadline_status(
        &self,
        deadline: NaiveDate,
        filed: bool,
        today: NaiveDate,
    ) -> DeadlineStatus {
        if filed {
            return DeadlineStatus::Filed;
        }
        let days_left = (deadline - today).num_days();
        if days_left < 0 {
            DeadlineStatus::Overdue
        } else if days_left <= self.config.due_soon_days {
            DeadlineStatus::DueSoon
        } else {
            DeadlineStatus::Upcoming
        }
    }

    /// Internal-consistency controls over a computed breakdown. All of
    /// these hold by construction; a failed check indicates figures were
    /// edited after computation.
    pub(crate) fn coherence_checks(&self, breakdown: &VatBreakdown) -> Vec<CoherenceCheck> {
        let collected_sum: f64 = breakdown.lines.iter().map(|l| l.collected).sum();
        let deductible_sum: f64 = breakdown.lines.iter().map(|l| l.deductible).sum();

        let collected_ok = (breakdown.total_collected - collected_sum).abs() < BALANCE_EPSILON;
        let deductible_ok = (breakdown.total_deductible - deductible_sum).abs() < BALANCE_EPSILON;
        let exclusive_ok = breakdown.net_payable < BALANCE_EPSILON
            || breakdown.net_credit < BALANCE_EPSILON;

        vec![
            CoherenceCheck {
                label: "Coherence TVA collectee",
                passed: collected_ok,
                detail: format!(
                    "total {:.2} vs somme par taux {:.2}",
                    breakdown.total_collected, collected_sum
                ),
            },
            CoherenceCheck {
                label: "Coherence impot prealable",
                passed: deductible_ok,
                detail: format!(
                    "total {:.2} vs somme par taux {:.2}",
                    breakdown.total_deductible, deductible_sum
                ),
            },
            CoherenceCheck {
                label: "Solde exclusif",
                passed: exclusive_ok,
                detail: format!(
                    "a payer {:.2} / credit {:.2}",
                    breakdown.net_payable, breakdown.net_credit
                ),
            },
        ]
    }
}

/// Period covered by a quarterly declaration, scope included.
pub(crate) fn declaration_period(year: i32, quarter: Quarter, scope: Option<String>) -> Period {
    let mut period = Period::quarter(year, quarter);
    period.scope = scope;
    period
}

#[derive(Default)]
struct BucketAccumulator([f64; 3]);

impl BucketAccumulator {
    fn index(key: VatBucketKey) -> usize {
        match key {
            VatBucketKey::Standard => 0,
            VatBucketKey::Reduced => 1,
            VatBucketKey::Accommodation => 2,
        }
    }

    fn add(&mut self, key: VatBucketKey, amount: f64) {
        self.0[Self::index(key)] += amount;
    }

    fn get(&self, key: VatBucketKey) -> f64 {
        self.0[Self::index(key)]
    }

    fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SupplierInvoiceStatus;
    use chrono::NaiveDateTime;
    use iso_currency::Currency;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn client(net: f64, tax_amount: Option<f64>, tax_rate: Option<f64>) -> ClientInvoice {
        ClientInvoice {
            id: "c".to_string(),
            invoice_number: None,
            client_name: None,
            net_amount: net,
            tax_amount,
            tax_rate,
            currency: Currency::CHF,
            issued_at: at(10),
            status: ClientInvoiceStatus::Paid,
            scope: None,
        }
    }

    fn supplier(net: f64, tax_amount: Option<f64>, tax_rate: Option<f64>) -> SupplierInvoice {
        SupplierInvoice {
            id: "s".to_string(),
            invoice_number: None,
            supplier_name: None,
            net_amount: net,
            tax_amount,
            tax_rate,
            currency: Currency::CHF,
            issued_at: at(12),
            status: SupplierInvoiceStatus::Approved,
            scope: None,
        }
    }

    #[test]
    fn statutory_scenario() {
        // One customer invoice 1000 / 81 at the standard rate, one supplier
        // invoice 500 / 13 at the reduced rate.
        let config = ReportingConfig::default();
        let breakdown = VatReporter::new(&config).breakdown(
            &[client(1000.0, Some(81.0), Some(8.1))],
            &[supplier(500.0, Some(13.0), Some(2.6))],
        );

        assert_eq!(breakdown.line(VatBucketKey::Standard).unwrap().collected, 81.0);
        assert_eq!(breakdown.line(VatBucketKey::Reduced).unwrap().deductible, 13.0);
        assert_eq!(breakdown.total_turnover, 1000.0);
        assert!((breakdown.net_payable - 68.0).abs() < 1e-9);
        assert_eq!(breakdown.net_credit, 0.0);
    }

    #[test]
    fn missing_tax_amount_is_derived_from_rate() {
        let config = ReportingConfig::default();
        let breakdown =
            VatReporter::new(&config).breakdown(&[client(1000.0, None, Some(0.081))], &[]);
        let line = breakdown.line(VatBucketKey::Standard).unwrap();
        assert!((line.collected - 81.0).abs() < 1e-9);
        assert_eq!(line.turnover, 1000.0);
    }

    #[test]
    fn fraction_and_percent_rates_land_in_the_same_bucket() {
        let config = ReportingConfig::default();
        let breakdown = VatReporter::new(&config).breakdown(
            &[client(100.0, None, Some(0.026)), client(100.0, None, Some(2.6))],
            &[],
        );
        let line = breakdown.line(VatBucketKey::Reduced).unwrap();
        assert_eq!(line.turnover, 200.0);
        assert!((line.collected - 5.2).abs() < 1e-9);
    }

    #[test]
    fn empty_period_yields_all_zero_breakdown() {
        let config = ReportingConfig::default();
        let breakdown = VatReporter::new(&config).breakdown(&[], &[]);
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total_collected, 0.0);
        assert_eq!(breakdown.total_deductible, 0.0);
        assert_eq!(breakdown.net_payable, 0.0);
        assert_eq!(breakdown.net_credit, 0.0);
    }

    #[test]
    fn cancelled_client_invoices_are_skipped() {
        let config = ReportingConfig::default();
        let mut invoice = client(1000.0, Some(81.0), Some(8.1));
        invoice.status = ClientInvoiceStatus::Cancelled;
        let breakdown = VatReporter::new(&config).breakdown(&[invoice], &[]);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn deductible_surplus_becomes_credit() {
        let config = ReportingConfig::default();
        let breakdown = VatReporter::new(&config)
            .breakdown(&[], &[supplier(1000.0, Some(81.0), Some(8.1))]);
        assert_eq!(breakdown.net_payable, 0.0);
        assert_eq!(breakdown.net_credit, 81.0);
    }

    #[test]
    fn foreign_currency_converts_into_base() {
        let config = ReportingConfig::default();
        let mut invoice = client(100.0, Some(8.1), Some(8.1));
        invoice.currency = Currency::EUR;
        let breakdown = VatReporter::new(&config).breakdown(&[invoice], &[]);
        assert!((breakdown.total_turnover - 94.0).abs() < 1e-9);
        assert!((breakdown.total_collected - 8.1 * 0.94).abs() < 1e-9);
    }

    #[test]
    fn deadline_statuses() {
        let config = ReportingConfig::default();
        let reporter = VatReporter::new(&config);
        let deadline = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2025, 4, d).unwrap();
        assert_eq!(reporter.deadline_status(deadline, true, day(1)), DeadlineStatus::Filed);
        assert_eq!(
            reporter.deadline_status(deadline, false, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
            DeadlineStatus::Overdue
        );
        assert_eq!(reporter.deadline_status(deadline, false, day(15)), DeadlineStatus::DueSoon);
        assert_eq!(
            reporter.deadline_status(deadline, false, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
            DeadlineStatus::Upcoming
        );
        // Boundary: the deadline day itself is due soon, not overdue.
        assert_eq!(reporter.deadline_status(deadline, false, deadline), DeadlineStatus::DueSoon);
    }

    #[test]
    fn year_timeline_merges_filed_flags() {
        let config = ReportingConfig::default();
        let reporter = VatReporter::new(&config);
        let today = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        let timeline = reporter.deadlines(2025, &[Quarter::Q1], today);

        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline[0].status, DeadlineStatus::Filed);
        assert_eq!(timeline[1].status, DeadlineStatus::Overdue);
        assert_eq!(timeline[2].status, DeadlineStatus::Upcoming);
        assert_eq!(timeline[3].deadline, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn coherence_checks_pass_on_computed_breakdown() {
        let config = ReportingConfig::default();
        let reporter = VatReporter::new(&config);
        let breakdown = reporter.breakdown(
            &[client(1000.0, Some(81.0), Some(8.1))],
            &[supplier(500.0, Some(13.0), Some(2.6))],
        );
        assert!(reporter.coherence_checks(&breakdown).iter().all(|c| c.passed));
    }
}
