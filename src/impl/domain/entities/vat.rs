use chrono::NaiveDate;
use serde_derive::Deserialize;

use super::period::Quarter;

/// The three statutory VAT buckets for this jurisdiction (AFC 2025 rates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatBucketKey {
    Standard,
    Reduced,
    Accommodation,
}

impl VatBucketKey {
    pub const ALL: [VatBucketKey; 3] = [
        VatBucketKey::Standard,
        VatBucketKey::Reduced,
        VatBucketKey::Accommodation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VatBucketKey::Standard => "standard",
            VatBucketKey::Reduced => "reduced",
            VatBucketKey::Accommodation => "accommodation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VatBucket {
    /// Nominal rate as a fraction (0.081 = 8.1%).
    pub rate: f64,
    pub label: String,
    pub display: String,
}

impl VatBucket {
    fn new(rate: f64, label: &str, display: &str) -> Self {
        Self {
            rate,
            label: label.to_string(),
            display: display.to_string(),
        }
    }

    /// Nominal rate in percentage points (8.1 for 0.081).
    pub fn percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// Versionable VAT rate table. Injected so historical periods can be
/// evaluated against the rates in force at the time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VatRateTable {
    pub standard: VatBucket,
    pub reduced: VatBucket,
    pub accommodation: VatBucket,
    /// Classification tolerance in percentage points.
    pub tolerance: f64,
}

impl Default for VatRateTable {
    fn default() -> Self {
        Self {
            standard: VatBucket::new(0.081, "Taux normal", "8.1%"),
            reduced: VatBucket::new(0.026, "Taux reduit", "2.6%"),
            accommodation: VatBucket::new(0.038, "Hebergement", "3.8%"),
            tolerance: 0.5,
        }
    }
}

impl VatRateTable {
    pub fn bucket(&self, key: VatBucketKey) -> &VatBucket {
        match key {
            VatBucketKey::Standard => &self.standard,
            VatBucketKey::Reduced => &self.reduced,
            VatBucketKey::Accommodation => &self.accommodation,
        }
    }

    pub fn buckets(&self) -> [(VatBucketKey, &VatBucket); 3] {
        [
            (VatBucketKey::Standard, &self.standard),
            (VatBucketKey::Reduced, &self.reduced),
            (VatBucketKey::Accommodation, &self.accommodation),
        ]
    }

    /// Buckets a raw tax rate. The value may arrive as a percentage (8.1)
    /// or a fraction (0.081): anything <= 1 is treated as a fraction and
    /// scaled to percentage points before matching within `tolerance`.
    ///
    /// Missing, non-numeric and unmatched rates fall back to the standard
    /// bucket. An unmatched genuine outlier rate is therefore silently
    /// misclassified; see the crate docs for the open product question.
    pub fn classify(&self, raw: Option<f64>) -> VatBucketKey {
        let Some(rate) = raw else {
            return VatBucketKey::Standard;
        };
        if !rate.is_finite() {
            return VatBucketKey::Standard;
        }

        let normalized = if rate <= 1.0 { rate * 100.0 } else { rate };

        for (key, bucket) in self.buckets() {
            if (normalized - bucket.percent()).abs() < self.tolerance {
                return key;
            }
        }
        VatBucketKey::Standard
    }
}

/// Statutory filing deadline for one quarter: day/month of the deadline,
/// with `following_year` set when the deadline falls in the next calendar
/// year (the Q4 declaration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct QuarterDeadline {
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub following_year: bool,
}

impl QuarterDeadline {
    const fn on(month: u32, day: u32, following_year: bool) -> Self {
        Self {
            month,
            day,
            following_year,
        }
    }

    pub fn date(&self, year: i32) -> NaiveDate {
        let year = if self.following_year { year + 1 } else { year };
        let month = self.month.clamp(1, 12);
        // Walk the day down so a 31 configured on a short month still lands
        // on a real date.
        let mut day = self.day.clamp(1, 31);
        loop {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return date;
            }
            day -= 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeadlineTable {
    pub q1: QuarterDeadline,
    pub q2: QuarterDeadline,
    pub q3: QuarterDeadline,
    pub q4: QuarterDeadline,
}

impl Default for DeadlineTable {
    fn default() -> Self {
        Self {
            q1: QuarterDeadline::on(4, 30, false),
            q2: QuarterDeadline::on(7, 31, false),
            q3: QuarterDeadline::on(10, 31, false),
            q4: QuarterDeadline::on(2, 28, true),
        }
    }
}

impl DeadlineTable {
    pub fn deadline(&self, quarter: Quarter, year: i32) -> NaiveDate {
        let entry = match quarter {
            Quarter::Q1 => &self.q1,
            Quarter::Q2 => &self.q2,
            Quarter::Q3 => &self.q3,
            Quarter::Q4 => &self.q4,
        };
        entry.date(year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Filed,
    Overdue,
    DueSoon,
    Upcoming,
}

impl DeadlineStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeadlineStatus::Filed => "Declaree",
            DeadlineStatus::Overdue => "En retard",
            DeadlineStatus::DueSoon => "Echeance proche",
            DeadlineStatus::Upcoming => "A venir",
        }
    }
}

/// One quarter's filing line: computed deadline, persisted filed flag, and
/// the status derived from both against the evaluation date.
#[derive(Debug, Clone, PartialEq)]
pub struct FilingDeadline {
    pub year: i32,
    pub quarter: Quarter,
    pub deadline: NaiveDate,
    pub filed: bool,
    pub status: DeadlineStatus,
}

/// Per-bucket breakdown line.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLine {
    pub key: VatBucketKey,
    pub display: String,
    /// Net turnover (HT) of the customer invoices in this bucket.
    pub turnover: f64,
    pub collected: f64,
    pub deductible: f64,
}

impl RateLine {
    pub fn net(&self) -> f64 {
        self.collected - self.deductible
    }
}

/// Derived VAT declaration figures for one period. The statutory cells keep
/// the Formulaire 200 semantics: exactly one of `net_payable` / `net_credit`
/// is non-zero, or both are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct VatBreakdown {
    /// One line per bucket, in `VatBucketKey::ALL` order.
    pub lines: Vec<RateLine>,
    pub total_turnover: f64,
    pub total_collected: f64,
    pub total_deductible: f64,
    pub net_payable: f64,
    pub net_credit: f64,
    pub client_invoice_count: usize,
    pub supplier_invoice_count: usize,
}

impl VatBreakdown {
    pub fn net_balance(&self) -> f64 {
        self.total_collected - self.total_deductible
    }

    pub fn is_empty(&self) -> bool {
        self.client_invoice_count == 0 && self.supplier_invoice_count == 0
    }

    pub fn line(&self, key: VatBucketKey) -> Option<&RateLine> {
        self.lines.iter().find(|l| l.key == key)
    }
}

/// Internal-consistency check over a computed breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CoherenceCheck {
    pub label: &'static str,
    pub passed: bool,
    pub detail: String,
}

/// The subsystem's only persisted mutable fact: a period marked as filed.
/// Upserts are keyed by `(year, quarter, scope)`; duplicates are resolved
/// last-write-wins.
#[derive(Debug, Clone, PartialEq)]
pub struct VatFiling {
    pub year: i32,
    pub quarter: Quarter,
    pub scope: Option<String>,
    pub filed_on: NaiveDate,
    pub total_collected: f64,
    pub total_deductible: f64,
    pub net_balance: f64,
}

impl VatFiling {
    pub fn from_breakdown(
        breakdown: &VatBreakdown,
        year: i32,
        quarter: Quarter,
        scope: Option<String>,
        filed_on: NaiveDate,
    ) -> Self {
        Self {
            year,
            quarter,
            scope,
            filed_on,
            total_collected: breakdown.total_collected,
            total_deductible: breakdown.total_deductible,
            net_balance: breakdown.net_balance(),
        }
    }

    pub fn period_label(&self) -> String {
        format!("T{} {}", self.quarter.index(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_accepts_both_rate_shapes() {
        let table = VatRateTable::default();
        assert_eq!(table.classify(Some(0.081)), VatBucketKey::Standard);
        assert_eq!(table.classify(Some(8.1)), VatBucketKey::Standard);
        assert_eq!(table.classify(Some(0.026)), VatBucketKey::Reduced);
        assert_eq!(table.classify(Some(2.6)), VatBucketKey::Reduced);
        assert_eq!(table.classify(Some(3.8)), VatBucketKey::Accommodation);
    }

    #[test]
    fn classify_tolerance_and_fallback() {
        let table = VatRateTable::default();
        // Within half a percentage point.
        assert_eq!(table.classify(Some(8.3)), VatBucketKey::Standard);
        assert_eq!(table.classify(Some(2.2)), VatBucketKey::Reduced);
        // Outliers and junk default to standard.
        assert_eq!(table.classify(Some(20.0)), VatBucketKey::Standard);
        assert_eq!(table.classify(Some(f64::NAN)), VatBucketKey::Standard);
        assert_eq!(table.classify(None), VatBucketKey::Standard);
    }

    #[test]
    fn quarterly_deadlines() {
        let table = DeadlineTable::default();
        assert_eq!(
            table.deadline(Quarter::Q1, 2025),
            NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()
        );
        assert_eq!(
            table.deadline(Quarter::Q3, 2025),
            NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()
        );
        // Q4 rolls into the following calendar year.
        assert_eq!(
            table.deadline(Quarter::Q4, 2025),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }

    #[test]
    fn deadline_day_clamps_to_month_length() {
        let d = QuarterDeadline::on(2, 31, false);
        assert_eq!(d.date(2025), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }
}
