use chrono::{Datelike, NaiveDate};

/// Reporting period: an inclusive date range plus an optional ownership
/// scope (the owning company). `scope == None` covers all companies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub scope: Option<String>,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Full calendar year.
    pub fn year(year: i32) -> Self {
        Self::new(
            first_of_month(year, 1),
            last_of_month(year, 12),
        )
    }

    pub fn quarter(year: i32, quarter: Quarter) -> Self {
        let (first, last) = quarter.months();
        Self::new(first_of_month(year, first), last_of_month(year, last))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether a record owned by `owner` belongs to this period's scope.
    pub fn matches_scope(&self, owner: Option<&str>) -> bool {
        match &self.scope {
            None => true,
            Some(scope) => owner == Some(scope.as_str()),
        }
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// 1-based quarter index.
    pub fn index(self) -> u32 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    pub fn from_index(index: u32) -> Option<Quarter> {
        match index {
            1 => Some(Quarter::Q1),
            2 => Some(Quarter::Q2),
            3 => Some(Quarter::Q3),
            4 => Some(Quarter::Q4),
            _ => None,
        }
    }

    /// First and last month of the quarter (1-based).
    pub fn months(self) -> (u32, u32) {
        let first = (self.index() - 1) * 3 + 1;
        (first, first + 2)
    }

    pub fn of(date: NaiveDate) -> Quarter {
        // month0 0..=11, three months per quarter
        Quarter::ALL[(date.month0() / 3) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "T1 (Jan-Mar)",
            Quarter::Q2 => "T2 (Avr-Jun)",
            Quarter::Q3 => "T3 (Jul-Sep)",
            Quarter::Q4 => "T4 (Oct-Dec)",
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // month is always 1..=12 here
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

pub(crate) fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let next = if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };
    next.pred_opt().unwrap_or(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_months_cover_the_year() {
        assert_eq!(Quarter::Q1.months(), (1, 3));
        assert_eq!(Quarter::Q4.months(), (10, 12));
    }

    #[test]
    fn quarter_of_date() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        assert_eq!(Quarter::of(d), Quarter::Q3);
    }

    #[test]
    fn quarter_period_ends_on_last_day() {
        let p = Period::quarter(2025, Quarter::Q2);
        assert_eq!(p.start, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(p.end, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    }

    #[test]
    fn scope_matching() {
        let p = Period::year(2025).with_scope("hypervisual");
        assert!(p.matches_scope(Some("hypervisual")));
        assert!(!p.matches_scope(Some("dainamics")));
        assert!(!p.matches_scope(None));
        assert!(Period::year(2025).matches_scope(None));
    }
}
