use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, used as the window for month-over-month comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1-based month (1 = January)
    pub month: u32,
}

impl CalendarMonth {
    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month before this one (January wraps to December of the prior year).
    #[must_use]
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Whether `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Month a fiscal year starts in (April).
pub const FISCAL_YEAR_START_MONTH: u32 = 4;

/// An April-to-March fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    /// April 1st
    pub start: NaiveDate,
    /// March 31st of the following year
    pub end: NaiveDate,
    /// Short label, e.g. "FY 24-25"
    pub label: String,
}

impl FiscalYear {
    /// The fiscal year containing `date`, shifted by `offset_years`
    /// (negative = earlier years). `None` only if the shift leaves the
    /// representable date range.
    pub fn containing(date: NaiveDate, offset_years: i32) -> Option<Self> {
        let base = if date.month() >= FISCAL_YEAR_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        let start_year = base.checked_add(offset_years)?;
        let start = NaiveDate::from_ymd_opt(start_year, FISCAL_YEAR_START_MONTH, 1)?;
        let end = NaiveDate::from_ymd_opt(start_year.checked_add(1)?, 3, 31)?;
        let label = format!(
            "FY {:02}-{:02}",
            start_year.rem_euclid(100),
            (start_year + 1).rem_euclid(100)
        );
        Some(Self { start, end, label })
    }

    /// Whether `date` falls inside this fiscal year (inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
