use serde::{Deserialize, Serialize};

/// Direction of a month-over-month change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Current-vs-previous calendar month spend for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub category: String,

    /// Spend in the reference month
    pub current_amount: f64,

    /// Spend in the month before
    pub previous_amount: f64,

    /// current - previous
    pub change: f64,

    /// change / previous × 100 (100 when the category is new this month)
    pub change_percent: f64,

    pub trend: TrendDirection,
}

/// Win/loss streaks over a trade history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Consecutive wins ending at the most recent trade
    pub current_win_streak: usize,

    /// Consecutive losses ending at the most recent trade
    pub current_lose_streak: usize,

    /// Longest run of wins anywhere in the history
    pub longest_win_streak: usize,

    /// Longest run of losses anywhere in the history
    pub longest_lose_streak: usize,
}
