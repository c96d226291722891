use std::cmp::Reverse;

use crate::models::trade::TradeOutcome;
use crate::models::trend::StreakSummary;

/// Win/loss streaks over closed trades.
///
/// Trades are put in most-recent-first order here; caller order is not
/// trusted. On equal dates the later input entry counts as more recent.
/// A zero P/L is neither a win nor a loss and breaks any run.
pub struct StreakService;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Loss,
    Flat,
}

fn outcome(pnl: f64) -> Outcome {
    if pnl > 0.0 {
        Outcome::Win
    } else if pnl < 0.0 {
        Outcome::Loss
    } else {
        Outcome::Flat
    }
}

impl StreakService {
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn compute_streaks(&self, trades: &[TradeOutcome]) -> StreakSummary {
        let mut ordered: Vec<(usize, &TradeOutcome)> = trades.iter().enumerate().collect();
        ordered.sort_by_key(|(idx, t)| Reverse((t.date, *idx)));
        let outcomes: Vec<Outcome> = ordered.iter().map(|(_, t)| outcome(t.pnl)).collect();

        let leading = |wanted: Outcome| outcomes.iter().take_while(|o| **o == wanted).count();
        let longest = |wanted: Outcome| {
            outcomes
                .split(|o| *o != wanted)
                .map(<[Outcome]>::len)
                .max()
                .unwrap_or(0)
        };

        StreakSummary {
            current_win_streak: leading(Outcome::Win),
            current_lose_streak: leading(Outcome::Loss),
            longest_win_streak: longest(Outcome::Win),
            longest_lose_streak: longest(Outcome::Loss),
        }
    }
}

impl Default for StreakService {
    fn default() -> Self {
        Self::new()
    }
}
