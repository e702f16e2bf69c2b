use std::fmt;

use serde::{Deserialize, Serialize};
use tank_shared::*;

/// Qualitative band for a win rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    VeryGood,
    Good,
    NeedsImprovement,
}

impl Grade {
    pub fn from_win_rate(win_rate: f32) -> Self {
        let pct = win_rate * 100.0;
        if pct > 80.0 {
            Grade::Excellent
        } else if pct > 60.0 {
            Grade::VeryGood
        } else if pct > 40.0 {
            Grade::Good
        } else {
            Grade::NeedsImprovement
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::Excellent => "excellent",
            Grade::VeryGood => "very good",
            Grade::Good => "good",
            Grade::NeedsImprovement => "needs improvement",
        };
        f.write_str(s)
    }
}

/// Aggregate statistics for one tank over many episodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub perspective: TankId,
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f32,
    pub loss_rate: f32,
    pub draw_rate: f32,
    pub mean_return: f32,
    pub std_return: f32,
    pub mean_length: f32,
    pub std_length: f32,
    /// Episodes ended by elimination rather than the step limit.
    pub eliminations: usize,
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    pub rejected: u32,
    /// Hits / resolved bullets.
    pub accuracy: f32,
    pub grade: Grade,
}

/// Summarize `results` from `me`'s point of view.
pub fn summarize(results: &[EpisodeResult], me: TankId) -> EvaluationSummary {
    let episodes = results.len();
    let wins = results.iter().filter(|r| r.winner.is_won_by(me)).count();
    let losses = results
        .iter()
        .filter(|r| r.winner.is_won_by(me.opponent()))
        .count();
    let draws = episodes - wins - losses;
    let eliminations = results
        .iter()
        .filter(|r| r.reason == EndReason::Elimination)
        .count();

    let returns: Vec<f32> = results.iter().map(|r| r.returns[me.index()]).collect();
    let lengths: Vec<f32> = results.iter().map(|r| r.final_step as f32).collect();
    let (mean_return, std_return) = mean_std(&returns);
    let (mean_length, std_length) = mean_std(&lengths);

    let mut totals = TankStats::default();
    for r in results {
        let s = r.stats.tank(me);
        totals.shots += s.shots;
        totals.hits += s.hits;
        totals.misses += s.misses;
        totals.rejected += s.rejected;
    }

    let rate = |n: usize| {
        if episodes == 0 {
            0.0
        } else {
            n as f32 / episodes as f32
        }
    };
    let win_rate = rate(wins);

    EvaluationSummary {
        perspective: me,
        episodes,
        wins,
        losses,
        draws,
        win_rate,
        loss_rate: rate(losses),
        draw_rate: rate(draws),
        mean_return,
        std_return,
        mean_length,
        std_length,
        eliminations,
        shots: totals.shots,
        hits: totals.hits,
        misses: totals.misses,
        rejected: totals.rejected,
        accuracy: totals.accuracy(),
        grade: Grade::from_win_rate(win_rate),
    }
}

/// Population mean and standard deviation; zeros for an empty slice.
fn mean_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
    (mean, var.sqrt())
}
