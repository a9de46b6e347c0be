//! Point awards for a correct answer.
//!
//! Everything here is pure: the game passes in the scoreboard and the
//! winner's current standing and gets back the number of points to add.

use std::collections::BTreeMap;

use crate::ranking::Scoreboard;

/// Clue multipliers in fifths: 1, 3/5, 2/5, 1/5.
const CLUE_WEIGHTS: [u32; 4] = [5, 3, 2, 1];

/// Multiplier for a clue index; indices past the table reuse the last entry.
pub fn clue_multiplier(clue_index: usize) -> f64 {
    scaled(1.0, clue_index)
}

fn scaled(value: f64, clue_index: usize) -> f64 {
    let w = CLUE_WEIGHTS[clue_index.min(CLUE_WEIGHTS.len() - 1)];
    value * f64::from(w) / 5.0
}

/// Ceiling of the privilege curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxPoints {
    Fixed(i64),
    /// Grows with the average score of the top players.
    Increasing,
}

/// How points scale once enough players are on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardModel {
    /// Linear interpolation between base points and `max_points` by rank.
    Interpolated {
        max_points: MaxPoints,
        unprivileged_group: usize,
    },
    /// Flat ceiling plus a privilege bonus looked up by rank decile.
    QuantileTax {
        max_points: MaxPoints,
        unprivileged_group: usize,
        privilege: BTreeMap<usize, i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub base_points: i64,
    /// `None` disables the privilege curve entirely.
    pub min_users_for_privilege: Option<usize>,
    pub model: RewardModel,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points: 10,
            min_users_for_privilege: Some(15),
            model: RewardModel::Interpolated {
                max_points: MaxPoints::Increasing,
                unprivileged_group: 10,
            },
        }
    }
}

/// Result of [`compute_points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub points: i64,
    /// Set when the privilege curve was applied.
    pub max_points: Option<i64>,
}

/// Points for `player` answering at `clue_index`.
///
/// A player without a score yet is ranked last plus one and counted as an
/// extra player.
pub fn award_for(player: &str, clue_index: usize, scores: &Scoreboard, config: &ScoringConfig) -> Award {
    let mut player_count = scores.len();
    let rank = match scores.rank(player) {
        Some(info) => info.rank,
        None => {
            player_count += 1;
            player_count
        }
    };
    compute_points(clue_index, player_count, rank, scores, config)
}

pub fn compute_points(
    clue_index: usize,
    player_count: usize,
    rank: usize,
    scores: &Scoreboard,
    config: &ScoringConfig,
) -> Award {
    let base = config.base_points;
    let privileged = config
        .min_users_for_privilege
        .is_some_and(|threshold| player_count > threshold);
    if !privileged || player_count == 0 {
        return Award {
            points: scaled(base as f64, clue_index).floor() as i64,
            max_points: None,
        };
    }
    // privileged implies player_count > threshold >= 0
    let threshold = config.min_users_for_privilege.unwrap_or(0);

    match &config.model {
        RewardModel::Interpolated {
            max_points,
            unprivileged_group,
        } => {
            let max = resolve_max(*max_points, *unprivileged_group, base, scores);
            let interpolated = interp(
                rank as f64,
                threshold as f64,
                player_count as f64,
                base as f64,
                max as f64,
            );
            let base_award = interpolated.max(base as f64);
            Award {
                points: scaled(base_award, clue_index).trunc() as i64,
                max_points: Some(max),
            }
        }
        RewardModel::QuantileTax {
            max_points,
            unprivileged_group,
            privilege,
        } => {
            let max = resolve_max(*max_points, *unprivileged_group, base, scores);
            let quantile = rank.saturating_sub(1) * 10 / player_count;
            let bonus = privilege_for(quantile, privilege);
            Award {
                points: (scaled(max.saturating_add(bonus) as f64, clue_index).trunc() as i64)
                    .saturating_add(bonus),
                max_points: Some(max),
            }
        }
    }
}

fn resolve_max(max_points: MaxPoints, group: usize, base: i64, scores: &Scoreboard) -> i64 {
    match max_points {
        MaxPoints::Fixed(n) => n,
        MaxPoints::Increasing => {
            let floor = base as f64 * 1.5;
            let curve = scores
                .average_score(Some(group))
                .map(|avg| avg / (base as f64 * 6.0))
                .unwrap_or(floor);
            curve.max(floor).floor() as i64
        }
    }
}

/// Bonus for the greatest defined quantile not above `quantile`.
fn privilege_for(quantile: usize, table: &BTreeMap<usize, i64>) -> i64 {
    table
        .range(..=quantile)
        .next_back()
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0)
}

fn interp(x: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    if x2 == x1 {
        return y1;
    }
    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}
