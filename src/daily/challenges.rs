//! Daily challenge catalog and progress
//!
//! Challenge *templates* are static; each local calendar day a handful are
//! instantiated onto the profile with concrete targets. Completion is always
//! derived from `current >= target`, never stored on its own.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a challenge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// Minutes of focus logged today.
    FocusMinutes,
    /// Sessions completed today.
    Sessions,
    /// Business collections performed today.
    Collections,
    /// Cash earned today (whole dollars).
    CashEarned,
}

impl ChallengeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FocusMinutes => "focus_minutes",
            Self::Sessions => "sessions",
            Self::Collections => "collections",
            Self::CashEarned => "cash_earned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "focus_minutes" => Some(Self::FocusMinutes),
            "sessions" => Some(Self::Sessions),
            "collections" => Some(Self::Collections),
            "cash_earned" => Some(Self::CashEarned),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FocusMinutes => "Focus minutes",
            Self::Sessions => "Sessions completed",
            Self::Collections => "Businesses collected",
            Self::CashEarned => "Cash earned",
        }
    }
}

/// Template a daily challenge is sampled from.
struct ChallengeTemplate {
    kind: ChallengeKind,
    targets: &'static [u32],
    /// Rewards per unit of target, so harder rolls pay more.
    xp_per_unit: f64,
    cash_per_unit: f64,
}

static TEMPLATES: &[ChallengeTemplate] = &[
    ChallengeTemplate {
        kind: ChallengeKind::FocusMinutes,
        targets: &[30, 60, 90, 120],
        xp_per_unit: 2.0,
        cash_per_unit: 5.0,
    },
    ChallengeTemplate {
        kind: ChallengeKind::Sessions,
        targets: &[2, 3, 5],
        xp_per_unit: 40.0,
        cash_per_unit: 100.0,
    },
    ChallengeTemplate {
        kind: ChallengeKind::Collections,
        targets: &[3, 5, 8],
        xp_per_unit: 20.0,
        cash_per_unit: 60.0,
    },
    ChallengeTemplate {
        kind: ChallengeKind::CashEarned,
        targets: &[500, 1_000, 2_500],
        xp_per_unit: 0.2,
        cash_per_unit: 0.0,
    },
];

/// Number of challenges offered per day.
pub const CHALLENGES_PER_DAY: usize = 3;

/// One instantiated daily challenge on the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub kind: ChallengeKind,
    pub target: u32,
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub reward_claimed: bool,
    pub xp_reward: u64,
    pub cash_reward: f64,
}

impl DailyChallenge {
    /// Derived, never stored: done iff progress reached the target.
    pub fn is_completed(&self) -> bool {
        self.current >= self.target
    }

    pub fn progress_percent(&self) -> f32 {
        if self.target == 0 {
            1.0
        } else {
            (self.current as f32 / self.target as f32).min(1.0)
        }
    }
}

/// Sample today's challenge set: distinct kinds, random targets.
pub fn sample_challenges<R: Rng>(rng: &mut R) -> Vec<DailyChallenge> {
    let mut picked: Vec<&ChallengeTemplate> = TEMPLATES.iter().collect();
    picked.shuffle(rng);
    picked
        .into_iter()
        .take(CHALLENGES_PER_DAY)
        .map(|template| {
            let target = *template
                .targets
                .choose(rng)
                .expect("templates always list at least one target");
            DailyChallenge {
                kind: template.kind,
                target,
                current: 0,
                reward_claimed: false,
                xp_reward: (target as f64 * template.xp_per_unit).round() as u64,
                cash_reward: (target as f64 * template.cash_per_unit).round(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_distinct_kinds() {
        let mut rng = StdRng::seed_from_u64(3);
        let challenges = sample_challenges(&mut rng);
        assert_eq!(challenges.len(), CHALLENGES_PER_DAY);
        let mut kinds: Vec<_> = challenges.iter().map(|c| c.kind.as_str()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), CHALLENGES_PER_DAY);
    }

    #[test]
    fn test_completion_is_derived() {
        let mut challenge = DailyChallenge {
            kind: ChallengeKind::Sessions,
            target: 3,
            current: 2,
            reward_claimed: false,
            xp_reward: 120,
            cash_reward: 300.0,
        };
        assert!(!challenge.is_completed());
        challenge.current = 3;
        assert!(challenge.is_completed());
        challenge.current = 99;
        assert!(challenge.is_completed());
    }

    #[test]
    fn test_rewards_scale_with_target() {
        let mut rng = StdRng::seed_from_u64(11);
        for challenge in sample_challenges(&mut rng) {
            assert!(challenge.xp_reward > 0);
        }
    }
}
