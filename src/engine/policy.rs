use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EngineError;

/// Named difficulty level selecting a [`Policy`] and a question subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Normal,
    Hard,
    Hardcore,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Normal,
        DifficultyTier::Hard,
        DifficultyTier::Hardcore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Normal => "normal",
            DifficultyTier::Hard => "hard",
            DifficultyTier::Hardcore => "hardcore",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Normal => "Normal",
            DifficultyTier::Hard => "Hard",
            DifficultyTier::Hardcore => "Hardcore",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "A gentle mode for beginners.",
            DifficultyTier::Normal => "A balanced mode for average players.",
            DifficultyTier::Hard => "A challenging mode for experienced players.",
            DifficultyTier::Hardcore => "The toughest mode: one mistake and no skips.",
        }
    }

    /// Hardcore never allows skipping, whatever its policy says.
    pub fn allows_skips(self) -> bool {
        self != DifficultyTier::Hardcore
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DifficultyTier {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DifficultyTier::ALL
            .into_iter()
            .find(|tier| tier.name() == wanted)
            .ok_or_else(|| EngineError::InvalidTier(s.to_string()))
    }
}

/// Immutable per-tier budgets, resolved once at round start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub max_time_seconds: u32,
    pub max_errors: u32,
    pub max_skips: u32,
    /// When set, spending the last skip on a skip-enabled tier ends the round
    /// with `SkipsExhausted`. Off for every standard tier.
    #[serde(default)]
    pub skips_end_round: bool,
}

impl Policy {
    pub const fn new(max_time_seconds: u32, max_errors: u32, max_skips: u32) -> Self {
        Self {
            max_time_seconds,
            max_errors,
            max_skips,
            skips_end_round: false,
        }
    }

    #[must_use]
    pub fn with_skips_end_round(mut self, enabled: bool) -> Self {
        self.skips_end_round = enabled;
        self
    }
}

/// Source of per-tier budgets.
pub trait DifficultyPolicy {
    /// Returns `None` when this source has no budget for `tier`.
    fn policy_for(&self, tier: DifficultyTier) -> Option<Policy>;
}

/// The four built-in tiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPolicy {
    skips_end_round: bool,
}

impl StandardPolicy {
    pub const EASY: Policy = Policy::new(540, 8, 8);
    pub const NORMAL: Policy = Policy::new(320, 4, 4);
    pub const HARD: Policy = Policy::new(180, 2, 2);
    pub const HARDCORE: Policy = Policy::new(120, 1, 0);

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skips_end_round(mut self, enabled: bool) -> Self {
        self.skips_end_round = enabled;
        self
    }
}

impl DifficultyPolicy for StandardPolicy {
    fn policy_for(&self, tier: DifficultyTier) -> Option<Policy> {
        let policy = match tier {
            DifficultyTier::Easy => Self::EASY,
            DifficultyTier::Normal => Self::NORMAL,
            DifficultyTier::Hard => Self::HARD,
            DifficultyTier::Hardcore => Self::HARDCORE,
        };
        Some(policy.with_skips_end_round(self.skips_end_round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_values() {
        let policies = StandardPolicy::new();
        let table = [
            (DifficultyTier::Easy, (540, 8, 8)),
            (DifficultyTier::Normal, (320, 4, 4)),
            (DifficultyTier::Hard, (180, 2, 2)),
            (DifficultyTier::Hardcore, (120, 1, 0)),
        ];
        for (tier, (time, errors, skips)) in table {
            let policy = policies.policy_for(tier).unwrap();
            assert_eq!(policy.max_time_seconds, time, "{tier}");
            assert_eq!(policy.max_errors, errors, "{tier}");
            assert_eq!(policy.max_skips, skips, "{tier}");
            assert!(!policy.skips_end_round);
        }
    }

    #[test]
    fn test_skips_end_round_flag_propagates() {
        let policies = StandardPolicy::new().with_skips_end_round(true);
        assert!(policies.policy_for(DifficultyTier::Normal).unwrap().skips_end_round);
    }

    #[test]
    fn test_parse_tier_names() {
        assert_eq!("easy".parse::<DifficultyTier>(), Ok(DifficultyTier::Easy));
        assert_eq!(" Hardcore ".parse::<DifficultyTier>(), Ok(DifficultyTier::Hardcore));
        assert_eq!("NORMAL".parse::<DifficultyTier>(), Ok(DifficultyTier::Normal));
    }

    #[test]
    fn test_parse_unknown_tier() {
        assert_eq!(
            "custom".parse::<DifficultyTier>(),
            Err(EngineError::InvalidTier("custom".to_string()))
        );
        assert!("".parse::<DifficultyTier>().is_err());
    }

    #[test]
    fn test_only_hardcore_forbids_skips() {
        assert!(DifficultyTier::Easy.allows_skips());
        assert!(DifficultyTier::Hard.allows_skips());
        assert!(!DifficultyTier::Hardcore.allows_skips());
    }

    #[test]
    fn test_tier_serde_lowercase() {
        let json = serde_json::to_string(&DifficultyTier::Hardcore).unwrap();
        assert_eq!(json, "\"hardcore\"");
        let tier: DifficultyTier = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(tier, DifficultyTier::Hard);
    }
}
