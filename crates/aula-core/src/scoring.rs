//! Quiz performance tiers.
//!
//! Tiers are checked in order, first match wins:
//!
//! | Tier          | Condition                 |
//! |---------------|---------------------------|
//! | `Perfect`     | `correct == total`        |
//! | `Strong`      | `correct >= 0.7 * total`  |
//! | `Developing`  | `correct >= 0.4 * total`  |
//! | `NeedsReview` | otherwise                 |
//!
//! The thresholds are compared exactly by cross-multiplying in integers
//! (`10 * correct >= 7 * total`), so boundary results never depend on how
//! `0.7` or `0.4` round in binary floating point.
//!
//! A quiz with no questions reports `(0, 0)`, which lands on `Perfect` through
//! the first rule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Feedback tier for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Perfect,
    Strong,
    Developing,
    NeedsReview,
}

impl Tier {
    /// Fixed feedback shown to the learner.
    pub fn message(&self) -> &'static str {
        match self {
            Tier::Perfect => "¡Perfecto! Dominaste este tema. 🏆",
            Tier::Strong => "Muy bien, casi perfecto. Sigue practicando. 💪",
            Tier::Developing => {
                "Vas por buen camino, pero necesitas reforzar algunos puntos. 📘"
            }
            Tier::NeedsReview => "Necesitas repasar el tema con calma. Tú puedes mejorar. 🌱",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Perfect => write!(f, "perfect"),
            Tier::Strong => write!(f, "strong"),
            Tier::Developing => write!(f, "developing"),
            Tier::NeedsReview => write!(f, "needs_review"),
        }
    }
}

/// Classify `correct` answers out of `total` questions.
pub fn score_tier(correct: u32, total: u32) -> Tier {
    let correct = u64::from(correct);
    let total = u64::from(total);

    if correct == total {
        Tier::Perfect
    } else if 10 * correct >= 7 * total {
        Tier::Strong
    } else if 10 * correct >= 4 * total {
        Tier::Developing
    } else {
        Tier::NeedsReview
    }
}

/// Parse a count submitted by a client. Anything that is not a non-negative
/// integer counts as zero.
pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// A scored quiz submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub correct: u32,
    pub total: u32,
    pub tier: Tier,
}

impl QuizOutcome {
    /// Score raw counts.
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct,
            total,
            tier: score_tier(correct, total),
        }
    }

    /// Score counts as submitted in a form, with permissive parsing.
    pub fn from_form(correct: &str, total: &str) -> Self {
        Self::new(parse_count(correct), parse_count(total))
    }

    /// Feedback for this outcome's tier.
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_points() {
        assert_eq!(score_tier(10, 10), Tier::Perfect);
        assert_eq!(score_tier(7, 10), Tier::Strong);
        assert_eq!(score_tier(4, 10), Tier::Developing);
        assert_eq!(score_tier(1, 10), Tier::NeedsReview);
    }

    #[test]
    fn empty_quiz_is_perfect() {
        assert_eq!(score_tier(0, 0), Tier::Perfect);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(score_tier(6, 10), Tier::Developing);
        assert_eq!(score_tier(3, 10), Tier::NeedsReview);
        // exactly 70% of 30
        assert_eq!(score_tier(21, 30), Tier::Strong);
        assert_eq!(score_tier(20, 30), Tier::Developing);
        assert_eq!(score_tier(12, 30), Tier::Developing);
        assert_eq!(score_tier(11, 30), Tier::NeedsReview);
    }

    #[test]
    fn non_integral_thresholds() {
        // 0.7 * 3 = 2.1, 0.4 * 3 = 1.2
        assert_eq!(score_tier(2, 3), Tier::Developing);
        assert_eq!(score_tier(1, 3), Tier::NeedsReview);
        assert_eq!(score_tier(0, 1), Tier::NeedsReview);
    }

    #[test]
    fn more_correct_than_total_is_strong() {
        assert_eq!(score_tier(12, 10), Tier::Strong);
        assert_eq!(score_tier(1, 0), Tier::Strong);
    }

    #[test]
    fn large_counts_do_not_overflow() {
        assert_eq!(score_tier(u32::MAX, u32::MAX), Tier::Perfect);
        assert_eq!(score_tier(u32::MAX - 1, u32::MAX), Tier::Strong);
    }

    #[test]
    fn parse_count_is_permissive() {
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count(" 12 "), 12);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("2.5"), 0);
    }

    #[test]
    fn outcome_from_form() {
        let outcome = QuizOutcome::from_form("4", "ten");
        assert_eq!(outcome.correct, 4);
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.tier, Tier::Strong);

        let outcome = QuizOutcome::from_form("9", "10");
        assert_eq!(outcome.tier, Tier::Strong);
        assert!(outcome.message().starts_with("Muy bien"));
    }

    #[test]
    fn every_tier_has_a_message() {
        for tier in [
            Tier::Perfect,
            Tier::Strong,
            Tier::Developing,
            Tier::NeedsReview,
        ] {
            assert!(!tier.message().is_empty());
        }
        assert_eq!(Tier::NeedsReview.to_string(), "needs_review");
    }
}
