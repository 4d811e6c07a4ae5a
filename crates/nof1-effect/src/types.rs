//! Types for effect representation

use nof1_confidence::ConfidenceInterval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a pre/post comparison
///
/// The field set is the contract with dashboard code: counts and means of
/// both periods, the bootstrap effect with its interval, and the ISO date the
/// intervention started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectResult {
    /// Non-missing outcomes before the start date
    pub n_pre: usize,
    /// Non-missing outcomes on or after the start date
    pub n_post: usize,
    pub pre_mean: f64,
    pub post_mean: f64,
    /// Mean of the bootstrap distribution of `post_mean - pre_mean`
    pub effect_mean: f64,
    /// Lower percentile bound of the bootstrap distribution
    pub ci_low: f64,
    /// Upper percentile bound of the bootstrap distribution
    pub ci_high: f64,
    /// First date the flag was on, `YYYY-MM-DD`
    pub start_date: String,
}

impl EffectResult {
    /// Sign of the effect
    pub fn direction(&self) -> EffectDirection {
        EffectDirection::from_effect(self.effect_mean)
    }

    /// Size band of the absolute effect, in outcome units
    pub fn magnitude(&self) -> EffectMagnitude {
        EffectMagnitude::from_effect(self.effect_mean)
    }

    /// Effect relative to the pre-period mean, in percent
    ///
    /// `None` when the pre-period mean is not positive.
    pub fn percent_change(&self) -> Option<f64> {
        (self.pre_mean > 0.0).then(|| self.effect_mean / self.pre_mean * 100.0)
    }

    /// True when the interval lies strictly on one side of zero
    pub fn ci_excludes_zero(&self) -> bool {
        self.ci_high < 0.0 || self.ci_low > 0.0
    }

    /// Days of tracking that contributed to the estimate
    pub fn n_total(&self) -> usize {
        self.n_pre + self.n_post
    }

    /// The interval as a [`ConfidenceInterval`] at the level it was computed with
    pub fn interval(&self, confidence_level: f64) -> ConfidenceInterval {
        ConfidenceInterval::new(self.ci_low, self.ci_high, self.effect_mean, confidence_level)
    }
}

impl fmt::Display for EffectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            EffectDirection::NoChange => write!(f, "no change")?,
            direction => write!(f, "{} by {:.2} points", direction, self.effect_mean.abs())?,
        }
        write!(
            f,
            " since {} (CI: {:.2} to {:.2}; pre {:.2}, n={}; post {:.2}, n={})",
            self.start_date,
            self.ci_low,
            self.ci_high,
            self.pre_mean,
            self.n_pre,
            self.post_mean,
            self.n_post
        )
    }
}

/// Direction of the post-period change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectDirection {
    /// Outcome went down (for pain, an improvement)
    Decrease,
    /// Outcome went up
    Increase,
    NoChange,
}

impl EffectDirection {
    pub fn from_effect(effect: f64) -> Self {
        if effect < 0.0 {
            Self::Decrease
        } else if effect > 0.0 {
            Self::Increase
        } else {
            Self::NoChange
        }
    }
}

impl fmt::Display for EffectDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Decrease => "decreased",
            Self::Increase => "increased",
            Self::NoChange => "unchanged",
        };
        write!(f, "{}", s)
    }
}

/// Size bands for raw effects on 0-10 symptom scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EffectMagnitude {
    /// |effect| < 0.5: may not be clinically meaningful
    VerySmall,
    /// |effect| < 1.5
    SmallToModerate,
    /// |effect| < 3.0
    ModerateToLarge,
    VeryLarge,
}

impl EffectMagnitude {
    pub fn from_effect(effect: f64) -> Self {
        let abs_effect = effect.abs();
        if abs_effect < 0.5 {
            Self::VerySmall
        } else if abs_effect < 1.5 {
            Self::SmallToModerate
        } else if abs_effect < 3.0 {
            Self::ModerateToLarge
        } else {
            Self::VeryLarge
        }
    }

    /// Moderate or larger changes are worth acting on
    pub fn is_clinically_meaningful(&self) -> bool {
        matches!(self, Self::ModerateToLarge | Self::VeryLarge)
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::VerySmall => "very small",
            Self::SmallToModerate => "small to moderate",
            Self::ModerateToLarge => "moderate to large",
            Self::VeryLarge => "very large",
        };
        write!(f, "{}", s)
    }
}

/// Which side of the start still needs entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStage {
    /// Before the intervention started
    Before,
    /// On or after the start
    After,
}

impl fmt::Display for TrackingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Before => "before",
            Self::After => "after",
        };
        write!(f, "{}", s)
    }
}

/// Whether a split has enough logged days for a meaningful comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    Ready,
    NeedsMoreData {
        stage: TrackingStage,
        days_needed: usize,
    },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Days still to log; zero when ready
    pub fn days_needed(&self) -> usize {
        match self {
            Self::Ready => 0,
            Self::NeedsMoreData { days_needed, .. } => *days_needed,
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::NeedsMoreData { stage, days_needed } => {
                write!(f, "{days_needed} more day(s) needed {stage} the start")
            }
        }
    }
}
