//! Closed display variants.
//!
//! Severity, risk and pulse tiers are closed enums with one explicit
//! mapping to display attributes, so every view renders a given level the
//! same way.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual tone of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Info,
    Warning,
    Danger,
    Neutral,
}

impl Tone {
    /// CSS class used by the static views.
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Positive => "tone-positive",
            Tone::Info => "tone-info",
            Tone::Warning => "tone-warning",
            Tone::Danger => "tone-danger",
            Tone::Neutral => "tone-neutral",
        }
    }
}

/// Display attributes for a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
    pub css_class: &'static str,
}

impl Badge {
    fn new(label: &'static str, tone: Tone) -> Self {
        Self {
            label,
            tone,
            css_class: tone.css_class(),
        }
    }
}

/// Alert severity / insight impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn badge(self) -> Badge {
        match self {
            Severity::High => Badge::new("high", Tone::Danger),
            Severity::Medium => Badge::new("medium", Tone::Warning),
            Severity::Low => Badge::new("low", Tone::Info),
        }
    }

    pub fn as_str(self) -> &'static str {
        self.badge().label
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(CoreError::UnknownVariant(other.to_string())),
        }
    }
}

/// Risk classification of a counterparty, position or opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn badge(self) -> Badge {
        match self {
            RiskLevel::VeryLow => Badge::new("very low", Tone::Positive),
            RiskLevel::Low => Badge::new("low", Tone::Positive),
            RiskLevel::Medium => Badge::new("medium", Tone::Warning),
            RiskLevel::High => Badge::new("high", Tone::Danger),
        }
    }

    /// Graph node colour (hex) used by the network view.
    pub fn node_color(self) -> &'static str {
        match self {
            RiskLevel::VeryLow | RiskLevel::Low => "#22c55e",
            RiskLevel::Medium => "#f59e0b",
            RiskLevel::High => "#ef4444",
        }
    }

    /// Classify a 0-100 risk score.
    pub fn from_score(score: f64) -> Self {
        if score < 10.0 {
            RiskLevel::VeryLow
        } else if score < 20.0 {
            RiskLevel::Low
        } else if score < 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge().label)
    }
}

/// Colour tier of the pulse score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseTier {
    Strong,
    Healthy,
    Weak,
    Critical,
}

impl PulseTier {
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            PulseTier::Strong
        } else if score > 60.0 {
            PulseTier::Healthy
        } else if score > 40.0 {
            PulseTier::Weak
        } else {
            PulseTier::Critical
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            PulseTier::Strong => Badge::new("strong", Tone::Positive),
            PulseTier::Healthy => Badge::new("healthy", Tone::Info),
            PulseTier::Weak => Badge::new("weak", Tone::Warning),
            PulseTier::Critical => Badge::new("critical", Tone::Danger),
        }
    }
}
