//! Behavior panel: trading style classification and insights.

use rand::rngs::StdRng;
use rand::Rng;
use seiscout_core::{Badge, Bounded, Severity};
use serde::Serialize;

use super::centered;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingStyle {
    pub label: &'static str,
    pub confidence: Bounded,
    pub characteristics: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorPatterns {
    pub most_active_hours: &'static str,
    pub avg_hold_days: u32,
    pub preferred_protocols: Vec<&'static str>,
    pub risk_tolerance: Bounded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub title: &'static str,
    pub description: &'static str,
    pub impact: Severity,
    pub badge: Badge,
}

impl Insight {
    fn new(title: &'static str, description: &'static str, impact: Severity) -> Self {
        Self {
            title,
            description,
            impact,
            badge: impact.badge(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorData {
    pub trading_style: TradingStyle,
    pub patterns: BehaviorPatterns,
    pub insights: Vec<Insight>,
}

impl BehaviorData {
    pub(crate) fn baseline(rng: &mut StdRng) -> Self {
        Self {
            trading_style: TradingStyle {
                label: "Aggressive DeFi Farmer",
                confidence: Bounded::percent(87.0 + centered(rng, 6.0)),
                characteristics: vec![
                    "High-frequency trading",
                    "Yield farming focused",
                    "Risk-tolerant",
                    "Early adopter",
                ],
            },
            patterns: BehaviorPatterns {
                most_active_hours: "14:00-16:00 UTC",
                avg_hold_days: 12 + rng.gen_range(0..4),
                preferred_protocols: vec!["Uniswap", "Aave", "Compound"],
                risk_tolerance: Bounded::percent(75.0 + centered(rng, 8.0)),
            },
            insights: vec![
                Insight::new(
                    "Peak Activity Window",
                    "Most transactions occur during US market hours",
                    Severity::High,
                ),
                Insight::new(
                    "Yield Optimization",
                    "Frequently moves funds to higher-yield opportunities",
                    Severity::Medium,
                ),
                Insight::new(
                    "Gas Efficiency",
                    "Batches transactions to minimize gas costs",
                    Severity::Low,
                ),
            ],
        }
    }

    pub(crate) fn tick(&mut self, rng: &mut StdRng) {
        self.trading_style.confidence.nudge(centered(rng, 2.0));
        self.patterns.risk_tolerance.nudge(centered(rng, 2.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_insight_badges_follow_impact() {
        let data = BehaviorData::baseline(&mut StdRng::seed_from_u64(2));
        for insight in &data.insights {
            assert_eq!(insight.badge, insight.impact.badge());
        }
    }

    #[test]
    fn test_percentages_clamped() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut data = BehaviorData::baseline(&mut rng);
        for _ in 0..2_000 {
            data.tick(&mut rng);
            assert!((0.0..=100.0).contains(&data.trading_style.confidence.value()));
            assert!((0.0..=100.0).contains(&data.patterns.risk_tolerance.value()));
        }
    }
}
