//! Panel data sets.
//!
//! Every panel starts from a baseline drawn from a fixed data set with a
//! little seeded jitter, then evolves by bounded random deltas on each tick.
//! Fields that have a declared range are `Bounded`, so they never leave it.

mod alerts;
mod analysis;
mod behavior;
mod metrics;
mod network;
mod opportunities;
mod overview;
mod pulse;

pub use alerts::{AlertRule, AlertSetting, AlertsData, Strategy, StrategyStatus};
pub use analysis::{AnalysisData, ProtocolInteraction, RiskFactor, RiskProfile, TradingPatterns};
pub use behavior::{BehaviorData, BehaviorPatterns, Insight, TradingStyle};
pub use metrics::{LiveNetworkData, MetricsData, OpportunityCounters, Performance};
pub use network::{GraphEdge, GraphNode, NetworkData, NetworkGraph, NetworkStats};
pub use opportunities::{AlphaTrader, CopyTradeIdea, Opportunity, OpportunitiesData, OpportunityType};
pub use overview::{
    ActivityEntry, FlashAlert, LiveMetrics, MetricDelta, OverviewData, OverviewDeltas, Portfolio,
    TokenHolding, MAX_FLASH_ALERTS,
};
pub use pulse::{PulseData, PulseFactors};

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use crate::kind::PanelKind;

/// Data of one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelData {
    Overview(OverviewData),
    Analysis(AnalysisData),
    Behavior(BehaviorData),
    Alerts(AlertsData),
    Metrics(MetricsData),
    Network(NetworkData),
    Opportunities(OpportunitiesData),
    Pulse(PulseData),
}

impl PanelData {
    /// Initial data for `kind`.
    pub fn baseline(kind: PanelKind, rng: &mut StdRng) -> Self {
        match kind {
            PanelKind::Overview => PanelData::Overview(OverviewData::baseline(rng)),
            PanelKind::Analysis => PanelData::Analysis(AnalysisData::baseline(rng)),
            PanelKind::Behavior => PanelData::Behavior(BehaviorData::baseline(rng)),
            PanelKind::Alerts => PanelData::Alerts(AlertsData::baseline()),
            PanelKind::Metrics => PanelData::Metrics(MetricsData::baseline(rng)),
            PanelKind::Network => PanelData::Network(NetworkData::baseline(rng)),
            PanelKind::Opportunities => {
                PanelData::Opportunities(OpportunitiesData::baseline(rng))
            }
            PanelKind::Pulse => PanelData::Pulse(PulseData::baseline(rng)),
        }
    }

    /// Apply one round of bounded deltas in place.
    pub fn tick(&mut self, rng: &mut StdRng) {
        match self {
            PanelData::Overview(d) => d.tick(rng),
            PanelData::Analysis(d) => d.tick(rng),
            PanelData::Behavior(d) => d.tick(rng),
            PanelData::Alerts(_) => {}
            PanelData::Metrics(d) => d.tick(rng),
            PanelData::Network(d) => d.tick(rng),
            PanelData::Opportunities(d) => d.tick(rng),
            PanelData::Pulse(d) => d.tick(rng),
        }
    }

    pub fn kind(&self) -> PanelKind {
        match self {
            PanelData::Overview(_) => PanelKind::Overview,
            PanelData::Analysis(_) => PanelKind::Analysis,
            PanelData::Behavior(_) => PanelKind::Behavior,
            PanelData::Alerts(_) => PanelKind::Alerts,
            PanelData::Metrics(_) => PanelKind::Metrics,
            PanelData::Network(_) => PanelKind::Network,
            PanelData::Opportunities(_) => PanelKind::Opportunities,
            PanelData::Pulse(_) => PanelKind::Pulse,
        }
    }
}

/// Uniform delta in `[-span / 2, span / 2)`.
pub(crate) fn centered(rng: &mut StdRng, span: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * span
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_baseline_kind_matches() {
        let mut rng = StdRng::seed_from_u64(1);
        for kind in PanelKind::ALL {
            assert_eq!(PanelData::baseline(kind, &mut rng).kind(), kind);
        }
    }

    #[test]
    fn test_same_seed_same_baseline() {
        for kind in PanelKind::ALL {
            let a = PanelData::baseline(kind, &mut StdRng::seed_from_u64(9));
            let b = PanelData::baseline(kind, &mut StdRng::seed_from_u64(9));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_serializes_with_panel_tag() {
        let data = PanelData::baseline(PanelKind::Pulse, &mut StdRng::seed_from_u64(3));
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["panel"], "pulse");
        assert!(json["score"].as_f64().is_some());
    }

    #[test]
    fn test_centered_stays_in_span() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1_000 {
            let d = centered(&mut rng, 10.0);
            assert!((-5.0..5.0).contains(&d));
        }
    }
}
