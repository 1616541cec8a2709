//! Pulse panel: activity score and its four factors.

use rand::rngs::StdRng;
use seiscout_core::{Bounded, PulseTier};
use serde::Serialize;

use super::centered;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseFactors {
    pub trading: Bounded,
    pub defi: Bounded,
    pub staking: Bounded,
    pub network: Bounded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseData {
    pub score: Bounded,
    pub tier: PulseTier,
    pub factors: PulseFactors,
}

impl PulseData {
    pub(crate) fn baseline(rng: &mut StdRng) -> Self {
        let score = Bounded::percent(87.0 + centered(rng, 4.0));
        Self {
            tier: PulseTier::from_score(score.value()),
            score,
            factors: PulseFactors {
                trading: Bounded::percent(92.0 + centered(rng, 4.0)),
                defi: Bounded::percent(78.0 + centered(rng, 4.0)),
                staking: Bounded::percent(85.0 + centered(rng, 4.0)),
                network: Bounded::percent(94.0 + centered(rng, 4.0)),
            },
        }
    }

    pub(crate) fn tick(&mut self, rng: &mut StdRng) {
        let score = self.score.nudge(centered(rng, 3.0));
        self.tier = PulseTier::from_score(score);
        self.factors.trading.nudge(centered(rng, 5.0));
        self.factors.defi.nudge(centered(rng, 4.0));
        self.factors.staking.nudge(centered(rng, 2.0));
        self.factors.network.nudge(centered(rng, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_score_and_factors_clamped() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut data = PulseData::baseline(&mut rng);
        for _ in 0..10_000 {
            data.tick(&mut rng);
            let f = data.factors;
            for v in [
                data.score.value(),
                f.trading.value(),
                f.defi.value(),
                f.staking.value(),
                f.network.value(),
            ] {
                assert!((0.0..=100.0).contains(&v));
            }
            assert_eq!(data.tier, PulseTier::from_score(data.score.value()));
        }
    }
}
