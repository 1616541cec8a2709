//! Metrics panel: live network data, performance and opportunity counters.

use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;
use seiscout_core::Bounded;
use serde::Serialize;

use super::centered;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiveNetworkData {
    /// Gas price in gwei.
    pub gas_price: Bounded,
    /// Network load in percent.
    pub network_load: Bounded,
    /// Block time in seconds.
    pub block_time: Bounded,
    pub pending_txs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performance {
    pub today_pnl: Decimal,
    pub week_pnl: Decimal,
    pub month_pnl: Decimal,
    pub win_rate: Bounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpportunityCounters {
    pub arbitrage: u32,
    pub yield_farming: u32,
    pub liquidation: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsData {
    pub live: LiveNetworkData,
    pub performance: Performance,
    pub opportunities: OpportunityCounters,
}

impl MetricsData {
    pub(crate) fn baseline(rng: &mut StdRng) -> Self {
        Self {
            live: LiveNetworkData {
                gas_price: Bounded::non_negative(12.5 + centered(rng, 2.0)),
                network_load: Bounded::percent(67.0 + centered(rng, 10.0)),
                block_time: Bounded::non_negative(2.1 + centered(rng, 0.2)),
                pending_txs: 1_234 + rng.gen_range(0..100),
            },
            performance: Performance {
                today_pnl: Decimal::new(125_075, 2),
                week_pnl: Decimal::new(-34_020, 2),
                month_pnl: Decimal::new(567_030, 2),
                win_rate: Bounded::percent(68.0),
            },
            opportunities: OpportunityCounters {
                arbitrage: 3,
                yield_farming: 7,
                liquidation: 2,
            },
        }
    }

    pub(crate) fn tick(&mut self, rng: &mut StdRng) {
        self.live.gas_price.nudge(centered(rng, 2.0));
        self.live.network_load.nudge(centered(rng, 10.0));
        self.live.block_time.nudge(centered(rng, 0.5));
        let pending_delta = centered(rng, 100.0).floor() as i64;
        self.live.pending_txs = self.live.pending_txs.saturating_add_signed(pending_delta);
    }

    /// Total number of open opportunities.
    pub fn opportunity_total(&self) -> u32 {
        self.opportunities.arbitrage + self.opportunities.yield_farming + self.opportunities.liquidation
    }
}
