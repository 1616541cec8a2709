//! Overview panel: portfolio summary, live counters and flash alerts.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use seiscout_core::{AlertType, Badge, Bounded, PulseTier, Severity};
use serde::Serialize;

use super::centered;

/// Flash alerts kept, newest first.
pub const MAX_FLASH_ALERTS: usize = 10;

/// Chance that a tick raises a new flash alert.
const FLASH_ALERT_PROBABILITY: f64 = 0.3;

const FLASH_ALERT_TEXTS: [&str; 4] = [
    "New large transaction detected",
    "Arbitrage opportunity found",
    "Unusual trading pattern",
    "Price movement alert",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenHolding {
    pub symbol: &'static str,
    pub amount: Decimal,
    pub value: Decimal,
    /// 24h change in percent.
    pub change_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub action: &'static str,
    pub subject: &'static str,
    pub amount: Decimal,
    pub time: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    pub total_value: Decimal,
    pub change_24h_pct: Decimal,
    pub staking_rewards: Decimal,
    pub liquidity_provided: Decimal,
    pub top_tokens: Vec<TokenHolding>,
    pub recent_activity: Vec<ActivityEntry>,
}

impl Portfolio {
    fn baseline(rng: &mut StdRng) -> Self {
        // Scale the whole book by a small factor so different wallets differ.
        let factor = Decimal::new(rng.gen_range(90..=110), 2);
        let holding = |symbol, amount: i64, value: i64, change: i64| TokenHolding {
            symbol,
            amount: (Decimal::from(amount) * factor).round_dp(2),
            value: (Decimal::from(value) * factor).round_dp(2),
            change_pct: Decimal::new(change, 1),
        };

        Self {
            total_value: (Decimal::new(4_567_890, 2) * factor).round_dp(2),
            change_24h_pct: Decimal::new(125, 1),
            staking_rewards: (Decimal::new(23_456, 2) * factor).round_dp(2),
            liquidity_provided: (Decimal::new(1_234_567, 2) * factor).round_dp(2),
            top_tokens: vec![
                holding("SEI", 15_000, 18_750, 82),
                holding("USDC", 8_500, 8_500, 1),
                holding("ATOM", 450, 5_400, -23),
                holding("OSMO", 2_100, 3_150, 157),
            ],
            recent_activity: vec![
                ActivityEntry {
                    action: "Swap",
                    subject: "USDC → SEI",
                    amount: Decimal::from(500),
                    time: "2 min ago",
                },
                ActivityEntry {
                    action: "Stake",
                    subject: "SEI",
                    amount: Decimal::from(1_000),
                    time: "1 hour ago",
                },
                ActivityEntry {
                    action: "LP Add",
                    subject: "SEI/USDC",
                    amount: Decimal::from(2_500),
                    time: "3 hours ago",
                },
                ActivityEntry {
                    action: "Transfer",
                    subject: "ATOM",
                    amount: Decimal::from(50),
                    time: "6 hours ago",
                },
            ],
        }
    }

    /// Share of the portfolio held in `symbol`, in percent.
    pub fn allocation_pct(&self, symbol: &str) -> Option<Decimal> {
        if self.total_value.is_zero() {
            return None;
        }
        self.top_tokens
            .iter()
            .find(|t| t.symbol == symbol)
            .map(|t| (t.value / self.total_value * Decimal::ONE_HUNDRED).round_dp(1))
    }
}

/// Counters refreshed on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiveMetrics {
    pub tx_count: u64,
    pub fund_flow: Bounded,
    pub token_count: u32,
    pub pulse_score: Bounded,
}

/// Direction of a metric relative to the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDelta {
    Increase,
    Decrease,
    Unchanged,
}

impl MetricDelta {
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            MetricDelta::Increase
        } else if current < previous {
            MetricDelta::Decrease
        } else {
            MetricDelta::Unchanged
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewDeltas {
    pub tx_count: MetricDelta,
    pub fund_flow: MetricDelta,
    pub token_count: MetricDelta,
    pub pulse_score: MetricDelta,
}

impl OverviewDeltas {
    fn unchanged() -> Self {
        Self {
            tx_count: MetricDelta::Unchanged,
            fund_flow: MetricDelta::Unchanged,
            token_count: MetricDelta::Unchanged,
            pulse_score: MetricDelta::Unchanged,
        }
    }

    fn between(prev: &LiveMetrics, cur: &LiveMetrics) -> Self {
        Self {
            tx_count: MetricDelta::between(prev.tx_count as f64, cur.tx_count as f64),
            fund_flow: MetricDelta::between(prev.fund_flow.value(), cur.fund_flow.value()),
            token_count: MetricDelta::between(prev.token_count as f64, cur.token_count as f64),
            pulse_score: MetricDelta::between(prev.pulse_score.value(), cur.pulse_score.value()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashAlert {
    pub id: u64,
    pub alert_type: AlertType,
    pub message: String,
    pub confidence: u8,
    pub severity: Severity,
    pub badge: Badge,
    pub time: &'static str,
}

impl FlashAlert {
    fn new(
        id: u64,
        alert_type: AlertType,
        message: impl Into<String>,
        confidence: u8,
        severity: Severity,
        time: &'static str,
    ) -> Self {
        Self {
            id,
            alert_type,
            message: message.into(),
            confidence,
            severity,
            badge: severity.badge(),
            time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewData {
    pub portfolio: Portfolio,
    pub metrics: LiveMetrics,
    pub deltas: OverviewDeltas,
    pub pulse_tier: PulseTier,
    pub flash_alerts: Vec<FlashAlert>,
    #[serde(skip)]
    next_alert_id: u64,
}

impl OverviewData {
    pub(crate) fn baseline(rng: &mut StdRng) -> Self {
        let portfolio = Portfolio::baseline(rng);
        let metrics = LiveMetrics {
            tx_count: 1_247 + rng.gen_range(0..50),
            fund_flow: Bounded::non_negative(45_678.9 + centered(rng, 2_000.0)),
            token_count: 23,
            pulse_score: Bounded::percent(87.0 + centered(rng, 6.0)),
        };
        let flash_alerts = vec![
            FlashAlert::new(
                1,
                AlertType::WhaleMove,
                "Large SEI transfer detected: 500K tokens",
                94,
                Severity::High,
                "2s ago",
            ),
            FlashAlert::new(
                2,
                AlertType::MevDetected,
                "MEV bot interaction on DEX swap",
                87,
                Severity::Medium,
                "15s ago",
            ),
            FlashAlert::new(
                3,
                AlertType::DcaPattern,
                "Regular buying pattern confirmed",
                96,
                Severity::Low,
                "1m ago",
            ),
            FlashAlert::new(
                4,
                AlertType::YieldOpportunity,
                "High APY pool available: 45%",
                89,
                Severity::Medium,
                "2m ago",
            ),
        ];

        Self {
            portfolio,
            pulse_tier: PulseTier::from_score(metrics.pulse_score.value()),
            metrics,
            deltas: OverviewDeltas::unchanged(),
            flash_alerts,
            next_alert_id: 5,
        }
    }

    pub(crate) fn tick(&mut self, rng: &mut StdRng) {
        let previous = self.metrics;

        self.metrics.tx_count += rng.gen_range(0..3);
        self.metrics.fund_flow.nudge(centered(rng, 1_000.0));
        if rng.gen_bool(0.1) {
            self.metrics.token_count += 1;
        }
        let mut pulse_delta = centered(rng, 5.0);
        if rng.gen_bool(0.2) {
            pulse_delta += centered(rng, 20.0);
        }
        self.metrics.pulse_score.nudge(pulse_delta);
        self.pulse_tier = PulseTier::from_score(self.metrics.pulse_score.value());
        self.deltas = OverviewDeltas::between(&previous, &self.metrics);

        if rng.gen_bool(FLASH_ALERT_PROBABILITY) {
            let alert = self.random_alert(rng);
            self.push_flash_alert(alert);
        }
    }

    /// Prepend `alert`, keeping at most `MAX_FLASH_ALERTS`.
    pub fn push_flash_alert(&mut self, alert: FlashAlert) {
        self.flash_alerts.insert(0, alert);
        self.flash_alerts.truncate(MAX_FLASH_ALERTS);
    }

    fn random_alert(&mut self, rng: &mut StdRng) -> FlashAlert {
        let id = self.next_alert_id;
        self.next_alert_id += 1;

        let alert_type = *AlertType::LIVE
            .choose(rng)
            .unwrap_or(&AlertType::WhaleMove);
        let message = *FLASH_ALERT_TEXTS
            .choose(rng)
            .unwrap_or(&FLASH_ALERT_TEXTS[0]);
        let severity = *Severity::ALL.choose(rng).unwrap_or(&Severity::Low);
        FlashAlert::new(
            id,
            alert_type,
            message,
            rng.gen_range(80..100),
            severity,
            "now",
        )
    }
}
