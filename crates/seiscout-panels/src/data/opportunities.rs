//! Opportunities ("Alpha") panel: opportunities, alpha leaderboard and
//! copy-trade ideas.

use rand::rngs::StdRng;
use rust_decimal::Decimal;
use seiscout_core::{Badge, Bounded, RiskLevel};
use serde::Serialize;

use super::centered;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    Yield,
    Arbitrage,
    Liquidation,
    Airdrop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub id: u32,
    pub kind: OpportunityType,
    pub title: &'static str,
    pub description: &'static str,
    pub potential: &'static str,
    pub risk: RiskLevel,
    pub badge: Badge,
    pub timeframe: &'static str,
    pub confidence: Bounded,
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlphaTrader {
    pub rank: u32,
    pub address: &'static str,
    pub sharpe_ratio: Decimal,
    pub returns_pct: Decimal,
    pub win_rate: Bounded,
    pub followers: u32,
    pub last_trade: &'static str,
    pub strategy: &'static str,
    pub total_volume: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyTradeIdea {
    pub wallet: &'static str,
    pub action: &'static str,
    pub confidence: Bounded,
    pub expected_return_pct: Decimal,
    pub timeframe: &'static str,
    pub risk: RiskLevel,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunitiesData {
    pub opportunities: Vec<Opportunity>,
    pub leaderboard: Vec<AlphaTrader>,
    pub copy_trades: Vec<CopyTradeIdea>,
}

impl OpportunitiesData {
    pub(crate) fn baseline(rng: &mut StdRng) -> Self {
        let mut opportunity =
            |id, kind, title, description, potential, risk: RiskLevel, timeframe, confidence: f64, action| {
                Opportunity {
                    id,
                    kind,
                    title,
                    description,
                    potential,
                    risk,
                    badge: risk.badge(),
                    timeframe,
                    confidence: Bounded::percent(confidence + centered(rng, 4.0)),
                    action,
                }
            };
        let opportunities = vec![
            opportunity(
                1,
                OpportunityType::Yield,
                "High-Yield Liquidity Pool",
                "SEI/USDC pool on DragonSwap offering 45% APY with low impermanent loss risk",
                "+$2,340/month",
                RiskLevel::Medium,
                "30 days",
                87.0,
                "Provide Liquidity",
            ),
            opportunity(
                2,
                OpportunityType::Arbitrage,
                "Cross-DEX Arbitrage",
                "Price difference detected between Astroport and DragonSwap for ATOM",
                "+$156",
                RiskLevel::Low,
                "5 minutes",
                94.0,
                "Execute Trade",
            ),
            opportunity(
                3,
                OpportunityType::Liquidation,
                "Liquidation Opportunity",
                "Undercollateralized position on Mars Protocol ready for liquidation",
                "+$890",
                RiskLevel::High,
                "2 hours",
                76.0,
                "Liquidate Position",
            ),
            opportunity(
                4,
                OpportunityType::Airdrop,
                "Potential Airdrop",
                "New DEX launching on Sei - early liquidity providers may receive tokens",
                "TBD",
                RiskLevel::Low,
                "60 days",
                65.0,
                "Participate",
            ),
        ];

        let trader = |rank, address, sharpe: i64, returns: i64, win_rate: f64, followers, last_trade, strategy, volume: i64| {
            AlphaTrader {
                rank,
                address,
                sharpe_ratio: Decimal::new(sharpe, 2),
                returns_pct: Decimal::new(returns, 1),
                win_rate: Bounded::percent(win_rate),
                followers,
                last_trade,
                strategy,
                total_volume: Decimal::from(volume),
            }
        };
        let leaderboard = vec![
            trader(
                1,
                "sei1xyz789abc123def456ghi789jkl012mno345pqr678",
                284,
                1567,
                78.5,
                1_247,
                "2h ago",
                "DeFi Yield + Arbitrage",
                542_000,
            ),
            trader(
                2,
                "sei1abc123def456ghi789jkl012mno345pqr678stu901",
                261,
                1342,
                72.1,
                892,
                "4h ago",
                "MEV + LP Farming",
                410_000,
            ),
            trader(
                3,
                "sei1def456ghi789jkl012mno345pqr678stu901vwx234",
                245,
                1289,
                69.8,
                634,
                "1h ago",
                "Swing Trading + Staking",
                350_000,
            ),
            trader(
                4,
                "sei1ghi789jkl012mno345pqr678stu901vwx234yza567",
                232,
                1194,
                67.2,
                521,
                "6h ago",
                "Cross-Chain Arbitrage",
                280_000,
            ),
        ];

        let idea = |wallet, action, confidence: f64, expected: i64, timeframe, risk: RiskLevel| {
            CopyTradeIdea {
                wallet,
                action,
                confidence: Bounded::percent(confidence),
                expected_return_pct: Decimal::new(expected, 1),
                timeframe,
                risk,
                badge: risk.badge(),
            }
        };
        let copy_trades = vec![
            idea(
                "sei1xyz789abc123def456ghi789jkl012mno345pqr678",
                "Swap 1000 USDC → SEI",
                94.0,
                125,
                "24h",
                RiskLevel::Medium,
            ),
            idea(
                "sei1abc123def456ghi789jkl012mno345pqr678stu901",
                "Add LP to SEI/USDC Pool",
                87.0,
                87,
                "7d",
                RiskLevel::Low,
            ),
            idea(
                "sei1def456ghi789jkl012mno345pqr678stu901vwx234",
                "Stake 5000 SEI",
                91.0,
                152,
                "30d",
                RiskLevel::VeryLow,
            ),
        ];

        Self {
            opportunities,
            leaderboard,
            copy_trades,
        }
    }

    pub(crate) fn tick(&mut self, rng: &mut StdRng) {
        for o in &mut self.opportunities {
            o.confidence.nudge(centered(rng, 2.0));
        }
    }
}
