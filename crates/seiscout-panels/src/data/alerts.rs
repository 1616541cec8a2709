//! Alerts panel: active alerts, strategies and alert settings.

use rust_decimal::Decimal;
use seiscout_core::{Badge, Severity};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRule {
    pub id: u32,
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Severity,
    pub badge: Badge,
    pub time: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyStatus {
    Active,
    Monitoring,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strategy {
    pub name: &'static str,
    pub description: &'static str,
    pub status: StrategyStatus,
    /// Return since activation in percent.
    pub performance_pct: Decimal,
    pub next_action: &'static str,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSetting {
    pub name: &'static str,
    pub enabled: bool,
    pub threshold: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertsData {
    pub alerts: Vec<AlertRule>,
    pub strategies: Vec<Strategy>,
    pub settings: Vec<AlertSetting>,
}

impl AlertsData {
    pub(crate) fn baseline() -> Self {
        let rule = |id, category, title, description, priority: Severity, time, action| AlertRule {
            id,
            category,
            title,
            description,
            priority,
            badge: priority.badge(),
            time,
            action,
        };
        let setting = |name, enabled, threshold| AlertSetting {
            name,
            enabled,
            threshold,
        };

        Self {
            alerts: vec![
                rule(
                    1,
                    "Price Alert",
                    "SEI Price Target Reached",
                    "SEI has reached your target price of $1.25",
                    Severity::High,
                    "2 minutes ago",
                    "Consider taking profits",
                ),
                rule(
                    2,
                    "Whale Movement",
                    "Large Transaction Detected",
                    "Whale wallet moved 500K SEI tokens",
                    Severity::Medium,
                    "15 minutes ago",
                    "Monitor for market impact",
                ),
                rule(
                    3,
                    "Yield Opportunity",
                    "High APY Pool Available",
                    "New SEI/USDC pool offering 45% APY",
                    Severity::Medium,
                    "1 hour ago",
                    "Evaluate LP opportunity",
                ),
            ],
            strategies: vec![
                Strategy {
                    name: "DCA Optimization",
                    description: "Automated dollar-cost averaging with market timing",
                    status: StrategyStatus::Active,
                    performance_pct: Decimal::new(125, 1),
                    next_action: "Buy in 2 days",
                    confidence: 94,
                },
                Strategy {
                    name: "Yield Maximization",
                    description: "Dynamic yield farming across multiple protocols",
                    status: StrategyStatus::Active,
                    performance_pct: Decimal::new(87, 1),
                    next_action: "Rebalance LP position",
                    confidence: 87,
                },
                Strategy {
                    name: "Risk Management",
                    description: "Automated stop-loss and position sizing",
                    status: StrategyStatus::Monitoring,
                    performance_pct: Decimal::new(32, 1),
                    next_action: "No action needed",
                    confidence: 91,
                },
            ],
            settings: vec![
                setting("Price Movements", true, "5%"),
                setting("Whale Transactions", true, "$100K+"),
                setting("Yield Opportunities", true, "20% APY+"),
                setting("Risk Warnings", true, "Medium+"),
                setting("Gas Optimization", false, "Auto"),
                setting("MEV Protection", true, "Always"),
            ],
        }
    }

    pub fn enabled_settings(&self) -> usize {
        self.settings.iter().filter(|s| s.enabled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_sets() {
        let data = AlertsData::baseline();
        assert_eq!(data.alerts.len(), 3);
        assert_eq!(data.strategies.len(), 3);
        assert_eq!(data.enabled_settings(), 5);
        assert_eq!(data.alerts[0].badge, Severity::High.badge());
    }
}
