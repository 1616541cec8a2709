//! Live feed message types.

use crate::variant::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a feed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Alert,
    Pulse,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Alert => "alert",
            MessageKind::Pulse => "pulse",
        }
    }
}

/// Category of a flash alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    WhaleMove,
    MevDetected,
    Arbitrage,
    YieldOpportunity,
    DcaPattern,
}

impl AlertType {
    /// Alert types the simulated feed draws from.
    pub const LIVE: [AlertType; 4] = [
        AlertType::WhaleMove,
        AlertType::MevDetected,
        AlertType::Arbitrage,
        AlertType::YieldOpportunity,
    ];
}

/// Message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePayload {
    Alert {
        alert_type: AlertType,
        message: String,
        severity: Severity,
        /// Detection confidence in percent.
        confidence: u8,
    },
    Pulse {
        /// Pulse value in [0, 100].
        value: f64,
    },
}

/// A message published by the live feed.
///
/// Immutable once created; consumers only ever read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub kind: MessageKind,
    pub payload: MessagePayload,
    pub received_at: DateTime<Utc>,
}

impl Message {
    /// Build an alert message stamped now.
    pub fn alert(
        alert_type: AlertType,
        message: impl Into<String>,
        severity: Severity,
        confidence: u8,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: MessageKind::Alert,
            payload: MessagePayload::Alert {
                alert_type,
                message: message.into(),
                severity,
                confidence: confidence.min(100),
            },
            received_at: Utc::now(),
        }
    }

    /// Build a pulse message stamped now.
    pub fn pulse(value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: MessageKind::Pulse,
            payload: MessagePayload::Pulse {
                value: value.clamp(0.0, 100.0),
            },
            received_at: Utc::now(),
        }
    }

    /// Severity for alert messages; pulses have none.
    pub fn severity(&self) -> Option<Severity> {
        match &self.payload {
            MessagePayload::Alert { severity, .. } => Some(*severity),
            MessagePayload::Pulse { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_message_kind() {
        let msg = Message::alert(AlertType::WhaleMove, "Large transfer", Severity::High, 94);
        assert_eq!(msg.kind, MessageKind::Alert);
        assert_eq!(msg.severity(), Some(Severity::High));
    }

    #[test]
    fn test_alert_confidence_capped() {
        let msg = Message::alert(AlertType::Arbitrage, "x", Severity::Low, 250);
        match msg.payload {
            MessagePayload::Alert { confidence, .. } => assert_eq!(confidence, 100),
            _ => panic!("expected alert payload"),
        }
    }

    #[test]
    fn test_pulse_value_clamped() {
        let msg = Message::pulse(140.0);
        assert_eq!(msg.payload, MessagePayload::Pulse { value: 100.0 });
        assert_eq!(msg.severity(), None);
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::alert(AlertType::MevDetected, "MEV bot", Severity::Medium, 87);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"kind\":\"alert\""));
        assert!(json.contains("\"type\":\"alert\""));
        assert!(json.contains("\"alert_type\":\"MEV_DETECTED\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }
}
