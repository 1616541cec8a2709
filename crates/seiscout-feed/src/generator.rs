//! Synthesized feed messages.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seiscout_core::{AlertType, Message, Severity};

use crate::config::FeedConfig;

const ALERT_TEXTS: [&str; 4] = [
    "New large transaction detected",
    "Arbitrage opportunity found",
    "Unusual trading pattern",
    "Price movement alert",
];

/// Produces the simulated message stream.
pub struct MessageGenerator {
    rng: StdRng,
    latency_min_ms: u64,
    latency_max_ms: u64,
    alert_ratio: f64,
}

impl MessageGenerator {
    pub fn new(config: &FeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            latency_min_ms: config.latency_min_ms,
            latency_max_ms: config.latency_max_ms.max(config.latency_min_ms + 1),
            alert_ratio: config.alert_ratio.clamp(0.0, 1.0),
        }
    }

    /// Next message and its latency estimate in milliseconds.
    pub fn next_message(&mut self) -> (Message, u64) {
        let message = if self.rng.gen_bool(self.alert_ratio) {
            let alert_type = AlertType::LIVE[self.rng.gen_range(0..AlertType::LIVE.len())];
            let text = ALERT_TEXTS[self.rng.gen_range(0..ALERT_TEXTS.len())];
            let severity = Severity::ALL[self.rng.gen_range(0..Severity::ALL.len())];
            let confidence = self.rng.gen_range(80..100u8);
            Message::alert(alert_type, text, severity, confidence)
        } else {
            Message::pulse(self.rng.gen_range(0.0..100.0))
        };
        let latency = self.rng.gen_range(self.latency_min_ms..self.latency_max_ms);
        (message, latency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seiscout_core::{MessageKind, MessagePayload};

    fn seeded(alert_ratio: f64) -> MessageGenerator {
        MessageGenerator::new(&FeedConfig {
            seed: Some(7),
            alert_ratio,
            ..Default::default()
        })
    }

    #[test]
    fn test_latency_within_band() {
        let mut generator = seeded(0.5);
        for _ in 0..1_000 {
            let (_, latency) = generator.next_message();
            assert!((200..300).contains(&latency), "latency {latency} out of band");
        }
    }

    #[test]
    fn test_alert_only_stream() {
        let mut generator = seeded(1.0);
        for _ in 0..200 {
            let (msg, _) = generator.next_message();
            assert_eq!(msg.kind, MessageKind::Alert);
            match msg.payload {
                MessagePayload::Alert { confidence, .. } => {
                    assert!((80..100).contains(&confidence));
                }
                other => panic!("unexpected payload {other:?}"),
            }
        }
    }

    #[test]
    fn test_pulse_only_stream() {
        let mut generator = seeded(0.0);
        for _ in 0..200 {
            let (msg, _) = generator.next_message();
            assert_eq!(msg.kind, MessageKind::Pulse);
        }
    }

    #[test]
    fn test_same_seed_same_latencies() {
        let mut a = seeded(0.5);
        let mut b = seeded(0.5);
        for _ in 0..50 {
            assert_eq!(a.next_message().1, b.next_message().1);
        }
    }
}
