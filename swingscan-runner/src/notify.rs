//! Notification sink — best-effort plaintext summary of a scan.
//!
//! Failures here are logged and swallowed; a missed email never fails a
//! cycle. The SMTP password comes from the environment so config files
//! stay credential-free.

use crate::config::EmailSettings;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use swingscan_core::domain::Candidate;
use tracing::{info, warn};

/// Sink for scan summaries.
pub trait Notifier: Send + Sync {
    /// Deliver the cycle summary. Implementations must not panic; errors
    /// are theirs to log and absorb.
    fn notify(&self, candidates: &[Candidate], market_healthy: bool);
}

/// Used when no notification is configured.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _candidates: &[Candidate], _market_healthy: bool) {}
}

/// Compose the plaintext summary body.
pub fn compose_summary(candidates: &[Candidate], market_healthy: bool) -> String {
    let mut body = format!(
        "Market: {}\n\n",
        if market_healthy { "Healthy" } else { "Cautious" }
    );
    for c in candidates {
        body.push_str(&format!(
            "- {}: Buy ${:.2} | Goal ${:.2} | Stop ${:.2} (score {}, {})\n",
            c.ticker, c.buy_at, c.goal, c.stop_loss, c.score, c.pattern
        ));
    }
    body
}

/// SMTP notifier over lettre.
pub struct EmailNotifier {
    settings: EmailSettings,
}

impl EmailNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    fn send(&self, subject: &str, body: String) -> Result<(), String> {
        let password = std::env::var(&self.settings.password_env)
            .map_err(|_| format!("missing {} in environment", self.settings.password_env))?;

        let email = Message::builder()
            .from(
                self.settings
                    .address
                    .parse()
                    .map_err(|e| format!("invalid from address: {e}"))?,
            )
            .to(self
                .settings
                .address
                .parse()
                .map_err(|e| format!("invalid to address: {e}"))?)
            .subject(subject)
            .body(body)
            .map_err(|e| format!("build message: {e}"))?;

        let creds = Credentials::new(self.settings.address.clone(), password);
        let transport = SmtpTransport::relay(&self.settings.smtp_host)
            .map_err(|e| format!("SMTP relay setup: {e}"))?
            .port(self.settings.smtp_port)
            .credentials(creds)
            .build();

        transport.send(&email).map_err(|e| format!("SMTP send: {e}"))?;
        Ok(())
    }
}

impl Notifier for EmailNotifier {
    fn notify(&self, candidates: &[Candidate], market_healthy: bool) {
        if candidates.is_empty() {
            return;
        }

        let subject = format!("Swing Scan: {} opportunities found", candidates.len());
        let body = compose_summary(candidates, market_healthy);

        match self.send(&subject, body) {
            Ok(()) => info!(count = candidates.len(), "scan summary emailed"),
            Err(e) => warn!(error = %e, "notification failed, continuing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingscan_core::scan::PatternLabel;

    fn candidate(ticker: &str) -> Candidate {
        Candidate {
            ticker: ticker.into(),
            score: 82,
            pattern: PatternLabel::Pennant,
            current_price: 100.0,
            buy_at: 102.5,
            goal: 110.0,
            stop_loss: 95.0,
            rsi: 60.0,
        }
    }

    #[test]
    fn summary_lists_each_candidate() {
        let body = compose_summary(&[candidate("NVDA"), candidate("AMD")], true);
        assert!(body.starts_with("Market: Healthy"));
        assert!(body.contains("- NVDA: Buy $102.50 | Goal $110.00"));
        assert!(body.contains("- AMD:"));
        assert!(body.contains("PENNANT"));
    }

    #[test]
    fn summary_marks_cautious_market() {
        let body = compose_summary(&[], false);
        assert!(body.starts_with("Market: Cautious"));
    }

    #[test]
    fn noop_notifier_is_silent() {
        NoopNotifier.notify(&[candidate("NVDA")], true);
    }
}
