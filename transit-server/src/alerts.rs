//! SMS trip alerts.
//!
//! Demo mode: alerts are logged and acknowledged, not delivered. The real
//! gateway integration needs provider credentials and will replace the
//! body of `send` without changing its contract. Alert failures must
//! never affect a submission's outcome.

use serde::Serialize;

/// Result of an alert request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertReceipt {
    pub accepted: bool,
    pub detail: String,
}

/// Demo-mode SMS alert sender.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmsAlerts;

impl SmsAlerts {
    pub fn new() -> Self {
        Self
    }

    /// Send a trip alert to `phone`.
    pub async fn send(&self, phone: &str, route: &str, message: &str) -> AlertReceipt {
        tracing::info!(%phone, %route, %message, "SMS alert (demo mode)");

        AlertReceipt {
            accepted: true,
            detail: "Alert subscription received. SMS service will be configured in production."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_mode_accepts_every_alert() {
        let alerts = SmsAlerts::new();
        let receipt = alerts
            .send(
                "+233201234567",
                "Accra to Kumasi",
                "Thank you for applying!",
            )
            .await;

        assert!(receipt.accepted);
        assert!(!receipt.detail.is_empty());
    }
}
