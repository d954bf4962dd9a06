use anyhow::{Context, Result, bail};
use serde::Serialize;

/// Delivers a rendered weekly plan to a user-configured webhook as a JSON
/// POST. Delivery is best-effort; callers decide what a failure means.
pub struct WebhookNotifier {
    client: reqwest::Client,
}

#[derive(Serialize)]
struct PlanPayload<'a> {
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

impl WebhookNotifier {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "mealplan-cli/{} (weekly meal planner)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(std::time::Duration::from_secs(10))
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    pub async fn send_plan(&self, url: &str, subject: &str, text: &str, html: &str) -> Result<()> {
        let resp = self
            .client
            .post(url)
            .json(&PlanPayload {
                subject,
                text,
                html,
            })
            .send()
            .await
            .context("Failed to reach webhook")?;

        if !resp.status().is_success() {
            bail!("Webhook returned status {}", resp.status());
        }
        Ok(())
    }
}
