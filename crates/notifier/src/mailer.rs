//! HTTP mail gateway.
//!
//! Posts send requests to a Resend-compatible transactional mail API. Sends
//! run on their own task: the dispatcher never observes the outcome, and a
//! failed send is logged here and nowhere else. Without an API key the
//! gateway is disabled and sends are skipped.

use herald_common::config::AppConfig;
use herald_engine::delivery::{MailGateway, MailRequest};

pub struct HttpMailGateway {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpMailGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
        }
    }
}

impl MailGateway for HttpMailGateway {
    fn send(&self, request: MailRequest) {
        let Some(api_key) = self.api_key.clone() else {
            tracing::info!(to = %request.to, "Mail delivery disabled, skipping send");
            return;
        };

        let client = self.client.clone();
        let url = self.api_url.clone();

        // Fire-and-forget: the caller is not waiting on this task.
        tokio::spawn(async move {
            let body = serde_json::json!({
                "from": &request.from,
                "to": [&request.to],
                "subject": &request.subject,
                "template": &request.template,
                "context": &request.context,
            });

            match client.post(&url).bearer_auth(api_key).json(&body).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(subject = %request.subject, "Mail accepted for delivery");
                }
                Ok(response) => {
                    tracing::warn!(
                        status = %response.status(),
                        subject = %request.subject,
                        "Mail API rejected send"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, subject = %request.subject, "Mail send failed");
                }
            }
        });
    }
}
