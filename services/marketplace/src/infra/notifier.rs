//! Outbound mail. `HttpNotifier` posts to a transactional-mail JSON API;
//! `LogNotifier` only records the message and is used when no API is configured.

use anyhow::Context as _;
use serde::Serialize;

use crate::config::MarketplaceConfig;
use crate::domain::repository::Notifier;
use crate::domain::types::Message;

#[derive(Serialize)]
struct MailAddress<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailBody<'a> {
    sender: MailAddress<'a>,
    to: Vec<MailAddress<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Clone)]
pub struct HttpNotifier {
    pub client: reqwest::Client,
    pub api_url: String,
    pub api_key: Option<String>,
    pub sender: String,
}

impl Notifier for HttpNotifier {
    async fn send(&self, message: &Message) -> anyhow::Result<()> {
        let body = SendMailBody {
            sender: MailAddress {
                email: &self.sender,
            },
            to: vec![MailAddress { email: &message.to }],
            subject: &message.subject,
            html_content: &message.html_body,
        };
        let mut request = self.client.post(&self.api_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("api-key", key);
        }
        let resp = request.send().await.context("send mail request")?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            anyhow::bail!("mail API returned {status}: {detail}");
        }
        tracing::info!(to = %message.to, subject = %message.subject, "mail sent");
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn send(&self, message: &Message) -> anyhow::Result<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "mail transport not configured, message not delivered"
        );
        tracing::debug!(body = %message.html_body, "undelivered mail body");
        Ok(())
    }
}

/// Notifier chosen at startup.
#[derive(Clone)]
pub enum AppNotifier {
    Http(HttpNotifier),
    Log(LogNotifier),
}

impl AppNotifier {
    pub fn from_config(config: &MarketplaceConfig) -> Self {
        match &config.mail_api_url {
            Some(api_url) => Self::Http(HttpNotifier {
                client: reqwest::Client::new(),
                api_url: api_url.clone(),
                api_key: config.mail_api_key.clone(),
                sender: config.mail_sender.clone(),
            }),
            None => Self::Log(LogNotifier),
        }
    }
}

impl Notifier for AppNotifier {
    async fn send(&self, message: &Message) -> anyhow::Result<()> {
        match self {
            Self::Http(n) => n.send(message).await,
            Self::Log(n) => n.send(message).await,
        }
    }
}
