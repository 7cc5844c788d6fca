use serde::Deserialize;

use gigmarket_core::config::Config;

/// Marketplace service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct MarketplaceConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// HMAC secret for account-activation tokens.
    pub activation_secret: String,
    /// Origin the confirmation link is built on (e.g. "https://gigmarket.example").
    pub public_base_url: String,
    /// TCP port to listen on. Env var: `MARKETPLACE_PORT`.
    #[serde(default = "default_port")]
    pub marketplace_port: u16,
    /// Redirect target after a successful activation.
    #[serde(default = "default_login_redirect_url")]
    pub login_redirect_url: String,
    /// Redirect target after a failed activation.
    #[serde(default = "default_register_redirect_url")]
    pub register_redirect_url: String,
    #[serde(default = "default_access_token_ttl_secs")]
    pub access_token_ttl_secs: u64,
    #[serde(default = "default_refresh_token_ttl_secs")]
    pub refresh_token_ttl_secs: u64,
    #[serde(default = "default_activation_token_ttl_secs")]
    pub activation_token_ttl_secs: u64,
    /// Transactional mail HTTP endpoint. Unset: messages are only logged.
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<String>,
    #[serde(default = "default_mail_sender")]
    pub mail_sender: String,
}

fn default_port() -> u16 {
    3110
}

fn default_login_redirect_url() -> String {
    "/login/".to_owned()
}

fn default_register_redirect_url() -> String {
    "/register/".to_owned()
}

fn default_access_token_ttl_secs() -> u64 {
    300
}

fn default_refresh_token_ttl_secs() -> u64 {
    24 * 3600
}

fn default_activation_token_ttl_secs() -> u64 {
    3 * 24 * 3600
}

fn default_mail_sender() -> String {
    "no-reply@gigmarket.local".to_owned()
}

impl Config for MarketplaceConfig {}
