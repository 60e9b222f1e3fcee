//! Payments Config

use clap::Args;
use storefront_app::payments::PayPalConfig;

/// PayPal REST credentials.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// PayPal REST API base URL
    #[arg(
        long,
        env = "PAYPAL_API_URL",
        default_value = "https://api-m.sandbox.paypal.com"
    )]
    pub paypal_api_url: String,

    /// PayPal REST client id
    #[arg(long, env = "PAYPAL_CLIENT_ID")]
    pub paypal_client_id: String,

    /// PayPal REST client secret
    #[arg(long, env = "PAYPAL_CLIENT_SECRET", hide_env_values = true)]
    pub paypal_client_secret: String,
}

impl PaymentsConfig {
    /// Provider client configuration.
    #[must_use]
    pub fn paypal(&self) -> PayPalConfig {
        PayPalConfig {
            api_url: self.paypal_api_url.clone(),
            client_id: self.paypal_client_id.clone(),
            client_secret: self.paypal_client_secret.clone(),
        }
    }
}
