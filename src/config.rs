use crate::domain::widget::{Prefill, Theme};
use crate::error::{CheckoutError, Result};
use reqwest::Url;
use std::env;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_SCRIPT_URL: &str = "https://checkout.razorpay.com/v1/checkout.js";
pub const DEFAULT_KEY_ID: &str = "your-test-key";

/// Everything the checkout flow needs to know about its environment.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub backend_url: Url,
    pub script_url: Url,
    pub key_id: String,
    pub currency: String,
    pub merchant_name: String,
    pub description: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            backend_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend URL is valid"),
            script_url: Url::parse(DEFAULT_SCRIPT_URL).expect("default script URL is valid"),
            key_id: DEFAULT_KEY_ID.to_string(),
            currency: "INR".to_string(),
            merchant_name: "Test Payment".to_string(),
            description: "Test Transaction".to_string(),
            prefill: Prefill::default(),
            theme: Theme {
                color: "#4F46E5".to_string(),
            },
        }
    }
}

impl CheckoutConfig {
    /// Builds the configuration from the process environment, loading a
    /// `.env` file first if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            backend_url: match lookup("PAYBUTTON_BACKEND_URL") {
                Some(raw) => parse_base_url("PAYBUTTON_BACKEND_URL", &raw)?,
                None => defaults.backend_url,
            },
            script_url: match lookup("RAZORPAY_SCRIPT_URL") {
                Some(raw) => parse_url("RAZORPAY_SCRIPT_URL", &raw)?,
                None => defaults.script_url,
            },
            key_id: lookup("RAZORPAY_KEY_ID").unwrap_or(defaults.key_id),
            currency: lookup("PAYBUTTON_CURRENCY").unwrap_or(defaults.currency),
            merchant_name: lookup("PAYBUTTON_MERCHANT_NAME").unwrap_or(defaults.merchant_name),
            description: lookup("PAYBUTTON_DESCRIPTION").unwrap_or(defaults.description),
            prefill: defaults.prefill,
            theme: Theme {
                color: lookup("PAYBUTTON_THEME_COLOR").unwrap_or(defaults.theme.color),
            },
        })
    }

    /// Resolves an endpoint path such as `create-order` against the
    /// backend base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.backend_url
            .join(path)
            .map_err(|e| CheckoutError::Config(format!("invalid endpoint '{path}': {e}")))
    }
}

pub fn parse_url(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw.trim())
        .map_err(|e| CheckoutError::Config(format!("{name} is not a valid URL: {e}")))
}

/// Like [`parse_url`], but guarantees a trailing slash so that
/// [`CheckoutConfig::endpoint`] appends to the path instead of replacing
/// its last segment.
pub fn parse_base_url(name: &str, raw: &str) -> Result<Url> {
    let mut url = parse_url(name, raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
