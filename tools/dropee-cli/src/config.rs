//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use dropee_commerce::cart::{PricingConfig, DEFAULT_CART_KEY, DEFAULT_DELIVERY_FEE};
use dropee_commerce::checkout::{Checkout, DEFAULT_STORE_NAME, DEFAULT_WHATSAPP_NUMBER};
use dropee_commerce::Currency;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where the cart is saved.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Currency and delivery fee.
    #[serde(default)]
    pub pricing: PricingSection,

    /// Order hand-off settings.
    #[serde(default)]
    pub checkout: CheckoutSection,

    /// Product data source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Promo code source.
    #[serde(default)]
    pub promotions: PromotionsConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Pricing settings for the cart store.
    pub fn pricing_config(&self) -> PricingConfig {
        PricingConfig::new(self.pricing.currency, self.pricing.delivery_fee)
    }

    /// Checkout settings.
    pub fn checkout_settings(&self) -> Checkout {
        Checkout::new(&self.checkout.store_name, &self.checkout.whatsapp_number)
    }
}

/// Cart storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding saved values, relative to the config's working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,

    /// Key the cart snapshot is saved under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".dropee")
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
        }
    }
}

/// Pricing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingSection {
    /// Currency every price is in.
    #[serde(default)]
    pub currency: Currency,

    /// Flat delivery fee in major units.
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: i64,
}

fn default_delivery_fee() -> i64 {
    DEFAULT_DELIVERY_FEE
}

impl Default for PricingSection {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            delivery_fee: default_delivery_fee(),
        }
    }
}

/// Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSection {
    /// Store name in the order message heading.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// WhatsApp number receiving orders.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_whatsapp_number() -> String {
    DEFAULT_WHATSAPP_NUMBER.to_string()
}

impl Default for CheckoutSection {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            whatsapp_number: default_whatsapp_number(),
        }
    }
}

/// Catalog source. The built-in demo catalog is used when no path is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Path to a catalog JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Promotion source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PromotionsConfig {
    /// Path to a JSON list of promotions. The built-in sample codes are used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Evaluate validity windows as of this date instead of today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<chrono::NaiveDate>,
}
