//! # Carrier Configuration
//!
//! Process-wide, read-only settings shared by every carrier operation:
//! credentials, endpoint, customs thresholds, pickup retry bound and the
//! fallback time zone.
//!
//! # Examples
//!
//! ```
//! use carrier_client::infrastructure::carrier::config::{CarrierConfig, Credentials};
//!
//! let config = CarrierConfig::new(Credentials::new("key", "secret", "510087000", "118000000"))
//!     .with_base_url("https://wsbeta.fedex.com:443/web-services")
//!     .with_hub_id("5531")
//!     .with_international_economy_origins(["CA"]);
//!
//! assert_eq!(config.max_pickup_delay_days(), 5);
//! assert!(!format!("{:?}", config).contains("secret"));
//! ```

use crate::domain::services::pickup_scheduler::{DEFAULT_ZONE, ZoneTable};
use crate::domain::value_objects::Address;
use chrono_tz::Tz;
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Production web services base URL.
pub const PRODUCTION_URL: &str = "https://ws.fedex.com:443/web-services";

/// Test web services base URL.
pub const TEST_URL: &str = "https://wsbeta.fedex.com:443/web-services";

/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default currency in which formal customs entry applies.
const DEFAULT_FORMAL_ENTRY_CURRENCY: &str = "USD";

/// Default declared value from which formal customs entry applies.
const DEFAULT_FORMAL_ENTRY_THRESHOLD: i64 = 800;

/// Default largest pickup delay tried before giving up.
const DEFAULT_MAX_PICKUP_DELAY_DAYS: u32 = 5;

/// Default sender name on tracking notification emails.
const DEFAULT_NOTIFICATION_SENDER: &str = "Shipping Notifications";

/// Environment variable prefix read by [`CarrierConfig::from_env`].
pub const ENV_PREFIX: &str = "CARRIER";

/// Configuration file base name read by [`CarrierConfig::from_env`].
pub const CONFIG_FILE: &str = "carrier";

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized.
    #[error("failed to load carrier configuration: {0}")]
    Load(String),

    /// A value is missing or malformed.
    #[error("invalid carrier configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        Self::Load(error.to_string())
    }
}

/// Account credentials sent with every request.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    key: String,
    password: String,
    account_number: String,
    meter_number: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        password: impl Into<String>,
        account_number: impl Into<String>,
        meter_number: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            password: password.into(),
            account_number: account_number.into(),
            meter_number: meter_number.into(),
        }
    }

    /// Returns the web service key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the web service password.
    #[inline]
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the shipping account number.
    #[inline]
    #[must_use]
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// Returns the meter number.
    #[inline]
    #[must_use]
    pub fn meter_number(&self) -> &str {
        &self.meter_number
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .field("account_number", &self.account_number)
            .field("meter_number", &self.meter_number)
            .finish()
    }
}

/// Carrier client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierConfig {
    credentials: Credentials,
    hub_id: String,
    base_url: String,
    timeout_ms: u64,
    formal_entry_currency: String,
    formal_entry_threshold: Decimal,
    max_pickup_delay_days: u32,
    international_economy_origins: Vec<String>,
    default_time_zone: Tz,
    notification_sender_name: String,
}

impl CarrierConfig {
    /// Creates a production configuration with default settings.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            hub_id: String::new(),
            base_url: PRODUCTION_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            formal_entry_currency: DEFAULT_FORMAL_ENTRY_CURRENCY.to_string(),
            formal_entry_threshold: Decimal::from(DEFAULT_FORMAL_ENTRY_THRESHOLD),
            max_pickup_delay_days: DEFAULT_MAX_PICKUP_DELAY_DAYS,
            international_economy_origins: Vec::new(),
            default_time_zone: DEFAULT_ZONE,
            notification_sender_name: DEFAULT_NOTIFICATION_SENDER.to_string(),
        }
    }

    /// Creates a configuration pointing at the test environment.
    #[must_use]
    pub fn test(credentials: Credentials) -> Self {
        Self::new(credentials).with_base_url(TEST_URL)
    }

    /// Loads `.env`, an optional `carrier.toml` and `CARRIER__*` variables.
    ///
    /// Variables use `__` as separator, e.g. `CARRIER__KEY`,
    /// `CARRIER__FORMAL_ENTRY_THRESHOLD=800` or
    /// `CARRIER__INTERNATIONAL_ECONOMY_ORIGINS=CA,MX`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a required value
    /// is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv() {
            tracing::debug!(error = %error, "no .env file loaded");
        }

        let settings: CarrierSettings = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("international_economy_origins"),
            )
            .build()?
            .try_deserialize()?;

        Self::try_from(settings)
    }

    /// Sets the SmartPost hub id.
    #[must_use]
    pub fn with_hub_id(mut self, hub_id: impl Into<String>) -> Self {
        self.hub_id = hub_id.into();
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the formal customs entry currency and threshold.
    #[must_use]
    pub fn with_formal_entry(mut self, currency: impl Into<String>, threshold: Decimal) -> Self {
        self.formal_entry_currency = currency.into().to_uppercase();
        self.formal_entry_threshold = threshold;
        self
    }

    /// Sets the largest pickup delay tried.
    #[must_use]
    pub fn with_max_pickup_delay_days(mut self, days: u32) -> Self {
        self.max_pickup_delay_days = days;
        self
    }

    /// Sets the origin countries that dispatch international shipments
    /// with international economy.
    #[must_use]
    pub fn with_international_economy_origins<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.international_economy_origins = countries
            .into_iter()
            .map(|country| country.into().trim().to_uppercase())
            .collect();
        self
    }

    /// Sets the zone used for regions without a bundled zone.
    #[must_use]
    pub fn with_default_time_zone(mut self, zone: Tz) -> Self {
        self.default_time_zone = zone;
        self
    }

    /// Sets the sender name on tracking notification emails.
    #[must_use]
    pub fn with_notification_sender_name(mut self, name: impl Into<String>) -> Self {
        self.notification_sender_name = name.into();
        self
    }

    /// Returns the credentials.
    #[inline]
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the SmartPost hub id.
    #[inline]
    #[must_use]
    pub fn hub_id(&self) -> &str {
        &self.hub_id
    }

    /// Returns the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the formal customs entry currency.
    #[inline]
    #[must_use]
    pub fn formal_entry_currency(&self) -> &str {
        &self.formal_entry_currency
    }

    /// Returns the formal customs entry threshold.
    #[inline]
    #[must_use]
    pub fn formal_entry_threshold(&self) -> Decimal {
        self.formal_entry_threshold
    }

    /// Returns the largest pickup delay tried.
    #[inline]
    #[must_use]
    pub fn max_pickup_delay_days(&self) -> u32 {
        self.max_pickup_delay_days
    }

    /// Returns the fallback time zone.
    #[inline]
    #[must_use]
    pub fn default_time_zone(&self) -> Tz {
        self.default_time_zone
    }

    /// Returns the sender name on tracking notification emails.
    #[inline]
    #[must_use]
    pub fn notification_sender_name(&self) -> &str {
        &self.notification_sender_name
    }

    /// Returns true if international shipments from `origin` use
    /// international economy.
    #[must_use]
    pub fn origin_ships_international_economy(&self, origin: &Address) -> bool {
        let country = origin.country_code.trim();
        self.international_economy_origins
            .iter()
            .any(|eligible| eligible.eq_ignore_ascii_case(country))
    }

    /// The bundled zone table with the configured fallback zone.
    #[must_use]
    pub fn zone_table(&self) -> ZoneTable {
        ZoneTable::us_default().with_default_zone(self.default_time_zone)
    }
}

/// Raw settings as read from files and the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierSettings {
    /// Web service key.
    pub key: String,
    /// Web service password.
    pub password: String,
    /// Shipping account number.
    pub account: String,
    /// Meter number.
    pub meter: String,
    /// SmartPost hub id.
    pub hub_id: String,
    /// Base URL.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Formal entry currency.
    pub formal_entry_currency: String,
    /// Formal entry threshold.
    pub formal_entry_threshold: Decimal,
    /// Largest pickup delay tried.
    pub max_pickup_delay_days: u32,
    /// Origin countries using international economy.
    pub international_economy_origins: Vec<String>,
    /// IANA name of the fallback time zone.
    pub default_time_zone: String,
    /// Sender name on tracking notification emails.
    pub notification_sender_name: String,
}

impl Default for CarrierSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            password: String::new(),
            account: String::new(),
            meter: String::new(),
            hub_id: String::new(),
            base_url: PRODUCTION_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            formal_entry_currency: DEFAULT_FORMAL_ENTRY_CURRENCY.to_string(),
            formal_entry_threshold: Decimal::from(DEFAULT_FORMAL_ENTRY_THRESHOLD),
            max_pickup_delay_days: DEFAULT_MAX_PICKUP_DELAY_DAYS,
            international_economy_origins: Vec::new(),
            default_time_zone: DEFAULT_ZONE.name().to_string(),
            notification_sender_name: DEFAULT_NOTIFICATION_SENDER.to_string(),
        }
    }
}

impl TryFrom<CarrierSettings> for CarrierConfig {
    type Error = ConfigError;

    fn try_from(settings: CarrierSettings) -> Result<Self, Self::Error> {
        for (name, value) in [
            ("key", &settings.key),
            ("password", &settings.password),
            ("account", &settings.account),
            ("meter", &settings.meter),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(format!("missing {}", name)));
            }
        }

        if settings.formal_entry_threshold.is_sign_negative() {
            return Err(ConfigError::invalid(format!(
                "formal_entry_threshold must be non-negative, got {}",
                settings.formal_entry_threshold
            )));
        }

        let zone: Tz = settings.default_time_zone.parse().map_err(|_| {
            ConfigError::invalid(format!(
                "unknown time zone '{}'",
                settings.default_time_zone
            ))
        })?;

        Ok(Self::new(Credentials::new(
            settings.key,
            settings.password,
            settings.account,
            settings.meter,
        ))
        .with_hub_id(settings.hub_id)
        .with_base_url(settings.base_url)
        .with_timeout_ms(settings.timeout_ms)
        .with_formal_entry(settings.formal_entry_currency, settings.formal_entry_threshold)
        .with_max_pickup_delay_days(settings.max_pickup_delay_days)
        .with_international_economy_origins(settings.international_economy_origins)
        .with_default_time_zone(zone)
        .with_notification_sender_name(settings.notification_sender_name))
    }
}
