use std::fmt;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use url::Url;

use crate::error::ScoutError;

pub const SMTP_USER_VAR: &str = "SMTP_USER";
pub const SMTP_PASS_VAR: &str = "SMTP_PASS";
pub const EMAIL_TO_VAR: &str = "EMAIL_TO";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub search: SearchSettings,
    pub email: EmailSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub role_keyword: String,
    pub experience: String,
    pub geography: String,
    pub sites: Vec<String>,
    pub endpoint: Url,
    pub user_agent: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_results: usize,
    pub extraction_strategy: ExtractionStrategy,
    pub experience_keywords: Vec<String>,
    pub output_dir: String,
    #[serde(default)]
    pub selectors: ResultSelectors,
}

/// CSS selectors for the structured strategy. Defaults match DuckDuckGo's HTML page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResultSelectors {
    pub container: String,
    pub title_link: String,
    pub snippet: String,
}

impl Default for ResultSelectors {
    fn default() -> Self {
        ResultSelectors {
            container: ".result".to_string(),
            title_link: "a.result__a".to_string(),
            snippet: ".result__snippet".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Walks the result containers of the page.
    Structured,
    /// Legacy `href="` scan. Fragile, yields link-only records.
    LinkScan,
}

#[derive(Clone, Deserialize)]
pub struct EmailSettings {
    pub smtp_host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub smtp_port: u16,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_seconds: u64,
    pub subject: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub recipient: String,
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("subject", &self.subject)
            .field("sender", &self.sender)
            .field("password", &"[REDACTED]")
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl SearchSettings {
    /// Host of the search engine itself, used to drop self-links.
    pub fn engine_domain(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        host.strip_prefix("www.")
            .or_else(|| host.strip_prefix("html."))
            .unwrap_or(host)
            .to_string()
    }
}

impl Settings {
    fn validate(self) -> Result<Self, ScoutError> {
        let required = [
            (&self.email.sender, SMTP_USER_VAR),
            (&self.email.password, SMTP_PASS_VAR),
            (&self.email.recipient, EMAIL_TO_VAR),
        ];
        if let Some((_, var)) = required.iter().find(|(value, _)| value.trim().is_empty()) {
            return Err(ScoutError::Config(format!(
                "{} is not set in the environment",
                var
            )));
        }

        if self.search.role_keyword.trim().is_empty() {
            return Err(ScoutError::Config(
                "search.role_keyword must not be empty".to_string(),
            ));
        }
        if self.search.max_results == 0 {
            return Err(ScoutError::Config(
                "search.max_results must be greater than zero".to_string(),
            ));
        }
        if self.search.timeout_seconds == 0 {
            return Err(ScoutError::Config(
                "search.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.email.timeout_seconds == 0 {
            return Err(ScoutError::Config(
                "email.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(self)
    }
}

pub fn get_configuration() -> Result<Settings, ScoutError> {
    let base_path = std::env::current_dir()?;
    let configuration_directory = base_path.join("configuration");

    let builder = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    build_settings(builder, |key| std::env::var(key).ok())
}

/// Layers the credential variables on top of `builder` and validates the result.
pub fn build_settings(
    builder: ConfigBuilder<DefaultState>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ScoutError> {
    let settings = builder
        .set_override_option("email.sender", lookup(SMTP_USER_VAR))?
        .set_override_option("email.password", lookup(SMTP_PASS_VAR))?
        .set_override_option("email.recipient", lookup(EMAIL_TO_VAR))?
        .build()?;

    settings.try_deserialize::<Settings>()?.validate()
}
