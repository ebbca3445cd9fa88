use crate::config::types::{Config, HttpConfig, SiteConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_http_config(&config.http)?;

    if config.sites.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[site]] entry is required".to_string(),
        ));
    }

    for site in &config.sites {
        validate_site(site)?;
    }

    Ok(())
}

/// Validates HTTP and enrichment tuning
fn validate_http_config(config: &HttpConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation("user-agent cannot be empty".to_string()));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.retry_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "retry-attempts must be >= 1, got {}",
            config.retry_attempts
        )));
    }

    if config.max_concurrent_comment_fetches < 1 || config.max_concurrent_comment_fetches > 64 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-comment-fetches must be between 1 and 64, got {}",
            config.max_concurrent_comment_fetches
        )));
    }

    Ok(())
}

/// Validates one site entry
fn validate_site(site: &SiteConfig) -> ConfigResult<()> {
    if site.protocol != "http" && site.protocol != "https" {
        return Err(ConfigError::Validation(format!(
            "protocol must be 'http' or 'https', got '{}'",
            site.protocol
        )));
    }

    if site.domain.trim().is_empty() {
        return Err(ConfigError::Validation("site domain cannot be empty".to_string()));
    }

    if site.tld.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "site '{}' is missing its top-level domain",
            site.domain
        )));
    }

    let base_url = site.base_url();
    let parsed = Url::parse(&base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", base_url, e)))?;

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' has no host",
            base_url
        )));
    }

    Ok(())
}
