use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig, NUM_ARTICLES_UPPER_LIMIT,
    TIMEOUT_LOWER_LIMIT, TIMEOUT_UPPER_LIMIT,
};
use crate::ConfigError;
use encoding_rs::Encoding;
use reqwest::header::{HeaderName, HeaderValue};
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_selectors(&config.selectors)?;
    Ok(())
}

/// Validates seed URLs, article count, headers, encoding and timeout
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.seed_urls.is_empty() {
        return Err(ConfigError::Validation(
            "seed_urls must contain at least one URL".to_string(),
        ));
    }

    for seed in &config.seed_urls {
        validate_seed_url(seed)?;
    }

    if config.total_articles < 1 || config.total_articles > NUM_ARTICLES_UPPER_LIMIT {
        return Err(ConfigError::NumberOfArticlesOutOfRange {
            got: config.total_articles,
            max: NUM_ARTICLES_UPPER_LIMIT,
        });
    }

    for (name, value) in &config.headers {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ConfigError::IncorrectHeaders(format!("'{}': {}", name, e)))?;
        HeaderValue::from_str(value)
            .map_err(|e| ConfigError::IncorrectHeaders(format!("'{}' value: {}", name, e)))?;
    }

    if config.encoding.trim().is_empty() {
        return Err(ConfigError::IncorrectEncoding(
            "encoding cannot be empty".to_string(),
        ));
    }

    if Encoding::for_label(config.encoding.trim().as_bytes()).is_none() {
        return Err(ConfigError::IncorrectEncoding(format!(
            "unknown encoding label '{}'",
            config.encoding
        )));
    }

    if config.timeout > TIMEOUT_UPPER_LIMIT {
        return Err(ConfigError::IncorrectTimeout {
            got: config.timeout,
            min: TIMEOUT_LOWER_LIMIT,
            max: TIMEOUT_UPPER_LIMIT,
        });
    }

    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::Validation(format!("Invalid base_url: {}", e)))?;
    if base.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' has no host",
            config.base_url
        )));
    }

    Ok(())
}

/// A seed must be an absolute http(s) URL
fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    if !(seed.starts_with("http://") || seed.starts_with("https://")) {
        return Err(ConfigError::IncorrectSeedUrl(seed.to_string()));
    }

    Url::parse(seed).map_err(|e| ConfigError::IncorrectSeedUrl(format!("{} ({})", seed, e)))?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_expansion_steps < 1 {
        return Err(ConfigError::Validation(
            "max_expansion_steps must be >= 1".to_string(),
        ));
    }

    if config.concurrency < 1 || config.concurrency > 32 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 32, got {}",
            config.concurrency
        )));
    }

    if config.article_path_prefixes.is_empty() {
        return Err(ConfigError::Validation(
            "article_path_prefixes cannot be empty".to_string(),
        ));
    }

    for prefix in &config.article_path_prefixes {
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "article path prefix '{}' must start with '/'",
                prefix
            )));
        }
    }

    if config.state_path.is_empty() {
        return Err(ConfigError::Validation(
            "state_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.assets_path.is_empty() {
        return Err(ConfigError::Validation(
            "assets_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Every selector has to compile before the run starts
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.article_link,
        &config.title,
        &config.body,
        &config.paragraph,
        &config.author,
        &config.date,
    ] {
        Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
            selector: selector.clone(),
            message: format!("{:?}", e),
        })?;
    }

    if config.author_attribute.is_empty() || config.date_attribute.is_empty() {
        return Err(ConfigError::Validation(
            "author_attribute and date_attribute cannot be empty".to_string(),
        ));
    }

    if !config.topic_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "topic_prefix '{}' must start with '/'",
            config.topic_prefix
        )));
    }

    Ok(())
}
