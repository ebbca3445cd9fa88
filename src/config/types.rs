use crate::sites::SiteKind;
use serde::Deserialize;

/// Main configuration structure for Seedsift
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default, rename = "site")]
    pub sites: Vec<SiteConfig>,
}

impl Default for Config {
    /// Built-in registry: a single The Pirate Bay instance on its default mirror
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            sites: vec![SiteConfig::default_for(SiteKind::ThePirateBay)],
        }
    }
}

/// HTTP client, retry and enrichment tuning
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts for a search page fetch, first attempt included
    #[serde(rename = "retry-attempts", default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed wait between search fetch attempts (milliseconds)
    #[serde(rename = "retry-wait-ms", default = "default_retry_wait_ms")]
    pub retry_wait_ms: u64,

    /// Pause before each comment page fetch (milliseconds)
    #[serde(rename = "comment-delay-ms", default = "default_comment_delay_ms")]
    pub comment_delay_ms: u64,

    /// Upper bound on comment page fetches in flight for one site
    #[serde(
        rename = "max-concurrent-comment-fetches",
        default = "default_max_concurrent_comment_fetches"
    )]
    pub max_concurrent_comment_fetches: usize,
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    5
}

fn default_retry_wait_ms() -> u64 {
    500
}

fn default_comment_delay_ms() -> u64 {
    1000
}

fn default_max_concurrent_comment_fetches() -> usize {
    8
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            retry_wait_ms: default_retry_wait_ms(),
            comment_delay_ms: default_comment_delay_ms(),
            max_concurrent_comment_fetches: default_max_concurrent_comment_fetches(),
        }
    }
}

/// One searchable site instance (a mirror of a site variant)
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Which extractor handles this site's markup
    pub variant: SiteKind,

    /// URL scheme, `http` or `https`
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Domain name without the top-level domain (e.g. "thepiratebay")
    pub domain: String,

    /// Top-level domain (e.g. "org")
    pub tld: String,

    /// Whether result detail pages are fetched for comments
    #[serde(rename = "enrich-comments", default = "default_enrich_comments")]
    pub enrich_comments: bool,

    /// Raw `Cookie` header value sent with every request to this site
    #[serde(default)]
    pub cookies: Option<String>,
}

fn default_protocol() -> String {
    "https".to_string()
}

fn default_enrich_comments() -> bool {
    true
}

impl SiteConfig {
    /// Builds a site entry pointing at the variant's default mirror
    pub fn default_for(variant: SiteKind) -> Self {
        let (protocol, domain, tld) = variant.default_mirror();
        Self {
            variant,
            protocol: protocol.to_string(),
            domain: domain.to_string(),
            tld: tld.to_string(),
            enrich_comments: true,
            cookies: None,
        }
    }

    /// Returns `{protocol}://{domain}.{tld}`
    pub fn base_url(&self) -> String {
        format!("{}://{}.{}", self.protocol, self.domain, self.tld)
    }
}
