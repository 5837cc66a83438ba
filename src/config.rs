/// Suite domain every account-specific REST host lives under.
pub const SUITE_DOMAIN: &str = "suitetalk.api.netsuite.com";

/// Path of the customer record collection on the REST record API.
pub const CUSTOMER_RECORD_PATH: &str = "/services/rest/record/v1/customer";

/// Token-based authentication credentials for the NetSuite account.
#[derive(Clone)]
pub struct Credentials {
    /// Account identifier, also sent as the OAuth `realm`.
    pub account_id: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token_id: String,
    pub token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("token_id", &self.token_id)
            .field("token_secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub credentials: Credentials,
    /// Base URL of the NetSuite REST host, derived from the account id unless overridden.
    pub netsuite_base_url: String,
    /// When true, a failed NetSuite call turns into a 502 for the caller instead of
    /// being logged and reported as success.
    pub propagate_remote_failures: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> anyhow::Result<String> {
            let value = lookup(key)
                .ok_or_else(|| anyhow::anyhow!("{} environment variable required", key))?;
            let value = value.trim();
            if value.is_empty() {
                anyhow::bail!("{} cannot be empty", key);
            }
            Ok(value.to_string())
        };

        let credentials = Credentials {
            account_id: required("NETSUITE_ACCOUNT_ID")?,
            consumer_key: required("NETSUITE_CONSUMER_KEY")?,
            consumer_secret: required("NETSUITE_CONSUMER_SECRET")?,
            token_id: required("NETSUITE_TOKEN_ID")?,
            token_secret: required("NETSUITE_TOKEN_SECRET")?,
        };

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?;

        let netsuite_base_url = match lookup("NETSUITE_BASE_URL").filter(|s| !s.trim().is_empty())
        {
            Some(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("NETSUITE_BASE_URL must start with http:// or https://");
                }
                url.trim_end_matches('/').to_string()
            }
            None => account_base_url(&credentials.account_id),
        };

        let propagate_remote_failures = match lookup("PROPAGATE_REMOTE_FAILURES") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!("PROPAGATE_REMOTE_FAILURES must be true or false")
            })?,
            None => false,
        };

        let config = Self {
            port,
            credentials,
            netsuite_base_url,
            propagate_remote_failures,
        };

        let endpoint = config.customer_endpoint();
        if let Err(e) = url::Url::parse(&endpoint) {
            anyhow::bail!("Invalid NetSuite endpoint '{}': {}", endpoint, e);
        }

        // Never log secrets, only where we are going to talk to.
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("NetSuite account: {}", config.credentials.account_id);
        tracing::debug!("NetSuite base URL: {}", config.netsuite_base_url);
        tracing::debug!("Server Port: {}", config.port);
        if config.propagate_remote_failures {
            tracing::info!("Remote failures will be reported to callers as 502");
        }

        Ok(config)
    }

    /// Full URL of the customer record endpoint.
    pub fn customer_endpoint(&self) -> String {
        format!("{}{}", self.netsuite_base_url, CUSTOMER_RECORD_PATH)
    }
}

/// Derives the account-specific REST host: account ids such as `1234567_SB1`
/// become `https://1234567-sb1.suitetalk.api.netsuite.com`.
pub fn account_base_url(account_id: &str) -> String {
    let host = account_id.to_lowercase().replacen('_', "-", 1);
    format!("https://{}.{}", host, SUITE_DOMAIN)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
