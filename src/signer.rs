//! OAuth 1.0a request signing (HMAC-SHA256) for NetSuite token-based authentication.
//!
//! Only the protocol parameters and the URL's own query parameters take part in
//! the signature. Request bodies are JSON, so they are never included.

use crate::config::Credentials;
use crate::errors::AppError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// RFC 3986 unreserved characters stay as-is, everything else is escaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";
pub const OAUTH_VERSION: &str = "1.0";

/// Per-request replay protection values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningParams {
    pub nonce: String,
    pub timestamp: i64,
}

impl SigningParams {
    /// Fresh random nonce and the current Unix time.
    pub fn generate() -> Self {
        Self {
            nonce: uuid::Uuid::new_v4().simple().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Signs requests with a consumer/token credential pair.
#[derive(Clone)]
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: String,
    token_id: String,
    token_secret: String,
}

impl std::fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("consumer_key", &self.consumer_key)
            .field("token_id", &self.token_id)
            .finish_non_exhaustive()
    }
}

impl OAuthSigner {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            consumer_key: credentials.consumer_key.clone(),
            consumer_secret: credentials.consumer_secret.clone(),
            token_id: credentials.token_id.clone(),
            token_secret: credentials.token_secret.clone(),
        }
    }

    /// Produces an `Authorization` header value for `method url` with a fresh
    /// nonce and timestamp.
    pub fn sign(&self, method: &str, url: &str) -> Result<String, AppError> {
        self.sign_with(method, url, &SigningParams::generate())
    }

    /// Same as [`OAuthSigner::sign`] with caller-supplied nonce and timestamp,
    /// which makes the output deterministic.
    pub fn sign_with(
        &self,
        method: &str,
        url: &str,
        params: &SigningParams,
    ) -> Result<String, AppError> {
        self.validate()?;

        let protocol_params = self.protocol_params(params);
        let base_string = signature_base_string(method, url, &protocol_params)?;
        let signature = self.compute_signature(&base_string)?;

        let mut header_params = protocol_params;
        header_params.push(("oauth_signature".to_string(), signature));
        header_params.sort();

        let rendered: Vec<String> = header_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect();

        Ok(format!("OAuth {}", rendered.join(", ")))
    }

    fn validate(&self) -> Result<(), AppError> {
        let parts = [
            ("consumer key", &self.consumer_key),
            ("consumer secret", &self.consumer_secret),
            ("token id", &self.token_id),
            ("token secret", &self.token_secret),
        ];
        for (name, value) in parts {
            if value.is_empty() {
                return Err(AppError::InvalidInput(format!("{} is empty", name)));
            }
        }
        Ok(())
    }

    fn protocol_params(&self, params: &SigningParams) -> Vec<(String, String)> {
        vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), params.nonce.clone()),
            (
                "oauth_signature_method".to_string(),
                SIGNATURE_METHOD.to_string(),
            ),
            ("oauth_timestamp".to_string(), params.timestamp.to_string()),
            ("oauth_token".to_string(), self.token_id.clone()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ]
    }

    fn compute_signature(&self, base_string: &str) -> Result<String, AppError> {
        let key = format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(&self.token_secret)
        );
        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| AppError::InvalidInput(format!("Invalid signing key: {}", e)))?;
        mac.update(base_string.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Appends the `realm` attribute NetSuite uses to pick the account.
pub fn with_realm(header: &str, realm: &str) -> String {
    let quoted = realm.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{}, realm=\"{}\"", header, quoted)
}

/// Builds `METHOD&base_uri&params` as defined by OAuth 1.0a section 3.4.1.
pub fn signature_base_string(
    method: &str,
    url: &str,
    protocol_params: &[(String, String)],
) -> Result<String, AppError> {
    let method = method.trim();
    if method.is_empty() || !method.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid HTTP method: '{}'",
            method
        )));
    }
    if url.trim().is_empty() {
        return Err(AppError::InvalidInput("URL is empty".to_string()));
    }

    let parsed = Url::parse(url)
        .map_err(|e| AppError::InvalidInput(format!("Invalid URL '{}': {}", url, e)))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::InvalidInput(format!("URL has no host: '{}'", url)))?;

    // Url already lowercases scheme and host and drops default ports.
    let base_uri = match parsed.port() {
        Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, parsed.path()),
        None => format!("{}://{}{}", parsed.scheme(), host, parsed.path()),
    };

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(protocol_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    params.sort();

    let normalized = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(&base_uri),
        encode(&normalized)
    ))
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOMER_URL: &str =
        "https://1234567-sb1.suitetalk.api.netsuite.com/services/rest/record/v1/customer";

    fn signer(consumer_secret: &str, token_secret: &str) -> OAuthSigner {
        OAuthSigner::new(&Credentials {
            account_id: "1234567_SB1".to_string(),
            consumer_key: "ck".to_string(),
            consumer_secret: consumer_secret.to_string(),
            token_id: "tk".to_string(),
            token_secret: token_secret.to_string(),
        })
    }

    fn fixed() -> SigningParams {
        SigningParams {
            nonce: "abc123".to_string(),
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_encode_uses_rfc3986_unreserved_set() {
        assert_eq!(encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(encode("a b+c*d/e"), "a%20b%2Bc%2Ad%2Fe");
        assert_eq!(encode("é"), "%C3%A9");
    }

    #[test]
    fn test_known_signature() {
        let header = signer("cs", "ts")
            .sign_with("POST", CUSTOMER_URL, &fixed())
            .unwrap();

        assert_eq!(
            header,
            "OAuth oauth_consumer_key=\"ck\", \
             oauth_nonce=\"abc123\", \
             oauth_signature=\"ppZy%2FOSaq7%2FoOi9ZOcbxzBfrpGdVR%2FzGTIzIGeYkVXU%3D\", \
             oauth_signature_method=\"HMAC-SHA256\", \
             oauth_timestamp=\"1700000000\", \
             oauth_token=\"tk\", \
             oauth_version=\"1.0\""
        );
    }

    #[test]
    fn test_base_string_normalizes_url_and_includes_query() {
        let params = signer("cs", "ts").protocol_params(&fixed());
        let base = signature_base_string(
            "get",
            "HTTPS://EXAMPLE.com:443/path?q=a%20b&limit=10#frag",
            &params,
        )
        .unwrap();

        assert_eq!(
            base,
            "GET&https%3A%2F%2Fexample.com%2Fpath&limit%3D10%26oauth_consumer_key%3Dck\
             %26oauth_nonce%3Dabc123%26oauth_signature_method%3DHMAC-SHA256\
             %26oauth_timestamp%3D1700000000%26oauth_token%3Dtk%26oauth_version%3D1.0\
             %26q%3Da%2520b"
        );
    }

    #[test]
    fn test_secrets_are_encoded_into_key() {
        let header = signer("c&s", "t s")
            .sign_with("GET", "https://example.com/path?q=a%20b&limit=10", &fixed())
            .unwrap();
        assert!(header.contains(
            "oauth_signature=\"ICWBe5I2KZXA2msMqfqKGJqFoJooe5YAicWbP%2FcgQAg%3D\""
        ));
    }

    #[test]
    fn test_non_default_port_is_kept() {
        let params = signer("cs", "ts").protocol_params(&fixed());
        let base = signature_base_string("POST", "http://localhost:8080/x", &params).unwrap();
        assert!(base.starts_with("POST&http%3A%2F%2Flocalhost%3A8080%2Fx&"));
    }

    #[test]
    fn test_fresh_params_change_the_header() {
        let signer = signer("cs", "ts");
        let first = signer.sign("POST", CUSTOMER_URL).unwrap();
        let second = signer.sign("POST", CUSTOMER_URL).unwrap();
        assert_ne!(first, second);

        let again = signer.sign_with("POST", CUSTOMER_URL, &fixed()).unwrap();
        assert_eq!(
            again,
            signer.sign_with("POST", CUSTOMER_URL, &fixed()).unwrap()
        );
    }

    #[test]
    fn test_rejects_malformed_input() {
        let signer = signer("cs", "ts");
        for (method, url) in [
            ("POST", ""),
            ("POST", "   "),
            ("POST", "/relative/path"),
            ("", CUSTOMER_URL),
            ("PO ST", CUSTOMER_URL),
        ] {
            let err = signer.sign_with(method, url, &fixed()).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidInput(_)),
                "{} {} gave {:?}",
                method,
                url,
                err
            );
        }
    }

    #[test]
    fn test_rejects_empty_credentials() {
        let err = signer("", "ts")
            .sign_with("POST", CUSTOMER_URL, &fixed())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_realm_is_appended_last() {
        let header = signer("cs", "ts")
            .sign_with("POST", CUSTOMER_URL, &fixed())
            .unwrap();
        let full = with_realm(&header, "1234567_SB1");
        assert!(full.starts_with(&header));
        assert!(full.ends_with(", realm=\"1234567_SB1\""));
    }

    #[test]
    fn test_realm_quotes_and_backslashes_are_escaped() {
        let full = with_realm("OAuth oauth_version=\"1.0\"", "acct\"x\\y");
        assert_eq!(
            full,
            "OAuth oauth_version=\"1.0\", realm=\"acct\\\"x\\\\y\""
        );
    }
}
