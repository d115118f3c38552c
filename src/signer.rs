//! HMAC-SHA256 request signing.
//!
//! The signed string is `METHOD path timestamp`. Query string and body are
//! not covered by the signature.

use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{ClientOptions, HttpMethod, SiteflowConfig};

type HmacSha256 = Hmac<Sha256>;

pub const AUTHORIZATION_HEADER: &str = "x-oneflow-authorization";
pub const DATE_HEADER: &str = "x-oneflow-date";
pub const ALGORITHM_HEADER: &str = "x-oneflow-algorithm";
pub const ACCOUNT_HEADER: &str = "x-oneflow-account";
pub const ROUTING_RULE_HEADER: &str = "x-oneflow-routing-rule";
pub const CONTENT_TYPE_HEADER: &str = "content-type";

/// Value of the algorithm header.
pub const ALGORITHM: &str = "SHA256";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Formats a timestamp as ISO-8601 UTC with millisecond precision.
///
/// Example: `2024-05-01T12:30:45.123Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds the string covered by the signature.
pub fn canonical_string(method: HttpMethod, path: &str, timestamp: &str) -> String {
    format!("{} {} {}", method.as_str(), path, timestamp)
}

/// Hex-encoded HMAC-SHA256 of `message` keyed by `secret`.
pub fn sign(secret: &str, message: &str) -> String {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("hmac key length is unrestricted"));
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Authentication headers for one attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `<token>:<hex signature>`
    pub authorization: String,
    /// Timestamp that was signed, byte-identical to the one in the signing string.
    pub date: String,
    pub account: Option<String>,
    pub routing_rule: Option<String>,
}

impl AuthHeaders {
    /// Signs `method` and `path` at `timestamp` with the configured credentials.
    pub fn build(
        config: &SiteflowConfig,
        method: HttpMethod,
        path: &str,
        timestamp: &DateTime<Utc>,
        options: &ClientOptions,
    ) -> Self {
        let date = format_timestamp(timestamp);
        let signature = sign(&config.secret, &canonical_string(method, path, &date));
        let account = options
            .account_id
            .as_ref()
            .filter(|_| options.service_user)
            .filter(|id| !id.is_empty())
            .cloned();
        let routing_rule = options
            .routing_rule
            .as_ref()
            .filter(|rule| !rule.is_empty())
            .cloned();

        Self {
            authorization: format!("{}:{}", config.token, signature),
            date,
            account,
            routing_rule,
        }
    }

    /// All header name/value pairs to send, fixed headers first.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            (AUTHORIZATION_HEADER, self.authorization.as_str()),
            (DATE_HEADER, self.date.as_str()),
            (ALGORITHM_HEADER, ALGORITHM),
            (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE),
        ]
        .into_iter()
        .chain(self.account.as_deref().map(|value| (ACCOUNT_HEADER, value)))
        .chain(
            self.routing_rule
                .as_deref()
                .map(|value| (ROUTING_RULE_HEADER, value)),
        )
    }
}
