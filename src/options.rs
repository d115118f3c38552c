use std::fmt;
use std::sync::Arc;

use crate::SiteflowError;

/// Predicate deciding whether a failed attempt may be retried.
///
/// The predicate is only consulted while retry budget remains.
#[derive(Clone)]
pub struct RetryCondition(Arc<dyn Fn(&SiteflowError) -> bool + Send + Sync>);

impl RetryCondition {
    /// Wraps a caller-supplied predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&SiteflowError) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Retries every failure.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Never retries.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Retries transport failures and responses with one of `statuses`.
    ///
    /// Example: `RetryCondition::on_status(&[429, 502, 503, 504])`.
    pub fn on_status(statuses: &[u16]) -> Self {
        let statuses = statuses.to_vec();
        Self::new(move |err| match err {
            SiteflowError::Transport(_) => true,
            SiteflowError::Http { status, .. } => statuses.contains(status),
            _ => false,
        })
    }

    /// Evaluates the predicate.
    pub fn should_retry(&self, err: &SiteflowError) -> bool {
        (self.0)(err)
    }
}

impl Default for RetryCondition {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for RetryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RetryCondition(..)")
    }
}

/// Per-call request configuration: retry policy and routing headers.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Maximum number of retries after the initial attempt.
    pub retries: usize,
    /// Fixed wait between attempts, in milliseconds.
    pub retry_delay_ms: u64,
    /// Decides whether a failed attempt is retried.
    pub retry_condition: RetryCondition,
    /// Sends `account_id` as the account override header when set.
    pub service_user: bool,
    /// Account to act on behalf of; only used together with `service_user`.
    pub account_id: Option<String>,
    /// Value for the routing-rule header.
    pub routing_rule: Option<String>,
    /// Per-attempt transport timeout in milliseconds. `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
}

impl ClientOptions {
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn with_retry_condition(mut self, retry_condition: RetryCondition) -> Self {
        self.retry_condition = retry_condition;
        self
    }

    /// Acts as a service user on behalf of `account_id`.
    pub fn with_service_user(mut self, account_id: impl Into<String>) -> Self {
        self.service_user = true;
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_routing_rule(mut self, routing_rule: impl Into<String>) -> Self {
        self.routing_rule = Some(routing_rule.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            retries: 0,
            retry_delay_ms: 1_000,
            retry_condition: RetryCondition::always(),
            service_user: false,
            account_id: None,
            routing_rule: None,
            timeout_ms: None,
        }
    }
}
