//! `siteflow-http` is an async signed-HTTP client for the Siteflow
//! order-management API.
//!
//! Every request is authenticated with an HMAC-SHA256 signature over
//! `METHOD path timestamp`, recomputed on each attempt. Calls go through
//! [`SiteflowClient::create_request`], which applies the retry policy from
//! [`ClientOptions`] and returns either the decoded JSON body or a single
//! [`SiteflowError`]:
//! - [`SiteflowClient::create_request`]
//! - [`SiteflowClient::create_request_with`]
//! - [`SiteflowClient::orders`]

mod client;
mod config;
mod error;
mod options;
mod orders;
pub mod signer;
mod types;

pub use client::{SiteflowClient, NO_BODY};
pub use config::{SiteflowConfig, DEFAULT_BASE_URL};
pub use error::SiteflowError;
pub use options::{ClientOptions, RetryCondition};
pub use orders::Orders;
pub use types::{HttpMethod, Order, OrderData, OrderEndpoint};

pub type Result<T> = std::result::Result<T, SiteflowError>;
