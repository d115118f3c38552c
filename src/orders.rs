use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{client::NO_BODY, HttpMethod, Order, Result, SiteflowClient};

/// Order endpoints, borrowed from a [`SiteflowClient`] via [`SiteflowClient::orders`].
///
/// Calls use the client's default options. Identifiers are inserted into the
/// path as given.
#[derive(Clone, Copy, Debug)]
pub struct Orders<'a> {
    client: &'a SiteflowClient,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(client: &'a SiteflowClient) -> Self {
        Self { client }
    }

    /// Lists all orders. `GET /api/order`
    pub async fn get_all(self) -> Result<JsonValue> {
        self.client
            .create_request(HttpMethod::Get, "/api/order", NO_BODY)
            .await
    }

    /// Fetches one order. `GET /api/order/{id}`
    pub async fn get(self, id: &str) -> Result<JsonValue> {
        self.client
            .create_request(HttpMethod::Get, &format!("/api/order/{id}"), NO_BODY)
            .await
    }

    /// Asks the API to validate an order without submitting it.
    ///
    /// Accepts an [`Order`] or any other serializable payload.
    pub async fn validate<B>(self, order: &B) -> Result<JsonValue>
    where
        B: Serialize + ?Sized,
    {
        self.client
            .create_request(HttpMethod::Post, "/api/order/validate", Some(order))
            .await
    }

    /// Submits a new order. `POST /api/order`
    pub async fn create(self, order: &Order) -> Result<JsonValue> {
        self.client
            .create_request(HttpMethod::Post, "/api/order", Some(order))
            .await
    }

    /// Cancels an order by its source account and source order id.
    pub async fn cancel(
        self,
        source_account_name: &str,
        source_order_id: &str,
    ) -> Result<JsonValue> {
        let path = format!("/api/order/{source_account_name}/{source_order_id}/cancel");
        self.client
            .create_request(HttpMethod::Put, &path, NO_BODY)
            .await
    }
}
