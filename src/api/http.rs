use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::catalog::{NewProduct, NewStock, Product, Stock};
use crate::domain::customer::{AddressFields, Customer, CustomerAddress, CustomerProfile, NewCustomer};
use crate::domain::order::{CreateOrderRequest, CreatedOrder, Order, OrderProduct, OrderStatus};
use crate::session::{Credentials, SigninResponse, SignupRequest, User};

use super::contracts::{AuthApi, CatalogApi, CustomerApi, OrderApi};
use super::errors::ApiError;

// ============================================================================
// HTTP Adapter - reqwest-backed implementation of every collaborator
// ============================================================================

/// REST client for the back-office API.
///
/// The bearer token is held behind a lock so signing in on one handle is
/// visible to every container sharing the same `Arc<HttpApi>`. Never log it.
#[derive(Debug)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = %method, path = path, "Sending request");

        let builder = self.http.request(method, self.url(path));
        match self.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unreadable body>"));

        tracing::warn!(status = status.as_u16(), "Request rejected by server");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CatalogApi for HttpApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.send_json(self.request(Method::GET, "/products")).await
    }

    async fn list_stocks(&self) -> Result<Vec<Stock>, ApiError> {
        self.send_json(self.request(Method::GET, "/stocks")).await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.send_json(self.request(Method::POST, "/products").json(product)).await
    }

    async fn create_stock(&self, stock: &NewStock) -> Result<Stock, ApiError> {
        self.send_json(self.request(Method::POST, "/stocks").json(stock)).await
    }

    async fn update_product(&self, product_id: Uuid, product: &NewProduct) -> Result<Product, ApiError> {
        let path = format!("/products/{}", product_id);
        self.send_json(self.request(Method::PUT, &path).json(product)).await
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/products/{}", product_id);
        self.send_empty(self.request(Method::DELETE, &path)).await
    }
}

#[async_trait]
impl CustomerApi for HttpApi {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.send_json(self.request(Method::GET, "/customers")).await
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ApiError> {
        self.send_json(self.request(Method::POST, "/customers").json(customer)).await
    }

    async fn update_customer(&self, customer_id: Uuid, profile: &CustomerProfile) -> Result<Customer, ApiError> {
        let path = format!("/customers/{}", customer_id);
        self.send_json(self.request(Method::PUT, &path).json(profile)).await
    }

    async fn delete_customer(&self, customer_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/customers/{}", customer_id);
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn create_address(&self, customer_id: Uuid, address: &AddressFields) -> Result<Customer, ApiError> {
        let path = format!("/customers/{}/address", customer_id);
        self.send_json(self.request(Method::POST, &path).json(address)).await
    }

    async fn update_address(&self, customer_id: Uuid, address: &AddressFields) -> Result<CustomerAddress, ApiError> {
        let path = format!("/customers/{}/address", customer_id);
        self.send_json(self.request(Method::PUT, &path).json(address)).await
    }

    async fn delete_address(&self, customer_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/customers/{}/address", customer_id);
        self.send_empty(self.request(Method::DELETE, &path)).await
    }
}

#[async_trait]
impl OrderApi for HttpApi {
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        let mut builder = self.request(Method::GET, "/orders");
        if let Some(status) = status {
            builder = builder.query(&[("status", status.as_str())]);
        }
        self.send_json(builder).await
    }

    async fn order_products(&self, order_id: Uuid, customer_id: Uuid) -> Result<Vec<OrderProduct>, ApiError> {
        let path = format!("/orders/{}", order_id);
        let builder = self
            .request(Method::GET, &path)
            .query(&[("customer_id", customer_id.to_string())]);
        self.send_json(builder).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError> {
        self.send_json(self.request(Method::POST, "/orders").json(request)).await
    }

    async fn approve_order(&self, order_id: Uuid) -> Result<(), ApiError> {
        let path = format!("/orders/{}", order_id);
        self.send_empty(self.request(Method::POST, &path)).await
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn signup(&self, request: &SignupRequest) -> Result<User, ApiError> {
        self.send_json(self.request(Method::POST, "/users").json(request)).await
    }

    async fn signin(&self, credentials: &Credentials) -> Result<SigninResponse, ApiError> {
        self.send_json(self.request(Method::POST, "/sessions").json(credentials)).await
    }

    fn set_bearer_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
