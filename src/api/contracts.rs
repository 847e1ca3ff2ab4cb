use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::{NewProduct, NewStock, Product, Stock};
use crate::domain::customer::{AddressFields, Customer, CustomerAddress, CustomerProfile, NewCustomer};
use crate::domain::order::{CreateOrderRequest, CreatedOrder, Order, OrderProduct, OrderStatus};
use crate::session::{Credentials, SigninResponse, SignupRequest, User};

use super::errors::ApiError;

// ============================================================================
// Collaborator Contracts
// ============================================================================
//
// One trait per resource area so each state container only depends on the
// calls it actually makes. `HttpApi` implements all of them.
//
// ============================================================================

/// Products and their stock records.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn list_stocks(&self) -> Result<Vec<Stock>, ApiError>;

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError>;

    async fn create_stock(&self, stock: &NewStock) -> Result<Stock, ApiError>;

    async fn update_product(&self, product_id: Uuid, product: &NewProduct) -> Result<Product, ApiError>;

    async fn delete_product(&self, product_id: Uuid) -> Result<(), ApiError>;
}

/// Customers and their nested address resource.
#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ApiError>;

    async fn update_customer(&self, customer_id: Uuid, profile: &CustomerProfile) -> Result<Customer, ApiError>;

    async fn delete_customer(&self, customer_id: Uuid) -> Result<(), ApiError>;

    /// The server answers with the whole customer, address attached.
    async fn create_address(&self, customer_id: Uuid, address: &AddressFields) -> Result<Customer, ApiError>;

    async fn update_address(&self, customer_id: Uuid, address: &AddressFields) -> Result<CustomerAddress, ApiError>;

    async fn delete_address(&self, customer_id: Uuid) -> Result<(), ApiError>;
}

/// Sale orders.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError>;

    /// Line items of one order; the server scopes the lookup by customer.
    async fn order_products(&self, order_id: Uuid, customer_id: Uuid) -> Result<Vec<OrderProduct>, ApiError>;

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError>;

    async fn approve_order(&self, order_id: Uuid) -> Result<(), ApiError>;
}

/// Accounts, sessions and the bearer token attached to every later request.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> Result<User, ApiError>;

    async fn signin(&self, credentials: &Credentials) -> Result<SigninResponse, ApiError>;

    fn set_bearer_token(&self, token: Option<String>);
}
