use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::api::{AuthApi, CatalogApi, CustomerApi, HttpApi, OrderApi};
use crate::config::AppConfig;
use crate::domain::catalog::{CatalogCache, CatalogService};
use crate::domain::customer::{Customer, CustomerDirectory, CustomerService};
use crate::domain::order::{Order, OrderBook, OrderDraft, OrderError};
use crate::projection::{project_all, OrderProductView, OrderView, ProductView, StockView};
use crate::session::{AuthService, FileSessionStore, SessionStore};

// ============================================================================
// Back Office - aggregate root
// ============================================================================
//
// Constructed once at start-up. Owns one service per area and wires the
// shared catalog/customer caches into the order book, which only reads them.
//
// ============================================================================

pub struct BackOffice {
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub customers: CustomerService,
    pub orders: OrderBook,
}

impl BackOffice {
    pub fn new<A>(api: Arc<A>, store: Arc<dyn SessionStore>) -> Self
    where
        A: CatalogApi + CustomerApi + OrderApi + AuthApi + 'static,
    {
        let catalog = CatalogCache::new().into_shared();
        let customers = CustomerDirectory::new().into_shared();

        Self {
            auth: AuthService::new(api.clone(), store),
            catalog: CatalogService::new(api.clone(), catalog.clone()),
            customers: CustomerService::new(api.clone(), customers.clone()),
            orders: OrderBook::new(api, catalog, customers),
        }
    }

    /// Build the HTTP-backed back office and restore any persisted session.
    pub fn connect(config: &AppConfig) -> Result<Self> {
        let api = HttpApi::new(config.api_url.clone(), config.http_timeout)
            .context("Failed to build HTTP client")?;
        let store = FileSessionStore::new(config.session_file.clone());

        let mut office = Self::new(Arc::new(api), Arc::new(store));
        office
            .auth
            .restore()
            .with_context(|| format!("Failed to restore session from {}", config.session_file.display()))?;

        tracing::info!(
            api_url = %config.api_url,
            authenticated = office.auth.is_authenticated(),
            "Back office ready"
        );
        Ok(office)
    }

    /// Reload catalog, customers and orders from the server.
    pub async fn refresh(&mut self) -> Result<()> {
        self.catalog.load().await.context("Failed to load catalog")?;
        self.customers.load().await.context("Failed to load customers")?;
        self.orders.load_orders().await.context("Failed to load orders")?;
        Ok(())
    }

    /// Submit the active draft and clear it once the server confirmed.
    pub async fn place_order(&mut self) -> Result<Order, OrderError> {
        let customer_id = self
            .orders
            .draft()
            .map(OrderDraft::customer_id)
            .ok_or(OrderError::NoActiveDraft)?;

        let order = self.orders.submit(customer_id).await?;
        self.orders.clear();
        Ok(order)
    }

    pub async fn product_views(&self) -> Vec<ProductView> {
        project_all(self.catalog.cache().read().await.products())
    }

    pub async fn stock_views(&self) -> Vec<StockView> {
        project_all(self.catalog.cache().read().await.stocks())
    }

    pub async fn customer_list(&self) -> Vec<Customer> {
        self.customers.directory().read().await.all().to_vec()
    }

    pub fn order_views(&self) -> Vec<OrderView> {
        project_all(self.orders.orders())
    }

    pub async fn order_detail_views(&self, order_id: Uuid) -> Result<Vec<OrderProductView>, OrderError> {
        let lines = self.orders.order_details(order_id).await?;
        Ok(project_all(&lines))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
