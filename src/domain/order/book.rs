use std::sync::Arc;

use uuid::Uuid;

use crate::api::OrderApi;
use crate::domain::catalog::SharedCatalog;
use crate::domain::customer::SharedCustomers;
use super::draft::{DraftLine, OrderDraft};
use super::errors::OrderError;
use super::value_objects::{Order, OrderProduct, OrderStatus};

// ============================================================================
// Order Book - active draft + finalized orders
// ============================================================================
//
// Orchestrates: draft mutation (against a catalog snapshot) → submission →
// reconciliation of the server's answer into the finalized list.
//
// Catalog and customers are read-only here. Each call takes the snapshot
// current at call time; nothing is re-validated when they refresh later.
//
// ============================================================================

pub struct OrderBook {
    api: Arc<dyn OrderApi>,
    catalog: SharedCatalog,
    customers: SharedCustomers,
    draft: Option<OrderDraft>,
    orders: Vec<Order>,
    status_filter: OrderStatus,
}

impl OrderBook {
    pub fn new(api: Arc<dyn OrderApi>, catalog: SharedCatalog, customers: SharedCustomers) -> Self {
        Self {
            api,
            catalog,
            customers,
            draft: None,
            orders: Vec::new(),
            status_filter: OrderStatus::default(),
        }
    }

    // ------------------------------------------------------------------------
    // Draft
    // ------------------------------------------------------------------------

    /// Begin composing an order for a customer, discarding any previous draft.
    pub fn start_draft(&mut self, customer_id: Uuid) -> &OrderDraft {
        if let Some(previous) = &self.draft {
            if !previous.is_empty() {
                tracing::debug!(
                    customer_id = %previous.customer_id(),
                    lines = previous.lines().len(),
                    "Discarding unsubmitted draft"
                );
            }
        }

        tracing::debug!(customer_id = %customer_id, "Draft started");
        self.draft.insert(OrderDraft::new(customer_id))
    }

    pub fn draft(&self) -> Option<&OrderDraft> {
        self.draft.as_ref()
    }

    pub async fn add_line(&mut self, product_id: Uuid) -> Result<i64, OrderError> {
        let catalog = self.catalog.read().await;
        let draft = self.draft.as_mut().ok_or(OrderError::NoActiveDraft)?;
        draft.add_line(&catalog, product_id)
    }

    pub async fn update_line_quantity(&mut self, product_id: Uuid, quantity: i64) -> Result<(), OrderError> {
        let catalog = self.catalog.read().await;
        let draft = self.draft.as_mut().ok_or(OrderError::NoActiveDraft)?;
        draft.update_line_quantity(&catalog, product_id, quantity)
    }

    pub fn remove_line(&mut self, product_id: Uuid) -> Result<DraftLine, OrderError> {
        self.draft
            .as_mut()
            .ok_or(OrderError::NoActiveDraft)?
            .remove_line(product_id)
    }

    pub fn clear(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.clear();
        }
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Send the draft's `{id, quantity}` pairs and append the created order.
    ///
    /// The draft is left untouched either way; clearing it after a confirmed
    /// success is up to the caller.
    pub async fn submit(&mut self, customer_id: Uuid) -> Result<Order, OrderError> {
        let draft = self.draft.as_ref().ok_or(OrderError::NoActiveDraft)?;
        if draft.is_empty() {
            return Err(OrderError::EmptyDraft);
        }

        let request = draft.to_request(customer_id);

        tracing::info!(
            customer_id = %customer_id,
            lines = request.products.len(),
            "Submitting order"
        );

        let created = self.api.create_order(&request).await.map_err(|e| {
            tracing::warn!(customer_id = %customer_id, error = %e, "Order submission failed");
            e
        })?;

        let mut order = created.order;
        if order.customer.is_none() {
            order.customer = self.customers.read().await.get(order.customer_id).cloned();
        }

        tracing::info!(order_id = %order.id, price = order.price, "Order created");

        self.orders.push(order.clone());
        Ok(order)
    }

    /// Approve remotely, then flip the cached record.
    ///
    /// An order missing from the cache after a successful remote call means
    /// the cache diverged from the server and is reported as OrderNotFound.
    pub async fn approve(&mut self, order_id: Uuid) -> Result<Order, OrderError> {
        self.api.approve_order(order_id).await?;

        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or_else(|| {
                tracing::warn!(order_id = %order_id, "Approved order is not cached");
                OrderError::OrderNotFound(order_id)
            })?;

        if order.approve() {
            tracing::info!(order_id = %order_id, "Order approved");
        } else {
            tracing::debug!(order_id = %order_id, "Order was already approved");
        }

        Ok(order.clone())
    }

    // ------------------------------------------------------------------------
    // Finalized orders
    // ------------------------------------------------------------------------

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == order_id)
    }

    pub fn status_filter(&self) -> OrderStatus {
        self.status_filter
    }

    /// Takes effect on the next `load_orders`.
    pub fn set_status_filter(&mut self, status: OrderStatus) {
        self.status_filter = status;
    }

    pub async fn load_orders(&mut self) -> Result<(), OrderError> {
        let orders = self.api.list_orders(Some(self.status_filter)).await?;

        tracing::debug!(
            status = self.status_filter.as_str(),
            orders = orders.len(),
            "Orders loaded"
        );

        self.orders = orders;
        Ok(())
    }

    /// Make sure `order_id` is in the cached list, whatever its status.
    ///
    /// Tries the current filter first, then the other status. The filter is
    /// left on whichever list held the order.
    pub async fn load_orders_containing(&mut self, order_id: Uuid) -> Result<&Order, OrderError> {
        let first = self.status_filter;
        let other = match first {
            OrderStatus::Pending => OrderStatus::Approved,
            OrderStatus::Approved => OrderStatus::Pending,
        };

        for status in [first, other] {
            self.status_filter = status;
            self.load_orders().await?;
            if self.order(order_id).is_some() {
                break;
            }
        }

        if self.order(order_id).is_none() {
            self.status_filter = first;
            tracing::warn!(order_id = %order_id, "Order not listed under any status");
        }

        self.order(order_id).ok_or(OrderError::OrderNotFound(order_id))
    }

    /// Line items of a cached finalized order, scoped by its customer.
    pub async fn order_details(&self, order_id: Uuid) -> Result<Vec<OrderProduct>, OrderError> {
        let customer_id = self
            .order(order_id)
            .map(|order| order.customer_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        Ok(self.api.order_products(order_id, customer_id).await?)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
