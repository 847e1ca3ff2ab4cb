use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::value_objects::{Product, Stock};

/// Handle shared between the catalog service and the order book.
pub type SharedCatalog = Arc<RwLock<CatalogCache>>;

// ============================================================================
// Catalog Cache - in-memory mirror of products and stocks
// ============================================================================
//
// Stocks keep the server's order but are indexed by product id. A product
// owns at most one stock record: when a load carries duplicates the first
// record wins and the rest are dropped.
//
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    products: Vec<Product>,
    stocks: Vec<Stock>,
    stock_index: HashMap<Uuid, usize>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(products: Vec<Product>, stocks: Vec<Stock>) -> Self {
        let mut cache = Self::new();
        cache.replace(products, stocks);
        cache
    }

    pub fn into_shared(self) -> SharedCatalog {
        Arc::new(RwLock::new(self))
    }

    /// Swap in a freshly fetched snapshot.
    pub fn replace(&mut self, products: Vec<Product>, stocks: Vec<Stock>) {
        self.products = products;
        self.stocks.clear();
        self.stock_index.clear();

        for stock in stocks {
            self.insert_stock(stock);
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn product(&self, product_id: Uuid) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn stock_for(&self, product_id: Uuid) -> Option<&Stock> {
        self.stock_index
            .get(&product_id)
            .and_then(|index| self.stocks.get(*index))
    }

    /// Replace a product in place, or append it when it is new.
    pub fn upsert_product(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    /// Returns false when the product already has a stock record.
    pub fn insert_stock(&mut self, stock: Stock) -> bool {
        if self.stock_index.contains_key(&stock.product_id) {
            tracing::warn!(
                product_id = %stock.product_id,
                stock_id = %stock.id,
                "Dropping duplicate stock record"
            );
            return false;
        }

        self.stock_index.insert(stock.product_id, self.stocks.len());
        self.stocks.push(stock);
        true
    }

    /// Drop a product and its stock record. Returns the removed product.
    pub fn remove_product(&mut self, product_id: Uuid) -> Option<Product> {
        let position = self.products.iter().position(|p| p.id == product_id)?;
        let removed = self.products.remove(position);

        if self.stock_index.remove(&product_id).is_some() {
            self.stocks.retain(|stock| stock.product_id != product_id);
            self.reindex_stocks();
        }

        Some(removed)
    }

    fn reindex_stocks(&mut self) {
        self.stock_index = self
            .stocks
            .iter()
            .enumerate()
            .map(|(index, stock)| (stock.product_id, index))
            .collect();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
