use std::sync::Arc;

use uuid::Uuid;

use crate::api::CatalogApi;
use super::cache::SharedCatalog;
use super::errors::CatalogError;
use super::value_objects::{NewProduct, NewStock, Product};

// ============================================================================
// Catalog Service
// ============================================================================
//
// Orchestrates: remote call → local patch of the shared cache.
// The cache is only touched once the remote call has succeeded.
//
// ============================================================================

pub struct CatalogService {
    api: Arc<dyn CatalogApi>,
    cache: SharedCatalog,
}

impl CatalogService {
    pub fn new(api: Arc<dyn CatalogApi>, cache: SharedCatalog) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &SharedCatalog {
        &self.cache
    }

    /// Fetch products and stocks and replace the cached snapshot.
    pub async fn load(&self) -> Result<(), CatalogError> {
        let products = self.api.list_products().await?;
        let stocks = self.api.list_stocks().await?;

        tracing::debug!(
            products = products.len(),
            stocks = stocks.len(),
            "Catalog loaded"
        );

        self.cache.write().await.replace(products, stocks);
        Ok(())
    }

    /// Create the product, then its stock record with the initial amount.
    pub async fn create_product(
        &self,
        product: NewProduct,
        amount: i64,
        limit: i64,
    ) -> Result<Product, CatalogError> {
        let created = self.api.create_product(&product).await?;

        let stock = self
            .api
            .create_stock(&NewStock {
                product_id: created.id,
                amount,
                limit,
            })
            .await?;

        tracing::info!(product_id = %created.id, amount = amount, "Product created");

        let mut cache = self.cache.write().await;
        cache.upsert_product(created.clone());
        cache.insert_stock(stock);

        Ok(created)
    }

    pub async fn update_product(
        &self,
        product_id: Uuid,
        product: NewProduct,
    ) -> Result<Product, CatalogError> {
        let updated = self.api.update_product(product_id, &product).await?;

        tracing::info!(product_id = %product_id, "Product updated");

        self.cache.write().await.upsert_product(updated.clone());
        Ok(updated)
    }

    pub async fn remove_product(&self, product_id: Uuid) -> Result<(), CatalogError> {
        self.api.delete_product(product_id).await?;

        if self.cache.write().await.remove_product(product_id).is_none() {
            tracing::warn!(product_id = %product_id, "Removed product was not cached");
        } else {
            tracing::info!(product_id = %product_id, "Product removed");
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
