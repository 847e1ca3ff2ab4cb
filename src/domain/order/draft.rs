use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::{CatalogCache, Product};
use super::errors::OrderError;
use super::value_objects::{CreateOrderRequest, OrderLineRequest};

// ============================================================================
// Order Draft - the order being composed before submission
// ============================================================================
//
// Invariants:
// - at most one line per product id
// - existing lines keep their position; new lines append
// - a line's amount is 1..=stock.amount as of its last successful mutation
//
// The catalog is read at call time only. A later catalog refresh does not
// re-validate lines already in the draft.
//
// ============================================================================

/// A product snapshot paired with the requested amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftLine {
    pub product: Product,
    pub amount: i64,
}

impl DraftLine {
    pub fn total_price(&self) -> i64 {
        self.product.sale_price * self.amount
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    customer_id: Uuid,
    lines: Vec<DraftLine>,
}

impl OrderDraft {
    pub fn new(customer_id: Uuid) -> Self {
        Self {
            customer_id,
            lines: Vec::new(),
        }
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: Uuid) -> Option<&DraftLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    fn position(&self, product_id: Uuid) -> Option<usize> {
        self.lines.iter().position(|line| line.product.id == product_id)
    }

    /// Add one unit of a product. Returns the line's new amount.
    pub fn add_line(&mut self, catalog: &CatalogCache, product_id: Uuid) -> Result<i64, OrderError> {
        let stock = catalog
            .stock_for(product_id)
            .ok_or(OrderError::ProductNotFound(product_id))?;

        let position = self.position(product_id);
        let current = position.map(|index| self.lines[index].amount).unwrap_or(0);
        let requested = current + 1;

        check_stock(product_id, requested, stock.amount)?;

        match position {
            Some(index) => self.lines[index].amount = requested,
            None => {
                let product = catalog
                    .product(product_id)
                    .ok_or(OrderError::ProductNotFound(product_id))?
                    .clone();
                self.lines.push(DraftLine {
                    product,
                    amount: requested,
                });
            }
        }

        tracing::debug!(product_id = %product_id, amount = requested, "Draft line added");
        Ok(requested)
    }

    /// Set a line's amount. Non-positive quantities are ignored without error.
    pub fn update_line_quantity(
        &mut self,
        catalog: &CatalogCache,
        product_id: Uuid,
        quantity: i64,
    ) -> Result<(), OrderError> {
        if quantity <= 0 {
            tracing::debug!(product_id = %product_id, quantity = quantity, "Ignoring non-positive quantity");
            return Ok(());
        }

        let index = self
            .position(product_id)
            .ok_or(OrderError::LineNotFound(product_id))?;

        let stock = catalog
            .stock_for(product_id)
            .ok_or(OrderError::ProductNotFound(product_id))?;

        check_stock(product_id, quantity, stock.amount)?;

        self.lines[index].amount = quantity;

        tracing::debug!(product_id = %product_id, amount = quantity, "Draft line updated");
        Ok(())
    }

    pub fn remove_line(&mut self, product_id: Uuid) -> Result<DraftLine, OrderError> {
        let index = self
            .position(product_id)
            .ok_or(OrderError::LineNotFound(product_id))?;

        tracing::debug!(product_id = %product_id, "Draft line removed");
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of sale price times amount over every line.
    pub fn total_price(&self) -> i64 {
        self.lines.iter().map(DraftLine::total_price).sum()
    }

    /// Flatten to the creation payload, preserving line order.
    pub fn to_request(&self, customer_id: Uuid) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_id,
            products: self
                .lines
                .iter()
                .map(|line| OrderLineRequest {
                    id: line.product.id,
                    quantity: line.amount,
                })
                .collect(),
        }
    }
}

/// Requesting exactly the available amount is allowed.
fn check_stock(product_id: Uuid, requested: i64, available: i64) -> Result<(), OrderError> {
    if requested > available {
        tracing::warn!(
            product_id = %product_id,
            requested = requested,
            available = available,
            "Stock exceeded"
        );
        return Err(OrderError::StockExceeded {
            product_id,
            requested,
            available,
        });
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product, stock};

    fn catalog_with(products: &[(&Product, i64)]) -> CatalogCache {
        CatalogCache::from_records(
            products.iter().map(|(p, _)| (*p).clone()).collect(),
            products.iter().map(|(p, amount)| stock(p.id, *amount)).collect(),
        )
    }

    #[test]
    fn test_add_up_to_stock_then_exceed() {
        for available in 1..=5 {
            let caneca = product("Caneca", 1500);
            let catalog = catalog_with(&[(&caneca, available)]);
            let mut draft = OrderDraft::new(Uuid::new_v4());

            for expected in 1..=available {
                assert_eq!(draft.add_line(&catalog, caneca.id).unwrap(), expected);
            }

            let before = draft.clone();
            let error = draft.add_line(&catalog, caneca.id).unwrap_err();

            assert!(matches!(
                error,
                OrderError::StockExceeded { requested, available: a, .. }
                    if requested == available + 1 && a == available
            ));
            assert_eq!(draft, before);
            assert_eq!(draft.line(caneca.id).map(|l| l.amount), Some(available));
        }
    }

    #[test]
    fn test_add_without_stock_record_is_product_not_found() {
        let caneca = product("Caneca", 1500);
        let catalog = CatalogCache::from_records(vec![caneca.clone()], vec![]);
        let mut draft = OrderDraft::new(Uuid::new_v4());

        let error = draft.add_line(&catalog, caneca.id).unwrap_err();

        assert!(matches!(error, OrderError::ProductNotFound(id) if id == caneca.id));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_add_with_stock_but_no_product_is_product_not_found() {
        let orphan = Uuid::new_v4();
        let catalog = CatalogCache::from_records(vec![], vec![stock(orphan, 10)]);
        let mut draft = OrderDraft::new(Uuid::new_v4());

        assert!(matches!(
            draft.add_line(&catalog, orphan),
            Err(OrderError::ProductNotFound(_))
        ));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_existing_line_keeps_position() {
        let a = product("A", 100);
        let b = product("B", 200);
        let catalog = catalog_with(&[(&a, 5), (&b, 5)]);
        let mut draft = OrderDraft::new(Uuid::new_v4());

        draft.add_line(&catalog, a.id).unwrap();
        draft.add_line(&catalog, b.id).unwrap();
        draft.add_line(&catalog, a.id).unwrap();

        let ids: Vec<_> = draft.lines().iter().map(|l| (l.product.id, l.amount)).collect();
        assert_eq!(ids, vec![(a.id, 2), (b.id, 1)]);
    }

    #[test]
    fn test_non_positive_update_is_silent_noop() {
        let a = product("A", 100);
        let catalog = catalog_with(&[(&a, 5)]);
        let mut draft = OrderDraft::new(Uuid::new_v4());
        draft.add_line(&catalog, a.id).unwrap();
        let before = draft.clone();

        for quantity in [0, -1, -50] {
            draft.update_line_quantity(&catalog, a.id, quantity).unwrap();
            // Not even a missing line is reported for non-positive quantities.
            draft.update_line_quantity(&catalog, Uuid::new_v4(), quantity).unwrap();
        }

        assert_eq!(draft, before);
    }

    #[test]
    fn test_update_checks_line_then_stock() {
        let a = product("A", 100);
        let b = product("B", 100);
        let catalog = catalog_with(&[(&a, 3), (&b, 3)]);
        let mut draft = OrderDraft::new(Uuid::new_v4());
        draft.add_line(&catalog, a.id).unwrap();

        assert!(matches!(
            draft.update_line_quantity(&catalog, b.id, 1),
            Err(OrderError::LineNotFound(id)) if id == b.id
        ));
        assert!(matches!(
            draft.update_line_quantity(&catalog, a.id, 4),
            Err(OrderError::StockExceeded { requested: 4, available: 3, .. })
        ));
        assert_eq!(draft.line(a.id).map(|l| l.amount), Some(1));

        draft.update_line_quantity(&catalog, a.id, 3).unwrap();
        assert_eq!(draft.line(a.id).map(|l| l.amount), Some(3));
    }

    #[test]
    fn test_update_after_stock_disappears_is_product_not_found() {
        let a = product("A", 100);
        let mut catalog = catalog_with(&[(&a, 3)]);
        let mut draft = OrderDraft::new(Uuid::new_v4());
        draft.add_line(&catalog, a.id).unwrap();

        catalog.replace(vec![a.clone()], vec![]);

        assert!(matches!(
            draft.update_line_quantity(&catalog, a.id, 2),
            Err(OrderError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_remove_twice_fails_second_time() {
        let a = product("A", 100);
        let b = product("B", 100);
        let c = product("C", 100);
        let catalog = catalog_with(&[(&a, 3), (&b, 3), (&c, 3)]);
        let mut draft = OrderDraft::new(Uuid::new_v4());
        for id in [a.id, b.id, c.id] {
            draft.add_line(&catalog, id).unwrap();
        }

        let removed = draft.remove_line(b.id).unwrap();

        assert_eq!(removed.product.id, b.id);
        assert!(matches!(draft.remove_line(b.id), Err(OrderError::LineNotFound(_))));
        let ids: Vec<_> = draft.lines().iter().map(|l| l.product.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn test_stock_of_three_scenario() {
        let x = product("X", 250);
        let catalog = catalog_with(&[(&x, 3)]);
        let mut draft = OrderDraft::new(Uuid::new_v4());

        for _ in 0..3 {
            draft.add_line(&catalog, x.id).unwrap();
        }
        assert_eq!(draft.line(x.id).map(|l| l.amount), Some(3));

        assert!(matches!(
            draft.add_line(&catalog, x.id),
            Err(OrderError::StockExceeded { .. })
        ));
        assert_eq!(draft.line(x.id).map(|l| l.amount), Some(3));

        draft.update_line_quantity(&catalog, x.id, 2).unwrap();
        assert_eq!(draft.line(x.id).map(|l| l.amount), Some(2));

        draft.remove_line(x.id).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_request_keeps_order_and_drops_product_detail() {
        let a = product("A", 1000);
        let b = product("B", 2500);
        let customer_id = Uuid::new_v4();
        let catalog = catalog_with(&[(&a, 5), (&b, 5)]);
        let mut draft = OrderDraft::new(customer_id);
        draft.add_line(&catalog, a.id).unwrap();
        draft.add_line(&catalog, a.id).unwrap();
        draft.add_line(&catalog, b.id).unwrap();

        let request = draft.to_request(customer_id);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "customer_id": customer_id,
                "products": [
                    { "id": a.id, "quantity": 2 },
                    { "id": b.id, "quantity": 1 }
                ]
            })
        );
        assert_eq!(draft.total_price(), 2 * 1000 + 2500);
    }

    #[test]
    fn test_clear_always_empties() {
        let a = product("A", 100);
        let catalog = catalog_with(&[(&a, 3)]);
        let mut draft = OrderDraft::new(Uuid::new_v4());
        draft.clear();
        draft.add_line(&catalog, a.id).unwrap();

        draft.clear();

        assert!(draft.is_empty());
        assert_eq!(draft.total_price(), 0);
    }
}
