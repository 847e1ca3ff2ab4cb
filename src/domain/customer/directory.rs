use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::value_objects::Customer;

pub type SharedCustomers = Arc<RwLock<CustomerDirectory>>;

// ============================================================================
// Customer Directory - in-memory mirror of the customer list
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn into_shared(self) -> SharedCustomers {
        Arc::new(RwLock::new(self))
    }

    pub fn replace(&mut self, customers: Vec<Customer>) {
        self.customers = customers;
    }

    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get(&self, customer_id: Uuid) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    pub fn get_mut(&mut self, customer_id: Uuid) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id == customer_id)
    }

    pub fn push(&mut self, customer: Customer) {
        self.customers.push(customer);
    }

    /// Replace the cached record with the same id. Returns false when absent.
    pub fn replace_one(&mut self, customer: Customer) -> bool {
        match self.get_mut(customer.id) {
            Some(existing) => {
                *existing = customer;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, customer_id: Uuid) -> Option<Customer> {
        let position = self.customers.iter().position(|c| c.id == customer_id)?;
        Some(self.customers.remove(position))
    }
}
