use std::sync::Arc;

use uuid::Uuid;

use crate::api::CustomerApi;
use super::directory::SharedCustomers;
use super::errors::CustomerError;
use super::value_objects::{AddressFields, Customer, CustomerAddress, CustomerProfile, NewCustomer};

// ============================================================================
// Customer Service
// ============================================================================
//
// Remote call first, local patch second. A customer the server accepted but
// the directory does not hold is a cache/server divergence and is reported
// as CustomerNotFound after the remote call.
//
// ============================================================================

pub struct CustomerService {
    api: Arc<dyn CustomerApi>,
    directory: SharedCustomers,
}

impl CustomerService {
    pub fn new(api: Arc<dyn CustomerApi>, directory: SharedCustomers) -> Self {
        Self { api, directory }
    }

    pub fn directory(&self) -> &SharedCustomers {
        &self.directory
    }

    pub async fn load(&self) -> Result<(), CustomerError> {
        let customers = self.api.list_customers().await?;

        tracing::debug!(customers = customers.len(), "Customers loaded");

        self.directory.write().await.replace(customers);
        Ok(())
    }

    pub async fn create(&self, customer: NewCustomer) -> Result<Customer, CustomerError> {
        let created = self.api.create_customer(&customer).await?;

        tracing::info!(customer_id = %created.id, "Customer created");

        self.directory.write().await.push(created.clone());
        Ok(created)
    }

    pub async fn update(
        &self,
        customer_id: Uuid,
        profile: CustomerProfile,
    ) -> Result<Customer, CustomerError> {
        let updated = self.api.update_customer(customer_id, &profile).await?;

        if !self.directory.write().await.replace_one(updated.clone()) {
            tracing::warn!(customer_id = %customer_id, "Updated customer was not cached");
            return Err(CustomerError::CustomerNotFound(customer_id));
        }

        tracing::info!(customer_id = %customer_id, "Customer updated");
        Ok(updated)
    }

    pub async fn remove(&self, customer_id: Uuid) -> Result<(), CustomerError> {
        self.api.delete_customer(customer_id).await?;

        self.directory
            .write()
            .await
            .remove(customer_id)
            .ok_or(CustomerError::CustomerNotFound(customer_id))?;

        tracing::info!(customer_id = %customer_id, "Customer removed");
        Ok(())
    }

    pub async fn create_address(
        &self,
        customer_id: Uuid,
        address: AddressFields,
    ) -> Result<Customer, CustomerError> {
        let customer = self.api.create_address(customer_id, &address).await?;

        if !self.directory.write().await.replace_one(customer.clone()) {
            return Err(CustomerError::CustomerNotFound(customer_id));
        }

        tracing::info!(customer_id = %customer_id, "Customer address created");
        Ok(customer)
    }

    pub async fn update_address(
        &self,
        customer_id: Uuid,
        address: AddressFields,
    ) -> Result<CustomerAddress, CustomerError> {
        let updated = self.api.update_address(customer_id, &address).await?;

        let mut directory = self.directory.write().await;
        let customer = directory
            .get_mut(customer_id)
            .ok_or(CustomerError::CustomerNotFound(customer_id))?;
        customer.attach_address(updated.clone());

        tracing::info!(customer_id = %customer_id, address_id = %updated.id, "Customer address updated");
        Ok(updated)
    }

    pub async fn remove_address(&self, customer_id: Uuid) -> Result<(), CustomerError> {
        self.api.delete_address(customer_id).await?;

        let mut directory = self.directory.write().await;
        let customer = directory.get_mut(customer_id).ok_or_else(|| {
            tracing::warn!(customer_id = %customer_id, "Customer with removed address is not cached");
            CustomerError::CustomerNotFound(customer_id)
        })?;

        if customer.detach_address().is_none() {
            tracing::debug!(customer_id = %customer_id, "Cached customer had no address");
        }

        tracing::info!(customer_id = %customer_id, "Customer address removed");
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
