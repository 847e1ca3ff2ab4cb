use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Customer Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAddress {
    pub id: Uuid,
    pub cep: String,
    pub number: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub country: String,
}

/// A company buying from the business, identified by its CNPJ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub cnpj: String,
    pub corporate_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_address_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<CustomerAddress>,
}

impl Customer {
    pub fn attach_address(&mut self, address: CustomerAddress) {
        self.customer_address_id = Some(address.id);
        self.customer_address = Some(address);
    }

    pub fn detach_address(&mut self) -> Option<CustomerAddress> {
        self.customer_address_id = None;
        self.customer_address.take()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub cnpj: String,
    pub corporate_name: String,
    pub phone: String,
}

/// Editable part of a customer; the CNPJ is fixed once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub corporate_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressFields {
    pub cep: String,
    pub number: String,
    pub street: String,
    pub district: String,
    pub state: String,
    pub country: String,
}

// ============================================================================
// Unit Tests
// ============================================================================
