// ============================================================================
// Test Support - in-process fake of every collaborator + record builders
// ============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::api::{ApiError, AuthApi, CatalogApi, CustomerApi, OrderApi};
use crate::domain::catalog::{NewProduct, NewStock, Product, Stock};
use crate::domain::customer::{AddressFields, Customer, CustomerAddress, CustomerProfile, NewCustomer};
use crate::domain::order::{CreateOrderRequest, CreatedOrder, Order, OrderProduct, OrderStatus, OrderedProduct};
use crate::session::{Credentials, SigninResponse, SignupRequest, User};

pub fn product(title: &str, sale_price: i64) -> Product {
    Product {
        id: Uuid::new_v4(),
        bar_code: format!("789{:010}", sale_price),
        title: title.to_string(),
        description: format!("{} description", title),
        unit_of_measurement: "un".to_string(),
        quantity_in_units: 1,
        buy_price: sale_price / 2,
        sale_price,
    }
}

pub fn new_product(title: &str, sale_price: i64) -> NewProduct {
    NewProduct {
        bar_code: "7891234567890".to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        unit_of_measurement: "un".to_string(),
        quantity_in_units: 1,
        buy_price: sale_price / 2,
        sale_price,
    }
}

pub fn stock(product_id: Uuid, amount: i64) -> Stock {
    Stock {
        id: Uuid::new_v4(),
        product_id,
        amount,
        price_unit: 0,
    }
}

pub fn customer(corporate_name: &str) -> Customer {
    Customer {
        id: Uuid::new_v4(),
        cnpj: "12.345.678/0001-90".to_string(),
        corporate_name: corporate_name.to_string(),
        phone: "15 99999-0000".to_string(),
        customer_address_id: None,
        customer_address: None,
    }
}

pub fn address_fields(street: &str) -> AddressFields {
    AddressFields {
        cep: "18000-000".to_string(),
        number: "100".to_string(),
        street: street.to_string(),
        district: "Centro".to_string(),
        state: "SP".to_string(),
        country: "Brasil".to_string(),
    }
}

pub fn address() -> CustomerAddress {
    with_id(address_fields("Rua das Flores"))
}

fn with_id(fields: AddressFields) -> CustomerAddress {
    CustomerAddress {
        id: Uuid::new_v4(),
        cep: fields.cep,
        number: fields.number,
        street: fields.street,
        district: fields.district,
        state: fields.state,
        country: fields.country,
    }
}

pub fn order(status: OrderStatus, price: i64) -> Order {
    Order {
        id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        status,
        price,
        created_at: Utc::now(),
        customer: None,
    }
}

/// Server double keeping its own records. `fail_requests(true)` makes every
/// remote call fail with a 500 until switched off.
#[derive(Default)]
pub struct FakeApi {
    failing: AtomicBool,
    products: Mutex<Vec<Product>>,
    stocks: Mutex<Vec<Stock>>,
    customers: Mutex<Vec<Customer>>,
    orders: Mutex<Vec<Order>>,
    order_products: Mutex<Vec<OrderProduct>>,
    created_orders: Mutex<Vec<CreateOrderRequest>>,
    approved_orders: Mutex<Vec<Uuid>>,
    detail_requests: Mutex<Vec<(Uuid, Uuid)>>,
    token: Mutex<Option<String>>,
}

impl FakeApi {
    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn seed_catalog(&self, products: Vec<Product>, stocks: Vec<Stock>) {
        *self.products.lock().unwrap() = products;
        *self.stocks.lock().unwrap() = stocks;
    }

    pub fn seed_customers(&self, customers: Vec<Customer>) {
        *self.customers.lock().unwrap() = customers;
    }

    pub fn seed_orders(&self, orders: Vec<Order>) {
        *self.orders.lock().unwrap() = orders;
    }

    pub fn seed_order_products(&self, lines: Vec<OrderProduct>) {
        *self.order_products.lock().unwrap() = lines;
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.customers.lock().unwrap().clone()
    }

    pub fn created_orders(&self) -> Vec<CreateOrderRequest> {
        self.created_orders.lock().unwrap().clone()
    }

    pub fn approved_orders(&self) -> Vec<Uuid> {
        self.approved_orders.lock().unwrap().clone()
    }

    /// `(order_id, customer_id)` of every order detail call.
    pub fn detail_requests(&self) -> Vec<(Uuid, Uuid)> {
        self.detail_requests.lock().unwrap().clone()
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.check()?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn list_stocks(&self) -> Result<Vec<Stock>, ApiError> {
        self.check()?;
        Ok(self.stocks.lock().unwrap().clone())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.check()?;
        let created = Product {
            id: Uuid::new_v4(),
            bar_code: product.bar_code.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            unit_of_measurement: product.unit_of_measurement.clone(),
            quantity_in_units: product.quantity_in_units,
            buy_price: product.buy_price,
            sale_price: product.sale_price,
        };
        self.products.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn create_stock(&self, stock: &NewStock) -> Result<Stock, ApiError> {
        self.check()?;
        let created = Stock {
            id: Uuid::new_v4(),
            product_id: stock.product_id,
            amount: stock.amount,
            price_unit: 0,
        };
        self.stocks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_product(&self, product_id: Uuid, product: &NewProduct) -> Result<Product, ApiError> {
        self.check()?;
        let mut products = self.products.lock().unwrap();
        let existing = products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(not_found)?;
        existing.bar_code = product.bar_code.clone();
        existing.title = product.title.clone();
        existing.description = product.description.clone();
        existing.unit_of_measurement = product.unit_of_measurement.clone();
        existing.quantity_in_units = product.quantity_in_units;
        existing.buy_price = product.buy_price;
        existing.sale_price = product.sale_price;
        Ok(existing.clone())
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<(), ApiError> {
        self.check()?;
        self.products.lock().unwrap().retain(|p| p.id != product_id);
        Ok(())
    }
}

#[async_trait]
impl CustomerApi for FakeApi {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.check()?;
        Ok(self.customers.lock().unwrap().clone())
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ApiError> {
        self.check()?;
        let created = Customer {
            id: Uuid::new_v4(),
            cnpj: customer.cnpj.clone(),
            corporate_name: customer.corporate_name.clone(),
            phone: customer.phone.clone(),
            customer_address_id: None,
            customer_address: None,
        };
        self.customers.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_customer(&self, customer_id: Uuid, profile: &CustomerProfile) -> Result<Customer, ApiError> {
        self.check()?;
        let mut customers = self.customers.lock().unwrap();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(not_found)?;
        customer.corporate_name = profile.corporate_name.clone();
        customer.phone = profile.phone.clone();
        Ok(customer.clone())
    }

    async fn delete_customer(&self, customer_id: Uuid) -> Result<(), ApiError> {
        self.check()?;
        self.customers.lock().unwrap().retain(|c| c.id != customer_id);
        Ok(())
    }

    async fn create_address(&self, customer_id: Uuid, address: &AddressFields) -> Result<Customer, ApiError> {
        self.check()?;
        let mut customers = self.customers.lock().unwrap();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(not_found)?;
        customer.attach_address(with_id(address.clone()));
        Ok(customer.clone())
    }

    async fn update_address(&self, customer_id: Uuid, address: &AddressFields) -> Result<CustomerAddress, ApiError> {
        self.check()?;
        let mut customers = self.customers.lock().unwrap();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(not_found)?;
        let updated = with_id(address.clone());
        customer.attach_address(updated.clone());
        Ok(updated)
    }

    async fn delete_address(&self, customer_id: Uuid) -> Result<(), ApiError> {
        self.check()?;
        if let Some(customer) = self.customers.lock().unwrap().iter_mut().find(|c| c.id == customer_id) {
            customer.detach_address();
        }
        Ok(())
    }
}

#[async_trait]
impl OrderApi for FakeApi {
    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ApiError> {
        self.check()?;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|order| status.map_or(true, |s| order.status == s))
            .cloned()
            .collect())
    }

    async fn order_products(&self, order_id: Uuid, customer_id: Uuid) -> Result<Vec<OrderProduct>, ApiError> {
        self.check()?;
        self.detail_requests.lock().unwrap().push((order_id, customer_id));
        Ok(self.order_products.lock().unwrap().clone())
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError> {
        self.check()?;
        let products = self.products.lock().unwrap().clone();

        let order_products: Vec<OrderedProduct> = request
            .products
            .iter()
            .map(|line| {
                let unit = products
                    .iter()
                    .find(|p| p.id == line.id)
                    .map(|p| p.sale_price)
                    .unwrap_or(0);
                OrderedProduct {
                    id: Uuid::new_v4(),
                    product_id: line.id,
                    quantity: line.quantity,
                    total_price: unit * line.quantity,
                }
            })
            .collect();

        let order = Order {
            id: Uuid::new_v4(),
            customer_id: request.customer_id,
            status: OrderStatus::Pending,
            price: order_products.iter().map(|p| p.total_price).sum(),
            created_at: Utc::now(),
            customer: None,
        };

        self.created_orders.lock().unwrap().push(request.clone());
        self.orders.lock().unwrap().push(order.clone());

        Ok(CreatedOrder {
            order,
            order_products,
        })
    }

    async fn approve_order(&self, order_id: Uuid) -> Result<(), ApiError> {
        self.check()?;
        self.approved_orders.lock().unwrap().push(order_id);
        if let Some(order) = self.orders.lock().unwrap().iter_mut().find(|o| o.id == order_id) {
            order.status = OrderStatus::Approved;
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn signup(&self, request: &SignupRequest) -> Result<User, ApiError> {
        self.check()?;
        Ok(User {
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            username: request.username.clone(),
        })
    }

    async fn signin(&self, credentials: &Credentials) -> Result<SigninResponse, ApiError> {
        self.check()?;
        Ok(SigninResponse {
            user: User {
                full_name: "Maria Silva".to_string(),
                email: credentials.email.clone(),
                username: "maria".to_string(),
            },
            token: format!("token-{}", Uuid::new_v4()),
        })
    }

    fn set_bearer_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not found".to_string(),
    }
}
