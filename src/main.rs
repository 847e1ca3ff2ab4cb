use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use sorocaps::domain::catalog::NewProduct;
use sorocaps::domain::customer::{AddressFields, CustomerProfile, NewCustomer};
use sorocaps::domain::order::OrderStatus;
use sorocaps::projection::Projection;
use sorocaps::session::{Credentials, SignupRequest};
use sorocaps::{AppConfig, BackOffice};

#[derive(Parser)]
#[command(name = "sorocaps")]
#[command(about = "Back-office client for customers, products and sale orders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Signup {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in and persist the session
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the persisted session
    Signout,

    /// List products with formatted prices
    Products,

    /// List stock records
    Stocks,

    /// Register a product and its initial stock
    CreateProduct {
        #[command(flatten)]
        product: ProductArgs,
        /// Initial stock amount
        #[arg(long)]
        amount: i64,
        /// Stock limit
        #[arg(long, default_value_t = 0)]
        limit: i64,
    },

    /// Replace a product's fields
    UpdateProduct {
        #[arg(long)]
        id: Uuid,
        #[command(flatten)]
        product: ProductArgs,
    },

    RemoveProduct {
        #[arg(long)]
        id: Uuid,
    },

    /// List customers
    Customers,

    CreateCustomer {
        #[arg(long)]
        cnpj: String,
        #[arg(long)]
        corporate_name: String,
        #[arg(long)]
        phone: String,
    },

    UpdateCustomer {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        corporate_name: String,
        #[arg(long)]
        phone: String,
    },

    RemoveCustomer {
        #[arg(long)]
        id: Uuid,
    },

    /// Create or replace a customer's address
    SetAddress {
        #[arg(long)]
        customer: Uuid,
        #[command(flatten)]
        address: AddressArgs,
    },

    RemoveAddress {
        #[arg(long)]
        customer: Uuid,
    },

    /// List sale orders
    Orders {
        /// pending | approved
        #[arg(long, default_value = "pending")]
        status: OrderStatus,
    },

    /// Line items of one order
    OrderDetails {
        #[arg(long)]
        id: Uuid,
    },

    /// Compose and submit a sale order
    PlaceOrder {
        #[arg(long)]
        customer: Uuid,
        /// PRODUCT_ID or PRODUCT_ID:QUANTITY, repeatable
        #[arg(long = "line", required = true, value_parser = parse_line)]
        lines: Vec<(Uuid, i64)>,
    },

    /// Approve a pending order
    Approve {
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(clap::Args)]
struct ProductArgs {
    #[arg(long, default_value = "")]
    bar_code: String,
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "un")]
    unit_of_measurement: String,
    #[arg(long, default_value_t = 1)]
    quantity_in_units: i64,
    /// Purchase price in centavos
    #[arg(long)]
    buy_price: i64,
    /// Sale price in centavos
    #[arg(long)]
    sale_price: i64,
}

impl From<ProductArgs> for NewProduct {
    fn from(args: ProductArgs) -> Self {
        NewProduct {
            bar_code: args.bar_code,
            title: args.title,
            description: args.description,
            unit_of_measurement: args.unit_of_measurement,
            quantity_in_units: args.quantity_in_units,
            buy_price: args.buy_price,
            sale_price: args.sale_price,
        }
    }
}

#[derive(clap::Args)]
struct AddressArgs {
    #[arg(long)]
    cep: String,
    #[arg(long)]
    number: String,
    #[arg(long)]
    street: String,
    #[arg(long)]
    district: String,
    #[arg(long)]
    state: String,
    #[arg(long, default_value = "Brasil")]
    country: String,
}

impl From<AddressArgs> for AddressFields {
    fn from(args: AddressArgs) -> Self {
        AddressFields {
            cep: args.cep,
            number: args.number,
            street: args.street,
            district: args.district,
            state: args.state,
            country: args.country,
        }
    }
}

fn parse_line(raw: &str) -> Result<(Uuid, i64), String> {
    let (id, quantity) = match raw.split_once(':') {
        Some((id, quantity)) => (id, quantity.parse::<i64>().map_err(|e| e.to_string())?),
        None => (raw, 1),
    };
    if quantity <= 0 {
        return Err(format!("quantity must be at least 1, got {}", quantity));
    }
    let id = Uuid::parse_str(id).map_err(|e| e.to_string())?;
    Ok((id, quantity))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sorocaps=debug")),
        )
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
    }

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let mut office = BackOffice::connect(&config)?;

    match cli.cmd {
        Commands::Signup {
            full_name,
            username,
            email,
            password,
        } => {
            let user = office
                .auth
                .signup(SignupRequest {
                    full_name,
                    username,
                    email,
                    password,
                })
                .await?;
            print_json(&user)?;
        }

        Commands::Signin { email, password } => {
            let session = office.auth.signin(Credentials { email, password }).await?;
            print_json(&session.user)?;
        }

        Commands::Signout => {
            office.auth.signout()?;
        }

        Commands::Products => {
            office.catalog.load().await?;
            print_json(&office.product_views().await)?;
        }

        Commands::Stocks => {
            office.catalog.load().await?;
            print_json(&office.stock_views().await)?;
        }

        Commands::CreateProduct { product, amount, limit } => {
            let created = office
                .catalog
                .create_product(product.into(), amount, limit)
                .await?;
            print_json(&created.project())?;
        }

        Commands::UpdateProduct { id, product } => {
            office.catalog.load().await?;
            let updated = office.catalog.update_product(id, product.into()).await?;
            print_json(&updated.project())?;
        }

        Commands::RemoveProduct { id } => {
            office.catalog.load().await?;
            office.catalog.remove_product(id).await?;
        }

        Commands::Customers => {
            office.customers.load().await?;
            print_json(&office.customer_list().await)?;
        }

        Commands::CreateCustomer {
            cnpj,
            corporate_name,
            phone,
        } => {
            let created = office
                .customers
                .create(NewCustomer {
                    cnpj,
                    corporate_name,
                    phone,
                })
                .await?;
            print_json(&created)?;
        }

        Commands::UpdateCustomer {
            id,
            corporate_name,
            phone,
        } => {
            office.customers.load().await?;
            let updated = office
                .customers
                .update(id, CustomerProfile { corporate_name, phone })
                .await?;
            print_json(&updated)?;
        }

        Commands::RemoveCustomer { id } => {
            office.customers.load().await?;
            office.customers.remove(id).await?;
        }

        Commands::SetAddress { customer, address } => {
            office.customers.load().await?;
            let has_address = office
                .customers
                .directory()
                .read()
                .await
                .get(customer)
                .map(|c| c.customer_address.is_some());

            match has_address {
                Some(true) => {
                    let updated = office.customers.update_address(customer, address.into()).await?;
                    print_json(&updated)?;
                }
                Some(false) => {
                    let updated = office.customers.create_address(customer, address.into()).await?;
                    print_json(&updated)?;
                }
                None => bail!("Customer not found: {}", customer),
            }
        }

        Commands::RemoveAddress { customer } => {
            office.customers.load().await?;
            office.customers.remove_address(customer).await?;
        }

        Commands::Orders { status } => {
            office.orders.set_status_filter(status);
            office.orders.load_orders().await?;
            print_json(&office.order_views())?;
        }

        Commands::OrderDetails { id } => {
            office.orders.load_orders_containing(id).await?;
            print_json(&office.order_detail_views(id).await?)?;
        }

        Commands::PlaceOrder { customer, lines } => {
            office.catalog.load().await?;
            office.customers.load().await?;

            office.orders.start_draft(customer);
            for (product_id, quantity) in lines {
                office
                    .orders
                    .add_line(product_id)
                    .await
                    .with_context(|| format!("Cannot add product {}", product_id))?;
                if quantity > 1 {
                    office
                        .orders
                        .update_line_quantity(product_id, quantity)
                        .await
                        .with_context(|| format!("Cannot set quantity {} for {}", quantity, product_id))?;
                }
            }

            if let Some(draft) = office.orders.draft() {
                tracing::info!(
                    total = %draft.project().total_price_formatted,
                    "Draft ready"
                );
            }

            let order = office.place_order().await?;
            print_json(&order.project())?;
        }

        Commands::Approve { id } => {
            office.orders.load_orders_containing(id).await?;
            let approved = office.orders.approve(id).await?;
            print_json(&approved.project())?;
        }
    }

    Ok(())
}
