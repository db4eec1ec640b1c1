//! CLI command handlers
//!
//! Bridges clap argument parsing with the inventory service. Every handler
//! is a thin wrapper: validate/convert input, call the service, print the
//! result. Decisions live in the service, not here.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use tabled::{Table, Tabled};

use stockroom_core::{Money, NewProduct, Product, SalesReportRow};
use stockroom_db::{InventoryService, ServiceError};

// =============================================================================
// Authentication
// =============================================================================

/// Prompts for credentials and opens the operator session.
///
/// Invalid credentials exit with an error; retry by re-running. There is no
/// lockout.
pub async fn authenticate(
    service: &mut InventoryService,
    username: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    match service.login(username.trim(), &password).await {
        Ok(session) => {
            println!("Logged in as {} ({})", session.username, session.role);
            Ok(())
        }
        Err(ServiceError::InvalidCredentials) => bail!("Invalid credentials"),
        Err(err) => Err(err.into()),
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a new category
    Add {
        /// Category name (unique)
        name: String,
    },
    /// List all categories
    List,
}

pub async fn handle_category_command(
    service: &InventoryService,
    cmd: CategoryCommands,
) -> Result<()> {
    match cmd {
        CategoryCommands::Add { name } => match service.add_category(&name).await {
            Ok(category) => {
                println!("Category '{}' created", category.name);
                Ok(())
            }
            Err(err) if err.is_duplicate() => bail!("Category '{name}' already exists"),
            Err(err) => Err(err.into()),
        },
        CategoryCommands::List => {
            let categories = service.database().categories().list().await?;
            if categories.is_empty() {
                println!("No categories");
            } else {
                for category in categories {
                    println!("{}", category.name);
                }
            }
            Ok(())
        }
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Add a new product
    Add {
        /// Product name (unique)
        name: String,
        /// Initial stock quantity
        #[arg(short, long, default_value = "0")]
        quantity: i64,
        /// Unit price, e.g. 5.99
        #[arg(short, long)]
        price: String,
        /// Category name (must already exist)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List all products with stock and price
    List,
}

#[derive(Tabled)]
struct ProductLine {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Stock")]
    quantity: i64,
    #[tabled(rename = "Price")]
    price: Money,
    #[tabled(rename = "Category")]
    category: String,
}

pub async fn handle_product_command(
    service: &InventoryService,
    cmd: ProductCommands,
) -> Result<()> {
    match cmd {
        ProductCommands::Add {
            name,
            quantity,
            price,
            category,
        } => {
            let price = Money::parse(&price)?;

            let category_id = match category {
                None => None,
                Some(category_name) => {
                    let category = service
                        .database()
                        .categories()
                        .get_by_name(&category_name)
                        .await?
                        .ok_or_else(|| anyhow!("Unknown category '{category_name}'"))?;
                    Some(category.id)
                }
            };

            let new = NewProduct {
                name: name.clone(),
                quantity,
                price_cents: price.cents(),
                category_id,
            };
            match service.add_product(new).await {
                Ok(product) => {
                    println!(
                        "Product '{}' created ({} in stock at {})",
                        product.name,
                        product.quantity,
                        product.price()
                    );
                    Ok(())
                }
                Err(err) if err.is_duplicate() => bail!("Product '{name}' already exists"),
                Err(err) => Err(err.into()),
            }
        }
        ProductCommands::List => {
            let products = service.database().products().list().await?;
            if products.is_empty() {
                println!("No products");
                return Ok(());
            }

            let mut lines = Vec::with_capacity(products.len());
            for product in &products {
                lines.push(ProductLine {
                    name: product.name.clone(),
                    quantity: product.quantity,
                    price: product.price(),
                    category: category_name(service, product).await?,
                });
            }
            println!("{}", Table::new(lines));
            Ok(())
        }
    }
}

async fn category_name(service: &InventoryService, product: &Product) -> Result<String> {
    Ok(match &product.category_id {
        None => "-".to_string(),
        Some(id) => service
            .database()
            .categories()
            .get_by_id(id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| "-".to_string()),
    })
}

// =============================================================================
// Sales
// =============================================================================

pub async fn handle_sell(service: &InventoryService, product: &str, quantity: i64) -> Result<()> {
    let found = service
        .database()
        .products()
        .get_by_name(product)
        .await?
        .ok_or_else(|| anyhow!("Unknown product '{product}'"))?;

    let sale = service.register_sale(&found.id, quantity).await?;
    println!(
        "Sold {} x {} at {} (total {})",
        sale.quantity,
        found.name,
        sale.unit_price(),
        sale.total()
    );
    Ok(())
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Tabled)]
struct ReportLine {
    #[tabled(rename = "Date")]
    sold_at: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Qty")]
    quantity: i64,
    #[tabled(rename = "Unit price")]
    unit_price: Money,
}

impl From<&SalesReportRow> for ReportLine {
    fn from(row: &SalesReportRow) -> Self {
        ReportLine {
            sold_at: row.sold_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            product: row.product_name.clone(),
            quantity: row.quantity,
            unit_price: row.unit_price(),
        }
    }
}

pub async fn handle_report(
    service: &InventoryService,
    from: &str,
    to: &str,
    xlsx: Option<&Path>,
    pdf: Option<&Path>,
) -> Result<()> {
    let start = parse_date(from)?
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc();
    let end = parse_date(to)?
        .and_hms_opt(23, 59, 59)
        .expect("end of day is always valid")
        .and_utc();
    if end < start {
        bail!("Report range is empty: {to} is before {from}");
    }

    let rows = service.sales_report(start, end).await?;

    if rows.is_empty() {
        println!("No sales between {from} and {to}");
    } else {
        let lines: Vec<ReportLine> = rows.iter().map(ReportLine::from).collect();
        println!("{}", Table::new(lines));
    }

    if let Some(path) = xlsx {
        stockroom_export::write_xlsx(&rows, path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Spreadsheet written to {}", path.display());
    }
    if let Some(path) = pdf {
        stockroom_export::write_pdf(&rows, path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("PDF written to {}", path.display());
    }
    Ok(())
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{input}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-08-28").is_ok());
        assert!(parse_date(" 2026-08-28 ").is_ok());
        assert!(parse_date("28/08/2026").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_report_line_from_row() {
        let row = SalesReportRow {
            sold_at: DateTime::parse_from_rfc3339("2026-08-01T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            product_name: "Widget".to_string(),
            quantity: 3,
            unit_price_cents: 500,
        };
        let line = ReportLine::from(&row);
        assert_eq!(line.sold_at, "2026-08-01 10:30:00");
        assert_eq!(line.unit_price.to_string(), "5.00");
    }
}
