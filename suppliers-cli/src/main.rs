//! Suppliers CLI
//!
//! Command-line interface for the Suppliers API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use suppliers_client::SuppliersClient;
use suppliers_types::{CreateSupplierRequest, SupplierId, UpdateSupplierRequest};

#[derive(Parser)]
#[command(name = "suppliers")]
#[command(author, version, about = "Supplier ledger API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Suppliers API
    #[arg(
        long,
        env = "SUPPLIERS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// List suppliers, one page at a time
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Get supplier details
    Get {
        /// Supplier ID
        id: String,
    },
    /// Create a supplier
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        email: String,
        /// Debt in local currency
        #[arg(long)]
        debt: f64,
    },
    /// Update some fields of a supplier
    Update {
        /// Supplier ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// New debt in local currency
        #[arg(long)]
        debt: Option<f64>,
    },
    /// Delete a supplier
    Delete {
        /// Supplier ID
        id: String,
    },
    /// Search suppliers by name and/or code
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },
}

fn parse_supplier_id(s: &str) -> Result<SupplierId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid supplier ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = SuppliersClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::List { page, per_page } => {
            let page = client.list_suppliers(page, per_page).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }

        Commands::Get { id } => {
            let supplier = client.get_supplier(parse_supplier_id(&id)?).await?;
            println!("{}", serde_json::to_string_pretty(&supplier)?);
        }

        Commands::Create {
            name,
            code,
            email,
            debt,
        } => {
            let req = CreateSupplierRequest {
                name: Some(name),
                code: Some(code),
                email: Some(email),
                debt_local: Some(debt),
            };
            let supplier = client.create_supplier(&req).await?;
            println!("{}", serde_json::to_string_pretty(&supplier)?);
        }

        Commands::Update {
            id,
            name,
            code,
            email,
            debt,
        } => {
            let req = UpdateSupplierRequest {
                name,
                code,
                email,
                debt_local: debt,
            };
            let supplier = client
                .update_supplier(parse_supplier_id(&id)?, &req)
                .await?;
            println!("{}", serde_json::to_string_pretty(&supplier)?);
        }

        Commands::Delete { id } => {
            client.delete_supplier(parse_supplier_id(&id)?).await?;
            println!("✓ Supplier deleted");
        }

        Commands::Search { name, code } => {
            let found = client
                .search_suppliers(name.as_deref(), code.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_some_fields() {
        let cli = Cli::try_parse_from(["suppliers", "update", "3", "--debt", "4500"]).unwrap();
        match cli.command {
            Commands::Update { id, debt, name, .. } => {
                assert_eq!(id, "3");
                assert_eq!(debt, Some(4500.0));
                assert!(name.is_none());
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn test_parse_supplier_id() {
        assert_eq!(parse_supplier_id("12").unwrap(), SupplierId::new(12));
        assert!(parse_supplier_id("x").is_err());
    }
}
