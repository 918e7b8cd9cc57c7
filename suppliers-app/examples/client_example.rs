//! Client example walking through the supplier flows against a local server.
//!
//! Run with: cargo run -p suppliers-app --example client_example

use std::net::SocketAddr;
use std::sync::Arc;

use suppliers_client::SuppliersClient;
use suppliers_hex::outbound::FixedRateProvider;
use suppliers_hex::{SupplierService, inbound::HttpServer};
use suppliers_repo::{CsvMirror, build_repo};
use suppliers_types::{CreateSupplierRequest, SellRate, UpdateSupplierRequest};
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    // Use a temp file-backed SQLite DB and mirror
    let tmp = tempdir()?;
    let db_url = format!("sqlite://{}?mode=rwc", tmp.path().join("proveedores.db").display());
    let mirror_path = tmp.path().join("proveedores_actualizados.csv");

    println!("Starting server on {addr}...");
    println!("   Database: {db_url}");
    println!("   Mirror:   {}", mirror_path.display());

    let repo = build_repo(&db_url).await?;
    let service = SupplierService::new(
        repo,
        Arc::new(FixedRateProvider::new(SellRate::new(1000.0)?)),
        Arc::new(CsvMirror::new(&mirror_path)),
    );
    service.export_mirror().await?;
    let router = HttpServer::new(service).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("server error: {e}");
        }
    });

    let client = SuppliersClient::new(format!("http://{addr}"));

    println!("Server health: {}", client.health().await?);

    let acme = client
        .create_supplier(&CreateSupplierRequest {
            name: Some("Acme".into()),
            code: Some("AC1".into()),
            email: Some("a@x.com".into()),
            debt_local: Some(1000.0),
        })
        .await?;
    println!(
        "Created {} (id={}): {} local = {:?} foreign",
        acme.name, acme.id, acme.debt_local, acme.debt_foreign
    );

    let beta = client
        .create_supplier(&CreateSupplierRequest {
            name: Some("Beta Insumos".into()),
            code: Some("BT2".into()),
            email: Some("b@x.com".into()),
            debt_local: Some(250_000.0),
        })
        .await?;
    println!("Created {} (id={})", beta.name, beta.id);

    // Duplicate code is rejected
    let dup = client
        .create_supplier(&CreateSupplierRequest {
            name: Some("Impostor".into()),
            code: Some("AC1".into()),
            email: Some("i@x.com".into()),
            debt_local: Some(1.0),
        })
        .await;
    println!("Duplicate code rejected: {}", dup.is_err());

    let acme = client
        .update_supplier(
            acme.id,
            &UpdateSupplierRequest {
                debt_local: Some(4500.0),
                ..Default::default()
            },
        )
        .await?;
    println!("Updated debt: {:?} foreign", acme.debt_foreign);

    let found = client.search_suppliers(Some("ac"), None).await?;
    println!("Search 'ac': {} match(es)", found.len());

    client.delete_supplier(beta.id).await?;
    let page = client.list_suppliers(Some(1), Some(10)).await?;
    println!("Suppliers left: {} ({} page(s))", page.total, page.pages);

    println!("\nMirror contents:");
    print!("{}", std::fs::read_to_string(&mirror_path)?);

    Ok(())
}
