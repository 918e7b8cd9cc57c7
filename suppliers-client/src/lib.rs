//! # Suppliers Client SDK
//!
//! A typed Rust client for the Suppliers API.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use suppliers_types::{
    CreateSupplierRequest, ListParams, SearchParams, Supplier, SupplierId, SupplierPage,
    UpdateSupplierRequest,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Suppliers API client.
pub struct SuppliersClient {
    base_url: String,
    http: Client,
}

impl SuppliersClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists one page of suppliers.
    pub async fn list_suppliers(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<SupplierPage, ClientError> {
        let params = ListParams { page, per_page };
        self.send(self.http.get(self.url("/proveedores")).query(&params))
            .await
    }

    /// Gets a supplier by ID.
    pub async fn get_supplier(&self, id: SupplierId) -> Result<Supplier, ClientError> {
        self.send(self.http.get(self.url(&format!("/proveedores/{}", id))))
            .await
    }

    /// Creates a supplier.
    pub async fn create_supplier(
        &self,
        req: &CreateSupplierRequest,
    ) -> Result<Supplier, ClientError> {
        self.send(self.http.post(self.url("/proveedores")).json(req))
            .await
    }

    /// Partially updates a supplier.
    pub async fn update_supplier(
        &self,
        id: SupplierId,
        req: &UpdateSupplierRequest,
    ) -> Result<Supplier, ClientError> {
        self.send(
            self.http
                .put(self.url(&format!("/proveedores/{}", id)))
                .json(req),
        )
        .await
    }

    /// Deletes a supplier.
    pub async fn delete_supplier(&self, id: SupplierId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/proveedores/{}", id)))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(api_error(resp).await)
        }
    }

    /// Searches suppliers by name and/or code.
    pub async fn search_suppliers(
        &self,
        name: Option<&str>,
        code: Option<&str>,
    ) -> Result<Vec<Supplier>, ClientError> {
        let params = SearchParams {
            nombre: name.map(String::from),
            codigo: code.map(String::from),
        };
        self.send(self.http.get(self.url("/proveedores/search")).query(&params))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(resp).await)
        }
    }
}

/// Turns a non-success response into `ClientError::Api`, preferring the
/// `error` field of the JSON body.
async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
