//! Analytical table storage.

pub mod client;

use async_trait::async_trait;

use relay_common::{InsertError, Payload, Table, TableRef};

use crate::error::GcpError;

pub use client::BigQueryClient;

/// Table store supporting metadata lookup and JSON row inserts
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetch table metadata; fails if the table does not exist
    async fn get_table(&self, table: &TableRef) -> Result<Table, GcpError>;

    /// Insert `rows` as JSON. Returns the per-row errors the store reported,
    /// empty when every row was accepted.
    async fn insert_rows_json(&self, table: &Table, rows: Vec<Payload>) -> Result<Vec<InsertError>, GcpError>;
}
