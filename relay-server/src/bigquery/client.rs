//! BigQuery REST client - table metadata and streaming inserts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use relay_common::{InsertAllRequest, InsertAllResponse, InsertError, Payload, Table, TableRef, TableReference};

use super::TableStore;
use crate::error::GcpError;
use crate::gcp::{self, AccessTokens};

const BIGQUERY_ENDPOINT: &str = "https://bigquery.googleapis.com/bigquery/v2";
const BIGQUERY_SCOPE: &str = "https://www.googleapis.com/auth/bigquery";

/// Client for the tables and tabledata endpoints
#[derive(Clone)]
pub struct BigQueryClient {
    http: reqwest::Client,
    tokens: Arc<dyn AccessTokens>,
    endpoint: String,
}

impl BigQueryClient {
    /// Create a client against the public BigQuery endpoint
    pub fn new(http: reqwest::Client, tokens: Arc<dyn AccessTokens>) -> Self {
        info!("BigQuery client targeting {}", BIGQUERY_ENDPOINT);
        Self {
            http,
            tokens,
            endpoint: BIGQUERY_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn table_url(&self, project: &str, dataset: &str, table: &str) -> String {
        format!(
            "{}/projects/{}/datasets/{}/tables/{}",
            self.endpoint, project, dataset, table
        )
    }
}

#[async_trait]
impl TableStore for BigQueryClient {
    async fn get_table(&self, table: &TableRef) -> Result<Table, GcpError> {
        let token = self.tokens.access_token(BIGQUERY_SCOPE).await?;
        let url = self.table_url(&table.project, &table.dataset, &table.table);

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let metadata: Table = gcp::read_json(response).await?;

        debug!("Fetched metadata for table {}", table);
        Ok(metadata)
    }

    async fn insert_rows_json(&self, table: &Table, rows: Vec<Payload>) -> Result<Vec<InsertError>, GcpError> {
        let token = self.tokens.access_token(BIGQUERY_SCOPE).await?;
        let TableReference {
            project_id,
            dataset_id,
            table_id,
        } = &table.table_reference;
        let url = format!("{}/insertAll", self.table_url(project_id, dataset_id, table_id));

        let total = rows.len();
        let request = InsertAllRequest::from_rows(rows);

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        let response: InsertAllResponse = gcp::read_json(response).await?;

        if response.insert_errors.is_empty() {
            debug!("Inserted {} rows into {}.{}.{}", total, project_id, dataset_id, table_id);
        } else {
            warn!(
                "{}/{} rows rejected by {}.{}.{}",
                response.insert_errors.len(),
                total,
                project_id,
                dataset_id,
                table_id
            );
        }

        Ok(response.insert_errors)
    }
}
