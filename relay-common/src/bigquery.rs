//! BigQuery REST v2 wire format for table metadata and streaming inserts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::Payload;

/// `tableReference` as returned in table metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

/// Table metadata from `tables.get`. Only the fields the relay reads are typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table_reference: TableReference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_rows: Option<String>,
}

/// One row of an `insertAll` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertRow {
    pub json: Payload,
}

/// Body of `tabledata.insertAll`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertAllRequest {
    pub rows: Vec<InsertRow>,
}

impl InsertAllRequest {
    pub fn from_rows(rows: Vec<Payload>) -> Self {
        Self {
            rows: rows.into_iter().map(|json| InsertRow { json }).collect(),
        }
    }
}

/// Error detail attached to a rejected row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorProto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Row-level insert failure, indexed into the submitted rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertError {
    pub index: u32,

    #[serde(default)]
    pub errors: Vec<ErrorProto>,
}

/// Response of `tabledata.insertAll`; `insertErrors` is absent on success
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAllResponse {
    #[serde(default)]
    pub insert_errors: Vec<InsertError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_all_request_wraps_rows() {
        let request = InsertAllRequest::from_rows(vec![json!({"k": "v"})]);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"rows": [{"json": {"k": "v"}}]}));
    }

    #[test]
    fn test_insert_all_response_without_errors() {
        let response: InsertAllResponse =
            serde_json::from_str(r#"{"kind": "bigquery#tableDataInsertAllResponse"}"#).unwrap();
        assert!(response.insert_errors.is_empty());
    }

    #[test]
    fn test_insert_all_response_with_errors() {
        let json = r#"{
            "kind": "bigquery#tableDataInsertAllResponse",
            "insertErrors": [{
                "index": 0,
                "errors": [{
                    "reason": "invalid",
                    "location": "k",
                    "debugInfo": "",
                    "message": "no such field: k."
                }]
            }]
        }"#;

        let response: InsertAllResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.insert_errors.len(), 1);

        let error = &response.insert_errors[0].errors[0];
        assert_eq!(error.reason.as_deref(), Some("invalid"));
        assert_eq!(error.debug_info.as_deref(), Some(""));

        // Re-serializing keeps the provider's field names
        let details = serde_json::to_value(&response.insert_errors).unwrap();
        assert_eq!(details[0]["errors"][0]["debugInfo"], json!(""));
    }

    #[test]
    fn test_table_metadata_deserialization() {
        let json = r#"{
            "kind": "bigquery#table",
            "id": "p:analytics.events",
            "tableReference": {"projectId": "p", "datasetId": "analytics", "tableId": "events"},
            "schema": {"fields": [{"name": "k", "type": "STRING"}]},
            "numRows": "42"
        }"#;

        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.table_reference.table_id, "events");
        assert_eq!(table.num_rows.as_deref(), Some("42"));
        assert!(table.schema.is_some());
    }
}
