//! Resource names for Pub/Sub topics and BigQuery tables.

use std::fmt;

use thiserror::Error;

/// Malformed or missing resource configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("invalid table identifier '{0}', expected [project.]dataset.table")]
    InvalidTable(String),

    #[error("invalid topic '{0}'")]
    InvalidTopic(String),
}

/// Fully qualified topic name, `projects/{project}/topics/{topic}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPath(String);

impl TopicPath {
    /// Build the topic path from a project id and a configured topic.
    ///
    /// Only the last `/` segment of `topic` is used, so a bare name and a
    /// full `projects/.../topics/name` value resolve to the same path under
    /// `project`.
    pub fn new(project: &str, topic: &str) -> Result<Self, ConfigError> {
        if project.is_empty() {
            return Err(ConfigError::Missing("project id"));
        }
        let name = topic.rsplit('/').next().unwrap_or_default();
        if name.is_empty() {
            return Err(ConfigError::InvalidTopic(topic.to_string()));
        }

        Ok(Self(format!("projects/{}/topics/{}", project, name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A BigQuery table reference parsed from a configured identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

impl TableRef {
    /// Parse `project.dataset.table`, `project:dataset.table` or
    /// `dataset.table`. The last form takes its project from
    /// `default_project`.
    pub fn parse(identifier: &str, default_project: Option<&str>) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidTable(identifier.to_string());

        let mut parts = identifier.rsplitn(3, '.');
        let table = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let middle = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;

        let (project, dataset) = match parts.next() {
            Some(project) => (project.to_string(), middle),
            None => match middle.rsplit_once(':') {
                Some((project, dataset)) => (project.to_string(), dataset),
                None => {
                    let project = default_project
                        .filter(|p| !p.is_empty())
                        .ok_or(ConfigError::Missing("project id"))?;
                    (project.to_string(), middle)
                }
            },
        };

        if project.is_empty() || dataset.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            project,
            dataset: dataset.to_string(),
            table: table.to_string(),
        })
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}
