//! Bookshelf configuration parsing.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bookshelf_common_types::{Author, Book};
use bookshelf_store::Dataset;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlConfig {
    /// The port on which the GraphQL API server should listen.
    #[serde(default = "Config::default_graphql_api_port")]
    pub port: u16,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            port: Config::default_graphql_api_port(),
        }
    }
}

/// Where the initial catalog comes from.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DatasetSource {
    /// The demo catalog bundled with Bookshelf.
    #[default]
    Builtin,
    /// Start with no authors and no books.
    Empty,
    /// Authors and books listed directly in the configuration file.
    Inline {
        #[serde(default)]
        authors: Vec<Author>,
        #[serde(default)]
        books: Vec<Book>,
    },
    /// A separate YAML file with `authors` and `books` lists.
    File { path: PathBuf },
}

impl DatasetSource {
    pub fn load(&self) -> anyhow::Result<Dataset> {
        let dataset = match self {
            DatasetSource::Builtin => Dataset::builtin(),
            DatasetSource::Empty => Dataset::default(),
            DatasetSource::Inline { authors, books } => Dataset {
                authors: authors.clone(),
                books: books.clone(),
            },
            DatasetSource::File { path } => Dataset::read(path)?,
        };

        info!(
            authors = dataset.authors.len(),
            books = dataset.books.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }
}

/// A [`serde`]-compatible representation of Bookshelf's YAML configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// GraphQL API configuration.
    #[serde(default)]
    pub graphql: GraphQlConfig,
    /// The port on which the Prometheus exporter should listen. Set it to 0
    /// to disable the exporter entirely.
    #[serde(default = "Config::default_prometheus_port")]
    pub prometheus_port: u16,
    /// The catalog the store is seeded with at startup.
    #[serde(default)]
    pub dataset: DatasetSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql: GraphQlConfig::default(),
            prometheus_port: Config::default_prometheus_port(),
            dataset: DatasetSource::default(),
        }
    }
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        serde_yaml::from_reader(file).context("invalid config file")
    }

    fn default_prometheus_port() -> u16 {
        9184
    }

    fn default_graphql_api_port() -> u16 {
        5000
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.graphql.port, 5000);
        assert_eq!(config.prometheus_port, 9184);
        assert!(matches!(config.dataset, DatasetSource::Builtin));
    }

    #[test]
    fn default_config_matches_empty_document() {
        let config = Config::default();
        assert_eq!(config.graphql.port, 5000);
        assert_eq!(config.prometheus_port, 9184);
        assert!(matches!(config.dataset, DatasetSource::Builtin));
    }

    #[test]
    fn inline_dataset() {
        let yaml = r#"
graphql:
  port: 8080
prometheusPort: 0
dataset:
  type: inline
  authors:
    - id: 1
      name: A
  books:
    - id: 1
      name: B1
      authorId: 1
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.graphql.port, 8080);
        assert_eq!(config.prometheus_port, 0);

        let dataset = config.dataset.load().unwrap();
        assert_eq!(dataset.authors.len(), 1);
        assert_eq!(dataset.books[0].author_id, 1);
    }

    #[test]
    fn empty_and_builtin_datasets() {
        assert_eq!(DatasetSource::Empty.load().unwrap(), Dataset::default());
        assert_eq!(DatasetSource::Builtin.load().unwrap(), Dataset::builtin());
    }

    #[test]
    fn read_config_and_dataset_files() {
        let mut dataset_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(dataset_file, "authors:\n  - id: 9\n    name: Z\n").unwrap();

        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            config_file,
            "dataset:\n  type: file\n  path: {}\n",
            dataset_file.path().display()
        )
        .unwrap();

        let config = Config::read(config_file.path()).unwrap();
        let dataset = config.dataset.load().unwrap();
        assert_eq!(dataset.authors[0].id, 9);
        assert!(dataset.books.is_empty());
    }

    #[test]
    fn invalid_config_is_reported() {
        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(config_file, "graphql: [not, a, map]").unwrap();

        let err = Config::read(config_file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }
}
