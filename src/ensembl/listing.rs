use log::{debug, info};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use super::{is_safe_file_name, validate_database_name};
use crate::error::EnsemblError;

static HREF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href\s*=\s*"([^"]+)""#).expect("href pattern compiles"));

/// Database directory name to the files it contains, sorted by database.
pub type Listing = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Entries of an HTML directory index, in page order.
///
/// Sort links, absolute links, parent links and external URLs are skipped.
pub fn parse_index(html: &str) -> Vec<IndexEntry> {
    let mut entries: Vec<IndexEntry> = Vec::new();
    for caps in HREF_PATTERN.captures_iter(html) {
        let Some(target) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if target.starts_with(['?', '/', '#']) || target.starts_with("..") || target.contains("://") {
            continue;
        }

        let (name, is_dir) = match target.strip_suffix('/') {
            Some(dir) => (dir, true),
            None => (target, false),
        };
        if !is_safe_file_name(name) || entries.iter().any(|e| e.name == name) {
            continue;
        }
        entries.push(IndexEntry {
            name: name.to_string(),
            is_dir,
        });
    }
    entries
}

/// Selects release directories by name.
#[derive(Debug, Clone)]
pub struct DatabaseFilter {
    patterns: Vec<Regex>,
}

impl DatabaseFilter {
    pub fn new(patterns: &[String]) -> Result<Self, EnsemblError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| EnsemblError::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }
}

/// HTTP access to the release tree.
pub struct IndexClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl IndexClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, EnsemblError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn directory_url(&self, database: &str) -> String {
        format!("{}/{}/", self.base_url, database)
    }

    pub fn file_url(&self, database: &str, file: &str) -> String {
        format!("{}/{}/{}", self.base_url, database, file)
    }

    pub(crate) fn get(&self, url: &str) -> Result<reqwest::blocking::Response, EnsemblError> {
        let resp = self.client.get(url).send()?;
        if !resp.status().is_success() {
            return Err(EnsemblError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }
        Ok(resp)
    }

    fn fetch_index(&self, url: &str) -> Result<Vec<IndexEntry>, EnsemblError> {
        debug!("Fetching index {}", url);
        let html = self.get(url)?.text()?;
        Ok(parse_index(&html))
    }

    /// Matching database directories and the files inside each.
    pub fn list_databases(&self, filter: &DatabaseFilter) -> Result<Listing, EnsemblError> {
        let root = self.fetch_index(&format!("{}/", self.base_url))?;
        let mut listing = Listing::new();

        for entry in root.into_iter().filter(|e| e.is_dir && filter.matches(&e.name)) {
            let database = validate_database_name(&entry.name)?.to_string();
            info!("{}", database);
            let files = self
                .fetch_index(&self.directory_url(&database))?
                .into_iter()
                .filter(|e| !e.is_dir)
                .map(|e| e.name)
                .collect();
            listing.insert(database, files);
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROOT_INDEX: &str = r#"<html><body><h1>Index of /pub/current_mysql</h1>
<pre><a href="?C=N;O=D">Name</a> <a href="?C=M;O=A">Last modified</a>
<a href="/pub/">Parent Directory</a>
<a href="ailuropoda_melanoleuca_core_112_1/">ailuropoda_melanoleuca_core_112_1/</a>
<a href="ensembl_compara_112/">ensembl_compara_112/</a>
<a href="ensembl_ontology_112/">ensembl_ontology_112/</a>
<a href="homo_sapiens_variation_112_38/">homo_sapiens_variation_112_38/</a>
<a href="https://www.ensembl.org/">Ensembl</a>
<a href="README">README</a>
</pre></body></html>"#;

    fn default_filter() -> DatabaseFilter {
        DatabaseFilter::new(&crate::config::EnsemblConfig::default().database_patterns).unwrap()
    }

    #[test]
    fn parses_apache_index() {
        let entries = parse_index(ROOT_INDEX);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ailuropoda_melanoleuca_core_112_1",
                "ensembl_compara_112",
                "ensembl_ontology_112",
                "homo_sapiens_variation_112_38",
                "README",
            ]
        );
        assert!(entries[0].is_dir);
        assert!(!entries[4].is_dir);
    }

    #[test]
    fn default_patterns_select_core_and_shared_databases() {
        let filter = default_filter();
        let selected: Vec<_> = parse_index(ROOT_INDEX)
            .into_iter()
            .filter(|e| e.is_dir && filter.matches(&e.name))
            .map(|e| e.name)
            .collect();
        assert_eq!(
            selected,
            vec![
                "ailuropoda_melanoleuca_core_112_1",
                "ensembl_compara_112",
                "ensembl_ontology_112",
            ]
        );
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = DatabaseFilter::new(&["(".to_string()]).unwrap_err();
        assert!(matches!(err, EnsemblError::Pattern { .. }));
    }

    #[test]
    fn builds_urls_without_double_slashes() {
        let client = IndexClient::new("https://example.org/pub/current_mysql/", 5).unwrap();
        assert_eq!(client.base_url(), "https://example.org/pub/current_mysql");
        assert_eq!(
            client.file_url("ensembl_compara_112", "CHECKSUMS"),
            "https://example.org/pub/current_mysql/ensembl_compara_112/CHECKSUMS"
        );
        assert_eq!(
            client.directory_url("ensembl_compara_112"),
            "https://example.org/pub/current_mysql/ensembl_compara_112/"
        );
    }
}
