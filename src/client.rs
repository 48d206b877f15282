use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::common::network::{DEFAULT_TIMEOUT_SECS, api_base, api_error, default_client};
use crate::diff::{FileSet, UpdatePayload};
use crate::error::GistError;
use crate::ident::normalize_gist_id;

const MAX_PER_PAGE: u32 = 100;

/// One file as the API returns it. Listings omit `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistFile {
    pub filename: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub truncated: bool,
}

/// The full remote state of a gist as of one fetch. Never cached; every
/// update decision re-fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistSnapshot {
    pub id: String,
    pub html_url: String,
    pub description: Option<String>,
    pub public: bool,
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
}

impl GistSnapshot {
    /// Flatten to filename -> content for the reconciler.
    pub fn file_contents(&self) -> FileSet {
        self.files
            .values()
            .map(|f| (f.filename.clone(), f.content.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct DeleteOutcome {
    pub id: String,
    pub error: Option<GistError>,
}

#[derive(Debug, Default)]
pub struct BatchDeleteReport {
    pub outcomes: Vec<DeleteOutcome>,
}

impl BatchDeleteReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.error.is_none())
    }

    pub fn deleted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.deleted()
    }
}

/// Blocking client for the gist endpoints. One HTTP exchange per call, no
/// retries, no state between calls.
pub struct GistClient {
    http: Client,
    token: String,
    base_url: String,
}

impl GistClient {
    pub fn new(token: String) -> Result<Self, GistError> {
        Ok(Self {
            http: default_client(DEFAULT_TIMEOUT_SECS)?,
            token,
            base_url: api_base(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
    }

    fn decode<T: serde::de::DeserializeOwned>(
        id: Option<&str>,
        resp: Response,
    ) -> Result<T, GistError> {
        let status = resp.status();
        if status.is_success() {
            return resp.json::<T>().map_err(GistError::Network);
        }
        let body = resp.text().unwrap_or_default();
        Err(api_error(id, status, &body))
    }

    pub fn create(
        &self,
        files: &FileSet,
        description: &str,
        public: bool,
    ) -> Result<GistSnapshot, GistError> {
        if files.is_empty() {
            return Err(GistError::EmptyFileSet);
        }
        let gist_files: BTreeMap<&str, serde_json::Value> = files
            .iter()
            .map(|(name, content)| (name.as_str(), json!({ "content": content })))
            .collect();
        let resp = self
            .request(Method::POST, "/gists")
            .json(&json!({
                "description": description,
                "public": public,
                "files": gist_files,
            }))
            .send()?;
        Self::decode(None, resp)
    }

    pub fn fetch(&self, raw_id: &str) -> Result<GistSnapshot, GistError> {
        let id = normalize_gist_id(raw_id)?;
        let resp = self.request(Method::GET, &format!("/gists/{id}")).send()?;
        Self::decode(Some(&id), resp)
    }

    pub fn update(&self, raw_id: &str, payload: &UpdatePayload) -> Result<GistSnapshot, GistError> {
        let id = normalize_gist_id(raw_id)?;
        if payload.is_empty() {
            return Err(GistError::NoOpUpdate);
        }
        let resp = self
            .request(Method::PATCH, &format!("/gists/{id}"))
            .json(payload)
            .send()?;
        Self::decode(Some(&id), resp)
    }

    /// Delete one gist. Identifier problems surface before any network
    /// call. Returns the normalized id.
    pub fn delete(&self, raw_id: &str) -> Result<String, GistError> {
        let id = normalize_gist_id(raw_id)?;
        let resp = self
            .request(Method::DELETE, &format!("/gists/{id}"))
            .send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(id);
        }
        let body = resp.text().unwrap_or_default();
        Err(api_error(Some(&id), status, &body))
    }

    /// Delete several gists sequentially, continuing past failures. The
    /// batch as a whole succeeds only if every delete did.
    pub fn delete_batch(&self, raw_ids: &[String]) -> BatchDeleteReport {
        let mut report = BatchDeleteReport::default();
        for raw_id in raw_ids {
            match self.delete(raw_id) {
                Ok(id) => report.outcomes.push(DeleteOutcome { id, error: None }),
                Err(err) => report.outcomes.push(DeleteOutcome {
                    id: raw_id.clone(),
                    error: Some(err),
                }),
            }
        }
        report
    }

    /// One page of the caller's gists, newest first. File contents are not
    /// included in listings.
    pub fn list(&self, query: &ListQuery) -> Result<Vec<GistSnapshot>, GistError> {
        let mut req = self.request(Method::GET, "/gists");
        if let Some(per_page) = query.per_page {
            req = req.query(&[("per_page", clamp_per_page(per_page))]);
        }
        if let Some(page) = query.page {
            req = req.query(&[("page", page)]);
        }
        if let Some(since) = query.since {
            req = req.query(&[("since", since.to_rfc3339())]);
        }
        let resp = req.send()?;
        Self::decode(None, resp)
    }
}

fn clamp_per_page(requested: u32) -> u32 {
    requested.clamp(1, MAX_PER_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn offline_client() -> GistClient {
        GistClient::new("ghp_test_token_1234567890abcdef".to_string()).unwrap()
    }

    #[test]
    fn create_rejects_an_empty_file_set_before_any_network_call() {
        let client = offline_client();
        assert!(matches!(
            client.create(&FileSet::new(), "desc", false),
            Err(GistError::EmptyFileSet)
        ));
    }

    #[test]
    fn update_rejects_an_empty_payload_before_any_network_call() {
        let client = offline_client();
        assert!(matches!(
            client.update("aa5a315d61ae9438b18d", &UpdatePayload::default()),
            Err(GistError::NoOpUpdate)
        ));
    }

    #[test]
    fn delete_short_circuits_on_a_bad_identifier() {
        let client = offline_client();
        assert!(matches!(
            client.delete("nope"),
            Err(GistError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            client.delete("https://example.com/x/aa5a315d61ae9438b18d"),
            Err(GistError::UnresolvableIdentifier(_))
        ));
    }

    #[test]
    fn batch_delete_collects_per_id_failures_without_aborting() {
        let client = offline_client();
        let report =
            client.delete_batch(&["bad".to_string(), "also bad".to_string()]);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.deleted(), 0);
        assert_eq!(report.failed(), 2);
        assert!(!report.all_succeeded());
        assert!(report.outcomes.iter().all(|o| o.error.is_some()));
    }

    #[test]
    fn per_page_is_clamped_to_the_api_maximum() {
        assert_eq!(clamp_per_page(0), 1);
        assert_eq!(clamp_per_page(30), 30);
        assert_eq!(clamp_per_page(100), 100);
        assert_eq!(clamp_per_page(500), 100);
    }

    #[test]
    fn snapshot_flattens_to_filename_content_pairs() {
        let snapshot: GistSnapshot = serde_json::from_value(serde_json::json!({
            "id": "aa5a315d61ae9438b18d",
            "html_url": "https://gist.github.com/aa5a315d61ae9438b18d",
            "description": "test",
            "public": false,
            "files": {
                "main.py": { "filename": "main.py", "content": "print('hi')" },
                "README.md": { "filename": "README.md", "content": "# hi" },
            }
        }))
        .unwrap();
        let contents = snapshot.file_contents();
        assert_eq!(contents["main.py"], "print('hi')");
        assert_eq!(contents["README.md"], "# hi");
    }

    #[test]
    fn listing_entries_tolerate_missing_content() {
        let snapshot: GistSnapshot = serde_json::from_value(serde_json::json!({
            "id": "aa5a315d61ae9438b18d",
            "html_url": "https://gist.github.com/aa5a315d61ae9438b18d",
            "description": null,
            "public": true,
            "files": {
                "main.py": { "filename": "main.py", "size": 12 },
            }
        }))
        .unwrap();
        assert_eq!(snapshot.files["main.py"].content, "");
        assert_eq!(snapshot.files["main.py"].size, 12);
    }
}
