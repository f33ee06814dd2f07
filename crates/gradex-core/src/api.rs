//! REST client for the grading-system backend.
//!
//! Wraps the subject endpoints exposed under `/api/subjects`. All calls are
//! plain request/response JSON; failures carry the HTTP status and a snippet
//! of the response body in the error chain.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use gradex_types::Subject;

/// Connect timeout for backend requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Max response-body characters carried into an error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the subject endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given backend base URL.
    ///
    /// # Errors
    /// Returns an error if the base URL doesn't parse or the HTTP client
    /// can't be constructed.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .with_context(|| format!("invalid backend base URL '{base_url}'"))?;
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/subjects", self.base_url)
    }

    fn entity_url(&self, id: i64) -> String {
        format!("{}/api/subjects/{id}", self.base_url)
    }

    /// Fetches the complete subject collection. Takes no filter parameters.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
        let url = self.collection_url();
        tracing::debug!(%url, "fetching subject list");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("request subject list")?;
        let response = check_status(response).await?;
        response.json().await.context("decode subject list")
    }

    /// Fetches a single subject by id.
    pub async fn get_subject(&self, id: i64) -> Result<Subject> {
        let url = self.entity_url(id);
        tracing::debug!(%url, "fetching subject");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request subject {id}"))?;
        let response = check_status(response).await?;
        response.json().await.context("decode subject")
    }

    /// Creates a new subject. The record must not carry an id yet.
    pub async fn create_subject(&self, subject: &Subject) -> Result<Subject> {
        if subject.id.is_some() {
            bail!("a new subject cannot already have an id");
        }
        let url = self.collection_url();
        tracing::debug!(%url, "creating subject");
        let response = self
            .http
            .post(&url)
            .json(subject)
            .send()
            .await
            .context("create subject")?;
        let response = check_status(response).await?;
        response.json().await.context("decode created subject")
    }

    /// Updates an existing subject in full.
    pub async fn update_subject(&self, subject: &Subject) -> Result<Subject> {
        let Some(id) = subject.id else {
            bail!("cannot update a subject without an id");
        };
        let url = self.entity_url(id);
        tracing::debug!(%url, "updating subject");
        let response = self
            .http
            .put(&url)
            .json(subject)
            .send()
            .await
            .with_context(|| format!("update subject {id}"))?;
        let response = check_status(response).await?;
        response.json().await.context("decode updated subject")
    }

    /// Saves a subject: create when unsaved, full update otherwise.
    pub async fn save_subject(&self, subject: &Subject) -> Result<Subject> {
        if subject.is_persisted() {
            self.update_subject(subject).await
        } else {
            self.create_subject(subject).await
        }
    }

    /// Deletes a subject by id.
    pub async fn delete_subject(&self, id: i64) -> Result<()> {
        let url = self.entity_url(id);
        tracing::debug!(%url, "deleting subject");
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("delete subject {id}"))?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turns non-2xx responses into errors carrying status and body snippet.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    if snippet.is_empty() {
        bail!("backend returned {status}");
    }
    bail!("backend returned {status}: {snippet}")
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_list_subjects_decodes_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/subjects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Math", "code": "MAT"},
                {"id": 2, "name": null, "code": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let subjects = client.list_subjects().await.unwrap();

        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].id, Some(1));
        assert_eq!(subjects[0].name.as_deref(), Some("Math"));
        assert_eq!(subjects[1].name, None);
    }

    #[tokio::test]
    async fn test_list_subjects_surfaces_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/subjects"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let error = client.list_subjects().await.unwrap_err();
        let message = format!("{error:#}");
        assert!(message.contains("500"), "unexpected error: {message}");
        assert!(message.contains("boom"), "unexpected error: {message}");
    }

    #[tokio::test]
    async fn test_create_posts_to_collection() {
        let server = MockServer::start().await;
        let new_subject = Subject::new("Math", "MAT");
        Mock::given(method("POST"))
            .and(path("/api/subjects"))
            .and(body_json(&new_subject))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                serde_json::json!({"id": 7, "name": "Math", "code": "MAT"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let created = client.save_subject(&new_subject).await.unwrap();
        assert_eq!(created.id, Some(7));
    }

    #[tokio::test]
    async fn test_create_rejects_record_with_id() {
        let client = ApiClient::new("http://localhost:1").unwrap();
        let subject = Subject {
            id: Some(1),
            ..Subject::new("Math", "MAT")
        };
        // Fails before any request is made
        assert!(client.create_subject(&subject).await.is_err());
    }

    #[tokio::test]
    async fn test_update_puts_to_entity_path() {
        let server = MockServer::start().await;
        let subject = Subject {
            id: Some(3),
            name: Some("History".to_string()),
            code: None,
        };
        Mock::given(method("PUT"))
            .and(path("/api/subjects/3"))
            .and(body_json(&subject))
            .respond_with(ResponseTemplate::new(200).set_body_json(&subject))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let updated = client.save_subject(&subject).await.unwrap();
        assert_eq!(updated, subject);
    }

    #[tokio::test]
    async fn test_delete_hits_entity_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/subjects/9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        client.delete_subject(9).await.unwrap();
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }
}
