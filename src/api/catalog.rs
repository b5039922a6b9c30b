//! Catalog service client

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};

use super::{http_client, CatalogApi, Endpoints, ErrorResponse};
use crate::errors::{ClientError, Result, NETWORK_ERROR};
use crate::models::{CatalogPage, ListQuery, MutationResult, NewEntry};

pub struct CatalogClient {
    client: Client,
    url: String,
}

impl CatalogClient {
    pub fn new(url: impl Into<String>, user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: http_client(user_agent)?,
            url: url.into(),
        })
    }

    /// Query parameters for a listing; blank search or tag values are left out entirely.
    pub fn query_params(query: &ListQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", query.page.max(1).to_string())];
        if let Some(search) = query.filter.search_text().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(tag) = query.filter.tag().filter(|t| !t.is_empty()) {
            params.push(("tag", tag.to_string()));
        }
        params
    }

    /// Send a mutation once; anything short of a decodable body becomes a failed result.
    async fn send_mutation(&self, request: RequestBuilder, is_admin: bool) -> MutationResult {
        let response = match request
            .header(Endpoints::ADMIN_HEADER, if is_admin { "true" } else { "false" })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Catalog mutation failed to send: {}", e);
                return MutationResult::failed(NETWORK_ERROR);
            }
        };

        let status = response.status();
        match response.json::<MutationResult>().await {
            Ok(result) => {
                debug!("Catalog mutation answered {} (success={})", status, result.success);
                result
            }
            Err(e) => {
                warn!("Catalog mutation response (status {}) was unreadable: {}", status, e);
                MutationResult::failed(NETWORK_ERROR)
            }
        }
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list(&self, query: &ListQuery) -> Result<CatalogPage> {
        let params = Self::query_params(query);
        debug!("Listing catalog with {:?}", params);

        let response = self.client.get(&self.url).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ClientError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        let page: CatalogPage = serde_json::from_str(&body)?;
        Ok(page.normalized())
    }

    async fn create(&self, entry: &NewEntry, is_admin: bool) -> Result<MutationResult> {
        if entry.missing_field().is_some() {
            return Err(ClientError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }

        let request = self.client.post(&self.url).json(entry);
        Ok(self.send_mutation(request, is_admin).await)
    }

    async fn delete(&self, id: i64, is_admin: bool) -> Result<MutationResult> {
        let request = self.client.delete(&self.url).query(&[("id", id)]);
        Ok(self.send_mutation(request, is_admin).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Filter;
    use mockito::Matcher;

    fn new_entry() -> NewEntry {
        NewEntry {
            title: "Sunset timelapse".to_string(),
            tags: vec!["nature".to_string(), "timelapse".to_string()],
            external_url: "https://videos.example/sunset".to_string(),
            image1_url: "https://img.example/1.jpg".to_string(),
            image2_url: "https://img.example/2.jpg".to_string(),
            image3_url: "https://img.example/3.jpg".to_string(),
        }
    }

    #[test]
    fn test_query_params_omit_absent_filters() {
        let params = CatalogClient::query_params(&ListQuery::new(3, Filter::None));
        assert_eq!(params, vec![("page", "3".to_string())]);

        let params = CatalogClient::query_params(&ListQuery::new(1, Filter::Tag("cats".to_string())));
        assert_eq!(params, vec![("page", "1".to_string()), ("tag", "cats".to_string())]);

        let params = CatalogClient::query_params(&ListQuery::new(1, Filter::Search(String::new())));
        assert_eq!(params, vec![("page", "1".to_string())]);
    }

    #[tokio::test]
    async fn test_list_decodes_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("search".into(), "sunset".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"videos": [{"id": 1, "title": "Sunset timelapse", "tags": ["nature"],
                    "external_url": "https://videos.example/sunset",
                    "image1_url": "1.jpg", "image2_url": "2.jpg", "image3_url": "3.jpg",
                    "created_at": "2024-05-01 10:00:00", "position": 4}],
                    "total": 13, "page": 2, "per_page": 12, "total_pages": 2}"#,
            )
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), "test").unwrap();
        let page = client
            .list(&ListQuery::new(2, Filter::Search("sunset".to_string())))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].images(), ["1.jpg", "2.jpg", "3.jpg"]);
    }

    #[tokio::test]
    async fn test_list_with_no_matches_reports_one_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_body(r#"{"videos": [], "total": 0, "page": 1, "per_page": 12, "total_pages": 0}"#)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), "test").unwrap();
        let page = client
            .list(&ListQuery::new(1, Filter::Search("cats".to_string())))
            .await
            .unwrap();
        assert!(page.entries.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_server_error_is_transport_class() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": "boom"}"#)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), "test").unwrap();
        let err = client.list(&ListQuery::first_page()).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status_code: 500, .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_create_sends_admin_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("x-is-admin", "true")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "title": "Sunset timelapse",
                "tags": ["nature", "timelapse"]
            })))
            .with_body(r#"{"success": true, "id": 42}"#)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), "test").unwrap();
        let result = client.create(&new_entry(), true).await.unwrap();

        mock.assert_async().await;
        assert!(result.success);
        assert_eq!(result.id, Some(42));
    }

    #[tokio::test]
    async fn test_create_missing_image_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/").expect(0).create_async().await;

        let mut entry = new_entry();
        entry.image2_url.clear();

        let client = CatalogClient::new(server.url(), "test").unwrap();
        let err = client.create(&entry, true).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_forbidden_create_carries_server_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_header("x-is-admin", "false")
            .with_status(403)
            .with_body(r#"{"error": "Admin access required"}"#)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), "test").unwrap();
        let result = client.create(&new_entry(), false).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Admin access required"));
    }

    #[tokio::test]
    async fn test_delete_passes_id_and_degrades_on_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/")
            .match_query(Matcher::UrlEncoded("id".into(), "9".into()))
            .match_header("x-is-admin", "true")
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), "test").unwrap();
        assert!(client.delete(9, true).await.unwrap().success);
        mock.assert_async().await;

        let offline = CatalogClient::new("http://127.0.0.1:1", "test").unwrap();
        let result = offline.delete(9, true).await.unwrap();
        assert_eq!(result, MutationResult::failed(NETWORK_ERROR));
    }
}
