//! Clients for the two remote services
//!
//! The auth service issues sessions; the catalog service lists, filters,
//! creates and deletes entries. Both speak JSON over HTTP. The traits here
//! are the seam the controller is written against, so it can run over fakes.

pub mod types;
pub mod auth;
pub mod catalog;

pub use types::*;
pub use auth::AuthClient;
pub use catalog::CatalogClient;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{AuthOutcome, CatalogPage, ListQuery, MutationResult, NewEntry};

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Expected failures (bad credentials) come back as `AuthOutcome::Failure`;
    /// only transport problems are errors.
    async fn login(&self, username: &str, password: &str) -> Result<AuthOutcome>;

    async fn register(&self, username: &str, password: &str) -> Result<AuthOutcome>;
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<CatalogPage>;

    /// Transport failures degrade to a failed `MutationResult`.
    async fn create(&self, entry: &NewEntry, is_admin: bool) -> Result<MutationResult>;

    async fn delete(&self, id: i64, is_admin: bool) -> Result<MutationResult>;
}

pub(crate) fn http_client(user_agent: &str) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(user_agent).build()?)
}
