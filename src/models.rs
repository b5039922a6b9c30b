use serde::{Deserialize, Serialize};

/// Identity issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

/// A logged-in client: the user plus the opaque token the auth service issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub external_url: String,
    pub image1_url: String,
    pub image2_url: String,
    pub image3_url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub position: i64,
}

impl CatalogEntry {
    pub fn images(&self) -> [&str; 3] {
        [&self.image1_url, &self.image2_url, &self.image3_url]
    }
}

/// One page of listing results, replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(rename = "videos", default)]
    pub entries: Vec<CatalogEntry>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl CatalogPage {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
            page: 1,
            per_page: 0,
            total_pages: 1,
        }
    }

    /// The service reports zero pages for an empty result set; the client always has at least one.
    pub fn normalized(mut self) -> Self {
        if self.total_pages == 0 {
            self.total_pages = 1;
        }
        if self.page == 0 {
            self.page = 1;
        }
        self
    }
}

impl Default for CatalogPage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Payload for adding an entry through the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub tags: Vec<String>,
    pub external_url: String,
    pub image1_url: String,
    pub image2_url: String,
    pub image3_url: String,
}

impl NewEntry {
    /// Names the first required field left blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("title", &self.title),
            ("external_url", &self.external_url),
            ("image1_url", &self.image1_url),
            ("image2_url", &self.image2_url),
            ("image3_url", &self.image3_url),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Active listing constraint. Search text and tag are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    None,
    Search(String),
    Tag(String),
}

impl Filter {
    pub fn search_text(&self) -> Option<&str> {
        match self {
            Filter::Search(text) => Some(text),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Filter::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

/// Parameters of a single listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub filter: Filter,
}

impl ListQuery {
    pub fn new(page: u32, filter: Filter) -> Self {
        Self { page, filter }
    }

    pub fn first_page() -> Self {
        Self::new(1, Filter::None)
    }
}

/// Outcome of a login or registration attempt that reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success { user: User, token: String },
    Failure(String),
}

/// Result shape shared by create and delete.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(error.into()),
        }
    }
}

/// Split comma-separated tag input, trimming and dropping blanks.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
