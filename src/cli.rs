use chrono::{DateTime, NaiveDateTime};
use clap::{Args, Parser, Subcommand};

use vidcat::i18n::Locale;
use vidcat::models::{parse_tags, Filter, ListQuery, NewEntry};

#[derive(Parser)]
#[command(name = "vidcat")]
#[command(about = "Browse a paginated video catalog from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive terminal front-end (default)
    Tui {
        /// Interface language (en, ru, zh, de, tr); defaults to $LANG
        #[arg(long)]
        lang: Option<Locale>,
    },

    /// Print one page of the catalog
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Free-text search
        #[arg(short, long, conflicts_with = "tag")]
        search: Option<String>,

        /// Filter by a single tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Sign in and remember the session
    Login(Credentials),

    /// Create an account and remember the session
    Register(Credentials),

    /// Forget the stored session
    Logout,

    /// Show the stored user
    Whoami,

    /// Add a video (admin only)
    Add {
        #[arg(long)]
        title: String,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,

        /// External link the entry opens
        #[arg(long)]
        url: String,

        #[arg(long)]
        image1: String,

        #[arg(long)]
        image2: String,

        #[arg(long)]
        image3: String,
    },

    /// Delete a video by id (admin only)
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args)]
pub struct Credentials {
    #[arg(short, long)]
    pub username: String,

    #[arg(short, long)]
    pub password: String,
}

impl Commands {
    pub fn list_query(page: u32, search: &Option<String>, tag: &Option<String>) -> ListQuery {
        let filter = match (search, tag) {
            (Some(s), _) if !s.trim().is_empty() => Filter::Search(s.clone()),
            (_, Some(t)) if !t.trim().is_empty() => Filter::Tag(t.trim().to_string()),
            _ => Filter::None,
        };
        ListQuery::new(page.max(1), filter)
    }

    pub fn new_entry(
        title: &str,
        tags: &str,
        url: &str,
        images: [&str; 3],
    ) -> NewEntry {
        NewEntry {
            title: title.trim().to_string(),
            tags: parse_tags(tags),
            external_url: url.trim().to_string(),
            image1_url: images[0].trim().to_string(),
            image2_url: images[1].trim().to_string(),
            image3_url: images[2].trim().to_string(),
        }
    }
}

/// Language from `$LANG`, falling back to English.
pub fn locale_from_env() -> Locale {
    std::env::var("LANG")
        .ok()
        .and_then(|lang| lang.parse().ok())
        .unwrap_or_default()
}

/// Render a server timestamp as a calendar date; unknown formats pass through.
pub fn format_created(created_at: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(created_at) {
        return dt.format("%Y-%m-%d").to_string();
    }
    match NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S%.f"))
    {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => created_at.to_string(),
    }
}
