use serde::{Deserialize, Serialize};

/// Body substituted for a successful DELETE that returned nothing.
pub(crate) const EMPTY_OBJECT_SENTINEL: &str = "{}";

/// The empty JSON object. Decodes from the DELETE sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyObject {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorDetails {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub follower_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub created_at: String,
    #[serde(default)]
    pub author_details: Option<AuthorDetails>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub author_info: Option<AuthorInfo>,
}

/// Flattened post row returned by the raw SQL and ORM listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRaw {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub version_title: Option<String>,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub social_links: serde_json::Value,
}
