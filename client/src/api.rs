//! Typed helpers for the backend's users and blog routes.

use crate::{http::Client, Post, PostRaw, Result, User, UserList};

/// The blog listing variants the backend exposes under `/blog/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostListing {
    All,
    Raw,
    Orm,
    SelectRelated,
    PrefetchRelated,
}

impl PostListing {
    pub fn endpoint(&self) -> &'static str {
        match self {
            PostListing::All => "/blog/all/",
            PostListing::Raw => "/blog/all_raw/",
            PostListing::Orm => "/blog/all_orm/",
            PostListing::SelectRelated => "/blog/all_select_related/",
            PostListing::PrefetchRelated => "/blog/all_prefetch_related/",
        }
    }
}

/// Listings that return flattened [`PostRaw`] rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPostListing {
    Raw,
    Orm,
}

impl From<RawPostListing> for PostListing {
    fn from(listing: RawPostListing) -> Self {
        match listing {
            RawPostListing::Raw => PostListing::Raw,
            RawPostListing::Orm => PostListing::Orm,
        }
    }
}

impl Client {
    pub async fn list_users(&self) -> Result<UserList> {
        self.get::<UserList>("/users/").await
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User> {
        let endpoint = format!("/users/{}/", user_id);
        self.get::<User>(&endpoint).await
    }

    /// Posts with nested author data, as served by `/blog/all/`.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.get::<Vec<Post>>(PostListing::All.endpoint()).await
    }

    /// Flattened rows from the raw SQL or ORM listing.
    pub async fn list_posts_raw(&self, listing: RawPostListing) -> Result<Vec<PostRaw>> {
        let listing = PostListing::from(listing);
        self.get::<Vec<PostRaw>>(listing.endpoint()).await
    }

    /// Any listing, undecoded.
    pub async fn list_posts_json(&self, listing: PostListing) -> Result<Vec<serde_json::Value>> {
        self.get::<Vec<serde_json::Value>>(listing.endpoint()).await
    }

    pub async fn blog_aggregation(&self) -> Result<serde_json::Value> {
        self.get::<serde_json::Value>("/blog/aggregation/").await
    }

    pub async fn blog_annotation(&self) -> Result<serde_json::Value> {
        self.get::<serde_json::Value>("/blog/annotation/").await
    }
}
