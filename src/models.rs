use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Username {
    pub username: String,
}

/// A full review, as returned when a single review is addressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub review_id: i64,
    pub owner: String,
    pub title: String,
    pub review_body: String,
    pub designer: String,
    pub review_img_url: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub comment_count: i64,
}

/// A review row in a listing; the body and designer are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewSummary {
    pub review_id: i64,
    pub owner: String,
    pub title: String,
    pub review_img_url: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub comment_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i64,
    pub author: String,
    pub review_id: i64,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub body: String,
}
