use serde::{Deserialize, Serialize};

// ----------------- Category Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateCategoryRequest {
    pub slug: Option<String>,
    pub description: Option<String>,
}

// ----------------- Review Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateReviewRequest {
    pub owner: Option<String>,
    pub title: Option<String>,
    pub review_body: Option<String>,
    pub designer: Option<String>,
    pub category: Option<String>,
    pub review_img_url: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct UpdateReviewRequest {
    pub inc_votes: Option<i64>,
    pub review_body: Option<String>,
}

// ----------------- Comment Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub username: Option<String>,
    pub body: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct UpdateCommentRequest {
    pub inc_votes: Option<i64>,
    pub body: Option<String>,
}
