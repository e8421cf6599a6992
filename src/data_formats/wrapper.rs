use serde::{Deserialize, Serialize};

use crate::models::{Category, Comment, ReviewSummary, Username};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserWrapper<T> {
    pub user: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CategoryWrapper<T> {
    pub category: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReviewWrapper<T> {
    pub review: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentWrapper<T> {
    pub comment: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleCategoriesWrapper {
    pub categories: Vec<Category>,
    pub total_count: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleReviewsWrapper {
    pub reviews: Vec<ReviewSummary>,
    pub total_count: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleCommentsWrapper {
    pub comments: Vec<Comment>,
    pub total_count: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleUsersWrapper {
    pub users: Vec<Username>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EndpointsWrapper {
    pub endpoints: serde_json::Value,
}

impl<T> UserWrapper<T> {
    pub fn wrap_with_user_data(user: T) -> UserWrapper<T> {
        UserWrapper { user }
    }
}
