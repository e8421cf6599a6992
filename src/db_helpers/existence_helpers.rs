use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, validation::parse_positive_int};

async fn exists(pool: &SqlitePool, query: &str, key: &str) -> Result<bool, RequestError> {
    let (found,) = sqlx::query_as::<Sqlite, (i64,)>(query)
        .bind(key)
        .fetch_one(pool)
        .await?;
    Ok(found != 0)
}

/// Category slugs are compared case-insensitively, matching how the
/// `category` listing filter behaves.
pub async fn category_exists(pool: &SqlitePool, slug: &str) -> Result<bool, RequestError> {
    exists(
        pool,
        "SELECT EXISTS (SELECT 1 FROM categories WHERE slug = ?1 COLLATE NOCASE)",
        slug,
    )
    .await
}

pub async fn user_exists(pool: &SqlitePool, username: &str) -> Result<bool, RequestError> {
    exists(
        pool,
        "SELECT EXISTS (SELECT 1 FROM users WHERE username = ?1)",
        username,
    )
    .await
}

pub async fn review_exists(pool: &SqlitePool, review_id: i64) -> Result<bool, RequestError> {
    let (found,) = sqlx::query_as::<Sqlite, (i64,)>(
        "SELECT EXISTS (SELECT 1 FROM reviews WHERE review_id = ?1)",
    )
    .bind(review_id)
    .fetch_one(pool)
    .await?;
    Ok(found != 0)
}

pub async fn ensure_category_exists(pool: &SqlitePool, slug: &str) -> Result<(), RequestError> {
    if category_exists(pool, slug).await? {
        Ok(())
    } else {
        Err(RequestError::NotFound("Category not found"))
    }
}

pub async fn ensure_user_exists(pool: &SqlitePool, username: &str) -> Result<(), RequestError> {
    if user_exists(pool, username).await? {
        Ok(())
    } else {
        Err(RequestError::NotFound("Username not found"))
    }
}

/// Malformed ids are a bad request, well-formed ids of missing reviews are
/// not found; otherwise the parsed id is returned.
pub async fn check_review_id(pool: &SqlitePool, raw: &str) -> Result<i64, RequestError> {
    let review_id = parse_id(raw)?;
    if review_exists(pool, review_id).await? {
        Ok(review_id)
    } else {
        Err(RequestError::NotFound("Id not found"))
    }
}

pub fn parse_id(raw: &str) -> Result<i64, RequestError> {
    parse_positive_int(raw).ok_or(RequestError::BadRequest("Bad request"))
}
