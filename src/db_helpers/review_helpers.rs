use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::ReviewQueryParams;
use crate::errors::RequestError;
use crate::models::{Review, ReviewSummary};

use super::{
    ensure_category_exists, ensure_user_exists, Pagination, QueryBuilder, SortColumn, SortOrder,
};

const REVIEW_LISTING_QUERY: &str = r#"
            SELECT reviews.review_id                AS review_id,
                   reviews.owner                    AS owner,
                   reviews.title                    AS title,
                   reviews.review_img_url           AS review_img_url,
                   reviews.category                 AS category,
                   reviews.created_at               AS created_at,
                   reviews.votes                    AS votes,
                   COUNT(comments.comment_id)       AS comment_count
            FROM   reviews
                   LEFT JOIN comments
                          ON comments.review_id = reviews.review_id"#;

const REVIEW_COUNT_QUERY: &str = "SELECT COUNT(reviews.review_id) FROM reviews";

const SINGLE_REVIEW_QUERY: &str = r#"
            SELECT reviews.review_id                AS review_id,
                   reviews.owner                    AS owner,
                   reviews.title                    AS title,
                   reviews.review_body              AS review_body,
                   reviews.designer                 AS designer,
                   reviews.review_img_url           AS review_img_url,
                   reviews.category                 AS category,
                   reviews.created_at               AS created_at,
                   reviews.votes                    AS votes,
                   COUNT(comments.comment_id)       AS comment_count
            FROM   reviews
                   LEFT JOIN comments
                          ON comments.review_id = reviews.review_id
            WHERE  reviews.review_id = $1
            GROUP  BY reviews.review_id
"#;

const INSERT_REVIEW_QUERY: &str = r#"
        INSERT INTO reviews (owner, title, review_body, designer, category)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING review_id, owner, title, review_body, designer, review_img_url,
                  category, created_at, votes, 0 AS comment_count
"#;

const INSERT_REVIEW_WITH_IMG_QUERY: &str = r#"
        INSERT INTO reviews (owner, title, review_body, designer, category, review_img_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING review_id, owner, title, review_body, designer, review_img_url,
                  category, created_at, votes, 0 AS comment_count
"#;

pub struct NewReview {
    pub owner: String,
    pub title: String,
    pub review_body: String,
    pub designer: String,
    pub category: String,
    pub review_img_url: Option<String>,
}

pub async fn list_reviews_in_db(
    pool: &SqlitePool,
    ReviewQueryParams {
        sort_by,
        order,
        category,
        owner,
        limit,
        p,
    }: ReviewQueryParams,
) -> Result<(Vec<ReviewSummary>, i64), RequestError> {
    let pagination = Pagination::from_params(limit.as_deref(), p.as_deref())?;
    if let Some(category) = &category {
        ensure_category_exists(pool, category).await?;
    }
    if let Some(owner) = &owner {
        ensure_user_exists(pool, owner).await?;
    }

    let sort_by = SortColumn::parse(sort_by.as_deref());
    let order = SortOrder::parse(order.as_deref(), SortOrder::Desc);

    let plan = QueryBuilder::new(REVIEW_LISTING_QUERY, REVIEW_COUNT_QUERY)
        .add_pattern_filter("reviews.category", category.as_deref())
        .add_pattern_filter("reviews.owner", owner.as_deref())
        .group_by("reviews.review_id")
        .order_by(sort_by.as_sql(), order)
        .order_by("reviews.review_id", order)
        .paginate(pagination)
        .build();

    let (reviews, (total_count,)) = tokio::try_join!(
        plan.bind_listing(sqlx::query_as::<Sqlite, ReviewSummary>(&plan.query))
            .fetch_all(pool),
        plan.bind_count(sqlx::query_as::<Sqlite, (i64,)>(&plan.count_query))
            .fetch_one(pool),
    )?;
    Ok((reviews, total_count))
}

pub async fn get_review_by_id_in_db(
    pool: &SqlitePool,
    review_id: i64,
) -> Result<Option<Review>, RequestError> {
    let review = sqlx::query_as::<Sqlite, Review>(SINGLE_REVIEW_QUERY)
        .bind(review_id)
        .fetch_optional(pool)
        .await?;
    Ok(review)
}

/// Without an image URL the column default from the schema applies.
pub async fn create_review_in_db(
    pool: &SqlitePool,
    NewReview {
        owner,
        title,
        review_body,
        designer,
        category,
        review_img_url,
    }: NewReview,
) -> Result<Review, RequestError> {
    let mut tx = pool.begin().await?;
    let insert = match review_img_url {
        Some(_) => INSERT_REVIEW_WITH_IMG_QUERY,
        None => INSERT_REVIEW_QUERY,
    };

    // No comment can reference a review that did not exist a moment ago.
    let mut query = sqlx::query_as::<Sqlite, Review>(insert)
        .bind(owner)
        .bind(title)
        .bind(review_body)
        .bind(designer)
        .bind(category);
    if let Some(review_img_url) = review_img_url {
        query = query.bind(review_img_url);
    }
    let review = query.fetch_one(&mut tx).await?;
    tx.commit().await?;

    Ok(review)
}

/// Applies `inc_votes` as a delta in a single statement and optionally
/// replaces the body. Returns `None` when no review has this id, and a bad
/// request when the new total would not fit in a 64-bit integer.
pub async fn update_review_in_db(
    pool: &SqlitePool,
    review_id: i64,
    inc_votes: i64,
    review_body: Option<String>,
) -> Result<Option<Review>, RequestError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE reviews
        SET    votes = votes + $1,
               review_body = COALESCE($2, review_body)
        WHERE  review_id = $3
               AND typeof(votes + $1) = 'integer'
        "#,
    )
    .bind(inc_votes)
    .bind(review_body)
    .bind(review_id)
    .execute(&mut tx)
    .await?;

    if result.rows_affected() == 0 {
        let (found,) = sqlx::query_as::<Sqlite, (i64,)>(
            "SELECT EXISTS (SELECT 1 FROM reviews WHERE review_id = $1)",
        )
        .bind(review_id)
        .fetch_one(&mut tx)
        .await?;
        return if found != 0 {
            Err(RequestError::BadRequest("Bad request"))
        } else {
            Ok(None)
        };
    }

    let review = sqlx::query_as::<Sqlite, Review>(SINGLE_REVIEW_QUERY)
        .bind(review_id)
        .fetch_optional(&mut tx)
        .await?;
    tx.commit().await?;

    Ok(review)
}

pub async fn delete_review_in_db(pool: &SqlitePool, review_id: i64) -> Result<bool, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        DELETE FROM reviews WHERE review_id = $1
        "#,
    )
    .bind(review_id)
    .execute(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}
