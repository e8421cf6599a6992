use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::Comment};

use super::{Pagination, QueryBuilder, SortOrder};

const COMMENT_QUERY: &str = r#"
            SELECT comments.comment_id   AS comment_id,
                   comments.author       AS author,
                   comments.review_id    AS review_id,
                   comments.votes        AS votes,
                   comments.created_at   AS created_at,
                   comments.body         AS body
            FROM   comments"#;

const COMMENT_COUNT_QUERY: &str = "SELECT COUNT(comments.comment_id) FROM comments";

pub async fn get_comments_for_review_in_db(
    pool: &SqlitePool,
    review_id: i64,
    pagination: Pagination,
) -> Result<(Vec<Comment>, i64), RequestError> {
    let plan = QueryBuilder::new(COMMENT_QUERY, COMMENT_COUNT_QUERY)
        .add_id_filter("comments.review_id", review_id)
        .order_by("comments.created_at", SortOrder::Asc)
        .order_by("comments.comment_id", SortOrder::Asc)
        .paginate(pagination)
        .build();

    let (comments, (total_count,)) = tokio::try_join!(
        plan.bind_listing(sqlx::query_as::<Sqlite, Comment>(&plan.query))
            .fetch_all(pool),
        plan.bind_count(sqlx::query_as::<Sqlite, (i64,)>(&plan.count_query))
            .fetch_one(pool),
    )?;
    Ok((comments, total_count))
}

pub async fn add_comment_to_review_in_db(
    pool: &SqlitePool,
    review_id: i64,
    author: &str,
    body: &str,
) -> Result<Comment, RequestError> {
    let mut tx = pool.begin().await?;
    let comment = sqlx::query_as::<Sqlite, Comment>(
        r#"
        INSERT INTO comments (review_id, author, body)
        VALUES ($1, $2, $3)
        RETURNING comment_id, author, review_id, votes, created_at, body
        "#,
    )
    .bind(review_id)
    .bind(author)
    .bind(body)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(comment)
}

/// Single-statement vote delta; `None` when the comment does not exist.
/// A delta that would overflow the stored total is a bad request.
pub async fn update_comment_in_db(
    pool: &SqlitePool,
    comment_id: i64,
    inc_votes: i64,
    body: Option<String>,
) -> Result<Option<Comment>, RequestError> {
    let mut tx = pool.begin().await?;
    let comment = sqlx::query_as::<Sqlite, Comment>(
        r#"
        UPDATE comments
        SET    votes = votes + $1,
               body = COALESCE($2, body)
        WHERE  comment_id = $3
               AND typeof(votes + $1) = 'integer'
        RETURNING comment_id, author, review_id, votes, created_at, body
        "#,
    )
    .bind(inc_votes)
    .bind(body)
    .bind(comment_id)
    .fetch_optional(&mut tx)
    .await?;

    if comment.is_none() {
        let (found,) = sqlx::query_as::<Sqlite, (i64,)>(
            "SELECT EXISTS (SELECT 1 FROM comments WHERE comment_id = $1)",
        )
        .bind(comment_id)
        .fetch_one(&mut tx)
        .await?;
        if found != 0 {
            return Err(RequestError::BadRequest("Bad request"));
        }
    }

    tx.commit().await?;
    Ok(comment)
}

pub async fn delete_comment_in_db(pool: &SqlitePool, comment_id: i64) -> Result<bool, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        DELETE FROM comments WHERE comment_id = $1
        "#,
    )
    .bind(comment_id)
    .execute(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}
