use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::Category};

use super::{Pagination, QueryBuilder, SortOrder};

const CATEGORY_QUERY: &str = "SELECT categories.slug, categories.description FROM categories";
const CATEGORY_COUNT_QUERY: &str = "SELECT COUNT(categories.slug) FROM categories";

pub async fn list_categories_in_db(
    pool: &SqlitePool,
    pagination: Pagination,
) -> Result<(Vec<Category>, i64), RequestError> {
    let plan = QueryBuilder::new(CATEGORY_QUERY, CATEGORY_COUNT_QUERY)
        .order_by("categories.slug", SortOrder::Asc)
        .paginate(pagination)
        .build();

    let (categories, (total_count,)) = tokio::try_join!(
        plan.bind_listing(sqlx::query_as::<Sqlite, Category>(&plan.query))
            .fetch_all(pool),
        plan.bind_count(sqlx::query_as::<Sqlite, (i64,)>(&plan.count_query))
            .fetch_one(pool),
    )?;
    Ok((categories, total_count))
}

pub async fn insert_category_in_db(
    pool: &SqlitePool,
    slug: &str,
    description: &str,
) -> Result<Category, RequestError> {
    let mut tx = pool.begin().await?;
    let category = sqlx::query_as::<Sqlite, Category>(
        r#"
        INSERT INTO categories (slug, description)
        VALUES ($1, $2)
        RETURNING slug, description
        "#,
    )
    .bind(slug)
    .bind(description)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(category)
}
