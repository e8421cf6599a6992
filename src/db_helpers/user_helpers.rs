use sqlx::{Sqlite, SqlitePool};

use crate::{
    errors::RequestError,
    models::{User, Username},
};

pub async fn list_users_in_db(pool: &SqlitePool) -> Result<Vec<Username>, RequestError> {
    let users = sqlx::query_as::<Sqlite, Username>("SELECT username FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;
    Ok(users)
}

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, RequestError> {
    let user = sqlx::query_as::<Sqlite, User>(
        r#"
        SELECT username, name, avatar_url FROM users WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}
