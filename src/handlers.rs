use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    db_helpers::{
        add_comment_to_review_in_db, check_review_id, create_review_in_db, delete_comment_in_db,
        delete_review_in_db, ensure_user_exists, get_comments_for_review_in_db,
        get_review_by_id_in_db, get_user_by_username, insert_category_in_db,
        list_categories_in_db, list_reviews_in_db, list_users_in_db, parse_id,
        update_comment_in_db, update_review_in_db, NewReview, Pagination,
    },
    errors::RequestError,
    models::{Category, Comment, Review, User},
    validation::require_field,
    CategoryWrapper, CommentWrapper, CreateCategoryRequest, CreateCommentRequest,
    CreateReviewRequest, EndpointsWrapper, JsonResponse, MultipleCategoriesWrapper,
    MultipleCommentsWrapper, MultipleReviewsWrapper, MultipleUsersWrapper, PaginationParams,
    ReviewQueryParams, ReviewWrapper, UpdateCommentRequest, UpdateReviewRequest, UserWrapper,
};

type JsonResult<T> = Result<Json<T>, RequestError>;
type CreatedResult<T> = Result<JsonResponse<T>, RequestError>;

const ENDPOINTS_DOCUMENT: &str = include_str!("../endpoints.json");

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found() -> RequestError {
    RequestError::InvalidUrl
}

pub async fn method_not_allowed() -> RequestError {
    RequestError::MethodNotAllowed
}

pub async fn get_endpoints() -> JsonResult<EndpointsWrapper> {
    let endpoints = serde_json::from_str(ENDPOINTS_DOCUMENT).map_err(|e| {
        tracing::error!("endpoints document is not valid JSON: {}", e);
        RequestError::ServerError
    })?;
    Ok(Json(EndpointsWrapper { endpoints }))
}

/// `inc_votes` must be present; a value of the wrong type is already
/// rejected while the body is deserialized.
fn require_inc_votes(inc_votes: Option<i64>) -> Result<i64, RequestError> {
    inc_votes.ok_or(RequestError::BadRequest("Bad request: no inc_votes"))
}

fn optional_text(value: Option<String>) -> Result<Option<String>, RequestError> {
    value.map(|text| require_field(Some(text))).transpose()
}

// ----------------- Category Handlers -----------------
pub async fn get_categories(
    Extension(pool): Extension<Arc<SqlitePool>>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> JsonResult<MultipleCategoriesWrapper> {
    let Query(PaginationParams { limit, p }) = params?;
    let pagination = Pagination::from_params(limit.as_deref(), p.as_deref())?;
    let (categories, total_count) = list_categories_in_db(&pool, pagination).await?;
    Ok(Json(MultipleCategoriesWrapper {
        categories,
        total_count,
    }))
}

pub async fn post_category(
    Extension(pool): Extension<Arc<SqlitePool>>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> CreatedResult<CategoryWrapper<Category>> {
    let Json(CreateCategoryRequest { slug, description }) = payload?;
    let slug = require_field(slug)?;
    let description = require_field(description)?;
    let category = insert_category_in_db(&pool, &slug, &description).await?;
    Ok((StatusCode::CREATED, Json(CategoryWrapper { category })))
}

// ----------------- Review Handlers -----------------
pub async fn get_reviews(
    Extension(pool): Extension<Arc<SqlitePool>>,
    params: Result<Query<ReviewQueryParams>, QueryRejection>,
) -> JsonResult<MultipleReviewsWrapper> {
    let Query(params) = params?;
    let (reviews, total_count) = list_reviews_in_db(&pool, params).await?;
    Ok(Json(MultipleReviewsWrapper {
        reviews,
        total_count,
    }))
}

pub async fn post_review(
    Extension(pool): Extension<Arc<SqlitePool>>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> CreatedResult<ReviewWrapper<Review>> {
    let Json(request) = payload?;
    let new_review = NewReview {
        owner: require_field(request.owner)?,
        title: require_field(request.title)?,
        review_body: require_field(request.review_body)?,
        designer: require_field(request.designer)?,
        category: require_field(request.category)?,
        review_img_url: optional_text(request.review_img_url)?,
    };
    // owner and category are checked by the foreign keys on insert
    let review = create_review_in_db(&pool, new_review).await?;
    Ok((StatusCode::CREATED, Json(ReviewWrapper { review })))
}

pub async fn get_review_by_id(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(review_id): Path<String>,
) -> JsonResult<ReviewWrapper<Review>> {
    let review_id = check_review_id(&pool, &review_id).await?;
    match get_review_by_id_in_db(&pool, review_id).await? {
        Some(review) => Ok(Json(ReviewWrapper { review })),
        None => Err(RequestError::NotFound("Id not found")),
    }
}

pub async fn patch_review(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(review_id): Path<String>,
    payload: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> JsonResult<ReviewWrapper<Review>> {
    let review_id = check_review_id(&pool, &review_id).await?;
    let Json(UpdateReviewRequest {
        inc_votes,
        review_body,
    }) = payload?;
    let inc_votes = require_inc_votes(inc_votes)?;
    let review_body = optional_text(review_body)?;

    match update_review_in_db(&pool, review_id, inc_votes, review_body).await? {
        Some(review) => Ok(Json(ReviewWrapper { review })),
        None => Err(RequestError::NotFound("Id not found")),
    }
}

pub async fn delete_review(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(review_id): Path<String>,
) -> Result<StatusCode, RequestError> {
    let review_id = check_review_id(&pool, &review_id).await?;
    if delete_review_in_db(&pool, review_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(RequestError::NotFound("Id not found"))
    }
}

// ----------------- Comment Handlers -----------------
pub async fn get_comments_by_review_id(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(review_id): Path<String>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> JsonResult<MultipleCommentsWrapper> {
    let review_id = check_review_id(&pool, &review_id).await?;
    let Query(PaginationParams { limit, p }) = params?;
    let pagination = Pagination::from_params(limit.as_deref(), p.as_deref())?;
    let (comments, total_count) =
        get_comments_for_review_in_db(&pool, review_id, pagination).await?;
    Ok(Json(MultipleCommentsWrapper {
        comments,
        total_count,
    }))
}

pub async fn post_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(review_id): Path<String>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> CreatedResult<CommentWrapper<Comment>> {
    let Json(CreateCommentRequest { username, body }) = payload?;
    let username = require_field(username)?;
    let body = require_field(body)?;

    let review_id = check_review_id(&pool, &review_id).await?;
    ensure_user_exists(&pool, &username).await?;

    let comment = add_comment_to_review_in_db(&pool, review_id, &username, &body).await?;
    Ok((StatusCode::CREATED, Json(CommentWrapper { comment })))
}

pub async fn patch_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(comment_id): Path<String>,
    payload: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> JsonResult<CommentWrapper<Comment>> {
    let comment_id = parse_id(&comment_id)?;
    let Json(UpdateCommentRequest { inc_votes, body }) = payload?;
    let inc_votes = require_inc_votes(inc_votes)?;
    let body = optional_text(body)?;

    match update_comment_in_db(&pool, comment_id, inc_votes, body).await? {
        Some(comment) => Ok(Json(CommentWrapper { comment })),
        None => Err(RequestError::NotFound("Id not found")),
    }
}

pub async fn delete_comment(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, RequestError> {
    let comment_id = parse_id(&comment_id)?;
    if delete_comment_in_db(&pool, comment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(RequestError::NotFound("Id not found"))
    }
}

// ----------------- User Handlers -----------------
pub async fn get_users(
    Extension(pool): Extension<Arc<SqlitePool>>,
) -> JsonResult<MultipleUsersWrapper> {
    let users = list_users_in_db(&pool).await?;
    Ok(Json(MultipleUsersWrapper { users }))
}

pub async fn get_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(username): Path<String>,
) -> JsonResult<UserWrapper<User>> {
    match get_user_by_username(&pool, &username).await? {
        Some(user) => Ok(Json(UserWrapper::wrap_with_user_data(user))),
        None => Err(RequestError::NotFound("Username not found")),
    }
}
