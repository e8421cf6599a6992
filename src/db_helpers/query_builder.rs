use sqlx::{query::QueryAs, sqlite::SqliteArguments, Sqlite};

use crate::{
    errors::RequestError,
    validation::{escape_like_pattern, parse_positive_int},
};

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

/// Columns a review listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Owner,
    Title,
    ReviewId,
    ReviewImgUrl,
    Category,
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortColumn {
    /// Unknown or missing column names fall back to `created_at`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("owner") => Self::Owner,
            Some("title") => Self::Title,
            Some("review_id") => Self::ReviewId,
            Some("review_img_url") => Self::ReviewImgUrl,
            Some("category") => Self::Category,
            Some("votes") => Self::Votes,
            Some("comment_count") => Self::CommentCount,
            _ => Self::CreatedAt,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Owner => "reviews.owner",
            Self::Title => "reviews.title",
            Self::ReviewId => "reviews.review_id",
            Self::ReviewImgUrl => "reviews.review_img_url",
            Self::Category => "reviews.category",
            Self::CreatedAt => "reviews.created_at",
            Self::Votes => "reviews.votes",
            Self::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive; anything other than `asc`/`desc` yields `default`.
    pub fn parse(raw: Option<&str>, default: SortOrder) -> Self {
        match raw {
            Some(order) if order.eq_ignore_ascii_case("asc") => Self::Asc,
            Some(order) if order.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => default,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Strict parsing: a present but non-numeric, blank or non-positive
    /// `limit` or `p` is rejected rather than defaulted.
    pub fn from_params(limit: Option<&str>, page: Option<&str>) -> Result<Self, RequestError> {
        let limit = match limit {
            Some(raw) => parse_positive_int(raw).ok_or(RequestError::BadRequest("Bad request"))?,
            None => DEFAULT_LIMIT,
        };
        let page = match page {
            Some(raw) => parse_positive_int(raw).ok_or(RequestError::BadRequest("Bad request"))?,
            None => DEFAULT_PAGE,
        };
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or(RequestError::BadRequest("Bad request"))?;
        Ok(Self { limit, offset })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Int(i64),
}

/// A listing statement, the count statement sharing its predicate, and the
/// values to bind to each.
#[derive(Debug, Clone)]
pub struct ListingPlan {
    pub query: String,
    pub count_query: String,
    pub params: Vec<Param>,
    pub count_params: Vec<Param>,
}

impl ListingPlan {
    pub fn bind_listing<'q, O>(
        &'q self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        bind_params(query, &self.params)
    }

    pub fn bind_count<'q, O>(
        &'q self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        bind_params(query, &self.count_params)
    }
}

fn bind_params<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: &'q [Param],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Param::Text(value) => query.bind(value.as_str()),
            Param::Int(value) => query.bind(*value),
        };
    }
    query
}

/// Builds a paginated listing and its count from fixed SQL fragments.
///
/// Column names and directions only ever come from `&'static str` or the
/// enums above; user input is carried exclusively as bound [`Param`]s.
pub struct QueryBuilder {
    select: &'static str,
    count: &'static str,
    conditions: Vec<String>,
    params: Vec<Param>,
    group_by: Option<&'static str>,
    order_by: Vec<String>,
    pagination: Pagination,
}

impl QueryBuilder {
    pub fn new(select: &'static str, count: &'static str) -> Self {
        Self {
            select,
            count,
            conditions: Vec::new(),
            params: Vec::new(),
            group_by: None,
            order_by: Vec::new(),
            pagination: Pagination::default(),
        }
    }

    /// Case-insensitive literal match on `column`; `None` matches every row.
    pub fn add_pattern_filter(mut self, column: &'static str, value: Option<&str>) -> Self {
        let pattern = match value {
            Some(value) => escape_like_pattern(value).into_owned(),
            None => String::from("%"),
        };
        self.params.push(Param::Text(pattern));
        self.conditions
            .push(format!("{} LIKE ?{} ESCAPE '\\'", column, self.params.len()));
        self
    }

    pub fn add_id_filter(mut self, column: &'static str, id: i64) -> Self {
        self.params.push(Param::Int(id));
        self.conditions
            .push(format!("{} = ?{}", column, self.params.len()));
        self
    }

    pub fn group_by(mut self, column: &'static str) -> Self {
        self.group_by = Some(column);
        self
    }

    pub fn order_by(mut self, column: &'static str, order: SortOrder) -> Self {
        self.order_by
            .push(format!("{} {}", column, order.as_sql()));
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn build(self) -> ListingPlan {
        let predicate = if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        };

        let mut query = format!("{}{}", self.select, predicate);
        if let Some(column) = self.group_by {
            query.push_str(&format!(" GROUP BY {}", column));
        }
        if !self.order_by.is_empty() {
            query.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }
        let limit_index = self.params.len() + 1;
        query.push_str(&format!(
            " LIMIT ?{} OFFSET ?{}",
            limit_index,
            limit_index + 1
        ));

        let count_query = format!("{}{}", self.count, predicate);
        let count_params = self.params.clone();

        let mut params = self.params;
        params.push(Param::Int(self.pagination.limit));
        params.push(Param::Int(self.pagination.offset));

        ListingPlan {
            query,
            count_query,
            params,
            count_params,
        }
    }
}
