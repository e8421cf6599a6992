mod category_helpers;
mod comment_helpers;
mod existence_helpers;
mod query_builder;
mod review_helpers;
mod user_helpers;

pub use category_helpers::*;
pub use comment_helpers::*;
pub use existence_helpers::*;
pub use query_builder::*;
pub use review_helpers::*;
pub use user_helpers::*;
