use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Model name is required")]
    MissingModelName,

    #[error("Invalid model name '{0}': expected snake_case letters, digits and underscores (e.g. 'blog_posts')")]
    InvalidModelName(String),

    #[error("Table name is required")]
    MissingTableName,

    #[error("Invalid table name '{0}': expected snake_case letters, digits and underscores (e.g. 'blog_posts')")]
    InvalidTableName(String),

    #[error("Filter condition rejected: it contains a disallowed SQL construct")]
    UnsafeFilter,

    #[error("Aggregate statement rejected: it contains a disallowed SQL construct")]
    UnsafeAggregate,

    #[error("Unsupported aggregate statement '{0}' (expected count, count(col), sum(col), average(col), minimum(col) or maximum(col))")]
    UnsupportedAggregate(String),
}
