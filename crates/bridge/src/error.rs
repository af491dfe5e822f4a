use recordbridge_query::QueryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Failed to start evaluator '{program}' in {working_directory}: {source}")]
    Spawn {
        program: String,
        working_directory: String,
        #[source]
        source: std::io::Error,
    },
}
