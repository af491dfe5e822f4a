use crate::classify::{classify, is_valid_collection_name};
use crate::compiler::{try_compile, CompiledQuery};
use crate::error::{QueryError, Result};

/// Structured record request as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    /// Plural snake_case collection, e.g. `"blog_posts"`.
    pub entity_collection_name: Option<String>,
    pub filter_condition: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<i64>,
    pub aggregate_statement: Option<String>,
    pub count_only: Option<bool>,
}

impl QueryRequest {
    pub fn for_collection(name: impl Into<String>) -> Self {
        Self {
            entity_collection_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Resolve the entity type, rejecting missing or malformed collection names.
    pub fn entity_type(&self) -> Result<String> {
        resolve_entity_type(self.entity_collection_name.as_deref())
    }

    pub fn compile(&self) -> Result<CompiledQuery> {
        let entity_type = self.entity_type()?;
        try_compile(
            &entity_type,
            self.filter_condition.as_deref(),
            self.order_by.as_deref(),
            self.limit,
            self.aggregate_statement.as_deref(),
            self.count_only.unwrap_or(false),
        )
    }
}

/// Validate a caller-supplied collection name and classify it.
pub fn resolve_entity_type(collection_name: Option<&str>) -> Result<String> {
    resolve(
        collection_name,
        QueryError::MissingModelName,
        QueryError::InvalidModelName,
    )
}

/// Same as [`resolve_entity_type`], reporting problems in terms of a table.
pub fn resolve_table_entity_type(table_name: Option<&str>) -> Result<String> {
    resolve(
        table_name,
        QueryError::MissingTableName,
        QueryError::InvalidTableName,
    )
}

fn resolve(
    name: Option<&str>,
    missing: QueryError,
    invalid: fn(String) -> QueryError,
) -> Result<String> {
    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(missing)?;
    if !is_valid_collection_name(name) {
        return Err(invalid(name.to_string()));
    }
    Ok(classify(name))
}
