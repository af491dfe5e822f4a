use recordbridge_query::QueryRequest;
use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SelectRecordsRequest {
    /// Collection to read from (snake_case, plural)
    #[schemars(
        description = "Model name to fetch records for (e.g., 'users', 'blog_posts'). Use snake_case, plural form."
    )]
    pub model_name: Option<String>,

    /// WHERE fragment
    #[schemars(
        description = "WHERE condition to filter records (e.g., 'content IS NOT NULL', \"status = 'published'\")"
    )]
    pub filter_condition: Option<String>,

    /// ORDER BY fragment
    #[schemars(description = "ORDER BY clause (e.g., 'created_at DESC', 'name ASC')")]
    pub order_by: Option<String>,

    /// Row cap; ignored for counts and aggregates
    #[schemars(description = "Maximum number of records to return (e.g., 5, 10). 0 returns no rows.")]
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<i64>,

    /// Scalar reduction instead of rows
    #[schemars(
        description = "Aggregate to compute instead of listing rows: count, count(col), sum(col), average(col), minimum(col), maximum(col)"
    )]
    pub aggregate_statement: Option<String>,

    #[schemars(
        description = "Return only the number of matching records (e.g., true for 'show the size of posts')"
    )]
    pub count_only: Option<bool>,
}

impl From<SelectRecordsRequest> for QueryRequest {
    fn from(request: SelectRecordsRequest) -> Self {
        QueryRequest {
            entity_collection_name: request.model_name,
            filter_condition: request.filter_condition,
            order_by: request.order_by,
            limit: request.limit,
            aggregate_statement: request.aggregate_statement,
            count_only: request.count_only,
        }
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DescribeTableRequest {
    #[schemars(
        description = "Table name to describe (e.g., 'users', 'products'). Use snake_case, plural form."
    )]
    pub table_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DescribeModelRequest {
    #[schemars(
        description = "Model to describe, as a class name or table name (e.g., 'User', 'BlogPost', 'blog_posts')"
    )]
    pub model_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListModelsRequest {
    /// Ask the running application instead of scanning files
    #[schemars(
        description = "Load the application and include each model's table name, columns and associations (slower: boots the application)"
    )]
    pub include_schema: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ListModelsResult {
    /// Directory that was scanned
    pub models_dir: String,
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelEntry {
    /// Entity type name, e.g. `BlogPost`
    pub name: String,
    /// Source file relative to the models directory
    pub file: String,
}

/// Accept integers, floats and numeric strings; anything unparseable is 0.
fn lenient_limit<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::Null => None,
        serde_json::Value::Number(n) => Some(
            n.as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
        ),
        serde_json::Value::String(s) => Some(leading_integer(&s)),
        _ => Some(0),
    }))
}

fn leading_integer(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SelectRecordsRequest {
        serde_json::from_value(value).expect("valid request")
    }

    #[test]
    fn limit_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(json!({ "limit": 5 })).limit, Some(5));
        assert_eq!(parse(json!({ "limit": 2.9 })).limit, Some(2));
        assert_eq!(parse(json!({ "limit": "12 rows" })).limit, Some(12));
        assert_eq!(parse(json!({ "limit": "-3" })).limit, Some(-3));
        assert_eq!(parse(json!({ "limit": "many" })).limit, Some(0));
        assert_eq!(parse(json!({ "limit": null })).limit, None);
        assert_eq!(parse(json!({})).limit, None);
    }

    #[test]
    fn request_maps_onto_query_request() {
        let request = parse(json!({
            "model_name": "posts",
            "filter_condition": "title IS NOT NULL",
            "count_only": true
        }));
        let query: QueryRequest = request.into();
        assert_eq!(query.entity_collection_name.as_deref(), Some("posts"));
        assert_eq!(query.filter_condition.as_deref(), Some("title IS NOT NULL"));
        assert_eq!(query.count_only, Some(true));
        assert_eq!(query.compile().unwrap().expression(), r#"Post.all.where("title IS NOT NULL").count"#);
    }

    #[test]
    fn missing_model_name_still_deserializes() {
        let request = parse(json!({ "limit": 1 }));
        assert_eq!(request.model_name, None);
    }

    #[test]
    fn list_models_defaults_to_file_scan() {
        let request: ListModelsRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.include_schema, None);
        let request: ListModelsRequest =
            serde_json::from_value(json!({ "include_schema": true })).unwrap();
        assert_eq!(request.include_schema, Some(true));
    }
}
