use std::fmt;

use crate::error::{QueryError, Result};
use crate::sanitize::{is_safe_fragment, parse_aggregate, sanitize_order};

/// Scalar reductions a query may end with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    Count,
    CountColumn(String),
    Sum(String),
    Average(String),
    Minimum(String),
    Maximum(String),
}

impl Aggregate {
    fn render(&self) -> String {
        match self {
            Aggregate::Count => ".count".to_string(),
            Aggregate::CountColumn(col) => format!(".count({})", string_literal(col)),
            Aggregate::Sum(col) => format!(".sum({})", string_literal(col)),
            Aggregate::Average(col) => format!(".average({})", string_literal(col)),
            Aggregate::Minimum(col) => format!(".minimum({})", string_literal(col)),
            Aggregate::Maximum(col) => format!(".maximum({})", string_literal(col)),
        }
    }
}

/// Final clause of a compiled query.
///
/// Ordering and limiting only exist for row listings; a scalar terminal
/// collapses the result set, so there is nothing to order or limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    RowListing {
        order: Option<String>,
        limit: Option<u64>,
    },
    Scalar(Aggregate),
}

/// A validated query: every embedded fragment has passed sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    entity_type: String,
    filter: Option<String>,
    terminal: Terminal,
}

impl CompiledQuery {
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.terminal, Terminal::Scalar(_))
    }

    /// Render the query as a method chain, e.g.
    /// `Post.all.where("title IS NOT NULL").order("created_at DESC").limit(5)`.
    pub fn expression(&self) -> String {
        let mut out = format!("{}.all", self.entity_type);
        if let Some(filter) = &self.filter {
            out.push_str(&format!(".where({})", string_literal(filter)));
        }
        match &self.terminal {
            Terminal::RowListing { order, limit } => {
                if let Some(order) = order {
                    out.push_str(&format!(".order({})", string_literal(order)));
                }
                if let Some(limit) = limit {
                    out.push_str(&format!(".limit({limit})"));
                }
            }
            Terminal::Scalar(aggregate) => out.push_str(&aggregate.render()),
        }
        out
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

/// Compile a query, reporting why a fragment was refused.
///
/// Blank fragments count as absent. When an aggregate statement or
/// `count_only` is given, `order_by` and `limit` are ignored; the aggregate
/// statement wins over `count_only`.
pub fn try_compile(
    entity_type: &str,
    filter_condition: Option<&str>,
    order_by: Option<&str>,
    limit: Option<i64>,
    aggregate_statement: Option<&str>,
    count_only: bool,
) -> Result<CompiledQuery> {
    let filter = match non_blank(filter_condition) {
        Some(filter) if !is_safe_fragment(filter) => return Err(QueryError::UnsafeFilter),
        Some(filter) => Some(filter.to_string()),
        None => None,
    };

    let scalar = match non_blank(aggregate_statement) {
        Some(statement) => {
            if !is_safe_fragment(statement) {
                return Err(QueryError::UnsafeAggregate);
            }
            let aggregate = parse_aggregate(statement)
                .ok_or_else(|| QueryError::UnsupportedAggregate(statement.trim().to_string()))?;
            Some(aggregate)
        }
        None if count_only => Some(Aggregate::Count),
        None => None,
    };

    let terminal = match scalar {
        Some(aggregate) => Terminal::Scalar(aggregate),
        None => Terminal::RowListing {
            order: non_blank(order_by).and_then(sanitize_order),
            limit: limit.map(|n| n.max(0) as u64),
        },
    };

    Ok(CompiledQuery {
        entity_type: entity_type.to_string(),
        filter,
        terminal,
    })
}

/// Compile a query; `None` when a filter or aggregate fragment is refused.
pub fn compile(
    entity_type: &str,
    filter_condition: Option<&str>,
    order_by: Option<&str>,
    limit: Option<i64>,
    aggregate_statement: Option<&str>,
    count_only: bool,
) -> Option<CompiledQuery> {
    try_compile(
        entity_type,
        filter_condition,
        order_by,
        limit,
        aggregate_statement,
        count_only,
    )
    .ok()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Double-quoted literal that cannot be closed early or interpolate.
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '#' => out.push_str("\\#"),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
