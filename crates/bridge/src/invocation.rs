use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use recordbridge_query::CompiledQuery;

use crate::environment::ExecutionEnvironment;

/// Loads the target application before the query runs.
pub const ENVIRONMENT_PRELUDE: &str = "require './config/environment'";

/// Program text for a compiled query.
///
/// Row listings are printed with `.inspect`; scalar terminals print the value
/// itself.
pub fn query_script(query: &CompiledQuery) -> String {
    if query.is_scalar() {
        format!("{ENVIRONMENT_PRELUDE}; puts {}", query.expression())
    } else {
        format!("{ENVIRONMENT_PRELUDE}; puts {}.inspect", query.expression())
    }
}

/// Program text that prints the column metadata of `entity_type`.
pub fn describe_script(entity_type: &str) -> String {
    format!(
        "{ENVIRONMENT_PRELUDE}; puts {entity_type}.columns.map {{ |c| {{ name: c.name, type: c.type.to_s, sql_type: c.sql_type, null: c.null, default: c.default, limit: c.limit, precision: c.precision, scale: c.scale }} }}.inspect"
    )
}

/// Program text that prints a model's key, columns, associations and validators.
pub fn describe_model_script(entity_type: &str) -> String {
    format!(
        "{ENVIRONMENT_PRELUDE}; m = {entity_type}; puts({{ name: m.name, table_name: m.table_name, primary_key: m.primary_key, columns: m.columns.map {{ |c| {{ name: c.name, type: c.type.to_s, sql_type: c.sql_type, null: c.null, default: c.default }} }}, associations: m.reflect_on_all_associations.map {{ |a| {{ name: a.name, type: a.class.name.demodulize, class_name: a.class_name, foreign_key: a.foreign_key }} }}, validations: m.validators.map {{ |v| {{ type: v.class.name.demodulize, attributes: v.attributes, options: v.options.except(:class) }} }} }}.inspect)"
    )
}

/// Program text that eager-loads the application and prints every model
/// with its table, column names and associations.
pub fn model_catalog_script() -> String {
    format!(
        "{ENVIRONMENT_PRELUDE}; Rails.application.eager_load!; puts ApplicationRecord.descendants.sort_by(&:name).map {{ |m| {{ name: m.name, table_name: m.table_name, columns: m.column_names, associations: m.reflect_on_all_associations.map {{ |a| {{ name: a.name, type: a.class.name.demodulize }} }} }} }}.inspect"
    )
}

/// Everything needed to start one evaluator process. Building one spawns nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    working_directory: PathBuf,
    env: BTreeMap<OsString, OsString>,
}

impl Invocation {
    pub fn for_query(query: &CompiledQuery, env: ExecutionEnvironment, program: &str) -> Self {
        Self::evaluate(program, query_script(query), env)
    }

    pub fn for_describe(entity_type: &str, env: ExecutionEnvironment, program: &str) -> Self {
        Self::evaluate(program, describe_script(entity_type), env)
    }

    pub fn for_describe_model(
        entity_type: &str,
        env: ExecutionEnvironment,
        program: &str,
    ) -> Self {
        Self::evaluate(program, describe_model_script(entity_type), env)
    }

    pub fn for_model_catalog(env: ExecutionEnvironment, program: &str) -> Self {
        Self::evaluate(program, model_catalog_script(), env)
    }

    fn evaluate(program: &str, script: String, env: ExecutionEnvironment) -> Self {
        Self {
            program: program.to_string(),
            args: vec!["-e".to_string(), script],
            working_directory: env.working_directory().to_path_buf(),
            env: env.vars().clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The evaluated program text (second half of the `-e` pair).
    pub fn script(&self) -> &str {
        self.args.get(1).map(String::as_str).unwrap_or_default()
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn env(&self) -> &BTreeMap<OsString, OsString> {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEPENDENCY_MANIFEST_VAR;
    use pretty_assertions::assert_eq;
    use recordbridge_query::compile;
    use std::ffi::OsStr;

    fn env() -> ExecutionEnvironment {
        ExecutionEnvironment::with_ambient(Path::new("/test/rails/project"), Vec::new())
    }

    #[test]
    fn row_listing_is_inspected() {
        let query = compile("Post", None, None, None, None, false).unwrap();
        let invocation = Invocation::for_query(&query, env(), "ruby");
        assert_eq!(invocation.program(), "ruby");
        assert_eq!(invocation.args()[0], "-e");
        assert_eq!(
            invocation.script(),
            "require './config/environment'; puts Post.all.inspect"
        );
        assert_eq!(
            invocation.working_directory(),
            Path::new("/test/rails/project")
        );
    }

    #[test]
    fn scalar_terminal_is_printed_directly() {
        let query = compile("Post", None, None, None, None, true).unwrap();
        let invocation = Invocation::for_query(&query, env(), "ruby");
        assert_eq!(
            invocation.script(),
            "require './config/environment'; puts Post.all.count"
        );
        assert!(!invocation.script().contains(".inspect"));
    }

    #[test]
    fn full_chain_is_embedded() {
        let query = compile(
            "Post",
            Some("published = true"),
            Some("created_at DESC"),
            Some(5),
            None,
            false,
        )
        .unwrap();
        let invocation = Invocation::for_query(&query, env(), "ruby");
        assert!(invocation.script().contains(
            r#"Post.all.where("published = true").order("created_at DESC").limit(5).inspect"#
        ));
    }

    #[test]
    fn describe_lists_columns() {
        let invocation = Invocation::for_describe("BlogPost", env(), "/usr/bin/ruby");
        assert_eq!(invocation.program(), "/usr/bin/ruby");
        assert!(invocation
            .script()
            .starts_with("require './config/environment'; puts BlogPost.columns.map { |c| { name: c.name,"));
        assert!(invocation.script().ends_with("scale: c.scale } }.inspect"));
    }

    #[test]
    fn describe_model_prints_one_hash() {
        let invocation = Invocation::for_describe_model("BlogPost", env(), "ruby");
        let script = invocation.script();
        assert!(script.starts_with("require './config/environment'; m = BlogPost; puts({ name: m.name,"));
        assert!(script.contains("primary_key: m.primary_key"));
        assert!(script.contains("m.reflect_on_all_associations.map { |a| { name: a.name,"));
        assert!(script.contains("foreign_key: a.foreign_key"));
        assert!(script.contains("options: v.options.except(:class)"));
        assert!(script.ends_with("} }.inspect)"));
    }

    #[test]
    fn model_catalog_eager_loads_first() {
        let invocation = Invocation::for_model_catalog(env(), "ruby");
        assert_eq!(
            invocation.script(),
            "require './config/environment'; Rails.application.eager_load!; puts ApplicationRecord.descendants.sort_by(&:name).map { |m| { name: m.name, table_name: m.table_name, columns: m.column_names, associations: m.reflect_on_all_associations.map { |a| { name: a.name, type: a.class.name.demodulize } } } }.inspect"
        );
    }

    #[test]
    fn environment_travels_with_the_invocation() {
        let query = compile("User", None, None, None, None, false).unwrap();
        let invocation = Invocation::for_query(&query, env(), "ruby");
        assert_eq!(
            invocation
                .env()
                .get(OsStr::new(DEPENDENCY_MANIFEST_VAR))
                .map(OsString::as_os_str),
            Some(OsStr::new("/test/rails/project/Gemfile"))
        );
    }
}
