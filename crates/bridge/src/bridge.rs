use std::path::PathBuf;
use std::sync::Arc;

use recordbridge_query::{
    resolve_entity_type, resolve_table_entity_type, QueryError, QueryRequest, Terminal,
};

use crate::envelope::ResponseEnvelope;
use crate::environment::ExecutionEnvironment;
use crate::error::{BridgeError, Result};
use crate::invocation::Invocation;
use crate::runner::{ProcessRunner, TokioProcessRunner};

pub const DEFAULT_EVALUATOR: &str = "ruby";

/// Read-only settings shared by every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Root of the target application; becomes the child's working directory.
    pub projects_root: PathBuf,
    /// Interpreter used to evaluate compiled queries.
    pub evaluator: String,
}

impl BridgeConfig {
    pub fn new(projects_root: impl Into<PathBuf>) -> Self {
        Self {
            projects_root: projects_root.into(),
            evaluator: DEFAULT_EVALUATOR.to_string(),
        }
    }

    pub fn with_evaluator(mut self, evaluator: impl Into<String>) -> Self {
        self.evaluator = evaluator.into();
        self
    }
}

/// Compiles record requests and evaluates them in the target application.
pub struct RecordBridge<R = TokioProcessRunner> {
    config: Arc<BridgeConfig>,
    runner: Arc<R>,
}

impl<R> Clone for RecordBridge<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            runner: Arc::clone(&self.runner),
        }
    }
}

impl RecordBridge<TokioProcessRunner> {
    pub fn new(config: Arc<BridgeConfig>) -> Self {
        Self::with_runner(config, TokioProcessRunner)
    }
}

impl<R: ProcessRunner> RecordBridge<R> {
    pub fn with_runner(config: Arc<BridgeConfig>, runner: R) -> Self {
        Self {
            config,
            runner: Arc::new(runner),
        }
    }

    /// Compile `request` and evaluate it. Never fails: problems come back as
    /// `success: false` envelopes, and nothing is spawned when validation fails.
    pub async fn select_records(&self, request: &QueryRequest) -> ResponseEnvelope {
        let compiled = match request.compile() {
            Ok(compiled) => compiled,
            Err(err) => {
                log::debug!("select_records rejected before execution: {err}");
                return ResponseEnvelope::failure(selection_error(request, &BridgeError::from(err)));
            }
        };

        let terminal = match compiled.terminal() {
            Terminal::RowListing { .. } => "rows",
            Terminal::Scalar(_) => "scalar",
        };
        log::debug!(
            "select_records {} ({terminal}) in {}",
            compiled.entity_type(),
            self.config.projects_root.display()
        );

        let invocation =
            Invocation::for_query(&compiled, self.environment(), &self.config.evaluator);
        match self.execute(&invocation).await {
            Ok(envelope) => envelope,
            Err(err) => ResponseEnvelope::failure(selection_error(request, &err)),
        }
    }

    /// Print the column metadata for `table_name` (e.g. `"users"`).
    pub async fn describe_table(&self, table_name: Option<&str>) -> ResponseEnvelope {
        let entity_type = match resolve_table_entity_type(table_name) {
            Ok(entity_type) => entity_type,
            Err(err) => {
                log::debug!("describe_table rejected before execution: {err}");
                return ResponseEnvelope::failure(err.to_string());
            }
        };

        log::debug!(
            "describe_table {entity_type} in {}",
            self.config.projects_root.display()
        );
        let invocation =
            Invocation::for_describe(&entity_type, self.environment(), &self.config.evaluator);
        match self.execute(&invocation).await {
            Ok(envelope) => envelope,
            Err(err) => ResponseEnvelope::failure(format!(
                "Error describing table '{}': {err}",
                table_name.unwrap_or_default().trim()
            )),
        }
    }

    /// Print key, columns, associations and validators of one model
    /// (`"User"`, `"users"` and `"blog_posts"` are all accepted).
    pub async fn describe_model(&self, model_name: Option<&str>) -> ResponseEnvelope {
        let entity_type = match resolve_entity_type(model_name) {
            Ok(entity_type) => entity_type,
            Err(err) => {
                log::debug!("describe_model rejected before execution: {err}");
                return ResponseEnvelope::failure(err.to_string());
            }
        };

        log::debug!(
            "describe_model {entity_type} in {}",
            self.config.projects_root.display()
        );
        let invocation = Invocation::for_describe_model(
            &entity_type,
            self.environment(),
            &self.config.evaluator,
        );
        match self.execute(&invocation).await {
            Ok(envelope) => envelope,
            Err(err) => ResponseEnvelope::failure(format!(
                "Error describing model '{}': {err}",
                model_name.unwrap_or_default().trim()
            )),
        }
    }

    /// Every model the application defines, loaded from its runtime.
    pub async fn model_catalog(&self) -> ResponseEnvelope {
        log::debug!(
            "model_catalog in {}",
            self.config.projects_root.display()
        );
        let invocation = Invocation::for_model_catalog(self.environment(), &self.config.evaluator);
        match self.execute(&invocation).await {
            Ok(envelope) => envelope,
            Err(err) => ResponseEnvelope::failure(format!("Failed to load models: {err}")),
        }
    }

    fn environment(&self) -> ExecutionEnvironment {
        ExecutionEnvironment::for_root(&self.config.projects_root)
    }

    async fn execute(&self, invocation: &Invocation) -> Result<ResponseEnvelope> {
        let outcome = self.runner.run(invocation).await.map_err(|source| {
            log::warn!(
                "failed to spawn '{}' in {}: {source}",
                invocation.program(),
                invocation.working_directory().display()
            );
            BridgeError::Spawn {
                program: invocation.program().to_string(),
                working_directory: invocation.working_directory().display().to_string(),
                source,
            }
        })?;

        if !outcome.success {
            log::info!("evaluator '{}' exited with failure", invocation.program());
        }
        Ok(ResponseEnvelope::from_outcome(outcome))
    }
}

fn selection_error(request: &QueryRequest, err: &BridgeError) -> String {
    match (err, request.entity_collection_name.as_deref()) {
        (BridgeError::Query(QueryError::MissingModelName), _) | (_, None) => err.to_string(),
        (_, Some(name)) => format!("Error selecting records for model '{}': {err}", name.trim()),
    }
}
