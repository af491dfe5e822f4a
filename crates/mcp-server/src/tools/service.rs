use recordbridge_bridge::{RecordBridge, ResponseEnvelope};
use recordbridge_query::QueryRequest;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::sync::Arc;

use super::list_models::compute_models;
use super::schemas::{
    DescribeModelRequest, DescribeTableRequest, ListModelsRequest, ListModelsResult,
    SelectRecordsRequest,
};
use crate::config::Config;

/// Record Bridge MCP Service
#[derive(Clone)]
pub struct RecordBridgeService {
    config: Arc<Config>,
    bridge: RecordBridge,
    /// Tool router
    tool_router: ToolRouter<Self>,
}

impl RecordBridgeService {
    pub fn new(config: Config) -> Self {
        let bridge = RecordBridge::new(Arc::new(config.bridge_config()));
        Self {
            config: Arc::new(config),
            bridge,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl RecordBridgeService {
    /// Read records through the application's models
    #[tool(
        description = "Select records through the application's models. Provide the plural snake_case model name plus optional filter_condition (SQL WHERE fragment), order_by, limit, aggregate_statement or count_only. Read-only: mutating SQL is rejected."
    )]
    pub async fn select_records(
        &self,
        Parameters(request): Parameters<SelectRecordsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request: QueryRequest = request.into();
        Ok(envelope_result(self.bridge.select_records(&request).await))
    }

    /// Column metadata for one table
    #[tool(
        description = "Describe a table: column names, types, SQL types, nullability, defaults, limits, precision and scale."
    )]
    pub async fn describe_table(
        &self,
        Parameters(request): Parameters<DescribeTableRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(envelope_result(
            self.bridge
                .describe_table(request.table_name.as_deref())
                .await,
        ))
    }

    /// Key, associations and validators of one model
    #[tool(
        description = "Describe a model: table name, primary key, columns, associations (name, type, class_name, foreign_key) and validators."
    )]
    pub async fn describe_model(
        &self,
        Parameters(request): Parameters<DescribeModelRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(envelope_result(
            self.bridge
                .describe_model(request.model_name.as_deref())
                .await,
        ))
    }

    /// Models defined by the application
    #[tool(
        description = "List the models defined in the application's models directory (names usable with select_records after pluralizing to snake_case). Set include_schema to load the application and also get table names, columns and associations."
    )]
    pub async fn list_models(
        &self,
        Parameters(request): Parameters<ListModelsRequest>,
    ) -> Result<CallToolResult, McpError> {
        if request.include_schema.unwrap_or(false) {
            return Ok(envelope_result(self.bridge.model_catalog().await));
        }

        let models_dir = self.config.models_dir();
        let models = match compute_models(&models_dir).await {
            Ok(models) => models,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {e:#}"
                ))]))
            }
        };

        let result = ListModelsResult {
            models_dir: models_dir.display().to_string(),
            models,
        };
        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&result).unwrap_or_default(),
        )]))
    }
}

#[tool_handler]
impl ServerHandler for RecordBridgeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Record Bridge answers read-only questions about an application's data. Use 'list_models' to see what exists, 'describe_table' or 'describe_model' to learn a table's columns and a model's associations, and 'select_records' to fetch rows, counts or aggregates.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

fn envelope_result(envelope: ResponseEnvelope) -> CallToolResult {
    if envelope.success {
        CallToolResult::success(vec![Content::text(envelope.text)])
    } else {
        CallToolResult::error(vec![Content::text(envelope.text)])
    }
}
