//! Record Bridge MCP tool surface.

mod list_models;
mod schemas;
mod service;

pub use schemas::{
    DescribeModelRequest, DescribeTableRequest, ListModelsRequest, SelectRecordsRequest,
};
pub use service::RecordBridgeService;
