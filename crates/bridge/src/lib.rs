//! # Record Bridge Execution
//!
//! Evaluates a [`CompiledQuery`](recordbridge_query::CompiledQuery) in a
//! separate interpreter process rooted at the target application, so entity
//! types resolve against the live schema without loading that runtime here.
//!
//! ```text
//! QueryRequest ──compile──> CompiledQuery
//!                                │
//!     ExecutionEnvironment ──────┤  cwd = projects root
//!     (ambient env + BUNDLE_GEMFILE)
//!                                ▼
//!                           Invocation  ruby -e "require './config/environment'; puts …"
//!                                │
//!                          ProcessRunner  (one child per call, no retry)
//!                                │
//!                          ProcessOutcome ──> ResponseEnvelope { success, text }
//! ```
//!
//! Every failure, from a missing model name to a child that cannot be
//! spawned, ends up as a `success: false` envelope.

mod bridge;
mod envelope;
mod environment;
mod error;
mod invocation;
mod runner;

pub use bridge::{BridgeConfig, RecordBridge, DEFAULT_EVALUATOR};
pub use envelope::{ProcessOutcome, ResponseEnvelope};
pub use environment::{ExecutionEnvironment, DEPENDENCY_MANIFEST_FILE, DEPENDENCY_MANIFEST_VAR};
pub use error::{BridgeError, Result};
pub use invocation::{
    describe_model_script, describe_script, model_catalog_script, query_script, Invocation,
    ENVIRONMENT_PRELUDE,
};
pub use runner::{ProcessRunner, TokioProcessRunner};
