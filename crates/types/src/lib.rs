//! Shared type definitions for the WLST MCP server.
//!
//! Records in this crate mirror the JSON objects printed by the generated
//! WLST scripts (camelCase keys) so the same shapes are used for parsing the
//! interpreter output and for the structured tool responses.

mod options;
mod records;
mod state;

pub use options::{MetricType, ParseOptionError, ResponseFormat, StageMode};
pub use records::{
    ApplicationListing, ApplicationStatus, ConnectionInfo, DatasourceInfo, DatasourceListing, HealthListing, JdbcDataSourceMetrics,
    JmsDestination, JmsModule, JmsResources, JmsRuntimeMetrics, JmsServer, JmsServerMetrics, JvmMetrics, MetricSection, OperationOutcome,
    ScriptExecution, ServerHealth, ServerListing, ServerMetrics, ServerStatus, ThreadDump, ThreadPoolMetrics,
};
pub use state::{ApplicationState, HealthState, ServerState};
