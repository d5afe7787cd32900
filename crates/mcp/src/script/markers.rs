//! Output markers printed by the generated scripts.
//!
//! Each marker starts a line. Single values follow as `MARKER: value`, list
//! items as `MARKER:{json}`, one item per line.

pub const CONNECTION_ERROR: &str = "CONNECTION_ERROR";
pub const CONNECTION_SUCCESS: &str = "CONNECTION_SUCCESS";
pub const DOMAIN_NAME: &str = "DOMAIN_NAME";
pub const DOMAIN_VERSION: &str = "DOMAIN_VERSION";

pub const SERVER_STATUS: &str = "SERVER_STATUS";
pub const SERVERS_DONE: &str = "SERVERS_DONE";
pub const SERVER_STARTED: &str = "SERVER_STARTED";
pub const START_ERROR: &str = "START_ERROR";
pub const SERVER_STOPPED: &str = "SERVER_STOPPED";
pub const STOP_ERROR: &str = "STOP_ERROR";
pub const SERVER_RESTARTED: &str = "SERVER_RESTARTED";
pub const RESTART_ERROR: &str = "RESTART_ERROR";

pub const DEPLOY_SUCCESS: &str = "DEPLOY_SUCCESS";
pub const DEPLOY_ERROR: &str = "DEPLOY_ERROR";
pub const UNDEPLOY_SUCCESS: &str = "UNDEPLOY_SUCCESS";
pub const UNDEPLOY_ERROR: &str = "UNDEPLOY_ERROR";
pub const REDEPLOY_SUCCESS: &str = "REDEPLOY_SUCCESS";
pub const REDEPLOY_ERROR: &str = "REDEPLOY_ERROR";
pub const APP_STARTED: &str = "APP_STARTED";
pub const APP_START_ERROR: &str = "APP_START_ERROR";
pub const APP_STOPPED: &str = "APP_STOPPED";
pub const APP_STOP_ERROR: &str = "APP_STOP_ERROR";
pub const APP_STATUS: &str = "APP_STATUS";
pub const APPS_DONE: &str = "APPS_DONE";

pub const SERVER_HEALTH: &str = "SERVER_HEALTH";
pub const HEALTH_DONE: &str = "HEALTH_DONE";
pub const METRICS_JSON: &str = "METRICS_JSON";
pub const METRICS_ERROR: &str = "METRICS_ERROR";
pub const THREAD_DUMP_START: &str = "THREAD_DUMP_START";
pub const THREAD_DUMP_END: &str = "THREAD_DUMP_END";
pub const THREAD_DUMP_ERROR: &str = "THREAD_DUMP_ERROR";

pub const DATASOURCE: &str = "DATASOURCE";
pub const DATASOURCES_DONE: &str = "DATASOURCES_DONE";
pub const DATASOURCE_CREATED: &str = "DATASOURCE_CREATED";
pub const DATASOURCE_ERROR: &str = "DATASOURCE_ERROR";
pub const JMS_SERVER: &str = "JMS_SERVER";
pub const JMS_MODULE: &str = "JMS_MODULE";
pub const JMS_DONE: &str = "JMS_DONE";

/// The markers that decide the outcome of one managed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationMarkers {
    /// Printed once the operation completed (or the listing finished).
    pub success: &'static str,
    /// Printed with WLST's message when the operation raised.
    pub error: Option<&'static str>,
}

impl OperationMarkers {
    pub const fn new(success: &'static str, error: &'static str) -> Self {
        Self {
            success,
            error: Some(error),
        }
    }

    pub const fn completion(success: &'static str) -> Self {
        Self { success, error: None }
    }
}
