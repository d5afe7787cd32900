//! Application deployment and lifecycle scripts.

use wlst_types::StageMode;

use super::fragments::py_literal;
use super::markers::{
    APP_START_ERROR, APP_STARTED, APP_STATUS, APP_STOP_ERROR, APP_STOPPED, APPS_DONE, DEPLOY_ERROR, DEPLOY_SUCCESS, REDEPLOY_ERROR,
    REDEPLOY_SUCCESS, UNDEPLOY_ERROR, UNDEPLOY_SUCCESS,
};

fn keyword(name: &str, value: Option<&str>) -> String {
    value
        .map(|value| format!(", {name}={}", py_literal(value)))
        .unwrap_or_default()
}

/// Wrap a single WLST call so success and failure print their markers.
fn guarded(app_name: &str, call: &str, success: &str, error: &str) -> String {
    format!(
        "appName = {name}
try:
    {call}
    print('{success}: ' + appName)
except Exception as e:
    print('{error}: ' + str(e))
",
        name = py_literal(app_name),
    )
}

pub(super) fn deploy(app_name: &str, app_path: &str, targets: Option<&str>, stage_mode: StageMode, plan_path: Option<&str>) -> String {
    let call = format!(
        "deploy(appName, {path}{targets}, stageMode={stage}{plan})",
        path = py_literal(app_path),
        targets = keyword("targets", targets),
        stage = py_literal(stage_mode.as_str()),
        plan = keyword("planPath", plan_path),
    );
    guarded(app_name, &call, DEPLOY_SUCCESS, DEPLOY_ERROR)
}

pub(super) fn undeploy(app_name: &str, targets: Option<&str>) -> String {
    let call = format!("undeploy(appName{})", keyword("targets", targets));
    guarded(app_name, &call, UNDEPLOY_SUCCESS, UNDEPLOY_ERROR)
}

pub(super) fn redeploy(app_name: &str, plan_path: Option<&str>) -> String {
    let call = format!("redeploy(appName{})", keyword("planPath", plan_path));
    guarded(app_name, &call, REDEPLOY_SUCCESS, REDEPLOY_ERROR)
}

pub(super) fn start_application(app_name: &str) -> String {
    guarded(app_name, "startApplication(appName)", APP_STARTED, APP_START_ERROR)
}

pub(super) fn stop_application(app_name: &str) -> String {
    guarded(app_name, "stopApplication(appName)", APP_STOPPED, APP_STOP_ERROR)
}

pub(super) fn list_applications() -> String {
    format!(
        "domainRuntime()
cd('/AppRuntimeStateRuntime/AppRuntimeStateRuntime')
for appName in cmo.getApplicationIds():
    status = {{
        'name': text(appName),
        'state': text(cmo.getCurrentState(appName)),
        'intendedState': text(cmo.getIntendedState(appName)),
    }}
    print('{APP_STATUS}:' + json.dumps(status))
print('{APPS_DONE}')
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_includes_only_supplied_keywords() {
        let minimal = deploy("shop", "/apps/shop.war", None, StageMode::Stage, None);
        assert!(minimal.contains("deploy(appName, '/apps/shop.war', stageMode='stage')"));

        let full = deploy("shop", "/apps/shop.war", Some("ms1,ms2"), StageMode::NoStage, Some("/plans/plan.xml"));
        assert!(full.contains("deploy(appName, '/apps/shop.war', targets='ms1,ms2', stageMode='nostage', planPath='/plans/plan.xml')"));
    }

    #[test]
    fn lifecycle_calls_print_their_markers() {
        let script = stop_application("shop");
        assert!(script.contains("stopApplication(appName)"));
        assert!(script.contains("print('APP_STOPPED: ' + appName)"));
        assert!(script.contains("print('APP_STOP_ERROR: ' + str(e))"));
    }
}
