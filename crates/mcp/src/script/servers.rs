//! Domain and server lifecycle scripts.

use super::fragments::py_literal;
use super::markers::{
    CONNECTION_SUCCESS, DOMAIN_NAME, DOMAIN_VERSION, RESTART_ERROR, SERVER_RESTARTED, SERVER_STARTED, SERVER_STATUS, SERVER_STOPPED,
    SERVERS_DONE, START_ERROR, STOP_ERROR, THREAD_DUMP_END, THREAD_DUMP_ERROR, THREAD_DUMP_START,
};

pub(super) fn test_connection() -> String {
    format!(
        "domainName = cmo.getName()
domainVersion = cmo.getDomainVersion()
print('{CONNECTION_SUCCESS}')
print('{DOMAIN_NAME}: ' + str(domainName))
print('{DOMAIN_VERSION}: ' + str(domainVersion))
"
    )
}

pub(super) fn list_servers() -> String {
    format!(
        "domainRuntime()
for runtime in cmo.getServerLifeCycleRuntimes():
    print('{SERVER_STATUS}:' + json.dumps({{'name': text(runtime.getName()), 'state': text(runtime.getState())}}))
print('{SERVERS_DONE}')
"
    )
}

pub(super) fn start_server(server_name: &str) -> String {
    format!(
        "serverName = {name}
try:
    start(serverName, 'Server')
    print('{SERVER_STARTED}: ' + serverName)
except Exception as e:
    print('{START_ERROR}: ' + str(e))
",
        name = py_literal(server_name),
    )
}

fn shutdown_call(force: bool) -> &'static str {
    if force {
        "shutdown(serverName, 'Server', force='true')"
    } else {
        "shutdown(serverName, 'Server')"
    }
}

pub(super) fn stop_server(server_name: &str, force: bool) -> String {
    format!(
        "serverName = {name}
try:
    {shutdown}
    print('{SERVER_STOPPED}: ' + serverName)
except Exception as e:
    print('{STOP_ERROR}: ' + str(e))
",
        name = py_literal(server_name),
        shutdown = shutdown_call(force),
    )
}

pub(super) fn restart_server(server_name: &str, force: bool) -> String {
    format!(
        "serverName = {name}
try:
    {shutdown}
    print('{SERVER_STOPPED}: ' + serverName)
    start(serverName, 'Server')
    print('{SERVER_RESTARTED}: ' + serverName)
except Exception as e:
    print('{RESTART_ERROR}: ' + str(e))
",
        name = py_literal(server_name),
        shutdown = shutdown_call(force),
    )
}

pub(super) fn thread_dump(server_name: &str) -> String {
    format!(
        "serverName = {name}
try:
    domainRuntime()
    runtime = domainRuntimeService.lookupServerRuntime(serverName)
    if runtime is None:
        raise Exception('Server ' + serverName + ' is not running')
    threadDump = runtime.getJVMRuntime().getThreadStackDump()
    print('{THREAD_DUMP_START}')
    print(threadDump)
    print('{THREAD_DUMP_END}')
except Exception as e:
    print('{THREAD_DUMP_ERROR}: ' + str(e))
",
        name = py_literal(server_name),
    )
}
