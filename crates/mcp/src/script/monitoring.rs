//! Health, metrics and diagnostics scripts.

use wlst_types::MetricType;

use super::fragments::py_literal;
use super::markers::{HEALTH_DONE, METRICS_ERROR, METRICS_JSON, SERVER_HEALTH};

pub(super) fn server_health(server_name: Option<&str>) -> String {
    let filter = server_name.map(py_literal).unwrap_or_else(|| "None".to_string());
    format!(
        "serverFilter = {filter}
domainRuntime()
for runtime in domainRuntimeService.getServerRuntimes():
    serverName = runtime.getName()
    if serverFilter is not None and serverName != serverFilter:
        continue
    activationTime = runtime.getActivationTime()
    health = {{
        'name': text(serverName),
        'state': text(runtime.getState()),
        'health': text(runtime.getHealthState()),
        'openSocketsCurrentCount': runtime.getOpenSocketsCurrentCount(),
        'activationTime': activationTime and text(activationTime) or None,
    }}
    print('{SERVER_HEALTH}:' + json.dumps(health))
print('{HEALTH_DONE}')
"
    )
}

const JVM_SECTION: &str = "    try:
        jvm = runtime.getJVMRuntime()
        metrics['jvm'] = {
            'heapSizeCurrent': jvm.getHeapSizeCurrent(),
            'heapSizeMax': jvm.getHeapSizeMax(),
            'heapFreeCurrent': jvm.getHeapFreeCurrent(),
            'heapFreePercent': jvm.getHeapFreePercent(),
            'uptime': jvm.getUptime(),
        }
    except Exception as sectionError:
        metrics['jvm'] = {'error': str(sectionError)}
";

const THREADS_SECTION: &str = "    try:
        pool = runtime.getThreadPoolRuntime()
        metrics['threads'] = {
            'executeThreadTotalCount': pool.getExecuteThreadTotalCount(),
            'executeThreadIdleCount': pool.getExecuteThreadIdleCount(),
            'hoggingThreadCount': pool.getHoggingThreadCount(),
            'pendingUserRequestCount': pool.getPendingUserRequestCount(),
            'queueLength': pool.getQueueLength(),
        }
    except Exception as sectionError:
        metrics['threads'] = {'error': str(sectionError)}
";

const JDBC_SECTION: &str = "    try:
        dataSources = []
        for ds in runtime.getJDBCServiceRuntime().getJDBCDataSourceRuntimeMBeans():
            dataSources.append({
                'name': text(ds.getName()),
                'state': text(ds.getState()),
                'activeConnectionsCurrentCount': ds.getActiveConnectionsCurrentCount(),
                'activeConnectionsHighCount': ds.getActiveConnectionsHighCount(),
                'connectionsTotalCount': ds.getConnectionsTotalCount(),
                'waitingForConnectionCurrentCount': ds.getWaitingForConnectionCurrentCount(),
            })
        metrics['jdbc'] = dataSources
    except Exception as sectionError:
        metrics['jdbc'] = {'error': str(sectionError)}
";

const JMS_SECTION: &str = "    try:
        jms = runtime.getJMSRuntime()
        jmsServers = []
        for jmsServer in jms.getJMSServers():
            jmsServers.append({
                'name': text(jmsServer.getName()),
                'messagesCurrentCount': jmsServer.getMessagesCurrentCount(),
                'messagesPendingCount': jmsServer.getMessagesPendingCount(),
                'destinationsCurrentCount': jmsServer.getDestinationsCurrentCount(),
            })
        metrics['jms'] = {
            'connectionsCurrentCount': jms.getConnectionsCurrentCount(),
            'connectionsHighCount': jms.getConnectionsHighCount(),
            'jmsServersCurrentCount': jms.getJMSServersCurrentCount(),
            'servers': jmsServers,
        }
    except Exception as sectionError:
        metrics['jms'] = {'error': str(sectionError)}
";

pub(super) fn server_metrics(server_name: &str, metric_type: MetricType) -> String {
    let sections = [
        (MetricType::Jvm, JVM_SECTION),
        (MetricType::Threads, THREADS_SECTION),
        (MetricType::Jdbc, JDBC_SECTION),
        (MetricType::Jms, JMS_SECTION),
    ];
    let collected: String = sections
        .iter()
        .filter(|(category, _)| metric_type.includes(*category))
        .map(|(_, section)| *section)
        .collect();

    format!(
        "serverName = {name}
metrics = {{'server': serverName}}
try:
    domainRuntime()
    runtime = domainRuntimeService.lookupServerRuntime(serverName)
    if runtime is None:
        raise Exception('Server ' + serverName + ' is not running')
{collected}    print('{METRICS_JSON}:' + json.dumps(metrics))
except Exception as e:
    print('{METRICS_ERROR}: ' + str(e))
",
        name = py_literal(server_name),
    )
}
