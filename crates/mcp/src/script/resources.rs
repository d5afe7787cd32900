//! JDBC and JMS resource scripts.

use super::DatasourceDefinition;
use super::fragments::{py_list, py_literal};
use super::markers::{DATASOURCE, DATASOURCE_CREATED, DATASOURCE_ERROR, DATASOURCES_DONE, JMS_DONE, JMS_MODULE, JMS_SERVER};

pub(super) fn list_datasources() -> String {
    format!(
        "serverConfig()
for resource in cmo.getJDBCSystemResources():
    driverParams = resource.getJDBCResource().getJDBCDriverParams()
    datasource = {{
        'name': text(resource.getName()),
        'url': text(driverParams.getUrl()),
        'driver': text(driverParams.getDriverName()),
        'targets': [text(target.getName()) for target in resource.getTargets()],
    }}
    print('{DATASOURCE}:' + json.dumps(datasource))
print('{DATASOURCES_DONE}')
"
    )
}

pub(super) fn create_datasource(definition: &DatasourceDefinition) -> String {
    format!(
        "from jarray import array
from java.lang import String

dsName = {name}
jndiName = {jndi}
dbUrl = {url}
dbDriver = {driver}
dbUser = {user}
dbPassword = {password}
targetNames = {targets}
minCapacity = {min_capacity}
maxCapacity = {max_capacity}
try:
    edit()
    startEdit()
    resource = cmo.createJDBCSystemResource(dsName)
    jdbc = resource.getJDBCResource()
    jdbc.setName(dsName)
    jdbc.getJDBCDataSourceParams().setJNDINames(array([jndiName], String))
    driverParams = jdbc.getJDBCDriverParams()
    driverParams.setUrl(dbUrl)
    driverParams.setDriverName(dbDriver)
    driverParams.setPassword(dbPassword)
    driverParams.getProperties().createProperty('user').setValue(dbUser)
    pool = jdbc.getJDBCConnectionPoolParams()
    pool.setInitialCapacity(minCapacity)
    pool.setMinCapacity(minCapacity)
    pool.setMaxCapacity(maxCapacity)
    for targetName in targetNames:
        target = getMBean('/Servers/' + targetName)
        if target is None:
            target = getMBean('/Clusters/' + targetName)
        if target is None:
            raise Exception('Unknown target ' + targetName)
        resource.addTarget(target)
    save()
    activate(block='true')
    print('{DATASOURCE_CREATED}: ' + dsName)
except Exception as e:
    try:
        cancelEdit('y')
    except:
        pass
    print('{DATASOURCE_ERROR}: ' + str(e))
",
        name = py_literal(&definition.name),
        jndi = py_literal(&definition.jndi_name),
        url = py_literal(&definition.db_url),
        driver = py_literal(&definition.db_driver),
        user = py_literal(&definition.db_user),
        password = py_literal(&definition.db_password),
        targets = py_list(&definition.targets),
        min_capacity = definition.min_capacity,
        max_capacity = definition.max_capacity,
    )
}

pub(super) fn list_jms_resources() -> String {
    format!(
        "serverConfig()
for jmsServer in cmo.getJMSServers():
    server = {{
        'name': text(jmsServer.getName()),
        'targets': [text(target.getName()) for target in jmsServer.getTargets()],
    }}
    print('{JMS_SERVER}:' + json.dumps(server))
for module in cmo.getJMSSystemResources():
    jmsResource = module.getJMSResource()
    jmsModule = {{
        'name': text(module.getName()),
        'queues': [{{'name': text(q.getName()), 'jndiName': text(q.getJNDIName())}} for q in jmsResource.getQueues()],
        'topics': [{{'name': text(t.getName()), 'jndiName': text(t.getJNDIName())}} for t in jmsResource.getTopics()],
    }}
    print('{JMS_MODULE}:' + json.dumps(jmsModule))
print('{JMS_DONE}')
"
    )
}
