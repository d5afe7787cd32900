//! Markdown renderings of tool results.

use wlst_types::{
    ApplicationListing, ApplicationState, ConnectionInfo, DatasourceListing, HealthListing, HealthState, JdbcDataSourceMetrics,
    JmsDestination, JmsResources, JmsRuntimeMetrics, JvmMetrics, MetricSection, OperationOutcome, ScriptExecution, ServerListing,
    ServerMetrics, ServerState, ThreadDump, ThreadPoolMetrics,
};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// WLST prints `None` for attributes it could not read.
fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}

/// Human-readable rendering of a tool result.
pub trait RenderMarkdown {
    fn to_markdown(&self) -> String;
}

impl RenderMarkdown for ConnectionInfo {
    fn to_markdown(&self) -> String {
        format!(
            "# Connection Successful\n\n- **Domain**: {}\n- **Version**: {}\n- **URL**: {}",
            self.domain_name, self.domain_version, self.admin_url
        )
    }
}

impl RenderMarkdown for ServerListing {
    fn to_markdown(&self) -> String {
        if self.servers.is_empty() {
            return "No servers found.".to_string();
        }
        let mut lines = vec!["# WebLogic Servers".to_string(), String::new(), format!("**Total servers**: {}", self.total), String::new()];
        for server in &self.servers {
            let state = or_unknown(&server.state);
            let glyph = ServerState::from_label(state).glyph();
            lines.push(format!("- {glyph} **{}**: {state}", server.name));
        }
        lines.join("\n")
    }
}

impl RenderMarkdown for ApplicationListing {
    fn to_markdown(&self) -> String {
        if self.applications.is_empty() {
            return "No applications found.".to_string();
        }
        let mut lines = vec![
            "# Deployed Applications".to_string(),
            String::new(),
            format!("**Total applications**: {}", self.total),
            String::new(),
        ];
        for app in &self.applications {
            let state = or_unknown(&app.state);
            let glyph = ApplicationState::from_label(state).glyph();
            lines.push(format!("- {glyph} **{}**", app.name));
            lines.push(format!("  - State: {state}"));
            lines.push(format!("  - Intended: {}", or_unknown(&app.intended_state)));
        }
        lines.join("\n")
    }
}

impl RenderMarkdown for HealthListing {
    fn to_markdown(&self) -> String {
        if self.servers.is_empty() {
            return "No running servers found.".to_string();
        }
        let mut lines = vec!["# Server Health Status".to_string(), String::new()];
        for server in &self.servers {
            let health = or_unknown(&server.health);
            let glyph = HealthState::from_label(health).glyph();
            lines.push(format!("## {glyph} {}", server.name));
            lines.push(format!("- **State**: {}", or_unknown(&server.state)));
            lines.push(format!("- **Health**: {health}"));
            let sockets = server
                .open_sockets_current_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            lines.push(format!("- **Open Sockets**: {sockets}"));
            if let Some(activation_time) = &server.activation_time {
                lines.push(format!("- **Activation Time**: {activation_time}"));
            }
            lines.push(String::new());
        }
        lines.join("\n").trim_end().to_string()
    }
}

fn push_section<T>(lines: &mut Vec<String>, title: &str, section: &Option<MetricSection<T>>, render: impl Fn(&T) -> Vec<String>) {
    let Some(section) = section else {
        return;
    };
    lines.push(format!("## {title}"));
    match section {
        MetricSection::Failed { error } => lines.push(format!("- **Error**: {error}")),
        MetricSection::Collected(value) => lines.extend(render(value)),
    }
    lines.push(String::new());
}

fn jvm_lines(jvm: &JvmMetrics) -> Vec<String> {
    let used_mb = jvm.heap_used() as f64 / BYTES_PER_MB;
    let max_mb = jvm.heap_size_max as f64 / BYTES_PER_MB;
    vec![
        format!(
            "- **Heap Used**: {used_mb:.1} MB / {max_mb:.1} MB ({}%)",
            100 - jvm.heap_free_percent
        ),
        format!("- **Heap Free**: {}%", jvm.heap_free_percent),
        format!("- **Uptime**: {} seconds", jvm.uptime / 1000),
    ]
}

fn thread_lines(threads: &ThreadPoolMetrics) -> Vec<String> {
    vec![
        format!("- **Total Threads**: {}", threads.execute_thread_total_count),
        format!("- **Idle Threads**: {}", threads.execute_thread_idle_count),
        format!("- **Hogging Threads**: {}", threads.hogging_thread_count),
        format!("- **Pending Requests**: {}", threads.pending_user_request_count),
        format!("- **Queue Length**: {}", threads.queue_length),
    ]
}

fn jdbc_lines(data_sources: &Vec<JdbcDataSourceMetrics>) -> Vec<String> {
    if data_sources.is_empty() {
        return vec!["- No datasources deployed".to_string()];
    }
    let mut lines = Vec::new();
    for ds in data_sources {
        lines.push(format!("### {}", ds.name));
        lines.push(format!("- **State**: {}", or_unknown(&ds.state)));
        lines.push(format!(
            "- **Active Connections**: {} (High: {})",
            ds.active_connections_current_count, ds.active_connections_high_count
        ));
        lines.push(format!("- **Total Connections**: {}", ds.connections_total_count));
        lines.push(format!("- **Waiting for Connection**: {}", ds.waiting_for_connection_current_count));
    }
    lines
}

fn jms_lines(jms: &JmsRuntimeMetrics) -> Vec<String> {
    let mut lines = vec![
        format!(
            "- **Connections**: {} (High: {})",
            jms.connections_current_count, jms.connections_high_count
        ),
        format!("- **JMS Servers**: {}", jms.jms_servers_current_count),
    ];
    for server in &jms.servers {
        lines.push(format!(
            "- **{}**: {} messages ({} pending) across {} destinations",
            server.name, server.messages_current_count, server.messages_pending_count, server.destinations_current_count
        ));
    }
    lines
}

impl RenderMarkdown for ServerMetrics {
    fn to_markdown(&self) -> String {
        let mut lines = vec![format!("# Metrics for {}", self.server), String::new()];
        push_section(&mut lines, "JVM Metrics", &self.jvm, jvm_lines);
        push_section(&mut lines, "Thread Pool Metrics", &self.threads, thread_lines);
        push_section(&mut lines, "JDBC Datasource Metrics", &self.jdbc, jdbc_lines);
        push_section(&mut lines, "JMS Metrics", &self.jms, jms_lines);
        lines.join("\n").trim_end().to_string()
    }
}

impl RenderMarkdown for ThreadDump {
    fn to_markdown(&self) -> String {
        format!("# Thread Dump for {}\n\n```\n{}\n```", self.server, self.thread_dump)
    }
}

impl RenderMarkdown for DatasourceListing {
    fn to_markdown(&self) -> String {
        if self.datasources.is_empty() {
            return "No datasources found.".to_string();
        }
        let mut lines = vec!["# JDBC Datasources".to_string(), String::new(), format!("**Total**: {}", self.total), String::new()];
        for ds in &self.datasources {
            lines.push(format!("## {}", ds.name));
            lines.push(format!("- **URL**: `{}`", or_unknown(&ds.url)));
            lines.push(format!("- **Driver**: {}", or_unknown(&ds.driver)));
            lines.push(format!("- **Targets**: {}", join_or(&ds.targets, "None")));
            lines.push(String::new());
        }
        lines.join("\n").trim_end().to_string()
    }
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() { fallback.to_string() } else { values.join(", ") }
}

fn destination_line(destination: &JmsDestination) -> String {
    match &destination.jndi_name {
        Some(jndi_name) => format!("- {} (`{jndi_name}`)", destination.name),
        None => format!("- {}", destination.name),
    }
}

impl RenderMarkdown for JmsResources {
    fn to_markdown(&self) -> String {
        if self.servers.is_empty() && self.modules.is_empty() {
            return "No JMS resources found.".to_string();
        }
        let mut lines = vec!["# JMS Resources".to_string(), String::new(), "## JMS Servers".to_string()];
        if self.servers.is_empty() {
            lines.push("- No JMS servers configured".to_string());
        }
        for server in &self.servers {
            lines.push(format!("- **{}** → {}", server.name, join_or(&server.targets, "No targets")));
        }
        lines.push(String::new());
        lines.push("## JMS Modules".to_string());
        if self.modules.is_empty() {
            lines.push("- No JMS modules configured".to_string());
        }
        for module in &self.modules {
            lines.push(format!("### {}", module.name));
            if !module.queues.is_empty() {
                lines.push("**Queues:**".to_string());
                lines.extend(module.queues.iter().map(destination_line));
            }
            if !module.topics.is_empty() {
                lines.push("**Topics:**".to_string());
                lines.extend(module.topics.iter().map(destination_line));
            }
            if module.queues.is_empty() && module.topics.is_empty() {
                lines.push("- No queues or topics".to_string());
            }
            lines.push(String::new());
        }
        lines.join("\n").trim_end().to_string()
    }
}

impl RenderMarkdown for OperationOutcome {
    fn to_markdown(&self) -> String {
        format!("✅ {}", self.message)
    }
}

impl RenderMarkdown for ScriptExecution {
    fn to_markdown(&self) -> String {
        let mut text = format!("# Script Executed\n\n- **Connected**: {}\n", if self.connected { "yes" } else { "no" });
        if let Some(code) = self.exit_code {
            text.push_str(&format!("- **Exit Code**: {code}\n"));
        }
        text.push_str(&format!("\n**STDOUT:**\n```\n{}\n```", self.stdout.trim_end()));
        if !self.stderr.trim().is_empty() {
            text.push_str(&format!("\n\n**STDERR:**\n```\n{}\n```", self.stderr.trim_end()));
        }
        text
    }
}
