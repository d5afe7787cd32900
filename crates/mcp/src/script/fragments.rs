//! Reusable pieces of every generated script.

use std::fmt::Write as _;

use super::markers::CONNECTION_ERROR;
use crate::config::ConnectionParameters;

/// Helpers available to every managed script. `text` keeps `None` as JSON
/// `null` instead of the string `'None'`.
const PRELUDE: &str = "import json


def text(value):
    if value is None:
        return None
    return str(value)
";

const DISCONNECT: &str = "try:
    disconnect()
except:
    pass
";

/// Render a value as a Jython single-quoted string literal.
///
/// Quotes, backslashes and control characters are escaped; non-ASCII input
/// switches to a `u'...'` literal with `\u` escapes so the script file stays
/// pure ASCII.
pub fn py_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    let mut unicode = false;
    for ch in value.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            ch if ch.is_ascii_control() => {
                let _ = write!(literal, "\\x{:02x}", ch as u32);
            }
            ch if ch.is_ascii() => literal.push(ch),
            ch => {
                unicode = true;
                let code = ch as u32;
                if code > 0xFFFF {
                    let _ = write!(literal, "\\U{code:08x}");
                } else {
                    let _ = write!(literal, "\\u{code:04x}");
                }
            }
        }
    }
    if unicode { format!("u'{literal}'") } else { format!("'{literal}'") }
}

/// Render a list of strings as a Jython list literal.
pub fn py_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|value| py_literal(value)).collect();
    format!("[{}]", items.join(", "))
}

/// Connect fragment; prints `CONNECTION_ERROR` and exits non-zero on failure.
pub fn connect_block(connection: &ConnectionParameters) -> String {
    format!(
        "try:\n    connect({}, {}, {})\nexcept Exception as e:\n    print('{CONNECTION_ERROR}: ' + str(e))\n    exit(exitcode=1)\n",
        py_literal(&connection.username),
        py_literal(&connection.password),
        py_literal(&connection.admin_url),
    )
}

/// Assemble a managed operation script around `body`.
pub fn managed_script(connection: &ConnectionParameters, body: &str) -> String {
    format!("{PRELUDE}\n{}\n{body}\n{DISCONNECT}", connect_block(connection))
}

/// Wrap a caller-supplied script between connect and disconnect, unmodified.
pub fn connected_custom_script(connection: &ConnectionParameters, script: &str) -> String {
    format!(
        "{}\n# caller script begins\n{script}\n# caller script ends\n\n{DISCONNECT}",
        connect_block(connection)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn literal_escapes_quotes_and_backslashes() {
        assert_eq!(py_literal("plain"), "'plain'");
        assert_eq!(py_literal("it's"), r"'it\'s'");
        assert_eq!(py_literal(r"C:\apps\shop.war"), r"'C:\\apps\\shop.war'");
        assert_eq!(py_literal("a\nb"), r"'a\nb'");
        assert_eq!(py_literal("bell\u{7}"), r"'bell\x07'");
    }

    #[test]
    fn literal_cannot_break_out_of_string() {
        let hostile = "ms1'); import os; os.system('rm -rf /'); ('";
        let literal = py_literal(hostile);
        let inner = &literal[1..literal.len() - 1];
        let unescaped_quotes = inner
            .char_indices()
            .filter(|(index, ch)| *ch == '\'' && !inner[..*index].ends_with('\\'))
            .count();
        assert_eq!(unescaped_quotes, 0);
    }

    #[test]
    fn non_ascii_uses_unicode_literal() {
        assert_eq!(py_literal("café"), r"u'caf\u00e9'");
        assert_eq!(py_literal("🟢"), r"u'\U0001f7e2'");
    }

    #[test]
    fn list_literal() {
        assert_eq!(py_list(&["a".to_string(), "b'c".to_string()]), r"['a', 'b\'c']");
        assert_eq!(py_list(&[]), "[]");
    }

    #[test]
    fn connect_block_embeds_escaped_credentials() {
        let connection = ConnectionParameters {
            admin_url: "t3://localhost:7001".to_string(),
            username: "weblogic".to_string(),
            password: "pa'ss".to_string(),
            timeout: Duration::from_secs(60),
        };
        let block = connect_block(&connection);
        assert!(block.contains(r"connect('weblogic', 'pa\'ss', 't3://localhost:7001')"));
        assert!(block.contains("print('CONNECTION_ERROR: ' + str(e))"));
    }
}
