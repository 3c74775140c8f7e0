use std::env;
use std::fs;
use std::path::Path;

use ops_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

/// One reported setting: dotted key, rendered value, env vars that can set it.
struct Field {
    key: &'static str,
    value: String,
    env_keys: &'static [&'static str],
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in fields(&config) {
        let source = field_source(
            field.key,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key, &field.value, source));
    }

    lines.join("\n")
}

fn fields(config: &AppConfig) -> Vec<Field> {
    vec![
        Field {
            key: "database.url",
            value: redact_url_credentials(&config.database.url),
            env_keys: &["OPS_AGENT_DATABASE_URL"],
        },
        Field {
            key: "database.max_connections",
            value: config.database.max_connections.to_string(),
            env_keys: &["OPS_AGENT_DATABASE_MAX_CONNECTIONS"],
        },
        Field {
            key: "database.timeout_secs",
            value: config.database.timeout_secs.to_string(),
            env_keys: &["OPS_AGENT_DATABASE_TIMEOUT_SECS"],
        },
        Field {
            key: "seed.data_dir",
            value: config.seed.data_dir.display().to_string(),
            env_keys: &["OPS_AGENT_SEED_DATA_DIR"],
        },
        Field {
            key: "seed.on_startup",
            value: config.seed.on_startup.to_string(),
            env_keys: &["OPS_AGENT_SEED_ON_STARTUP"],
        },
        Field {
            key: "server.bind_address",
            value: config.server.bind_address.clone(),
            env_keys: &["OPS_AGENT_SERVER_BIND_ADDRESS"],
        },
        Field {
            key: "server.port",
            value: config.server.port.to_string(),
            env_keys: &["OPS_AGENT_SERVER_PORT"],
        },
        Field {
            key: "server.graceful_shutdown_secs",
            value: config.server.graceful_shutdown_secs.to_string(),
            env_keys: &["OPS_AGENT_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        },
        Field {
            key: "logging.level",
            value: config.logging.level.clone(),
            env_keys: &["OPS_AGENT_LOGGING_LEVEL", "OPS_AGENT_LOG_LEVEL"],
        },
        Field {
            key: "logging.format",
            value: format!("{:?}", config.logging.format),
            env_keys: &["OPS_AGENT_LOGGING_FORMAT", "OPS_AGENT_LOG_FORMAT"],
        },
    ]
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Masks `user:password@` in database URLs; sqlite paths pass through.
fn redact_url_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{contains_path, field_source, redact_url_credentials};

    #[test]
    fn file_source_is_reported_when_key_is_present() {
        let doc: toml::Value = "[seed]\ndata_dir = \"fixtures\"\n".parse().expect("toml");

        assert!(contains_path(&doc, "seed.data_dir"));
        assert!(!contains_path(&doc, "seed.on_startup"));
        assert_eq!(
            field_source(
                "seed.data_dir",
                &["OPS_AGENT_TEST_UNSET_KEY"],
                Some(&doc),
                Some(std::path::Path::new("ops-agent.toml")),
            ),
            "file (ops-agent.toml)"
        );
        assert_eq!(
            field_source("seed.on_startup", &["OPS_AGENT_TEST_UNSET_KEY"], Some(&doc), None),
            "default"
        );
    }

    #[test]
    fn credentials_are_masked_in_urls() {
        assert_eq!(redact_url_credentials("sqlite://ops.db?mode=rwc"), "sqlite://ops.db?mode=rwc");
        assert_eq!(redact_url_credentials("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(redact_url_credentials("sqlite://admin:pw@host/ops"), "sqlite://***@host/ops");
    }
}
