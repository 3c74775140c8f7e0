use ops_agent::{invoke_guarded, RequestLogger, ToolDeps, ToolRegistry};
use ops_core::config::ConfigOverrides;
use ops_db::{connect_with_settings, migrations};
use serde_json::{Map, Value};

use crate::commands::{load_config, runtime, CommandResult};

pub fn run(name: &str, value: &str) -> CommandResult {
    let registry = ToolRegistry::with_default_tools();
    let Some(arguments) = tool_arguments(&registry, name, value) else {
        let known = registry.names().collect::<Vec<_>>().join(", ");
        return CommandResult::failure(
            "tool",
            "unknown_tool",
            format!("unknown tool `{name}` (available: {known})"),
            2,
        );
    };

    let config = match load_config("tool", ConfigOverrides::default()) {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match runtime("tool") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let deps = ToolDeps::sql(pool.clone(), RequestLogger::for_new_request());
        let output = invoke_guarded(&registry, &deps, name, arguments).await;
        pool.close().await;
        Ok::<String, (&'static str, String, u8)>(output)
    });

    match result {
        Ok(output) => CommandResult::success("tool", output),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("tool", error_class, message, exit_code)
        }
    }
}

/// `{ "<argument>": value }` for a registered tool, `None` for an unknown one.
fn tool_arguments(registry: &ToolRegistry, name: &str, value: &str) -> Option<Value> {
    let tool = registry.get(name)?;
    let mut arguments = Map::new();
    arguments.insert(tool.argument().to_string(), Value::String(value.to_string()));
    Some(Value::Object(arguments))
}
