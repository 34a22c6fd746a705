use crate::config::OutputConfig;
use anyhow::Context;
use serde::Serialize;
use serde_json::{Value, json};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use stratus_core::{Action, Plugin, PluginResponse, process};
use stratus_redis::{DryRunProvisioner, ProvisioningService, RedisPlugin};

fn dry_run_plugin() -> RedisPlugin {
    let service: Arc<dyn ProvisioningService> = Arc::new(DryRunProvisioner::new());
    RedisPlugin::new(service)
}

/// Read a JSON payload from a file, or from stdin when `path` is `-`.
pub fn read_payload(path: &Path) -> anyhow::Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read payload from {}", path.display()))?
    };

    serde_json::from_str(&text).context("payload is not valid JSON")
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

pub fn run_actions(output: &OutputConfig) -> anyhow::Result<()> {
    let plugin = dry_run_plugin();
    print_json(
        &json!({ "plugin": plugin.name(), "actions": plugin.action_names() }),
        output.pretty,
    )
}

/// Read and validate a payload without provisioning anything.
pub fn run_check(action_name: &str, input: &Path, output: &OutputConfig) -> anyhow::Result<()> {
    let payload = read_payload(input)?;
    let plugin = dry_run_plugin();
    let action = plugin.action_by_name(action_name)?;

    let batch = action.read_param(&payload)?;
    action.check_param(&batch)?;

    tracing::info!(action = %action_name, count = batch.inputs.len(), "payload is valid");
    print_json(
        &json!({ "action": action_name, "valid": true, "count": batch.inputs.len() }),
        output.pretty,
    )
}

/// Run the full pipeline against the dry-run provisioner.
pub fn run_dry_run(action_name: &str, input: &Path, output: &OutputConfig) -> anyhow::Result<()> {
    let payload = read_payload(input)?;
    let plugin = dry_run_plugin();
    let result = process(&plugin, action_name, &payload);

    if output.envelope {
        let response = PluginResponse::from_result(&result);
        print_json(&response, output.pretty)?;
        if !response.is_success() {
            anyhow::bail!("{action_name} failed: {}", response.result_message);
        }
        return Ok(());
    }

    print_json(&result?, output.pretty)
}
