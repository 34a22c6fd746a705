//! The action contract and the plugin facade.
//!
//! Every action runs in three stages, always in this order:
//!
//! 1. [`Action::read_param`] - deserialize the untyped payload
//! 2. [`Action::check_param`] - validate business rules, no side effects
//! 3. [`Action::execute`] - provision, the only stage touching the cloud
//!
//! A [`Plugin`] resolves action names to actions. [`process`] and
//! [`run_action`] drive the stages for a caller that only holds a name and a
//! JSON payload.

use crate::error::PluginError;
use serde::Serialize;
use serde::de::{DeserializeOwned, Unexpected};
use serde_json::Value;

/// A named, three-stage unit of provisioning logic.
pub trait Action: Send + Sync {
    /// Typed input produced by `read_param`.
    type Input;
    /// Typed output produced by `execute`.
    type Output: Serialize;

    /// Name the action is registered under.
    fn name(&self) -> &str;

    /// Deserialize an untyped payload. Never returns a partially filled input.
    fn read_param(&self, raw: &Value) -> Result<Self::Input, PluginError>;

    /// Validate every item of the input, reporting the first violation.
    fn check_param(&self, input: &Self::Input) -> Result<(), PluginError>;

    /// Run the action against the provisioning backend.
    fn execute(&self, input: Self::Input) -> Result<Self::Output, PluginError>;

    /// Deserialize a payload given as raw JSON text.
    fn read_param_str(&self, raw: &str) -> Result<Self::Input, PluginError> {
        let value: Value = serde_json::from_str(raw).map_err(PluginError::MalformedInput)?;
        self.read_param(&value)
    }
}

/// Resolves action names to actions for one resource kind.
pub trait Plugin {
    type Action: Action;

    /// Name of the plugin (the resource kind it manages).
    fn name(&self) -> &str;

    /// Names of every registered action.
    fn action_names(&self) -> Vec<&'static str>;

    /// Look up an action, failing with [`PluginError::ActionNotFound`].
    fn action_by_name(&self, name: &str) -> Result<Self::Action, PluginError>;
}

/// Deserialize a payload into `T`, mapping shape errors to `MalformedInput`.
///
/// The payload must be a JSON object; serde would otherwise accept an array
/// as a positional struct. `serde` builds the value all-or-nothing, so a
/// failure never leaves a partially populated result behind.
pub fn deserialize_input<T: DeserializeOwned>(raw: &Value) -> Result<T, PluginError> {
    if !raw.is_object() {
        let unexpected = match raw {
            Value::Null => Unexpected::Unit,
            Value::Bool(b) => Unexpected::Bool(*b),
            Value::Number(_) => Unexpected::Other("number"),
            Value::String(s) => Unexpected::Str(s),
            _ => Unexpected::Seq,
        };
        return Err(PluginError::MalformedInput(serde::de::Error::invalid_type(
            unexpected,
            &"a JSON object",
        )));
    }

    T::deserialize(raw).map_err(PluginError::MalformedInput)
}

/// Run the three stages of `action` on a raw payload.
pub fn run_action<A: Action>(action: &A, raw: &Value) -> Result<Value, PluginError> {
    let input = action.read_param(raw)?;
    action.check_param(&input)?;

    tracing::debug!(action = %action.name(), "parameters accepted");

    let output = action.execute(input)?;
    serde_json::to_value(&output).map_err(PluginError::Serialization)
}

/// Resolve `action_name` on `plugin` and run it on a raw payload.
pub fn process<P: Plugin>(plugin: &P, action_name: &str, raw: &Value) -> Result<Value, PluginError> {
    let action = plugin.action_by_name(action_name).inspect_err(|e| {
        tracing::warn!(plugin = %plugin.name(), action = %action_name, error = %e, "unknown action");
    })?;

    tracing::info!(plugin = %plugin.name(), action = %action_name, "processing request");

    run_action(&action, raw).inspect_err(|e| {
        tracing::error!(
            plugin = %plugin.name(),
            action = %action_name,
            category = e.category(),
            error = %e,
            "request failed"
        );
    })
}
