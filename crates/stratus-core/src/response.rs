//! Response envelope returned to the orchestrator.

use crate::error::PluginError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESULT_CODE_SUCCESS: &str = "0";
pub const RESULT_CODE_ERROR: &str = "1";

/// Uniform wrapper around an action's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginResponse {
    pub result_code: String,
    pub result_message: String,
    #[serde(default)]
    pub results: Value,
}

impl PluginResponse {
    pub fn success(results: Value) -> Self {
        Self {
            result_code: RESULT_CODE_SUCCESS.to_string(),
            result_message: "success".to_string(),
            results,
        }
    }

    pub fn error(err: &PluginError) -> Self {
        Self {
            result_code: RESULT_CODE_ERROR.to_string(),
            result_message: err.to_string(),
            results: Value::Null,
        }
    }

    /// Build the envelope from the result of [`crate::process`].
    pub fn from_result(result: &Result<Value, PluginError>) -> Self {
        match result {
            Ok(results) => Self::success(results.clone()),
            Err(err) => Self::error(err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result_code == RESULT_CODE_SUCCESS
    }
}
