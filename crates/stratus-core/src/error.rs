//! Error types shared by every Stratus plugin.
//!
//! [`PluginError`] is what each stage of an action returns. Business rule
//! violations found by `check_param` are carried as a [`ValidationError`],
//! which records the kind of violation and the offending batch item.

use std::fmt;
use thiserror::Error;

/// Boxed error returned by a provisioning collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving or running a plugin action.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The raw payload does not have the shape the action expects.
    #[error("malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// A resource spec violates a business rule.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No action is registered under this name.
    #[error("{plugin} plugin: action '{name}' not found")]
    ActionNotFound { plugin: String, name: String },

    /// The per-item provider parameter bundle could not be used.
    #[error("invalid provider params: {0}")]
    InvalidProviderParams(String),

    /// The provisioning collaborator failed for one resource.
    #[error("provisioning failed for resource '{resource}' (guid: {guid}): {source}")]
    ProvisioningFailure {
        resource: String,
        guid: String,
        #[source]
        source: BoxError,
    },

    /// The action output could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl PluginError {
    /// Wrap a collaborator failure with the resource it was acting on.
    pub fn provisioning(
        resource: impl Into<String>,
        guid: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::ProvisioningFailure {
            resource: resource.into(),
            guid: guid.into(),
            source: source.into(),
        }
    }

    /// Short machine-readable name of the error category.
    pub fn category(&self) -> &'static str {
        match self {
            PluginError::MalformedInput(_) => "malformed_input",
            PluginError::Validation(_) => "validation_error",
            PluginError::ActionNotFound { .. } => "action_not_found",
            PluginError::InvalidProviderParams(_) => "invalid_provider_params",
            PluginError::ProvisioningFailure { .. } => "provisioning_failure",
            PluginError::Serialization(_) => "serialization_error",
        }
    }
}

/// A business rule violation in one item of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The kind of violation.
    pub kind: ValidationErrorKind,
    /// Position of the offending item in the batch.
    pub index: Option<usize>,
    /// Correlation identifier of the offending item.
    pub guid: Option<String>,
    /// Human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error not yet tied to a batch item.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            index: None,
            guid: None,
            message: message.into(),
        }
    }

    /// Attach the position and guid of the offending item.
    pub fn at(mut self, index: usize, guid: &str) -> Self {
        self.index = Some(index);
        if !guid.is_empty() {
            self.guid = Some(guid.to_string());
        }
        self
    }

    /// Create an invalid instance count error.
    pub fn invalid_goods_num(action: &str, goods_num: i64) -> Self {
        Self::new(
            ValidationErrorKind::InvalidGoodsNum,
            format!("{action}: goods_num {goods_num} is invalid, at least 1 instance is required"),
        )
    }

    /// Create an empty password error.
    pub fn empty_password(action: &str) -> Self {
        Self::new(
            ValidationErrorKind::EmptyPassword,
            format!("{action}: password is empty"),
        )
    }

    /// Create an invalid billing mode error.
    pub fn invalid_billing_mode(action: &str, billing_mode: i64) -> Self {
        Self::new(
            ValidationErrorKind::InvalidBillingMode,
            format!(
                "{action}: billing_mode {billing_mode} is invalid, expected 0 (postpaid) or 1 (prepaid)"
            ),
        )
    }

    /// Create an empty instance id error.
    pub fn empty_instance_id(action: &str) -> Self {
        Self::new(
            ValidationErrorKind::EmptyInstanceId,
            format!("{action}: instance_id is empty"),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        match (self.index, &self.guid) {
            (Some(index), Some(guid)) => write!(f, " (input #{index}, guid: {guid})"),
            (Some(index), None) => write!(f, " (input #{index})"),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Instance count is below one.
    InvalidGoodsNum,
    /// Access password is empty.
    EmptyPassword,
    /// Billing mode is neither postpaid nor prepaid.
    InvalidBillingMode,
    /// Destructive action without a target instance.
    EmptyInstanceId,
}
