//! Redis plugin facade and its action registry.

use crate::actions::{CREATE, RedisAction, TERMINATE};
use crate::service::ProvisioningService;
use std::fmt;
use std::sync::Arc;
use stratus_core::{Plugin, PluginError};

pub const PLUGIN_NAME: &str = "redis";

/// The closed set of Redis actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedisActionKind {
    Create,
    Terminate,
}

impl RedisActionKind {
    /// Registry of every action, in listing order.
    pub const ALL: [RedisActionKind; 2] = [RedisActionKind::Create, RedisActionKind::Terminate];

    pub fn name(self) -> &'static str {
        match self {
            RedisActionKind::Create => CREATE,
            RedisActionKind::Terminate => TERMINATE,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for RedisActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves Redis action names against a provisioning backend.
#[derive(Clone)]
pub struct RedisPlugin {
    service: Arc<dyn ProvisioningService>,
}

impl RedisPlugin {
    pub fn new(service: Arc<dyn ProvisioningService>) -> Self {
        Self { service }
    }

    /// Build the action for a known kind.
    pub fn action(&self, kind: RedisActionKind) -> RedisAction {
        match kind {
            RedisActionKind::Create => RedisAction::create(Arc::clone(&self.service)),
            RedisActionKind::Terminate => RedisAction::terminate(Arc::clone(&self.service)),
        }
    }
}

impl Plugin for RedisPlugin {
    type Action = RedisAction;

    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn action_names(&self) -> Vec<&'static str> {
        RedisActionKind::ALL.iter().map(|kind| kind.name()).collect()
    }

    fn action_by_name(&self, name: &str) -> Result<RedisAction, PluginError> {
        RedisActionKind::from_name(name)
            .map(|kind| self.action(kind))
            .ok_or_else(|| PluginError::ActionNotFound {
                plugin: PLUGIN_NAME.to_string(),
                name: name.to_string(),
            })
    }
}
