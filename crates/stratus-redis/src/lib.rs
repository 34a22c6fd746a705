//! # stratus-redis
//!
//! Redis cache instance plugin for Stratus.
//!
//! | Action | Required fields | Backend call | Result token |
//! |--------|-----------------|--------------|--------------|
//! | `create` | `goods_num >= 1`, `password`, `billing_mode` in {0, 1} | `create_instances` | `deal_id` |
//! | `terminate` | `instance_id`, `password` | `clear_instance` | `task_id` |
//!
//! ## Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use stratus_core::process;
//! use stratus_redis::{DryRunProvisioner, RedisPlugin};
//!
//! let plugin = RedisPlugin::new(Arc::new(DryRunProvisioner::new()));
//! let outputs = process(&plugin, "create", &payload)?;
//! ```

pub mod actions;
pub mod dry_run;
pub mod plugin;
pub mod service;
pub mod types;

pub use actions::{CreatePolicy, RedisAction, TerminatePolicy};
pub use dry_run::DryRunProvisioner;
pub use plugin::{PLUGIN_NAME, RedisActionKind, RedisPlugin};
pub use service::{
    ClearInstanceRequest, ClearInstanceResponse, CreateInstancesRequest, CreateInstancesResponse,
    ProvisioningService, REDIS_ENDPOINT, ServiceError,
};
pub use types::{BillingMode, ProvisionToken, RedisInput, RedisInputs, RedisOutput, RedisOutputs};
