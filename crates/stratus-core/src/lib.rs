//! # stratus-core
//!
//! The action plugin pattern shared by every Stratus provisioning plugin.
//!
//! ## Architecture
//!
//! ```text
//! orchestrator
//!       │ plugin name + action name + JSON payload
//!       ▼
//! ┌──────────────────────┐
//! │ Plugin::action_by_name│  ← read-only action registry
//! │ Action::read_param    │  ← deserialize (MalformedInput)
//! │ Action::check_param   │  ← validate every item (Validation)
//! │ Action::execute       │  ← BatchExecutor + ActionPolicy
//! └──────────┬───────────┘
//!            │ one call per item, in order, fail-fast
//!            ▼
//!     provisioning service
//! ```
//!
//! Concrete plugins implement [`Action`] and [`Plugin`] and put their
//! per-resource logic in an [`ActionPolicy`].

pub mod action;
pub mod batch;
pub mod error;
pub mod provider_params;
pub mod response;

pub use action::{Action, Plugin, deserialize_input, process, run_action};
pub use batch::{ActionPolicy, BatchExecutor};
pub use error::{BoxError, PluginError, ValidationError, ValidationErrorKind};
pub use provider_params::{Credentials, ProviderParams};
pub use response::PluginResponse;
