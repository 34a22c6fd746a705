//! The provisioning backend consumed by the Redis actions.
//!
//! [`ProvisioningService`] is the seam to the cloud vendor. An SDK-backed
//! implementation talks to [`REDIS_ENDPOINT`] in the region carried by the
//! [`Credentials`]; tests and dry runs plug in their own implementations.

use crate::types::BillingMode;
use std::fmt;
use stratus_core::Credentials;
use thiserror::Error;

/// Endpoint of the Redis cloud API.
pub const REDIS_ENDPOINT: &str = "redis.tencentcloudapi.com";

/// Purchase of one or more cache instances.
#[derive(Clone, PartialEq, Eq)]
pub struct CreateInstancesRequest {
    pub zone_id: i64,
    pub type_id: i64,
    pub mem_size: i64,
    pub goods_num: i64,
    pub period: i64,
    pub password: String,
    pub billing_mode: BillingMode,
    pub vpc_id: Option<String>,
    pub subnet_id: Option<String>,
}

impl fmt::Debug for CreateInstancesRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateInstancesRequest")
            .field("zone_id", &self.zone_id)
            .field("type_id", &self.type_id)
            .field("mem_size", &self.mem_size)
            .field("goods_num", &self.goods_num)
            .field("period", &self.period)
            .field("billing_mode", &self.billing_mode)
            .field("vpc_id", &self.vpc_id)
            .field("subnet_id", &self.subnet_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInstancesResponse {
    pub request_id: String,
    pub deal_id: String,
}

/// Wipe of an existing instance.
#[derive(Clone, PartialEq, Eq)]
pub struct ClearInstanceRequest {
    pub instance_id: String,
    pub password: String,
}

impl fmt::Debug for ClearInstanceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClearInstanceRequest")
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearInstanceResponse {
    pub request_id: String,
    pub task_id: i64,
}

/// Errors reported by a provisioning backend.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The cloud API rejected the call.
    #[error("cloud API error {code}: {message}")]
    Api {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// The call did not reach the cloud API or got no usable answer.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Cloud-side operations on Redis instances.
///
/// Calls block until the API answers.
pub trait ProvisioningService: Send + Sync {
    fn create_instances(
        &self,
        credentials: &Credentials,
        request: &CreateInstancesRequest,
    ) -> Result<CreateInstancesResponse, ServiceError>;

    fn clear_instance(
        &self,
        credentials: &Credentials,
        request: &ClearInstanceRequest,
    ) -> Result<ClearInstanceResponse, ServiceError>;
}
