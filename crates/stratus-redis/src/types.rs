//! Wire types for the Redis plugin.
//!
//! Missing input fields take their zero value, and zero values are left out
//! when serializing, so payloads only carry the fields an action needs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Batch of requested cache instances, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisInputs {
    #[serde(default)]
    pub inputs: Vec<RedisInput>,
}

/// One requested cache instance.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisInput {
    /// Correlation identifier, echoed in the result.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,
    /// Raw `key=value;...` region and credential bundle.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider_params: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub zone_id: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub type_id: i64,
    /// Capacity in MB.
    #[serde(skip_serializing_if = "is_zero")]
    pub mem_size: i64,
    /// Number of instances to create.
    #[serde(skip_serializing_if = "is_zero")]
    pub goods_num: i64,
    /// Prepaid duration in months.
    #[serde(skip_serializing_if = "is_zero")]
    pub period: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Raw billing mode, see [`BillingMode`].
    #[serde(skip_serializing_if = "is_zero")]
    pub billing_mode: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vpc_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,
    /// Existing instance, required by destructive actions.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance_id: String,
}

impl fmt::Debug for RedisInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisInput")
            .field("guid", &self.guid)
            .field("zone_id", &self.zone_id)
            .field("type_id", &self.type_id)
            .field("mem_size", &self.mem_size)
            .field("goods_num", &self.goods_num)
            .field("period", &self.period)
            .field("billing_mode", &self.billing_mode)
            .field("vpc_id", &self.vpc_id)
            .field("subnet_id", &self.subnet_id)
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// How an instance is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    Postpaid = 0,
    Prepaid = 1,
}

impl BillingMode {
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for BillingMode {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BillingMode::Postpaid),
            1 => Ok(BillingMode::Prepaid),
            other => Err(other),
        }
    }
}

/// Results of one invocation, index-aligned with the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisOutputs {
    #[serde(default)]
    pub outputs: Vec<RedisOutput>,
}

/// Outcome for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisOutput {
    /// Request identifier assigned by the cloud API.
    pub request_id: String,
    pub guid: String,
    #[serde(flatten)]
    pub token: ProvisionToken,
}

/// Action specific token returned by the cloud API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionToken {
    /// Order created by an instance purchase.
    DealId(String),
    /// Asynchronous task started by an instance clear.
    TaskId(i64),
}
