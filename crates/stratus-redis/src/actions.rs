//! The `create` and `terminate` actions.
//!
//! Both actions share the batch loop in [`BatchExecutor`]; they differ only in
//! their [`ActionPolicy`]: which fields are required, which backend call is
//! made, and which token ends up in the result.

use crate::service::{ClearInstanceRequest, CreateInstancesRequest, ProvisioningService};
use crate::types::{BillingMode, ProvisionToken, RedisInput, RedisInputs, RedisOutput, RedisOutputs};
use std::sync::Arc;
use stratus_core::{
    Action, ActionPolicy, BatchExecutor, BoxError, PluginError, ProviderParams, ValidationError,
    deserialize_input,
};

pub const CREATE: &str = "create";
pub const TERMINATE: &str = "terminate";

/// Buys new cache instances.
#[derive(Clone)]
pub struct CreatePolicy {
    service: Arc<dyn ProvisioningService>,
}

impl CreatePolicy {
    pub fn new(service: Arc<dyn ProvisioningService>) -> Self {
        Self { service }
    }
}

impl ActionPolicy for CreatePolicy {
    type Spec = RedisInput;
    type Outcome = RedisOutput;

    fn action(&self) -> &str {
        CREATE
    }

    fn guid<'a>(&self, spec: &'a RedisInput) -> &'a str {
        &spec.guid
    }

    fn resource_id(&self, spec: &RedisInput) -> String {
        if spec.guid.is_empty() {
            format!("zone:{}", spec.zone_id)
        } else {
            spec.guid.clone()
        }
    }

    fn validate(&self, spec: &RedisInput) -> Result<(), ValidationError> {
        if spec.goods_num < 1 {
            return Err(ValidationError::invalid_goods_num(CREATE, spec.goods_num));
        }
        if spec.password.is_empty() {
            return Err(ValidationError::empty_password(CREATE));
        }
        BillingMode::try_from(spec.billing_mode)
            .map_err(|mode| ValidationError::invalid_billing_mode(CREATE, mode))?;
        Ok(())
    }

    fn provision(&self, spec: &RedisInput) -> Result<RedisOutput, BoxError> {
        let credentials = ProviderParams::parse(&spec.provider_params)?.credentials()?;
        // run() validates the batch first, so this only fails when called directly
        let billing_mode = BillingMode::try_from(spec.billing_mode)
            .map_err(|mode| ValidationError::invalid_billing_mode(CREATE, mode))?;

        let request = CreateInstancesRequest {
            zone_id: spec.zone_id,
            type_id: spec.type_id,
            mem_size: spec.mem_size,
            goods_num: spec.goods_num,
            period: spec.period,
            password: spec.password.clone(),
            billing_mode,
            vpc_id: non_empty(&spec.vpc_id),
            subnet_id: non_empty(&spec.subnet_id),
        };

        let response = self.service.create_instances(&credentials, &request)?;

        tracing::info!(
            guid = %spec.guid,
            region = %credentials.region,
            request_id = %response.request_id,
            deal_id = %response.deal_id,
            "redis instances ordered"
        );

        Ok(RedisOutput {
            request_id: response.request_id,
            guid: spec.guid.clone(),
            token: ProvisionToken::DealId(response.deal_id),
        })
    }
}

/// Clears existing cache instances.
#[derive(Clone)]
pub struct TerminatePolicy {
    service: Arc<dyn ProvisioningService>,
}

impl TerminatePolicy {
    pub fn new(service: Arc<dyn ProvisioningService>) -> Self {
        Self { service }
    }
}

impl ActionPolicy for TerminatePolicy {
    type Spec = RedisInput;
    type Outcome = RedisOutput;

    fn action(&self) -> &str {
        TERMINATE
    }

    fn guid<'a>(&self, spec: &'a RedisInput) -> &'a str {
        &spec.guid
    }

    fn resource_id(&self, spec: &RedisInput) -> String {
        spec.instance_id.clone()
    }

    fn validate(&self, spec: &RedisInput) -> Result<(), ValidationError> {
        if spec.instance_id.is_empty() {
            return Err(ValidationError::empty_instance_id(TERMINATE));
        }
        if spec.password.is_empty() {
            return Err(ValidationError::empty_password(TERMINATE));
        }
        Ok(())
    }

    fn provision(&self, spec: &RedisInput) -> Result<RedisOutput, BoxError> {
        let credentials = ProviderParams::parse(&spec.provider_params)?.credentials()?;

        let request = ClearInstanceRequest {
            instance_id: spec.instance_id.clone(),
            password: spec.password.clone(),
        };

        let response = self.service.clear_instance(&credentials, &request)?;

        tracing::info!(
            guid = %spec.guid,
            instance_id = %spec.instance_id,
            request_id = %response.request_id,
            task_id = response.task_id,
            "redis instance clear started"
        );

        Ok(RedisOutput {
            request_id: response.request_id,
            guid: spec.guid.clone(),
            token: ProvisionToken::TaskId(response.task_id),
        })
    }
}

/// A resolved Redis action.
pub enum RedisAction {
    Create(BatchExecutor<CreatePolicy>),
    Terminate(BatchExecutor<TerminatePolicy>),
}

impl RedisAction {
    pub fn create(service: Arc<dyn ProvisioningService>) -> Self {
        RedisAction::Create(BatchExecutor::new(CreatePolicy::new(service)))
    }

    pub fn terminate(service: Arc<dyn ProvisioningService>) -> Self {
        RedisAction::Terminate(BatchExecutor::new(TerminatePolicy::new(service)))
    }
}

impl Action for RedisAction {
    type Input = RedisInputs;
    type Output = RedisOutputs;

    fn name(&self) -> &str {
        match self {
            RedisAction::Create(executor) => executor.policy().action(),
            RedisAction::Terminate(executor) => executor.policy().action(),
        }
    }

    fn read_param(&self, raw: &serde_json::Value) -> Result<RedisInputs, PluginError> {
        deserialize_input(raw)
    }

    fn check_param(&self, input: &RedisInputs) -> Result<(), PluginError> {
        match self {
            RedisAction::Create(executor) => executor.check(&input.inputs),
            RedisAction::Terminate(executor) => executor.check(&input.inputs),
        }
    }

    fn execute(&self, input: RedisInputs) -> Result<RedisOutputs, PluginError> {
        let outputs = match self {
            RedisAction::Create(executor) => executor.run(&input.inputs)?,
            RedisAction::Terminate(executor) => executor.run(&input.inputs)?,
        };
        Ok(RedisOutputs { outputs })
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
