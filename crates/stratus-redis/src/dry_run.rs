//! A provisioning backend that never leaves the process.

use crate::service::{
    ClearInstanceRequest, ClearInstanceResponse, CreateInstancesRequest, CreateInstancesResponse,
    ProvisioningService, ServiceError,
};
use std::sync::atomic::{AtomicI64, Ordering};
use stratus_core::Credentials;
use uuid::Uuid;

/// Answers every call with synthetic identifiers.
///
/// Request ids are random UUIDs; deal ids (`deal-1`, `deal-2`, ...) and task
/// ids count up from 1 in call order.
#[derive(Debug, Default)]
pub struct DryRunProvisioner {
    deals: AtomicI64,
    tasks: AtomicI64,
}

impl DryRunProvisioner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProvisioningService for DryRunProvisioner {
    fn create_instances(
        &self,
        credentials: &Credentials,
        request: &CreateInstancesRequest,
    ) -> Result<CreateInstancesResponse, ServiceError> {
        let deal = self.deals.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            region = %credentials.region,
            zone_id = request.zone_id,
            goods_num = request.goods_num,
            "dry run: would create redis instances"
        );

        Ok(CreateInstancesResponse {
            request_id: Uuid::new_v4().to_string(),
            deal_id: format!("deal-{deal}"),
        })
    }

    fn clear_instance(
        &self,
        credentials: &Credentials,
        request: &ClearInstanceRequest,
    ) -> Result<ClearInstanceResponse, ServiceError> {
        let task_id = self.tasks.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            region = %credentials.region,
            instance_id = %request.instance_id,
            "dry run: would clear redis instance"
        );

        Ok(ClearInstanceResponse {
            request_id: Uuid::new_v4().to_string(),
            task_id,
        })
    }
}
