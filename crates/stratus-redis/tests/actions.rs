//! Integration tests for the Redis plugin pipeline.
//!
//! A scripted `ProvisioningService` stands in for the cloud API, recording
//! every call and failing on request.
//!
//! Run with: cargo test --package stratus-redis --test actions

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use stratus_core::{Action, Credentials, Plugin, PluginError, process};
use stratus_redis::{
    ClearInstanceRequest, ClearInstanceResponse, CreateInstancesRequest, CreateInstancesResponse,
    ProvisionToken, ProvisioningService, RedisInput, RedisInputs, RedisPlugin, ServiceError,
};

const PARAMS: &str = "Region=ap-guangzhou;SecretID=AKID;SecretKey=secret";

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create {
        region: String,
        request: CreateInstancesRequest,
    },
    Clear {
        region: String,
        request: ClearInstanceRequest,
    },
}

/// Stub backend: answers `req-N` / `deal-N` / N for the N-th call (1-based)
/// and fails the call whose number is `fail_on`.
#[derive(Default)]
struct ScriptedService {
    fail_on: Option<usize>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedService {
    fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<usize, ServiceError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        let n = calls.len();
        if self.fail_on == Some(n) {
            return Err(ServiceError::Api {
                code: "ResourceInsufficient".to_string(),
                message: "sold out in zone".to_string(),
                request_id: Some(format!("req-{n}")),
            });
        }
        Ok(n)
    }
}

impl ProvisioningService for ScriptedService {
    fn create_instances(
        &self,
        credentials: &Credentials,
        request: &CreateInstancesRequest,
    ) -> Result<CreateInstancesResponse, ServiceError> {
        let n = self.record(Call::Create {
            region: credentials.region.clone(),
            request: request.clone(),
        })?;
        Ok(CreateInstancesResponse {
            request_id: format!("req-{n}"),
            deal_id: format!("deal-{n}"),
        })
    }

    fn clear_instance(
        &self,
        credentials: &Credentials,
        request: &ClearInstanceRequest,
    ) -> Result<ClearInstanceResponse, ServiceError> {
        let n = self.record(Call::Clear {
            region: credentials.region.clone(),
            request: request.clone(),
        })?;
        Ok(ClearInstanceResponse {
            request_id: format!("req-{n}"),
            task_id: n as i64,
        })
    }
}

fn plugin_with(service: &Arc<ScriptedService>) -> RedisPlugin {
    let service: Arc<dyn ProvisioningService> = service.clone();
    RedisPlugin::new(service)
}

fn create_item(guid: &str) -> Value {
    json!({
        "guid": guid,
        "provider_params": PARAMS,
        "zone_id": 100003,
        "type_id": 2,
        "mem_size": 1024,
        "goods_num": 1,
        "period": 1,
        "password": "p@ssw0rd",
        "billing_mode": 0
    })
}

#[test]
fn test_create_scenario_output() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);

    let payload = json!({"inputs": [{
        "guid": "g1",
        "provider_params": PARAMS,
        "goods_num": 1,
        "password": "p",
        "billing_mode": 0
    }]});

    let out = process(&plugin, "create", &payload).unwrap();
    assert_eq!(
        out,
        json!({"outputs": [{"request_id": "req-1", "guid": "g1", "deal_id": "deal-1"}]})
    );
}

#[test]
fn test_create_batch_preserves_order_and_guids() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);
    let action = plugin.action_by_name("create").unwrap();

    let guids = ["g1", "g2", "g3", "g4"];
    let payload = json!({"inputs": guids.iter().map(|g| create_item(g)).collect::<Vec<_>>()});

    let input = action.read_param(&payload).unwrap();
    action.check_param(&input).unwrap();
    let outputs = action.execute(input).unwrap().outputs;

    assert_eq!(outputs.len(), guids.len());
    for (i, (output, guid)) in outputs.iter().zip(guids).enumerate() {
        assert_eq!(output.guid, guid);
        assert_eq!(output.request_id, format!("req-{}", i + 1));
        assert_eq!(output.token, ProvisionToken::DealId(format!("deal-{}", i + 1)));
    }
}

#[test]
fn test_create_request_fields() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);

    let mut with_network = create_item("g1");
    with_network["vpc_id"] = json!("vpc-123");
    with_network["subnet_id"] = json!("subnet-456");
    with_network["billing_mode"] = json!(1);
    let payload = json!({"inputs": [with_network, create_item("g2")]});

    process(&plugin, "create", &payload).unwrap();

    let calls = service.calls();
    let Call::Create { region, request } = &calls[0] else {
        panic!("expected create call, got {:?}", calls[0]);
    };
    assert_eq!(region, "ap-guangzhou");
    assert_eq!(request.zone_id, 100003);
    assert_eq!(request.mem_size, 1024);
    assert_eq!(request.billing_mode, stratus_redis::BillingMode::Prepaid);
    assert_eq!(request.vpc_id.as_deref(), Some("vpc-123"));
    assert_eq!(request.subnet_id.as_deref(), Some("subnet-456"));

    let Call::Create { request, .. } = &calls[1] else {
        panic!("expected create call, got {:?}", calls[1]);
    };
    assert_eq!(request.vpc_id, None);
    assert_eq!(request.subnet_id, None);
}

#[test]
fn test_create_fails_fast_without_partial_result() {
    let service = Arc::new(ScriptedService::failing_on(2));
    let plugin = plugin_with(&service);

    let payload = json!({"inputs": [create_item("g1"), create_item("g2"), create_item("g3")]});
    let err = process(&plugin, "create", &payload).unwrap_err();

    match &err {
        PluginError::ProvisioningFailure { resource, guid, source } => {
            assert_eq!(resource, "g2");
            assert_eq!(guid, "g2");
            assert!(source.to_string().contains("ResourceInsufficient"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // the third item is never attempted
    assert_eq!(service.calls().len(), 2);
}

#[test]
fn test_validation_happens_before_any_call() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);

    let mut bad = create_item("g3");
    bad["password"] = json!("");
    let payload = json!({"inputs": [create_item("g1"), create_item("g2"), bad]});

    let err = process(&plugin, "create", &payload).unwrap_err();
    match err {
        PluginError::Validation(v) => {
            assert_eq!(v.index, Some(2));
            assert_eq!(v.guid.as_deref(), Some("g3"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(service.calls().is_empty());
}

#[test]
fn test_terminate_batch() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);

    let payload = json!({"inputs": [
        {"guid": "g1", "provider_params": PARAMS, "instance_id": "crs-aaa", "password": "p"},
        {"guid": "g2", "provider_params": "Region=ap-shanghai;SecretID=x;SecretKey=y", "instance_id": "crs-bbb", "password": "p"}
    ]});

    let out = process(&plugin, "terminate", &payload).unwrap();
    assert_eq!(
        out,
        json!({"outputs": [
            {"request_id": "req-1", "guid": "g1", "task_id": 1},
            {"request_id": "req-2", "guid": "g2", "task_id": 2}
        ]})
    );

    // credentials are resolved per item
    let regions: Vec<String> = service
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::Clear { region, .. } => region,
            Call::Create { .. } => panic!("unexpected create call"),
        })
        .collect();
    assert_eq!(regions, vec!["ap-guangzhou", "ap-shanghai"]);
}

#[test]
fn test_terminate_failure_names_instance() {
    let service = Arc::new(ScriptedService::failing_on(1));
    let plugin = plugin_with(&service);

    let payload = json!({"inputs": [
        {"guid": "g1", "provider_params": PARAMS, "instance_id": "crs-aaa", "password": "p"}
    ]});

    let err = process(&plugin, "terminate", &payload).unwrap_err();
    assert!(matches!(err, PluginError::ProvisioningFailure { ref resource, .. } if resource == "crs-aaa"));
}

#[test]
fn test_terminate_check_rejects_missing_instance() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);

    let payload = json!({"inputs": [{"guid": "g1", "provider_params": PARAMS, "password": "p"}]});
    let err = process(&plugin, "terminate", &payload).unwrap_err();
    assert_eq!(err.category(), "validation_error");
    assert!(service.calls().is_empty());
}

#[test]
fn test_unknown_action() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);

    let err = process(&plugin, "resize", &json!({"inputs": []})).unwrap_err();
    assert!(matches!(err, PluginError::ActionNotFound { ref name, .. } if name == "resize"));
}

#[test]
fn test_malformed_payload() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);
    let action = plugin.action_by_name("create").unwrap();

    let err = action
        .read_param(&json!({"inputs": [{"guid": "g1", "goods_num": "one"}]}))
        .unwrap_err();
    assert!(matches!(err, PluginError::MalformedInput(_)));

    let err = action.read_param(&json!({"inputs": {"guid": "g1"}})).unwrap_err();
    assert!(matches!(err, PluginError::MalformedInput(_)));

    let err = action.read_param(&json!([])).unwrap_err();
    assert!(matches!(err, PluginError::MalformedInput(_)));
}

#[test]
fn test_array_payload_never_reaches_backend() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);

    let payload = json!([[{
        "guid": "g1",
        "provider_params": PARAMS,
        "instance_id": "crs-1",
        "password": "p"
    }]]);
    let err = process(&plugin, "terminate", &payload).unwrap_err();
    assert!(matches!(err, PluginError::MalformedInput(_)));

    let err = process(&plugin, "create", &json!([])).unwrap_err();
    assert!(matches!(err, PluginError::MalformedInput(_)));
    assert!(service.calls().is_empty());
}

#[test]
fn test_read_param_round_trip() {
    let service = Arc::new(ScriptedService::default());
    let plugin = plugin_with(&service);
    let action = plugin.action_by_name("terminate").unwrap();

    let batch = RedisInputs {
        inputs: vec![
            RedisInput {
                guid: "g1".to_string(),
                provider_params: PARAMS.to_string(),
                zone_id: 100003,
                type_id: 8,
                mem_size: 4096,
                goods_num: 3,
                period: 12,
                password: "p".to_string(),
                billing_mode: 1,
                vpc_id: "vpc-1".to_string(),
                subnet_id: "subnet-1".to_string(),
                instance_id: "crs-1".to_string(),
            },
            RedisInput {
                guid: "g1".to_string(),
                instance_id: "crs-2".to_string(),
                ..Default::default()
            },
        ],
    };

    let text = serde_json::to_string(&batch).unwrap();
    assert_eq!(action.read_param_str(&text).unwrap(), batch);
}
