/// Validates the JSON produced for the edge methods used by the UI.
use ems_common::{
    ChpSocMode, EdgeRpcRequest, GetEdgeConfigRequest, JsonrpcMethod, PropertyUpdate, ThresholdRange,
    UpdateComponentConfigRequest,
};
use serde_json::{json, Value};

#[test]
fn test_update_mode_request_json_format() {
    let request = UpdateComponentConfigRequest {
        component_id: "ctrlChpSoc0".to_string(),
        properties: vec![PropertyUpdate::mode(ChpSocMode::ManualOn)],
    }
    .into_request("req-1")
    .unwrap();

    let value: Value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({
            "jsonrpc": "2.0",
            "id": "req-1",
            "method": "updateComponentConfig",
            "params": {
                "componentId": "ctrlChpSoc0",
                "properties": [{"name": "mode", "value": "MANUAL_ON"}]
            }
        })
    );
}

#[test]
fn test_update_thresholds_request_carries_both_fields() {
    let request = UpdateComponentConfigRequest {
        component_id: "ctrlChpSoc0".to_string(),
        properties: ThresholdRange::new(Some(15.0), None).to_updates(),
    }
    .into_request("req-2")
    .unwrap();

    let properties = &request.params["properties"];
    assert_eq!(properties.as_array().unwrap().len(), 2);
    assert_eq!(properties[0], json!({"name": "lowThreshold", "value": 15.0}));
    assert_eq!(properties[1], json!({"name": "highThreshold", "value": null}));

    // camelCase only
    assert!(request.params.get("component_id").is_none());
}

#[test]
fn test_edge_rpc_wraps_inner_request() {
    let inner = GetEdgeConfigRequest::default().into_request("inner").unwrap();
    let outer = EdgeRpcRequest {
        edge_id: "edge0".to_string(),
        payload: inner,
    }
    .into_request("outer")
    .unwrap();

    assert_eq!(outer.method, "edgeRpc");
    assert_eq!(outer.params["edgeId"], "edge0");
    assert_eq!(outer.params["payload"]["method"], "getEdgeConfig");
    assert_eq!(outer.params["payload"]["id"], "inner");
    assert_eq!(outer.params["payload"]["params"], json!({}));
}
