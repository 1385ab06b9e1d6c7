//! JSON-RPC 2.0 envelopes and the edge methods used by the UI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{EdgeConfigComponent, PropertyUpdate};

pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonrpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: Value,
}

impl JsonrpcRequest {
    pub fn new(id: impl Into<String>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// Error object of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct JsonrpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonrpcResponseSuccess {
    pub id: String,
    pub result: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonrpcResponseError {
    pub id: String,
    pub error: JsonrpcError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonrpcNotification {
    pub method: String,
    pub params: Value,
}

/// Any message the server may push over the websocket.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonrpcMessage {
    Success(JsonrpcResponseSuccess),
    Error(JsonrpcResponseError),
    Notification(JsonrpcNotification),
}

#[derive(Debug, Error)]
pub enum JsonrpcParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a JSON-RPC message: {0}")]
    Unrecognized(String),
}

impl JsonrpcMessage {
    pub fn from_json(text: &str) -> Result<Self, JsonrpcParseError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn from_value(value: Value) -> Result<Self, JsonrpcParseError> {
        let Value::Object(mut obj) = value else {
            return Err(JsonrpcParseError::Unrecognized("expected an object".to_string()));
        };

        let id = obj.get("id").and_then(Value::as_str).map(str::to_string);
        match id {
            Some(id) => {
                if let Some(error) = obj.remove("error") {
                    let error = serde_json::from_value(error)?;
                    Ok(JsonrpcMessage::Error(JsonrpcResponseError { id, error }))
                } else if let Some(result) = obj.remove("result") {
                    Ok(JsonrpcMessage::Success(JsonrpcResponseSuccess { id, result }))
                } else {
                    Err(JsonrpcParseError::Unrecognized(format!("response '{}' has neither result nor error", id)))
                }
            }
            None => match obj.remove("method") {
                Some(Value::String(method)) => Ok(JsonrpcMessage::Notification(JsonrpcNotification {
                    method,
                    params: obj.remove("params").unwrap_or(Value::Object(Map::new())),
                })),
                _ => Err(JsonrpcParseError::Unrecognized("missing id and method".to_string())),
            },
        }
    }

    /// Collapses a response into its result, or the error the remote side returned.
    pub fn into_result(self) -> Option<Result<Value, JsonrpcError>> {
        match self {
            JsonrpcMessage::Success(s) => Some(Ok(s.result)),
            JsonrpcMessage::Error(e) => Some(Err(e.error)),
            JsonrpcMessage::Notification(_) => None,
        }
    }
}

/// Params type of a request method.
pub trait JsonrpcMethod: Serialize {
    const METHOD: &'static str;

    fn into_request(self, id: impl Into<String>) -> Result<JsonrpcRequest, serde_json::Error>
    where
        Self: Sized,
    {
        Ok(JsonrpcRequest::new(id, Self::METHOD, serde_json::to_value(&self)?))
    }
}

/// Updates properties of one component; the edge applies them all or none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComponentConfigRequest {
    pub component_id: String,
    pub properties: Vec<PropertyUpdate>,
}

impl JsonrpcMethod for UpdateComponentConfigRequest {
    const METHOD: &'static str = "updateComponentConfig";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetEdgeConfigRequest {}

impl JsonrpcMethod for GetEdgeConfigRequest {
    const METHOD: &'static str = "getEdgeConfig";
}

/// Wraps a request addressed to one edge when talking to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRpcRequest {
    pub edge_id: String,
    pub payload: JsonrpcRequest,
}

impl JsonrpcMethod for EdgeRpcRequest {
    const METHOD: &'static str = "edgeRpc";
}

impl EdgeRpcRequest {
    /// Extracts the inner response from an `edgeRpc` result (`{"payload": {...}}`).
    pub fn unwrap_result(result: Value) -> Result<Result<Value, JsonrpcError>, JsonrpcParseError> {
        let payload = match result {
            Value::Object(mut obj) => obj
                .remove("payload")
                .ok_or_else(|| JsonrpcParseError::Unrecognized("edgeRpc result without payload".to_string()))?,
            _ => return Err(JsonrpcParseError::Unrecognized("edgeRpc result is not an object".to_string())),
        };
        JsonrpcMessage::from_value(payload)?
            .into_result()
            .ok_or_else(|| JsonrpcParseError::Unrecognized("edgeRpc payload is a notification".to_string()))
    }
}

/// Result of `getEdgeConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    #[serde(default)]
    pub components: BTreeMap<String, EdgeConfigComponent>,
}

impl EdgeConfig {
    /// Components with their ids taken from the map keys.
    pub fn into_components(self) -> Vec<EdgeConfigComponent> {
        self.components
            .into_iter()
            .map(|(id, mut component)| {
                if component.alias.is_empty() {
                    component.alias = id.clone();
                }
                component.id = id;
                component
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_success_and_error() {
        let ok = JsonrpcMessage::from_json(r#"{"jsonrpc":"2.0","id":"a","result":{}}"#).unwrap();
        assert_eq!(ok.into_result(), Some(Ok(json!({}))));

        let err = JsonrpcMessage::from_json(
            r#"{"jsonrpc":"2.0","id":"b","error":{"code":1,"message":"device offline"}}"#,
        )
        .unwrap();
        match err {
            JsonrpcMessage::Error(e) => {
                assert_eq!(e.id, "b");
                assert_eq!(e.error.message, "device offline");
                assert_eq!(e.error.data, Value::Null);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_parse_null_result_is_success() {
        let msg = JsonrpcMessage::from_json(r#"{"jsonrpc":"2.0","id":"c","result":null}"#).unwrap();
        assert_eq!(msg.into_result(), Some(Ok(Value::Null)));
    }

    #[test]
    fn test_parse_notification() {
        let msg = JsonrpcMessage::from_json(r#"{"jsonrpc":"2.0","method":"edgeConfig","params":{"x":1}}"#).unwrap();
        assert_eq!(
            msg,
            JsonrpcMessage::Notification(JsonrpcNotification {
                method: "edgeConfig".to_string(),
                params: json!({"x": 1}),
            })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(JsonrpcMessage::from_json("[1,2]"), Err(JsonrpcParseError::Unrecognized(_))));
        assert!(matches!(JsonrpcMessage::from_json("{"), Err(JsonrpcParseError::Json(_))));
        assert!(JsonrpcMessage::from_json(r#"{"id":"x"}"#).is_err());
    }

    #[test]
    fn test_edge_rpc_unwraps_inner_error() {
        let result = json!({
            "payload": {"jsonrpc": "2.0", "id": "inner", "error": {"code": 3000, "message": "device offline"}}
        });
        let inner = EdgeRpcRequest::unwrap_result(result).unwrap();
        assert_eq!(inner.unwrap_err().message, "device offline");
    }

    #[test]
    fn test_edge_config_fills_ids() {
        let config: EdgeConfig = serde_json::from_value(json!({
            "components": {
                "ctrlChpSoc0": {"factoryId": "Controller.CHP.SoC", "properties": {"mode": "AUTOMATIC"}}
            }
        }))
        .unwrap();
        let components = config.into_components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].id, "ctrlChpSoc0");
        assert_eq!(components[0].alias, "ctrlChpSoc0");
        assert_eq!(components[0].factory_id, "Controller.CHP.SoC");
    }
}
