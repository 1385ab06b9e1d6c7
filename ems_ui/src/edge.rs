//! Handle for the edge the UI is bound to.

use ems_common::{
    EdgeConfig, EdgeRpcRequest, Environment, GetEdgeConfigRequest, JsonrpcMethod, PropertyUpdate,
    UpdateComponentConfigRequest,
};
use serde_json::Value;

use crate::error::RequestError;
use crate::websocket::EdgeTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    /// Requests go through a backend and need the `edgeRpc` envelope.
    via_backend: bool,
}

impl Edge {
    pub fn new(id: impl Into<String>, environment: &Environment) -> Self {
        Self {
            id: id.into(),
            via_backend: environment.is_backend(),
        }
    }

    /// Sends one edge method and returns its result.
    pub async fn send_request<M: JsonrpcMethod>(
        &self,
        transport: &dyn EdgeTransport,
        method: M,
    ) -> Result<Value, RequestError> {
        let request = method.into_request(new_request_id())?;
        if !self.via_backend {
            return transport.send_request(request).await;
        }

        let wrapped = EdgeRpcRequest {
            edge_id: self.id.clone(),
            payload: request,
        }
        .into_request(new_request_id())?;
        let result = transport.send_request(wrapped).await?;
        Ok(EdgeRpcRequest::unwrap_result(result)??)
    }

    /// Applies all `properties` to the component in one request.
    pub async fn update_component_config(
        &self,
        transport: &dyn EdgeTransport,
        component_id: &str,
        properties: Vec<PropertyUpdate>,
    ) -> Result<(), RequestError> {
        self.send_request(
            transport,
            UpdateComponentConfigRequest {
                component_id: component_id.to_string(),
                properties,
            },
        )
        .await
        .map(|_| ())
    }

    pub async fn get_edge_config(&self, transport: &dyn EdgeTransport) -> Result<EdgeConfig, RequestError> {
        let result = self.send_request(transport, GetEdgeConfigRequest::default()).await?;
        Ok(serde_json::from_value(result)?)
    }
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
