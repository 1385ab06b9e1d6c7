use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ems_common::{JsonrpcMessage, JsonrpcRequest};
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, MessageEvent, WebSocket};

use crate::error::RequestError;

pub type RequestFuture = LocalBoxFuture<'static, Result<Value, RequestError>>;

/// Sends JSON-RPC requests and resolves with the matching response.
///
/// A response carrying a JSON-RPC error resolves to [`RequestError::Rejected`].
pub trait EdgeTransport {
    fn send_request(&self, request: JsonrpcRequest) -> RequestFuture;
}

type PendingRequests = Rc<RefCell<HashMap<String, oneshot::Sender<Result<Value, RequestError>>>>>;

// ========== Edge Websocket ==========

#[derive(Clone, Copy)]
pub struct EdgeWebsocket {
    pub connected: ReadSignal<bool>,
    set_connected: WriteSignal<bool>,
    ws: StoredValue<Option<WebSocket>, LocalStorage>,
    ws_url: StoredValue<String>,
    /// Requests awaiting a response, keyed by JSON-RPC id
    pending: StoredValue<PendingRequests, LocalStorage>,
}

impl EdgeWebsocket {
    pub fn new(url: &str) -> Self {
        let (connected, set_connected) = signal(false);

        let manager = Self {
            connected,
            set_connected,
            ws: StoredValue::new_local(None),
            ws_url: StoredValue::new(url.to_string()),
            pending: StoredValue::new_local(Rc::new(RefCell::new(HashMap::new()))),
        };

        manager.connect();
        manager
    }

    fn connect(&self) {
        let url = self.ws_url.get_value();
        let ws = match WebSocket::new(&url) {
            Ok(ws) => ws,
            Err(e) => {
                log::error!("Failed to create WebSocket: {:?}", e);
                return;
            }
        };

        let set_connected = self.set_connected;
        let pending = self.pending.get_value();

        // On open
        let onopen_callback = Closure::wrap(Box::new(move |_| {
            set_connected.set(true);
            log::info!("WebSocket connected");
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
        onopen_callback.forget();

        // On message - JSON-RPC text frames only
        let pending_message = pending.clone();
        let onmessage_callback = Closure::wrap(Box::new(move |e: MessageEvent| {
            match e.data().as_string() {
                Some(text) => dispatch(&pending_message, &text),
                None => log::warn!("Ignoring non-text websocket frame"),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
        onmessage_callback.forget();

        // On error
        let onerror_callback = Closure::wrap(Box::new(move |e: ErrorEvent| {
            log::error!("WebSocket error: {:?}", e.message());
        }) as Box<dyn FnMut(ErrorEvent)>);
        ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));
        onerror_callback.forget();

        // On close - every request still in flight fails
        let pending_close = pending;
        let onclose_callback = Closure::wrap(Box::new(move |e: web_sys::CloseEvent| {
            log::warn!("WebSocket closed: code={}, reason={}", e.code(), e.reason());
            set_connected.set(false);
            fail_all(&pending_close);
        }) as Box<dyn FnMut(web_sys::CloseEvent)>);
        ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
        onclose_callback.forget();

        self.ws.set_value(Some(ws));
    }

    pub fn url(&self) -> String {
        self.ws_url.get_value()
    }
}

impl EdgeTransport for EdgeWebsocket {
    fn send_request(&self, request: JsonrpcRequest) -> RequestFuture {
        let ws = match self.ws.get_value() {
            Some(ws) if self.connected.get_untracked() => ws,
            _ => return future::ready(Err(RequestError::NotConnected)).boxed_local(),
        };
        let json = match serde_json::to_string(&request) {
            Ok(json) => json,
            Err(e) => return future::ready(Err(RequestError::Serialization(e))).boxed_local(),
        };

        let pending = self.pending.get_value();
        let (tx, rx) = oneshot::channel();
        pending.borrow_mut().insert(request.id.clone(), tx);

        if let Err(e) = ws.send_with_str(&json) {
            pending.borrow_mut().remove(&request.id);
            return future::ready(Err(RequestError::Transport(format!("{:?}", e)))).boxed_local();
        }
        log::debug!("Sent '{}' [{}]", request.method, request.id);

        async move { rx.await.unwrap_or(Err(RequestError::ConnectionClosed)) }.boxed_local()
    }
}

/// Routes one incoming text frame to the request it answers.
fn dispatch(pending: &PendingRequests, text: &str) {
    match JsonrpcMessage::from_json(text) {
        Ok(JsonrpcMessage::Notification(notification)) => {
            log::debug!("Notification '{}'", notification.method);
        }
        Ok(JsonrpcMessage::Success(response)) => {
            resolve(pending, &response.id, Ok(response.result));
        }
        Ok(JsonrpcMessage::Error(response)) => {
            resolve(pending, &response.id, Err(RequestError::Rejected(response.error)));
        }
        Err(e) => {
            log::error!("Failed to parse JSON-RPC message: {} ({})", e, text);
        }
    }
}

fn resolve(pending: &PendingRequests, id: &str, result: Result<Value, RequestError>) {
    let sender = pending.borrow_mut().remove(id);
    match sender {
        Some(tx) => {
            let _ = tx.send(result);
        }
        None => log::warn!("Response for unknown request [{}]", id),
    }
}

/// Fails every request still in flight.
fn fail_all(pending: &PendingRequests) {
    let drained: Vec<_> = pending.borrow_mut().drain().collect();
    for (_, tx) in drained {
        let _ = tx.send(Err(RequestError::ConnectionClosed));
    }
}
