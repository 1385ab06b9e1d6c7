//! Shared types for the CHP SoC controller UI.
//!
//! This crate provides the types exchanged with an edge (or a backend
//! fronting several edges) over the websocket, plus the build-time
//! environment tables. All types are WASM-compatible.
//!
//! # Usage
//!
//! ```rust
//! use ems_common::{ChpSocMode, PropertyUpdate, UpdateComponentConfigRequest, JsonrpcMethod};
//!
//! let request = UpdateComponentConfigRequest {
//!     component_id: "ctrlChpSoc0".to_string(),
//!     properties: vec![PropertyUpdate::mode(ChpSocMode::Automatic)],
//! }
//! .into_request("1")
//! .unwrap();
//! assert_eq!(request.method, "updateComponentConfig");
//! ```

mod component;
mod environment;
mod jsonrpc;
mod mode;

pub use component::*;
pub use environment::*;
pub use jsonrpc::*;
pub use mode::*;
