//! Environment selected at build time through cargo features.
//!
//! `edge-dev` is the default; build with
//! `--no-default-features --features backend-dev` to talk to a backend.

use ems_common::{DeploymentTarget, Environment};

#[cfg(all(feature = "backend-dev", feature = "edge-dev"))]
compile_error!("features `backend-dev` and `edge-dev` are mutually exclusive");

#[cfg(not(any(feature = "backend-dev", feature = "edge-dev")))]
compile_error!("enable one of the `backend-dev` or `edge-dev` features");

#[cfg(feature = "backend-dev")]
pub const TARGET: DeploymentTarget = DeploymentTarget::BackendDev;

#[cfg(feature = "edge-dev")]
pub const TARGET: DeploymentTarget = DeploymentTarget::EdgeDev;

pub const ENVIRONMENT: Environment = TARGET.environment();
