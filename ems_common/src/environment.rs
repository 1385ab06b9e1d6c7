//! Build-time environment tables.
//!
//! Each deployment target is a `const` record merging the shared [`THEME`]
//! with the target's websocket endpoint and flags. Nothing here is
//! validated: a wrong URL only shows up when the websocket fails to connect.

/// Branding shared by all targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub theme: &'static str,
    pub ui_title: &'static str,
    pub edge_short_name: &'static str,
    pub edge_long_name: &'static str,
    pub docs_url_prefix: &'static str,
}

pub const THEME: Theme = Theme {
    theme: "OpenEMS",
    ui_title: "OpenEMS UI",
    edge_short_name: "OpenEMS",
    edge_long_name: "Open Energy Management System",
    docs_url_prefix: "https://github.com/OpenEMS/openems/blob/develop/",
};

/// What the websocket on the other end is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// A backend multiplexing many edges; edge requests travel inside `edgeRpc`.
    OpenemsBackend,
    /// A single edge spoken to directly.
    OpenemsEdge,
}

impl Backend {
    pub fn label(&self) -> &'static str {
        match self {
            Backend::OpenemsBackend => "OpenEMS Backend",
            Backend::OpenemsEdge => "OpenEMS Edge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    pub theme: Theme,
    pub backend: Backend,
    pub url: &'static str,
    pub production: bool,
    pub debug_mode: bool,
}

impl Environment {
    pub fn is_backend(&self) -> bool {
        self.backend == Backend::OpenemsBackend
    }
}

pub const BACKEND_DEV: Environment = Environment {
    theme: THEME,
    backend: Backend::OpenemsBackend,
    url: "ws://192.168.1.218:8082",
    production: false,
    debug_mode: true,
};

pub const EDGE_DEV: Environment = Environment {
    theme: THEME,
    backend: Backend::OpenemsEdge,
    url: "ws://192.168.1.168:8085",
    production: false,
    debug_mode: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentTarget {
    BackendDev,
    EdgeDev,
}

impl DeploymentTarget {
    pub const fn environment(self) -> Environment {
        match self {
            DeploymentTarget::BackendDev => BACKEND_DEV,
            DeploymentTarget::EdgeDev => EDGE_DEV,
        }
    }

    /// Cargo feature name of the target.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentTarget::BackendDev => "backend-dev",
            DeploymentTarget::EdgeDev => "edge-dev",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_dev_table() {
        let env = DeploymentTarget::BackendDev.environment();
        assert_eq!(env.backend.label(), "OpenEMS Backend");
        assert_eq!(env.url, "ws://192.168.1.218:8082");
        assert!(env.is_backend());
        assert!(!env.production);
        assert!(env.debug_mode);
    }

    #[test]
    fn test_edge_dev_table() {
        let env = DeploymentTarget::EdgeDev.environment();
        assert_eq!(env.backend.label(), "OpenEMS Edge");
        assert_eq!(env.url, "ws://192.168.1.168:8085");
        assert!(!env.is_backend());
        assert_eq!(env.theme, THEME);
    }

    #[test]
    fn test_target_names_match_features() {
        assert_eq!(DeploymentTarget::BackendDev.as_str(), "backend-dev");
        assert_eq!(DeploymentTarget::EdgeDev.as_str(), "edge-dev");
    }
}
