//! Mode and threshold updates of one CHP SoC controller.
//!
//! Every update captures the store's current values, sends one
//! `updateComponentConfig` request and then commits either the new values
//! (success) or the captured ones (failure). Calls of the same operation on
//! the same component are serialized through [`UpdateLocks`], so the store
//! ends up in the state of the last issued request even across controllers.
//! Mode and threshold updates touch disjoint fields and run independently.

use std::rc::Rc;

use ems_common::{ChpSocMode, PropertyChange, PropertyUpdate, ThresholdRange};

use crate::edge::Edge;
use crate::error::RequestError;
use crate::service::{Notifier, Severity};
use crate::store::{ComponentConfigStore, UpdateLocks};
use crate::translate::{Translate, CHANGE_ACCEPTED, CHANGE_FAILED};
use crate::websocket::EdgeTransport;

/// Collaborators shared by all controllers of a page.
#[derive(Clone)]
pub struct Services {
    pub transport: Rc<dyn EdgeTransport>,
    pub store: Rc<dyn ComponentConfigStore>,
    pub notifier: Rc<dyn Notifier>,
    pub translator: Rc<dyn Translate>,
    pub locks: UpdateLocks,
}

const MODE_GROUP: &str = "mode";
const THRESHOLDS_GROUP: &str = "thresholds";

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// No edge bound; nothing was sent.
    Skipped,
    Accepted(Vec<PropertyChange>),
    RolledBack {
        restored: Vec<PropertyChange>,
        message: String,
    },
}

/// Values to commit once the remote side answered.
pub fn reconcile(
    prior: Vec<PropertyChange>,
    proposed: Vec<PropertyChange>,
    result: &Result<(), RequestError>,
) -> Vec<PropertyChange> {
    match result {
        Ok(()) => proposed,
        Err(_) => prior,
    }
}

#[derive(Clone)]
pub struct ChpsocController {
    edge: Option<Edge>,
    component_id: String,
    services: Services,
}

impl ChpsocController {
    pub fn new(edge: Option<Edge>, component_id: impl Into<String>, services: Services) -> Self {
        Self {
            edge,
            component_id: component_id.into(),
            services,
        }
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn current_mode(&self) -> Option<ChpSocMode> {
        self.services.store.snapshot(&self.component_id).and_then(|c| c.mode())
    }

    /// Range state for a freshly opened modal.
    pub fn current_thresholds(&self) -> ThresholdRange {
        self.services
            .store
            .snapshot(&self.component_id)
            .map(|c| ThresholdRange::from_component(&c))
            .unwrap_or_default()
    }

    pub async fn update_mode(&self, mode: ChpSocMode) -> UpdateOutcome {
        self.update(MODE_GROUP, vec![PropertyUpdate::mode(mode)]).await
    }

    /// Sends both thresholds in one request; they commit or roll back together.
    pub async fn update_thresholds(&self, range: ThresholdRange) -> UpdateOutcome {
        self.update(THRESHOLDS_GROUP, range.to_updates()).await
    }

    async fn update(&self, group: &'static str, proposed: Vec<PropertyUpdate>) -> UpdateOutcome {
        let Some(edge) = &self.edge else {
            return UpdateOutcome::Skipped;
        };
        let lock = self.services.locks.get(&self.component_id, group);
        let _guard = lock.lock().await;

        let names: Vec<&str> = proposed.iter().map(|u| u.name.as_str()).collect();
        let fields = names.join(", ");
        let prior = match self.services.store.snapshot(&self.component_id) {
            Some(component) => component.current_values(&names),
            None => names.iter().map(|name| PropertyChange::absent(*name)).collect(),
        };
        let changes = proposed.iter().cloned().map(PropertyChange::from).collect();

        let result = edge
            .update_component_config(self.services.transport.as_ref(), &self.component_id, proposed)
            .await;
        let committed = reconcile(prior, changes, &result);
        self.services.store.apply(&self.component_id, &committed);

        let translator = &self.services.translator;
        match result {
            Ok(()) => {
                log::debug!("Updated {} of {}", fields, self.component_id);
                self.services
                    .notifier
                    .toast(translator.instant(CHANGE_ACCEPTED), Severity::Success);
                UpdateOutcome::Accepted(committed)
            }
            Err(e) => {
                log::warn!("Updating {} of {} failed: {}", fields, self.component_id, e);
                let message = e.message();
                self.services.notifier.toast(
                    format!("{}\n{}", translator.instant(CHANGE_FAILED), message),
                    Severity::Danger,
                );
                UpdateOutcome::RolledBack {
                    restored: committed,
                    message,
                }
            }
        }
    }
}
