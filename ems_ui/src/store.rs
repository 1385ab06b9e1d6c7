//! Single owner of the edge's component configuration.
//!
//! UI surfaces read snapshots and change records only through
//! [`ComponentConfigStore::apply`].

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use ems_common::{EdgeConfigComponent, PropertyChange};
use futures::lock::Mutex;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

pub trait ComponentConfigStore {
    fn snapshot(&self, component_id: &str) -> Option<EdgeConfigComponent>;

    fn apply(&self, component_id: &str, changes: &[PropertyChange]);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentStore {
    components: BTreeMap<String, EdgeConfigComponent>,
}

impl ComponentStore {
    pub fn new(components: impl IntoIterator<Item = EdgeConfigComponent>) -> Self {
        let mut store = Self::default();
        store.replace_all(components);
        store
    }

    pub fn replace_all(&mut self, components: impl IntoIterator<Item = EdgeConfigComponent>) {
        self.components = components.into_iter().map(|c| (c.id.clone(), c)).collect();
    }

    pub fn get(&self, component_id: &str) -> Option<&EdgeConfigComponent> {
        self.components.get(component_id)
    }

    /// Returns false when the component is unknown.
    pub fn apply(&mut self, component_id: &str, changes: &[PropertyChange]) -> bool {
        match self.components.get_mut(component_id) {
            Some(component) => {
                component.apply(changes);
                true
            }
            None => false,
        }
    }

    pub fn by_factory(&self, factory_id: &str) -> Vec<EdgeConfigComponent> {
        self.components
            .values()
            .filter(|c| c.factory_id == factory_id)
            .cloned()
            .collect()
    }
}

impl ComponentConfigStore for RefCell<ComponentStore> {
    fn snapshot(&self, component_id: &str) -> Option<EdgeConfigComponent> {
        self.borrow().get(component_id).cloned()
    }

    fn apply(&self, component_id: &str, changes: &[PropertyChange]) {
        if !self.borrow_mut().apply(component_id, changes) {
            log::warn!("Dropping update for unknown component '{}'", component_id);
        }
    }
}

/// Async locks serializing updates of one field group of one component.
///
/// Shared by every controller editing the same record, so a modal that is
/// closed and reopened still queues behind its earlier in-flight request.
#[derive(Clone, Default)]
pub struct UpdateLocks {
    locks: Rc<RefCell<HashMap<(String, &'static str), Rc<Mutex<()>>>>>,
}

impl UpdateLocks {
    pub fn get(&self, component_id: &str, group: &'static str) -> Rc<Mutex<()>> {
        self.locks
            .borrow_mut()
            .entry((component_id.to_string(), group))
            .or_insert_with(|| Rc::new(Mutex::new(())))
            .clone()
    }
}

/// Reactive store provided as context to the component tree.
#[derive(Clone, Copy)]
pub struct ConfigStore {
    components: RwSignal<ComponentStore>,
    locks: StoredValue<UpdateLocks, LocalStorage>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            components: RwSignal::new(ComponentStore::default()),
            locks: StoredValue::new_local(UpdateLocks::default()),
        }
    }

    pub fn update_locks(&self) -> UpdateLocks {
        self.locks.get_value()
    }

    pub fn replace_all(&self, components: Vec<EdgeConfigComponent>) {
        log::info!("Loaded {} components", components.len());
        self.components.update(|store| store.replace_all(components));
    }

    /// Tracked read of one component.
    pub fn component(&self, component_id: &str) -> Option<EdgeConfigComponent> {
        self.components.with(|store| store.get(component_id).cloned())
    }

    /// Tracked read of all components of a factory.
    pub fn by_factory(&self, factory_id: &str) -> Vec<EdgeConfigComponent> {
        self.components.with(|store| store.by_factory(factory_id))
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentConfigStore for ConfigStore {
    fn snapshot(&self, component_id: &str) -> Option<EdgeConfigComponent> {
        self.components.with_untracked(|store| store.get(component_id).cloned())
    }

    fn apply(&self, component_id: &str, changes: &[PropertyChange]) {
        let mut applied = false;
        self.components.update(|store| applied = store.apply(component_id, changes));
        if !applied {
            log::warn!("Dropping update for unknown component '{}'", component_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ems_common::{ChpSocMode, PropertyUpdate, CHP_SOC_FACTORY_ID, PROPERTY_MODE};

    fn set_mode(mode: ChpSocMode) -> PropertyChange {
        PropertyUpdate::mode(mode).into()
    }

    fn store() -> ComponentStore {
        ComponentStore::new([
            EdgeConfigComponent::new("ctrlChpSoc0", CHP_SOC_FACTORY_ID).with_property(PROPERTY_MODE, "AUTOMATIC"),
            EdgeConfigComponent::new("ctrlChpSoc1", CHP_SOC_FACTORY_ID).with_property(PROPERTY_MODE, "MANUAL_OFF"),
            EdgeConfigComponent::new("ess0", "Ess.Generic.ManagedSymmetric"),
        ])
    }

    #[test]
    fn test_by_factory() {
        let ids: Vec<_> = store().by_factory(CHP_SOC_FACTORY_ID).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["ctrlChpSoc0", "ctrlChpSoc1"]);
    }

    #[test]
    fn test_apply_unknown_component() {
        let mut s = store();
        assert!(!s.apply("nope", &[set_mode(ChpSocMode::ManualOn)]));
        assert!(s.apply("ctrlChpSoc1", &[set_mode(ChpSocMode::ManualOn)]));
        assert_eq!(s.get("ctrlChpSoc1").unwrap().mode(), Some(ChpSocMode::ManualOn));
        assert!(s.get("nope").is_none());
    }

    #[test]
    fn test_refcell_store_snapshot_is_a_copy() {
        let cell = RefCell::new(store());
        let mut snapshot = cell.snapshot("ctrlChpSoc0").unwrap();
        snapshot.apply(&[set_mode(ChpSocMode::ManualOff)]);
        assert_eq!(cell.snapshot("ctrlChpSoc0").unwrap().mode(), Some(ChpSocMode::Automatic));
    }

    #[test]
    fn test_update_locks_are_shared_per_component_and_group() {
        let locks = UpdateLocks::default();
        let other_handle = locks.clone();
        assert!(Rc::ptr_eq(&locks.get("ctrlChpSoc0", "mode"), &other_handle.get("ctrlChpSoc0", "mode")));
        assert!(!Rc::ptr_eq(&locks.get("ctrlChpSoc0", "mode"), &locks.get("ctrlChpSoc0", "thresholds")));
        assert!(!Rc::ptr_eq(&locks.get("ctrlChpSoc0", "mode"), &locks.get("ctrlChpSoc1", "mode")));
    }
}
