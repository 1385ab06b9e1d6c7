//! Component configuration records as published in the edge configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ChpSocMode;

/// Factory id of the CHP SoC controller.
pub const CHP_SOC_FACTORY_ID: &str = "Controller.CHP.SoC";

pub const PROPERTY_MODE: &str = "mode";
pub const PROPERTY_LOW_THRESHOLD: &str = "lowThreshold";
pub const PROPERTY_HIGH_THRESHOLD: &str = "highThreshold";
pub const PROPERTY_INPUT_CHANNEL: &str = "inputChannelAddress";
pub const PROPERTY_OUTPUT_CHANNEL: &str = "outputChannelAddress";

/// One configured component instance on an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeConfigComponent {
    /// Filled from the map key when parsed from `getEdgeConfig`.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub factory_id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl EdgeConfigComponent {
    pub fn new(id: impl Into<String>, factory_id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            alias: id.clone(),
            id,
            factory_id: factory_id.into(),
            properties: Map::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Returns `None` when the property is absent or not one of the known modes.
    pub fn mode(&self) -> Option<ChpSocMode> {
        self.property(PROPERTY_MODE)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn low_threshold(&self) -> Option<f64> {
        self.property(PROPERTY_LOW_THRESHOLD).and_then(Value::as_f64)
    }

    pub fn high_threshold(&self) -> Option<f64> {
        self.property(PROPERTY_HIGH_THRESHOLD).and_then(Value::as_f64)
    }

    pub fn input_channel(&self) -> Option<ChannelAddress> {
        self.property(PROPERTY_INPUT_CHANNEL)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn output_channel(&self) -> Option<ChannelAddress> {
        self.property(PROPERTY_OUTPUT_CHANNEL)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Current values of the named properties; absent ones stay `None` so
    /// that applying the result restores the record's exact shape.
    pub fn current_values(&self, names: &[&str]) -> Vec<PropertyChange> {
        names
            .iter()
            .map(|name| PropertyChange {
                name: name.to_string(),
                value: self.property(name).cloned(),
            })
            .collect()
    }

    pub fn apply(&mut self, changes: &[PropertyChange]) {
        for change in changes {
            match &change.value {
                Some(value) => {
                    self.properties.insert(change.name.clone(), value.clone());
                }
                None => {
                    self.properties.remove(&change.name);
                }
            }
        }
    }
}

/// A change to a stored record. `None` removes the property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    pub name: String,
    pub value: Option<Value>,
}

impl PropertyChange {
    /// Marks `name` as absent.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

impl From<PropertyUpdate> for PropertyChange {
    fn from(update: PropertyUpdate) -> Self {
        Self {
            name: update.name,
            value: Some(update.value),
        }
    }
}

/// A single named property change sent with `updateComponentConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    pub name: String,
    pub value: Value,
}

impl PropertyUpdate {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn mode(mode: ChpSocMode) -> Self {
        Self::new(PROPERTY_MODE, mode.as_str())
    }
}

/// Lower/upper force-charge thresholds edited by the range slider.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdRange {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl ThresholdRange {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    pub fn from_component(component: &EdgeConfigComponent) -> Self {
        Self {
            lower: component.low_threshold(),
            upper: component.high_threshold(),
        }
    }

    /// Both bounds as one update set; absent bounds become `null`.
    pub fn to_updates(&self) -> Vec<PropertyUpdate> {
        vec![
            PropertyUpdate::new(PROPERTY_LOW_THRESHOLD, self.lower),
            PropertyUpdate::new(PROPERTY_HIGH_THRESHOLD, self.upper),
        ]
    }
}

/// Address of a channel in `component/channel` form, e.g. `ess0/Soc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelAddress {
    pub component_id: String,
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid channel address '{0}'")]
pub struct InvalidChannelAddress(pub String);

impl FromStr for ChannelAddress {
    type Err = InvalidChannelAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((component, channel))
                if !component.is_empty() && !channel.is_empty() && !channel.contains('/') =>
            {
                Ok(Self {
                    component_id: component.to_string(),
                    channel_id: channel.to_string(),
                })
            }
            _ => Err(InvalidChannelAddress(s.to_string())),
        }
    }
}

impl fmt::Display for ChannelAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.component_id, self.channel_id)
    }
}
