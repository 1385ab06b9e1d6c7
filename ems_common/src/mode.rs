//! Operating mode of the CHP SoC controller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operating mode of a CHP SoC controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChpSocMode {
    /// CHP is forced on regardless of the state of charge.
    ManualOn,
    /// CHP is forced off regardless of the state of charge.
    ManualOff,
    /// CHP follows the low/high thresholds.
    Automatic,
}

impl ChpSocMode {
    pub const ALL: [ChpSocMode; 3] = [ChpSocMode::ManualOn, ChpSocMode::ManualOff, ChpSocMode::Automatic];

    /// Wire identifier, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChpSocMode::ManualOn => "MANUAL_ON",
            ChpSocMode::ManualOff => "MANUAL_OFF",
            ChpSocMode::Automatic => "AUTOMATIC",
        }
    }
}

impl fmt::Display for ChpSocMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a control produces a value outside the mode enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown CHP SoC mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for ChpSocMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChpSocMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_modes() {
        for mode in ChpSocMode::ALL {
            assert_eq!(mode.as_str().parse::<ChpSocMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_value() {
        let err = "MANUAL".parse::<ChpSocMode>().unwrap_err();
        assert_eq!(err, UnknownMode("MANUAL".to_string()));
        assert!("automatic".parse::<ChpSocMode>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_identifiers() {
        let json = serde_json::to_string(&ChpSocMode::ManualOff).unwrap();
        assert_eq!(json, "\"MANUAL_OFF\"");
        let mode: ChpSocMode = serde_json::from_str("\"AUTOMATIC\"").unwrap();
        assert_eq!(mode, ChpSocMode::Automatic);
    }
}
