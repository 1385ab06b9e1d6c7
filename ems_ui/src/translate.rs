//! Translation lookup over the embedded language tables.

use std::sync::Arc;

use serde_json::Value;

pub const CHANGE_ACCEPTED: &str = "General.changeAccepted";
pub const CHANGE_FAILED: &str = "General.changeFailed";

const EN: &str = include_str!("../i18n/en.json");
const DE: &str = include_str!("../i18n/de.json");

pub trait Translate {
    /// Synchronous lookup of a dotted key; unknown keys come back unchanged.
    fn instant(&self, key: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    De,
}

impl Language {
    /// Maps a BCP 47 tag (`de-DE`, `en`) to a supported language, English otherwise.
    pub fn from_code(code: &str) -> Self {
        match code.split(['-', '_']).next().map(str::to_ascii_lowercase).as_deref() {
            Some("de") => Language::De,
            _ => Language::En,
        }
    }

    fn table(&self) -> &'static str {
        match self {
            Language::En => EN,
            Language::De => DE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Translator {
    table: Arc<Value>,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        let table = serde_json::from_str(language.table()).unwrap_or_else(|e| {
            log::error!("Invalid translation table for {:?}: {}", language, e);
            Value::Null
        });
        Self {
            table: Arc::new(table),
        }
    }

    /// Picks the language reported by the browser.
    pub fn from_browser() -> Self {
        let code = web_sys::window()
            .and_then(|w| w.navigator().language())
            .unwrap_or_default();
        Self::new(Language::from_code(&code))
    }
}

impl Translate for Translator {
    fn instant(&self, key: &str) -> String {
        key.split('.')
            .try_fold(self.table.as_ref(), |node, part| node.get(part))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}
