//! Persisted client storage.
//!
//! A small JSON file of namespaced `fexps.<k>` keys: `token`, `tokens`,
//! `language`, `text_pack`, `current_wallet`. A cleared token is stored as
//! an explicit null sentinel, not removed.

use crate::error::AppError;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ClientStorage {
    path: PathBuf,
    map: HashMap<String, Value>,
}

fn k(name: &str) -> String {
    format!("fexps.{}", name)
}

impl ClientStorage {
    /// Open (or start empty when the file does not exist yet).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let map = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| AppError::Storage(format!("corrupt storage file: {}", e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(AppError::Storage(e.to_string())),
        };
        Ok(ClientStorage { path, map })
    }

    fn save(&self) -> Result<(), AppError> {
        let content = serde_json::to_string(&self.map)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| AppError::Storage(e.to_string()))
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<(), AppError> {
        self.map.insert(k(name), value);
        self.save()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(&k(name))
    }

    pub fn token(&self) -> Option<String> {
        self.get("token")
            .and_then(|v| v.as_str())
            .map(String::from)
    }

    pub fn set_token(&mut self, token: Option<&str>) -> Result<(), AppError> {
        match token {
            Some(t) => self.set("token", Value::from(t)),
            None => self.set("token", Value::Null),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        self.get("tokens")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_tokens(&mut self, tokens: &[String]) -> Result<(), AppError> {
        self.set("tokens", Value::from(tokens.to_vec()))
    }

    pub fn language(&self) -> Option<String> {
        self.get("language")
            .and_then(|v| v.as_str())
            .map(String::from)
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), AppError> {
        self.set("language", Value::from(language))
    }

    pub fn text_pack(&self) -> Option<HashMap<String, String>> {
        self.get("text_pack")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn set_text_pack(&mut self, pack: &HashMap<String, String>) -> Result<(), AppError> {
        let value =
            serde_json::to_value(pack).map_err(|e| AppError::Storage(e.to_string()))?;
        self.set("text_pack", value)
    }

    pub fn current_wallet(&self) -> Option<i64> {
        self.get("current_wallet").and_then(|v| v.as_i64())
    }

    pub fn set_current_wallet(&mut self, id: Option<i64>) -> Result<(), AppError> {
        match id {
            Some(id) => self.set("current_wallet", Value::from(id)),
            None => self.set("current_wallet", Value::Null),
        }
    }
}
