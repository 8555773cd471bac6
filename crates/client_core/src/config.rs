use std::{collections::HashMap, fs, path::Path};

use tracing::warn;

const SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub backend_url: String,
    /// Session endpoint host; the backend itself when unset.
    pub auth_url: Option<String>,
    /// Session cookie value sent with every request.
    pub session: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8080".into(),
            auth_url: None,
            session: None,
        }
    }
}

pub fn load_settings() -> ClientSettings {
    let mut settings = load_settings_file(Path::new(SETTINGS_FILE));
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub fn load_settings_file(path: &Path) -> ClientSettings {
    let mut settings = ClientSettings::default();

    let Ok(raw) = fs::read_to_string(path) else {
        return settings;
    };
    match toml::from_str::<HashMap<String, String>>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.get("backend_url") {
                settings.backend_url = v.clone();
            }
            if let Some(v) = file_cfg.get("auth_url") {
                settings.auth_url = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("session") {
                settings.session = Some(v.clone());
            }
        }
        Err(err) => warn!(path = %path.display(), %err, "ignoring unreadable settings file"),
    }

    settings
}

/// Later keys win over earlier ones.
pub fn apply_env(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ["ARTICLES_BACKEND_URL", "APP__BACKEND_URL"] {
        if let Some(v) = lookup(key) {
            settings.backend_url = v;
        }
    }
    for key in ["ARTICLES_AUTH_URL", "APP__AUTH_URL"] {
        if let Some(v) = lookup(key) {
            settings.auth_url = Some(v);
        }
    }
    for key in ["ARTICLES_SESSION", "APP__SESSION"] {
        if let Some(v) = lookup(key) {
            settings.session = Some(v);
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
