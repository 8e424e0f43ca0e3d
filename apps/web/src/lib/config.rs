//! Build-time identity gateway configuration with an optional runtime override.
//! The runtime config is read from `window.GATEHOUSE_CONFIG` (if present) so
//! static deployments can point at another project without rebuilding.
//! These values are public client identifiers; do not store secrets here.

use thiserror::Error;

/// Startup failure listing every required gateway setting that is missing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing identity gateway settings: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Gateway connection parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: Option<String>,
}

/// Raw, possibly incomplete settings as collected from the build and runtime sources.
#[derive(Clone, Debug, Default)]
struct RawConfig {
    api_key: Option<String>,
    auth_domain: Option<String>,
    project_id: Option<String>,
    storage_bucket: Option<String>,
    messaging_sender_id: Option<String>,
    app_id: Option<String>,
    measurement_id: Option<String>,
}

impl AppConfig {
    /// Loads config from build-time environment variables, applies runtime
    /// overrides and fails with the names of all missing required settings.
    pub fn load() -> Result<Self, ConfigError> {
        let mut raw = RawConfig {
            api_key: build_value(option_env!("GATEHOUSE_FIREBASE_API_KEY")),
            auth_domain: build_value(option_env!("GATEHOUSE_FIREBASE_AUTH_DOMAIN")),
            project_id: build_value(option_env!("GATEHOUSE_FIREBASE_PROJECT_ID")),
            storage_bucket: build_value(option_env!("GATEHOUSE_FIREBASE_STORAGE_BUCKET")),
            messaging_sender_id: build_value(option_env!(
                "GATEHOUSE_FIREBASE_MESSAGING_SENDER_ID"
            )),
            app_id: build_value(option_env!("GATEHOUSE_FIREBASE_APP_ID")),
            measurement_id: build_value(option_env!("GATEHOUSE_FIREBASE_MEASUREMENT_ID")),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut raw, runtime);
        }

        raw.validate()
    }
}

impl RawConfig {
    fn validate(self) -> Result<AppConfig, ConfigError> {
        let required = [
            ("apiKey", &self.api_key),
            ("authDomain", &self.auth_domain),
            ("projectId", &self.project_id),
            ("storageBucket", &self.storage_bucket),
            ("messagingSenderId", &self.messaging_sender_id),
            ("appId", &self.app_id),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(AppConfig {
            api_key: self.api_key.unwrap_or_default(),
            auth_domain: self.auth_domain.unwrap_or_default(),
            project_id: self.project_id.unwrap_or_default(),
            storage_bucket: self.storage_bucket.unwrap_or_default(),
            messaging_sender_id: self.messaging_sender_id.unwrap_or_default(),
            app_id: self.app_id.unwrap_or_default(),
            measurement_id: self.measurement_id,
        })
    }
}

fn build_value(value: Option<&str>) -> Option<String> {
    value.and_then(normalize_value)
}

fn apply_runtime_overrides(config: &mut RawConfig, runtime: RawConfig) {
    let pairs = [
        (&mut config.api_key, runtime.api_key),
        (&mut config.auth_domain, runtime.auth_domain),
        (&mut config.project_id, runtime.project_id),
        (&mut config.storage_bucket, runtime.storage_bucket),
        (&mut config.messaging_sender_id, runtime.messaging_sender_id),
        (&mut config.app_id, runtime.app_id),
        (&mut config.measurement_id, runtime.measurement_id),
    ];
    for (slot, value) in pairs {
        if value.is_some() {
            *slot = value;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RawConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("GATEHOUSE_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RawConfig {
        api_key: read_runtime_value(&object, "apiKey"),
        auth_domain: read_runtime_value(&object, "authDomain"),
        project_id: read_runtime_value(&object, "projectId"),
        storage_bucket: read_runtime_value(&object, "storageBucket"),
        messaging_sender_id: read_runtime_value(&object, "messagingSenderId"),
        app_id: read_runtime_value(&object, "appId"),
        measurement_id: read_runtime_value(&object, "measurementId"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RawConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_value(&value)
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
