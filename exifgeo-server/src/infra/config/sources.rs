use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub upload: FileUploadConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileUploadConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub cors_allowed_origin: Option<String>,
    pub cors_allow_credentials: Option<bool>,
    pub upload_max_bytes: Option<u64>,
    pub upload_allowed_extensions: Option<Vec<String>>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unparseable numbers and
    /// booleans are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            config_path: lookup("EXIFGEO_CONFIG").map(PathBuf::from),
            server_host: lookup("SERVER_HOST"),
            server_port: lookup("SERVER_PORT").and_then(|s| s.parse().ok()),
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN"),
            cors_allow_credentials: lookup("CORS_ALLOW_CREDENTIALS")
                .and_then(|raw| parse_bool(&raw)),
            upload_max_bytes: lookup("UPLOAD_MAX_BYTES")
                .and_then(|s| s.trim().parse().ok()),
            upload_allowed_extensions: lookup("UPLOAD_ALLOWED_EXTENSIONS")
                .map(|raw| parse_csv(&raw)),
        }
    }
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn reads_every_variable() {
        let env = env_from(&[
            ("EXIFGEO_CONFIG", "/etc/exifgeo.toml"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "9000"),
            ("CORS_ALLOWED_ORIGIN", "https://maps.example"),
            ("CORS_ALLOW_CREDENTIALS", "no"),
            ("UPLOAD_MAX_BYTES", "1048576"),
            ("UPLOAD_ALLOWED_EXTENSIONS", ".jpg, jpeg,,"),
        ]);

        assert_eq!(env.config_path, Some(PathBuf::from("/etc/exifgeo.toml")));
        assert_eq!(env.server_host.as_deref(), Some("127.0.0.1"));
        assert_eq!(env.server_port, Some(9000));
        assert_eq!(
            env.cors_allowed_origin.as_deref(),
            Some("https://maps.example")
        );
        assert_eq!(env.cors_allow_credentials, Some(false));
        assert_eq!(env.upload_max_bytes, Some(1_048_576));
        assert_eq!(
            env.upload_allowed_extensions,
            Some(vec![".jpg".to_string(), "jpeg".to_string()])
        );
    }

    #[test]
    fn unparseable_values_are_unset() {
        let env = env_from(&[
            ("SERVER_PORT", "eighty"),
            ("CORS_ALLOW_CREDENTIALS", "maybe"),
            ("UPLOAD_MAX_BYTES", "-1"),
        ]);

        assert_eq!(env.server_port, None);
        assert_eq!(env.cors_allow_credentials, None);
        assert_eq!(env.upload_max_bytes, None);
    }

    #[test]
    fn file_config_sections_are_optional() {
        let parsed: FileConfig = toml::from_str(
            r#"
            [upload]
            max_bytes = 2048
            "#,
        )
        .unwrap();

        assert_eq!(parsed.upload.max_bytes, Some(2048));
        assert!(parsed.server.port.is_none());
        assert!(parsed.cors.allowed_origin.is_none());
    }
}
