use axum::http::HeaderValue;
use thiserror::Error;

use super::models::{Config, CorsConfig};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error(
        "CORS wildcard origin cannot be combined with CORS_ALLOW_CREDENTIALS"
    )]
    WildcardWithCredentials,
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
    #[error("UPLOAD_MAX_BYTES must be greater than zero")]
    ZeroUploadLimit,
    #[error("UPLOAD_ALLOWED_EXTENSIONS must include at least one extension")]
    NoAllowedExtensions,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    validate_cors(&config.cors)?;

    if config.cors.is_wildcard() {
        warnings.push_with_hint(
            "CORS_ALLOWED_ORIGIN is `*`; any site may submit uploads",
            "Set CORS_ALLOWED_ORIGIN to the frontend origin",
        );
    }

    if config.upload.max_bytes == 0 {
        return Err(ConfigGuardRailError::ZeroUploadLimit);
    }

    if config.upload.allowed_extensions.is_empty() {
        return Err(ConfigGuardRailError::NoAllowedExtensions);
    }

    Ok(warnings)
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    let origin = cors.allowed_origin.trim();

    if origin.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOWED_ORIGIN must not be empty".into(),
        });
    }

    if cors.is_wildcard() {
        if cors.allow_credentials {
            return Err(ConfigGuardRailError::WildcardWithCredentials);
        }
        return Ok(());
    }

    HeaderValue::from_str(origin).map_err(|_| {
        ConfigGuardRailError::InvalidCorsConfig {
            reason: format!(
                "invalid origin `{origin}` in CORS_ALLOWED_ORIGIN"
            ),
        }
    })?;

    if origin.ends_with('/') {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: format!(
                "origin `{origin}` must not end with `/`; browsers send \
                 origins without a trailing slash"
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origin(origin: &str, allow_credentials: bool) -> Config {
        let mut config = Config::default();
        config.cors = CorsConfig {
            allowed_origin: origin.to_string(),
            allow_credentials,
        };
        config
    }

    #[test]
    fn defaults_pass_without_warnings() {
        let warnings = apply_guard_rails(&Config::default()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn wildcard_with_credentials_is_rejected() {
        let err =
            apply_guard_rails(&config_with_origin("*", true)).unwrap_err();
        assert!(matches!(err, ConfigGuardRailError::WildcardWithCredentials));
    }

    #[test]
    fn wildcard_without_credentials_warns() {
        let warnings =
            apply_guard_rails(&config_with_origin("*", false)).unwrap();
        assert_eq!(warnings.items.len(), 1);
        assert!(warnings.items[0].hint.is_some());
    }

    #[test]
    fn malformed_origins_are_rejected() {
        for origin in ["", "   ", "http://bad\norigin", "http://localhost:3000/"]
        {
            assert!(
                matches!(
                    apply_guard_rails(&config_with_origin(origin, true)),
                    Err(ConfigGuardRailError::InvalidCorsConfig { .. })
                ),
                "{origin:?}"
            );
        }
    }

    #[test]
    fn upload_limits_must_be_usable() {
        let mut config = Config::default();
        config.upload.max_bytes = 0;
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::ZeroUploadLimit)
        ));

        let mut config = Config::default();
        config.upload.allowed_extensions.clear();
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::NoAllowedExtensions)
        ));
    }
}
