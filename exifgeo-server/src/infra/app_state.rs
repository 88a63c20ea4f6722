use std::{fmt, sync::Arc};

use exifgeo_core::UploadPolicy;

use crate::infra::config::Config;

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub policy: Arc<UploadPolicy>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let policy = config.upload.policy();
        Self {
            config: Arc::new(config),
            policy: Arc::new(policy),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("bind_address", &self.config.server.bind_address())
            .field("max_upload_bytes", &self.policy.max_bytes())
            .finish_non_exhaustive()
    }
}
