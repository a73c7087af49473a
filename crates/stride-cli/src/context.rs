use std::path::Path;

use anyhow::Context;
use stride_config::StrideConfig;
use stride_core::identity::Viewer;
use stride_db::service::StrideService;
use stride_schema::ResolveContext;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: StrideService,
    pub config: StrideConfig,
    pub viewer: Viewer,
}

impl AppContext {
    /// Open the store and resolve the acting viewer.
    pub async fn init(config: StrideConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = flags.db.as_deref().unwrap_or(&config.database.path).to_string();
        if db_path != ":memory:" {
            if let Some(parent) = Path::new(&db_path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let service = StrideService::new_local(&db_path)
            .await
            .with_context(|| format!("failed to open stride database at {db_path}"))?;

        let viewer = match flags.viewer.as_deref() {
            Some(username) => {
                let person = service
                    .get_person_by_username(username)
                    .await
                    .with_context(|| format!("unknown viewer '{username}'"))?;
                Viewer::person(person.id)
            }
            None => Viewer::anonymous(),
        };
        tracing::debug!(db_path, ?viewer, "initialized app context");

        Ok(Self {
            service,
            config,
            viewer,
        })
    }

    /// Request context for resolvers, carrying the viewer and site settings.
    pub fn resolver(&self) -> ResolveContext<'_> {
        ResolveContext::new(&self.service, self.viewer.clone()).with_site(self.config.site.clone())
    }

    pub fn default_limit(&self) -> u32 {
        self.config.general.default_limit
    }
}
