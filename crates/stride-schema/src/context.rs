//! Request-scoped state handed to every resolver.

use stride_config::SiteConfig;
use stride_core::identity::Viewer;
use stride_db::service::StrideService;

/// Everything a field resolver may read: the store, who is asking, and the
/// site settings used to build absolute links.
pub struct ResolveContext<'a> {
    store: &'a StrideService,
    viewer: Viewer,
    site: SiteConfig,
}

impl<'a> ResolveContext<'a> {
    #[must_use]
    pub fn new(store: &'a StrideService, viewer: Viewer) -> Self {
        Self {
            store,
            viewer,
            site: SiteConfig::default(),
        }
    }

    #[must_use]
    pub fn with_site(mut self, site: SiteConfig) -> Self {
        self.site = site;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &'a StrideService {
        self.store
    }

    #[must_use]
    pub const fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Front-end base URL without a trailing slash, empty when unset.
    #[must_use]
    pub fn frontend_base(&self) -> &str {
        self.site.frontend_base()
    }
}
