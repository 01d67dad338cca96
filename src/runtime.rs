//! Background-context assembly and per-page wiring.

use std::sync::Arc;

use clipnest_api::HttpProxyExecutor;
use clipnest_extract::DocumentSource;
use clipnest_protocols::{CookieJar, ProxyExecutor, SignInRedirect, UserStore};
use clipnest_router::{
    AuthUpdatedHandler, ContextBus, CredentialHandler, ProxyHandler, RelayRemoteApi,
};
use clipnest_session::SessionGate;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::RuntimeConfig;
use crate::panel::{Panel, ToggleHandler};

/// The long-lived background half of the runtime.
///
/// Owns the seams only the background context may touch (cookie jar, user
/// store, outbound HTTP) and connects page contexts to them.
pub struct Runtime {
    config: RuntimeConfig,
    store: Arc<dyn UserStore>,
    jar: Arc<dyn CookieJar>,
    signin: Arc<dyn SignInRedirect>,
    proxy: Arc<dyn ProxyExecutor>,
}

impl Runtime {
    pub fn new(
        config: RuntimeConfig,
        store: Arc<dyn UserStore>,
        jar: Arc<dyn CookieJar>,
        signin: Arc<dyn SignInRedirect>,
    ) -> Self {
        let proxy = Arc::new(HttpProxyExecutor::with_timeout(config.timeout()));
        Self {
            config,
            store,
            jar,
            signin,
            proxy,
        }
    }

    /// Install the default tracing subscriber (`RUST_LOG`-style filtering).
    /// Safe to call more than once; later calls are ignored.
    pub fn init_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn user_store(&self) -> Arc<dyn UserStore> {
        self.store.clone()
    }

    /// Connect a new page context: build the bus pair, register the
    /// background relay handlers and start both receive loops.
    pub fn connect_page(&self) -> PageConnection {
        let (page_end, background_end) = ContextBus::pair("page", "background");
        let page = Arc::new(page_end.with_timeout(self.config.timeout()));
        let background = Arc::new(background_end);

        background.register(
            "get_session_credential",
            Arc::new(CredentialHandler::new(self.jar.clone(), self.store.clone())),
        );
        background.register(
            "proxy_api_request",
            Arc::new(ProxyHandler::new(self.proxy.clone())),
        );
        background.register(
            "auth_updated",
            Arc::new(AuthUpdatedHandler::new(self.store.clone())),
        );

        page.start();
        background.start();
        debug!("page context connected");

        let api = Arc::new(RelayRemoteApi::new(page.clone(), self.config.base_url.clone()));
        let gate = SessionGate::new(page.clone(), self.store.clone(), self.signin.clone());

        PageConnection {
            page,
            background,
            api,
            gate,
        }
    }
}

/// The wiring for one connected page context.
pub struct PageConnection {
    /// The page-side bus endpoint.
    pub page: Arc<ContextBus>,
    /// The background-side bus endpoint (triggers are sent through this).
    pub background: Arc<ContextBus>,
    /// Page-side remote API, relayed through the background.
    pub api: Arc<RelayRemoteApi>,
    /// Auth gate for this page's sessions.
    pub gate: SessionGate,
}

impl PageConnection {
    /// Build this page's panel and register the toggle handler that drives
    /// it. Returns the pieces a host needs to keep the page alive.
    pub fn attach_panel(self, source: Arc<dyn DocumentSource>) -> PagePanelHandle {
        let panel = Arc::new(Mutex::new(Panel::new(self.gate, self.api.clone())));
        self.page.register(
            "toggle_save_ui",
            Arc::new(ToggleHandler::new(panel.clone(), source)),
        );
        PagePanelHandle {
            panel,
            page: self.page,
            background: self.background,
        }
    }
}

/// A page context with its panel attached.
pub struct PagePanelHandle {
    pub panel: Arc<Mutex<Panel>>,
    pub page: Arc<ContextBus>,
    pub background: Arc<ContextBus>,
}
