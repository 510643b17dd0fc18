use crate::services::api::ApiClient;
use crate::services::auth_store::{AuthStore, LocalStorageAuth};
use crate::services::config::AppConfig;
use crate::services::current_user::CurrentUser;
use crate::services::toaster::Toaster;

/// Everything the component tree shares, handed down through a
/// `ContextProvider` instead of living in globals
#[derive(Clone, Debug, PartialEq)]
pub struct AppContext {
    pub config: AppConfig,
    pub client: ApiClient,
    pub current_user: CurrentUser,
    pub toaster: Toaster,
}

impl AppContext {
    /// Wire the client, auth bridge and toaster around `auth`
    pub fn new(config: AppConfig, auth: AuthStore) -> Self {
        let current_user = CurrentUser::bind(&auth);
        let client = ApiClient::new(&config, auth);
        let toaster = Toaster::with_default_duration(config.default_toast_duration_ms);

        Self {
            config,
            client,
            current_user,
            toaster,
        }
    }

    /// Context for the browser, with the session kept in local storage
    pub fn for_browser(config: AppConfig) -> Self {
        Self::new(config, AuthStore::with_persistence(LocalStorageAuth::default()))
    }
}
