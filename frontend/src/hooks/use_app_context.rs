use yew::prelude::*;
use crate::services::app_context::AppContext;

/// The shared application context; components must sit under the
/// `ContextProvider<AppContext>` set up in `main`
#[hook]
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext provider missing from component tree")
}
