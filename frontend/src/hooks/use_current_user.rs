use yew::prelude::*;
use shared::User;
use crate::hooks::use_app_context::use_app_context;

/// Current user, re-rendering the caller on every sign-in, sign-out or refresh
#[hook]
pub fn use_current_user() -> Option<User> {
    let context = use_app_context();
    let user = {
        let current_user = context.current_user.clone();
        use_state(move || current_user.get())
    };

    {
        let user = user.clone();
        let current_user = context.current_user.clone();
        use_effect_with((), move |_| {
            // Catch anything that changed between the first render and now
            user.set(current_user.get());

            let subscription = current_user.subscribe(move |next| user.set(next.clone()));
            move || subscription.unsubscribe()
        });
    }

    (*user).clone()
}
