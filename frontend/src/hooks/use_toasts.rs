use yew::prelude::*;
use crate::hooks::use_app_context::use_app_context;
use crate::services::toaster::{Toast, ToastId};

pub struct UseToastsResult {
    pub toasts: Vec<Toast>,
    pub remove_toast: Callback<ToastId>,
}

#[hook]
pub fn use_toasts() -> UseToastsResult {
    let context = use_app_context();
    let toasts = {
        let toaster = context.toaster.clone();
        use_state(move || toaster.toasts())
    };

    {
        let toasts = toasts.clone();
        let toaster = context.toaster.clone();
        use_effect_with((), move |_| {
            toasts.set(toaster.toasts());

            let subscription = toaster.subscribe(move |pending| toasts.set(pending.to_vec()));
            move || subscription.unsubscribe()
        });
    }

    let remove_toast = {
        let toaster = context.toaster.clone();
        use_callback((), move |id: ToastId, _| toaster.remove_toast(&id))
    };

    UseToastsResult {
        toasts: (*toasts).clone(),
        remove_toast,
    }
}
