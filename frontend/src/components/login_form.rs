use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use crate::hooks::use_app_context::use_app_context;
use crate::services::toaster::{ToastOptions, ToastType};

#[function_component(LoginForm)]
pub fn login_form() -> Html {
    let context = use_app_context();
    let identity = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);

    // Keystroke-level so a submit before blur sees the typed value
    let on_identity_input = {
        let identity = identity.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            identity.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let client = context.client.clone();
        let toaster = context.toaster.clone();
        let identity = identity.clone();
        let password = password.clone();
        let submitting = submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if identity.trim().is_empty() || password.is_empty() {
                toaster.warning("Enter your email and password");
                return;
            }

            let client = client.clone();
            let toaster = toaster.clone();
            let identity_value = identity.trim().to_string();
            let password_value = (*password).clone();
            let password = password.clone();
            let submitting = submitting.clone();

            spawn_local(async move {
                submitting.set(true);

                match client.auth_with_password(&identity_value, &password_value).await {
                    Ok(user) => {
                        password.set(String::new());
                        toaster.success(format!("Welcome back, {}!", user.display_name()));
                    }
                    Err(e) => {
                        toaster.toast(
                            e.to_string(),
                            ToastOptions::new()
                                .kind(ToastType::Error)
                                .title("Sign in failed"),
                        );
                    }
                }

                submitting.set(false);
            });
        })
    };

    html! {
        <section class="login-section">
            <h2>{"🔑 Sign in"}</h2>
            <form class="login-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="identity">{"Email"}</label>
                    <input
                        type="email"
                        id="identity"
                        autocomplete="username"
                        value={(*identity).clone()}
                        oninput={on_identity_input}
                        disabled={*submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="password">{"Password"}</label>
                    <input
                        type="password"
                        id="password"
                        autocomplete="current-password"
                        value={(*password).clone()}
                        oninput={on_password_input}
                        disabled={*submitting}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    {if *submitting { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </section>
    }
}
