use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod components;
mod hooks;
mod services;

use components::container_card::ContainerCard;
use components::header::Header;
use components::login_form::LoginForm;
use components::toast_viewport::ToastViewport;
use hooks::use_app_context::use_app_context;
use hooks::use_containers::use_containers;
use hooks::use_current_user::use_current_user;
use hooks::use_toasts::use_toasts;
use services::app_context::AppContext;
use services::config::AppConfig;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let context = use_memo((), |_| AppContext::for_browser(AppConfig::from_build_env()));

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            <GardenDiary />
        </ContextProvider<AppContext>>
    }
}

#[function_component(GardenDiary)]
fn garden_diary() -> Html {
    let context = use_app_context();
    let user = use_current_user();
    let toasts = use_toasts();
    let containers = use_containers(user.as_ref().map(|user| user.id.clone()));

    // Revalidate a session restored from storage
    {
        let client = context.client.clone();
        use_effect_with((), move |_| {
            if client.auth_store().is_authenticated() {
                spawn_local(async move {
                    match client.auth_refresh().await {
                        Ok(user) => Logger::info_with_component("auth", &format!("Session refreshed for {}", user.id)),
                        Err(e) => Logger::warn_with_component("auth", &format!("Session refresh failed: {}", e)),
                    }
                });
            }
            || ()
        });
    }

    let on_logout = {
        let client = context.client.clone();
        let toaster = context.toaster.clone();
        Callback::from(move |_: ()| {
            client.logout();
            toaster.info("Signed out");
        })
    };

    html! {
        <div class="app">
            <Header user={user.clone()} on_logout={on_logout} />

            <main class="main">
                {if user.is_none() {
                    html! { <LoginForm /> }
                } else if containers.state.loading && containers.state.containers.is_empty() {
                    html! { <div class="loading">{"Loading containers..."}</div> }
                } else if containers.state.containers.is_empty() {
                    html! {
                        <div class="empty-state">
                            <p>{"No containers yet"}</p>
                            <small>{"Containers you add will show up here"}</small>
                        </div>
                    }
                } else {
                    let on_refresh_click = {
                        let refresh_containers = containers.actions.refresh_containers.clone();
                        Callback::from(move |_: MouseEvent| refresh_containers.emit(()))
                    };

                    html! {
                        <>
                        <div class="container-toolbar">
                            <h2>{"🪴 My containers"}</h2>
                            <button class="btn btn-secondary" onclick={on_refresh_click} disabled={containers.state.loading}>
                                {"Refresh"}
                            </button>
                        </div>
                        <div class="container-grid">
                            {for containers.state.containers.iter().map(|container| html! {
                                <ContainerCard
                                    key={container.id.clone()}
                                    container={container.clone()}
                                    on_reload={containers.actions.reload_container.clone()}
                                />
                            })}
                        </div>
                        </>
                    }
                }}
            </main>

            <ToastViewport toasts={toasts.toasts} on_dismiss={toasts.remove_toast} />
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
