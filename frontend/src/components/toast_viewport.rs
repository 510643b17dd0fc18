use yew::prelude::*;
use gloo::timers::callback::Timeout;
use crate::services::toaster::{Toast, ToastId};

#[derive(Properties, PartialEq)]
pub struct ToastViewportProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<ToastId>,
}

/// Renders pending toasts oldest first
#[function_component(ToastViewport)]
pub fn toast_viewport(props: &ToastViewportProps) -> Html {
    html! {
        <div class="toast-viewport" role="region" aria-live="polite">
            {for props.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id.clone()} toast={toast.clone()} on_dismiss={props.on_dismiss.clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<ToastId>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    // Auto-dismiss; dropping the Timeout on unmount cancels it
    {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id.clone();
        let duration = props.toast.data.duration;
        use_effect_with(id, move |id| {
            let timeout = duration.map(|millis| {
                let id = id.clone();
                Timeout::new(millis, move || on_dismiss.emit(id))
            });
            move || drop(timeout)
        });
    }

    let on_close_click = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id.clone();
        Callback::from(move |_: MouseEvent| {
            on_dismiss.emit(id.clone());
        })
    };

    let data = &props.toast.data;

    html! {
        <div class={classes!("toast", data.kind.css_class())} role="status">
            <span class="toast-icon">{data.kind.icon()}</span>
            <div class="toast-content">
                {if let Some(title) = &data.title {
                    html! { <div class="toast-title">{title}</div> }
                } else {
                    html! {}
                }}
                <div class="toast-description">{&data.description}</div>
            </div>
            {if data.dismissible.unwrap_or(false) {
                html! {
                    <button class="toast-close" aria-label="Dismiss" onclick={on_close_click}>{"✕"}</button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use gloo::timers::future::TimeoutFuture;
    use crate::services::toaster::{ToastData, ToastType};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn toast(id: &str, duration: Option<u32>) -> Toast {
        Toast {
            id: id.to_string(),
            data: ToastData {
                kind: ToastType::Info,
                title: None,
                description: format!("toast {}", id),
                dismissible: Some(true),
                progress: None,
                duration,
            },
        }
    }

    #[wasm_bindgen_test]
    async fn test_timed_toast_dismisses_itself() {
        let document = gloo::utils::document();
        let root = document.create_element("div").unwrap();
        gloo::utils::body().append_child(&root).unwrap();

        let dismissed = Rc::new(RefCell::new(Vec::<ToastId>::new()));
        let props = ToastViewportProps {
            toasts: vec![toast("short", Some(20)), toast("sticky", None)],
            on_dismiss: {
                let dismissed = dismissed.clone();
                Callback::from(move |id: ToastId| dismissed.borrow_mut().push(id))
            },
        };

        let _app = yew::Renderer::<ToastViewport>::with_root_and_props(root.clone(), props).render();
        TimeoutFuture::new(0).await;
        assert_eq!(root.query_selector_all(".toast").unwrap().length(), 2);
        assert!(dismissed.borrow().is_empty());

        TimeoutFuture::new(100).await;
        assert_eq!(*dismissed.borrow(), vec!["short".to_string()]);
    }
}
