use yew::prelude::*;
use shared::User;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub user: Option<User>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_logout_click = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| {
            on_logout.emit(());
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"🌱 Garden Diary"}</h1>
                <div class="header-right">
                    {if let Some(user) = &props.user {
                        html! {
                            <>
                                <span class="header-user">{format!("Signed in as {}", user.display_name())}</span>
                                <button class="btn btn-secondary" onclick={on_logout_click}>{"Sign out"}</button>
                            </>
                        }
                    } else {
                        html! {
                            <span class="header-user">{"Not signed in"}</span>
                        }
                    }}
                </div>
            </div>
        </header>
    }
}
