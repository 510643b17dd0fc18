use yew::prelude::*;
use chrono::Utc;
use shared::container::{container_plants, format_last_watered, format_plants_count, format_species_count};
use shared::Container;

#[derive(Properties, PartialEq)]
pub struct ContainerCardProps {
    pub container: Container,
    pub on_reload: Callback<String>,
}

#[function_component(ContainerCard)]
pub fn container_card(props: &ContainerCardProps) -> Html {
    let container = &props.container;
    let plants = container_plants(container);

    let on_reload_click = {
        let on_reload = props.on_reload.clone();
        let container_id = container.id.clone();
        Callback::from(move |_: MouseEvent| {
            on_reload.emit(container_id.clone());
        })
    };

    html! {
        <div class="container-card">
            <div class="container-card-header">
                <h3 class="container-name">{&container.name}</h3>
                <button class="btn-icon" title="Reload" onclick={on_reload_click}>{"🔄"}</button>
            </div>

            <div class="container-meta">
                {if !container.location.is_empty() {
                    html! { <span class="container-location">{format!("📍 {}", container.location)}</span> }
                } else {
                    html! {}
                }}
                {if !container.size.is_empty() {
                    html! { <span class="container-size">{format!("📏 {}", container.size)}</span> }
                } else {
                    html! {}
                }}
            </div>

            <div class="container-summary">
                <span class="plants-count">{format_plants_count(container)}</span>
                <span class="species-count">{format_species_count(container)}</span>
            </div>

            {if plants.is_empty() {
                html! {}
            } else {
                html! {
                    <ul class="plant-list">
                        {for plants.iter().map(|plant| html! {
                            <li key={plant.id.clone()} class="plant-item">
                                <span class="plant-species">{&plant.species}</span>
                                <span class="plant-quantity">{format!("× {}", plant.quantity)}</span>
                            </li>
                        })}
                    </ul>
                }
            }}

            <div class="container-watered">{format!("💧 {}", format_last_watered(container, Utc::now()))}</div>
        </div>
    }
}
