use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;
use shared::Container;
use wasm_bindgen_futures::spawn_local;
use crate::hooks::use_app_context::use_app_context;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::toaster::{ToastOptions, ToastType, Toaster};

/// Containers shown for one session.
///
/// `generation` moves on every user change; results tagged with an older
/// generation belong to a previous session and are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainersState {
    pub generation: u64,
    pub containers: Vec<Container>,
    pub loading: bool,
}

pub enum ContainersAction {
    /// New session (or signed out): forget everything from the old one
    Reset { generation: u64 },
    Loading { generation: u64 },
    Loaded { generation: u64, containers: Vec<Container> },
    Failed { generation: u64 },
    /// Swap in a freshly fetched copy of one container
    Reloaded { generation: u64, container: Container },
}

impl ContainersAction {
    fn generation(&self) -> u64 {
        match self {
            ContainersAction::Reset { generation }
            | ContainersAction::Loading { generation }
            | ContainersAction::Loaded { generation, .. }
            | ContainersAction::Failed { generation }
            | ContainersAction::Reloaded { generation, .. } => *generation,
        }
    }
}

impl Reducible for ContainersState {
    type Action = ContainersAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if let ContainersAction::Reset { generation } = action {
            return Rc::new(ContainersState {
                generation,
                containers: Vec::new(),
                loading: false,
            });
        }

        if action.generation() != self.generation {
            return self;
        }

        let mut next = (*self).clone();
        match action {
            ContainersAction::Reset { .. } => {}
            ContainersAction::Loading { .. } => next.loading = true,
            ContainersAction::Loaded { containers, .. } => {
                next.containers = containers;
                next.loading = false;
            }
            ContainersAction::Failed { .. } => next.loading = false,
            ContainersAction::Reloaded { container, .. } => {
                match next.containers.iter_mut().find(|existing| existing.id == container.id) {
                    Some(existing) => *existing = container,
                    None => return self,
                }
            }
        }
        Rc::new(next)
    }
}

pub struct UseContainersResult {
    pub state: ContainersState,
    pub actions: UseContainersActions,
}

#[derive(Clone, PartialEq)]
pub struct UseContainersActions {
    pub refresh_containers: Callback<()>,
    pub reload_container: Callback<String>,
}

fn fetch_containers(
    client: ApiClient,
    toaster: Toaster,
    page_size: u32,
    dispatcher: UseReducerDispatcher<ContainersState>,
    generation: u64,
) {
    spawn_local(async move {
        dispatcher.dispatch(ContainersAction::Loading { generation });

        match client.list_containers(1, page_size).await {
            Ok(result) => {
                Logger::debug_with_component(
                    "containers",
                    &format!("Loaded {} of {} containers", result.items.len(), result.total_items),
                );
                dispatcher.dispatch(ContainersAction::Loaded {
                    generation,
                    containers: result.items,
                });
            }
            Err(e) => {
                dispatcher.dispatch(ContainersAction::Failed { generation });
                toaster.toast(
                    e.to_string(),
                    ToastOptions::new()
                        .kind(ToastType::Error)
                        .title("Could not load containers"),
                );
            }
        }
    });
}

/// Containers of the signed-in user; fetched whenever `user_id` changes
/// to a user and emptied as soon as it changes at all
#[hook]
pub fn use_containers(user_id: Option<String>) -> UseContainersResult {
    let context = use_app_context();
    let state = use_reducer(ContainersState::default);
    let generation: Rc<RefCell<u64>> = use_mut_ref(|| 0);

    let refresh_containers = {
        let client = context.client.clone();
        let toaster = context.toaster.clone();
        let page_size = context.config.page_size;
        let dispatcher = state.dispatcher();
        let generation = generation.clone();

        use_callback((), move |_, _| {
            fetch_containers(
                client.clone(),
                toaster.clone(),
                page_size,
                dispatcher.clone(),
                *generation.borrow(),
            );
        })
    };

    // Refetch one container, e.g. after it was edited elsewhere
    let reload_container = {
        let client = context.client.clone();
        let toaster = context.toaster.clone();
        let dispatcher = state.dispatcher();
        let generation = generation.clone();

        use_callback((), move |container_id: String, _| {
            let client = client.clone();
            let toaster = toaster.clone();
            let dispatcher = dispatcher.clone();
            let generation = *generation.borrow();

            spawn_local(async move {
                match client.get_container(&container_id).await {
                    Ok(container) => {
                        dispatcher.dispatch(ContainersAction::Reloaded { generation, container });
                    }
                    Err(e) => {
                        toaster.error(format!("Could not reload container: {}", e));
                    }
                }
            });
        })
    };

    {
        let client = context.client.clone();
        let toaster = context.toaster.clone();
        let page_size = context.config.page_size;
        let dispatcher = state.dispatcher();
        let generation = generation.clone();

        use_effect_with(user_id, move |user_id| {
            let current = {
                let mut generation = generation.borrow_mut();
                *generation += 1;
                *generation
            };
            dispatcher.dispatch(ContainersAction::Reset { generation: current });

            if user_id.is_some() {
                fetch_containers(client, toaster, page_size, dispatcher, current);
            }
            || ()
        });
    }

    let actions = UseContainersActions {
        refresh_containers,
        reload_container,
    };

    UseContainersResult {
        state: (*state).clone(),
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(id: &str, name: &str) -> Container {
        serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
    }

    fn reduce(state: Rc<ContainersState>, action: ContainersAction) -> Rc<ContainersState> {
        state.reduce(action)
    }

    fn names(state: &ContainersState) -> Vec<String> {
        state.containers.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_loaded_applies_to_current_generation() {
        let state = reduce(Rc::new(ContainersState::default()), ContainersAction::Reset { generation: 1 });
        let state = reduce(state, ContainersAction::Loading { generation: 1 });
        assert!(state.loading);

        let state = reduce(
            state,
            ContainersAction::Loaded { generation: 1, containers: vec![container("c1", "Balcony box")] },
        );
        assert!(!state.loading);
        assert_eq!(names(&state), vec!["Balcony box"]);
    }

    #[test]
    fn test_response_landing_after_logout_is_dropped() {
        // Signed in as A, fetch in flight
        let state = reduce(Rc::new(ContainersState::default()), ContainersAction::Reset { generation: 1 });
        let state = reduce(state, ContainersAction::Loading { generation: 1 });

        // A signs out before the response arrives
        let state = reduce(state, ContainersAction::Reset { generation: 2 });
        let state = reduce(
            state,
            ContainersAction::Loaded { generation: 1, containers: vec![container("a1", "A's bed")] },
        );

        assert!(state.containers.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_user_switch_clears_previous_users_containers() {
        let state = reduce(Rc::new(ContainersState::default()), ContainersAction::Reset { generation: 1 });
        let state = reduce(
            state,
            ContainersAction::Loaded { generation: 1, containers: vec![container("a1", "A's bed")] },
        );

        // B signs in: A's list is gone before B's fetch completes
        let state = reduce(state, ContainersAction::Reset { generation: 2 });
        assert!(state.containers.is_empty());

        let state = reduce(state, ContainersAction::Failed { generation: 1 });
        let state = reduce(
            state,
            ContainersAction::Loaded { generation: 2, containers: vec![container("b1", "B's pot")] },
        );
        assert_eq!(names(&state), vec!["B's pot"]);
    }

    #[test]
    fn test_reload_updates_latest_list_in_place() {
        let state = reduce(Rc::new(ContainersState::default()), ContainersAction::Reset { generation: 3 });
        let state = reduce(
            state,
            ContainersAction::Loaded {
                generation: 3,
                containers: vec![container("c1", "Old name"), container("c2", "Herbs")],
            },
        );
        // A refresh lands between the reload request and its response
        let state = reduce(
            state,
            ContainersAction::Loaded {
                generation: 3,
                containers: vec![container("c1", "Old name"), container("c2", "Herbs"), container("c3", "Tomatoes")],
            },
        );
        let state = reduce(
            state,
            ContainersAction::Reloaded { generation: 3, container: container("c1", "New name") },
        );

        assert_eq!(names(&state), vec!["New name", "Herbs", "Tomatoes"]);
    }

    #[test]
    fn test_stale_or_unknown_reload_is_ignored() {
        let state = reduce(Rc::new(ContainersState::default()), ContainersAction::Reset { generation: 4 });
        let state = reduce(
            state,
            ContainersAction::Loaded { generation: 4, containers: vec![container("c1", "Herbs")] },
        );

        let stale = reduce(
            state.clone(),
            ContainersAction::Reloaded { generation: 3, container: container("c1", "Other user's") },
        );
        assert_eq!(names(&stale), vec!["Herbs"]);

        let unknown = reduce(
            state,
            ContainersAction::Reloaded { generation: 4, container: container("c9", "Deleted meanwhile") },
        );
        assert_eq!(names(&unknown), vec!["Herbs"]);
    }
}
