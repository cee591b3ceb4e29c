use dioxus::prelude::*;
use dioxus_logger::tracing::{error, warn};
use shared_types::BodyCollectionPolicy;

use crate::api::{create_policy, delete_policy, fetch_policies, toggle_policy, ApiError};
use crate::lifecycle::RequestTracker;
use crate::time_codec::display;

#[derive(Debug, Clone, PartialEq)]
pub enum PoliciesState {
    Loading,
    Failed,
    Empty,
    Loaded(Vec<BodyCollectionPolicy>),
}

impl PoliciesState {
    pub fn from_fetch(result: Result<Vec<BodyCollectionPolicy>, ApiError>) -> Self {
        match result {
            Ok(policies) if policies.is_empty() => Self::Empty,
            Ok(policies) => Self::Loaded(policies),
            Err(err) => {
                error!("Failed to load policies: {}", err);
                Self::Failed
            }
        }
    }
}

/// Inline message for a rejected add.
pub fn add_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Conflict { .. } => "Pattern already exists".to_string(),
        other => other.user_message("Failed to add policy"),
    }
}

fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message("Delete this policy?").ok())
        .unwrap_or(false)
}

fn reload(mut state: Signal<PoliciesState>, tracker: RequestTracker) {
    let ticket = tracker.issue();
    state.set(PoliciesState::Loading);
    spawn(async move {
        let result = fetch_policies().await;
        if tracker.is_current(ticket) {
            state.set(PoliciesState::from_fetch(result));
        }
    });
}

#[component]
pub fn PoliciesView() -> Element {
    let state = use_signal(|| PoliciesState::Loading);
    let mut pattern = use_signal(String::new);
    let mut add_error = use_signal(|| None::<String>);
    let tracker = use_hook(RequestTracker::new);
    let mut started = use_signal(|| false);

    {
        let tracker = tracker.clone();
        use_drop(move || tracker.abandon());
    }

    {
        let tracker = tracker.clone();
        use_effect(move || {
            if started() {
                return;
            }
            started.set(true);
            reload(state, tracker.clone());
        });
    }

    let add = {
        let tracker = tracker.clone();
        move || {
            let value = pattern().trim().to_string();
            if value.is_empty() {
                return;
            }
            let tracker = tracker.clone();
            spawn(async move {
                match create_policy(&value).await {
                    Ok(_) => {
                        pattern.set(String::new());
                        add_error.set(None);
                        reload(state, tracker);
                    }
                    Err(err) => {
                        warn!("Add policy {} rejected: {}", value, err);
                        add_error.set(Some(add_error_message(&err)));
                    }
                }
            });
        }
    };

    let toggle = {
        let tracker = tracker.clone();
        move |id: i64| {
            let tracker = tracker.clone();
            spawn(async move {
                if let Err(err) = toggle_policy(id).await {
                    warn!("Toggle policy {} failed: {}", id, err);
                }
                reload(state, tracker);
            });
        }
    };

    let remove = {
        let tracker = tracker.clone();
        move |id: i64| {
            if !confirm_delete() {
                return;
            }
            let tracker = tracker.clone();
            spawn(async move {
                if let Err(err) = delete_policy(id).await {
                    warn!("Delete policy {} failed: {}", id, err);
                }
                reload(state, tracker);
            });
        }
    };

    let body = match state() {
        PoliciesState::Loading => rsx! {
            div { class: "loading", "Loading..." }
        },
        PoliciesState::Failed => rsx! {
            div { class: "empty-state", "Failed to load policies" }
        },
        PoliciesState::Empty => rsx! {
            div { class: "empty-state", "No policies configured" }
        },
        PoliciesState::Loaded(policies) => rsx! {
            table {
                thead {
                    tr {
                        th { "Path Pattern" }
                        th { "Enabled" }
                        th { "Created" }
                        th { "Action" }
                    }
                }
                tbody {
                    for policy in policies {
                        tr {
                            key: "{policy.id}",
                            td { "{policy.path_pattern}" }
                            td {
                                label {
                                    class: "toggle",
                                    input {
                                        r#type: "checkbox",
                                        class: "toggle-input",
                                        checked: policy.enabled,
                                        onchange: {
                                            let toggle = toggle.clone();
                                            let id = policy.id;
                                            move |_| toggle(id)
                                        },
                                    }
                                    span { class: "toggle-slider" }
                                }
                            }
                            td { "{display(policy.created_at.as_deref())}" }
                            td {
                                button {
                                    class: "btn btn-danger btn-sm",
                                    onclick: {
                                        let remove = remove.clone();
                                        let id = policy.id;
                                        move |_| remove(id)
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "console-page policies-page",
            div {
                class: "card",
                div { class: "card-title", "Body Collection Policies" }
                div {
                    class: "form-row",
                    input {
                        class: "form-input",
                        r#type: "text",
                        placeholder: "Path pattern (e.g. /server-a/**)",
                        value: "{pattern}",
                        oninput: move |e| pattern.set(e.value()),
                        onkeydown: {
                            let add = add.clone();
                            move |e: KeyboardEvent| {
                                if e.key() == Key::Enter {
                                    add();
                                }
                            }
                        },
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: {
                            let add = add.clone();
                            move |_| add()
                        },
                        "Add Policy"
                    }
                }
                if let Some(message) = add_error() {
                    div { class: "form-error", "{message}" }
                }
                {body}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::failure_from_status;

    fn make_policy(id: i64, pattern: &str) -> BodyCollectionPolicy {
        BodyCollectionPolicy {
            id,
            path_pattern: pattern.to_string(),
            enabled: true,
            created_at: Some("2024-06-15T10:00:00Z".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn test_conflict_message() {
        let err = failure_from_status(409, r#"{"detail":"Duplicate: /a/**"}"#, None);
        assert_eq!(add_error_message(&err), "Pattern already exists");
    }

    #[test]
    fn test_other_failures_prefer_server_detail() {
        let err = failure_from_status(400, r#"{"detail":"Pattern must start with /"}"#, None);
        assert_eq!(add_error_message(&err), "Pattern must start with /");

        let err = failure_from_status(500, "", None);
        assert_eq!(add_error_message(&err), "Failed to add policy");

        let err = ApiError::Transport("offline".to_string());
        assert_eq!(add_error_message(&err), "Failed to add policy");
    }

    #[test]
    fn test_list_states() {
        assert_eq!(PoliciesState::from_fetch(Ok(vec![])), PoliciesState::Empty);
        assert_eq!(
            PoliciesState::from_fetch(Ok(vec![make_policy(1, "/a/**")])),
            PoliciesState::Loaded(vec![make_policy(1, "/a/**")])
        );
        assert_eq!(
            PoliciesState::from_fetch(Err(ApiError::Decode("eof".into()))),
            PoliciesState::Failed
        );
    }
}
