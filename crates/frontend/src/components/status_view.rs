use dioxus::prelude::*;

/// Full-screen text shown instead of the map (loading states and fatal errors).
#[component]
pub fn StatusView(text: String) -> Element {
    rsx! {
        div { class: "container",
            p { class: "message", "{text}" }
        }
    }
}
