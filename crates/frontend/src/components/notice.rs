use dioxus::prelude::*;
use papapp_shared::messages;

/// Dismissable modal notice. Clicking the backdrop or the button closes it.
#[component]
pub fn Notice(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_dismiss.call(()),

            div {
                class: "modal-content",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                p { "{message}" }
                button {
                    onclick: move |_| on_dismiss.call(()),
                    {messages::CLOSE}
                }
            }
        }
    }
}
