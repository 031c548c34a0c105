use dioxus::prelude::*;
use papapp_shared::labeling::{LabelingEvent, LabelingState};
use papapp_shared::messages;
use papapp_shared::models::{MIN_POLYGON_VERTICES, VARIETIES};

/// Progress hint shown while drawing.
fn vertex_hint(count: usize) -> String {
    match count {
        0 => "Toque el mapa para marcar el primer punto".to_string(),
        1 => "1 punto".to_string(),
        n if n < MIN_POLYGON_VERTICES => format!("{} puntos (minimo {})", n, MIN_POLYGON_VERTICES),
        n => format!("{} puntos", n),
    }
}

#[component]
pub fn LabelForm(state: LabelingState, on_event: EventHandler<LabelingEvent>) -> Element {
    if !state.is_drawing() {
        return rsx! {
            div { class: "button-container",
                button {
                    onclick: move |_| on_event.call(LabelingEvent::StartLabeling),
                    {messages::START_LABELING}
                }
            }
        };
    }

    let attributes = state.attributes.clone();
    let hint = vertex_hint(state.vertices.len());
    let submit_disabled = !state.can_submit();

    rsx! {
        div { class: "button-container",
            select {
                class: "select",
                "aria-label": "Variedad",
                value: "{attributes.variety}",
                onchange: move |evt: Event<FormData>| {
                    on_event.call(LabelingEvent::VarietySelected(evt.value().to_string()));
                },
                for v in VARIETIES.iter() {
                    option {
                        value: "{v}",
                        selected: attributes.variety == *v,
                        "{v}"
                    }
                }
            }
            input {
                r#type: "number",
                class: "input",
                placeholder: messages::MIN_AGE_PLACEHOLDER,
                value: "{attributes.min_age}",
                oninput: move |evt: Event<FormData>| {
                    on_event.call(LabelingEvent::MinAgeChanged(evt.value().to_string()));
                },
            }
            input {
                r#type: "number",
                class: "input",
                placeholder: messages::MAX_AGE_PLACEHOLDER,
                value: "{attributes.max_age}",
                oninput: move |evt: Event<FormData>| {
                    on_event.call(LabelingEvent::MaxAgeChanged(evt.value().to_string()));
                },
            }
            span { class: "vertex-hint", "{hint}" }
            button {
                class: "secondary",
                onclick: move |_| on_event.call(LabelingEvent::Cancel),
                {messages::CANCEL}
            }
            button {
                disabled: submit_disabled,
                onclick: move |_| on_event.call(LabelingEvent::Submit),
                {messages::SUBMIT}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_hint_prompts_first_tap() {
        assert!(vertex_hint(0).contains("primer punto"));
    }

    #[test]
    fn test_vertex_hint_mentions_minimum_until_reached() {
        assert_eq!(vertex_hint(1), "1 punto");
        assert_eq!(vertex_hint(2), "2 puntos (minimo 3)");
        assert_eq!(vertex_hint(3), "3 puntos");
        assert_eq!(vertex_hint(12), "12 puntos");
    }
}
