use dioxus::logger::tracing;
use dioxus::prelude::*;
use papapp_shared::labeling::{LabelingEvent, LabelingState};
use papapp_shared::models::GeoPoint;
use papapp_shared::session::{SessionEvent, SessionState, SessionView};

use crate::api;
use crate::components::label_form::LabelForm;
use crate::components::map_view::MapView;
use crate::components::notice::Notice;
use crate::components::status_view::StatusView;
use crate::geolocation;

/// Fold the outcomes of the two startup requests into the session state.
/// `None` means the request is still pending.
fn session_from(
    wake: Option<&Result<(), String>>,
    location: Option<&Result<GeoPoint, String>>,
) -> SessionState {
    let mut session = SessionState::default();
    if let Some(result) = wake {
        session = session.apply(match result {
            Ok(()) => SessionEvent::ServerAwake,
            Err(e) => SessionEvent::ServerUnreachable(e.clone()),
        });
    }
    if let Some(result) = location {
        session = session.apply(match result {
            Ok(point) => SessionEvent::LocationAcquired(*point),
            Err(e) => SessionEvent::LocationFailed(e.clone()),
        });
    }
    session
}

/// Apply an event to the labeling state and start the submission it produced, if any.
///
/// The state is already reset when the request goes out; its outcome comes
/// back as another event.
fn dispatch(mut labeling: Signal<LabelingState>, event: LabelingEvent) {
    let (next, outbound) = labeling.read().apply(event);
    labeling.set(next);

    if let Some(request) = outbound {
        tracing::info!(
            vertices = request.poly.len(),
            variety = %request.variety,
            "Submitting label"
        );
        spawn(async move {
            let result = api::submit_label(&request).await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "Label submission failed");
            }
            dispatch(labeling, LabelingEvent::SubmissionFinished(result));
        });
    }
}

#[component]
pub fn Labeler() -> Element {
    // Startup requests run concurrently and independently.
    let wake_resource = use_resource(|| async {
        let result = api::wake_up().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Wake probe failed");
        }
        result
    });
    let location_resource = use_resource(|| geolocation::current_position());

    let labeling = use_signal(LabelingState::default);

    let wake = wake_resource.read().clone();
    let location = location_resource.read().clone();
    let session = session_from(wake.as_ref(), location.as_ref());

    let center = match session.view() {
        SessionView::Ready(center) => center,
        _ => {
            return rsx! {
                StatusView { text: session.status_text().unwrap_or_default() }
            };
        }
    };

    let state = labeling.read().clone();

    rsx! {
        div { class: "container",
            MapView {
                center: center,
                vertices: state.vertices.clone(),
                on_map_click: move |point: GeoPoint| dispatch(labeling, LabelingEvent::MapClicked(point)),
            }

            LabelForm {
                state: state.clone(),
                on_event: move |event: LabelingEvent| dispatch(labeling, event),
            }

            if let Some(message) = state.notice.clone() {
                Notice {
                    message: message,
                    on_dismiss: move |_| dispatch(labeling, LabelingEvent::DismissNotice),
                }
            }
        }
    }
}
