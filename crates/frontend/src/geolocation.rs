use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use papapp_shared::{messages, models::GeoPoint};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type PositionSender = Rc<RefCell<Option<oneshot::Sender<Result<GeoPoint, String>>>>>;

fn deliver(sender: &PositionSender, result: Result<GeoPoint, String>) {
    if let Some(tx) = sender.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

/// One-shot position fix from the browser Geolocation API.
///
/// Errors are display-ready messages. No retry.
pub async fn current_position() -> Result<GeoPoint, String> {
    let window = web_sys::window().ok_or_else(|| messages::GEOLOCATION_UNSUPPORTED.to_string())?;
    let geolocation = window
        .navigator()
        .geolocation()
        .map_err(|_| messages::GEOLOCATION_UNSUPPORTED.to_string())?;

    let (tx, rx) = oneshot::channel();
    let sender: PositionSender = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let sender = sender.clone();
        Closure::once_into_js(move |position: web_sys::Position| {
            let coords = position.coords();
            deliver(
                &sender,
                Ok(GeoPoint::new(coords.latitude(), coords.longitude())),
            );
        })
    };
    let on_error = Closure::once_into_js(move |error: web_sys::PositionError| {
        deliver(&sender, Err(messages::location_error(&error.message())));
    });

    geolocation
        .get_current_position_with_error_callback(
            on_success.unchecked_ref::<js_sys::Function>(),
            Some(on_error.unchecked_ref::<js_sys::Function>()),
        )
        .map_err(|e| messages::location_error(&format!("{:?}", e)))?;

    rx.await
        .map_err(|_| messages::GEOLOCATION_UNSUPPORTED.to_string())?
}
