//! Fixed user-facing strings (Spanish).

pub const WAKING_SERVER: &str = "Prendiendo el servidor, se puede demorar varios minutos...";
pub const LOADING_MAP: &str = "Cargando mapa...";
pub const NEED_MORE_POINTS: &str =
    "Tiene que seleccionar mas puntos para delimitar correctamente un area";
pub const GEOLOCATION_UNSUPPORTED: &str = "Este navegador no soporta geolocalización.";

pub const START_LABELING: &str = "Etiquetar cultivo";
pub const CANCEL: &str = "Deshacer";
pub const SUBMIT: &str = "Enviar";
pub const CLOSE: &str = "Cerrar";
pub const MIN_AGE_PLACEHOLDER: &str = "Edad minima";
pub const MAX_AGE_PLACEHOLDER: &str = "Edad maxima";

/// Full-screen text for a fatal session error.
pub fn fatal_error(message: &str) -> String {
    format!("Error: {}", message)
}

pub fn location_error(message: &str) -> String {
    format!("Error obteniendo la ubicación: {}", message)
}

pub fn submission_failed(message: &str) -> String {
    format!("No se pudo enviar la etiqueta: {}", message)
}
