//! Build-time configuration. Values come from environment variables read by
//! `option_env!` when the WASM bundle is compiled; unset or empty values fall
//! back to the defaults below.

pub const DEFAULT_API_BASE: &str = "https://papapp-labeling.onrender.com";

/// Satellite imagery layer of the hybrid basemap.
pub const DEFAULT_IMAGERY_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

/// Transparent place-name/boundary layer drawn over the imagery.
pub const DEFAULT_LABEL_TILES: &str = "https://server.arcgisonline.com/ArcGIS/rest/services/Reference/World_Boundaries_and_Places/MapServer/tile/{z}/{y}/{x}";

fn non_empty(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

/// Base URL of the labeling service.
pub fn api_base() -> &'static str {
    non_empty(option_env!("PAPAPP_API_BASE"), DEFAULT_API_BASE)
}

/// Key substituted into `{key}` of the tile templates.
pub fn maps_api_key() -> &'static str {
    non_empty(option_env!("PAPAPP_MAPS_API_KEY"), "")
}

pub fn imagery_tiles() -> &'static str {
    non_empty(option_env!("PAPAPP_IMAGERY_TILES"), DEFAULT_IMAGERY_TILES)
}

pub fn label_tiles() -> &'static str {
    non_empty(option_env!("PAPAPP_LABEL_TILES"), DEFAULT_LABEL_TILES)
}
