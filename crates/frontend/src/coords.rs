use papapp_shared::mercator::Viewport;
use papapp_shared::models::GeoPoint;

/// Convert client (viewport) coordinates to container-relative pixel coordinates.
pub fn client_to_container(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

/// Bounding client rect of an element by id.
pub fn element_rect(container_id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    Some(element.get_bounding_client_rect())
}

/// Live `(width, height)` of the container, if it is mounted and laid out.
pub fn container_size(container_id: &str) -> Option<(f64, f64)> {
    let rect = element_rect(container_id)?;
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    Some((rect.width(), rect.height()))
}

/// Pure part of click handling: container pixel → coordinate, or `None` when
/// the point falls outside the container.
pub fn container_to_geo(viewport: &Viewport, container_x: f64, container_y: f64) -> Option<GeoPoint> {
    if container_x < 0.0
        || container_y < 0.0
        || container_x > viewport.width
        || container_y > viewport.height
    {
        return None;
    }
    Some(viewport.screen_to_geo(container_x, container_y))
}

/// Map a click in client coordinates to a coordinate on the rendered map.
pub fn click_to_geo(
    client_x: f64,
    client_y: f64,
    container_id: &str,
    viewport: &Viewport,
) -> Option<GeoPoint> {
    let rect = element_rect(container_id)?;
    let (x, y) = client_to_container(client_x, client_y, rect.left(), rect.top());
    container_to_geo(&viewport.resized(rect.width(), rect.height()), x, y)
}

/// Screen positions of the polygon vertices, in insertion order.
pub fn vertex_screen_positions(viewport: &Viewport, vertices: &[GeoPoint]) -> Vec<(f64, f64)> {
    vertices.iter().map(|&v| viewport.geo_to_screen(v)).collect()
}
