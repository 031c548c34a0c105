use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use papapp_shared::mercator::{Viewport, DEFAULT_ZOOM};
use papapp_shared::models::{GeoPoint, MIN_POLYGON_VERTICES};

use crate::{config, coords};

const MAP_CONTAINER_ID: &str = "labeling-map-container";

/// Drag threshold in pixels. Movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold, larger than the mouse one.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

/// Size assumed until the container has been laid out.
const REFERENCE_WIDTH: f64 = 960.0;
const REFERENCE_HEIGHT: f64 = 640.0;

const POLYGON_FILL: &str = "rgba(0, 200, 0, 0.3)";
const POLYGON_STROKE: &str = "#000";
const VERTEX_FILL: &str = "#e53935";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Re-measure the container and update the viewport size if it changed.
fn sync_size(viewport: &mut Signal<Viewport>) {
    let Some((w, h)) = coords::container_size(MAP_CONTAINER_ID) else {
        return;
    };
    let current = *viewport.read();
    if (current.width - w).abs() > 0.5 || (current.height - h).abs() > 0.5 {
        viewport.set(current.resized(w, h));
    }
}

fn zoom_by(viewport: &mut Signal<Viewport>, delta: i32) {
    let next = viewport.read().zoomed_by(delta);
    viewport.set(next);
}

#[derive(Debug, Clone, PartialEq)]
struct TileImage {
    key: String,
    src: String,
    style: String,
}

/// Imagery tiles followed by the label overlay tiles, so labels paint on top.
fn tile_images(viewport: &Viewport, imagery: &str, labels: &str, api_key: &str) -> Vec<TileImage> {
    let tiles = viewport.visible_tiles();
    let mut images = Vec::with_capacity(tiles.len() * 2);
    for (layer, template) in [("img", imagery), ("lbl", labels)] {
        for t in &tiles {
            images.push(TileImage {
                key: format!("{layer}-{}-{}-{}-{}", t.z, t.x, t.y, t.left as i64),
                src: t.url(template, api_key),
                style: format!("left:{}px;top:{}px;", t.left.round(), t.top.round()),
            });
        }
    }
    images
}

// ---------------------------------------------------------------------------
// SVG builder
// ---------------------------------------------------------------------------

/// Build the overlay SVG for vertex markers and, once there are enough
/// vertices, the filled polygon. Positions are container pixels.
fn build_overlay_svg(positions: &[(f64, f64)], width: f64, height: f64) -> String {
    let mut svg = String::with_capacity(256 + positions.len() * 256);
    build_polygon(&mut svg, positions);
    build_vertex_markers(&mut svg, positions);
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" style="position:absolute;top:0;left:0;width:100%;height:100%;pointer-events:none;z-index:5;">{svg}</svg>"#
    )
}

fn build_polygon(svg: &mut String, positions: &[(f64, f64)]) {
    if positions.len() < MIN_POLYGON_VERTICES {
        return;
    }
    let points = positions
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!(
        r#"<polygon points="{points}" fill="{POLYGON_FILL}" stroke="{POLYGON_STROKE}" stroke-width="2"/>"#
    ));
}

fn build_vertex_markers(svg: &mut String, positions: &[(f64, f64)]) {
    for (i, &(x, y)) in positions.iter().enumerate() {
        let label = i + 1;
        let label_y = y - 14.0;
        svg.push_str(&format!(r#"<g role="img"><title>Punto {label}</title>"#));
        svg.push_str(&format!(
            r#"<circle cx="{x}" cy="{y}" r="7" fill="{VERTEX_FILL}" stroke="white" stroke-width="2"/>"#
        ));
        svg.push_str(&format!(
            r#"<text x="{x}" y="{label_y}" fill="white" font-size="13" font-family="sans-serif" font-weight="700" text-anchor="middle" stroke="rgba(0,0,0,0.7)" stroke-width="3" paint-order="stroke">{label}</text>"#
        ));
        svg.push_str("</g>");
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(
    center: GeoPoint,
    vertices: Vec<GeoPoint>,
    on_map_click: EventHandler<GeoPoint>,
) -> Element {
    let mut viewport = use_signal(move || {
        Viewport::new(center, DEFAULT_ZOOM, REFERENCE_WIDTH, REFERENCE_HEIGHT)
    });

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_viewport = use_signal(|| None::<Viewport>);

    // Touch state
    let mut touch_start_pos = use_signal(|| None::<(f64, f64)>);
    let mut touch_did_pan = use_signal(|| false);

    let vp = *viewport.read();
    let tiles = tile_images(
        &vp,
        config::imagery_tiles(),
        config::label_tiles(),
        config::maps_api_key(),
    );
    let positions = coords::vertex_screen_positions(&vp, &vertices);
    let overlay = build_overlay_svg(&positions, vp.width, vp.height);

    let container_class = if *is_dragging.read() && *did_drag.read() {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div { class: "map-wrapper",
            div {
                id: MAP_CONTAINER_ID,
                class: "{container_class}",

                onmounted: move |_| sync_size(&mut viewport),

                onwheel: move |evt: Event<WheelData>| {
                    evt.prevent_default();
                    let delta_y = wheel_delta_y(evt.data().delta());
                    zoom_by(&mut viewport, if delta_y < 0.0 { 1 } else { -1 });
                },

                onmousedown: move |evt: Event<MouseData>| {
                    // Only track drag/click for left mouse button
                    if evt.trigger_button() != Some(MouseButton::Primary) {
                        return;
                    }
                    sync_size(&mut viewport);
                    let client = evt.client_coordinates();
                    is_dragging.set(true);
                    did_drag.set(false);
                    drag_start.set((client.x, client.y));
                    drag_start_viewport.set(Some(*viewport.read()));
                },

                onmousemove: move |evt: Event<MouseData>| {
                    if !*is_dragging.read() {
                        return;
                    }
                    let client = evt.client_coordinates();
                    let (sx, sy) = *drag_start.read();
                    let dx = client.x - sx;
                    let dy = client.y - sy;

                    if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                        did_drag.set(true);
                    }
                    if *did_drag.read() {
                        let start = *drag_start_viewport.read();
                        if let Some(start) = start {
                            viewport.set(start.panned_by(dx, dy));
                        }
                    }
                },

                onmouseup: move |evt: Event<MouseData>| {
                    let was_dragging = *is_dragging.read();
                    let was_drag = *did_drag.read();
                    is_dragging.set(false);

                    // A mouseup without drag movement = a click
                    if was_dragging && !was_drag {
                        let client = evt.client_coordinates();
                        let vp = *viewport.read();
                        if let Some(point) = coords::click_to_geo(client.x, client.y, MAP_CONTAINER_ID, &vp) {
                            on_map_click.call(point);
                        }
                    }
                },

                onmouseleave: move |_| {
                    is_dragging.set(false);
                },

                // --- Touch event handlers ---

                ontouchstart: move |evt: Event<TouchData>| {
                    evt.prevent_default();
                    let touches = evt.data().touches();
                    if touches.len() == 1 {
                        sync_size(&mut viewport);
                        let t = &touches[0];
                        touch_start_pos.set(Some((t.client_coordinates().x, t.client_coordinates().y)));
                        touch_did_pan.set(false);
                        drag_start_viewport.set(Some(*viewport.read()));
                    } else {
                        // Multi-finger gestures are not taps
                        touch_start_pos.set(None);
                        touch_did_pan.set(true);
                    }
                },

                ontouchmove: move |evt: Event<TouchData>| {
                    evt.prevent_default();
                    let touches = evt.data().touches();
                    if touches.len() != 1 {
                        return;
                    }
                    let t = &touches[0];
                    let cur = (t.client_coordinates().x, t.client_coordinates().y);
                    let start_pos = *touch_start_pos.read();
                    if let Some(start) = start_pos {
                        if !*touch_did_pan.read() && point_distance(start, cur) > TOUCH_DRAG_THRESHOLD {
                            touch_did_pan.set(true);
                        }
                        if *touch_did_pan.read() {
                            let start_vp = *drag_start_viewport.read();
                            if let Some(start_vp) = start_vp {
                                viewport.set(start_vp.panned_by(cur.0 - start.0, cur.1 - start.1));
                            }
                        }
                    }
                },

                ontouchend: move |evt: Event<TouchData>| {
                    evt.prevent_default();
                    let remaining = evt.data().touches().len();
                    if remaining > 0 {
                        return;
                    }

                    // Single-finger tap: no pan occurred
                    let start_pos = *touch_start_pos.read();
                    if let (Some(start), false) = (start_pos, *touch_did_pan.read()) {
                        let vp = *viewport.read();
                        if let Some(point) = coords::click_to_geo(start.0, start.1, MAP_CONTAINER_ID, &vp) {
                            on_map_click.call(point);
                        }
                    }
                    touch_start_pos.set(None);
                },

                ontouchcancel: move |_evt: Event<TouchData>| {
                    touch_start_pos.set(None);
                    touch_did_pan.set(false);
                },

                for tile in tiles {
                    img {
                        key: "{tile.key}",
                        class: "map-tile",
                        src: "{tile.src}",
                        style: "{tile.style}",
                        draggable: "false",
                        alt: "",
                    }
                }

                div {
                    class: "map-overlay",
                    dangerous_inner_html: "{overlay}",
                }
            }

            div { class: "zoom-controls",
                button {
                    "aria-label": "Acercar",
                    onclick: move |_| zoom_by(&mut viewport, 1),
                    "+"
                }
                button {
                    "aria-label": "Alejar",
                    onclick: move |_| zoom_by(&mut viewport, -1),
                    "\u{2212}"
                }
                button {
                    "aria-label": "Centrar en mi ubicación",
                    onclick: move |_| {
                        let current = *viewport.read();
                        viewport.set(Viewport { center, ..current });
                    },
                    "\u{25ce}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_without_vertices_is_empty_svg() {
        let svg = build_overlay_svg(&[], 800.0, 600.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
        assert!(!svg.contains("<circle"));
        assert!(!svg.contains("<polygon"));
    }

    #[test]
    fn test_two_vertices_draw_markers_but_no_polygon() {
        let svg = build_overlay_svg(&[(10.0, 20.0), (30.0, 40.0)], 800.0, 600.0);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(!svg.contains("<polygon"));
    }

    #[test]
    fn test_three_vertices_fill_polygon_in_click_order() {
        let mut svg = String::new();
        build_polygon(&mut svg, &[(10.0, 20.0), (30.0, 40.0), (50.0, 5.5)]);
        assert!(svg.contains(r#"points="10,20 30,40 50,5.5""#));
        assert!(svg.contains(POLYGON_FILL));
        assert!(svg.contains(r##"stroke="#000""##));
    }

    #[test]
    fn test_markers_are_numbered_from_one() {
        let mut svg = String::new();
        build_vertex_markers(&mut svg, &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert!(svg.contains("<title>Punto 1</title>"));
        assert!(svg.contains("<title>Punto 3</title>"));
        assert!(!svg.contains("Punto 0"));
    }

    #[test]
    fn test_polygon_drawn_under_markers() {
        let svg = build_overlay_svg(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)], 100.0, 100.0);
        let polygon_at = svg.find("<polygon").unwrap();
        let marker_at = svg.find("<circle").unwrap();
        assert!(polygon_at < marker_at);
    }

    #[test]
    fn test_tile_images_stack_labels_over_imagery() {
        let vp = Viewport::new(GeoPoint::new(-34.6, -58.4), 15, 512.0, 512.0);
        let images = tile_images(&vp, "/img/{z}/{x}/{y}", "/lbl/{z}/{x}/{y}?k={key}", "KEY");
        let n = vp.visible_tiles().len();
        assert_eq!(images.len(), n * 2);
        assert!(images[..n].iter().all(|t| t.src.starts_with("/img/15/")));
        assert!(images[n..].iter().all(|t| t.src.starts_with("/lbl/15/") && t.src.ends_with("?k=KEY")));
    }

    #[test]
    fn test_tile_image_keys_are_unique() {
        let vp = Viewport::new(GeoPoint::new(0.0, 179.9), 3, 1200.0, 600.0);
        let images = tile_images(&vp, "/a/{z}/{x}/{y}", "/b/{z}/{x}/{y}", "");
        let mut keys: Vec<&str> = images.iter().map(|t| t.key.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), images.len());
    }

    #[test]
    fn test_point_distance() {
        assert!((point_distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-9);
    }
}
