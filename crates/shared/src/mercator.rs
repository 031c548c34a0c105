/// Web-Mercator (EPSG:3857) math for the slippy map.
///
/// World pixel space at zoom `z` is a square of `TILE_SIZE * 2^z` pixels,
/// origin at the top-left (lng -180, lat ~85.05), X east, Y south.
use std::f64::consts::PI;

use crate::models::GeoPoint;

pub const TILE_SIZE: f64 = 256.0;

pub const MIN_ZOOM: u32 = 3;
pub const MAX_ZOOM: u32 = 20;
pub const DEFAULT_ZOOM: u32 = 15;

/// Latitude limit of the square Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Side of the world square in pixels at `zoom`.
pub fn world_size(zoom: u32) -> f64 {
    TILE_SIZE * 2f64.powi(zoom as i32)
}

/// Project a coordinate to world pixels.
pub fn project(point: GeoPoint, zoom: u32) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = point.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = (point.longitude + 180.0) / 360.0 * size;
    let sin_lat = lat.to_radians().sin();
    let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: u32) -> GeoPoint {
    let size = world_size(zoom);
    let longitude = x / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / size;
    let latitude = n.sinh().atan().to_degrees();
    GeoPoint {
        latitude,
        longitude,
    }
}

/// An XYZ tile and where its top-left corner lands in the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub left: f64,
    pub top: f64,
}

impl TilePlacement {
    /// Substitute `{z}`, `{x}`, `{y}` and `{key}` in a tile URL template.
    pub fn url(&self, template: &str, key: &str) -> String {
        template
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
            .replace("{key}", key)
    }
}

/// A rendered map window: center, zoom and container size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u32,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(center: GeoPoint, zoom: u32, width: f64, height: f64) -> Self {
        Viewport {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width,
            height,
        }
    }

    /// World pixel coordinates of the container's top-left corner.
    fn origin(&self) -> (f64, f64) {
        let (cx, cy) = project(self.center, self.zoom);
        (cx - self.width / 2.0, cy - self.height / 2.0)
    }

    /// Container-relative pixel → coordinate.
    pub fn screen_to_geo(&self, sx: f64, sy: f64) -> GeoPoint {
        let (ox, oy) = self.origin();
        unproject(ox + sx, oy + sy, self.zoom)
    }

    /// Coordinate → container-relative pixel.
    pub fn geo_to_screen(&self, point: GeoPoint) -> (f64, f64) {
        let (ox, oy) = self.origin();
        let (px, py) = project(point, self.zoom);
        (px - ox, py - oy)
    }

    /// Move the view by a drag of `(dx, dy)` screen pixels.
    ///
    /// Dragging right reveals what is to the west, so the center moves opposite
    /// to the drag.
    pub fn panned_by(&self, dx: f64, dy: f64) -> Viewport {
        let (cx, cy) = project(self.center, self.zoom);
        let size = world_size(self.zoom);
        let x = (cx - dx).rem_euclid(size);
        let y = (cy - dy).clamp(0.0, size);
        Viewport {
            center: unproject(x, y, self.zoom),
            ..*self
        }
    }

    /// Change zoom by `delta` levels, keeping the center fixed.
    pub fn zoomed_by(&self, delta: i32) -> Viewport {
        let zoom = (self.zoom as i64 + delta as i64).clamp(MIN_ZOOM as i64, MAX_ZOOM as i64);
        Viewport {
            zoom: zoom as u32,
            ..*self
        }
    }

    pub fn resized(&self, width: f64, height: f64) -> Viewport {
        Viewport {
            width,
            height,
            ..*self
        }
    }

    /// Tiles covering the container. X wraps around the antimeridian, rows
    /// outside the world are skipped.
    pub fn visible_tiles(&self) -> Vec<TilePlacement> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec::new();
        }
        let (ox, oy) = self.origin();
        let tiles_per_axis = 1i64 << self.zoom;

        let first_col = (ox / TILE_SIZE).floor() as i64;
        let last_col = ((ox + self.width) / TILE_SIZE).floor() as i64;
        let first_row = (oy / TILE_SIZE).floor() as i64;
        let last_row = ((oy + self.height) / TILE_SIZE).floor() as i64;

        let mut tiles = Vec::new();
        for row in first_row..=last_row {
            if row < 0 || row >= tiles_per_axis {
                continue;
            }
            for col in first_col..=last_col {
                tiles.push(TilePlacement {
                    x: col.rem_euclid(tiles_per_axis) as u32,
                    y: row as u32,
                    z: self.zoom,
                    left: col as f64 * TILE_SIZE - ox,
                    top: row as f64 * TILE_SIZE - oy,
                });
            }
        }
        tiles
    }
}
