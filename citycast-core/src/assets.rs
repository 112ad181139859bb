//! URL templates for externally hosted icons and map tiles.
//! Nothing here fetches; callers hand the URLs to whatever renders them.

use std::f64::consts::PI;

use crate::model::Coordinate;

pub const WEATHER_ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";
pub const WEATHER_ICON_SIZE: &str = "@2x";

pub const MAP_TILE_BASE_URL: &str = "https://tile.openstreetmap.org";
pub const MAP_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_MAP_ZOOM: u8 = 10;

const MAX_ZOOM: u8 = 19;

pub fn icon_url(icon_id: &str) -> String {
    format!("{WEATHER_ICON_BASE_URL}/{icon_id}{WEATHER_ICON_SIZE}.png")
}

/// A pin on the map with a short popup label.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub coordinate: Coordinate,
    pub zoom: u8,
    pub label: String,
}

impl MapMarker {
    pub fn new(coordinate: Coordinate, label: impl Into<String>) -> Self {
        Self {
            coordinate,
            zoom: DEFAULT_MAP_ZOOM,
            label: label.into(),
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom.min(MAX_ZOOM);
        self
    }

    /// Slippy-map tile indices `(x, y)` containing the marker.
    pub fn tile(&self) -> (u32, u32) {
        let zoom = self.zoom.min(MAX_ZOOM);
        let n = f64::from(1u32 << zoom);
        let max = (1u32 << zoom) - 1;

        let x = (self.coordinate.lon + 180.0) / 360.0 * n;
        let lat = self.coordinate.lat.to_radians();
        let y = (1.0 - lat.tan().asinh() / PI) / 2.0 * n;

        let clamp = |v: f64| (v.floor().max(0.0) as u32).min(max);
        (clamp(x), clamp(y))
    }

    pub fn tile_url(&self) -> String {
        let (x, y) = self.tile();
        format!("{MAP_TILE_BASE_URL}/{}/{x}/{y}.png", self.zoom.min(MAX_ZOOM))
    }
}
