// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display geometry and the OS display-metrics query seam.
//!
//! The OS windowing system is out of scope for this crate; backends expose it
//! through [`DisplaySource`], a query returning raw [`DisplayMetrics`].
//! [`DisplayGeometry`] is the derived, read-only view handed to application
//! code: pixel dimensions plus pixels-per-inch, pixels-per-centimeter, and
//! the platform density scale. It is refreshed on every surface-created and
//! surface-changed event.

use core::fmt;

/// Centimeters per inch, for ppi → ppc conversion.
const CM_PER_INCH: f32 = 2.54;

/// Raw display description as reported by the OS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMetrics {
    /// Display width in physical pixels.
    pub width_px: u32,
    /// Display height in physical pixels.
    pub height_px: u32,
    /// Physical pixels per inch along the x axis.
    pub xdpi: f32,
    /// Physical pixels per inch along the y axis.
    pub ydpi: f32,
    /// Platform logical density scale factor.
    pub density: f32,
}

/// Query interface to the OS display metrics.
///
/// Backends implement this over the platform windowing APIs; the lifecycle
/// loop queries it on surface creation and surface changes.
pub trait DisplaySource {
    /// Returns the current metrics of the default display.
    fn metrics(&self) -> DisplayMetrics;
}

/// Derived display geometry exposed to the application.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct DisplayGeometry {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Pixels per inch along the x axis.
    pub ppi_x: f32,
    /// Pixels per inch along the y axis.
    pub ppi_y: f32,
    /// Pixels per centimeter along the x axis.
    pub ppc_x: f32,
    /// Pixels per centimeter along the y axis.
    pub ppc_y: f32,
    /// Platform logical density scale factor.
    pub density: f32,
}

impl DisplayGeometry {
    /// Derives geometry from raw OS metrics.
    #[must_use]
    pub fn from_metrics(metrics: &DisplayMetrics) -> Self {
        Self {
            width: metrics.width_px,
            height: metrics.height_px,
            ppi_x: metrics.xdpi,
            ppi_y: metrics.ydpi,
            ppc_x: metrics.xdpi / CM_PER_INCH,
            ppc_y: metrics.ydpi / CM_PER_INCH,
            density: metrics.density,
        }
    }

    /// Overrides the pixel dimensions, keeping the density values.
    ///
    /// Used when the surface size is reported separately from the display
    /// query (surface-changed events, and the authoritative re-query on
    /// surface creation).
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl fmt::Debug for DisplayGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DisplayGeometry({}x{} @ {:.0}x{:.0}ppi, density {})",
            self.width, self.height, self.ppi_x, self.ppi_y, self.density
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_derives_ppc_from_ppi() {
        let metrics = DisplayMetrics {
            width_px: 480,
            height_px: 800,
            xdpi: 254.0,
            ydpi: 127.0,
            density: 1.5,
        };
        let geometry = DisplayGeometry::from_metrics(&metrics);
        assert_eq!(geometry.width, 480);
        assert_eq!(geometry.height, 800);
        assert!((geometry.ppc_x - 100.0).abs() < 1e-3, "254 dpi = 100 ppc");
        assert!((geometry.ppc_y - 50.0).abs() < 1e-3, "127 dpi = 50 ppc");
        assert!((geometry.density - 1.5).abs() < 1e-6, "density passthrough");
    }

    #[test]
    fn set_size_keeps_density_fields() {
        let metrics = DisplayMetrics {
            width_px: 480,
            height_px: 800,
            xdpi: 160.0,
            ydpi: 160.0,
            density: 1.0,
        };
        let mut geometry = DisplayGeometry::from_metrics(&metrics);
        geometry.set_size(320, 240);
        assert_eq!((geometry.width, geometry.height), (320, 240));
        assert!((geometry.ppi_x - 160.0).abs() < 1e-6, "ppi untouched");
    }
}
