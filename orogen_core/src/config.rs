// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface configuration selection.
//!
//! Before a context exists the backend negotiates a surface configuration
//! (color, depth, and stencil bit depths) with the platform. Most devices are
//! fine with the platform default; devices listed in the
//! [quirk table](crate::quirks) need a minimum depth buffer forced or they
//! negotiate a config the driver cannot render through.

use thiserror::Error;

use crate::context::DeviceIdentity;
use crate::quirks::quirks_for;

/// Constraints the chosen surface configuration must satisfy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigRequest {
    /// Minimum acceptable depth-buffer bit depth.
    pub min_depth_bits: u8,
}

/// One surface configuration offered by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Red channel bits.
    pub red_bits: u8,
    /// Green channel bits.
    pub green_bits: u8,
    /// Blue channel bits.
    pub blue_bits: u8,
    /// Alpha channel bits.
    pub alpha_bits: u8,
    /// Depth buffer bits.
    pub depth_bits: u8,
    /// Stencil buffer bits.
    pub stencil_bits: u8,
}

/// Surface configuration selection failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No offered configuration satisfies the request.
    #[error("no offered surface configuration provides a depth buffer of at least {min_depth_bits} bits")]
    NoMatchingConfig {
        /// The depth requirement that could not be met.
        min_depth_bits: u8,
    },
}

/// Returns the configuration constraints a quirky device needs, or `None`
/// when the platform default negotiation is fine.
#[must_use]
pub fn config_override(identity: &DeviceIdentity) -> Option<ConfigRequest> {
    quirks_for(identity)
        .min_depth_bits
        .map(|min_depth_bits| ConfigRequest { min_depth_bits })
}

/// Picks the first offered configuration satisfying `request`.
///
/// `offered` is in the platform's preference order; the first match wins.
pub fn choose_config<'a>(
    request: &ConfigRequest,
    offered: &'a [SurfaceConfig],
) -> Result<&'a SurfaceConfig, ConfigError> {
    offered
        .iter()
        .find(|config| config.depth_bits >= request.min_depth_bits)
        .ok_or(ConfigError::NoMatchingConfig {
            min_depth_bits: request.min_depth_bits,
        })
}
