// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The native rendering context seam and the API binding over it.
//!
//! Backends hand the lifecycle loop an opaque [`NativeContext`] when the OS
//! reports a surface. The loop never talks to the context directly for
//! rendering; it wraps it in a [`GlBinding`] chosen once per context lifetime
//! by the [factory](crate::factory). When the context is lost, the binding is
//! dropped and a fresh one is built for the recreated context.

use core::fmt;
use std::sync::Arc;

/// Static identity of the device this process runs on.
///
/// Mobile platforms report both a device codename and a marketing model
/// string; driver defects are keyed on either, so both are carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Device/board codename (e.g. `GT-I7500`).
    pub device: String,
    /// Marketing model string (e.g. `MB200`).
    pub model: String,
}

impl DeviceIdentity {
    /// Creates an identity from device and model strings.
    #[must_use]
    pub fn new(device: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            model: model.into(),
        }
    }
}

/// An opaque handle to the native rendering context for the current surface.
///
/// Implemented by backend crates over the platform GL/EGL glue, and by test
/// doubles. Capability probes may disagree with what the device claims to
/// support; the factory treats a failed [`Self::supports_modern`] probe as a
/// soft fallback to the legacy binding.
pub trait NativeContext: Send + Sync {
    /// Returns whether the modern (shader-pipeline) API can actually be
    /// instantiated against this context.
    fn supports_modern(&self) -> bool;

    /// Returns whether the context exposes the extended legacy feature set
    /// (buffer objects and friends).
    fn supports_extended_legacy(&self) -> bool;

    /// The `GL_RENDERER` string.
    fn renderer(&self) -> String;

    /// The `GL_VENDOR` string.
    fn vendor(&self) -> String;

    /// The `GL_VERSION` string.
    fn version(&self) -> String;

    /// The space-separated `GL_EXTENSIONS` string.
    fn extensions(&self) -> String;

    /// Sets the viewport to cover `width` × `height` pixels.
    fn set_viewport(&self, width: u32, height: u32);
}

/// Which rendering API a [`GlBinding`] speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlApi {
    /// Fixed-function legacy API, base feature set only.
    Legacy,
    /// Legacy API with the extended feature set (buffer objects).
    LegacyExtended,
    /// Modern shader-pipeline API.
    Modern,
}

impl GlApi {
    /// Returns a short label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::LegacyExtended => "legacy+ext",
            Self::Modern => "modern",
        }
    }
}

/// The rendering-API binding for the current context.
///
/// Exactly one variant is chosen at context creation and fixed for the
/// context's lifetime; API calls dispatch with an explicit `match` so every
/// call site states which paths it supports.
pub enum GlBinding {
    /// Plain legacy binding.
    Legacy(Arc<dyn NativeContext>),
    /// Legacy binding upgraded with the extended feature set.
    LegacyExtended(Arc<dyn NativeContext>),
    /// Modern binding.
    Modern(Arc<dyn NativeContext>),
}

impl GlBinding {
    /// Returns which API this binding speaks.
    #[must_use]
    pub const fn api(&self) -> GlApi {
        match self {
            Self::Legacy(_) => GlApi::Legacy,
            Self::LegacyExtended(_) => GlApi::LegacyExtended,
            Self::Modern(_) => GlApi::Modern,
        }
    }

    /// Returns the underlying native context handle.
    #[must_use]
    pub fn context(&self) -> &Arc<dyn NativeContext> {
        match self {
            Self::Legacy(ctx) | Self::LegacyExtended(ctx) | Self::Modern(ctx) => ctx,
        }
    }

    /// Applies a full-surface viewport.
    pub fn viewport(&self, width: u32, height: u32) {
        match self {
            Self::Legacy(ctx) | Self::LegacyExtended(ctx) | Self::Modern(ctx) => {
                ctx.set_viewport(width, height);
            }
        }
    }
}

impl fmt::Debug for GlBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlBinding").field(&self.api()).finish()
    }
}
