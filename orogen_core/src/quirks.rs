// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative table of device-specific driver defects.
//!
//! Every known-bad device/driver combination lives in one place so the
//! capability detector, configuration chooser, and binding factory share a
//! single source of truth and the decision logic stays testable apart from
//! string matching.
//!
//! Current entries:
//!
//! - `GT-I7500` negotiates a depth-less EGL config by default and silently
//!   falls back to software rendering; it needs a forced 16-bit minimum
//!   depth buffer.
//! - `MB200`, `MB220`, and the `Behold` family advertise the extended legacy
//!   feature set but crash when buffer objects are deleted; they stay on the
//!   plain legacy binding.
//! - A renderer string naming the software rasterizer (`pixelflinger`) also
//!   suppresses the extended legacy path.

use crate::context::DeviceIdentity;

/// Workaround flags accumulated for one device identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceQuirks {
    /// Minimum depth-buffer bit depth the surface configuration must
    /// provide, if the default negotiation is known to pick a broken config.
    pub min_depth_bits: Option<u8>,
    /// The extended legacy feature set crashes on this device; never upgrade
    /// past the plain legacy binding.
    pub deny_extended_legacy: bool,
    /// The modern API is known broken on this device even if the runtime
    /// probe succeeds.
    pub deny_modern: bool,
}

/// How a table entry matches a device identity.
#[derive(Clone, Copy, Debug)]
enum Matcher {
    /// Case-insensitive match on the device codename.
    Device(&'static str),
    /// Exact match on the model string.
    Model(&'static str),
    /// Substring match on the model string.
    ModelContains(&'static str),
}

impl Matcher {
    fn matches(self, identity: &DeviceIdentity) -> bool {
        match self {
            Self::Device(name) => identity.device.eq_ignore_ascii_case(name),
            Self::Model(name) => identity.model == name,
            Self::ModelContains(fragment) => identity.model.contains(fragment),
        }
    }
}

struct QuirkEntry {
    matcher: Matcher,
    quirks: DeviceQuirks,
}

const NO_EXTENDED: DeviceQuirks = DeviceQuirks {
    min_depth_bits: None,
    deny_extended_legacy: true,
    deny_modern: false,
};

const QUIRK_TABLE: &[QuirkEntry] = &[
    QuirkEntry {
        matcher: Matcher::Device("GT-I7500"),
        quirks: DeviceQuirks {
            min_depth_bits: Some(16),
            deny_extended_legacy: false,
            deny_modern: false,
        },
    },
    QuirkEntry {
        matcher: Matcher::Model("MB200"),
        quirks: NO_EXTENDED,
    },
    QuirkEntry {
        matcher: Matcher::Model("MB220"),
        quirks: NO_EXTENDED,
    },
    QuirkEntry {
        matcher: Matcher::ModelContains("Behold"),
        quirks: NO_EXTENDED,
    },
];

/// Renderer-string fragments identifying software rasterizers.
const SOFTWARE_RENDERER_MARKERS: &[&str] = &["pixelflinger"];

/// Returns the accumulated quirks for a device identity.
///
/// Pure function of the identity; evaluated per binding construction.
#[must_use]
pub fn quirks_for(identity: &DeviceIdentity) -> DeviceQuirks {
    let mut quirks = DeviceQuirks::default();
    for entry in QUIRK_TABLE {
        if entry.matcher.matches(identity) {
            quirks.min_depth_bits = quirks.min_depth_bits.or(entry.quirks.min_depth_bits);
            quirks.deny_extended_legacy |= entry.quirks.deny_extended_legacy;
            quirks.deny_modern |= entry.quirks.deny_modern;
        }
    }
    quirks
}

/// Returns whether a `GL_RENDERER` string names a known software rasterizer.
#[must_use]
pub fn is_software_renderer(renderer: &str) -> bool {
    let lowered = renderer.to_ascii_lowercase();
    SOFTWARE_RENDERER_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(device: &str, model: &str) -> DeviceIdentity {
        DeviceIdentity::new(device, model)
    }

    #[test]
    fn depth_override_matches_device_case_insensitively() {
        assert_eq!(
            quirks_for(&identity("GT-I7500", "Galaxy")).min_depth_bits,
            Some(16)
        );
        assert_eq!(
            quirks_for(&identity("gt-i7500", "Galaxy")).min_depth_bits,
            Some(16)
        );
        assert_eq!(
            quirks_for(&identity("GT-I9000", "Galaxy S")).min_depth_bits,
            None
        );
    }

    #[test]
    fn buffer_deletion_denylist_matches_models() {
        assert!(quirks_for(&identity("motus", "MB200")).deny_extended_legacy);
        assert!(quirks_for(&identity("motus", "MB220")).deny_extended_legacy);
        assert!(quirks_for(&identity("behold2", "Samsung Behold II")).deny_extended_legacy);
        assert!(!quirks_for(&identity("generic", "GenericPhone")).deny_extended_legacy);
    }

    #[test]
    fn model_match_is_exact() {
        // A model merely containing "MB200" is a different device.
        assert!(!quirks_for(&identity("x", "MB2000")).deny_extended_legacy);
    }

    #[test]
    fn clean_devices_have_no_quirks() {
        assert_eq!(
            quirks_for(&identity("generic", "GenericPhone")),
            DeviceQuirks::default()
        );
    }

    #[test]
    fn software_renderer_marker_is_case_insensitive() {
        assert!(is_software_renderer("Android PixelFlinger 1.4"));
        assert!(is_software_renderer("pixelflinger"));
        assert!(!is_software_renderer("Adreno 200"));
    }
}
