// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding construction for a freshly created context.
//!
//! The factory runs once per context lifetime, on the rendering thread,
//! inside the surface-created transition. Selection order:
//!
//! 1. The modern API, if the application requested it, the device is not on
//!    the modern denylist, and the runtime probe succeeds. A failed probe is
//!    a soft fallback to the legacy path, never an error.
//! 2. The extended legacy API, if the context exposes it, the renderer is not
//!    a software rasterizer, and the device is not on the extended-legacy
//!    denylist.
//! 3. The plain legacy API otherwise.

use std::sync::Arc;

use crate::context::{DeviceIdentity, GlBinding, NativeContext};
use crate::quirks::{is_software_renderer, quirks_for};
use crate::trace::{BindingInstalledEvent, Tracer};

/// Returns whether the modern API may be attempted on this device.
///
/// `requested` is the application's configuration choice; the quirk table can
/// veto it but never force it.
#[must_use]
pub fn use_modern_api(requested: bool, identity: &DeviceIdentity) -> bool {
    requested && !quirks_for(identity).deny_modern
}

/// Builds the binding for a new context and reports it through the tracer.
#[must_use]
pub fn create_binding(
    requested_modern: bool,
    identity: &DeviceIdentity,
    context: Arc<dyn NativeContext>,
    tracer: &mut Tracer,
) -> GlBinding {
    let binding = select_binding(requested_modern, identity, context);
    let ctx = binding.context();
    tracer.binding_installed(&BindingInstalledEvent {
        api: binding.api(),
        renderer: ctx.renderer(),
        vendor: ctx.vendor(),
        version: ctx.version(),
        extensions: ctx.extensions(),
    });
    binding
}

fn select_binding(
    requested_modern: bool,
    identity: &DeviceIdentity,
    context: Arc<dyn NativeContext>,
) -> GlBinding {
    if use_modern_api(requested_modern, identity) && context.supports_modern() {
        return GlBinding::Modern(context);
    }

    let extended = context.supports_extended_legacy()
        && !is_software_renderer(&context.renderer())
        && !quirks_for(identity).deny_extended_legacy;
    if extended {
        GlBinding::LegacyExtended(context)
    } else {
        GlBinding::Legacy(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GlApi;

    struct StaticContext {
        modern: bool,
        extended: bool,
        renderer: &'static str,
    }

    impl NativeContext for StaticContext {
        fn supports_modern(&self) -> bool {
            self.modern
        }

        fn supports_extended_legacy(&self) -> bool {
            self.extended
        }

        fn renderer(&self) -> String {
            String::from(self.renderer)
        }

        fn vendor(&self) -> String {
            String::from("TestVendor")
        }

        fn version(&self) -> String {
            String::from("1.1")
        }

        fn extensions(&self) -> String {
            String::from("ext_a ext_b")
        }

        fn set_viewport(&self, _width: u32, _height: u32) {}
    }

    fn ctx(modern: bool, extended: bool, renderer: &'static str) -> Arc<dyn NativeContext> {
        Arc::new(StaticContext {
            modern,
            extended,
            renderer,
        })
    }

    fn generic() -> DeviceIdentity {
        DeviceIdentity::new("generic", "GenericPhone")
    }

    #[test]
    fn capable_device_gets_extended_legacy() {
        let binding = create_binding(
            false,
            &generic(),
            ctx(false, true, "Adreno 200"),
            &mut Tracer::disabled(),
        );
        assert_eq!(binding.api(), GlApi::LegacyExtended);
    }

    #[test]
    fn denylisted_model_stays_on_plain_legacy() {
        let identity = DeviceIdentity::new("motus", "MB200");
        let binding = create_binding(
            false,
            &identity,
            ctx(false, true, "Adreno 200"),
            &mut Tracer::disabled(),
        );
        assert_eq!(binding.api(), GlApi::Legacy);
    }

    #[test]
    fn software_renderer_stays_on_plain_legacy() {
        let binding = create_binding(
            false,
            &generic(),
            ctx(false, true, "Android PixelFlinger 1.4"),
            &mut Tracer::disabled(),
        );
        assert_eq!(binding.api(), GlApi::Legacy);
    }

    #[test]
    fn modern_request_wins_when_probe_succeeds() {
        let binding = create_binding(
            true,
            &generic(),
            ctx(true, true, "Adreno 200"),
            &mut Tracer::disabled(),
        );
        assert_eq!(binding.api(), GlApi::Modern);
    }

    #[test]
    fn failed_modern_probe_falls_back_to_legacy_path() {
        let binding = create_binding(
            true,
            &generic(),
            ctx(false, true, "Adreno 200"),
            &mut Tracer::disabled(),
        );
        assert_eq!(binding.api(), GlApi::LegacyExtended);
    }

    #[test]
    fn binding_event_carries_the_context_strings() {
        use crate::trace::{BindingInstalledEvent, DiagnosticsSink};
        use std::sync::{Arc as StdArc, Mutex};

        #[derive(Default)]
        struct Capture(StdArc<Mutex<Vec<BindingInstalledEvent>>>);

        impl DiagnosticsSink for Capture {
            fn on_binding_installed(&mut self, event: &BindingInstalledEvent) {
                self.0.lock().unwrap().push(event.clone());
            }
        }

        let events = StdArc::new(Mutex::new(Vec::new()));
        let mut tracer = Tracer::new(Box::new(Capture(StdArc::clone(&events))));
        let _ = create_binding(false, &generic(), ctx(false, false, "Adreno 200"), &mut tracer);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].api, GlApi::Legacy);
        assert_eq!(events[0].renderer, "Adreno 200");
        assert_eq!(events[0].vendor, "TestVendor");
    }
}
