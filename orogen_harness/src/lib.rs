// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic test doubles for the lifecycle loop.
//!
//! Everything here is built for driving
//! [`RenderLoop`](orogen_core::lifecycle::RenderLoop) from tests: a manually
//! advanced clock, a listener and audio hooks that log their callbacks into
//! one shared sequence, counting registries, a capability-configurable fake
//! native context, a frame-scheduler probe, and a mutable display source.
//! [`TestRig`] bundles them around a ready-made loop.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use orogen_core::context::{DeviceIdentity, NativeContext};
use orogen_core::display::{DisplayMetrics, DisplaySource};
use orogen_core::lifecycle::{
    FrameScheduler, LifecycleHandle, LoopConfig, RenderLoop, RenderMode,
};
use orogen_core::listener::{ApplicationListener, AudioHooks};
use orogen_core::registry::{ManagedRegistry, RegistrySet};
use orogen_core::time::{MonotonicClock, TimePoint};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A [`MonotonicClock`] advanced explicitly by the test.
///
/// Clones share the same underlying counter.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `nanos` nanoseconds.
    pub fn advance_nanos(&self, nanos: u64) {
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute reading.
    pub fn set_nanos(&self, nanos: u64) {
        self.nanos.store(nanos, Ordering::SeqCst);
    }
}

impl MonotonicClock for ManualClock {
    fn now(&self) -> TimePoint {
        TimePoint(self.nanos.load(Ordering::SeqCst))
    }
}

/// One observed callback, in the order the loop issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackKind {
    /// `ApplicationListener::create`.
    Create,
    /// `ApplicationListener::resize`.
    Resize {
        /// Width passed to the callback.
        width: u32,
        /// Height passed to the callback.
        height: u32,
    },
    /// `ApplicationListener::render`.
    Render,
    /// `ApplicationListener::pause`.
    Pause,
    /// `ApplicationListener::resume`.
    Resume,
    /// `ApplicationListener::dispose`.
    Dispose,
    /// `AudioHooks::pause`.
    AudioPause,
    /// `AudioHooks::dispose`.
    AudioDispose,
    /// A deferred task, tagged by the test.
    Task(u32),
}

/// A shared, ordered log of observed callbacks.
///
/// The listener, audio hooks, and deferred tasks all write into one log so
/// tests can assert cross-collaborator ordering.
#[derive(Clone, Debug, Default)]
pub struct CallbackLog {
    calls: Arc<Mutex<Vec<CallbackKind>>>,
}

impl CallbackLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry.
    pub fn push(&self, kind: CallbackKind) {
        lock(&self.calls).push(kind);
    }

    /// Returns a copy of the log.
    #[must_use]
    pub fn calls(&self) -> Vec<CallbackKind> {
        lock(&self.calls).clone()
    }

    /// Removes and returns the log contents.
    #[must_use]
    pub fn take(&self) -> Vec<CallbackKind> {
        std::mem::take(&mut *lock(&self.calls))
    }
}

/// An [`ApplicationListener`] that logs every callback.
#[derive(Clone, Debug)]
pub struct RecordingListener {
    log: CallbackLog,
}

impl RecordingListener {
    /// Creates a listener writing into `log`.
    #[must_use]
    pub fn new(log: CallbackLog) -> Self {
        Self { log }
    }
}

impl ApplicationListener for RecordingListener {
    fn create(&mut self) {
        self.log.push(CallbackKind::Create);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.log.push(CallbackKind::Resize { width, height });
    }

    fn render(&mut self) {
        self.log.push(CallbackKind::Render);
    }

    fn pause(&mut self) {
        self.log.push(CallbackKind::Pause);
    }

    fn resume(&mut self) {
        self.log.push(CallbackKind::Resume);
    }

    fn dispose(&mut self) {
        self.log.push(CallbackKind::Dispose);
    }
}

/// [`AudioHooks`] that log into the same sequence as the listener.
#[derive(Clone, Debug)]
pub struct SharedAudio {
    log: CallbackLog,
}

impl SharedAudio {
    /// Creates hooks writing into `log`.
    #[must_use]
    pub fn new(log: CallbackLog) -> Self {
        Self { log }
    }
}

impl AudioHooks for SharedAudio {
    fn pause(&mut self) {
        self.log.push(CallbackKind::AudioPause);
    }

    fn dispose(&mut self) {
        self.log.push(CallbackKind::AudioDispose);
    }
}

/// Shared counters behind a set of [`CountingRegistry`] instances.
#[derive(Clone, Debug, Default)]
pub struct RegistryCounters {
    invalidates: Arc<AtomicUsize>,
    clears: Arc<AtomicUsize>,
}

impl RegistryCounters {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total `invalidate_all` calls across all registries.
    #[must_use]
    pub fn invalidates(&self) -> usize {
        self.invalidates.load(Ordering::SeqCst)
    }

    /// Total `clear_all` calls across all registries.
    #[must_use]
    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    /// Builds a [`RegistrySet`] whose four registries all report into these
    /// counters.
    #[must_use]
    pub fn registry_set(&self) -> RegistrySet {
        let make = || {
            Box::new(CountingRegistry {
                counters: self.clone(),
            }) as Box<dyn ManagedRegistry + Send>
        };
        RegistrySet::new(make(), make(), make(), make())
    }
}

/// A [`ManagedRegistry`] that counts batch operations.
#[derive(Clone, Debug)]
pub struct CountingRegistry {
    counters: RegistryCounters,
}

impl ManagedRegistry for CountingRegistry {
    fn invalidate_all(&mut self) {
        self.counters.invalidates.fetch_add(1, Ordering::SeqCst);
    }

    fn clear_all(&mut self) {
        self.counters.clears.fetch_add(1, Ordering::SeqCst);
    }

    fn status(&self) -> String {
        format!("{} clear(s)", self.counters.clears())
    }
}

/// A [`NativeContext`] with configurable capabilities and strings.
///
/// Viewport calls are recorded for inspection.
#[derive(Debug)]
pub struct FakeContext {
    /// Result of the modern-API probe.
    pub modern: bool,
    /// Whether the extended legacy feature set is exposed.
    pub extended_legacy: bool,
    /// Reported `GL_RENDERER` string.
    pub renderer_name: String,
    /// Reported `GL_VENDOR` string.
    pub vendor_name: String,
    /// Reported `GL_VERSION` string.
    pub version_name: String,
    /// Reported `GL_EXTENSIONS` string.
    pub extension_list: String,
    viewports: Mutex<Vec<(u32, u32)>>,
}

impl FakeContext {
    /// A context exposing the extended legacy feature set on a hardware
    /// renderer.
    #[must_use]
    pub fn hardware() -> Self {
        Self {
            modern: false,
            extended_legacy: true,
            renderer_name: String::from("Adreno 200"),
            vendor_name: String::from("Qualcomm"),
            version_name: String::from("1.1"),
            extension_list: String::from("GL_OES_vertex_buffer_object"),
            viewports: Mutex::new(Vec::new()),
        }
    }

    /// A software-rasterizer context.
    #[must_use]
    pub fn software() -> Self {
        Self {
            renderer_name: String::from("Android PixelFlinger 1.4"),
            vendor_name: String::from("Android"),
            extension_list: String::new(),
            ..Self::hardware()
        }
    }

    /// A context whose modern-API probe succeeds.
    #[must_use]
    pub fn modern() -> Self {
        Self {
            modern: true,
            version_name: String::from("2.0"),
            ..Self::hardware()
        }
    }

    /// Returns every viewport set on this context, oldest first.
    #[must_use]
    pub fn viewports(&self) -> Vec<(u32, u32)> {
        lock(&self.viewports).clone()
    }
}

impl NativeContext for FakeContext {
    fn supports_modern(&self) -> bool {
        self.modern
    }

    fn supports_extended_legacy(&self) -> bool {
        self.extended_legacy
    }

    fn renderer(&self) -> String {
        self.renderer_name.clone()
    }

    fn vendor(&self) -> String {
        self.vendor_name.clone()
    }

    fn version(&self) -> String {
        self.version_name.clone()
    }

    fn extensions(&self) -> String {
        self.extension_list.clone()
    }

    fn set_viewport(&self, width: u32, height: u32) {
        lock(&self.viewports).push((width, height));
    }
}

/// Shared observation side of a [`FakeScheduler`].
#[derive(Clone, Debug, Default)]
pub struct SchedulerProbe {
    mode: Arc<Mutex<Option<RenderMode>>>,
    pending: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
}

impl SchedulerProbe {
    /// Creates a probe with no observed mode and no pending frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently set render mode, if any.
    #[must_use]
    pub fn mode(&self) -> Option<RenderMode> {
        *lock(&self.mode)
    }

    /// Returns the raw number of `request_frame` calls, before coalescing.
    #[must_use]
    pub fn raw_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Consumes the pending frame, if one is scheduled. Requests between
    /// takes coalesce into a single pending frame.
    #[must_use]
    pub fn take_frame(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }
}

/// A [`FrameScheduler`] observable through its [`SchedulerProbe`].
#[derive(Clone, Debug)]
pub struct FakeScheduler {
    probe: SchedulerProbe,
}

impl FakeScheduler {
    /// Creates a scheduler reporting into `probe`.
    #[must_use]
    pub fn new(probe: SchedulerProbe) -> Self {
        Self { probe }
    }
}

impl FrameScheduler for FakeScheduler {
    fn set_mode(&mut self, mode: RenderMode) {
        *lock(&self.probe.mode) = Some(mode);
    }

    fn request_frame(&mut self) {
        self.probe.requests.fetch_add(1, Ordering::SeqCst);
        self.probe.pending.store(true, Ordering::SeqCst);
    }
}

/// A [`DisplaySource`] whose metrics the test can change mid-run.
#[derive(Clone, Debug)]
pub struct FixedDisplay {
    metrics: Arc<Mutex<DisplayMetrics>>,
}

impl FixedDisplay {
    /// A 480x800 display at 160 dpi, density 1.0.
    #[must_use]
    pub fn wvga() -> Self {
        Self::new(DisplayMetrics {
            width_px: 480,
            height_px: 800,
            xdpi: 160.0,
            ydpi: 160.0,
            density: 1.0,
        })
    }

    /// Creates a display reporting `metrics`.
    #[must_use]
    pub fn new(metrics: DisplayMetrics) -> Self {
        Self {
            metrics: Arc::new(Mutex::new(metrics)),
        }
    }

    /// Replaces the reported metrics.
    pub fn set_metrics(&self, metrics: DisplayMetrics) {
        *lock(&self.metrics) = metrics;
    }
}

impl DisplaySource for FixedDisplay {
    fn metrics(&self) -> DisplayMetrics {
        *lock(&self.metrics)
    }
}

/// A [`RenderLoop`] wired to one of every double, ready for scenarios.
#[derive(Debug)]
pub struct TestRig {
    /// The loop under test.
    pub render_loop: RenderLoop,
    /// The shared callback log.
    pub log: CallbackLog,
    /// The loop's clock.
    pub clock: ManualClock,
    /// Counters behind the loop's registries.
    pub counters: RegistryCounters,
    /// Observation side of the loop's scheduler.
    pub probe: SchedulerProbe,
    /// The display behind the loop.
    pub display: FixedDisplay,
}

impl TestRig {
    /// Builds a rig for a generic, quirk-free device with the Android-style
    /// loop defaults.
    #[must_use]
    pub fn generic() -> Self {
        Self::for_device(LoopConfig::android(), DeviceIdentity::new("generic", "GenericPhone"))
    }

    /// Builds a rig for a specific configuration and device identity.
    #[must_use]
    pub fn for_device(config: LoopConfig, identity: DeviceIdentity) -> Self {
        let log = CallbackLog::new();
        let clock = ManualClock::new();
        let counters = RegistryCounters::new();
        let probe = SchedulerProbe::new();
        let display = FixedDisplay::wvga();

        let render_loop = RenderLoop::new(
            config,
            identity,
            RecordingListener::new(log.clone()),
            display.clone(),
        )
        .with_audio(SharedAudio::new(log.clone()))
        .with_registries(counters.registry_set())
        .with_clock(clock.clone())
        .with_scheduler(FakeScheduler::new(probe.clone()));

        Self {
            render_loop,
            log,
            clock,
            counters,
            probe,
            display,
        }
    }

    /// Returns a cross-thread handle to the loop.
    #[must_use]
    pub fn handle(&self) -> LifecycleHandle {
        self.render_loop.handle()
    }

    /// Advances the clock by one 60 Hz frame and runs a draw tick.
    pub fn tick(&mut self) {
        self.clock.advance_nanos(16_666_667);
        self.render_loop.on_draw_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_their_reading() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance_nanos(5);
        assert_eq!(other.now(), TimePoint(5));
    }

    #[test]
    fn callback_log_preserves_order_across_clones() {
        let log = CallbackLog::new();
        log.clone().push(CallbackKind::Create);
        log.clone().push(CallbackKind::Render);
        assert_eq!(log.calls(), vec![CallbackKind::Create, CallbackKind::Render]);
    }

    #[test]
    fn scheduler_probe_coalesces_requests() {
        let probe = SchedulerProbe::new();
        let mut scheduler = FakeScheduler::new(probe.clone());

        scheduler.request_frame();
        scheduler.request_frame();
        assert_eq!(probe.raw_requests(), 2);
        assert!(probe.take_frame(), "one pending frame for both requests");
        assert!(!probe.take_frame(), "pending frame consumed");
    }
}
