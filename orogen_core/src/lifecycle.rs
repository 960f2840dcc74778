// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render-loop lifecycle state machine.
//!
//! [`RenderLoop`] is owned by the rendering thread and fed three kinds of
//! input:
//!
//! - surface events from the host ([`RenderLoop::on_surface_created`] and
//!   [`RenderLoop::on_surface_changed`]),
//! - one draw tick per frame ([`on_draw_frame`](RenderLoop::on_draw_frame)),
//! - cross-thread lifecycle requests via the cheaply clonable
//!   [`LifecycleHandle`].
//!
//! Requests never act immediately. They set flags under one mutex; the next
//! draw tick snapshots and clears the flags in a single critical section and
//! performs the transitions outside it, so listener callbacks always run on
//! the rendering thread and never under the lock.
//!
//! ```text
//!  UI thread            shared flags              rendering thread
//!  ---------            ------------              ----------------
//!  request_pause() ──▶  pause, !running  ──┐
//!                                          ├──▶  on_draw_frame():
//!  request_resume() ─▶  resume, running ───┤       snapshot + clear
//!                                          │       resume? render? pause?
//!  request_destroy() ▶  destroy, !running ─┘       destroy?  then notify
//! ```
//!
//! `request_pause` additionally blocks (bounded) until a tick acknowledges
//! the pause, because hosts typically require rendering to have stopped
//! before the callback that delivered the pause returns.

use core::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::context::{DeviceIdentity, GlBinding, NativeContext};
use crate::display::{DisplayGeometry, DisplaySource};
use crate::factory::create_binding;
use crate::listener::{ApplicationListener, AudioHooks, NullAudio};
use crate::registry::RegistrySet;
use crate::tasks::DeferredTasks;
use crate::time::{MonotonicClock, SystemClock};
use crate::timing::{FpsCounter, FrameTimer};
use crate::trace::{FpsEvent, SurfaceChangedEvent, SurfaceCreatedEvent, Tracer};

/// Snapshot of the shared lifecycle flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifecycleState {
    /// The loop renders on draw ticks.
    pub running: bool,
    /// A pause request is waiting for the next tick.
    pub pause_requested: bool,
    /// A resume request is waiting for the next tick.
    pub resume_requested: bool,
    /// A destroy request is waiting for the next tick.
    pub destroy_requested: bool,
    /// The listener's `create` callback has run.
    pub created: bool,
    /// The destroy transition has completed.
    pub destroyed: bool,
}

/// The mutex-and-condvar pair every cross-thread request goes through.
struct Signal {
    state: Mutex<LifecycleState>,
    cond: Condvar,
}

impl Signal {
    fn new() -> Self {
        Self {
            state: Mutex::new(LifecycleState::default()),
            cond: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LifecycleState> {
        // The critical sections only flip booleans, so a poisoned state is
        // still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cross-thread requester for lifecycle transitions.
///
/// Obtained from [`RenderLoop::handle`]; clones share the same loop. All
/// methods are safe to call from any thread, including the rendering thread
/// itself (a same-thread [`request_pause`](Self::request_pause) cannot be
/// acknowledged and returns `false` after the timeout).
#[derive(Clone)]
pub struct LifecycleHandle {
    signal: Arc<Signal>,
    pause_ack_timeout: Duration,
}

impl LifecycleHandle {
    /// Requests a pause and blocks until a draw tick acknowledges it or the
    /// configured timeout elapses. Returns `true` on acknowledgement.
    ///
    /// Rendering stops with the next tick either way; the return value only
    /// reports whether that tick was observed in time.
    pub fn request_pause(&self) -> bool {
        let mut state = self.signal.lock();
        state.pause_requested = true;
        state.running = false;

        let (_guard, result) = self
            .signal
            .cond
            .wait_timeout_while(state, self.pause_ack_timeout, |s| s.pause_requested)
            .unwrap_or_else(PoisonError::into_inner);
        !result.timed_out()
    }

    /// Requests a resume. Rendering restarts with the next tick, provided the
    /// application has been created.
    pub fn request_resume(&self) {
        let mut state = self.signal.lock();
        state.resume_requested = true;
        if state.created {
            state.running = true;
        }
    }

    /// Requests a destroy. Returns immediately; the next draw tick performs
    /// the teardown. Use [`wait_destroyed`](Self::wait_destroyed) to block
    /// for completion.
    pub fn request_destroy(&self) {
        let mut state = self.signal.lock();
        state.destroy_requested = true;
        state.running = false;
    }

    /// Blocks until the destroy transition has completed or `timeout`
    /// elapses. Returns `true` if the loop is destroyed.
    pub fn wait_destroyed(&self, timeout: Duration) -> bool {
        let state = self.signal.lock();
        let (state, _) = self
            .signal
            .cond
            .wait_timeout_while(state, timeout, |s| !s.destroyed)
            .unwrap_or_else(PoisonError::into_inner);
        state.destroyed
    }

    /// Returns whether the loop currently renders on draw ticks.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.signal.lock().running
    }

    /// Returns a copy of the current lifecycle flags.
    #[must_use]
    pub fn snapshot(&self) -> LifecycleState {
        *self.signal.lock()
    }
}

impl fmt::Debug for LifecycleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHandle")
            .field("state", &self.snapshot())
            .finish()
    }
}

/// How the host schedules draw ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// A tick per display refresh.
    Continuous,
    /// Ticks only when explicitly requested.
    OnRequest,
}

/// The host-side frame scheduler behind [`RenderLoop::request_rendering`]
/// and [`RenderLoop::set_continuous_rendering`].
pub trait FrameScheduler {
    /// Switches between continuous and on-request ticking.
    fn set_mode(&mut self, mode: RenderMode);

    /// Asks for one draw tick. Repeated requests before the tick happens
    /// coalesce into one.
    fn request_frame(&mut self);
}

/// A [`FrameScheduler`] that ignores every call, for hosts that tick the
/// loop on their own terms.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullScheduler;

impl FrameScheduler for NullScheduler {
    fn set_mode(&mut self, _mode: RenderMode) {}

    fn request_frame(&mut self) {}
}

/// Static configuration of a [`RenderLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopConfig {
    /// Attempt the modern rendering API when the context supports it.
    pub requested_modern: bool,
    /// Start in continuous render mode.
    pub continuous: bool,
    /// How long [`LifecycleHandle::request_pause`] waits for a tick to
    /// acknowledge the pause.
    pub pause_ack_timeout: Duration,
}

impl LoopConfig {
    /// The defaults of the Android-style host: legacy API, continuous
    /// rendering, one-second pause acknowledgement bound.
    #[must_use]
    pub const fn android() -> Self {
        Self {
            requested_modern: false,
            continuous: true,
            pause_ack_timeout: Duration::from_secs(1),
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::android()
    }
}

/// The render-loop lifecycle state machine. Owned by the rendering thread.
pub struct RenderLoop {
    config: LoopConfig,
    identity: DeviceIdentity,
    listener: Box<dyn ApplicationListener + Send>,
    audio: Box<dyn AudioHooks + Send>,
    registries: RegistrySet,
    display: Box<dyn DisplaySource + Send>,
    clock: Box<dyn MonotonicClock + Send>,
    scheduler: Box<dyn FrameScheduler + Send>,
    tracer: Tracer,
    signal: Arc<Signal>,
    tasks: DeferredTasks,
    binding: Option<GlBinding>,
    geometry: DisplayGeometry,
    timer: FrameTimer,
    fps: FpsCounter,
    continuous: bool,
    has_surface: bool,
}

impl RenderLoop {
    /// Creates a loop with default collaborators: no audio, no managed
    /// registries, the system clock, no frame scheduler, diagnostics off.
    /// Replace them with the `with_*` builders before the first surface
    /// arrives.
    #[must_use]
    pub fn new(
        config: LoopConfig,
        identity: DeviceIdentity,
        listener: impl ApplicationListener + Send + 'static,
        display: impl DisplaySource + Send + 'static,
    ) -> Self {
        let clock = SystemClock::new();
        let now = clock.now();
        Self {
            continuous: config.continuous,
            config,
            identity,
            listener: Box::new(listener),
            audio: Box::new(NullAudio),
            registries: RegistrySet::noop(),
            display: Box::new(display),
            clock: Box::new(clock),
            scheduler: Box::new(NullScheduler),
            tracer: Tracer::disabled(),
            signal: Arc::new(Signal::new()),
            tasks: DeferredTasks::new(),
            binding: None,
            geometry: DisplayGeometry::default(),
            timer: FrameTimer::new(now),
            fps: FpsCounter::new(now),
            has_surface: false,
        }
    }

    /// Replaces the audio hooks.
    #[must_use]
    pub fn with_audio(mut self, audio: impl AudioHooks + Send + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    /// Replaces the managed-resource registries.
    #[must_use]
    pub fn with_registries(mut self, registries: RegistrySet) -> Self {
        self.registries = registries;
        self
    }

    /// Replaces the clock. Frame timing restarts from the new clock's
    /// current reading.
    #[must_use]
    pub fn with_clock(mut self, clock: impl MonotonicClock + Send + 'static) -> Self {
        let now = clock.now();
        self.clock = Box::new(clock);
        self.timer = FrameTimer::new(now);
        self.fps = FpsCounter::new(now);
        self
    }

    /// Replaces the frame scheduler.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: impl FrameScheduler + Send + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    /// Replaces the diagnostics tracer.
    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Returns a cross-thread requester for this loop.
    #[must_use]
    pub fn handle(&self) -> LifecycleHandle {
        LifecycleHandle {
            signal: Arc::clone(&self.signal),
            pause_ack_timeout: self.config.pause_ack_timeout,
        }
    }

    /// Returns a clonable handle to the deferred-task queue.
    #[must_use]
    pub fn tasks(&self) -> DeferredTasks {
        self.tasks.clone()
    }

    /// Handles a (re)created surface and its native context.
    ///
    /// The first call builds the rendering-API binding and runs the
    /// listener's `create`; later calls reuse the existing binding and only
    /// invalidate managed resources so they re-upload lazily.
    pub fn on_surface_created(&mut self, context: Arc<dyn NativeContext>) {
        if self.binding.is_none() {
            self.binding = Some(create_binding(
                self.config.requested_modern,
                &self.identity,
                context,
                &mut self.tracer,
            ));
        }
        self.has_surface = true;
        self.scheduler.set_mode(self.mode());

        self.geometry = DisplayGeometry::from_metrics(&self.display.metrics());
        self.registries.invalidate_all();

        // Handles minted against a previous context are stale from here on.
        let metrics = self.display.metrics();
        self.geometry.set_size(metrics.width_px, metrics.height_px);

        let now = self.clock.now();
        self.timer.reset(now);
        self.fps.reset(now);

        if let Some(binding) = &self.binding {
            binding.viewport(self.geometry.width, self.geometry.height);
        }

        let first = {
            let state = self.signal.lock();
            !state.created
        };
        if first {
            self.listener.create();
            let mut state = self.signal.lock();
            state.created = true;
            state.running = true;
        }
        self.tracer.surface_created(&SurfaceCreatedEvent {
            first,
            width: self.geometry.width,
            height: self.geometry.height,
        });
    }

    /// Handles a surface resize.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.geometry = DisplayGeometry::from_metrics(&self.display.metrics());
        self.geometry.set_size(width, height);

        if let Some(binding) = &self.binding {
            binding.viewport(width, height);
        }
        self.listener.resize(width, height);
        self.tracer.surface_changed(&SurfaceChangedEvent { width, height });
    }

    /// Runs one draw tick.
    ///
    /// Samples the clock, snapshots and clears the request flags in one
    /// critical section, then performs the observed transitions in order:
    /// resume, then (if running) deferred tasks and render, then pause, then
    /// destroy. Threads blocked in [`LifecycleHandle::request_pause`] or
    /// [`LifecycleHandle::wait_destroyed`] are woken from the same tick.
    pub fn on_draw_frame(&mut self) {
        let now = self.clock.now();
        self.timer.tick(now);

        let (lrunning, lpause, ldestroy, lresume) = {
            let mut state = self.signal.lock();
            let snapshot = (
                state.running,
                state.pause_requested,
                state.destroy_requested,
                state.resume_requested,
            );
            state.pause_requested = false;
            state.resume_requested = false;
            state.destroy_requested = false;
            if snapshot.1 {
                // Wake threads blocked in request_pause.
                self.signal.cond.notify_all();
            }
            snapshot
        };

        if lresume {
            self.listener.resume();
            self.tracer.resumed();
        }

        if lrunning && self.binding.is_some() {
            // Tasks drain only while a context is live, so they never touch
            // stale handles.
            self.tasks.run_pending();
            self.listener.render();
        }

        if lpause {
            self.listener.pause();
            self.audio.pause();
            self.tracer.paused();
        }

        if ldestroy {
            self.listener.dispose();
            self.audio.dispose();
            self.registries.clear_all(&mut self.tracer);
            self.binding = None;
            self.has_surface = false;
            {
                let mut state = self.signal.lock();
                state.destroyed = true;
                self.signal.cond.notify_all();
            }
            self.tracer.destroyed();
        }

        if let Some(fps) = self.fps.tick(now) {
            self.tracer.fps(&FpsEvent { fps });
        }
    }

    /// Switches between continuous and on-request ticking. Ignored until a
    /// surface exists.
    pub fn set_continuous_rendering(&mut self, continuous: bool) {
        if !self.has_surface {
            return;
        }
        self.continuous = continuous;
        self.scheduler.set_mode(self.mode());
    }

    /// Asks the scheduler for one draw tick. Ignored until a surface exists;
    /// repeated requests before the tick coalesce.
    pub fn request_rendering(&mut self) {
        if !self.has_surface {
            return;
        }
        self.scheduler.request_frame();
    }

    /// Returns whether the loop is in continuous render mode.
    #[must_use]
    pub const fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// Returns the current display geometry.
    #[must_use]
    pub const fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// Returns the delta of the most recent tick, in seconds.
    #[must_use]
    pub const fn delta_seconds(&self) -> f32 {
        self.timer.delta_seconds()
    }

    /// Returns the windowed mean of recent frame deltas, in seconds.
    #[must_use]
    pub fn smoothed_delta(&self) -> f32 {
        self.timer.smoothed_delta()
    }

    /// Returns the most recently published frames-per-second value.
    #[must_use]
    pub const fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Returns the current rendering-API binding, if a context is live.
    #[must_use]
    pub const fn binding(&self) -> Option<&GlBinding> {
        self.binding.as_ref()
    }

    const fn mode(&self) -> RenderMode {
        if self.continuous {
            RenderMode::Continuous
        } else {
            RenderMode::OnRequest
        }
    }
}

impl fmt::Debug for RenderLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderLoop")
            .field("state", &*self.signal.lock())
            .field("binding", &self.binding)
            .field("geometry", &self.geometry)
            .field("continuous", &self.continuous)
            .field("has_surface", &self.has_surface)
            .finish_non_exhaustive()
    }
}
