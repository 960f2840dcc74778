// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-loop lifecycle state machine for mobile surfaces.
//!
//! `orogen_core` drives an application's render and lifecycle callbacks from
//! the surface events and draw ticks a mobile host delivers, and mediates
//! the lifecycle requests (pause, resume, destroy) that arrive from other
//! threads. It owns no GL state itself; the native context is an opaque
//! handle behind the [`context::NativeContext`] seam, wrapped once per
//! context lifetime in a [`context::GlBinding`] chosen by the
//! [`factory`].
//!
//! # Architecture
//!
//! ```text
//!   Host surface events          UI thread requests
//!   (created/changed/tick)       (pause/resume/destroy)
//!          │                             │
//!          ▼                             ▼
//!   RenderLoop  ◄── flags ──  LifecycleHandle
//!       │
//!       ├─► factory ─► GlBinding (legacy / legacy+ext / modern)
//!       ├─► RegistrySet (invalidate on recreate, clear on destroy)
//!       ├─► DeferredTasks (drained once per frame, before render)
//!       ├─► FrameTimer / FpsCounter
//!       └─► ApplicationListener + AudioHooks callbacks
//! ```
//!
//! **[`lifecycle`]**: the [`RenderLoop`](lifecycle::RenderLoop) state
//! machine and its cross-thread [`LifecycleHandle`](lifecycle::LifecycleHandle).
//! Requests set flags under one mutex; each draw tick snapshots and clears
//! them and performs the transitions on the rendering thread.
//!
//! **[`context`]**: the native-context seam and the tagged
//! [`GlBinding`](context::GlBinding) union over the supported API variants.
//!
//! **[`factory`]**: binding selection for a fresh context, honoring runtime
//! capability probes and the device quirk table.
//!
//! **[`quirks`]**: the declarative table of known-bad device/driver
//! combinations.
//!
//! **[`config`]**: surface configuration selection, including the forced
//! depth-buffer minimum some devices need.
//!
//! **[`registry`]**: the managed-resource registry contract used for
//! context-loss recovery.
//!
//! **[`tasks`]**: the deferred-task queue drained on the rendering thread
//! once per frame.
//!
//! **[`listener`]**: the application's callback surface.
//!
//! **[`display`]**: display metrics and derived geometry.
//!
//! **[`time`]** and **[`timing`]**: the monotonic clock seam, frame deltas,
//! windowed smoothing, and the FPS counter.
//!
//! **[`trace`]**: diagnostics events and the
//! [`DiagnosticsSink`](trace::DiagnosticsSink) trait, all no-op by default.

pub mod config;
pub mod context;
pub mod display;
pub mod factory;
pub mod lifecycle;
pub mod listener;
pub mod quirks;
pub mod registry;
pub mod tasks;
pub mod time;
pub mod timing;
pub mod trace;
