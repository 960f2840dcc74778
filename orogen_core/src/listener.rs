// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application-facing lifecycle callbacks.
//!
//! The lifecycle loop drives exactly one [`ApplicationListener`]. Every
//! method runs synchronously on the rendering thread, at most once per
//! matching lifecycle event, in the order documented on
//! [`RenderLoop::on_draw_frame`](crate::lifecycle::RenderLoop::on_draw_frame).
//! Panics inside a callback propagate to the host; the loop never catches
//! them.

/// The application's render and lifecycle callback set.
pub trait ApplicationListener {
    /// Called once, on the rendering thread, when the very first surface and
    /// context become available. Not called again on context recreation;
    /// re-upload of GPU resources happens lazily via the managed-resource
    /// registries.
    fn create(&mut self);

    /// Called when the surface size changes. May arrive any number of times,
    /// including before the first [`render`](Self::render).
    fn resize(&mut self, width: u32, height: u32);

    /// Called once per draw tick while the loop is running, after deferred
    /// tasks have been drained.
    fn render(&mut self);

    /// Called on the tick that observes a pause request.
    fn pause(&mut self);

    /// Called on the tick that observes a resume request.
    fn resume(&mut self);

    /// Called on the tick that observes a destroy request. Terminal; the
    /// listener receives no further callbacks.
    fn dispose(&mut self);
}

/// Audio subsystem hooks, invoked immediately after the matching listener
/// callback on pause and destroy transitions.
pub trait AudioHooks {
    /// Invoked right after [`ApplicationListener::pause`].
    fn pause(&mut self);

    /// Invoked right after [`ApplicationListener::dispose`].
    fn dispose(&mut self);
}

/// An [`AudioHooks`] implementation that does nothing, for applications
/// without audio.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioHooks for NullAudio {
    fn pause(&mut self) {}

    fn dispose(&mut self) {}
}
