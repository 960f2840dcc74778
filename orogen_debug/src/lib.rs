// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for orogen
//! diagnostics.
//!
//! This crate provides tooling around
//! [`DiagnosticsSink`](orogen_core::trace::DiagnosticsSink) for development
//! and post-mortem analysis:
//!
//! - [`recorder::RecordingSink`]: appends every event, stamped, to a shared
//!   in-memory store readable through any clone of the sink.
//! - [`pretty`]: human-readable one-line-per-event output.
//! - [`chrome`]: writes Chrome Trace Event Format JSON from recorded events.

pub mod chrome;
pub mod pretty;
pub mod recorder;
