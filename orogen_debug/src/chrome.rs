// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] writes recorded lifecycle events as [Chrome Trace Event
//! Format][spec] JSON, suitable for loading into `chrome://tracing` or
//! [Perfetto](https://ui.perfetto.dev/). Every record becomes a global
//! instant event; stamps are converted from nanoseconds to the format's
//! microseconds.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{LoopRecord, Stamped};

/// Exports records as a complete JSON array of trace event objects.
pub fn export(records: &[Stamped], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = records.iter().map(event_json).collect();
    let text = serde_json::to_string_pretty(&events)?;
    writer.write_all(text.as_bytes())
}

fn event_json(stamped: &Stamped) -> Value {
    json!({
        "ph": "i",
        "name": stamped.record.name(),
        "cat": category(&stamped.record),
        "ts": stamped.at.nanos() / 1_000,
        "pid": 0,
        "tid": 0,
        "s": "g",
        "args": args_json(&stamped.record),
    })
}

const fn category(record: &LoopRecord) -> &'static str {
    match record {
        LoopRecord::BindingInstalled(_) => "Context",
        LoopRecord::SurfaceCreated(_) | LoopRecord::SurfaceChanged(_) => "Surface",
        LoopRecord::Resumed | LoopRecord::Paused | LoopRecord::Destroyed => "Lifecycle",
        LoopRecord::RegistryStatus(_) => "Registry",
        LoopRecord::Fps(_) => "Timing",
    }
}

fn args_json(record: &LoopRecord) -> Value {
    match record {
        LoopRecord::BindingInstalled(e) => json!({
            "api": e.api.label(),
            "renderer": e.renderer,
            "vendor": e.vendor,
            "version": e.version,
        }),
        LoopRecord::SurfaceCreated(e) => json!({
            "first": e.first,
            "width": e.width,
            "height": e.height,
        }),
        LoopRecord::SurfaceChanged(e) => json!({
            "width": e.width,
            "height": e.height,
        }),
        LoopRecord::Resumed | LoopRecord::Paused | LoopRecord::Destroyed => json!({}),
        LoopRecord::RegistryStatus(e) => json!({
            "registry": e.kind.label(),
            "status": e.status,
        }),
        LoopRecord::Fps(e) => json!({ "fps": e.fps }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orogen_core::time::TimePoint;
    use orogen_core::trace::{FpsEvent, SurfaceChangedEvent};

    #[test]
    fn export_produces_parseable_instant_events() {
        let records = vec![
            Stamped {
                at: TimePoint(5_000),
                record: LoopRecord::Paused,
            },
            Stamped {
                at: TimePoint(1_000_000),
                record: LoopRecord::SurfaceChanged(SurfaceChangedEvent {
                    width: 320,
                    height: 240,
                }),
            },
        ];

        let mut out = Vec::new();
        export(&records, &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let events = parsed.as_array().unwrap();
        assert_eq!(events.len(), 2);

        assert_eq!(events[0]["ph"], "i");
        assert_eq!(events[0]["name"], "Paused");
        assert_eq!(events[0]["ts"], 5, "5000ns is 5us");

        assert_eq!(events[1]["cat"], "Surface");
        assert_eq!(events[1]["ts"], 1_000);
        assert_eq!(events[1]["args"]["width"], 320);
    }

    #[test]
    fn fps_events_carry_their_value() {
        let records = [Stamped {
            at: TimePoint(0),
            record: LoopRecord::Fps(FpsEvent { fps: 58 }),
        }];

        let mut out = Vec::new();
        export(&records, &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["args"]["fps"], 58);
        assert_eq!(parsed[0]["cat"], "Timing");
    }
}
