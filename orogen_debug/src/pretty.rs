// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable one-line-per-event output.

use std::io::{self, Write};

use crate::recorder::{LoopRecord, Stamped};

/// Formats one record as a single line, stamped in milliseconds.
#[must_use]
pub fn format_record(stamped: &Stamped) -> String {
    let ms = stamped.at.nanos() / 1_000_000;
    let detail = match &stamped.record {
        LoopRecord::BindingInstalled(e) => format!(
            "api={} renderer={:?} vendor={:?} version={:?}",
            e.api.label(),
            e.renderer,
            e.vendor,
            e.version
        ),
        LoopRecord::SurfaceCreated(e) => {
            format!("first={} size={}x{}", e.first, e.width, e.height)
        }
        LoopRecord::SurfaceChanged(e) => format!("size={}x{}", e.width, e.height),
        LoopRecord::Resumed | LoopRecord::Paused | LoopRecord::Destroyed => String::new(),
        LoopRecord::RegistryStatus(e) => {
            format!("{}: {}", e.kind.label(), e.status)
        }
        LoopRecord::Fps(e) => format!("fps={}", e.fps),
    };

    if detail.is_empty() {
        format!("[{ms:>8}ms] {}", stamped.record.name())
    } else {
        format!("[{ms:>8}ms] {} {detail}", stamped.record.name())
    }
}

/// Writes every record, one line each, to `writer`.
pub fn dump(records: &[Stamped], writer: &mut dyn Write) -> io::Result<()> {
    for stamped in records {
        writeln!(writer, "{}", format_record(stamped))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orogen_core::time::TimePoint;
    use orogen_core::trace::{FpsEvent, SurfaceCreatedEvent};

    #[test]
    fn lines_carry_stamp_name_and_detail() {
        let stamped = Stamped {
            at: TimePoint(2_000_000_000),
            record: LoopRecord::SurfaceCreated(SurfaceCreatedEvent {
                first: true,
                width: 480,
                height: 800,
            }),
        };
        let line = format_record(&stamped);
        assert!(line.contains("2000ms"), "stamp in ms: {line}");
        assert!(line.contains("SurfaceCreated"), "{line}");
        assert!(line.contains("first=true size=480x800"), "{line}");
    }

    #[test]
    fn dump_writes_one_line_per_record() {
        let records = vec![
            Stamped {
                at: TimePoint(0),
                record: LoopRecord::Resumed,
            },
            Stamped {
                at: TimePoint(1_000_000),
                record: LoopRecord::Fps(FpsEvent { fps: 60 }),
            },
        ];

        let mut out = Vec::new();
        dump(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2, "one line per record:\n{text}");
        assert!(text.contains("fps=60"), "{text}");
    }
}
