use crate::ActionRecord;

use std::{sync::Arc, time::Duration};

use tracing::info;

/// Why a record was appended, which decides how it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrigin {
    /// Captured input event shown in the display list.
    Input,
    /// Ordinary pointer movement; replayed but not displayed.
    Stream,
    /// Explicit copy of the first move after recording starts.
    Anchor,
    /// Pointer move synthesized before a key press.
    Rehome,
    /// Final pointer move appended when recording stops.
    Trailing,
}

/// Ordered log of recorded actions plus its human-readable projection.
///
/// Insertion order is chronological order is replay order. The display list
/// is derived from the records as they are appended and is never read back
/// for playback.
#[derive(Debug, Default)]
pub struct ActionLog {
    records: Vec<ActionRecord>,
    display: Vec<String>,
}

impl ActionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and, unless it is part of the move stream, its display line.
    pub fn push(&mut self, record: ActionRecord, origin: RecordOrigin) {
        if let Some(line) = describe(&record, origin) {
            info!(action = %line, "Action recorded");
            self.display.push(line);
        }
        self.records.push(record);
    }

    /// Remove every record and display line.
    pub fn clear(&mut self) {
        self.records.clear();
        self.display.clear();
    }

    /// Recorded actions in replay order.
    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    /// Display lines in append order.
    pub fn display(&self) -> &[String] {
        &self.display
    }

    /// The last `count` display lines, oldest first.
    pub fn recent_display(&self, count: usize) -> &[String] {
        let start = self.display.len().saturating_sub(count);
        &self.display[start..]
    }

    /// Most recently appended record.
    pub fn last(&self) -> Option<&ActionRecord> {
        self.records.last()
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all recorded delays, i.e. the duration of one replay pass.
    pub fn total_delay(&self) -> Duration {
        self.records.iter().map(ActionRecord::delay).sum()
    }

    /// Immutable copy of the records for a playback run.
    pub fn snapshot(&self) -> Arc<[ActionRecord]> {
        Arc::from(self.records.as_slice())
    }
}

fn describe(record: &ActionRecord, origin: RecordOrigin) -> Option<String> {
    let delay = record.delay_secs();

    let line = match (origin, record) {
        (RecordOrigin::Stream, _) => return None,
        (RecordOrigin::Anchor, ActionRecord::Move { position, .. }) => {
            format!("First move to {}, delay: {:.2}s", position, delay)
        }
        (RecordOrigin::Rehome, ActionRecord::Move { position, .. }) => {
            format!("Move to {} before key, delay: {:.2}s", position, delay)
        }
        (RecordOrigin::Trailing, ActionRecord::Move { position, .. }) => {
            format!("Last move to {}, delay: {:.2}s", position, delay)
        }
        (_, ActionRecord::Move { position, .. }) => {
            format!("Move to {}, delay: {:.2}s", position, delay)
        }
        (
            _,
            ActionRecord::Click {
                position,
                button,
                pressed,
                ..
            },
        ) => format!(
            "{} {} at {}, delay: {:.2}s",
            if *pressed { "Press" } else { "Release" },
            button,
            position,
            delay
        ),
        (
            _,
            ActionRecord::Scroll {
                position, delta, ..
            },
        ) => format!(
            "Scroll ({}, {}) at {}, delay: {:.2}s",
            delta.dx, delta.dy, position, delay
        ),
        (_, ActionRecord::Key { key, pressed, .. }) => format!(
            "{} {}, delay: {:.2}s",
            if *pressed { "Press" } else { "Release" },
            key,
            delay
        ),
    };

    Some(line)
}
