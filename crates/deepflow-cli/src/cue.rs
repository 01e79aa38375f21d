//! Terminal bell rendition of the completion cue.

use deepflow_core::cue::{CueKind, CuePlayer};
use std::io::Write;

/// Rings the terminal bell once per note of the requested chime.
/// Failures are ignored; the cue never reaches the engine.
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl CuePlayer for TerminalBell {
    fn play(&self, kind: CueKind) {
        if !self.enabled {
            return;
        }
        let mut err = std::io::stderr();
        for _ in kind.notes() {
            let _ = err.write_all(b"\x07");
        }
        let _ = err.flush();
    }
}
