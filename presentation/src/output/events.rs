//! Line-delimited JSON event output

use council_application::EventSink;
use council_domain::DeliberationEvent;
use std::io::Write;
use std::sync::Mutex;

/// Prints every deliberation event as one JSON line as soon as it happens
pub struct JsonEventPrinter<W: Write + Send> {
    out: Mutex<W>,
}

impl JsonEventPrinter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonEventPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> EventSink for JsonEventPrinter<W> {
    fn emit(&self, event: &DeliberationEvent) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{AgentId, Phase};

    #[test]
    fn test_one_line_per_event() {
        let printer = JsonEventPrinter::new(Vec::new());
        printer.emit(&DeliberationEvent::RoundStarted {
            round: 1,
            active: vec![AgentId::from("model-a")],
        });
        printer.emit(&DeliberationEvent::PhaseStarted {
            round: 1,
            phase: Phase::Arbitrating,
        });
        printer.emit(&DeliberationEvent::Finished);

        let out = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "round_started");
        assert_eq!(lines[1]["phase"], "arbiter");
        assert_eq!(lines[2]["type"], "finished");
    }
}
