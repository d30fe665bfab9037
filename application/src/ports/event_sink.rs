//! Event sink port
//!
//! The deliberation reports its progress as an ordered sequence of
//! [`DeliberationEvent`]s. Sinks decide what to do with them (render them,
//! log them, forward them over a channel); the use case makes no
//! assumption about transport.

use council_domain::DeliberationEvent;
use tokio::sync::mpsc;

/// Consumer of deliberation events
///
/// `emit` is synchronous and infallible so a slow or broken consumer can
/// never disturb the deliberation itself.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &DeliberationEvent);
}

/// No-op sink for when nobody is listening
pub struct NoEvents;

impl EventSink for NoEvents {
    fn emit(&self, _event: &DeliberationEvent) {}
}

/// Forwards events into an unbounded channel
///
/// Events are dropped silently once the receiver is gone.
#[derive(Clone)]
pub struct ChannelEventSink {
    sender: mpsc::UnboundedSender<DeliberationEvent>,
}

impl ChannelEventSink {
    pub fn new(sender: mpsc::UnboundedSender<DeliberationEvent>) -> Self {
        Self { sender }
    }

    /// Create a sink together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DeliberationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: &DeliberationEvent) {
        let _ = self.sender.send(event.clone());
    }
}

/// Fans every event out to several sinks, in order
///
/// Uses borrowed references so both owned and borrowed sinks can be
/// composed without wrapper types.
pub struct CompositeEventSink<'a> {
    delegates: Vec<&'a dyn EventSink>,
}

impl<'a> CompositeEventSink<'a> {
    pub fn new(delegates: Vec<&'a dyn EventSink>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, sink: &'a dyn EventSink) {
        self.delegates.push(sink);
    }
}

impl EventSink for CompositeEventSink<'_> {
    fn emit(&self, event: &DeliberationEvent) {
        for sink in &self.delegates {
            sink.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<&'static str>>);

    impl EventSink for Recorder {
        fn emit(&self, event: &DeliberationEvent) {
            self.0.lock().unwrap().push(event.name());
        }
    }

    #[test]
    fn test_composite_fans_out_in_order() {
        let first = Recorder::default();
        let second = Recorder::default();
        let composite = CompositeEventSink::new(vec![&first, &second]);

        composite.emit(&DeliberationEvent::Finished);

        assert_eq!(*first.0.lock().unwrap(), vec!["finished"]);
        assert_eq!(*second.0.lock().unwrap(), vec!["finished"]);
    }

    #[test]
    fn test_channel_sink_forwards_and_tolerates_closed_receiver() {
        let (sink, mut rx) = ChannelEventSink::channel();
        sink.emit(&DeliberationEvent::Aborted { round: 2 });
        assert_eq!(rx.try_recv().unwrap(), DeliberationEvent::Aborted { round: 2 });

        drop(rx);
        sink.emit(&DeliberationEvent::Finished);
    }
}
