//=========================================================================
// Event Collector
//=========================================================================
//
// Drains platform events at the frame boundary with bounded polling and
// shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input batches → TickControl
//
// Never blocks: the collector runs on the event loop thread, inside the
// redraw handler.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects the platform events queued since the last frame.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Drains pending events, at most [`MAX_EVENTS_PER_FRAME`] per call.
    ///
    /// Returns [`TickControl::Exit`] on window close or once every sender
    /// is gone.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    drained += 1;
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "input", "Event queue backlog: drained {} events this frame", drained);
        } else if drained > 0 {
            trace!(target: "input", "Collected {} platform events", drained);
        }

        TickControl::Continue
    }

    /// Input batches collected by the last [`collect_frame`](Self::collect_frame).
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs(batch) => {
                if !batch.is_empty() {
                    self.input_batches.push(batch);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn space() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn collect_aggregates_multiple_events() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![space()])).unwrap();
        tx.send(PlatformEvent::Inputs(vec![space(), space()])).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.batches().len(), 2);
        assert_eq!(collector.batches()[1].len(), 2);
    }

    #[test]
    fn empty_batches_are_skipped() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![])).unwrap();

        collector.collect_frame();
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![space()])).unwrap();
        collector.collect_frame();
        assert_eq!(collector.batches().len(), 1);

        collector.collect_frame();
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn collect_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..(MAX_EVENTS_PER_FRAME + 5) {
            tx.send(PlatformEvent::Inputs(vec![space()])).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), MAX_EVENTS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 5);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
