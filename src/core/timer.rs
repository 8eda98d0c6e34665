//=========================================================================
// Timer Queue
//=========================================================================
//
// Cancelable deferred actions for the playback state machine.
//
// Architecture:
//   schedule(due, payload) → TimerHandle
//   cancel(handle)         → payload dropped, never fires
//   pop_due(now)           → earliest due (handle, payload), FIFO on ties
//
// Timers are polled from the frame tick, so no callback ever runs on
// another thread. Handles are never reused, which lets owners compare a
// fired handle against the one they hold and drop stale firings.
//
//=========================================================================

//=== TimerHandle =========================================================

/// Identifies one scheduled timer. Handles are unique per queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

//=== TimerQueue ==========================================================

#[derive(Debug)]
struct Entry<T> {
    handle: TimerHandle,
    due: f64,
    payload: T,
}

/// Small ordered set of pending timers.
///
/// Playback never has more than two timers outstanding, so a linear scan
/// beats a heap here.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(4),
            next_id: 0,
        }
    }

    /// Schedules `payload` to fire once `now >= due`.
    pub fn schedule(&mut self, due: f64, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { handle, due, payload });
        handle
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was
    /// canceled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the earliest timer due at `now`, if any.
    pub fn pop_due(&mut self, now: f64) -> Option<(TimerHandle, T)> {
        let mut best: Option<usize> = None;

        for (i, entry) in self.entries.iter().enumerate() {
            if entry.due > now {
                continue;
            }
            match best {
                Some(b) if self.entries[b].due <= entry.due => {}
                _ => best = Some(i),
            }
        }

        best.map(|i| {
            let entry = self.entries.remove(i);
            (entry.handle, entry.payload)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
