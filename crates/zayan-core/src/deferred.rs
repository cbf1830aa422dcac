//! Fire-and-forget delayed callbacks.
//!
//! Simulated asynchronous behaviour (an agent answering a chat message, the
//! refresh notice) is queued here with a fixed delay and drained by the UI
//! tick. Entries cannot be cancelled and nothing waits on them: once
//! scheduled, an event fires on the first drain after its due time even if
//! the view that scheduled it is gone.

use std::time::{Duration, Instant};

/// Something to apply to the store once its delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredEvent {
    /// `agent_id` answers a chat message.
    AgentReply { agent_id: String, prompt: String },
    /// The manual refresh has finished.
    RefreshComplete,
}

#[derive(Debug)]
struct Pending {
    due: Instant,
    seq: u64,
    event: DeferredEvent,
}

/// Pending deferred events ordered by due time, ties by scheduling order.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl DeferredQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, event: DeferredEvent) {
        tracing::debug!(?event, delay_ms = delay.as_millis(), "deferred event scheduled");
        self.pending.push(Pending {
            due: now + delay,
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Remove and return every event due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<DeferredEvent> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter().map(|p| p.event).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due instant; the UI never polls for input past it.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(agent: &str) -> DeferredEvent {
        DeferredEvent::AgentReply {
            agent_id: agent.to_string(),
            prompt: "status ?".to_string(),
        }
    }

    #[test]
    fn nothing_fires_before_due() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(t0, Duration::from_millis(1500), reply("backend"));
        assert!(queue.drain_due(t0 + Duration::from_millis(1499)).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn due_events_fire_once() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(t0, Duration::from_millis(800), DeferredEvent::RefreshComplete);
        let fired = queue.drain_due(t0 + Duration::from_millis(800));
        assert_eq!(fired, vec![DeferredEvent::RefreshComplete]);
        assert!(queue.is_empty());
        assert!(queue.drain_due(t0 + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn events_fire_in_due_order_then_schedule_order() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(t0, Duration::from_millis(300), reply("late"));
        queue.schedule(t0, Duration::from_millis(100), reply("first"));
        queue.schedule(t0, Duration::from_millis(100), reply("second"));

        let fired = queue.drain_due(t0 + Duration::from_secs(1));
        assert_eq!(fired, vec![reply("first"), reply("second"), reply("late")]);
    }

    #[test]
    fn partial_drain_keeps_the_rest() {
        let t0 = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(t0, Duration::from_millis(100), reply("a"));
        queue.schedule(t0, Duration::from_millis(900), reply("b"));
        assert_eq!(queue.drain_due(t0 + Duration::from_millis(500)), vec![reply("a")]);
        assert_eq!(queue.next_due(), Some(t0 + Duration::from_millis(900)));
    }
}
