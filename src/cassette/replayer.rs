//! Serves recorded outputs back, one channel at a time.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Channel, Entry};

/// Per-channel queues over a loaded cassette.
///
/// Channels are independent: draining uploads does not move the clock.
#[derive(Debug, Default)]
pub struct CassetteReplayer {
    queues: HashMap<Channel, VecDeque<Entry>>,
}

impl CassetteReplayer {
    /// Queues every entry of `cassette` under its channel.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<Channel, VecDeque<Entry>> = HashMap::new();
        for entry in &cassette.entries {
            queues.entry(entry.channel).or_default().push_back(entry.clone());
        }
        Self { queues }
    }

    /// Takes the next entry on `channel`, or `None` once it is used up.
    pub fn next(&mut self, channel: Channel) -> Option<Entry> {
        let entry = self.queues.get_mut(&channel)?.pop_front();
        if entry.is_none() {
            tracing::debug!(channel = channel.name(), "cassette channel exhausted");
        }
        entry
    }

    /// Entries still queued on `channel`.
    #[must_use]
    pub fn remaining(&self, channel: Channel) -> usize {
        self.queues.get(&channel).map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cassette() -> Cassette {
        let mut c = Cassette::new("queues");
        c.push(Channel::ClockNow, json!(null), json!("2024-03-01T07:00:00+01:00"));
        c.push(Channel::Upload, json!(null), json!({"ok": {"id": "a", "name": "a"}}));
        c.push(Channel::ClockNow, json!(null), json!("2024-03-01T07:00:05+01:00"));
        c
    }

    #[test]
    fn channels_drain_independently() {
        let mut replayer = CassetteReplayer::new(&cassette());
        assert_eq!(replayer.next(Channel::Upload).map(|e| e.seq), Some(1));
        assert_eq!(replayer.next(Channel::ClockNow).map(|e| e.seq), Some(0));
        assert_eq!(replayer.remaining(Channel::ClockNow), 1);
        assert_eq!(replayer.next(Channel::ClockNow).map(|e| e.seq), Some(2));
    }

    #[test]
    fn used_up_and_unknown_channels_yield_none() {
        let mut replayer = CassetteReplayer::new(&cassette());
        assert!(replayer.next(Channel::Upload).is_some());
        assert!(replayer.next(Channel::Upload).is_none());

        let mut empty = CassetteReplayer::new(&Cassette::new("empty"));
        assert!(empty.next(Channel::ClockNow).is_none());
        assert_eq!(empty.remaining(Channel::Upload), 0);
    }
}
