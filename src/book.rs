//! In-memory order book keyed by sequence number.
//!
//! The book and its missing-sequence set are owned by the calling context
//! and passed explicitly to each operation; nothing here is global. The
//! invariant pair:
//! - at most one packet per sequence, later merges overwrite earlier ones;
//! - a sequence leaves the missing set exactly when a packet for it is
//!   merged (or explicitly resolved after a resend), and is only re-added
//!   if a new gap is independently detected.

use std::collections::{BTreeMap, BTreeSet};

use crate::wire::Packet;

/// All packets known for a session, plus the sequences observed missing.
#[derive(Debug, Default)]
pub struct OrderBook {
    entries: BTreeMap<u32, Packet>,
    missing: BTreeSet<u32>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-overwrite by sequence. Merging resolves the packet's
    /// sequence if it was pending.
    pub fn merge(&mut self, pkt: Packet) {
        self.missing.remove(&pkt.sequence);
        self.entries.insert(pkt.sequence, pkt);
    }

    /// Record a sequence detected as missing. No-op if a packet for it has
    /// already been merged.
    pub fn note_missing(&mut self, seq: u32) {
        if !self.entries.contains_key(&seq) {
            self.missing.insert(seq);
        }
    }

    /// Drop a sequence from the missing set without merging a packet.
    pub fn resolve(&mut self, seq: u32) {
        self.missing.remove(&seq);
    }

    pub fn is_missing(&self, seq: u32) -> bool {
        self.missing.contains(&seq)
    }

    /// Missing sequences, ascending.
    pub fn missing(&self) -> impl Iterator<Item = u32> + '_ {
        self.missing.iter().copied()
    }

    /// All packets, ascending by sequence.
    pub fn snapshot(&self) -> impl Iterator<Item = &Packet> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkt(seq: u32) -> Packet {
        Packet {
            symbol: "AAPL".into(),
            indicator: 'B',
            quantity: 10,
            price: 100,
            sequence: seq,
        }
    }

    #[test]
    fn merge_is_idempotent_and_overwrites() {
        let mut book = OrderBook::new();
        book.merge(pkt(1));
        book.merge(pkt(1));
        assert_eq!(book.len(), 1);

        let mut newer = pkt(1);
        newer.quantity = 99;
        book.merge(newer);
        assert_eq!(book.len(), 1);
        assert_eq!(book.snapshot().next().unwrap().quantity, 99);
    }

    #[test]
    fn merge_resolves_missing() {
        let mut book = OrderBook::new();
        book.note_missing(3);
        assert!(book.is_missing(3));
        book.merge(pkt(3));
        assert!(!book.is_missing(3));
        assert_eq!(book.missing().count(), 0);
    }

    #[test]
    fn note_missing_skips_known_sequences() {
        let mut book = OrderBook::new();
        book.merge(pkt(2));
        book.note_missing(2);
        assert!(!book.is_missing(2));
    }

    #[test]
    fn snapshot_and_missing_ascend() {
        let mut book = OrderBook::new();
        for seq in [5, 1, 9] {
            book.merge(pkt(seq));
        }
        for seq in [8, 2, 4] {
            book.note_missing(seq);
        }
        let seqs: Vec<u32> = book.snapshot().map(|p| p.sequence).collect();
        assert_eq!(seqs, vec![1, 5, 9]);
        assert_eq!(book.missing().collect::<Vec<_>>(), vec![2, 4, 8]);
    }
}
