// src/aggregator.rs
//
// One-second bucketed counting. Events arrive already deduplicated by the
// track state machine (each track delivers at most one entry event and at
// most one turn event), so the aggregator just files them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::turns::TurnType;

/// Tally of the countable maneuvers. Field order is the serialization order
/// of the report; a bucket always carries all three keys, zeros included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TurnTally {
    #[serde(rename = "Right")]
    pub right: u32,
    #[serde(rename = "Left")]
    pub left: u32,
    #[serde(rename = "U-turn")]
    pub u_turn: u32,
}

impl TurnTally {
    fn bump(&mut self, turn: TurnType) {
        match turn {
            TurnType::Right => self.right += 1,
            TurnType::Left => self.left += 1,
            TurnType::UTurn => self.u_turn += 1,
            // Straight has no slot in the tallies.
            TurnType::Straight => {}
        }
    }

    pub fn get(&self, turn: TurnType) -> u32 {
        match turn {
            TurnType::Right => self.right,
            TurnType::Left => self.left,
            TurnType::UTurn => self.u_turn,
            TurnType::Straight => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.right as u64 + self.left as u64 + self.u_turn as u64
    }
}

#[derive(Debug, Default)]
pub struct TrafficAggregator {
    entries_by_time: BTreeMap<u64, u32>,
    turns_by_time: BTreeMap<u64, TurnTally>,
    turn_counts: TurnTally,
    total_entries: u64,
}

impl TrafficAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_entry(&mut self, second: u64) {
        *self.entries_by_time.entry(second).or_insert(0) += 1;
        self.total_entries += 1;
    }

    pub fn record_turn(&mut self, second: u64, turn: TurnType) {
        if !turn.is_counted() {
            return;
        }
        self.turns_by_time.entry(second).or_default().bump(turn);
        self.turn_counts.bump(turn);
    }

    pub fn entries_by_time(&self) -> &BTreeMap<u64, u32> {
        &self.entries_by_time
    }

    pub fn turns_by_time(&self) -> &BTreeMap<u64, TurnTally> {
        &self.turns_by_time
    }

    pub fn turn_counts(&self) -> TurnTally {
        self.turn_counts
    }

    pub fn total_entries(&self) -> u64 {
        self.total_entries
    }

    pub fn total_turns(&self) -> u64 {
        self.turn_counts.total()
    }
}
