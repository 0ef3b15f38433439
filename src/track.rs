// src/track.rs
//
// Per-track lifecycle through the intersection. One VehicleTrack exists per
// tracker identity and consumes that identity's detections frame by frame:
//
//   NEW ──(center inside an entry zone)──▶ ENTERED ──(center inside an exit
//   zone)──▶ EXITED (terminal)
//
// Zone and turn fields are write-once; `counted_entry` / `counted_turn` make
// sure each track contributes at most one entry event and at most one turn
// event to the aggregator no matter how many frames it appears in.

use std::fmt;

use crate::color::{self, ColorSample, VehicleColor};
use crate::turns::{infer_turn, TurnType};
use crate::zones::ZoneRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    New,
    Entered,
    Exited,
}

/// Countable transitions produced by one observation. Seconds are the frame
/// timestamp truncated to whole seconds, ready for time-bucketing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackUpdate {
    pub entry_second: Option<u64>,
    pub turn_event: Option<(TurnType, u64)>,
}

#[derive(Debug, Clone)]
pub struct VehicleTrack {
    pub track_id: i64,
    pub entry_zone: Option<&'static str>,
    pub exit_zone: Option<&'static str>,
    pub turn: Option<TurnType>,
    /// Video time (seconds) when the exit zone was recorded.
    pub turn_time: Option<f64>,
    /// Last observed color; every detection overwrites it.
    pub color: VehicleColor,
    counted_entry: bool,
    counted_turn: bool,
}

impl VehicleTrack {
    pub fn new(track_id: i64) -> Self {
        Self {
            track_id,
            entry_zone: None,
            exit_zone: None,
            turn: None,
            turn_time: None,
            color: VehicleColor::Unknown,
            counted_entry: false,
            counted_turn: false,
        }
    }

    pub fn state(&self) -> TrackState {
        match (self.entry_zone, self.exit_zone) {
            (None, _) => TrackState::New,
            (Some(_), None) => TrackState::Entered,
            (Some(_), Some(_)) => TrackState::Exited,
        }
    }

    /// Turn name for the rendering collaborator's overlay; tracks without a
    /// classification read as "unclassified".
    pub fn turn_label(&self) -> &'static str {
        self.turn.map(|t| t.as_str()).unwrap_or("unclassified")
    }

    /// Apply one detection. Entry is checked first; when it records an entry
    /// zone the exit check still runs against the same center point, so a
    /// track can enter and exit within a single frame. After EXITED only the
    /// color keeps updating — re-entry is not modeled.
    pub fn observe(
        &mut self,
        center: (i64, i64),
        frame_time: f64,
        sample: Option<ColorSample>,
        zones: &ZoneRegistry,
    ) -> TrackUpdate {
        let mut update = TrackUpdate::default();
        let second = frame_time as u64;

        if self.entry_zone.is_none() {
            if let Some(zone) = zones.entry.locate(center) {
                self.entry_zone = Some(zone);
                if !self.counted_entry {
                    self.counted_entry = true;
                    update.entry_second = Some(second);
                }
            }
        }

        if let (Some(entry), None) = (self.entry_zone, self.exit_zone) {
            if let Some(exit) = zones.exit.locate(center) {
                self.exit_zone = Some(exit);
                self.turn = infer_turn(entry, exit);
                self.turn_time = Some(frame_time);
                if let Some(turn) = self.turn {
                    if turn.is_counted() && !self.counted_turn {
                        self.counted_turn = true;
                        update.turn_event = Some((turn, second));
                    }
                }
            }
        }

        self.color = color::classify(sample);
        update
    }
}

impl fmt::Display for VehicleTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "track {}: entry={} exit={} turn={} turned_at={} color={}",
            self.track_id,
            self.entry_zone.unwrap_or("-"),
            self.exit_zone.unwrap_or("-"),
            self.turn_label(),
            self.turn_time
                .map(|t| format!("{:.2}s", t))
                .unwrap_or_else(|| "-".to_string()),
            self.color.as_str(),
        )
    }
}
