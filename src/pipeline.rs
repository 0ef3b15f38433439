// src/pipeline.rs
//
// Per-job analysis context. One TrafficAnalyzer exists per detection stream
// and owns everything mutable for that job: the track map, the aggregator
// and the zone registry. There is no process-wide state; independent jobs
// just hold independent analyzers.

use std::collections::HashMap;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::aggregator::TrafficAggregator;
use crate::report::{build_report, AnalyticsReport};
use crate::track::VehicleTrack;
use crate::types::FrameRecord;
use crate::zones::ZoneRegistry;

pub struct TrafficAnalyzer {
    zones: ZoneRegistry,
    tracks: HashMap<i64, VehicleTrack>,
    aggregator: TrafficAggregator,
    last_frame_time: Option<f64>,
    frames_processed: u64,
    detections_seen: u64,
    detections_dropped: u64,
}

impl TrafficAnalyzer {
    pub fn new(zones: ZoneRegistry) -> Self {
        Self {
            zones,
            tracks: HashMap::new(),
            aggregator: TrafficAggregator::new(),
            last_frame_time: None,
            frames_processed: 0,
            detections_seen: 0,
            detections_dropped: 0,
        }
    }

    pub fn with_default_zones() -> Self {
        Self::new(ZoneRegistry::intersection_default())
    }

    /// Apply one frame of detections. Frames must arrive in non-decreasing
    /// `frame_time` order; an out-of-order frame fails the job rather than
    /// mis-bucketing events against stale state.
    pub fn process_frame(&mut self, frame: &FrameRecord) -> Result<()> {
        if let Some(last) = self.last_frame_time {
            if frame.frame_time < last {
                bail!(
                    "out-of-order frame: {:.3}s after {:.3}s",
                    frame.frame_time,
                    last
                );
            }
        }
        self.last_frame_time = Some(frame.frame_time);
        self.frames_processed += 1;

        for detection in &frame.detections {
            self.detections_seen += 1;

            // Detections the tracker could not associate carry no id.
            let Some(track_id) = detection.track_id else {
                self.detections_dropped += 1;
                debug!("frame {:.2}s: unassociated detection dropped", frame.frame_time);
                continue;
            };

            let track = self
                .tracks
                .entry(track_id)
                .or_insert_with(|| VehicleTrack::new(track_id));

            let update = track.observe(
                detection.center(),
                frame.frame_time,
                detection.color_sample(),
                &self.zones,
            );

            if let Some(second) = update.entry_second {
                self.aggregator.record_entry(second);
                info!(
                    "🚗 track {} entered {} at {:.2}s",
                    track_id,
                    track.entry_zone.unwrap_or("?"),
                    frame.frame_time
                );
            }
            if let Some((turn, second)) = update.turn_event {
                self.aggregator.record_turn(second, turn);
                info!(
                    "↪️  track {} completed {} ({} → {}) at {:.2}s",
                    track_id,
                    turn.as_str(),
                    track.entry_zone.unwrap_or("?"),
                    track.exit_zone.unwrap_or("?"),
                    frame.frame_time
                );
            }
        }

        Ok(())
    }

    /// Build the final report and discard the per-job state.
    pub fn finalize(self) -> AnalyticsReport {
        build_report(&self.aggregator, self.tracks.values())
    }

    pub fn track(&self, track_id: i64) -> Option<&VehicleTrack> {
        self.tracks.get(&track_id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &VehicleTrack> {
        self.tracks.values()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn detections_seen(&self) -> u64 {
        self.detections_seen
    }

    pub fn detections_dropped(&self) -> u64 {
        self.detections_dropped
    }
}
