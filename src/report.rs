// src/report.rs

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::aggregator::{TrafficAggregator, TurnTally};
use crate::color::VehicleColor;
use crate::track::VehicleTrack;

/// Final analytics snapshot for one processed stream. This is the persisted
/// artifact the web layer serves; field names and shapes are part of that
/// contract.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub turn_counts: TurnTally,
    /// Sum of all entry events plus all turn events. The two populations are
    /// different (vehicles that entered vs. vehicles that completed a
    /// countable turn), so this is NOT a unique-vehicle count. Downstream
    /// consumers depend on this exact arithmetic.
    pub total_count: u64,
    /// Entry events per whole second of video time. Keys serialize as JSON
    /// strings.
    pub entries_by_time: BTreeMap<u64, u32>,
    /// Countable turn events per whole second, tallied per maneuver.
    pub turns_by_time: BTreeMap<u64, TurnTally>,
    pub white_car_count: u32,
    pub black_car_count: u32,
    pub different_other_color_car_types: u32,
}

/// Assemble the report from the aggregator and every track observed during
/// the stream. Color counts are per track (last observed color), never per
/// detection.
pub fn build_report<'a>(
    aggregator: &TrafficAggregator,
    tracks: impl Iterator<Item = &'a VehicleTrack>,
) -> AnalyticsReport {
    let mut white_car_count = 0u32;
    let mut black_car_count = 0u32;
    let mut other_colors: HashSet<VehicleColor> = HashSet::new();

    for track in tracks {
        match track.color {
            VehicleColor::White => white_car_count += 1,
            VehicleColor::Black => black_car_count += 1,
            other => {
                other_colors.insert(other);
            }
        }
    }

    let entries_total: u64 = aggregator
        .entries_by_time()
        .values()
        .map(|&n| n as u64)
        .sum();
    let turns_total: u64 = aggregator
        .turns_by_time()
        .values()
        .map(|tally| tally.total())
        .sum();

    AnalyticsReport {
        turn_counts: aggregator.turn_counts(),
        total_count: entries_total + turns_total,
        entries_by_time: aggregator.entries_by_time().clone(),
        turns_by_time: aggregator.turns_by_time().clone(),
        white_car_count,
        black_car_count,
        different_other_color_car_types: other_colors.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::VehicleColor;
    use crate::turns::TurnType;

    fn track_with_color(id: i64, color: VehicleColor) -> VehicleTrack {
        let mut track = VehicleTrack::new(id);
        track.color = color;
        track
    }

    #[test]
    fn empty_stream_yields_all_zero_report() {
        let agg = TrafficAggregator::new();
        let report = build_report(&agg, [].iter());

        assert_eq!(report.total_count, 0);
        assert_eq!(report.turn_counts, TurnTally::default());
        assert!(report.entries_by_time.is_empty());
        assert!(report.turns_by_time.is_empty());
        assert_eq!(report.white_car_count, 0);
        assert_eq!(report.black_car_count, 0);
        assert_eq!(report.different_other_color_car_types, 0);
    }

    #[test]
    fn total_count_is_entries_plus_turns_by_construction() {
        let mut agg = TrafficAggregator::new();
        agg.record_entry(1);
        agg.record_entry(1);
        agg.record_entry(4);
        agg.record_turn(3, TurnType::Left);
        agg.record_turn(6, TurnType::Right);

        let report = build_report(&agg, [].iter());

        let entries: u64 = report.entries_by_time.values().map(|&n| n as u64).sum();
        let turns: u64 = report.turns_by_time.values().map(|t| t.total()).sum();
        assert_eq!(report.total_count, entries + turns);
        assert_eq!(report.total_count, 5);
    }

    #[test]
    fn color_counts_are_per_track() {
        let agg = TrafficAggregator::new();
        let tracks = vec![
            track_with_color(1, VehicleColor::White),
            track_with_color(2, VehicleColor::White),
            track_with_color(3, VehicleColor::Black),
            track_with_color(4, VehicleColor::Red),
            track_with_color(5, VehicleColor::Red),
            track_with_color(6, VehicleColor::Silver),
        ];
        let report = build_report(&agg, tracks.iter());

        assert_eq!(report.white_car_count, 2);
        assert_eq!(report.black_car_count, 1);
        // Red and Silver: two distinct non-white, non-black labels.
        assert_eq!(report.different_other_color_car_types, 2);
    }

    #[test]
    fn unknown_counts_as_an_other_color_label() {
        let agg = TrafficAggregator::new();
        let tracks = vec![
            track_with_color(1, VehicleColor::Unknown),
            track_with_color(2, VehicleColor::Other),
            track_with_color(3, VehicleColor::White),
        ];
        let report = build_report(&agg, tracks.iter());

        assert_eq!(report.white_car_count, 1);
        assert_eq!(report.different_other_color_car_types, 2);
    }

    #[test]
    fn report_serializes_with_contract_field_names() {
        let mut agg = TrafficAggregator::new();
        agg.record_entry(2);
        agg.record_turn(2, TurnType::UTurn);

        let report = build_report(&agg, [].iter());
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("turn_counts").is_some());
        assert!(json.get("total_count").is_some());
        assert!(json.get("entries_by_time").is_some());
        assert!(json.get("turns_by_time").is_some());
        assert!(json.get("white_car_count").is_some());
        assert!(json.get("black_car_count").is_some());
        assert!(json.get("different_other_color_car_types").is_some());

        // Second buckets keyed by stringified integers, tallies fully keyed.
        assert_eq!(json["entries_by_time"]["2"], 1);
        assert_eq!(json["turns_by_time"]["2"]["U-turn"], 1);
        assert_eq!(json["turns_by_time"]["2"]["Right"], 0);
        assert_eq!(json["turn_counts"]["U-turn"], 1);
    }
}
