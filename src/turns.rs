// src/turns.rs

use serde::{Deserialize, Serialize};

/// Maneuver inferred from an (entry zone, exit zone) pair.
///
/// `Straight` is classified on the track but has no slot in the aggregate
/// tallies; only left, right and U-turns are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnType {
    Left,
    Right,
    #[serde(rename = "U-turn")]
    UTurn,
    Straight,
}

impl TurnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::UTurn => "U-turn",
            Self::Straight => "Straight",
        }
    }

    /// Whether this maneuver contributes to the aggregate turn counts.
    pub fn is_counted(&self) -> bool {
        !matches!(self, Self::Straight)
    }
}

/// Static (entry, exit) -> maneuver table for right-hand traffic at a
/// four-way intersection. Pairs outside the table (cross traffic through
/// mismatched zones) yield `None` and are left unclassified.
pub fn infer_turn(entry: &str, exit: &str) -> Option<TurnType> {
    use TurnType::*;
    let turn = match (entry, exit) {
        ("north_in", "east_out") => Left,
        ("north_in", "south_out") => Straight,
        ("north_in", "west_out") => Right,
        ("north_in", "north_out") => UTurn,

        ("east_in", "south_out") => Left,
        ("east_in", "west_out") => Straight,
        ("east_in", "north_out") => Right,
        ("east_in", "east_out") => UTurn,

        ("south_in", "west_out") => Left,
        ("south_in", "north_out") => Straight,
        ("south_in", "east_out") => Right,
        ("south_in", "south_out") => UTurn,

        ("west_in", "north_out") => Left,
        ("west_in", "east_out") => Straight,
        ("west_in", "south_out") => Right,
        ("west_in", "west_out") => UTurn,

        _ => return None,
    };
    Some(turn)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: [&str; 4] = ["north_in", "east_in", "south_in", "west_in"];
    const EXITS: [&str; 4] = ["north_out", "east_out", "south_out", "west_out"];

    #[test]
    fn right_hand_geometry_spot_checks() {
        assert_eq!(infer_turn("north_in", "west_out"), Some(TurnType::Right));
        assert_eq!(infer_turn("north_in", "north_out"), Some(TurnType::UTurn));
        assert_eq!(infer_turn("north_in", "east_out"), Some(TurnType::Left));
        assert_eq!(infer_turn("south_in", "north_out"), Some(TurnType::Straight));
        assert_eq!(infer_turn("west_in", "north_out"), Some(TurnType::Left));
    }

    #[test]
    fn every_cardinal_pair_is_covered() {
        for entry in ENTRIES {
            for exit in EXITS {
                assert!(
                    infer_turn(entry, exit).is_some(),
                    "missing table entry for ({}, {})",
                    entry,
                    exit
                );
            }
        }
    }

    #[test]
    fn each_entry_sees_all_four_maneuvers() {
        for entry in ENTRIES {
            let seen: std::collections::HashSet<TurnType> = EXITS
                .iter()
                .filter_map(|exit| infer_turn(entry, exit))
                .collect();
            assert_eq!(seen.len(), 4, "duplicate maneuver for entry {}", entry);
        }
    }

    #[test]
    fn unknown_pairs_are_unclassified() {
        assert_eq!(infer_turn("north_in", "nowhere_out"), None);
        assert_eq!(infer_turn("ramp_in", "south_out"), None);
        // Entry names never appear on the exit side of the table.
        assert_eq!(infer_turn("north_in", "south_in"), None);
    }

    #[test]
    fn lookup_is_a_pure_function() {
        for _ in 0..3 {
            assert_eq!(infer_turn("east_in", "north_out"), Some(TurnType::Right));
        }
    }

    #[test]
    fn straight_is_not_counted() {
        assert!(!TurnType::Straight.is_counted());
        assert!(TurnType::Left.is_counted());
        assert!(TurnType::Right.is_counted());
        assert!(TurnType::UTurn.is_counted());
    }

    #[test]
    fn serde_uses_hyphenated_u_turn() {
        assert_eq!(serde_json::to_string(&TurnType::UTurn).unwrap(), "\"U-turn\"");
        assert_eq!(serde_json::to_string(&TurnType::Left).unwrap(), "\"Left\"");
    }
}
