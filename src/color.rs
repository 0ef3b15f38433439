// src/color.rs
//
// Crude threshold-cascade color labelling over a detection's average color.
// The contract is determinism under a fixed rule order, not accuracy: the
// rules are evaluated top to bottom and the first match wins.

use serde::{Deserialize, Serialize};

/// BGR channel means over a detection's pixel region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    pub b: f64,
    pub g: f64,
    pub r: f64,
}

impl ColorSample {
    pub fn new(b: f64, g: f64, r: f64) -> Self {
        Self { b, g, r }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleColor {
    Red,
    Green,
    Blue,
    Black,
    Yellow,
    Orange,
    Brown,
    White,
    Silver,
    Cyan,
    Purple,
    Other,
    Unknown,
}

impl VehicleColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Black => "Black",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Brown => "Brown",
            Self::White => "White",
            Self::Silver => "Silver",
            Self::Cyan => "Cyan",
            Self::Purple => "Purple",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }
}

/// Label an average-color sample. `None` marks an empty / zero-area region
/// and classifies as `Unknown`.
pub fn classify(sample: Option<ColorSample>) -> VehicleColor {
    let Some(ColorSample { b, g, r }) = sample else {
        return VehicleColor::Unknown;
    };

    if r > 150.0 && g < 100.0 && b < 100.0 {
        VehicleColor::Red
    } else if g > 150.0 && r < 100.0 && b < 100.0 {
        VehicleColor::Green
    } else if b > 150.0 && r < 100.0 && g < 100.0 {
        VehicleColor::Blue
    } else if r < 80.0 && g < 80.0 && b < 80.0 {
        VehicleColor::Black
    } else if r > 180.0 && g > 180.0 && b < 100.0 {
        VehicleColor::Yellow
    } else if r > 180.0 && g > 100.0 && b < 80.0 {
        VehicleColor::Orange
    } else if r > 100.0 && g < 80.0 && b < 50.0 {
        VehicleColor::Brown
    } else if (r - g).abs() < 15.0 && (g - b).abs() < 15.0 && r > 100.0 && r < 200.0 {
        VehicleColor::White
    } else if (r - g).abs() < 20.0 && (g - b).abs() < 20.0 && r > 200.0 {
        VehicleColor::Silver
    } else if g > 180.0 && b > 180.0 && r < 100.0 {
        VehicleColor::Cyan
    } else if r > 130.0 && b > 130.0 && g < 100.0 {
        VehicleColor::Purple
    } else {
        VehicleColor::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bgr(b: f64, g: f64, r: f64) -> Option<ColorSample> {
        Some(ColorSample::new(b, g, r))
    }

    #[test]
    fn empty_sample_is_unknown() {
        assert_eq!(classify(None), VehicleColor::Unknown);
    }

    #[test]
    fn primary_channels() {
        assert_eq!(classify(bgr(40.0, 50.0, 200.0)), VehicleColor::Red);
        assert_eq!(classify(bgr(40.0, 200.0, 50.0)), VehicleColor::Green);
        assert_eq!(classify(bgr(200.0, 50.0, 40.0)), VehicleColor::Blue);
    }

    #[test]
    fn dark_pixels_are_black() {
        assert_eq!(classify(bgr(30.0, 30.0, 30.0)), VehicleColor::Black);
        assert_eq!(classify(bgr(79.0, 79.0, 79.0)), VehicleColor::Black);
    }

    #[test]
    fn warm_hues() {
        assert_eq!(classify(bgr(50.0, 200.0, 210.0)), VehicleColor::Yellow);
        assert_eq!(classify(bgr(40.0, 120.0, 210.0)), VehicleColor::Orange);
        assert_eq!(classify(bgr(30.0, 60.0, 120.0)), VehicleColor::Brown);
    }

    #[test]
    fn neutral_grays_split_by_brightness() {
        // Mid gray reads as white paint under daylight exposure.
        assert_eq!(classify(bgr(150.0, 150.0, 150.0)), VehicleColor::White);
        // Very bright gray reads as silver.
        assert_eq!(classify(bgr(210.0, 215.0, 220.0)), VehicleColor::Silver);
    }

    #[test]
    fn cool_hues() {
        assert_eq!(classify(bgr(200.0, 200.0, 50.0)), VehicleColor::Cyan);
        assert_eq!(classify(bgr(160.0, 50.0, 160.0)), VehicleColor::Purple);
    }

    #[test]
    fn unmatched_samples_fall_through_to_other() {
        assert_eq!(classify(bgr(120.0, 140.0, 90.0)), VehicleColor::Other);
    }

    #[test]
    fn classification_is_deterministic() {
        let sample = bgr(91.0, 93.0, 95.0);
        let first = classify(sample);
        for _ in 0..5 {
            assert_eq!(classify(sample), first);
        }
    }

    #[test]
    fn rule_order_breaks_ties() {
        // Satisfies both the black rule and the white rule's gray check is
        // out of range; black must win because it is evaluated first.
        assert_eq!(classify(bgr(70.0, 70.0, 70.0)), VehicleColor::Black);
    }
}
