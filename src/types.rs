use serde::{Deserialize, Serialize};

use crate::color::ColorSample;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub io: IoConfig,
    pub processing: ProcessingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    pub input_dir: String,
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// One frame's worth of detections from the external detector/tracker.
/// Frames must arrive in non-decreasing `frame_time` order.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameRecord {
    /// Video timestamp in seconds.
    pub frame_time: f64,
    pub detections: Vec<DetectionRecord>,
}

/// A single tracked detection. `track_id` is stable across frames for the
/// same physical object; detections the tracker could not associate carry no
/// id and are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionRecord {
    pub track_id: Option<i64>,
    /// Pixel coordinates, (x1, y1, x2, y2).
    pub bbox: [f64; 4],
    /// BGR channel means over the detection's region, if the upstream
    /// sampled one. Absent for zero-area regions.
    #[serde(default)]
    pub avg_color: Option<[f64; 3]>,
}

impl DetectionRecord {
    /// Integer midpoint of the bounding box. All zone tests use this point.
    pub fn center(&self) -> (i64, i64) {
        let [x1, y1, x2, y2] = self.bbox;
        ((x1 as i64 + x2 as i64) / 2, (y1 as i64 + y2 as i64) / 2)
    }

    pub fn color_sample(&self) -> Option<ColorSample> {
        self.avg_color.map(|[b, g, r]| ColorSample::new(b, g, r))
    }
}
