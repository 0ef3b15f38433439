// src/ingest.rs

use crate::report::AnalyticsReport;
use crate::types::{Config, FrameRecord};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Discovers and reads detection streams, and writes the per-stream report.
/// A stream is a JSONL file with one `FrameRecord` per line, produced by the
/// external detector/tracker.
pub struct DetectionSource {
    config: Config,
}

impl DetectionSource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn find_stream_files(&self) -> Result<Vec<PathBuf>> {
        let mut streams = Vec::new();

        let stream_extensions = ["jsonl", "ndjson", "JSONL", "NDJSON"];

        for entry in WalkDir::new(&self.config.io.input_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if let Some(ext) = path.extension() {
                if stream_extensions.contains(&ext.to_str().unwrap_or("")) {
                    streams.push(path.to_path_buf());
                }
            }
        }

        streams.sort();
        info!("Found {} detection stream(s)", streams.len());
        Ok(streams)
    }

    pub fn open_stream(&self, path: &Path) -> Result<StreamReader> {
        info!("Opening stream: {}", path.display());
        let file =
            File::open(path).with_context(|| format!("opening stream {}", path.display()))?;
        Ok(StreamReader {
            lines: BufReader::new(file).lines(),
            path: path.to_path_buf(),
            line_no: 0,
        })
    }

    pub fn report_path(&self, input_path: &Path) -> PathBuf {
        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("stream");
        PathBuf::from(&self.config.io.output_dir).join(format!("{}_analytics.json", stem))
    }

    /// Write the report next to its siblings in the output directory,
    /// pretty-printed for the consuming web layer.
    pub fn write_report(&self, input_path: &Path, report: &AnalyticsReport) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.config.io.output_dir)?;
        let out_path = self.report_path(input_path);
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&out_path, json)
            .with_context(|| format!("writing report {}", out_path.display()))?;
        info!("💾 Report written to: {}", out_path.display());
        Ok(out_path)
    }
}

pub struct StreamReader {
    lines: Lines<BufReader<File>>,
    pub path: PathBuf,
    line_no: usize,
}

impl StreamReader {
    /// Next frame in the stream, `None` at end of input. Blank lines are
    /// skipped; a malformed line fails the job with its line number.
    pub fn read_frame(&mut self) -> Result<Option<FrameRecord>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: FrameRecord = serde_json::from_str(&line).with_context(|| {
                format!("{}: bad frame record on line {}", self.path.display(), self.line_no)
            })?;
            return Ok(Some(frame));
        }
        Ok(None)
    }
}
