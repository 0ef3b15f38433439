// src/main.rs

mod aggregator;
mod color;
mod config;
mod ingest;
mod pipeline;
mod report;
mod track;
mod turns;
mod types;
mod zones;

use anyhow::Result;
use ingest::DetectionSource;
use pipeline::TrafficAnalyzer;
use report::AnalyticsReport;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let config = types::Config::load("config.yaml")?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("intersection_analytics={}", config.logging.level))
        .init();

    info!("🚦 Intersection Analytics Starting");
    info!("✓ Configuration loaded");

    let workers = config.processing.workers.max(1);
    let source = DetectionSource::new(config);
    let stream_files = source.find_stream_files()?;

    if stream_files.is_empty() {
        error!("No detection streams found in input directory");
        return Ok(());
    }

    info!(
        "Processing {} stream(s) across {} worker(s)",
        stream_files.len(),
        workers
    );

    let (tx, rx) = crossbeam_channel::bounded::<PathBuf>(stream_files.len());
    for path in stream_files {
        tx.send(path)?;
    }
    drop(tx);

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let rx = rx.clone();
            let source = &source;
            scope.spawn(move || {
                while let Ok(path) = rx.recv() {
                    match process_stream(&path, source) {
                        Ok(stats) => log_job_summary(&path, &stats),
                        Err(e) => error!("Failed to process {}: {:#}", path.display(), e),
                    }
                }
            });
        }
    });

    Ok(())
}

struct JobStats {
    total_frames: u64,
    total_detections: u64,
    detections_dropped: u64,
    tracks_seen: usize,
    report: AnalyticsReport,
    avg_fps: f64,
}

/// Run one detection stream through its own analyzer and persist the report.
/// Each job owns all of its state; failures here never touch sibling jobs.
fn process_stream(path: &Path, source: &DetectionSource) -> Result<JobStats> {
    let start_time = Instant::now();

    let mut reader = source.open_stream(path)?;
    let mut analyzer = TrafficAnalyzer::with_default_zones();

    while let Some(frame) = reader.read_frame()? {
        analyzer.process_frame(&frame)?;
    }

    for track in analyzer.tracks() {
        debug!("{}", track);
    }

    let total_frames = analyzer.frames_processed();
    let total_detections = analyzer.detections_seen();
    let detections_dropped = analyzer.detections_dropped();
    let tracks_seen = analyzer.tracks().count();

    let report = analyzer.finalize();
    source.write_report(path, &report)?;

    let duration = start_time.elapsed().as_secs_f64();
    let avg_fps = if duration > 0.0 {
        total_frames as f64 / duration
    } else {
        0.0
    };

    Ok(JobStats {
        total_frames,
        total_detections,
        detections_dropped,
        tracks_seen,
        report,
        avg_fps,
    })
}

fn log_job_summary(path: &Path, stats: &JobStats) {
    let entries: u64 = stats
        .report
        .entries_by_time
        .values()
        .map(|&n| n as u64)
        .sum();
    let turns = &stats.report.turn_counts;

    info!("\n📊 Final Report: {}", path.display());
    info!(
        "  Frames: {} | Detections: {} ({} dropped)",
        stats.total_frames, stats.total_detections, stats.detections_dropped
    );
    info!("  🔢 Unique vehicles tracked: {}", stats.tracks_seen);
    info!("  Entries counted: {}", entries);
    info!(
        "  Left: {} | Right: {} | U-turns: {}",
        turns.left, turns.right, turns.u_turn
    );
    info!(
        "  🎨 White: {} | Black: {} | Other color types: {}",
        stats.report.white_car_count,
        stats.report.black_car_count,
        stats.report.different_other_color_car_types
    );
    info!("  Total count (entries + turns): {}", stats.report.total_count);
    info!("  Processing Speed: {:.0} frames/s", stats.avg_fps);
}
