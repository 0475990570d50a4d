// Error types for trackscope

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum TrackscopeError {
    // Errors for the viewport fitter
    #[snafu(display("Cannot fit the viewport to an empty track"))]
    EmptyTrack,

    // Errors while loading the point dataset
    #[snafu(display("Invalid dataset file: {path}"))]
    InvalidDatasetFile { path: String },
    #[snafu(display("Error reading dataset file"))]
    DatasetLoaderError { source: io::Error },
    #[snafu(display("Error parsing dataset file"))]
    DatasetParseError { source: serde_json::Error },

    // Errors for the track writer
    #[snafu(display("Error writing track file"))]
    WriterError { source: io::Error },
    #[snafu(display("Error serializing track point"))]
    WriterSerializeError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application config directory"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
    #[snafu(display("Invalid hover thresholds: {reason}"))]
    InvalidThresholds { reason: String },

    // UI errors
    #[snafu(display("Track viewer failed: {description}"))]
    ViewerError { description: String },
}
