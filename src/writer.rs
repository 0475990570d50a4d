use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{TrackscopeError, telemetry::FilteredTrack};

/// Writes the original records of the track as JSON Lines, in track order.
/// Returns the number of records written.
pub fn write_track(file: &Path, track: &FilteredTrack) -> Result<usize, TrackscopeError> {
    let track_file = File::create(file).map_err(|e| TrackscopeError::WriterError { source: e })?;
    let mut track_file_writer = BufWriter::new(track_file);
    for point in track {
        let line = serde_json::to_string(&point.record)
            .map_err(|e| TrackscopeError::WriterSerializeError { source: e })?;
        writeln!(track_file_writer, "{}", line)
            .map_err(|e| TrackscopeError::WriterError { source: e })?;
    }
    track_file_writer
        .flush()
        .map_err(|e| TrackscopeError::WriterError { source: e })?;
    info!("Wrote {} track points to {:?}", track.len(), file);
    Ok(track.len())
}
