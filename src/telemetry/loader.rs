use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use super::TelemetryPoint;
use crate::TrackscopeError;

const JSON_LINES_EXTENSIONS: [&str; 2] = ["jsonl", "ndjson"];

/// Loads the static point dataset.
///
/// `.jsonl`/`.ndjson` files hold one record per line; anything else is read as a single JSON
/// array of records.
pub fn load_points(source_file: &Path) -> Result<Vec<TelemetryPoint>, TrackscopeError> {
    if !source_file.exists() {
        return Err(TrackscopeError::InvalidDatasetFile {
            path: format!("{:?}", source_file),
        });
    }

    let points = if is_json_lines(source_file) {
        serde_jsonlines::json_lines(source_file)
            .map_err(|e| TrackscopeError::DatasetLoaderError { source: e })?
            .collect::<Result<Vec<TelemetryPoint>, std::io::Error>>()
            .map_err(|e| TrackscopeError::DatasetLoaderError { source: e })?
    } else {
        let file = File::open(source_file)
            .map_err(|e| TrackscopeError::DatasetLoaderError { source: e })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TrackscopeError::DatasetParseError { source: e })?
    };

    info!("Loaded {:?}, found {} raw points", source_file, points.len());
    Ok(points)
}

fn is_json_lines(source_file: &Path) -> bool {
    source_file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            JSON_LINES_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_json_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"latitude":55.1,"longitude":37.1,"valid":0,"satellitecount":5,"dir":10}},
                {{"latitude":55.2,"longitude":37.2,"valid":1,"satellitecount":5,"dir":20,"note":"lost fix"}}
            ]"#
        )
        .unwrap();
        file.flush().unwrap();

        let points = load_points(file.path()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].dir(), Some(10.0));
        assert_eq!(points[1].valid(), Some(1));
        assert_eq!(
            points[1].field("note").and_then(|v| v.as_str()),
            Some("lost fix")
        );
    }

    #[test]
    fn test_load_json_lines() {
        let mut file = Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(
            file,
            r#"{{"latitude":55.1,"longitude":37.1,"valid":0,"satellitecount":5}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"latitude":55.2,"longitude":37.2,"valid":0,"satellitecount":6}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let points = load_points(file.path()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].satellitecount(), Some(6));
    }

    #[test]
    fn test_array_and_lines_agree() {
        let records = [
            r#"{"latitude":55.1,"longitude":37.1,"valid":0,"satellitecount":5,"speed":4.5}"#,
            r#"{"latitude":"n/a","longitude":37.2,"valid":0,"satellitecount":5}"#,
        ];

        let mut array_file = NamedTempFile::new().unwrap();
        write!(array_file, "[{}]", records.join(",")).unwrap();
        array_file.flush().unwrap();

        let mut lines_file = Builder::new().suffix(".ndjson").tempfile().unwrap();
        for record in records {
            writeln!(lines_file, "{}", record).unwrap();
        }
        lines_file.flush().unwrap();

        assert_eq!(
            load_points(array_file.path()).unwrap(),
            load_points(lines_file.path()).unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = load_points(Path::new("/definitely/not/here.json"));
        match result {
            Err(TrackscopeError::InvalidDatasetFile { path }) => {
                assert!(path.contains("here.json"));
            }
            other => panic!("Expected InvalidDatasetFile error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        file.flush().unwrap();

        match load_points(file.path()) {
            Err(TrackscopeError::DatasetParseError { .. }) => {}
            other => panic!("Expected DatasetParseError, got {:?}", other),
        }
    }
}
