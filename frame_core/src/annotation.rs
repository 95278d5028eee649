//! Phoneme interval annotations.
//!
//! One annotation file sits beside each recording as
//! `<recordingBaseName>_labels.txt`: one interval per line, three
//! tab-separated fields `start_seconds\tend_seconds\tphoneme_label`
//! (e.g. `0.100\t0.150\tah_S`). Intervals are kept in file order; the
//! rest of the pipeline trusts that order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// Suffix joining a recording base name to its annotation file.
pub const ANNOTATION_SUFFIX: &str = "_labels.txt";

/// A phoneme interval as given by the annotation source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhonemeInterval {
    /// Interval start in seconds.
    pub start: f64,
    /// Interval end in seconds, strictly after `start`.
    pub end: f64,
    /// Phoneme label, e.g. `ah_S`.
    pub phoneme: String,
}

/// Annotation path for a recording: `<stem>_labels.txt` next to the audio.
pub fn annotation_path(recording: &Path) -> PathBuf {
    let stem = recording
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    recording.with_file_name(format!("{stem}{ANNOTATION_SUFFIX}"))
}

/// Load and parse the annotation for a recording.
///
/// An absent file is the one condition reported as [`CorpusError::MissingAnnotation`];
/// unreadable or unparsable content is an error in its own right.
pub fn load_intervals(recording: &Path) -> Result<Vec<PhonemeInterval>, CorpusError> {
    let path = annotation_path(recording);
    if !path.exists() {
        return Err(CorpusError::MissingAnnotation(path));
    }
    let content = fs::read_to_string(&path).map_err(|source| CorpusError::IoFailure {
        path: path.clone(),
        source,
    })?;
    parse_intervals(&path, &content)
}

/// Parse annotation content. Every non-blank line must carry two ordered
/// timestamps and a label; a bad line fails the whole file rather than
/// being dropped.
pub fn parse_intervals(path: &Path, content: &str) -> Result<Vec<PhonemeInterval>, CorpusError> {
    let mut intervals = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        intervals.push(parse_line(path, idx + 1, line)?);
    }
    if intervals.is_empty() {
        return Err(CorpusError::MalformedAnnotation(format!(
            "{}: no phoneme intervals",
            path.display()
        )));
    }
    Ok(intervals)
}

fn parse_line(path: &Path, line_no: usize, line: &str) -> Result<PhonemeInterval, CorpusError> {
    let malformed = |detail: String| {
        CorpusError::MalformedAnnotation(format!("{} line {line_no}: {detail}", path.display()))
    };

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 3 {
        return Err(malformed(format!(
            "expected 3 tab-separated fields, got {}",
            fields.len()
        )));
    }
    let start: f64 = fields[0]
        .trim()
        .parse()
        .map_err(|_| malformed(format!("bad start timestamp `{}`", fields[0])))?;
    let end: f64 = fields[1]
        .trim()
        .parse()
        .map_err(|_| malformed(format!("bad end timestamp `{}`", fields[1])))?;
    if start < 0.0 || end <= start {
        return Err(malformed(format!("timestamps out of order ({start}..{end})")));
    }
    let phoneme = fields[2].trim();
    if phoneme.is_empty() {
        return Err(malformed("empty phoneme label".to_string()));
    }

    Ok(PhonemeInterval {
        start,
        end,
        phoneme: phoneme.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_separated_lines_in_order() {
        let path = Path::new("utt1_labels.txt");
        let intervals =
            parse_intervals(path, "0.100\t0.150\tah_S\n0.150\t0.300\tk_I\n").unwrap();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].phoneme, "ah_S");
        assert_eq!(intervals[1].start, 0.15);
        assert_eq!(intervals[1].end, 0.30);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let path = Path::new("utt1_labels.txt");
        let intervals = parse_intervals(path, "0.0\t0.1\tah_S\n\n0.1\t0.2\tk_I\n").unwrap();
        assert_eq!(intervals.len(), 2);
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let path = Path::new("utt1_labels.txt");
        let err = parse_intervals(path, "0.100\t0.150\n").unwrap_err();
        assert!(matches!(err, CorpusError::MalformedAnnotation(_)));
    }

    #[test]
    fn unparsable_timestamp_is_malformed() {
        let path = Path::new("utt1_labels.txt");
        let err = parse_intervals(path, "zero\t0.150\tah_S\n").unwrap_err();
        assert!(matches!(err, CorpusError::MalformedAnnotation(_)));
    }

    #[test]
    fn unordered_timestamps_are_malformed() {
        let path = Path::new("utt1_labels.txt");
        let err = parse_intervals(path, "0.200\t0.150\tah_S\n").unwrap_err();
        assert!(matches!(err, CorpusError::MalformedAnnotation(_)));
    }

    #[test]
    fn empty_content_is_malformed() {
        let path = Path::new("utt1_labels.txt");
        let err = parse_intervals(path, "").unwrap_err();
        assert!(matches!(err, CorpusError::MalformedAnnotation(_)));
    }

    #[test]
    fn annotation_path_sits_beside_the_recording() {
        let path = annotation_path(Path::new("/corpus/utt1.wav"));
        assert_eq!(path, Path::new("/corpus/utt1_labels.txt"));
    }
}
