use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::normalize::{RawSegment, normalize_segments};
use crate::models::{FeatureVector, UnitSequence, UnitSource};

/// ARFF fields that are categorical rather than numeric
pub const CATEGORICAL_FIELDS: [&str; 2] = ["name", "class"];

/// A word with timestamps from the transcription collaborator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptWord {
    pub word: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
}

/// Tier of a forced-alignment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentTier {
    Word,
    Phone,
}

/// One interval from the forced-alignment collaborator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlignmentRecord {
    pub unit: String,
    pub start: f64,
    pub end: f64,
    pub tier: AlignmentTier,
    pub wav_path: String,
}

/// Alignment records grouped per recording and split by tier
#[derive(Debug, Clone, Default)]
pub struct GroupedAlignment {
    /// Word sequences per recording, in recording order
    pub words: Vec<(String, UnitSequence)>,
    /// Phone sequences per recording, in recording order
    pub phones: Vec<(String, UnitSequence)>,
}

impl GroupedAlignment {
    /// All word sequences concatenated in recording order. This is the
    /// canonical unit sequence the assembler checks ids against.
    pub fn merged_words(&self) -> UnitSequence {
        let mut merged = UnitSequence::default();
        for (_, seq) in &self.words {
            merged.extend(seq.clone());
        }
        merged
    }
}

/// Parse a transcription JSON file (array of `{word, start, end}`)
pub fn parse_transcription_file(path: &Path) -> Result<UnitSequence> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcription_json(&content)
}

/// Parse transcription JSON into a normalized word sequence
pub fn parse_transcription_json(json: &str) -> Result<UnitSequence> {
    let words: Vec<TranscriptWord> =
        serde_json::from_str(json).context("Failed to parse transcription JSON")?;
    let segments: Vec<RawSegment> = words
        .iter()
        .map(|w| RawSegment::new(w.word.clone(), w.start, w.end))
        .collect();
    Ok(normalize_segments(&segments, UnitSource::Observed)?)
}

/// Parse a forced-alignment JSON file (array of alignment records)
pub fn parse_alignment_file(path: &Path) -> Result<Vec<AlignmentRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_alignment_json(&content)
}

/// Parse forced-alignment JSON into records
pub fn parse_alignment_json(json: &str) -> Result<Vec<AlignmentRecord>> {
    serde_json::from_str(json).context("Failed to parse alignment JSON")
}

/// Group alignment records by `wav_path` and normalize each tier.
///
/// Recording order is the sorted order of `wav_path`, matching the original
/// pipeline's sorted file staging, so the analysis is deterministic
/// regardless of record order in the input.
pub fn group_alignment(records: &[AlignmentRecord]) -> Result<GroupedAlignment> {
    let mut word_segments: BTreeMap<String, Vec<RawSegment>> = BTreeMap::new();
    let mut phone_segments: BTreeMap<String, Vec<RawSegment>> = BTreeMap::new();

    for record in records {
        let target = match record.tier {
            AlignmentTier::Word => &mut word_segments,
            AlignmentTier::Phone => &mut phone_segments,
        };
        target
            .entry(record.wav_path.clone())
            .or_default()
            .push(RawSegment::new(record.unit.clone(), record.start, record.end));
    }

    let mut grouped = GroupedAlignment::default();
    for (recording, segments) in word_segments {
        let seq = normalize_segments(&segments, UnitSource::Expected)?;
        grouped.words.push((recording, seq));
    }
    for (recording, segments) in phone_segments {
        let seq = normalize_segments(&segments, UnitSource::Observed)?;
        grouped.phones.push((recording, seq));
    }

    Ok(grouped)
}

/// Parse an openSMILE ARFF-style feature file.
///
/// `@attribute` declarations supply the schema; the first non-comment line
/// after `@data` supplies the values. The categorical `name`/`class` fields
/// are excluded and unparseable numerics become the missing sentinel.
pub fn parse_arff_features(text: &str) -> FeatureVector {
    let mut attributes: Vec<&str> = Vec::new();
    let mut lines = text.lines();

    for line in lines.by_ref() {
        let trimmed = line.trim();
        if trimmed.starts_with("@attribute") {
            if let Some(name) = trimmed.split_whitespace().nth(1) {
                attributes.push(name);
            }
        } else if trimmed == "@data" {
            break;
        }
    }

    let value_line = lines
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('%'));

    let Some(value_line) = value_line else {
        return FeatureVector::default();
    };

    let values = value_line.split(',').map(str::trim);
    FeatureVector::from_raw_fields(
        attributes.iter().copied().zip(values),
        &CATEGORICAL_FIELDS,
    )
}

/// Read one ARFF feature file
pub fn read_feature_file(path: &Path) -> Result<FeatureVector> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feature file: {:?}", path))?;
    Ok(parse_arff_features(&content))
}

/// Load all `.csv` feature files from a directory, sorted by filename.
///
/// Filenames carry the temporal order (the original pipeline wrote one file
/// per word segment and read them back with a sorted glob). Returns
/// (file stem, feature vector) pairs.
pub fn load_feature_dir(dir: &Path) -> Result<Vec<(String, FeatureVector)>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read feature directory: {:?}", dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut segments = Vec::with_capacity(paths.len());
    for path in paths {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        segments.push((stem, read_feature_file(&path)?));
    }
    Ok(segments)
}
