use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::dict::PronunciationDictionary;
use crate::engine::aligner::align;
use crate::models::{MispronunciationVerdict, Unit, UnitSequence};

/// Policy thresholds for flagging a word as mispronounced
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Edit distance above which a word is flagged
    pub flag_threshold: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { flag_threshold: 3 }
    }
}

/// Observed phone units grouped per recording and sorted by start time.
///
/// Replaces per-word rescans of the full phone list: each word takes one
/// `partition_point` slice into its recording's phones.
#[derive(Debug, Clone, Default)]
pub struct PhoneIndex {
    by_recording: BTreeMap<String, Vec<Unit>>,
}

impl PhoneIndex {
    /// Build from per-recording phone sequences
    pub fn new(phones_by_recording: impl IntoIterator<Item = (String, UnitSequence)>) -> Self {
        let by_recording = phones_by_recording
            .into_iter()
            .map(|(recording, seq)| {
                let mut phones = seq.units;
                phones.sort_by(|a, b| a.start.total_cmp(&b.start));
                (recording, phones)
            })
            .collect();
        Self { by_recording }
    }

    /// Phone labels strictly contained in `[start, end]` for a recording.
    ///
    /// Containment is `phone.start >= start && phone.end <= end`, not
    /// overlap; a phone straddling the word boundary belongs to neither word.
    pub fn contained_labels(&self, recording: &str, start: f64, end: f64) -> Vec<String> {
        let Some(phones) = self.by_recording.get(recording) else {
            return Vec::new();
        };

        let first = phones.partition_point(|p| p.start < start);
        phones[first..]
            .iter()
            .take_while(|p| p.start <= end)
            .filter(|p| p.end <= end)
            .map(|p| p.label.clone())
            .collect()
    }
}

/// Compare each expected word against its aligned phones and decide verdicts.
///
/// Words are processed in recording order, then temporal order; the global
/// word index across recordings forms the unit id. Words without a dictionary
/// entry are skipped entirely (coverage gap, not an error). A word is flagged
/// when the edit distance exceeds the threshold or no phones were aligned
/// inside its span at all.
pub fn classify(
    words_by_recording: &[(String, UnitSequence)],
    phones: &PhoneIndex,
    dictionary: &PronunciationDictionary,
    config: &ClassifierConfig,
) -> Vec<MispronunciationVerdict> {
    let mut verdicts = Vec::new();
    let mut word_index = 0usize;

    for (recording, words) in words_by_recording {
        for word in &words.units {
            let unit_id = format!("word_{}_{}", word_index, word.label);
            word_index += 1;

            let Some(expected) = dictionary.first_variant(&word.label) else {
                info!(word = %word.label, "no pronunciation dictionary entry, skipping");
                continue;
            };
            let expected: Vec<String> = expected.to_vec();

            let observed = phones.contained_labels(recording, word.start, word.end);
            let alignment = align(&expected, &observed);
            let is_flagged = alignment.distance > config.flag_threshold || observed.is_empty();

            debug!(
                word = %word.label,
                distance = alignment.distance,
                flagged = is_flagged,
                "word classified"
            );

            verdicts.push(MispronunciationVerdict {
                unit_id,
                word: word.label.clone(),
                start: word.start,
                end: word.end,
                expected_units: expected,
                observed_units: observed,
                edit_distance: alignment.distance,
                is_flagged,
                edit_script: alignment.script,
            });
        }
    }

    verdicts
}

/// Plain-text report covering flagged words only.
///
/// Zero flagged words is a valid terminal state and renders an explicit
/// all-clear line rather than an empty string.
pub fn render_report(verdicts: &[MispronunciationVerdict], flag_threshold: usize) -> String {
    let flagged: Vec<&MispronunciationVerdict> =
        verdicts.iter().filter(|v| v.is_flagged).collect();

    if flagged.is_empty() {
        return "No mispronunciations detected.\n".to_string();
    }

    let mut report = format!(
        "MISPRONUNCIATIONS DETECTED (edit distance > {} or no aligned phones):\n\n",
        flag_threshold
    );
    for verdict in flagged {
        report.push_str(&format!(
            "Word: '{}'\n  Expected: {:?}\n  Aligned:  {:?}\n  Edit distance: {}\n  Start: {:.2}  End: {:.2}\n\n",
            verdict.word,
            verdict.expected_units,
            verdict.observed_units,
            verdict.edit_distance,
            verdict.start,
            verdict.end,
        ));
    }
    report
}
