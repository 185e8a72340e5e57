pub mod dict;
pub mod engine;
pub mod error;
pub mod io;
pub mod models;

pub use dict::PronunciationDictionary;
pub use engine::{
    AggregatorConfig, Alignment, ClassifierConfig, PhoneIndex, RawSegment, aggregate, align,
    assemble, classify, normalize_segments, render_report, speaking_rate,
};
pub use error::AnalysisError;
pub use io::{
    AlignmentRecord, AlignmentTier, GroupedAlignment, TranscriptWord, group_alignment,
    load_feature_dir, parse_alignment_file, parse_alignment_json, parse_arff_features,
    parse_transcription_file, parse_transcription_json, write_report_json, write_summary_text,
};
pub use models::{
    AnalysisReport, EditOp, EditScript, FeatureTrajectory, FeatureValue, FeatureVector,
    MispronunciationVerdict, TemporalAnalysis, Trend, Unit, UnitSequence, UnitSource, replay,
};
