use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use elocute::{
    AggregatorConfig, ClassifierConfig, PhoneIndex, PronunciationDictionary, aggregate, assemble,
    classify, group_alignment, load_feature_dir, parse_alignment_file, parse_transcription_file,
    write_report_json, write_summary_text,
};

#[derive(Parser)]
#[command(name = "elocute")]
#[command(author, version, about = "Pronunciation and prosody analysis for aligned speech", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an utterance from transcription, alignment, and feature inputs
    Analyze {
        /// Transcription JSON with word timestamps
        #[arg(short, long)]
        transcription: PathBuf,

        /// Forced-alignment records JSON (word and phone tiers)
        #[arg(short, long)]
        alignment: PathBuf,

        /// Pronunciation dictionary in CMUdict format
        #[arg(short, long)]
        dictionary: PathBuf,

        /// Directory of per-word openSMILE ARFF feature files
        #[arg(short, long)]
        features: Option<PathBuf>,

        /// Output file for the analysis payload (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the plain-text summary report
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Edit distance above which a word is flagged
        #[arg(long, default_value = "3")]
        flag_threshold: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            transcription,
            alignment,
            dictionary,
            features,
            output,
            report,
            flag_threshold,
            verbose,
        } => {
            setup_logging(verbose);
            analyze(
                transcription,
                alignment,
                dictionary,
                features,
                output,
                report,
                flag_threshold,
            )
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn analyze(
    transcription: PathBuf,
    alignment: PathBuf,
    dictionary: PathBuf,
    features: Option<PathBuf>,
    output: PathBuf,
    report_path: Option<PathBuf>,
    flag_threshold: usize,
) -> Result<()> {
    info!("Loading transcription from {:?}", transcription);
    let transcript_words =
        parse_transcription_file(&transcription).context("Failed to parse transcription")?;
    info!("Loaded {} transcribed words", transcript_words.len());

    info!("Loading alignment from {:?}", alignment);
    let records = parse_alignment_file(&alignment).context("Failed to parse alignment")?;
    let grouped = group_alignment(&records).context("Failed to group alignment records")?;
    info!(
        "Grouped {} records into {} recording(s)",
        records.len(),
        grouped.words.len()
    );

    let dict = PronunciationDictionary::from_file(&dictionary)
        .context("Failed to load pronunciation dictionary")?;
    info!("Dictionary covers {} words", dict.len());

    // Classify each expected word against its aligned phones
    let config = ClassifierConfig { flag_threshold };
    let phone_index = PhoneIndex::new(grouped.phones.clone());
    let verdicts = classify(&grouped.words, &phone_index, &dict, &config);
    let flagged = verdicts.iter().filter(|v| v.is_flagged).count();
    info!(
        "Checked {} words. Found {} possible mispronunciations.",
        verdicts.len(),
        flagged
    );

    // Pair feature vectors with word units positionally, in temporal order
    let merged_words = grouped.merged_words();
    let unit_ids = merged_words.unit_ids();
    let segments = match &features {
        Some(dir) => {
            let loaded = load_feature_dir(dir).context("Failed to load feature files")?;
            if loaded.len() != unit_ids.len() {
                warn!(
                    "Feature file count ({}) does not match word count ({}), pairing by position",
                    loaded.len(),
                    unit_ids.len()
                );
            }
            unit_ids
                .iter()
                .cloned()
                .zip(loaded.into_iter().map(|(_, vector)| vector))
                .collect()
        }
        None => Vec::new(),
    };

    // Speaking rate comes from the transcription's global word timing
    let temporal = aggregate(&segments, &transcript_words, &AggregatorConfig::default());
    info!(
        "Built {} feature trajectories, speaking rate {:.2} words/sec",
        temporal.feature_trajectories.len(),
        temporal.speaking_rate
    );

    let analysis = assemble(verdicts, temporal, &unit_ids, flag_threshold)
        .context("Failed to assemble analysis report")?;

    write_report_json(&output, &analysis)?;
    info!("Analysis payload written to {:?}", output);

    if let Some(path) = report_path {
        write_summary_text(&path, &analysis.summary)?;
        info!("Summary report written to {:?}", path);
    }

    Ok(())
}
