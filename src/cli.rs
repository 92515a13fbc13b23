use crate::config::Overrides;
use crate::label::LabelConventionKind;
use crate::score::ScoreMethodKind;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer sex from an indexed BAM file and compare it with the sample name
    Check {
        /// Input BAM file (must be indexed)
        bam_file: PathBuf,

        /// Index file for the BAM (only honoured by the htslib source)
        #[arg(long = "index")]
        index_file: Option<PathBuf>,

        /// How per-reference read counts are collected
        #[arg(long, value_enum, default_value = "samtools")]
        idxstats_source: IdxstatsSourceKind,

        /// Path to the samtools binary
        #[arg(long, default_value = "samtools")]
        samtools: PathBuf,

        #[command(flatten)]
        sample: SampleArgs,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Run the sex check on an existing samtools idxstats table
    Classify {
        /// idxstats output (name, length, mapped, unmapped per line)
        idxstats_file: PathBuf,

        #[command(flatten)]
        sample: SampleArgs,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdxstatsSourceKind {
    #[value(name = "samtools")]
    Samtools,
    #[value(name = "htslib")]
    Htslib,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SampleArgs {
    /// Sample identifier carrying the sex label (defaults to the input file name)
    #[arg(long)]
    pub sample_name: Option<String>,

    /// Output file prefix (defaults to the sample name)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Directory for the idxstats table and the MultiQC report
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SettingsArgs {
    /// Configuration file (defaults to config.toml in the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scores below this value are called male
    #[arg(long)]
    pub male_threshold: Option<f64>,

    /// Scores above this value are called female
    #[arg(long)]
    pub female_threshold: Option<f64>,

    /// How chrY reads are normalised against chr1
    #[arg(long, value_enum)]
    pub score_method: Option<ScoreMethodKind>,

    /// Multiplier for the scaled-ratio method
    #[arg(long)]
    pub scale: Option<f64>,

    /// How the reported sex is read from the sample name
    #[arg(long, value_enum)]
    pub label_convention: Option<LabelConventionKind>,
}

impl SettingsArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            male_threshold: self.male_threshold,
            female_threshold: self.female_threshold,
            score_method: self.score_method,
            scale: self.scale,
            label_convention: self.label_convention,
        }
    }
}
