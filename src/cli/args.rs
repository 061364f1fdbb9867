// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Classify Options:
    --source, -s <SOURCE>    Landmark JSON file, directory, or glob [default: jsons]
    --images, -i <IMAGES>    Directory of source images, matched by file stem
    --save                   Save annotated images to runs/classify/predict
    --standing-ratio <F>     Torso/lower-leg ratio threshold [default: 1]
    --lying-ratio <F>        Head-knee/knee-hip ratio threshold [default: 0.6]
    --verbose                Show verbose output

Examples:
    rowing-classifier classify --source frame.json
    rowing-classifier classify --source jsons/
    rowing-classifier classify --source "jsons/*.json" --verbose false
    rowing-classifier classify -s jsons/ -i upload/ --save
    rowing-classifier classify -s jsons/ --standing-ratio 1.2"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify rowing stroke phases from landmark files
    Classify(ClassifyArgs),
}

/// Arguments for the classify command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Landmark JSON file, directory, or glob
    #[arg(short, long, default_value = "jsons")]
    pub source: String,

    /// Directory of source images, matched to landmark files by stem
    #[arg(short, long)]
    pub images: Option<String>,

    /// Save annotated images to runs/classify/predict
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Torso/lower-leg extent ratio above which the subject is not standing
    #[arg(long, default_value_t = 1.0)]
    pub standing_ratio: f32,

    /// Head-knee spread over knee-hip offset above which the subject is not lying
    #[arg(long, default_value_t = 0.6)]
    pub lying_ratio: f32,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}
