use clap::Parser;
use env_logger::Env;
use log::error;
use sex_check::cli::{self, Commands};
use sex_check::commands;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();

    let result = match args.command {
        Commands::Check {
            bam_file,
            index_file,
            idxstats_source,
            samtools,
            sample,
            settings,
        } => commands::check::run(
            &bam_file,
            index_file.as_deref(),
            idxstats_source,
            &samtools,
            &sample,
            &settings,
        ),
        Commands::Classify {
            idxstats_file,
            sample,
            settings,
        } => commands::classify::run(&idxstats_file, &sample, &settings),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
