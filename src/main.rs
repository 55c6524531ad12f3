use clap::Parser;
use intron_repeat_tools::{cli, commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = cli::Args::parse();

    let result = match args.command {
        cli::Commands::RepeatStats {
            files,
            output_dir,
            length_field,
            summary_json,
        } => commands::repeat_stats::run(files, output_dir, length_field, summary_json),
        cli::Commands::FetchEnsembl {
            data_dir,
            base_url,
            skip_import,
            list_only,
        } => commands::fetch_ensembl::run(data_dir, base_url, skip_import, list_only),
        cli::Commands::InitConfig { force } => commands::init_config::run(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
