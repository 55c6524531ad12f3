use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::ensembl::{
    extract_database, fetch_database, import_database, DatabaseFilter, IndexClient, Listing,
    MysqlClient,
};
use crate::utils::elapsed::format_dhms;
use crate::utils::external_tools::check_mysql_client;
use crate::utils::progress_bar_builder::ProgressBarBuilder;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub fn run(
    data_dir: Option<PathBuf>,
    base_url: Option<String>,
    skip_import: bool,
    list_only: bool,
) -> Result<()> {
    let start_time = Instant::now();
    let mut config = Config::load();
    if let Some(dir) = data_dir {
        config.ensembl.data_dir = dir;
    }
    if let Some(url) = base_url {
        config.ensembl.base_url = url;
    }

    if !skip_import && !list_only {
        check_mysql_client("mysql")?;
        check_mysql_client("mysqlimport")?;
    }

    let filter = DatabaseFilter::new(&config.ensembl.database_patterns)?;
    let client = IndexClient::new(&config.ensembl.base_url, config.download_timeout)?;

    info!("Retrieving file listings from {}", client.base_url());
    let listing = client
        .list_databases(&filter)
        .with_context(|| format!("Listing {}", client.base_url()))?;
    info!("{} databases selected", listing.len());

    if list_only {
        for (database, files) in &listing {
            println!("{database}");
            for file in files {
                println!("  {file}");
            }
        }
        return Ok(());
    }

    let data_dir = &config.ensembl.data_dir;
    fs::create_dir_all(data_dir).with_context(|| format!("Creating {}", data_dir.display()))?;

    info!("Retrieving files...");
    fetch_stage(&client, &listing, data_dir)?;

    info!("Extracting files...");
    for (database, files) in &listing {
        let extracted = extract_database(&data_dir.join(database), files)
            .with_context(|| format!("Extracting {database}"))?;
        info!("{}: {} files extracted", database, extracted);
    }

    if skip_import {
        info!("Skipping MySQL import");
    } else {
        info!("Importing to MySQL database...");
        let mysql = MysqlClient::new(&config.mysql);
        for (database, files) in &listing {
            import_database(&mysql, database, &data_dir.join(database), files)
                .with_context(|| format!("Importing {database}"))?;
        }
    }

    println!("Finished in: {}", format_dhms(start_time.elapsed()));
    Ok(())
}

fn fetch_stage(client: &IndexClient, listing: &Listing, data_dir: &std::path::Path) -> Result<()> {
    let total: usize = listing.values().map(Vec::len).sum();
    let progress = ProgressBarBuilder::new("Downloading")
        .with_template(BAR_TEMPLATE)
        .with_length(total as u64)
        .build()?;

    for (database, files) in listing {
        let downloaded = fetch_database(client, database, files, data_dir, &progress)
            .with_context(|| format!("Downloading {database}"))?;
        progress.println(format!("{database}: {downloaded} files downloaded"));
    }
    progress.finish_with_message("Downloads complete");
    Ok(())
}
