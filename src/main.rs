use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

mod error;
mod filesystem;
mod image_processing;
mod models;
mod services;

use error::AppError;
use models::PrinterSettings;

/// Downloads the preview thumbnail of a G-code file from a Klipper printer
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// G-code file name as known to Moonraker
    file_name: String,

    /// Printer settings file (TOML)
    #[arg(short, long, env = "KLIPPER_PREVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Moonraker host, overrides the settings file
    #[arg(long, env = "KLIPPER_HOST")]
    host: Option<String>,

    /// Moonraker port, overrides the settings file
    #[arg(long, env = "KLIPPER_PORT")]
    port: Option<u16>,

    /// Where to write the PNG (default: data/thumbnails/<name>.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Give up on the whole fetch after this many seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Also print the thumbnail as a data URL
    #[arg(long)]
    data_url: bool,

    /// Write the effective host/port back to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            return ExitCode::from(2);
        }
    };

    let outcome = runtime.block_on(run(cli));
    // A fetch abandoned at the deadline must not keep the process alive
    runtime.shutdown_background();

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` when the printer has no usable thumbnail
async fn run(cli: Cli) -> Result<bool, AppError> {
    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(filesystem::default_settings_path);
    let mut settings = PrinterSettings::load(&settings_path)?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if cli.save_settings {
        settings.save(&settings_path)?;
        log::info!("Saved printer settings to {}", settings_path.display());
    }

    log::info!(
        "Fetching thumbnail for '{}' from {}:{}",
        cli.file_name,
        settings.host,
        settings.port
    );

    let output = cli
        .output
        .unwrap_or_else(|| filesystem::default_output_path(&cli.file_name));

    let Some(thumbnail) = services::fetch_preview(
        settings.to_moonraker_config(),
        cli.file_name.clone(),
        Duration::from_secs(cli.timeout_secs),
    )
    .await
    else {
        println!("No thumbnail available for {}", cli.file_name);
        return Ok(false);
    };

    match image_processing::decode_thumbnail(&thumbnail) {
        Ok(pixels) => log::debug!("Decoded {}x{} thumbnail", pixels.width(), pixels.height()),
        Err(e) => log::warn!("Thumbnail for '{}' does not decode: {}", cli.file_name, e),
    }

    filesystem::save_thumbnail(&output, &thumbnail)?;
    println!(
        "{}x{} thumbnail ({} bytes) saved to {}",
        thumbnail.width_height(),
        thumbnail.width_height(),
        thumbnail.size(),
        output.display()
    );

    if cli.data_url {
        println!("{}", image_processing::thumbnail_to_data_url(&thumbnail));
    }

    Ok(true)
}
