mod app;
mod board;
mod commands;
mod console;
mod error;
mod paths;
mod remote;
mod settings;

use std::fs::{self, File};
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use schedule_lib::ScheduleClient;
use schedule_select::SelectionManager;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::board::{ScheduleBoard, ScheduleEntry};
use crate::console::Console;
use crate::error::AppError;
use crate::remote::RemoteSchedule;
use crate::settings::{AdminConfig, AdminSettings, MemoryBackend, SqliteBackend};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn init_logging() {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

async fn open_settings() -> Result<AdminSettings, AppError> {
    match paths::settings_db() {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            Ok(AdminSettings::new(SqliteBackend::open(&path).await?))
        }
        None => {
            warn!("no data directory, settings will not be persisted");
            Ok(AdminSettings::new(MemoryBackend::new()))
        }
    }
}

async fn run() -> Result<(), AppError> {
    let settings = open_settings().await?;
    let config = AdminConfig::load(&settings).await?;
    info!("schedule admin starting against {}", config.server_url);

    let mut builder = ScheduleClient::builder()
        .url(&config.server_url)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT);
    if let Some(cookie) = &config.session_cookie {
        builder = builder.session_cookie(cookie);
    }
    if let Some(token) = &config.csrf_token {
        builder = builder.csrf_token(token);
    } else {
        warn!("no CSRF token configured, deletes will be rejected");
    }
    let client = builder.build()?;

    let board = Arc::new(ScheduleBoard::new(0));
    let console = Arc::new(Console::stdin(Arc::clone(&board)));
    let remote = Arc::new(RemoteSchedule::new(client, Arc::clone(&board), console.clone()));

    let manager = SelectionManager::<ScheduleEntry>::builder()
        .data_source(board.clone())
        .delete_api(remote.clone())
        .reload(remote.clone())
        .notifier(console.clone())
        .confirm_modal(console.clone())
        .renderer(console.clone())
        .labels(config.labels.clone())
        .build()?;

    if let Err(e) = remote.fetch().await {
        warn!("initial fetch failed: {}", e);
        println!("[error] Could not load the schedule: {}", e);
    }

    App::new(manager, board, remote, console, settings).run().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
