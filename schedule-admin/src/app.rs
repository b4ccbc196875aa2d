//! Command loop wiring the console to the selection manager.

use std::sync::Arc;

use log::{debug, info, warn};
use schedule_select::bulk::{DeleteOutcome, SkipReason};
use schedule_select::collab::Reload;
use schedule_select::SelectionManager;

use crate::board::{ScheduleBoard, ScheduleEntry};
use crate::commands::{Command, CommandError, ConfigAction, HELP};
use crate::console::Console;
use crate::remote::RemoteSchedule;
use crate::settings::{AdminSettings, Setting, SettingsError, env_override};

/// Whether the loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    manager: SelectionManager<ScheduleEntry>,
    board: Arc<ScheduleBoard>,
    remote: Arc<RemoteSchedule>,
    console: Arc<Console>,
    settings: AdminSettings,
}

impl App {
    pub fn new(
        manager: SelectionManager<ScheduleEntry>,
        board: Arc<ScheduleBoard>,
        remote: Arc<RemoteSchedule>,
        console: Arc<Console>,
        settings: AdminSettings,
    ) -> Self {
        Self {
            manager,
            board,
            remote,
            console,
            settings,
        }
    }

    /// Read and run commands until `quit` or end of input.
    pub async fn run(&self) {
        self.manager.refresh();
        println!("{} entries this week. Type `help` for commands.", self.board.total());

        loop {
            self.console.prompt("> ");
            let Some(line) = self.console.read_line().await else {
                break;
            };

            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    if self.dispatch(command).await == Flow::Quit {
                        break;
                    }
                }
                Err(e @ CommandError::Unknown(_)) => {
                    println!("{}", e);
                    println!("{}", HELP);
                }
                Err(e) => println!("{}", e),
            }
        }
        info!("command loop finished");
    }

    /// Run one command.
    pub async fn dispatch(&self, command: Command) -> Flow {
        debug!("command: {:?}", command);

        match command {
            Command::Day(day) => {
                if self.board.set_day(day) && self.manager.is_selection_mode() {
                    self.manager.on_group_change();
                } else {
                    self.manager.refresh();
                }
            }
            Command::Select => {
                self.manager.toggle_mode();
            }
            Command::Click { index, kind } => {
                if !self.manager.click(kind, index) {
                    if self.manager.is_selection_mode() {
                        println!("No entry at index {}", index);
                    } else {
                        println!("Not in selection mode; use `select` first");
                    }
                }
            }
            Command::Key { combo, focus } => {
                if !self.manager.handle_key(&combo, focus).await.is_handled() {
                    println!("{} ignored", combo);
                }
            }
            Command::All => {
                if self.manager.is_selection_mode() {
                    self.manager.toggle_select_all();
                } else {
                    println!("Not in selection mode; use `select` first");
                }
            }
            Command::Delete => self.delete().await,
            Command::Reload => {
                self.remote.reload().await;
                self.manager.refresh();
            }
            Command::List => {
                self.manager.refresh();
            }
            Command::Config(action) => {
                if let Err(e) = self.configure(action).await {
                    warn!("settings update failed: {}", e);
                    println!("Settings error: {}", e);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn delete(&self) {
        match self.manager.request_delete().await {
            DeleteOutcome::Skipped(SkipReason::EmptySelection) => println!("Nothing selected"),
            DeleteOutcome::Skipped(SkipReason::NothingResolved) => {
                println!("None of the selected entries are on this day any more")
            }
            DeleteOutcome::Skipped(SkipReason::InFlight) => println!("A delete is already running"),
            DeleteOutcome::Cancelled => println!("Cancelled"),
            // Toasts already reported these.
            DeleteOutcome::Deleted(_) | DeleteOutcome::Failed(_) => {}
        }
    }

    async fn configure(&self, action: ConfigAction) -> Result<(), SettingsError> {
        match action {
            ConfigAction::Show => {
                for setting in Setting::EDITABLE {
                    println!("{}", self.describe(setting).await?);
                }
            }
            ConfigAction::Set(setting, value) => {
                self.settings.set(setting, &value).await?;
                info!("stored {}", setting.key());
                println!("Saved {}; restart to apply", setting.key());
                if let Some(var) = env_override(setting) {
                    println!("Note: ${} is set and takes precedence", var);
                }
            }
            ConfigAction::Unset(setting) => {
                if self.settings.unset(setting).await? {
                    info!("removed {}", setting.key());
                    println!("Removed {}; restart to apply", setting.key());
                } else {
                    println!("{} was not set", setting.key());
                }
            }
        }
        Ok(())
    }

    /// One `config` line: stored value (masked for credentials), when it
    /// changed, and any environment override.
    async fn describe(&self, setting: Setting) -> Result<String, SettingsError> {
        let value: Option<String> = self.settings.get(setting).await?;
        let mut line = match value {
            None => format!("{} = (not set)", setting.key()),
            Some(_) if setting.is_secret() => format!("{} = (hidden)", setting.key()),
            Some(value) => format!("{} = {}", setting.key(), value),
        };
        if let Some(changed) = self.settings.changed_at(setting).await? {
            line.push_str(&format!("  (changed {})", changed.format("%Y-%m-%d %H:%M UTC")));
        }
        if let Some(var) = env_override(setting) {
            line.push_str(&format!("  [overridden by ${}]", var));
        }
        Ok(line)
    }
}
