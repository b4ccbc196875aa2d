//! Console command parsing.

use schedule_lib::model::DAYS_IN_WEEK;
use schedule_select::controller::{ClickKind, Focus};
use schedule_select::error::KeyParseError;
use schedule_select::keybinds::KeyCombo;
use thiserror::Error;

use crate::settings::Setting;

pub const HELP: &str = "\
Commands:
  day <0-6>                 show another day (0 = Monday)
  select                    enter or leave selection mode
  click <index> [shift|ctrl]
                            click an entry; shift extends, ctrl toggles
  key <combo> [text]        press a key, e.g. `key ctrl+a`, `key escape`, `key delete`;
                            `text` presses it with a text field focused
  all                       select all / deselect all
  delete                    delete the selected entries
  reload                    refetch the schedule
  list                      show the current day
  config                    show stored settings
  config set <url|cookie|csrf> <value>
                            store a setting, used from the next start
  config unset <url|cookie|csrf>
                            remove a stored setting
  help                      show this help
  quit                      exit";

const CONFIG_USAGE: &str = "config [set <url|cookie|csrf> <value> | unset <url|cookie|csrf>]";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Day(u8),
    Select,
    Click { index: usize, kind: ClickKind },
    Key { combo: KeyCombo, focus: Focus },
    All,
    Delete,
    Reload,
    List,
    Config(ConfigAction),
    Help,
    Quit,
}

/// What a `config` command does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Set(Setting, String),
    Unset(Setting),
}

impl Command {
    /// Parse one input line. Blank lines are `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_lowercase().as_str(), args.as_slice()) {
            ("day", [day]) => {
                let day: u8 = day.parse().map_err(|_| CommandError::InvalidDay)?;
                if day >= DAYS_IN_WEEK {
                    return Err(CommandError::InvalidDay);
                }
                Command::Day(day)
            }
            ("day", _) => return Err(CommandError::Usage("day <0-6>")),
            ("select", []) => Command::Select,
            ("click", [index, rest @ ..]) if rest.len() <= 1 => {
                let index = index
                    .parse()
                    .map_err(|_| CommandError::Usage("click <index> [shift|ctrl]"))?;
                let kind = match rest.first().map(|m| m.to_lowercase()).as_deref() {
                    None => ClickKind::Plain,
                    Some("shift") => ClickKind::ShiftExtend,
                    Some("ctrl" | "cmd" | "meta") => ClickKind::CtrlToggle,
                    Some(_) => return Err(CommandError::Usage("click <index> [shift|ctrl]")),
                };
                Command::Click { index, kind }
            }
            ("click", _) => return Err(CommandError::Usage("click <index> [shift|ctrl]")),
            ("key", [combo]) => Command::Key {
                combo: KeyCombo::parse(combo)?,
                focus: Focus::List,
            },
            ("key", [combo, focus]) if focus.eq_ignore_ascii_case("text") => Command::Key {
                combo: KeyCombo::parse(combo)?,
                focus: Focus::TextInput,
            },
            ("key", _) => return Err(CommandError::Usage("key <combo> [text]")),
            ("all", []) => Command::All,
            ("delete", []) => Command::Delete,
            ("reload", []) => Command::Reload,
            ("list" | "ls", []) => Command::List,
            ("config", []) => Command::Config(ConfigAction::Show),
            ("config", ["set", name, value @ ..]) if !value.is_empty() => {
                let setting = Setting::from_name(name).ok_or(CommandError::Usage(CONFIG_USAGE))?;
                Command::Config(ConfigAction::Set(setting, value.join(" ")))
            }
            ("config", ["unset", name]) => {
                let setting = Setting::from_name(name).ok_or(CommandError::Usage(CONFIG_USAGE))?;
                Command::Config(ConfigAction::Unset(setting))
            }
            ("config", _) => return Err(CommandError::Usage(CONFIG_USAGE)),
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use schedule_select::keybinds::Key;

    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line)
            .expect("valid command")
            .expect("non-empty line")
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("select"), Command::Select);
        assert_eq!(parse("ALL"), Command::All);
        assert_eq!(parse("delete"), Command::Delete);
        assert_eq!(parse("reload"), Command::Reload);
        assert_eq!(parse("list"), Command::List);
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("quit"), Command::Quit);
    }

    #[test]
    fn test_day() {
        assert_eq!(parse("day 6"), Command::Day(6));
        assert_eq!(Command::parse("day 7"), Err(CommandError::InvalidDay));
        assert_eq!(Command::parse("day x"), Err(CommandError::InvalidDay));
        assert!(matches!(Command::parse("day"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_click_kinds() {
        assert_eq!(
            parse("click 2"),
            Command::Click {
                index: 2,
                kind: ClickKind::Plain
            }
        );
        assert_eq!(
            parse("click 4 shift"),
            Command::Click {
                index: 4,
                kind: ClickKind::ShiftExtend
            }
        );
        assert_eq!(
            parse("click 0 ctrl"),
            Command::Click {
                index: 0,
                kind: ClickKind::CtrlToggle
            }
        );
        assert!(matches!(Command::parse("click -1"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("click 1 alt"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            parse("key ctrl+a"),
            Command::Key {
                combo: KeyCombo::key(Key::Char('a')).ctrl(),
                focus: Focus::List
            }
        );
        assert_eq!(
            parse("key ctrl+a text"),
            Command::Key {
                combo: KeyCombo::key(Key::Char('a')).ctrl(),
                focus: Focus::TextInput
            }
        );
        assert_eq!(
            parse("key escape"),
            Command::Key {
                combo: KeyCombo::key(Key::Escape),
                focus: Focus::List
            }
        );
        assert!(matches!(Command::parse("key hyper+a"), Err(CommandError::Key(_))));
    }

    #[test]
    fn test_config() {
        assert_eq!(parse("config"), Command::Config(ConfigAction::Show));
        assert_eq!(
            parse("config set url http://gym.local"),
            Command::Config(ConfigAction::Set(Setting::ServerUrl, "http://gym.local".to_string()))
        );
        assert_eq!(
            parse("config set cookie session=abc; remember=1"),
            Command::Config(ConfigAction::Set(Setting::SessionCookie, "session=abc; remember=1".to_string()))
        );
        assert_eq!(parse("config unset cookie"), Command::Config(ConfigAction::Unset(Setting::SessionCookie)));
        assert!(matches!(Command::parse("config set url"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("config set colour red"), Err(CommandError::Usage(_))));
        assert_eq!(
            parse("config set csrf IjM2ZDk.abc"),
            Command::Config(ConfigAction::Set(Setting::CsrfToken, "IjM2ZDk.abc".to_string()))
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            Command::parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }
}
