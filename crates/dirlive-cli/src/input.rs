//! Line-oriented command parsing.
//!
//! Each stdin line maps to one [`Input`]. Preference commands carry the
//! full updated [`DisplaySettings`] together with the key that changed, so
//! the controller can decide whether a rescan is needed.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use dirlive_core::{Command, DisplaySettings, PreferenceKey, SortField};

/// What the user asked for.
#[derive(Debug, Clone)]
pub enum Input {
    /// Forward to the controller.
    Core(Command),
    /// Ask every controller showing this path to rescan, via the registry.
    Notify(PathBuf),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r | refresh          rescan the current directory
  cd <path>            show another directory (relative to the current one)
  sort <field>         sort by name, size, date or type
  reverse              toggle ascending / descending
  hidden               toggle hidden entries
  mix                  toggle mixing folders and files
  theme                change theme (never rescans)
  notify [path]        request a refresh of a path through the registry
  h | help             show this help
  q | quit             exit";

/// Parses one input line against the current directory and settings.
///
/// Blank lines yield `Ok(None)`.
pub fn parse(line: &str, cwd: &Path, settings: &DisplaySettings) -> anyhow::Result<Option<Input>> {
    let line = line.trim();
    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (line, ""),
    };

    let input = match word {
        "" => return Ok(None),
        "r" | "refresh" => Input::Core(Command::Refresh),
        "cd" => {
            if arg.is_empty() {
                bail!("cd needs a path");
            }
            Input::Core(Command::SetPath(cwd.join(arg)))
        }
        "sort" => {
            let field = parse_sort_field(arg)?;
            let next = DisplaySettings {
                sort_by: field,
                ..settings.clone()
            };
            Input::Core(Command::ApplySettings(next, PreferenceKey::SortBy))
        }
        "reverse" => {
            let next = DisplaySettings {
                ascending: !settings.ascending,
                ..settings.clone()
            };
            Input::Core(Command::ApplySettings(next, PreferenceKey::Ascending))
        }
        "hidden" => {
            let next = DisplaySettings {
                show_hidden: !settings.show_hidden,
                ..settings.clone()
            };
            Input::Core(Command::ApplySettings(next, PreferenceKey::ShowHidden))
        }
        "mix" => {
            let next = DisplaySettings {
                mix_folders_and_files: !settings.mix_folders_and_files,
                ..settings.clone()
            };
            Input::Core(Command::ApplySettings(next, PreferenceKey::MixFoldersAndFiles))
        }
        "theme" => Input::Core(Command::ApplySettings(settings.clone(), PreferenceKey::Theme)),
        "notify" => {
            let target = if arg.is_empty() {
                cwd.to_path_buf()
            } else {
                cwd.join(arg)
            };
            Input::Notify(target)
        }
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        other => bail!("unknown command: {other} (try 'help')"),
    };
    Ok(Some(input))
}

fn parse_sort_field(arg: &str) -> anyhow::Result<SortField> {
    match arg.to_ascii_lowercase().as_str() {
        "name" => Ok(SortField::Name),
        "size" => Ok(SortField::Size),
        "date" => Ok(SortField::Date),
        "type" => Ok(SortField::Type),
        other => Err(anyhow!("unknown sort field: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(line: &str) -> Input {
        parse(line, Path::new("/data"), &DisplaySettings::default())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn blank_line_is_nothing() {
        assert!(parse("   ", Path::new("/"), &DisplaySettings::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn refresh_aliases() {
        assert!(matches!(parse_ok("r"), Input::Core(Command::Refresh)));
        assert!(matches!(parse_ok("refresh"), Input::Core(Command::Refresh)));
    }

    #[test]
    fn cd_is_relative_to_cwd() {
        match parse_ok("cd music") {
            Input::Core(Command::SetPath(p)) => assert_eq!(p, PathBuf::from("/data/music")),
            other => panic!("unexpected {other:?}"),
        }
        match parse_ok("cd /etc") {
            Input::Core(Command::SetPath(p)) => assert_eq!(p, PathBuf::from("/etc")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cd_without_path_is_an_error() {
        assert!(parse("cd", Path::new("/"), &DisplaySettings::default()).is_err());
    }

    #[test]
    fn sort_carries_updated_settings() {
        match parse_ok("sort SIZE") {
            Input::Core(Command::ApplySettings(s, key)) => {
                assert_eq!(s.sort_by, SortField::Size);
                assert_eq!(key, PreferenceKey::SortBy);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn toggles_flip_current_value() {
        match parse_ok("hidden") {
            Input::Core(Command::ApplySettings(s, PreferenceKey::ShowHidden)) => {
                assert!(s.show_hidden)
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse_ok("reverse") {
            Input::Core(Command::ApplySettings(s, PreferenceKey::Ascending)) => {
                assert!(!s.ascending)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn theme_keeps_settings() {
        match parse_ok("theme") {
            Input::Core(Command::ApplySettings(s, key)) => {
                assert_eq!(s, DisplaySettings::default());
                assert!(!key.triggers_rescan());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn notify_defaults_to_cwd() {
        assert!(matches!(parse_ok("notify"), Input::Notify(p) if p == Path::new("/data")));
    }

    #[test]
    fn unknown_command_and_field_are_errors() {
        let settings = DisplaySettings::default();
        assert!(parse("frobnicate", Path::new("/"), &settings).is_err());
        assert!(parse("sort colour", Path::new("/"), &settings).is_err());
    }
}
