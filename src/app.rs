use crate::config;
use crate::core::CueCore;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

const HELP: &str = "Commands: add <name> | remove <name> | next | prev | current | replay | find <name> | list | shuffle [on|off] | clear | save [path] | load <path> | quit";

#[derive(Debug, Default)]
pub struct AppStartupOptions {
    pub playlist: Option<PathBuf>,
    pub shuffle: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_with_startup(options: AppStartupOptions) -> Result<()> {
    let settings = config::load_settings()?;
    let mut core = CueCore::from_settings(settings);
    apply_startup(&mut core, options);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut core, stdin.lock(), stdout.lock())?;

    config::save_settings(core.settings())
}

pub fn apply_startup(core: &mut CueCore, options: AppStartupOptions) {
    if options.shuffle {
        core.set_shuffle(true);
    }

    let initial = options.playlist.or_else(|| {
        core.settings
            .restore_last_playlist
            .then(|| core.settings.last_playlist.clone())
            .flatten()
    });

    if let Some(path) = initial {
        if let Err(err) = core.load_playlist(&path) {
            warn!("startup playlist not loaded: {err:#}");
            core.set_status(&format!("load error: {err:#}"));
        }
    }
}

/// Reads commands line by line until `quit` or end of input, printing the
/// status after every command that changed it.
pub fn run_session<R: BufRead, W: Write>(core: &mut CueCore, input: R, mut out: W) -> Result<()> {
    flush_status(core, &mut out)?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let flow = run_command(core, &line);
        flush_status(core, &mut out)?;
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}

fn flush_status<W: Write>(core: &mut CueCore, out: &mut W) -> Result<()> {
    if core.dirty {
        writeln!(out, "{}", core.status).context("failed to write status")?;
        core.dirty = false;
    }
    Ok(())
}

pub fn run_command(core: &mut CueCore, raw: &str) -> Flow {
    let input = raw.trim();
    if input.is_empty() {
        return Flow::Continue;
    }

    let mut command_split = input.splitn(2, char::is_whitespace);
    let command = command_split.next().unwrap_or_default();
    let rest = command_split.next().unwrap_or("").trim();

    match command {
        "help" => core.set_status(HELP),
        "add" => {
            if rest.is_empty() {
                core.set_status("Usage: add <name>");
            } else {
                core.add_track(rest);
            }
        }
        "remove" => {
            if rest.is_empty() {
                core.set_status("Usage: remove <name>");
            } else {
                core.remove_track(rest);
            }
        }
        "next" => {
            core.next_track();
        }
        "prev" => {
            core.previous_track();
        }
        "current" => core.show_current(),
        "replay" => {
            core.replay();
        }
        "find" => {
            if rest.is_empty() {
                core.set_status("Usage: find <name>");
            } else {
                core.find_track(rest);
            }
        }
        "list" => core.show_listing(),
        "shuffle" => match rest {
            "" => core.toggle_shuffle(),
            "on" => core.set_shuffle(true),
            "off" => core.set_shuffle(false),
            _ => core.set_status("Usage: shuffle [on|off]"),
        },
        "clear" => core.clear(),
        "save" => {
            let path = (!rest.is_empty()).then(|| Path::new(rest));
            if let Err(err) = core.save_playlist(path) {
                core.set_status(&format!("save error: {err:#}"));
            }
        }
        "load" => {
            if rest.is_empty() {
                core.set_status("Usage: load <path>");
            } else if let Err(err) = core.load_playlist(Path::new(rest)) {
                core.set_status(&format!("load error: {err:#}"));
            }
        }
        "quit" | "exit" => {
            core.set_status("Bye");
            return Flow::Quit;
        }
        _ => core.set_status("Unknown command. Use help"),
    }

    Flow::Continue
}
