use std::env;
use std::fs;
use std::io::{Error, ErrorKind, Write};
use std::path::{Path, PathBuf};

const RECENT_AGENDAS_FILE: &str = "recent_agendas.txt";
const DEFAULT_AGENDA_FILE: &str = "agenda.json";
const MAX_RECENT_AGENDAS: usize = 50;

pub fn resolve_agenda_path(cli_path: Option<PathBuf>) -> PathBuf {
	if let Some(path) = cli_path {
		return absolutize(path);
	}

	if let Some(path) = env::var_os("POCKET_AGENDA") {
		let path = PathBuf::from(path);
		if !path.as_os_str().is_empty() {
			return absolutize(path);
		}
	}

	if let Ok(mut recent) = recent_agendas(MAX_RECENT_AGENDAS) {
		if let Some(path) = recent.drain(..).next() {
			return path;
		}
	}

	state_dir().join(DEFAULT_AGENDA_FILE)
}

pub fn remember_agenda(path: &Path) -> Result<(), Error> {
	let path = absolutize(path.to_path_buf());
	let mut entries = recent_agendas(MAX_RECENT_AGENDAS)?;
	entries.retain(|entry| entry != &path);
	entries.insert(0, path);
	entries.truncate(MAX_RECENT_AGENDAS);
	save_recent_agendas(&entries)
}

pub fn recent_agendas(limit: usize) -> Result<Vec<PathBuf>, Error> {
	let path = recent_agendas_path();
	let raw = match fs::read_to_string(path) {
		Ok(raw) => raw,
		Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
		Err(err) => return Err(err),
	};

	let mut rows = Vec::new();
	for line in raw.lines() {
		let trimmed = line.trim();
		if trimmed.is_empty() {
			continue;
		}
		rows.push(PathBuf::from(trimmed));
		if rows.len() >= limit {
			break;
		}
	}

	Ok(rows)
}

fn save_recent_agendas(entries: &[PathBuf]) -> Result<(), Error> {
	let state_dir = state_dir();
	fs::create_dir_all(&state_dir)?;

	let mut file = fs::File::create(recent_agendas_path())?;
	for path in entries {
		writeln!(file, "{}", path.display())?;
	}

	Ok(())
}

fn recent_agendas_path() -> PathBuf {
	state_dir().join(RECENT_AGENDAS_FILE)
}

pub fn state_dir() -> PathBuf {
	if let Some(path) = env::var_os("POCKET_AGENDA_STATE_DIR") {
		return PathBuf::from(path);
	}

	#[cfg(target_os = "windows")]
	{
		if let Some(path) = env::var_os("LOCALAPPDATA") {
			return PathBuf::from(path).join("pocket_agenda");
		}
	}

	if let Some(path) = env::var_os("XDG_STATE_HOME") {
		return PathBuf::from(path).join("pocket_agenda");
	}

	if let Some(path) = env::var_os("HOME") {
		return PathBuf::from(path)
			.join(".local")
			.join("state")
			.join("pocket_agenda");
	}

	PathBuf::from(".pocket_agenda")
}

fn absolutize(path: PathBuf) -> PathBuf {
	let path = if path.is_absolute() {
		path
	} else if let Ok(cwd) = env::current_dir() {
		cwd.join(path)
	} else {
		path
	};

	if path.exists() {
		fs::canonicalize(&path).unwrap_or(path)
	} else {
		path
	}
}
