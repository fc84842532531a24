mod agendas;
mod config;
mod domain;
mod notify;
mod storage;
mod ui;

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::agendas::{recent_agendas, remember_agenda, resolve_agenda_path};
use crate::config::load_config;
use crate::domain::{first_of_month, parse_date, Agenda, EventDraft};
use crate::notify::announce_created;
use crate::storage::{load_agenda, save_agenda};
use crate::ui::{print_day, print_week, print_year, run_dashboard};

#[derive(Debug, Parser)]
#[command(name = "pocket-agenda", about = "Terminal-first personal calendar")]
struct Cli {
	#[arg(long)]
	agenda: Option<PathBuf>,
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	Init,
	Dashboard,
	Add {
		#[arg(long)]
		name: String,
		#[arg(long)]
		date: String,
		#[arg(long)]
		start: String,
		#[arg(long)]
		end: String,
	},
	Day {
		#[arg(long)]
		date: Option<String>,
	},
	Week {
		#[arg(long)]
		date: Option<String>,
	},
	Year {
		#[arg(long)]
		year: Option<i32>,
	},
	Agendas {
		#[arg(long, default_value_t = 20)]
		limit: usize,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	if let Some(Command::Agendas { limit }) = &cli.command {
		print_recent_agendas(*limit)?;
		return Ok(());
	}

	let mut agenda_path = resolve_agenda_path(cli.agenda);
	let mut agenda = load_agenda_or_empty(&agenda_path);
	if let Err(err) = remember_agenda(&agenda_path) {
		eprintln!("warning: failed to store recent agenda: {err}");
	}

	match cli.command.unwrap_or(Command::Dashboard) {
		Command::Init => {
			save_agenda(&agenda_path, &agenda)?;
			println!("initialized agenda at {}", agenda_path.display());
		}
		Command::Dashboard => {
			let config = load_config();
			run_dashboard(&mut agenda, &mut agenda_path, &config)?;
		}
		Command::Add {
			name,
			date,
			start,
			end,
		} => {
			let draft = EventDraft {
				name,
				date,
				start_time: start,
				end_time: end,
			};
			let valid = draft.validate()?;
			let event = agenda.add_event(valid.date, valid.start_time, valid.end_time, valid.name);
			save_agenda(&agenda_path, &agenda)?;
			if let Err(err) = announce_created(&event, valid.date) {
				eprintln!("warning: failed to record notification: {err}");
			}
			println!("created event {}", event.id);
		}
		Command::Day { date } => {
			print_day(&agenda, parse_day(date.as_deref())?);
		}
		Command::Week { date } => {
			print_week(&agenda, parse_day(date.as_deref())?);
		}
		Command::Year { year } => {
			let anchor = match year {
				Some(year) => first_of_month(year, 1),
				None => Local::now().date_naive(),
			};
			print_year(&agenda, anchor);
		}
		Command::Agendas { .. } => {}
	}

	Ok(())
}

fn load_agenda_or_empty(path: &Path) -> Agenda {
	match load_agenda(path) {
		Ok(agenda) => agenda,
		Err(err) => {
			eprintln!("warning: starting with an empty agenda: {err}");
			Agenda::new()
		}
	}
}

fn parse_day(input: Option<&str>) -> Result<NaiveDate, Box<dyn Error>> {
	if let Some(raw) = input {
		Ok(parse_date(raw)?)
	} else {
		Ok(Local::now().date_naive())
	}
}

fn print_recent_agendas(limit: usize) -> Result<(), Box<dyn Error>> {
	let rows = recent_agendas(limit)?;
	if rows.is_empty() {
		println!("no known agendas");
		return Ok(());
	}

	for (index, path) in rows.iter().enumerate() {
		println!("{:>2}. {}", index + 1, path.display());
	}

	Ok(())
}
