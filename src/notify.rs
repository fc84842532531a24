use std::fs;
use std::io::Write;

use chrono::NaiveDate;

use crate::agendas::state_dir;
use crate::domain::Event;

const NOTIFICATIONS_FILE: &str = "notifications.log";

// Local stand-in for an outbound notification service: one appended line per
// created event, written by the coordinator after a successful add.
pub fn announce_created(event: &Event, date: NaiveDate) -> Result<(), std::io::Error> {
	let dir = state_dir();
	fs::create_dir_all(&dir)?;

	let mut file = fs::OpenOptions::new()
		.create(true)
		.append(true)
		.open(dir.join(NOTIFICATIONS_FILE))?;
	writeln!(
		file,
		"event created: {} | {} {}",
		event.name,
		date.format("%A %d %B %Y"),
		event.time_span()
	)
}
