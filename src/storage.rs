use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{Agenda, Event};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    JsonDecode(serde_json::Error),
    JsonEncode(serde_json::Error),
    BadDateKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::JsonDecode(err) => write!(f, "failed to parse agenda blob: {err}"),
            StorageError::JsonEncode(err) => write!(f, "failed to encode agenda blob: {err}"),
            StorageError::BadDateKey(key) => {
                write!(f, "agenda blob contains invalid date key '{key}'")
            }
        }
    }
}

impl std::error::Error for StorageError {}

pub fn load_agenda(path: &Path) -> Result<Agenda, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Agenda::new()),
        Err(err) => return Err(StorageError::Io(err)),
    };

    if raw.trim().is_empty() {
        return Ok(Agenda::new());
    }

    let keyed: BTreeMap<String, Vec<Event>> =
        serde_json::from_str(&raw).map_err(StorageError::JsonDecode)?;

    let mut buckets = BTreeMap::new();
    for (key, events) in keyed {
        let date = NaiveDate::parse_from_str(&key, DATE_KEY_FORMAT)
            .map_err(|_| StorageError::BadDateKey(key))?;
        buckets.insert(date, events);
    }

    Ok(Agenda { buckets })
}

pub fn save_agenda(path: &Path, agenda: &Agenda) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
    }

    let keyed = agenda
        .buckets
        .iter()
        .map(|(date, events)| (date.format(DATE_KEY_FORMAT).to_string(), events))
        .collect::<BTreeMap<_, _>>();

    let blob = serde_json::to_string_pretty(&keyed).map_err(StorageError::JsonEncode)?;
    fs::write(path, blob).map_err(StorageError::Io)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chrono::{NaiveDate, NaiveTime};

    use crate::domain::Agenda;

    use super::{StorageError, load_agenda, save_agenda};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("test date")
    }

    fn clock(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("test time")
    }

    #[test]
    fn round_trips_buckets_and_event_order() {
        let mut agenda = Agenda::new();
        let tuesday = date(2025, 1, 7);
        agenda.add_event(tuesday, clock(14, 0), clock(15, 30), "Review".to_string());
        agenda.add_event(tuesday, clock(9, 0), clock(10, 0), "Standup".to_string());
        agenda.add_event(date(2025, 1, 9), clock(12, 0), clock(13, 0), "Lunch".to_string());

        let path = temp_file("agenda_roundtrip.json");
        save_agenda(&path, &agenda).expect("save should succeed");
        let loaded = load_agenda(&path).expect("load should succeed");
        let _ = fs::remove_file(&path);

        assert_eq!(
            loaded.buckets.keys().collect::<Vec<_>>(),
            agenda.buckets.keys().collect::<Vec<_>>()
        );
        let names = loaded
            .events_on(tuesday)
            .iter()
            .map(|event| event.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Review", "Standup"]);
        assert_eq!(loaded.events_on(tuesday)[0].time_span(), "14:00 - 15:30");
    }

    #[test]
    fn missing_file_loads_as_empty_agenda() {
        let path = temp_file("agenda_missing.json");
        let _ = fs::remove_file(&path);
        let loaded = load_agenda(&path).expect("missing file should load empty");
        assert_eq!(loaded.event_count(), 0);
    }

    #[test]
    fn unparseable_blob_is_reported() {
        let path = temp_file("agenda_garbage.json");
        fs::write(&path, "{ not json").expect("write garbage");
        let result = load_agenda(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(StorageError::JsonDecode(_))));
    }

    #[test]
    fn invalid_date_key_is_reported() {
        let path = temp_file("agenda_badkey.json");
        fs::write(&path, r#"{"next tuesday": []}"#).expect("write blob");
        let result = load_agenda(&path);
        let _ = fs::remove_file(&path);
        match result {
            Err(StorageError::BadDateKey(key)) => assert_eq!(key, "next tuesday"),
            other => panic!("expected BadDateKey, got {other:?}"),
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("{}_{}", name, std::process::id()));
        path
    }
}
