use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use serde::{Deserialize, Serialize};

const ID_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Event {
    pub fn time_span(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }

    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Day,
    Week,
    Year,
}

impl ViewMode {
    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Year => "Year",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Agenda {
    pub buckets: BTreeMap<NaiveDate, Vec<Event>>,
}

impl Agenda {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    pub fn add_event(
        &mut self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        name: String,
    ) -> Event {
        let event = Event {
            id: generate_id(),
            name,
            start_time,
            end_time,
        };
        self.buckets.entry(date).or_default().push(event.clone());
        event
    }

    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.buckets
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn event_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn month_event_count(&self, year: i32, month: u32) -> usize {
        self.buckets
            .range(month_bounds(year, month))
            .map(|(_, events)| events.len())
            .sum()
    }
}

fn month_bounds(year: i32, month: u32) -> std::ops::Range<NaiveDate> {
    let start = first_of_month(year, month);
    let end = if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };
    start..end
}

pub fn bucket_dates(anchor: NaiveDate, view: ViewMode) -> Vec<NaiveDate> {
    match view {
        ViewMode::Day => vec![anchor],
        ViewMode::Week => {
            let start = start_of_week(anchor);
            (0..7).map(|offset| start + Duration::days(offset)).collect()
        }
        ViewMode::Year => (1..=12)
            .map(|month| first_of_month(anchor.year(), month))
            .collect(),
    }
}

pub fn range_label(anchor: NaiveDate, view: ViewMode) -> String {
    match view {
        ViewMode::Day => anchor.format("%A, %d %B %Y").to_string(),
        ViewMode::Week => {
            let start = start_of_week(anchor);
            let end = start + Duration::days(6);
            format!(
                "Week of {} to {}",
                start.format("%d %b"),
                end.format("%d %b")
            )
        }
        ViewMode::Year => format!("Year {}", anchor.year()),
    }
}

pub fn navigate(anchor: NaiveDate, view: ViewMode, step: i64) -> NaiveDate {
    match view {
        ViewMode::Day => anchor + Duration::days(step),
        ViewMode::Week => anchor + Duration::days(7 * step),
        ViewMode::Year => first_of_month((anchor.year() as i64 + step) as i32, 1),
    }
}

pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    let days_from_monday = day.weekday().number_from_monday() as i64 - 1;
    day - Duration::days(days_from_monday)
}

pub fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("first day of month must be valid")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidDate(String),
    InvalidTime(String),
    InvalidTimeRange,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{field} is required"),
            ValidationError::InvalidDate(text) => {
                write!(f, "invalid date '{text}', expected YYYY-MM-DD")
            }
            ValidationError::InvalidTime(text) => {
                write!(f, "invalid time '{text}', expected HH:MM")
            }
            ValidationError::InvalidTimeRange => {
                write!(f, "end time must be after start time")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone)]
pub struct ValidEvent {
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl EventDraft {
    pub fn validate(&self) -> Result<ValidEvent, ValidationError> {
        let name = required_text("event name", &self.name)?;
        let date_text = required_text("date", &self.date)?;
        let start_text = required_text("start time", &self.start_time)?;
        let end_text = required_text("end time", &self.end_time)?;

        let date = parse_date(&date_text)?;
        let start_time = parse_clock(&start_text)?;
        let end_time = parse_clock(&end_text)?;
        if end_time <= start_time {
            return Err(ValidationError::InvalidTimeRange);
        }

        Ok(ValidEvent {
            name,
            date,
            start_time,
            end_time,
        })
    }
}

pub fn required_text(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(text.trim().to_string()))
}

pub fn parse_clock(text: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(text.trim().to_string()))
}

pub fn generate_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

    use super::{
        Agenda, EventDraft, ValidationError, ViewMode, bucket_dates, navigate, range_label,
    };

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("test date")
    }

    fn clock(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("test time")
    }

    #[test]
    fn validated_event_lands_in_its_bucket() {
        let draft = EventDraft {
            name: "Standup".to_string(),
            date: "2025-01-07".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
        };
        let valid = draft.validate().expect("draft should validate");

        let mut agenda = Agenda::new();
        let event = agenda.add_event(valid.date, valid.start_time, valid.end_time, valid.name);

        let stored = agenda.events_on(date(2025, 1, 7));
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, event.id);
        assert_eq!(stored[0].name, "Standup");
        assert_eq!(stored[0].start_time, clock(9, 0));
        assert_eq!(stored[0].end_time, clock(10, 0));
    }

    #[test]
    fn rejects_end_before_start() {
        let draft = EventDraft {
            name: "Standup".to_string(),
            date: "2025-01-07".to_string(),
            start_time: "10:00".to_string(),
            end_time: "09:30".to_string(),
        };
        assert_eq!(draft.validate().unwrap_err(), ValidationError::InvalidTimeRange);

        let equal = EventDraft {
            end_time: "10:00".to_string(),
            ..draft
        };
        assert_eq!(equal.validate().unwrap_err(), ValidationError::InvalidTimeRange);
    }

    #[test]
    fn rejects_missing_and_malformed_fields() {
        let mut draft = EventDraft {
            name: "  ".to_string(),
            date: "2025-01-07".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::MissingField("event name")
        );

        draft.name = "Standup".to_string();
        draft.date = "07/01/2025".to_string();
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::InvalidDate("07/01/2025".to_string())
        );

        draft.date = "2025-01-07".to_string();
        draft.start_time = "9am".to_string();
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::InvalidTime("9am".to_string())
        );
    }

    #[test]
    fn week_buckets_are_seven_days_from_monday() {
        let anchor = date(2025, 1, 7);
        assert_eq!(anchor.weekday(), Weekday::Tue);

        let buckets = bucket_dates(anchor, ViewMode::Week);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0], date(2025, 1, 6));
        assert_eq!(buckets[0].weekday(), Weekday::Mon);
        for pair in buckets.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn year_buckets_are_twelve_month_starts() {
        let buckets = bucket_dates(date(2025, 6, 15), ViewMode::Year);
        assert_eq!(buckets.len(), 12);
        for (index, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.year(), 2025);
            assert_eq!(bucket.month(), index as u32 + 1);
            assert_eq!(bucket.day(), 1);
        }
    }

    #[test]
    fn navigation_shifts_by_view_granularity() {
        let anchor = date(2025, 1, 7);

        assert_eq!(navigate(anchor, ViewMode::Day, 1), date(2025, 1, 8));
        assert_eq!(navigate(anchor, ViewMode::Day, -1), date(2025, 1, 6));

        let next_week = navigate(anchor, ViewMode::Week, 1);
        assert_eq!(
            bucket_dates(next_week, ViewMode::Week),
            (13..=19).map(|day| date(2025, 1, day)).collect::<Vec<_>>()
        );

        assert_eq!(navigate(anchor, ViewMode::Year, 1), date(2026, 1, 1));
        assert_eq!(navigate(anchor, ViewMode::Year, -1), date(2024, 1, 1));
    }

    #[test]
    fn bucket_keeps_insertion_order() {
        let mut agenda = Agenda::new();
        let day = date(2025, 1, 7);
        agenda.add_event(day, clock(14, 0), clock(15, 0), "Review".to_string());
        agenda.add_event(day, clock(9, 0), clock(10, 0), "Standup".to_string());

        let names = agenda
            .events_on(day)
            .iter()
            .map(|event| event.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Review", "Standup"]);
    }

    #[test]
    fn labels_follow_view_mode() {
        let anchor = date(2025, 1, 7);
        assert_eq!(
            range_label(anchor, ViewMode::Day),
            "Tuesday, 07 January 2025"
        );
        assert_eq!(
            range_label(anchor, ViewMode::Week),
            "Week of 06 Jan to 12 Jan"
        );
        assert_eq!(range_label(anchor, ViewMode::Year), "Year 2025");
    }

    #[test]
    fn month_event_count_spans_whole_month() {
        let mut agenda = Agenda::new();
        agenda.add_event(date(2025, 3, 1), clock(9, 0), clock(10, 0), "First".to_string());
        agenda.add_event(date(2025, 3, 31), clock(9, 0), clock(10, 0), "Last".to_string());
        agenda.add_event(date(2025, 4, 1), clock(9, 0), clock(10, 0), "April".to_string());

        assert_eq!(agenda.month_event_count(2025, 3), 2);
        assert_eq!(agenda.month_event_count(2025, 4), 1);
        assert_eq!(agenda.month_event_count(2025, 12), 0);
    }
}
