use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use crate::agendas::{recent_agendas, remember_agenda};
use crate::config::Config;
use crate::domain::{
	bucket_dates, navigate, parse_clock, parse_date, range_label, required_text, Agenda, Event,
	EventDraft, ViewMode,
};
use crate::notify::announce_created;
use crate::storage::{load_agenda, save_agenda};

const EVENT_COLOR: Color = Color::LightBlue;
const NOW_MARKER_COLOR: Color = Color::Yellow;
const GUTTER_COLOR: Color = Color::DarkGray;
const HIGHLIGHT_BACKGROUND_COLOR: Color = Color::Rgb(42, 45, 52);

pub fn run_dashboard(
	agenda: &mut Agenda,
	agenda_path: &mut PathBuf,
	config: &Config,
) -> Result<(), Box<dyn Error>> {
	enable_raw_mode()?;
	let mut stdout = io::stdout();
	stdout.execute(EnterAlternateScreen)?;
	let backend = CrosstermBackend::new(stdout);
	let mut terminal = Terminal::new(backend)?;

	let result = run_event_loop(&mut terminal, agenda, agenda_path, config);

	disable_raw_mode()?;
	execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
	terminal.show_cursor()?;

	result
}

fn run_event_loop(
	terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
	agenda: &mut Agenda,
	agenda_path: &mut PathBuf,
	config: &Config,
) -> Result<(), Box<dyn Error>> {
	let mut app = App::new(config);

	loop {
		let now = Local::now();
		let grid = build_grid(app.anchor, app.view, agenda, config.hour_range(), now);
		let total_events = agenda.event_count();
		terminal.draw(|frame| draw_dashboard(frame, &app, &grid, total_events))?;

		if event::poll(StdDuration::from_millis(250))? {
			if let CEvent::Key(key) = event::read()? {
				if key.kind != KeyEventKind::Press {
					continue;
				}

				let should_quit = match &app.mode {
					InputMode::Prompt(_) => handle_prompt_key(&mut app, key.code, agenda, agenda_path.as_path()),
					InputMode::Select(_) => handle_select_key(&mut app, key.code, agenda, agenda_path),
					InputMode::Normal => handle_normal_key(&mut app, key.code, agenda_path.as_path()),
				};

				if should_quit {
					break;
				}
			}
		}
	}

	Ok(())
}

pub struct GridView {
	pub label: String,
	pub body: GridBody,
}

pub enum GridBody {
	Day {
		slots: Vec<HourSlot>,
		now_marker: Option<NowMarker>,
	},
	Week {
		days: Vec<DayColumn>,
	},
	Year {
		months: Vec<MonthCell>,
	},
}

pub struct HourSlot {
	pub hour: u32,
	pub events: Vec<Event>,
}

pub struct NowMarker {
	pub hour: u32,
	pub fraction: f64,
}

pub struct DayColumn {
	pub date: NaiveDate,
	pub is_today: bool,
	pub events: Vec<Event>,
}

pub struct MonthCell {
	pub month_start: NaiveDate,
	pub event_count: usize,
	pub is_current: bool,
}

pub fn build_grid(
	anchor: NaiveDate,
	view: ViewMode,
	agenda: &Agenda,
	hour_range: (u32, u32),
	now: DateTime<Local>,
) -> GridView {
	let label = range_label(anchor, view);
	let today = now.date_naive();

	let body = match view {
		ViewMode::Day => {
			let (start_hour, end_hour) = hour_range;
			let events = agenda.events_on(anchor);
			let slots = (start_hour..end_hour)
				.map(|hour| HourSlot {
					hour,
					events: events
						.iter()
						.filter(|event| event.start_hour() == hour)
						.cloned()
						.collect(),
				})
				.collect();

			let now_marker = if anchor == today && (start_hour..end_hour).contains(&now.hour()) {
				Some(NowMarker {
					hour: now.hour(),
					fraction: f64::from(now.minute()) / 60.0,
				})
			} else {
				None
			};

			GridBody::Day { slots, now_marker }
		}
		ViewMode::Week => {
			let days = bucket_dates(anchor, view)
				.into_iter()
				.map(|date| DayColumn {
					date,
					is_today: date == today,
					events: agenda.events_on(date).to_vec(),
				})
				.collect();
			GridBody::Week { days }
		}
		ViewMode::Year => {
			let months = bucket_dates(anchor, view)
				.into_iter()
				.map(|month_start| MonthCell {
					month_start,
					event_count: agenda.month_event_count(month_start.year(), month_start.month()),
					is_current: month_start.year() == today.year()
						&& month_start.month() == today.month(),
				})
				.collect();
			GridBody::Year { months }
		}
	};

	GridView { label, body }
}

fn draw_dashboard(frame: &mut Frame, app: &App, grid: &GridView, total_events: usize) {
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Min(10), Constraint::Length(5)])
		.split(frame.area());

	let title = format!("{} [{} view]", grid.label, app.view.title());
	match &grid.body {
		GridBody::Day { slots, now_marker } => {
			render_scrolling_grid(frame, layout[0], app, title, day_grid_lines(slots, now_marker));
		}
		GridBody::Week { days } => {
			render_scrolling_grid(frame, layout[0], app, title, week_grid_lines(days));
		}
		GridBody::Year { months } => render_year_grid(frame, layout[0], title, months),
	}

	render_footer(frame, layout[1], app, total_events);

	if let InputMode::Select(select) = &app.mode {
		render_select_popup(frame, select);
	}
}

fn render_scrolling_grid(frame: &mut Frame, area: Rect, app: &App, title: String, lines: Vec<Line<'static>>) {
	let grid = Paragraph::new(lines)
		.block(Block::default().borders(Borders::ALL).title(title))
		.scroll((app.scroll, 0));
	frame.render_widget(grid, area);
}

fn day_grid_lines(slots: &[HourSlot], now_marker: &Option<NowMarker>) -> Vec<Line<'static>> {
	let mut lines = Vec::new();
	for slot in slots {
		let mut spans = vec![Span::styled(
			format!("{:02}:00 │", slot.hour),
			Style::default().fg(GUTTER_COLOR),
		)];
		for event in &slot.events {
			spans.push(Span::raw(" "));
			spans.push(Span::styled(
				format!("[{}] {}", event.time_span(), event.name),
				Style::default().fg(EVENT_COLOR).add_modifier(Modifier::BOLD),
			));
		}

		let content = Line::from(spans);
		let spacer = Line::from(Span::styled("      │", Style::default().fg(GUTTER_COLOR)));

		match now_marker {
			// The marker sits inside the slot: upper half before the spacer
			// row, lower half after it.
			Some(marker) if marker.hour == slot.hour => {
				let marker_line = now_marker_line(marker);
				lines.push(content);
				if marker.fraction < 0.5 {
					lines.push(marker_line);
					lines.push(spacer);
				} else {
					lines.push(spacer);
					lines.push(marker_line);
				}
			}
			_ => {
				lines.push(content);
				lines.push(spacer);
			}
		}
	}
	lines
}

fn now_marker_line(marker: &NowMarker) -> Line<'static> {
	let minute = (marker.fraction * 60.0).round() as u32;
	Line::from(Span::styled(
		format!("──────▸ now {:02}:{minute:02}", marker.hour),
		Style::default().fg(NOW_MARKER_COLOR).add_modifier(Modifier::BOLD),
	))
}

fn week_grid_lines(days: &[DayColumn]) -> Vec<Line<'static>> {
	let mut lines = Vec::new();
	for day in days {
		let header_style = if day.is_today {
			Style::default().fg(NOW_MARKER_COLOR).add_modifier(Modifier::BOLD)
		} else {
			Style::default().add_modifier(Modifier::BOLD)
		};
		lines.push(Line::from(Span::styled(
			day.date.format("%A %d %B").to_string(),
			header_style,
		)));

		if day.events.is_empty() {
			lines.push(Line::from(Span::styled(
				"  (no events)",
				Style::default().fg(GUTTER_COLOR),
			)));
		} else {
			for event in &day.events {
				lines.push(Line::from(vec![
					Span::raw("  "),
					Span::styled(event.time_span(), Style::default().fg(GUTTER_COLOR)),
					Span::raw("  "),
					Span::styled(event.name.clone(), Style::default().fg(EVENT_COLOR)),
				]));
			}
		}
		lines.push(Line::from(""));
	}
	lines
}

fn render_year_grid(frame: &mut Frame, area: Rect, title: String, months: &[MonthCell]) {
	let block = Block::default().borders(Borders::ALL).title(title);
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let rows = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Percentage(25); 4])
		.split(inner);

	for row_index in 0..4 {
		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([
				Constraint::Percentage(33),
				Constraint::Percentage(33),
				Constraint::Percentage(34),
			])
			.split(rows[row_index]);

		for column_index in 0..3 {
			let Some(cell) = months.get(row_index * 3 + column_index) else {
				continue;
			};

			let count_text = if cell.event_count == 1 {
				"1 event".to_string()
			} else {
				format!("{} events", cell.event_count)
			};
			let border_style = if cell.is_current {
				Style::default().fg(NOW_MARKER_COLOR)
			} else {
				Style::default().fg(GUTTER_COLOR)
			};

			let month_cell = Paragraph::new(vec![
				Line::from(Span::styled(
					cell.month_start.format("%B").to_string(),
					Style::default().add_modifier(Modifier::BOLD),
				)),
				Line::from(count_text),
			])
			.block(Block::default().borders(Borders::ALL).border_style(border_style));
			frame.render_widget(month_cell, columns[column_index]);
		}
	}
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, total_events: usize) {
	let footer_lines = match &app.mode {
		InputMode::Normal => vec![
			Line::from("d/w/y view | Tab next view | h/l or arrows navigate | j/k scroll | t today"),
			Line::from("n new event | g switch agenda | q quit"),
			Line::from(format!("{} | {total_events} events total", app.status)),
		],
		InputMode::Prompt(prompt) => vec![
			Line::from(prompt.title.clone()),
			Line::from(format!("> {}", prompt.input)),
			Line::from("Enter submit | Esc cancel"),
		],
		InputMode::Select(select) => vec![
			Line::from(select.title.clone()),
			Line::from(format!(
				"Selected: {}",
				select
					.selected_option()
					.map(|option| option.label.as_str())
					.unwrap_or("(none)")
			)),
			Line::from("j/k or arrows move | Enter choose | Esc cancel"),
		],
	};

	let footer = Paragraph::new(footer_lines).block(Block::default().borders(Borders::ALL).title("Shortcuts"));
	frame.render_widget(footer, area);
}

fn render_select_popup(frame: &mut Frame, select: &SelectState) {
	let area = centered_rect(62, 55, frame.area());
	frame.render_widget(Clear, area);

	let items = if select.options.is_empty() {
		vec![ListItem::new("(no choices)")]
	} else {
		select
			.options
			.iter()
			.map(|option| ListItem::new(option.label.clone()).style(option.style))
			.collect::<Vec<_>>()
	};

	let list = List::new(items)
		.block(Block::default().borders(Borders::ALL).title(select.title.clone()))
		.highlight_symbol(">> ")
		.highlight_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR));

	let mut state = ListState::default();
	if !select.options.is_empty() {
		state.select(Some(select.selected.min(select.options.len() - 1)));
	}
	frame.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
	let popup_layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Percentage((100 - percent_y) / 2),
			Constraint::Percentage(percent_y),
			Constraint::Percentage((100 - percent_y) / 2),
		])
		.split(area);
	Layout::default()
		.direction(Direction::Horizontal)
		.constraints([
			Constraint::Percentage((100 - percent_x) / 2),
			Constraint::Percentage(percent_x),
			Constraint::Percentage((100 - percent_x) / 2),
		])
		.split(popup_layout[1])[1]
}

fn handle_normal_key(app: &mut App, code: KeyCode, agenda_path: &Path) -> bool {
	match code {
		KeyCode::Char('q') | KeyCode::Esc => true,
		KeyCode::Char('d') => {
			app.set_view(ViewMode::Day);
			false
		}
		KeyCode::Char('w') => {
			app.set_view(ViewMode::Week);
			false
		}
		KeyCode::Char('y') => {
			app.set_view(ViewMode::Year);
			false
		}
		KeyCode::Tab => {
			app.set_view(next_view(app.view));
			false
		}
		KeyCode::Left | KeyCode::Char('h') => {
			app.shift_anchor(-1);
			false
		}
		KeyCode::Right | KeyCode::Char('l') => {
			app.shift_anchor(1);
			false
		}
		KeyCode::Up | KeyCode::Char('k') => {
			app.scroll = app.scroll.saturating_sub(1);
			false
		}
		KeyCode::Down | KeyCode::Char('j') => {
			app.scroll = app.scroll.saturating_add(1);
			false
		}
		KeyCode::Char('t') => {
			app.jump_to_today();
			false
		}
		KeyCode::Char('n') => {
			app.mode = InputMode::Prompt(PromptState::new("Event name", PromptKind::EventName));
			false
		}
		KeyCode::Char('g') => {
			match build_agenda_switch_select(agenda_path) {
				Ok(select) => app.mode = InputMode::Select(select),
				Err(err) => app.status = err,
			}
			false
		}
		_ => false,
	}
}

fn handle_prompt_key(app: &mut App, code: KeyCode, agenda: &mut Agenda, agenda_path: &Path) -> bool {
	match code {
		KeyCode::Esc => {
			app.mode = InputMode::Normal;
			app.status = "Input cancelled".to_string();
		}
		KeyCode::Backspace => {
			if let InputMode::Prompt(prompt) = &mut app.mode {
				prompt.input.pop();
			}
		}
		KeyCode::Char(value) => {
			if let InputMode::Prompt(prompt) = &mut app.mode {
				prompt.input.push(value);
			}
		}
		KeyCode::Enter => {
			let anchor = app.anchor;
			let prompt = match std::mem::replace(&mut app.mode, InputMode::Normal) {
				InputMode::Prompt(prompt) => prompt,
				InputMode::Normal | InputMode::Select(_) => return false,
			};

			match submit_prompt(prompt.clone(), anchor, agenda, agenda_path) {
				Ok(PromptOutcome::NextPrompt(next_prompt)) => app.mode = InputMode::Prompt(next_prompt),
				Ok(PromptOutcome::Done(message)) => {
					app.mode = InputMode::Normal;
					app.status = message;
				}
				Err(err) => {
					app.mode = InputMode::Prompt(prompt);
					app.status = format!("error: {err}");
				}
			}
		}
		_ => {}
	}

	false
}

fn handle_select_key(app: &mut App, code: KeyCode, agenda: &mut Agenda, agenda_path: &mut PathBuf) -> bool {
	match code {
		KeyCode::Esc => {
			app.mode = InputMode::Normal;
			app.status = "Selection cancelled".to_string();
		}
		KeyCode::Up | KeyCode::Char('k') => {
			if let InputMode::Select(select) = &mut app.mode {
				select.move_selection(-1);
			}
		}
		KeyCode::Down | KeyCode::Char('j') => {
			if let InputMode::Select(select) = &mut app.mode {
				select.move_selection(1);
			}
		}
		KeyCode::Enter => {
			let select = match std::mem::replace(&mut app.mode, InputMode::Normal) {
				InputMode::Select(select) => select,
				_ => return false,
			};

			match submit_select(select.clone(), agenda, agenda_path) {
				Ok(message) => {
					app.mode = InputMode::Normal;
					app.status = message;
				}
				Err(err) => {
					app.mode = InputMode::Select(select);
					app.status = format!("error: {err}");
				}
			}
		}
		_ => {}
	}

	false
}

fn submit_prompt(
	prompt: PromptState,
	anchor: NaiveDate,
	agenda: &mut Agenda,
	agenda_path: &Path,
) -> Result<PromptOutcome, String> {
	match prompt.kind {
		PromptKind::EventName => {
			let name = required_text("event name", &prompt.input).map_err(|err| err.to_string())?;
			Ok(PromptOutcome::NextPrompt(PromptState::new(
				"Date (YYYY-MM-DD, empty = selected day)",
				PromptKind::EventDate { name },
			)))
		}
		PromptKind::EventDate { name } => {
			let date = if prompt.input.trim().is_empty() {
				anchor.format("%Y-%m-%d").to_string()
			} else {
				prompt.input.trim().to_string()
			};
			parse_date(&date).map_err(|err| err.to_string())?;
			Ok(PromptOutcome::NextPrompt(PromptState::new(
				"Start time (HH:MM)",
				PromptKind::EventStart { name, date },
			)))
		}
		PromptKind::EventStart { name, date } => {
			let start_time = required_text("start time", &prompt.input).map_err(|err| err.to_string())?;
			parse_clock(&start_time).map_err(|err| err.to_string())?;
			Ok(PromptOutcome::NextPrompt(PromptState::new(
				"End time (HH:MM)",
				PromptKind::EventEnd {
					name,
					date,
					start_time,
				},
			)))
		}
		PromptKind::EventEnd {
			name,
			date,
			start_time,
		} => {
			let draft = EventDraft {
				name,
				date,
				start_time,
				end_time: prompt.input.clone(),
			};
			let valid = draft.validate().map_err(|err| err.to_string())?;

			let event = agenda.add_event(valid.date, valid.start_time, valid.end_time, valid.name);
			persist(agenda_path, agenda)?;

			match announce_created(&event, valid.date) {
				Ok(()) => Ok(PromptOutcome::Done(format!("created event: {}", event.name))),
				Err(err) => Ok(PromptOutcome::Done(format!(
					"created event: {} (warning: notification failed: {err})",
					event.name
				))),
			}
		}
	}
}

fn submit_select(select: SelectState, agenda: &mut Agenda, agenda_path: &mut PathBuf) -> Result<String, String> {
	let selected_path = select
		.selected_option()
		.and_then(|option| option.value.clone())
		.map(PathBuf::from)
		.ok_or_else(|| "no agenda selected".to_string())?;
	switch_agenda(agenda, agenda_path, selected_path)
}

fn build_agenda_switch_select(current_path: &Path) -> Result<SelectState, String> {
	let mut paths = recent_agendas(100).map_err(|err| format!("failed to load recent agendas: {err}"))?;
	let current_path = current_path.to_path_buf();
	if !paths.iter().any(|path| path == &current_path) {
		paths.insert(0, current_path.clone());
	}

	let current_value = current_path.display().to_string();
	let options = paths
		.into_iter()
		.map(|path| {
			let value = path.display().to_string();
			let is_current = value == current_value;
			let exists = path.exists();
			let mut label = value.clone();
			if is_current {
				label = format!("* {label}");
			}
			if !exists {
				label = format!("[missing] {label}");
			}

			let style = if is_current {
				Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
			} else if exists {
				Style::default()
			} else {
				Style::default().fg(Color::DarkGray)
			};

			SelectOption {
				label,
				value: Some(value),
				style,
			}
		})
		.collect::<Vec<_>>();

	let mut select = SelectState::new("Switch agenda", options);
	select.selected = select
		.options
		.iter()
		.position(|option| option.value.as_deref() == Some(current_value.as_str()))
		.unwrap_or(0);
	Ok(select)
}

fn switch_agenda(agenda: &mut Agenda, agenda_path: &mut PathBuf, next_path: PathBuf) -> Result<String, String> {
	if &next_path == agenda_path {
		return Ok(format!("already using agenda: {}", agenda_path.display()));
	}

	if !next_path.exists() {
		return Err(format!("agenda does not exist: {}", next_path.display()));
	}

	let next_agenda = load_agenda(&next_path).map_err(|err| err.to_string())?;
	*agenda = next_agenda;
	*agenda_path = next_path;

	match remember_agenda(agenda_path.as_path()) {
		Ok(()) => Ok(format!("switched agenda: {}", agenda_path.display())),
		Err(err) => Ok(format!(
			"switched agenda: {} (warning: failed to store recents: {err})",
			agenda_path.display()
		)),
	}
}

fn persist(path: &Path, agenda: &Agenda) -> Result<(), String> {
	save_agenda(path, agenda).map_err(|err| err.to_string())
}

fn next_view(view: ViewMode) -> ViewMode {
	match view {
		ViewMode::Day => ViewMode::Week,
		ViewMode::Week => ViewMode::Year,
		ViewMode::Year => ViewMode::Day,
	}
}

#[derive(Debug, Clone)]
enum PromptOutcome {
	NextPrompt(PromptState),
	Done(String),
}

#[derive(Debug, Clone)]
struct PromptState {
	title: String,
	input: String,
	kind: PromptKind,
}

impl PromptState {
	fn new(title: impl Into<String>, kind: PromptKind) -> Self {
		Self {
			title: title.into(),
			input: String::new(),
			kind,
		}
	}
}

#[derive(Debug, Clone)]
enum PromptKind {
	EventName,
	EventDate {
		name: String,
	},
	EventStart {
		name: String,
		date: String,
	},
	EventEnd {
		name: String,
		date: String,
		start_time: String,
	},
}

#[derive(Debug, Clone)]
struct SelectState {
	title: String,
	options: Vec<SelectOption>,
	selected: usize,
}

impl SelectState {
	fn new(title: impl Into<String>, options: Vec<SelectOption>) -> Self {
		Self {
			title: title.into(),
			options,
			selected: 0,
		}
	}

	fn move_selection(&mut self, delta: i32) {
		if self.options.is_empty() {
			self.selected = 0;
			return;
		}

		if delta > 0 {
			self.selected = (self.selected + delta as usize).min(self.options.len() - 1);
		} else {
			self.selected = self.selected.saturating_sub(delta.unsigned_abs() as usize);
		}
	}

	fn selected_option(&self) -> Option<&SelectOption> {
		self.options.get(self.selected)
	}
}

#[derive(Debug, Clone)]
struct SelectOption {
	label: String,
	value: Option<String>,
	style: Style,
}

#[derive(Debug, Clone)]
enum InputMode {
	Normal,
	Prompt(PromptState),
	Select(SelectState),
}

#[derive(Debug, Clone)]
struct App {
	view: ViewMode,
	anchor: NaiveDate,
	scroll: u16,
	mode: InputMode,
	status: String,
}

impl App {
	fn new(config: &Config) -> Self {
		Self {
			view: config.default_view,
			anchor: Local::now().date_naive(),
			scroll: 0,
			mode: InputMode::Normal,
			status: "Ready".to_string(),
		}
	}

	fn set_view(&mut self, view: ViewMode) {
		self.view = view;
		self.scroll = 0;
	}

	fn shift_anchor(&mut self, step: i64) {
		self.anchor = navigate(self.anchor, self.view, step);
		self.scroll = 0;
	}

	fn jump_to_today(&mut self) {
		self.anchor = Local::now().date_naive();
		self.scroll = 0;
	}
}

pub fn print_day(agenda: &Agenda, date: NaiveDate) {
	let grid = build_grid(date, ViewMode::Day, agenda, (0, 24), Local::now());
	println!("{}", grid.label);

	let GridBody::Day { slots, .. } = &grid.body else {
		return;
	};
	let mut printed = 0usize;
	for slot in slots {
		for event in &slot.events {
			println!("{} | {}", event.time_span(), event.name);
			printed += 1;
		}
	}
	if printed == 0 {
		println!("no events for this day");
	}
}

pub fn print_week(agenda: &Agenda, anchor: NaiveDate) {
	let grid = build_grid(anchor, ViewMode::Week, agenda, (0, 24), Local::now());
	println!("{}", grid.label);

	let GridBody::Week { days } = &grid.body else {
		return;
	};
	for day in days {
		println!("\n{}", day.date.format("%A %d %B"));
		if day.events.is_empty() {
			println!("  (no events)");
		} else {
			for event in &day.events {
				println!("  {} | {}", event.time_span(), event.name);
			}
		}
	}
}

pub fn print_year(agenda: &Agenda, anchor: NaiveDate) {
	let grid = build_grid(anchor, ViewMode::Year, agenda, (0, 24), Local::now());
	println!("{}", grid.label);

	let GridBody::Year { months } = &grid.body else {
		return;
	};
	for cell in months {
		println!("{:<9} | {} events", cell.month_start.format("%B"), cell.event_count);
	}
}

#[cfg(test)]
mod tests {
	use chrono::{Local, NaiveDate, NaiveTime, TimeZone};

	use crate::domain::{Agenda, ViewMode};

	use super::{build_grid, GridBody};

	fn date(year: i32, month: u32, day: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(year, month, day).expect("test date")
	}

	fn clock(hour: u32, minute: u32) -> NaiveTime {
		NaiveTime::from_hms_opt(hour, minute, 0).expect("test time")
	}

	#[test]
	fn day_grid_filters_slots_by_start_hour() {
		let mut agenda = Agenda::new();
		let day = date(2025, 1, 7);
		agenda.add_event(day, clock(9, 0), clock(10, 0), "Standup".to_string());
		agenda.add_event(day, clock(9, 30), clock(9, 45), "Triage".to_string());
		agenda.add_event(day, clock(14, 0), clock(15, 0), "Review".to_string());

		let now = Local.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap();
		let grid = build_grid(day, ViewMode::Day, &agenda, (0, 24), now);

		let GridBody::Day { slots, now_marker } = grid.body else {
			panic!("expected day grid");
		};
		assert!(now_marker.is_none());
		assert_eq!(slots.len(), 24);
		assert_eq!(slots[9].hour, 9);
		assert_eq!(slots[9].events.len(), 2);
		assert_eq!(slots[9].events[0].name, "Standup");
		assert_eq!(slots[9].events[1].name, "Triage");
		assert_eq!(slots[14].events.len(), 1);
		assert_eq!(slots[8].events.len(), 0);
	}

	#[test]
	fn now_marker_tracks_minutes_within_the_hour() {
		let agenda = Agenda::new();
		let day = date(2025, 1, 7);
		let now = Local.with_ymd_and_hms(2025, 1, 7, 9, 20, 0).unwrap();

		let grid = build_grid(day, ViewMode::Day, &agenda, (0, 24), now);
		let GridBody::Day { now_marker, .. } = grid.body else {
			panic!("expected day grid");
		};

		let marker = now_marker.expect("anchor is today, marker expected");
		assert_eq!(marker.hour, 9);
		assert!((marker.fraction - 20.0 / 60.0).abs() < 1e-9);
	}

	#[test]
	fn now_marker_respects_visible_hour_range() {
		let agenda = Agenda::new();
		let day = date(2025, 1, 7);
		let now = Local.with_ymd_and_hms(2025, 1, 7, 6, 0, 0).unwrap();

		let grid = build_grid(day, ViewMode::Day, &agenda, (8, 18), now);
		let GridBody::Day { slots, now_marker } = grid.body else {
			panic!("expected day grid");
		};
		assert!(now_marker.is_none());
		assert_eq!(slots.first().map(|slot| slot.hour), Some(8));
		assert_eq!(slots.last().map(|slot| slot.hour), Some(17));
	}

	#[test]
	fn week_grid_projects_each_day_bucket() {
		let mut agenda = Agenda::new();
		agenda.add_event(date(2025, 1, 6), clock(9, 0), clock(10, 0), "Kickoff".to_string());
		agenda.add_event(date(2025, 1, 12), clock(18, 0), clock(19, 0), "Dinner".to_string());

		let now = Local.with_ymd_and_hms(2025, 1, 7, 12, 0, 0).unwrap();
		let grid = build_grid(date(2025, 1, 7), ViewMode::Week, &agenda, (0, 24), now);

		assert_eq!(grid.label, "Week of 06 Jan to 12 Jan");
		let GridBody::Week { days } = grid.body else {
			panic!("expected week grid");
		};
		assert_eq!(days.len(), 7);
		assert_eq!(days[0].date, date(2025, 1, 6));
		assert_eq!(days[0].events.len(), 1);
		assert!(days[1].is_today);
		assert_eq!(days[6].events[0].name, "Dinner");
	}

	#[test]
	fn year_grid_counts_events_per_month() {
		let mut agenda = Agenda::new();
		agenda.add_event(date(2025, 3, 1), clock(9, 0), clock(10, 0), "First".to_string());
		agenda.add_event(date(2025, 3, 31), clock(9, 0), clock(10, 0), "Last".to_string());
		agenda.add_event(date(2026, 3, 15), clock(9, 0), clock(10, 0), "Next year".to_string());

		let now = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
		let grid = build_grid(date(2025, 6, 15), ViewMode::Year, &agenda, (0, 24), now);

		assert_eq!(grid.label, "Year 2025");
		let GridBody::Year { months } = grid.body else {
			panic!("expected year grid");
		};
		assert_eq!(months.len(), 12);
		assert_eq!(months[2].event_count, 2);
		assert!(months[2].is_current);
		assert_eq!(months[5].event_count, 0);
	}
}
