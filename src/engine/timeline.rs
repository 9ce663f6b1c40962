//! Dense week-by-week history built from the raw task log.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Days, NaiveDate};
use log::{debug, info, warn};

use super::aggregate::{Activity, aggregate};
use super::config::{EngineConfig, SnapshotConfig, TimelineConfig};
use super::error::LoadError;
use super::extract::NameExtractor;
use super::snapshot::{GraphSnapshot, reduce};
use super::table::{RawRow, RawTable};
use super::tasks::lookup;
use super::StaffId;

/// One calendar week of the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct WeekEntry {
	/// Monday that starts the week.
	pub date: NaiveDate,
	/// `date` rendered with the configured format, as matched against the table.
	pub label: String,
	/// Co-occurrences and task mentions of the week, empty when no row matched.
	pub activity: Activity,
}

/// Every Monday of `year`, in order.
pub fn week_starts(year: i32) -> Result<Vec<NaiveDate>, LoadError> {
	let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(LoadError::InvalidYear(year))?;
	let to_monday = (7 - jan_first.weekday().num_days_from_monday()) % 7;
	let mut day = jan_first
		.checked_add_days(Days::new(to_monday.into()))
		.ok_or(LoadError::InvalidYear(year))?;

	let mut weeks = Vec::with_capacity(53);
	while day.year() == year {
		weeks.push(day);
		match day.checked_add_days(Days::new(7)) {
			Some(next) => day = next,
			None => break,
		}
	}
	Ok(weeks)
}

/// The read-only history every snapshot and task lookup is derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
	weeks: Vec<WeekEntry>,
	staff: Vec<StaffId>,
	snapshot_config: SnapshotConfig,
}

impl Timeline {
	/// Parses `text` as CSV and builds the timeline from it.
	pub fn from_csv(text: &str, config: &EngineConfig) -> Result<Self, LoadError> {
		Self::build(&RawTable::from_csv(text)?, config)
	}

	/// Builds one [`WeekEntry`] per Monday of the configured year.
	///
	/// Rows are matched to weeks by exact comparison of their date cell with
	/// the formatted week date. Rows without a date are skipped, and when two
	/// rows carry the same date the later one wins.
	pub fn build(table: &RawTable, config: &EngineConfig) -> Result<Self, LoadError> {
		let TimelineConfig {
			year,
			date_column,
			date_format,
		} = &config.timeline;
		let extractor = NameExtractor::new(config.extractor.clone());

		if !table.is_empty() && table.rows.iter().all(|row| !row.contains_key(date_column)) {
			warn!("no row has a {date_column:?} column, timeline will be empty");
		}

		let mut by_date: HashMap<&str, &RawRow> = HashMap::new();
		let mut undated = 0usize;
		for row in &table.rows {
			match row.get(date_column).map(String::as_str) {
				Some(date) if !date.is_empty() => {
					by_date.insert(date, row);
				}
				_ => undated += 1,
			}
		}
		if undated > 0 {
			warn!("skipped {undated} rows without a date");
		}

		let mut staff = BTreeSet::new();
		let mut matched = 0usize;
		let weeks: Vec<WeekEntry> = week_starts(*year)?
			.into_iter()
			.map(|date| {
				let label = date.format(date_format).to_string();
				let activity = match by_date.get(label.as_str()) {
					Some(row) => {
						matched += 1;
						aggregate(&extractor, row, date_column)
					}
					None => Activity::default(),
				};
				staff.extend(activity.tasks.keys().cloned());
				WeekEntry {
					date,
					label,
					activity,
				}
			})
			.collect();

		if matched < by_date.len() {
			debug!(
				"{} dated rows did not match a week of {year}",
				by_date.len() - matched
			);
		}
		info!(
			"timeline built: {} weeks, {matched} populated, {} staff",
			weeks.len(),
			staff.len()
		);

		Ok(Self {
			weeks,
			staff: staff.into_iter().collect(),
			snapshot_config: config.snapshot.clone(),
		})
	}

	/// All weeks in order.
	pub fn weeks(&self) -> &[WeekEntry] {
		&self.weeks
	}

	/// Sorted union of everyone mentioned in any week.
	pub fn staff(&self) -> &[StaffId] {
		&self.staff
	}

	/// Week labels in timeline order.
	pub fn dates(&self) -> Vec<&str> {
		self.weeks.iter().map(|w| w.label.as_str()).collect()
	}

	/// Label of the week at `index`, if any.
	pub fn date_at(&self, index: usize) -> Option<&str> {
		self.weeks.get(index).map(|w| w.label.as_str())
	}

	/// Number of weeks.
	pub fn len(&self) -> usize {
		self.weeks.len()
	}

	/// Whether the timeline has no weeks.
	pub fn is_empty(&self) -> bool {
		self.weeks.is_empty()
	}

	/// Highest valid cumulative index, 0 for an empty timeline.
	pub fn last_index(&self) -> usize {
		self.weeks.len().saturating_sub(1)
	}

	/// Graph of everything up to and including week `upto`, restricted to `selected`.
	pub fn snapshot<S: AsRef<str>>(&self, upto: usize, selected: &[S]) -> GraphSnapshot {
		reduce(&self.weeks, upto, selected, &self.snapshot_config)
	}

	/// Distinct tasks mentioning `staff` up to and including week `upto`.
	pub fn tasks_for(&self, staff: &str, upto: usize) -> Vec<String> {
		lookup(&self.weeks, upto, staff)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Mutex, Once};

	use super::*;

	fn config() -> EngineConfig {
		EngineConfig::default()
	}

	/// Keeps every record logged by any test in this binary.
	struct Capture(Mutex<Vec<(log::Level, String)>>);

	impl log::Log for Capture {
		fn enabled(&self, _: &log::Metadata) -> bool {
			true
		}

		fn log(&self, record: &log::Record) {
			if let Ok(mut records) = self.0.lock() {
				records.push((record.level(), record.args().to_string()));
			}
		}

		fn flush(&self) {}
	}

	static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

	fn captured() -> &'static Capture {
		static INIT: Once = Once::new();
		INIT.call_once(|| {
			if log::set_logger(&CAPTURE).is_ok() {
				log::set_max_level(log::LevelFilter::Trace);
			}
		});
		&CAPTURE
	}

	#[test]
	fn weeks_of_2025_start_on_first_monday() {
		let weeks = week_starts(2025).unwrap();

		assert_eq!(weeks.len(), 52);
		assert_eq!(weeks[0], NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
		assert_eq!(weeks[51], NaiveDate::from_ymd_opt(2025, 12, 29).unwrap());
		assert!(weeks.iter().all(|d| d.weekday() == chrono::Weekday::Mon));
		assert!(weeks.windows(2).all(|w| (w[1] - w[0]).num_days() == 7));
	}

	#[test]
	fn year_starting_on_monday_includes_jan_first() {
		let weeks = week_starts(2024).unwrap();
		assert_eq!(weeks[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
		assert_eq!(weeks.len(), 53);
	}

	#[test]
	fn out_of_range_year_is_rejected() {
		assert!(matches!(week_starts(i32::MAX), Err(LoadError::InvalidYear(_))));
	}

	#[test]
	fn timeline_is_dense_regardless_of_data() {
		let timeline = Timeline::from_csv("Date,Ops\n2025-03-03,- Pump (Anh/Cong)\n", &config()).unwrap();

		assert_eq!(timeline.len(), 52);
		assert_eq!(timeline.date_at(0), Some("2025-01-06"));
		let populated: Vec<_> = timeline
			.weeks()
			.iter()
			.filter(|w| !w.activity.is_empty())
			.map(|w| w.label.as_str())
			.collect();
		assert_eq!(populated, vec!["2025-03-03"]);
	}

	#[test]
	fn undated_and_malformed_rows_are_skipped() {
		let text = "Date,Ops\n,- Lost (Anh/Cong)\n03/03/2025,- Wrong format (Bob)\n2025-01-07,- Tuesday (Marc)\n2025-01-13,- Kept (Hang)\n";
		let timeline = Timeline::from_csv(text, &config()).unwrap();

		assert_eq!(timeline.staff(), ["Hang"]);
		assert_eq!(timeline.weeks()[1].activity.tasks["Hang"], vec!["- Kept (Hang)"]);
	}

	#[test]
	fn dropped_undated_rows_are_a_warning() {
		let capture = captured();
		Timeline::from_csv("Date,Ops\n,- Lost (Anh)\n,- Lost (Cong)\n,- Lost (Hang)\n", &config()).unwrap();

		let records = capture.0.lock().unwrap();
		assert!(
			records
				.iter()
				.any(|(level, message)| *level == log::Level::Warn && message == "skipped 3 rows without a date")
		);
	}

	#[test]
	fn repeated_column_headers_all_contribute() {
		let text = "Date,Ops,Ops\n2025-01-06,- A (Anh/Cong),- B (Marc)\n";
		let timeline = Timeline::from_csv(text, &config()).unwrap();
		let activity = &timeline.weeks()[0].activity;

		assert_eq!(timeline.staff(), ["Anh", "Cong", "Marc"]);
		assert_eq!(activity.connections, vec![("Anh".to_string(), "Cong".to_string())]);
		assert_eq!(activity.tasks["Marc"], vec!["- B (Marc)"]);
	}

	#[test]
	fn later_row_wins_for_a_repeated_date() {
		let text = "Date,Ops\n2025-01-06,- First (Anh)\n2025-01-06,- Second (Bob)\n";
		let timeline = Timeline::from_csv(text, &config()).unwrap();

		assert_eq!(timeline.staff(), ["Bob"]);
	}

	#[test]
	fn staff_universe_is_sorted_and_unique() {
		let text = "Date,Ops,Sales\n2025-01-06,- A (Tung/Bob),- B (anh)\n2025-01-13,- C (Bob/Anh),\n";
		let timeline = Timeline::from_csv(text, &config()).unwrap();

		assert_eq!(timeline.staff(), ["Anh", "Bob", "Tung", "anh"]);
	}

	#[test]
	fn missing_date_column_gives_empty_weeks() {
		let timeline = Timeline::from_csv("When,Ops\n2025-01-06,- A (Anh/Bob)\n", &config()).unwrap();

		assert_eq!(timeline.len(), 52);
		assert!(timeline.staff().is_empty());
		assert!(timeline.weeks().iter().all(|w| w.activity.is_empty()));
	}

	#[test]
	fn custom_year_and_column() {
		let mut config = config();
		config.timeline.year = 2026;
		config.timeline.date_column = "Week".into();
		let timeline = Timeline::from_csv("Week,Ops\n2026-01-05,- A (Anh/Bob)\n", &config).unwrap();

		assert_eq!(timeline.date_at(0), Some("2026-01-05"));
		assert_eq!(timeline.staff(), ["Anh", "Bob"]);
		assert_eq!(timeline.weeks()[0].activity.connections.len(), 1);
	}

	#[test]
	fn empty_table_still_has_weeks() {
		let timeline = Timeline::build(&RawTable::default(), &config()).unwrap();
		assert_eq!(timeline.last_index(), 51);
		assert_eq!(timeline.dates().len(), 52);
	}
}
