//! Tunables for name extraction, timeline generation and snapshot folding.
//!
//! Every struct deserializes with `#[serde(default)]`, so a partial
//! document only overrides the fields it names.

use serde::Deserialize;

/// Rules applied by [`NameExtractor`](super::extract::NameExtractor) to each
/// token of a trailing attribution group.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
	/// Staff that the wildcard token expands to.
	pub core_roster: Vec<String>,
	/// Token meaning "everyone in the core roster", compared case-insensitively.
	pub wildcard: String,
	/// Exact compound tokens expanded to several names.
	pub aliases: Vec<(String, Vec<String>)>,
	/// Tokens that are never people, compared case-insensitively.
	pub deny_list: Vec<String>,
	/// Tokens with at least this many characters are rejected.
	pub max_token_chars: usize,
	/// Tokens containing any of these characters are rejected.
	pub rejected_symbols: Vec<char>,
}

impl Default for ExtractorConfig {
	fn default() -> Self {
		Self {
			core_roster: ["Tung", "Cong", "Anh", "Hang", "Trang", "Tinh"]
				.map(String::from)
				.to_vec(),
			wildcard: "all".into(),
			aliases: vec![("Tinh-2Anh".into(), vec!["Tinh".into(), "Anh".into()])],
			deny_list: [
				"local",
				"others",
				"kbc",
				"pur",
				"nuoa.io",
				"scg cleanergy",
				"etc",
			]
			.map(String::from)
			.to_vec(),
			max_token_chars: 20,
			rejected_symbols: vec!['?', ';'],
		}
	}
}

/// Shape of the generated week sequence and of the raw table's date column.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
	/// Calendar year whose Mondays make up the timeline.
	pub year: i32,
	/// Header of the column holding each row's week date.
	pub date_column: String,
	/// `chrono` format used to render generated week dates.
	pub date_format: String,
}

impl Default for TimelineConfig {
	fn default() -> Self {
		Self {
			year: 2025,
			date_column: "Date".into(),
			date_format: "%Y-%m-%d".into(),
		}
	}
}

/// Display tuning for the snapshot reducer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
	/// Weight added to a node per task mention (edge touches add 1.0).
	pub task_weight: f64,
	/// Parallel links kept per staff pair.
	pub max_parallel_links: usize,
}

impl Default for SnapshotConfig {
	fn default() -> Self {
		Self {
			task_weight: 0.1,
			max_parallel_links: 5,
		}
	}
}

/// Everything the engine can be tuned with.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Name extraction rules.
	pub extractor: ExtractorConfig,
	/// Week generation.
	pub timeline: TimelineConfig,
	/// Snapshot folding.
	pub snapshot: SnapshotConfig,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_document_keeps_other_defaults() {
		let config: EngineConfig =
			serde_json::from_str(r#"{ "timeline": { "year": 2026 }, "snapshot": { "max_parallel_links": 3 } }"#)
				.unwrap();

		assert_eq!(config.timeline.year, 2026);
		assert_eq!(config.timeline.date_column, "Date");
		assert_eq!(config.snapshot.max_parallel_links, 3);
		assert_eq!(config.snapshot.task_weight, 0.1);
		assert_eq!(config.extractor, ExtractorConfig::default());
	}

	#[test]
	fn aliases_deserialize_as_pairs() {
		let config: ExtractorConfig =
			serde_json::from_str(r#"{ "aliases": [["Ann-Bo", ["Ann", "Bo"]]] }"#).unwrap();
		assert_eq!(
			config.aliases,
			vec![("Ann-Bo".to_string(), vec!["Ann".to_string(), "Bo".to_string()])]
		);
		assert_eq!(config.wildcard, "all");
	}
}
