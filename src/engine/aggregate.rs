//! Folds one week's row into co-occurrence pairs and per-person task lists.

use indexmap::IndexMap;

use super::StaffId;
use super::extract::NameExtractor;
use super::table::RawRow;

/// An unordered staff pair, stored with the lexicographically smaller name first.
pub type Connection = (StaffId, StaffId);

/// What one row of the task log says about who worked with whom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Activity {
	/// One entry per pair co-mentioned in a cell, in cell order then
	/// combination order.
	pub connections: Vec<Connection>,
	/// Raw cell text per mentioned person, duplicates kept.
	pub tasks: IndexMap<StaffId, Vec<String>>,
}

impl Activity {
	/// Whether the row contributed neither pairs nor tasks.
	pub fn is_empty(&self) -> bool {
		self.connections.is_empty() && self.tasks.is_empty()
	}
}

/// Extracts every non-date cell of `row`.
pub fn aggregate(extractor: &NameExtractor, row: &RawRow, date_column: &str) -> Activity {
	let mut activity = Activity::default();

	for (column, cell) in row {
		if column == date_column || cell.is_empty() {
			continue;
		}
		let names: Vec<StaffId> = extractor.extract(cell).into_iter().collect();

		for name in &names {
			activity
				.tasks
				.entry(name.clone())
				.or_default()
				.push(cell.clone());
		}
		for (i, a) in names.iter().enumerate() {
			for b in &names[i + 1..] {
				activity.connections.push(canonical_pair(a, b));
			}
		}
	}
	activity
}

pub(crate) fn canonical_pair(a: &str, b: &str) -> Connection {
	if a <= b {
		(a.to_string(), b.to_string())
	} else {
		(b.to_string(), a.to_string())
	}
}
