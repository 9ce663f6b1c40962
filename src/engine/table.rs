//! The weekly task log as it arrives: a header row and free-text cells.

use csv::{ReaderBuilder, StringRecord};
use indexmap::{IndexMap, IndexSet};

use super::error::LoadError;

/// One spreadsheet row keyed by column header, in header order.
pub type RawRow = IndexMap<String, String>;

/// All rows of the task log in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
	/// Rows as they appeared, blank lines excluded.
	pub rows: Vec<RawRow>,
}

impl RawTable {
	/// Builds a table from rows that were already split into cells.
	pub fn from_rows(rows: impl IntoIterator<Item = RawRow>) -> Self {
		Self {
			rows: rows.into_iter().collect(),
		}
	}

	/// Parses a CSV document whose first record is the header.
	///
	/// Rows shorter than the header only carry the cells they have. A repeated
	/// header is renamed `<name>_<n>` so that no cell is lost.
	pub fn from_csv(text: &str) -> Result<Self, LoadError> {
		let mut reader = ReaderBuilder::new()
			.flexible(true)
			.from_reader(text.as_bytes());
		let headers = unique_headers(reader.headers()?);

		let mut rows = Vec::new();
		for record in reader.records() {
			let record = record?;
			if record.iter().all(str::is_empty) {
				continue;
			}
			let row: RawRow = headers
				.iter()
				.zip(record.iter())
				.map(|(column, cell)| (column.clone(), cell.to_string()))
				.collect();
			rows.push(row);
		}
		Ok(Self { rows })
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Whether the table has no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

/// Suffixes repeated headers with `_1`, `_2`, ... skipping names already taken.
fn unique_headers(headers: &StringRecord) -> Vec<String> {
	let mut seen: IndexSet<String> = IndexSet::with_capacity(headers.len());
	let mut counts: IndexMap<&str, usize> = IndexMap::new();
	for header in headers.iter() {
		let mut name = header.to_string();
		while seen.contains(&name) {
			let count = counts.entry(header).or_insert(0);
			*count += 1;
			name = format!("{header}_{count}");
		}
		seen.insert(name);
	}
	seen.into_iter().collect()
}
