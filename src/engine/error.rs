//! Errors raised while loading the task log.

use thiserror::Error;

/// Failure to turn a raw document into a [`Timeline`](super::Timeline).
///
/// Everything past loading is total: bad dates, unattributed cells and
/// rejected names are dropped silently rather than reported here.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The CSV document could not be tokenized.
	#[error("malformed CSV: {0}")]
	Csv(#[from] csv::Error),

	/// The configured year has no representable first Monday.
	#[error("year {0} is outside the supported calendar range")]
	InvalidYear(i32),
}
