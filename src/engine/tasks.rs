//! Per-person task history for the details panel.

use indexmap::IndexSet;

use super::timeline::WeekEntry;

/// Every distinct task text mentioning `staff` in `weeks[..=upto]`, in order
/// of first mention. Unknown staff and empty timelines give an empty list.
pub fn lookup(weeks: &[WeekEntry], upto: usize, staff: &str) -> Vec<String> {
	let Some(last) = weeks.len().checked_sub(1) else {
		return Vec::new();
	};
	weeks[..=upto.min(last)]
		.iter()
		.filter_map(|week| week.activity.tasks.get(staff))
		.flatten()
		.cloned()
		.collect::<IndexSet<String>>()
		.into_iter()
		.collect()
}
