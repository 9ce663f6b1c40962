//! Cumulative graph for a point on the timeline under a staff filter.
//!
//! Snapshots are recomputed from the weeks on every call. Node sizes come
//! from the whole history; the filter only hides nodes and links.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::StaffId;
use super::aggregate::{Connection, canonical_pair};
use super::config::SnapshotConfig;
use super::timeline::WeekEntry;

/// A person in the snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffNode {
	/// Staff identifier.
	pub id: StaffId,
	/// Display size: 1 per link endpoint plus a fraction per task mention.
	pub weight: f64,
	/// Raw number of task mentions.
	pub task_count: usize,
}

/// One co-occurrence between two people. Repeated pairs produce parallel
/// links distinguished by `index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StaffLink {
	/// Lexicographically smaller endpoint.
	pub source: StaffId,
	/// Lexicographically larger endpoint.
	pub target: StaffId,
	/// Rank of this occurrence among the pair's occurrences.
	pub index: usize,
	/// Occurrences of the pair so far, before capping.
	pub total: usize,
}

/// Nodes and links handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphSnapshot {
	/// Visible people, in order of first appearance.
	pub nodes: Vec<StaffNode>,
	/// Visible links, in order of occurrence.
	pub links: Vec<StaffLink>,
}

impl GraphSnapshot {
	/// Whether nothing is visible.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

#[derive(Default)]
struct NodeTally {
	weight: f64,
	task_count: usize,
}

/// Folds `weeks[..=upto]` into a snapshot showing only `selected`.
///
/// `upto` past the end is clamped to the last week. An empty selection
/// yields an empty snapshot.
pub fn reduce<S: AsRef<str>>(
	weeks: &[WeekEntry],
	upto: usize,
	selected: &[S],
	config: &SnapshotConfig,
) -> GraphSnapshot {
	if weeks.is_empty() || selected.is_empty() {
		return GraphSnapshot::default();
	}
	let upto = upto.min(weeks.len() - 1);

	let mut tallies: IndexMap<&str, NodeTally> = IndexMap::new();
	let mut raw_links: Vec<(&str, &str)> = Vec::new();

	for week in &weeks[..=upto] {
		for (source, target) in &week.activity.connections {
			tallies.entry(source.as_str()).or_default().weight += 1.0;
			tallies.entry(target.as_str()).or_default().weight += 1.0;
			raw_links.push((source.as_str(), target.as_str()));
		}
		for (staff, tasks) in &week.activity.tasks {
			let tally = tallies.entry(staff.as_str()).or_default();
			tally.weight += config.task_weight * tasks.len() as f64;
			tally.task_count += tasks.len();
		}
	}

	raw_links.retain(|(s, t)| !s.is_empty() && !t.is_empty() && s != t);

	let mut totals: HashMap<Connection, usize> = HashMap::new();
	for &(s, t) in &raw_links {
		*totals.entry(canonical_pair(s, t)).or_default() += 1;
	}

	let selected: HashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
	let mut seen: HashMap<Connection, usize> = HashMap::new();
	let mut links = Vec::new();
	for (s, t) in raw_links {
		let pair = canonical_pair(s, t);
		let total = totals[&pair];
		let index = seen.entry(pair).or_default();
		let rank = *index;
		*index += 1;

		if rank >= config.max_parallel_links || !selected.contains(s) || !selected.contains(t) {
			continue;
		}
		links.push(StaffLink {
			source: s.to_string(),
			target: t.to_string(),
			index: rank,
			total,
		});
	}

	let nodes: Vec<StaffNode> = tallies
		.into_iter()
		.filter(|(id, _)| selected.contains(id))
		.map(|(id, tally)| StaffNode {
			id: id.to_string(),
			weight: tally.weight,
			task_count: tally.task_count,
		})
		.collect();

	debug!(
		"snapshot at week {upto}: {} nodes, {} links",
		nodes.len(),
		links.len()
	);
	GraphSnapshot { nodes, links }
}
