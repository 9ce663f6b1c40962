use crate::engine::GraphSnapshot;

use super::scale::{node_radius, string_color};

/// One person as drawn on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Staff id; also the avatar key.
	pub id: String,
	/// Text drawn beside the node, nothing when absent.
	pub label: Option<String>,
	/// Fill used when no avatar is loaded. Derived from the id when absent.
	pub color: Option<String>,
	/// World-space radius, grows with the person's weight.
	pub radius: f64,
	/// Task mentions so far.
	pub task_count: usize,
}

/// One collaboration between two people.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Lexicographically smaller endpoint.
	pub source: String,
	/// Lexicographically larger endpoint.
	pub target: String,
	/// Position among the drawn links of the same pair, from 0.
	pub index: usize,
	/// Times the pair worked together, before capping.
	pub total: usize,
}

/// Everything the canvas draws for one snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// People, in snapshot order.
	pub nodes: Vec<GraphNode>,
	/// Links; a pair may appear several times.
	pub links: Vec<GraphLink>,
}

impl From<&GraphSnapshot> for GraphData {
	fn from(snapshot: &GraphSnapshot) -> Self {
		let nodes = snapshot
			.nodes
			.iter()
			.map(|node| GraphNode {
				id: node.id.clone(),
				label: Some(node.id.clone()),
				color: Some(string_color(&node.id)),
				radius: node_radius(node.weight),
				task_count: node.task_count,
			})
			.collect();
		let links = snapshot
			.links
			.iter()
			.map(|link| GraphLink {
				source: link.source.clone(),
				target: link.target.clone(),
				index: link.index,
				total: link.total,
			})
			.collect();
		Self { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::{StaffLink, StaffNode};

	#[test]
	fn snapshot_becomes_drawable_data() {
		let snapshot = GraphSnapshot {
			nodes: vec![
				StaffNode {
					id: "Anh".into(),
					weight: 2.1,
					task_count: 1,
				},
				StaffNode {
					id: "Cong".into(),
					weight: 1.0,
					task_count: 0,
				},
			],
			links: vec![StaffLink {
				source: "Anh".into(),
				target: "Cong".into(),
				index: 0,
				total: 1,
			}],
		};

		let data = GraphData::from(&snapshot);

		assert_eq!(data.nodes[0].label.as_deref(), Some("Anh"));
		assert_eq!(data.nodes[0].color, Some(string_color("Anh")));
		assert_eq!(data.nodes[0].radius, node_radius(2.1));
		assert!(data.nodes[0].radius > data.nodes[1].radius);
		assert_eq!(data.nodes[1].task_count, 0);
		assert_eq!(
			data.links,
			vec![GraphLink {
				source: "Anh".into(),
				target: "Cong".into(),
				index: 0,
				total: 1,
			}]
		);
	}
}
