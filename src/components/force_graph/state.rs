use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{MIN_RADIUS, string_color};
use super::types::GraphData;

/// Extra world-space slack around a node when hit testing.
pub const HIT_SLACK: f64 = 4.0;
/// Pointer travel, in screen pixels, that turns a press into a drag.
const CLICK_TOLERANCE: f64 = 3.0;
/// Zoom limits for the wheel.
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
	pub radius: f64,
	pub task_count: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeInfo {
	pub index: usize,
	pub total: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

impl DragState {
	/// Records pointer travel and reports whether the press became a drag.
	pub fn track(&mut self, x: f64, y: f64) -> bool {
		let (dx, dy) = (x - self.start_x, y - self.start_y);
		if (dx * dx + dy * dy).sqrt() > CLICK_TOLERANCE {
			self.moved = true;
		}
		self.moved
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

struct Placement {
	x: f32,
	y: f32,
	is_anchor: bool,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

fn simulation() -> ForceGraph<NodeInfo, EdgeInfo> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.set_data(data);
		state
	}

	/// Replaces the graph. People already on screen keep their position and
	/// pinning; newcomers start on a ring around the origin.
	pub fn set_data(&mut self, data: &GraphData) {
		let mut placed: HashMap<String, Placement> = HashMap::new();
		self.graph.visit_nodes(|node| {
			placed.insert(
				node.data.user_data.id.clone(),
				Placement {
					x: node.x(),
					y: node.y(),
					is_anchor: node.data.is_anchor,
				},
			);
		});

		let mut graph = simulation();
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let color = node.color.clone().unwrap_or_else(|| string_color(&node.id));
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let placement = placed.remove(&node.id).unwrap_or(Placement {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				is_anchor: false,
			});

			let idx = graph.add_node(NodeData {
				x: placement.x,
				y: placement.y,
				mass: 10.0,
				is_anchor: placement.is_anchor,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color,
					radius: node.radius.max(MIN_RADIUS),
					task_count: node.task_count,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							index: link.index,
							total: link.total,
						},
					},
				);
				edges.push((src, tgt));
			}
		}

		self.graph = graph;
		self.edges = edges;
		self.drag = DragState::default();
		self.hover = HoverState::default();
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// radius is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_SLACK {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut position = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				position = Some((node.x(), node.y()));
			}
		});
		position
	}

	fn pin(&mut self, idx: DefaultNodeIdx, at: Option<(f32, f32)>) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				if let Some((x, y)) = at {
					node.data.x = x;
					node.data.y = y;
				}
				node.data.is_anchor = true;
			}
		});
	}

	/// Pointer down at screen `(x, y)`: grabs the person under it, otherwise
	/// starts panning the view.
	pub fn press(&mut self, x: f64, y: f64) {
		match self.node_at_position(x, y) {
			Some(idx) => {
				let (node_x, node_y) = self.node_position(idx).unwrap_or_default();
				self.drag = DragState {
					active: true,
					moved: false,
					node_idx: Some(idx),
					start_x: x,
					start_y: y,
					node_start_x: node_x,
					node_start_y: node_y,
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: x,
					start_y: y,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	/// Pointer motion: hover while idle, otherwise drag the grabbed person or
	/// pan the view.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			if let (Some(idx), true) = (self.drag.node_idx, self.drag.track(x, y)) {
				let k = self.transform.k;
				let to = (
					self.drag.node_start_x + ((x - self.drag.start_x) / k) as f32,
					self.drag.node_start_y + ((y - self.drag.start_y) / k) as f32,
				);
				self.pin(idx, Some(to));
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Pointer up. A press that never became a drag is a click, and the
	/// clicked person's id is returned.
	pub fn release(&mut self) -> Option<String> {
		let mut clicked = None;
		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			if self.drag.moved {
				self.pin(idx, None);
			} else {
				clicked = self.node_id(idx);
			}
		}
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	/// Pointer left the canvas: drop any gesture and the hover.
	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Wheel zoom anchored at screen `(x, y)`.
	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn data(ids: &[&str], links: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: ids
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					label: None,
					color: None,
					radius: 6.0,
					task_count: 1,
				})
				.collect(),
			links: links
				.iter()
				.map(|(s, t)| GraphLink {
					source: s.to_string(),
					target: t.to_string(),
					index: 0,
					total: 1,
				})
				.collect(),
		}
	}

	fn position(state: &ForceGraphState, id: &str) -> Option<(f32, f32)> {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	#[test]
	fn set_data_keeps_positions_of_known_nodes() {
		let mut state = ForceGraphState::new(&data(&["A", "B"], &[("A", "B")]), 800.0, 600.0);
		state.graph.visit_nodes_mut(|node| {
			if node.data.user_data.id == "A" {
				node.data.x = 42.0;
				node.data.y = -7.0;
			}
		});

		state.set_data(&data(&["A", "C"], &[("A", "C")]));

		assert_eq!(position(&state, "A"), Some((42.0, -7.0)));
		assert!(position(&state, "B").is_none());
		assert!(position(&state, "C").is_some());
	}

	#[test]
	fn hit_test_and_ids() {
		let state = ForceGraphState::new(&data(&["A"], &[]), 800.0, 600.0);
		let (x, y) = position(&state, "A").unwrap();
		let (sx, sy) = (x as f64 + state.transform.x, y as f64 + state.transform.y);

		let idx = state.node_at_position(sx, sy).unwrap();
		assert_eq!(state.node_id(idx).as_deref(), Some("A"));
		assert!(state.node_at_position(sx + 50.0, sy).is_none());
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut state = ForceGraphState::new(&data(&["A", "B", "C"], &[("A", "B")]), 800.0, 600.0);
		let idx = state.node_at_position(
			position(&state, "A").unwrap().0 as f64 + state.transform.x,
			position(&state, "A").unwrap().1 as f64 + state.transform.y,
		);
		state.set_hover(idx);

		assert_eq!(state.hover.neighbors.len(), 1);
		assert!(state.has_active_highlight());
	}

	fn screen_position(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let (x, y) = position(state, id).unwrap();
		(
			x as f64 * state.transform.k + state.transform.x,
			y as f64 * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn press_and_release_in_place_clicks_the_person() {
		let mut state = ForceGraphState::new(&data(&["Anh", "Cong"], &[("Anh", "Cong")]), 800.0, 600.0);
		let (x, y) = screen_position(&state, "Cong");

		state.press(x, y);
		state.pointer_move(x + 1.0, y + 1.0);

		assert_eq!(state.release().as_deref(), Some("Cong"));
		assert!(!state.drag.active);
	}

	#[test]
	fn dragging_moves_and_pins_without_clicking() {
		let mut state = ForceGraphState::new(&data(&["Anh"], &[]), 800.0, 600.0);
		let before = position(&state, "Anh").unwrap();
		let (x, y) = screen_position(&state, "Anh");

		state.press(x, y);
		state.pointer_move(x + 40.0, y);

		assert_eq!(state.release(), None);
		assert_eq!(position(&state, "Anh"), Some((before.0 + 40.0, before.1)));
		let mut pinned = false;
		state.graph.visit_nodes(|node| pinned = node.data.is_anchor);
		assert!(pinned);
	}

	#[test]
	fn pressing_empty_space_pans() {
		let mut state = ForceGraphState::new(&data(&["Anh"], &[]), 800.0, 600.0);

		state.press(5.0, 5.0);
		state.pointer_move(25.0, 15.0);

		assert_eq!((state.transform.x, state.transform.y), (420.0, 310.0));
		assert_eq!(state.release(), None);
		assert!(!state.pan.active);
	}

	#[test]
	fn zoom_is_clamped_and_keeps_the_anchor_fixed() {
		let mut state = ForceGraphState::new(&data(&["Anh"], &[]), 800.0, 600.0);
		let anchor = state.screen_to_graph(100.0, 100.0);

		state.zoom(100.0, 100.0, -1.0);
		let (ax, ay) = state.screen_to_graph(100.0, 100.0);
		assert!((ax - anchor.0).abs() < 1e-9 && (ay - anchor.1).abs() < 1e-9);

		for _ in 0..100 {
			state.zoom(100.0, 100.0, 1.0);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn small_moves_stay_clicks() {
		let mut drag = DragState {
			start_x: 10.0,
			start_y: 10.0,
			..DragState::default()
		};
		assert!(!drag.track(11.0, 12.0));
		assert!(drag.track(20.0, 10.0));
		assert!(drag.track(10.0, 10.0));
	}
}
