//! Mapping from snapshot quantities to pixels, colours and speeds.

/// Radius of a node with no history.
pub const MIN_RADIUS: f64 = 3.0;
const RADIUS_PER_SQRT_WEIGHT: f64 = 2.4;

/// Node radius in world units. Area grows roughly linearly with weight.
pub fn node_radius(weight: f64) -> f64 {
	MIN_RADIUS + weight.max(0.0).sqrt() * RADIUS_PER_SQRT_WEIGHT
}

/// Bend of the `index`-th of `total` parallel links, as a fraction of the
/// link's length. Links fan out symmetrically around the straight line.
pub fn link_curvature(index: usize, total: usize) -> f64 {
	if total <= 1 {
		return 0.0;
	}
	let (index, total) = (index as f64, total as f64);
	((index - (total - 1.0) / 2.0) / (total / 2.0)) * 0.2
}

/// Link colour, shifting from cyan to pink as a pair collaborates more.
pub fn link_color(total: usize, alpha: f64) -> String {
	let t = (total as f64 / 15.0).min(1.0);
	let (r, g, b) = (
		(t * 255.0).round(),
		(255.0 - t * 235.0).round(),
		(255.0 - t * 108.0).round(),
	);
	format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Speed of the flow animation along a link, in link lengths per frame.
pub fn flow_speed(total: usize) -> f64 {
	0.005 + (total as f64 / 20.0).min(1.0) * 0.015
}

/// Stable hue for a name, so a person keeps their colour across sessions.
pub fn string_color(s: &str) -> String {
	let mut hash: i64 = 0;
	for unit in s.encode_utf16() {
		let shifted = (hash as i32).wrapping_shl(5) as i64;
		hash = unit as i64 + (shifted - hash);
	}
	format!("hsl({}, 75%, 50%)", (hash % 360).abs())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn radius_grows_with_weight() {
		assert_eq!(node_radius(0.0), MIN_RADIUS);
		assert_eq!(node_radius(-1.0), MIN_RADIUS);
		assert!(node_radius(4.0) > node_radius(1.0));
		assert_eq!(node_radius(4.0), MIN_RADIUS + 4.8);
	}

	#[test]
	fn single_links_are_straight() {
		assert_eq!(link_curvature(0, 0), 0.0);
		assert_eq!(link_curvature(0, 1), 0.0);
	}

	#[test]
	fn parallel_links_fan_symmetrically() {
		assert_eq!(link_curvature(0, 2), -0.1);
		assert_eq!(link_curvature(1, 2), 0.1);
		assert_eq!(link_curvature(1, 3), 0.0);
		assert!((link_curvature(0, 3) + link_curvature(2, 3)).abs() < 1e-12);
	}

	#[test]
	fn link_color_saturates() {
		assert_eq!(link_color(0, 0.4), "rgba(0, 255, 255, 0.4)");
		assert_eq!(link_color(15, 0.4), "rgba(255, 20, 147, 0.4)");
		assert_eq!(link_color(90, 0.4), link_color(15, 0.4));
	}

	#[test]
	fn flow_speed_is_bounded() {
		assert_eq!(flow_speed(0), 0.005);
		assert!((flow_speed(20) - 0.02).abs() < 1e-12);
		assert_eq!(flow_speed(200), flow_speed(20));
	}

	#[test]
	fn string_color_matches_known_hues() {
		assert_eq!(string_color(""), "hsl(0, 75%, 50%)");
		assert_eq!(string_color("A"), "hsl(65, 75%, 50%)");
		assert_eq!(string_color("Anh"), "hsl(99, 75%, 50%)");
		assert_eq!(string_color("Cong"), "hsl(181, 75%, 50%)");
		assert_eq!(string_color("Svetlana Ivanova"), "hsl(222, 75%, 50%)");
	}
}
