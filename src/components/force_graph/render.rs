use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::avatars;
use super::scale::{flow_speed, link_color, link_curvature};
use super::state::{ForceGraphState, NodeInfo};

const FRAMES_PER_SECOND: f64 = 60.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#050a08");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	draw_tooltip(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap) = (1.5 / k, 8.0 / k, 4.0 / k);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let info = edge.user_data;

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: all edges at base (0.4), t=1: highlighted at 0.8, others at 0.08
		let (alpha, width) = if is_highlighted {
			(0.4 + 0.4 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.4 - 0.32 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&link_color(info.total, alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		let speed = flow_speed(info.total) * dist * FRAMES_PER_SECOND;
		ctx.set_line_dash_offset(-(state.flow_time * speed) % (dash + gap));

		let (ux, uy) = (dx / dist, dy / dist);
		let bend = link_curvature(info.index, info.total) * dist;
		let (cx, cy) = ((x1 + x2) / 2.0 - uy * bend, (y1 + y2) / 2.0 + ux * bend);
		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);

		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.quadratic_curve_to(cx, cy, x2 - ux * r2, y2 - uy * r2);
		ctx.stroke();
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn fill_node(ctx: &CanvasRenderingContext2d, info: &NodeInfo, x: f64, y: f64, radius: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match avatars::loaded(&info.id) {
		Some(image) => {
			ctx.save();
			ctx.clip();
			let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
				&image,
				x - radius,
				y - radius,
				radius * 2.0,
				radius * 2.0,
			);
			ctx.restore();
		}
		None => {
			ctx.set_fill_style_str(&info.color);
			ctx.fill();
		}
	}
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64, k: f64) {
	ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
	let _ = ctx.fill_text(label, x, y);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, info.radius * (1.0 - 0.15 * t));

		ctx.set_global_alpha(0.9 * alpha);
		fill_node(ctx, info, x, y, radius);
		ctx.set_global_alpha(1.0);

		if let Some(label) = &info.label {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.8));
			draw_label(ctx, label, x + radius + 3.0, y + 3.0, k);
		}
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(info.radius * (1.0 + 0.35 * t), info.radius * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(info.radius * (1.0 + 0.2 * t), info.radius * (1.4 + 0.6 * t))
		} else {
			(info.radius, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 255, 230, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		fill_node(ctx, info, x, y, radius);

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(13, 242, 128, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if let Some(label) = &info.label {
			ctx.set_fill_style_str("white");
			draw_label(ctx, label, x + radius + 3.0, y + 3.0, k);
		}
	});
}

fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(idx) = state.hover.node else {
		return;
	};
	let k = state.transform.k;
	state.graph.visit_nodes(|node| {
		if node.index() != idx {
			return;
		}
		let info = &node.data.user_data;
		let text = format!("{}: {} Tasks", info.id, info.task_count);
		let (x, y) = (node.x() as f64, node.y() as f64 - info.radius - 8.0 / k);
		let font_px = 11.0 / k.max(0.5);

		ctx.set_font(&format!("{font_px}px monospace"));
		let width = ctx.measure_text(&text).map(|m| m.width()).unwrap_or(0.0);
		let pad = 4.0 / k;
		ctx.set_fill_style_str("rgba(0, 0, 0, 0.75)");
		ctx.fill_rect(
			x - width / 2.0 - pad,
			y - font_px - pad,
			width + pad * 2.0,
			font_px + pad * 2.0,
		);
		ctx.set_fill_style_str("#0df280");
		let _ = ctx.fill_text(&text, x - width / 2.0, y);
	});
}
