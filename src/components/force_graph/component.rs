use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;

type Shared<T> = Rc<RefCell<Option<T>>>;
type FrameCallback = Closure<dyn FnMut()>;

/// Seconds advanced per animation frame.
const FRAME_DT: f32 = 0.016;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

/// Mouse position relative to the canvas' top-left corner.
fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn request_frame(callback: &Shared<FrameCallback>) {
	if let (Some(window), Some(cb)) = (web_sys::window(), callback.borrow().as_ref()) {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// The staff network on a canvas. `data` may change at any time (the timeline
/// scrubber, the filter); people who stay keep their place in the layout.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	/// Receives the id of a person clicked without dragging.
	#[prop(optional, into)]
	on_node_click: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let network: Shared<ForceGraphState> = Rc::new(RefCell::new(None));
	let frame: Shared<FrameCallback> = Rc::new(RefCell::new(None));
	let on_resize: Shared<FrameCallback> = Rc::new(RefCell::new(None));

	let (network_mount, frame_mount) = (network.clone(), frame.clone());
	Effect::new(move |_| {
		let (Some(canvas), Some(window)) = (canvas_ref.get(), web_sys::window()) else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = match (fullscreen, width, height) {
			(true, ..) => window_size(&window).unwrap_or_else(|| parent_size(&canvas)),
			(false, w, h) => {
				let (pw, ph) = parent_size(&canvas);
				(w.unwrap_or(pw), h.unwrap_or(ph))
			}
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("canvas has no 2d context, staff network not drawn");
			return;
		};
		*network_mount.borrow_mut() = Some(ForceGraphState::new(&data.get_untracked(), w, h));

		if fullscreen {
			let (network_resize, canvas_resize) = (network_mount.clone(), canvas.clone());
			*on_resize.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut net) = *network_resize.borrow_mut() {
					net.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *on_resize.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (network_frame, next_frame) = (network_mount.clone(), frame_mount.clone());
		*frame_mount.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut net) = *network_frame.borrow_mut() {
				if net.animation_running {
					net.tick(FRAME_DT);
				}
				render::render(net, &ctx);
			}
			request_frame(&next_frame);
		}));
		request_frame(&frame_mount);
	});

	// A new week or selection swaps the graph under the running animation.
	let network_sync = network.clone();
	Effect::new(move |_| {
		let data = data.get();
		if let Some(ref mut net) = *network_sync.borrow_mut() {
			net.set_data(&data);
		}
	});

	let network_down = network.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(net)) = (pointer(canvas_ref, &ev), network_down.borrow_mut().as_mut()) {
			net.press(x, y);
		}
	};

	let network_move = network.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(net)) = (pointer(canvas_ref, &ev), network_move.borrow_mut().as_mut()) {
			net.pointer_move(x, y);
		}
	};

	let network_up = network.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = network_up.borrow_mut().as_mut().and_then(ForceGraphState::release);
		// The borrow is released before the page reacts to the click.
		if let (Some(id), Some(cb)) = (clicked, on_node_click) {
			cb.run(id);
		}
	};

	let network_leave = network.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(net) = network_leave.borrow_mut().as_mut() {
			net.leave();
		}
	};

	let network_wheel = network.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let (Some((x, y)), Some(net)) = (pointer(canvas_ref, &ev), network_wheel.borrow_mut().as_mut()) {
			net.zoom(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas staff-network"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
