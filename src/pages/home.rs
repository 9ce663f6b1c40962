use std::time::Duration;

use leptos::prelude::*;
use log::info;

use crate::components::details_panel::{DetailsPanel, NodeDetails};
use crate::components::filter_panel::FilterPanel;
use crate::components::force_graph::{ForceGraphCanvas, GraphData, preload_avatars};
use crate::components::header::Header;
use crate::components::timeline_bar::TimelineBar;
use crate::engine::{EngineConfig, Timeline};

/// Weekly task log bundled with the app.
const RAW_DATA: &str = include_str!("../../assets/raw_data.csv");

const DEFAULT_SELECTION: [&str; 5] = ["Anh", "Cong", "Hang", "Tinh", "Trang"];
const PLAY_STEP: Duration = Duration::from_millis(500);

/// Next week for the play loop, wrapping to the start after the last one.
fn next_index(current: usize, len: usize) -> usize {
	if current + 1 >= len { 0 } else { current + 1 }
}

#[component]
fn Dashboard(timeline: Timeline) -> impl IntoView {
	preload_avatars(timeline.staff());
	let max_index = timeline.last_index();
	let len = timeline.len();
	let staff = timeline.staff().to_vec();
	let timeline = StoredValue::new(timeline);

	let index = RwSignal::new(0usize);
	let playing = RwSignal::new(false);
	let selected = RwSignal::new(DEFAULT_SELECTION.map(String::from).to_vec());
	let details = RwSignal::new(None::<NodeDetails>);

	let snapshot = Memo::new(move |_| {
		selected.with(|selected| timeline.with_value(|t| t.snapshot(index.get(), selected)))
	});
	let graph_data = Signal::derive(move || snapshot.with(|s| GraphData::from(s)));
	let current_date = Signal::derive(move || {
		timeline.with_value(|t| t.date_at(index.get()).unwrap_or("Loading...").to_string())
	});

	let interval = StoredValue::new(None::<IntervalHandle>);
	Effect::new(move |_| {
		if let Some(handle) = interval.get_value() {
			handle.clear();
		}
		let handle = if playing.get() {
			set_interval_with_handle(
				move || index.update(|i| *i = next_index(*i, len)),
				PLAY_STEP,
			)
			.ok()
		} else {
			None
		};
		interval.set_value(handle);
	});
	on_cleanup(move || {
		if let Some(handle) = interval.get_value() {
			handle.clear();
		}
	});

	let on_node_click = Callback::new(move |id: String| {
		let upto = index.get_untracked();
		let (tasks, date) = timeline.with_value(|t| {
			(
				t.tasks_for(&id, upto),
				t.date_at(upto).unwrap_or_default().to_string(),
			)
		});
		info!("selected {id}: {} tasks up to {date}", tasks.len());
		details.set(Some(NodeDetails { id, date, tasks }));
	});
	let on_close = Callback::new(move |_: ()| details.set(None));

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data fullscreen=true on_node_click=on_node_click />
			<div class="graph-overlay">
				<Header
					nodes=Signal::derive(move || snapshot.with(|s| s.nodes.len()))
					links=Signal::derive(move || snapshot.with(|s| s.links.len()))
				/>
				<FilterPanel staff=staff selected=selected />
			</div>
			<div class="timeline-dock">
				<TimelineBar index=index playing=playing current_date=current_date max_index=max_index />
			</div>
			{move || details.get().map(|details| view! { <DetailsPanel details=details on_close=on_close /> })}
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let timeline = Timeline::from_csv(RAW_DATA, &EngineConfig::default());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{timeline.map(|timeline| view! { <Dashboard timeline=timeline /> })}
		</ErrorBoundary>
	}
}
