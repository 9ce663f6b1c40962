use leptos::prelude::*;

use crate::components::force_graph::scale::string_color;

/// The person whose tasks are shown in the side panel.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetails {
	pub id: String,
	pub date: String,
	pub tasks: Vec<String>,
}

/// Task text without the spreadsheet's `- ` bullet markers.
pub fn display_task(task: &str) -> String {
	task.replace("- ", "").trim().to_string()
}

#[component]
pub fn DetailsPanel(details: NodeDetails, on_close: Callback<()>) -> impl IntoView {
	let color = format!("color: {}", string_color(&details.id));
	let count = details.tasks.len();

	view! {
		<div class="glass-panel details">
			<div class="details-head">
				<div>
					<p class="caption">"Personnel Record"</p>
					<h2 style=color>{details.id}</h2>
					<p class="caption">{format!("{count} tasks up to {}", details.date)}</p>
				</div>
				<button class="close" on:click=move |_| on_close.run(())>"✕"</button>
			</div>
			<div class="details-body">
				<h3>"Validated Skills / Tasks"</h3>
				{details
					.tasks
					.iter()
					.map(|task| view! { <div class="task">{display_task(task)}</div> })
					.collect_view()}
			</div>
		</div>
	}
}
