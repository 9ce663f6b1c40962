use leptos::prelude::*;

use crate::components::force_graph::scale::string_color;

/// Names containing `query`, ignoring case, in universe order.
pub fn matching_names(staff: &[String], query: &str) -> Vec<String> {
	let query = query.to_lowercase();
	staff
		.iter()
		.filter(|name| name.to_lowercase().contains(&query))
		.cloned()
		.collect()
}

/// Adds `name` to the selection, or removes it if already selected.
pub fn toggle(selected: &mut Vec<String>, name: &str) {
	match selected.iter().position(|n| n == name) {
		Some(pos) => {
			selected.remove(pos);
		}
		None => selected.push(name.to_string()),
	}
}

#[component]
pub fn FilterPanel(staff: Vec<String>, selected: RwSignal<Vec<String>>) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let staff = StoredValue::new(staff);
	let filtered = move || staff.with_value(|all| matching_names(all, &query.get()));

	view! {
		<div class="glass-panel filter">
			<input
				type="text"
				class="search"
				placeholder="Filter Staff..."
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>

			<div class="chips">
				<For
					each=move || selected.get()
					key=|name| name.clone()
					children=move |name| {
						let label = name.clone();
						view! {
							<button class="chip" on:click=move |_| selected.update(|s| toggle(s, &name))>
								{label} " ✕"
							</button>
						}
					}
				/>
			</div>

			<div class="filter-actions">
				<button on:click=move |_| selected.set(staff.get_value())>"Select All"</button>
				<Show when=move || !selected.with(Vec::is_empty)>
					<button class="clear" on:click=move |_| selected.set(Vec::new())>"Clear All"</button>
				</Show>
			</div>

			<div class="names">
				<For
					each=filtered
					key=|name| name.clone()
					children=move |name| {
						let dot = format!("background-color: {}", string_color(&name));
						let (label, key) = (name.clone(), name.clone());
						view! {
							<button
								class="name"
								class:selected=move || selected.with(|s| s.contains(&key))
								on:click=move |_| selected.update(|s| toggle(s, &name))
							>
								<span class="dot" style=dot></span>
								{label}
							</button>
						}
					}
				/>
			</div>
		</div>
	}
}
