use leptos::prelude::*;

/// Play/pause toggle and week scrubber bounded by `[0, max_index]`.
#[component]
pub fn TimelineBar(
	index: RwSignal<usize>,
	playing: RwSignal<bool>,
	#[prop(into)] current_date: Signal<String>,
	max_index: usize,
) -> impl IntoView {
	let progress = move || {
		let pct = index.get() as f64 / max_index.max(1) as f64 * 100.0;
		format!(
			"background: linear-gradient(to right, #0df280 0%, #0df280 {pct}%, rgba(255,255,255,0.1) {pct}%, rgba(255,255,255,0.1) 100%)"
		)
	};

	view! {
		<div class="glass-panel timeline">
			<button
				class="play"
				class:playing=move || playing.get()
				on:click=move |_| playing.update(|p| *p = !*p)
			>
				{move || if playing.get() { "❚❚" } else { "▶" }}
			</button>
			<div class="timeline-track">
				<div class="timeline-caption">
					<span>"Timeline"</span>
					<span class="timeline-date">{current_date}</span>
				</div>
				<input
					type="range"
					min="0"
					max=max_index.to_string()
					prop:value=move || index.get().to_string()
					style=progress
					on:input=move |ev| {
						if let Ok(value) = event_target_value(&ev).parse::<usize>() {
							index.set(value.min(max_index));
						}
					}
				/>
			</div>
		</div>
	}
}
