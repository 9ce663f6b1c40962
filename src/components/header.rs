use leptos::prelude::*;

/// Title card with live node and link counts.
#[component]
pub fn Header(#[prop(into)] nodes: Signal<usize>, #[prop(into)] links: Signal<usize>) -> impl IntoView {
	let (logo_error, set_logo_error) = signal(false);

	view! {
		<div class="glass-panel header">
			<div class="header-title">
				<Show
					when=move || !logo_error.get()
					fallback=|| view! { <span class="brand">"Neural Sync"</span> }
				>
					<img src="/logo.png" class="logo" alt="Neural Sync" on:error=move |_| set_logo_error.set(true) />
				</Show>
				<div class="stats">
					<p title="Node size correlates with the total number of tasks completed.">
						"Nodes: " {nodes}
					</p>
					<p title="Link colour and flow speed correlate with connection frequency.">
						"Links: " {links}
					</p>
				</div>
			</div>
			<p class="caption">"Network HUD"</p>
		</div>
	}
}
