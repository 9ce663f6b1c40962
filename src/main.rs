//! Browser entry point.

use leptos::prelude::*;
use neural_sync::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
