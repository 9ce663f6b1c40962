//! Per-person avatar images, loaded once and kept for the session.

use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

/// Lowercased names whose image file is spelled differently.
const IMAGE_NAMES: &[(&str, &str)] = &[
	("aiden", "Aiden"),
	("anh", "Anh"),
	("cong", "Cong"),
	("hang", "Hang"),
	("marc", "Marc"),
	("michelle", "Michelle"),
	("rob", "Rob"),
	("tinh", "Tinh"),
	("trang", "Trang"),
	("tung", "Tung"),
	("alnie", "Alnie"),
	("bob", "Bob"),
	("sve", "Svetlana"),
	("svetlana", "Svetlana"),
];

thread_local! {
	static CACHE: RefCell<HashMap<String, HtmlImageElement>> = RefCell::new(HashMap::new());
}

fn title_case(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}

/// Server path of a person's avatar.
pub fn staff_image_path(name: &str) -> String {
	let key = name.trim().to_lowercase();
	match IMAGE_NAMES.iter().find(|(alias, _)| *alias == key) {
		Some((_, file)) => format!("/staff/{file}.webp"),
		None => format!("/staff/{}.webp", title_case(name)),
	}
}

/// Starts loading avatars for everyone not already cached.
pub fn preload<S: AsRef<str>>(staff: &[S]) {
	CACHE.with(|cache| {
		let mut cache = cache.borrow_mut();
		for name in staff.iter().map(AsRef::as_ref) {
			if cache.contains_key(name) {
				continue;
			}
			let Ok(image) = HtmlImageElement::new() else {
				continue;
			};
			let path = staff_image_path(name);
			let on_error = Closure::<dyn FnMut()>::new({
				let (name, path) = (name.to_string(), path.clone());
				move || warn!("avatar for {name} failed to load from {path}")
			});
			image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
			on_error.forget();
			image.set_src(&path);
			cache.insert(name.to_string(), image);
		}
	});
}

/// The avatar for `id` once it has fully loaded.
pub fn loaded(id: &str) -> Option<HtmlImageElement> {
	CACHE.with(|cache| {
		cache
			.borrow()
			.get(id)
			.filter(|image| image.complete() && image.natural_width() > 0)
			.cloned()
	})
}
