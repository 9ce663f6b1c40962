//! Turns one cell of the task log into the staff it is attributed to.
//!
//! Attribution is the parenthesized group that ends the cell, e.g.
//! `"- Fixed pump (Anh/Cong)"`. Earlier groups are asides and are ignored.

use std::collections::HashSet;
use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;

use super::StaffId;
use super::config::ExtractorConfig;

fn trailing_group() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"\(([^)]+)\)\s*$").expect("trailing group pattern"))
}

/// Validating name extractor built from an [`ExtractorConfig`].
#[derive(Clone, Debug)]
pub struct NameExtractor {
	config: ExtractorConfig,
	deny: HashSet<String>,
}

impl Default for NameExtractor {
	fn default() -> Self {
		Self::new(ExtractorConfig::default())
	}
}

impl NameExtractor {
	/// Creates an extractor for the given rules.
	pub fn new(config: ExtractorConfig) -> Self {
		let deny = config.deny_list.iter().map(|t| t.to_lowercase()).collect();
		Self { config, deny }
	}

	/// Returns the staff named in the cell's trailing attribution, in the
	/// order they were first mentioned.
	pub fn extract(&self, cell: &str) -> IndexSet<StaffId> {
		let mut names = IndexSet::new();
		let Some(group) = trailing_group().captures(cell).and_then(|c| c.get(1)) else {
			return names;
		};

		for token in group.as_str().split('/') {
			let token = token.trim();

			if let Some((_, expansion)) = self.config.aliases.iter().find(|(alias, _)| alias == token) {
				names.extend(expansion.iter().cloned());
				continue;
			}
			if token.to_lowercase() == self.config.wildcard.to_lowercase() {
				names.extend(self.config.core_roster.iter().cloned());
				continue;
			}
			if self.is_rejected(token) {
				continue;
			}
			names.insert(token.to_string());
		}
		names
	}

	fn is_rejected(&self, token: &str) -> bool {
		token.is_empty()
			|| self.deny.contains(&token.to_lowercase())
			|| token.chars().count() >= self.config.max_token_chars
			|| token.chars().all(|c| c.is_ascii_digit())
			|| token.contains(self.config.rejected_symbols.as_slice())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn extract(cell: &str) -> Vec<String> {
		NameExtractor::default().extract(cell).into_iter().collect()
	}

	#[test]
	fn no_trailing_group_yields_nothing() {
		assert!(extract("- Plain task").is_empty());
		assert!(extract("- Visit (Anh) then report").is_empty());
		assert!(extract("").is_empty());
		assert!(extract("- Broken (Anh").is_empty());
	}

	#[test]
	fn trailing_whitespace_after_group_is_allowed() {
		assert_eq!(extract("- Task (Anh/Cong)  \n"), vec!["Anh", "Cong"]);
	}

	#[test]
	fn only_the_last_group_counts() {
		assert_eq!(extract("- Audit (phase 2) (Marc)"), vec!["Marc"]);
		assert_eq!(
			extract("- Line one (Anh)\n- Line two (Bob)"),
			vec!["Bob"]
		);
	}

	#[test]
	fn wildcard_expands_to_core_roster() {
		let expected = vec!["Tung", "Cong", "Anh", "Hang", "Trang", "Tinh"];
		assert_eq!(extract("- Task (All)"), expected);
		assert_eq!(extract("Kickoff meeting, long preamble - Task (ALL)"), expected);
		assert_eq!(extract("- Task (all)"), expected);
	}

	#[test]
	fn wildcard_merges_with_other_names() {
		let names = extract("- Offsite (Marc/all/Anh)");
		assert_eq!(names, vec!["Marc", "Tung", "Cong", "Anh", "Hang", "Trang", "Tinh"]);
	}

	#[test]
	fn alias_expands_to_both_names() {
		assert_eq!(extract("- Task (Tinh-2Anh)"), vec!["Tinh", "Anh"]);
	}

	#[test]
	fn alias_match_is_exact() {
		assert_eq!(extract("- Task (tinh-2anh)"), vec!["tinh-2anh"]);
	}

	#[test]
	fn mixed_rejections() {
		assert_eq!(extract("- Task (Bob/12345/kbc/ValidName)"), vec!["Bob", "ValidName"]);
	}

	#[test]
	fn rejects_deny_listed_tokens_case_insensitively() {
		assert!(extract("- Task (KBC)").is_empty());
		assert!(extract("- Task (Nuoa.io)").is_empty());
		assert!(extract("- Task (SCG Cleanergy)").is_empty());
		assert!(extract("- Task (others/Local/etc)").is_empty());
	}

	#[test]
	fn rejects_long_tokens() {
		assert!(extract("- Task (abcdefghijklmnopqrst)").is_empty());
		assert_eq!(extract("- Task (abcdefghijklmnopqrs)"), vec!["abcdefghijklmnopqrs"]);
	}

	#[test]
	fn rejects_numeric_tokens() {
		assert!(extract("- Task (2025)").is_empty());
		assert_eq!(extract("- Task (Q3)"), vec!["Q3"]);
	}

	#[test]
	fn rejects_question_marks_and_semicolons() {
		assert!(extract("- Task (who?)").is_empty());
		assert!(extract("- Task (Anh;Cong)").is_empty());
	}

	#[test]
	fn drops_empty_tokens_and_keeps_case() {
		assert_eq!(extract("- Task ( anh // Anh )"), vec!["anh", "Anh"]);
	}

	#[test]
	fn duplicate_mentions_collapse() {
		assert_eq!(extract("- Task (Anh/Anh/Tinh-2Anh)"), vec!["Anh", "Tinh"]);
	}

	#[test]
	fn custom_rules_apply() {
		let extractor = NameExtractor::new(ExtractorConfig {
			core_roster: vec!["Ann".into(), "Bo".into()],
			wildcard: "team".into(),
			deny_list: vec!["ACME".into()],
			..ExtractorConfig::default()
		});
		let names: Vec<_> = extractor.extract("- Task (Team/acme/Cy)").into_iter().collect();
		assert_eq!(names, vec!["Ann", "Bo", "Cy"]);
	}
}
