// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Derive a work category for a PR from its conventional-commit title prefix, falling back to labels
// role: classification
// inputs: &PullRequest (title, labels)
// outputs: Category
// invariants:
// - Title prefixes are checked before labels; first match wins in table order
// - Matching is case-insensitive; no match yields Category::Other
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{Category, PullRequest};

/// Title prefixes in priority order.
const TITLE_PREFIXES: &[(&str, Category)] = &[
  ("feat:", Category::Feat),
  ("feature:", Category::Feat),
  ("fix:", Category::Fix),
  ("bugfix:", Category::Fix),
  ("refactor:", Category::Refactor),
  ("docs:", Category::Docs),
  ("doc:", Category::Docs),
  ("test:", Category::Test),
  ("tests:", Category::Test),
  ("chore:", Category::Chore),
  ("perf:", Category::Perf),
  ("style:", Category::Style),
];

/// Label fallbacks in priority order.
const LABEL_CATEGORIES: &[(&[&str], Category)] = &[
  (&["enhancement", "feature"], Category::Feat),
  (&["bug", "bugfix"], Category::Fix),
  (&["documentation"], Category::Docs),
  (&["refactoring"], Category::Refactor),
];

pub fn classify(pr: &PullRequest) -> Category {
  let labels: Vec<String> = pr.labels.iter().map(|l| l.name.to_lowercase()).collect();
  classify_parts(&pr.title, &labels)
}

pub fn classify_parts<S: AsRef<str>>(title: &str, labels: &[S]) -> Category {
  let title = title.to_lowercase();

  if let Some((_, cat)) = TITLE_PREFIXES.iter().find(|(prefix, _)| title.starts_with(prefix)) {
    return *cat;
  }

  let labels: Vec<String> = labels.iter().map(|l| l.as_ref().to_lowercase()).collect();

  for (names, cat) in LABEL_CATEGORIES {
    if names.iter().any(|n| labels.iter().any(|l| l == n)) {
      return *cat;
    }
  }

  Category::Other
}
