//! Hygiene — enforces coding standards at test time
//!
//! These tests scan the cursor crate source tree for antipatterns. The cursor
//! runs inside every page's animation frame, so anything that can panic or
//! silently swallow an error is budgeted (ideally zero). If you must add
//! one, fix an existing one first — the budget never grows.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

/// (pattern, budget, why it is budgeted)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics in the frame loop"),
    (".expect(", 0, "panics in the frame loop"),
    ("panic!(", 0, "panics in the frame loop"),
    ("unreachable!(", 0, "panics in the frame loop"),
    ("todo!(", 0, "unfinished stub"),
    ("unimplemented!(", 0, "unfinished stub"),
    ("let _ =", 0, "discards a result without inspecting it"),
    (".ok()", 0, "discards an error without inspecting it"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
    ("println!(", 0, "stdout is not visible in the browser"),
];

/// Modules that must stay free of browser types so they run headless.
const HEADLESS_MODULES: &[&str] = &["engine.rs", "input.rs", "dom.rs", "spring.rs", "frame.rs", "geom.rs"];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `cursor/src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("engine.rs")), "run from the crate root");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for (pattern, max, why) in BUDGETS {
        let hits = count_in_source(&files, pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > *max {
            failures.push(format!("`{pattern}` ({why}): found {count}, max {max}\n{}", format_hits(&hits)));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

/// A `.unwrap_or_default();` statement throws a `Result` away just like
/// `let _ =`. Only a binding (`let x = ....unwrap_or_default();`) keeps the
/// value, so those lines are allowed. Failures that are really ignorable
/// must be spelled `if ....is_err() { /* reason */ }`.
#[test]
fn results_are_not_discarded_through_defaults() {
    let files = source_files();
    let mut offenders = Vec::new();
    for file in &files {
        for (idx, line) in file.content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.ends_with(".unwrap_or_default();") && !trimmed.starts_with("let ") {
                offenders.push(format!("  {}:{}: {trimmed}", file.path, idx + 1));
            }
        }
    }
    assert!(offenders.is_empty(), "discarded results:\n{}", offenders.join("\n"));
}

#[test]
fn headless_modules_do_not_touch_the_browser() {
    let files = source_files();
    let offenders: Vec<&str> = files
        .iter()
        .filter(|f| HEADLESS_MODULES.iter().any(|m| f.path.ends_with(m)))
        .filter(|f| f.content.contains("web_sys") || f.content.contains("wasm_bindgen"))
        .map(|f| f.path.as_str())
        .collect();
    assert!(offenders.is_empty(), "browser types in headless modules: {offenders:?}");
}
