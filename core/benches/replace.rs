//! Replace benchmarks: the hot path.
//!
//! Measures: auto classification, exact-length rule scans, anchored partial
//! matches, misses that scan the whole list, and trace overhead.

use cardinal::prelude::*;
use cardinal::DEFAULT_MAX_SEPARATOR_COUNT;

fn main() {
    divan::main();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════════════

const URL: &str = "/player/update/123/file/favicon.ico/550e8400-e29b-41d4-a716-446655440000";
const REDUCED: &str = "/player/update/:id/file/:resource/:uuid";

/// Segments per generated rule, one below the default limit.
const WIDTH: usize = DEFAULT_MAX_SEPARATOR_COUNT - 1;

/// Full-width segment list for rule `i`, with one `:id` placeholder.
fn rule_parts(i: usize) -> Vec<String> {
    let hole = i % WIDTH;
    (0..WIDTH)
        .map(|j| {
            if j == hole {
                ":id".to_string()
            } else {
                format!("part-{i}-{j}")
            }
        })
        .collect()
}

fn exact_rules(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("/{}", rule_parts(i).join("/"))).collect()
}

/// The placeholder plus one neighbouring literal, so every path is longer than
/// its rule and the rule has exactly one anchor.
fn partial_rules(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let parts = rule_parts(i);
            let hole = i % WIDTH;
            let start = hole.saturating_sub(1);
            parts[start..start + 2].join("/")
        })
        .collect()
}

fn concrete_path(i: usize) -> String {
    format!("/{}", rule_parts(i).join("/").replace(":id", "cardinality"))
}

fn replacer(rules: &[String]) -> RuleReplacer {
    RuleReplacer::builder()
        .max_rule_count(rules.len() + 1)
        .build(rules)
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Auto classifier
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn auto_http(bencher: divan::Bencher) {
    let r = AutoReplacer::http();
    bencher.bench_local(|| r.replace(divan::black_box(URL)));
}

#[divan::bench]
fn auto_http_static_path(bencher: divan::Bencher) {
    let r = AutoReplacer::http();
    bencher.bench_local(|| r.replace(divan::black_box("/api/v1/health")));
}

#[divan::bench]
fn auto_bus(bencher: divan::Bencher) {
    let r = AutoReplacer::bus();
    bencher.bench_local(|| r.replace(divan::black_box("orders.eu.17.created")));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rule matching
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn single_rule_exact(bencher: divan::Bencher) {
    let r = RuleReplacer::new([REDUCED]).unwrap();
    bencher.bench_local(|| r.replace(divan::black_box(URL)));
}

/// Worst case: the last rule is the one that matches.
#[divan::bench(args = [1, 10, 50, 99])]
fn exact_last_rule(bencher: divan::Bencher, n: usize) {
    let r = replacer(&exact_rules(n));
    let path = concrete_path(n - 1);
    bencher.bench_local(|| r.replace(divan::black_box(&path)));
}

#[divan::bench(args = [1, 10, 50, 99])]
fn partial_round_robin(bencher: divan::Bencher, n: usize) {
    let r = replacer(&partial_rules(n));
    let paths: Vec<String> = (0..n).map(concrete_path).collect();
    let mut i = 0;
    bencher.bench_local(|| {
        i = (i + 1) % n;
        r.replace(divan::black_box(&paths[i]))
    });
}

#[divan::bench(args = [1, 10, 50, 99])]
fn miss_scans_all_rules(bencher: divan::Bencher, n: usize) {
    let r = replacer(&partial_rules(n));
    bencher.bench_local(|| r.replace(divan::black_box("/nothing/here/matches/at/all")));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Pipeline and trace
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn pipeline_auto_then_rules(bencher: divan::Bencher) {
    let list = ReplacerList::new()
        .with(AutoReplacer::http())
        .with(RuleReplacer::new(["/player/:action/:id"]).unwrap());
    bencher.bench_local(|| list.apply(divan::black_box(URL)));
}

#[divan::bench(args = [10, 99])]
fn trace_overhead(bencher: divan::Bencher, n: usize) {
    let r = replacer(&partial_rules(n));
    let path = concrete_path(n - 1);
    bencher.bench_local(|| r.trace(divan::black_box(&path)));
}
