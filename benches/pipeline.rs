//! Benchmarks for the parse and lint passes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tgmlint::{lint, parse_map, write_map, LintOptions, RuleRegistry};

const KEYS: [(&str, &str); 4] = [
    ("aa", "/turf/space,\n/area/space"),
    (
        "ab",
        "/obj/structure/cable{\n\td1 = 0;\n\td2 = 4\n\t},\n/obj/structure/cable{\n\td2 = 8\n\t},\n/turf/simulated/floor,\n/area/station",
    ),
    (
        "ac",
        "/obj/machinery/atmospherics/pipe/simple/hidden/scrubbers,\n/obj/machinery/atmospherics/unary/vent_scrubber/on,\n/turf/simulated/floor,\n/area/station",
    ),
    ("ad", "/turf/simulated/floor,\n/area/station"),
];

/// A `size` x `size` x 2 map in column layout.
fn generate_map(size: u32) -> String {
    let mut out = String::new();
    for (key, entries) in KEYS {
        out.push_str(&format!("\"{}\" = (\n{})\n", key, entries));
    }
    out.push('\n');

    for z in 1..=2 {
        for x in 1..=size {
            out.push_str(&format!("({},1,{}) = {{\"\n", x, z));
            for y in 0..size {
                let pick = ((x * 7 + y * 13 + z) % KEYS.len() as u32) as usize;
                out.push_str(KEYS[pick].0);
                out.push('\n');
            }
            out.push_str("\"}\n");
        }
    }
    out
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for size in [32, 128] {
        let source = generate_map(size);
        group.bench_with_input(BenchmarkId::new("parse_map", size), &source, |b, source| {
            b.iter(|| parse_map(black_box(source)).unwrap())
        });
    }

    let map = parse_map(&generate_map(128)).unwrap();
    group.bench_function("write_map_128", |b| b.iter(|| write_map(black_box(&map))));

    group.finish();
}

fn bench_linting(c: &mut Criterion) {
    let mut group = c.benchmark_group("linting");
    let registry = RuleRegistry::with_builtin();

    for size in [32, 128] {
        let map = parse_map(&generate_map(size)).unwrap();
        group.bench_with_input(BenchmarkId::new("sequential", size), &map, |b, map| {
            b.iter(|| lint(black_box(map), &registry, LintOptions::default()))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &map, |b, map| {
            b.iter(|| lint(black_box(map), &registry, LintOptions::parallel()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_linting);
criterion_main!(benches);
