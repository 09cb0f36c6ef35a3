//! Converter benchmarks.

use assetport_vector::{convert, VectorOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SIMPLE_SVG: &str = r#"<svg viewBox="0 0 24 24"><path d="M12 2L2 22h20z" fill="none" stroke="black" stroke-width="2"/></svg>"#;

fn icon_svg(paths: usize) -> String {
    let mut svg = String::from(r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">"#);
    for i in 0..paths {
        svg.push_str(&format!(
            r##"<path d="M{i} {i}h4v4h-4z" fill="#1A73E8" opacity="0.{d}"/>"##,
            i = i % 20,
            d = i % 9 + 1
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn convert_simple(c: &mut Criterion) {
    let options = VectorOptions::new(24.0, 24.0);
    c.bench_function("convert_simple", |b| {
        b.iter(|| convert(black_box(SIMPLE_SVG), &options))
    });
}

fn convert_many_paths(c: &mut Criterion) {
    let svg = icon_svg(200);
    let options = VectorOptions::new(24.0, 24.0).mirrored(true);
    c.bench_function("convert_many_paths", |b| {
        b.iter(|| convert(black_box(&svg), &options))
    });
}

criterion_group!(benches, convert_simple, convert_many_paths);
criterion_main!(benches);
