use criterion::{Criterion, criterion_group, criterion_main};
use wiki_toc_engine::{parse_toc, render_html_with_anchors};

fn generate_wiki_page(sections: usize) -> String {
    let mut content = String::from("# Repository overview\n\n");
    for section in 0..sections {
        content.push_str(&format!("## Module {section}: **core** `api`\n\nSome prose.\n\n"));
        content.push_str("### Usage\n\n```rust\n## not a heading\n```\n\n### Configuration\n\n");
    }
    content
}

fn bench_toc(c: &mut Criterion) {
    let mut group = c.benchmark_group("toc");
    group.sample_size(20);

    let content = generate_wiki_page(200);
    group.bench_function("parse_toc", |b| {
        b.iter(|| std::hint::black_box(parse_toc(std::hint::black_box(&content))));
    });

    let toc = parse_toc(&content);
    group.bench_function("render_html_with_anchors", |b| {
        b.iter(|| std::hint::black_box(render_html_with_anchors(&content, &toc)));
    });

    group.finish();
}

criterion_group!(benches, bench_toc);
criterion_main!(benches);
