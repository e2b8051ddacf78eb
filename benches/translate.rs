//! Benchmarks for the translation pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use doctyp::doctree::{Doctree, Kind, parse_xml};
use doctyp::translate;
use doctyp::typst::escape_str;

/// Build a document shaped like a mid-sized manual chapter.
fn build_sample_doctree() -> Doctree {
    let mut doc = Doctree::new();
    for s in 0..24 {
        let section = doc.add_element(doc.root(), Kind::Section);
        let title = doc.add_element(section, Kind::Title);
        doc.add_text(title, &format!("Section {s}"));

        for p in 0..6 {
            let para = doc.add_element(section, Kind::Paragraph);
            doc.add_text(para, "The translator walks the tree and ");
            let emph = doc.add_element(para, Kind::Emphasis);
            doc.add_text(emph, "renders");
            doc.add_text(para, &format!(" block {p} bottom-up."));
        }

        let list = doc.add_element(section, Kind::BulletList);
        for i in 0..8 {
            let item = doc.add_element(list, Kind::ListItem);
            let para = doc.add_element(item, Kind::Paragraph);
            doc.add_text(para, &format!("Item {i}"));
        }

        let block = doc.add_element(section, Kind::LiteralBlock);
        doc.attrs.set_language(block, "rust");
        doc.add_text(block, "fn main() {\n    println!(\"hello\");\n}");
    }
    doc
}

/// Serialized form of a similar document, for ingest benchmarks.
fn build_sample_xml() -> String {
    let mut xml = String::from("<document>\n");
    for s in 0..24 {
        xml.push_str(&format!(
            "<section ids=\"s{s}\">\n<title>Section {s}</title>\n"
        ));
        for p in 0..6 {
            xml.push_str(&format!(
                "<paragraph>Paragraph {p} with <strong>markup</strong> and \
                 <literal>code</literal>.</paragraph>\n"
            ));
        }
        xml.push_str("</section>\n");
    }
    xml.push_str("</document>\n");
    xml
}

// ============================================================================
// Translation Benchmarks
// ============================================================================

fn bench_translate(c: &mut Criterion) {
    let doc = build_sample_doctree();

    c.bench_function("translate", |b| {
        b.iter(|| translate(&doc));
    });
}

fn bench_render(c: &mut Criterion) {
    let translation = translate(&build_sample_doctree());

    c.bench_function("render", |b| {
        b.iter(|| translation.to_text());
    });
}

// ============================================================================
// XML Ingest Benchmarks
// ============================================================================

fn bench_parse_xml(c: &mut Criterion) {
    let xml = build_sample_xml();

    c.bench_function("parse_xml", |b| {
        b.iter(|| parse_xml(&xml).unwrap());
    });
}

fn bench_xml_to_typst(c: &mut Criterion) {
    let xml = build_sample_xml();

    c.bench_function("xml_to_typst", |b| {
        b.iter(|| translate(&parse_xml(&xml).unwrap()).to_text());
    });
}

// ============================================================================
// Escape Benchmarks
// ============================================================================

fn bench_escape_clean(c: &mut Criterion) {
    let text = "No escapes needed in this stretch of plain prose. ".repeat(64);

    c.bench_function("escape_clean", |b| {
        b.iter(|| escape_str(&text));
    });
}

fn bench_escape_quoted(c: &mut Criterion) {
    let text = "say \"hi\" and \\ escape\n".repeat(64);

    c.bench_function("escape_quoted", |b| {
        b.iter(|| escape_str(&text));
    });
}

criterion_group!(
    benches,
    // Translation
    bench_translate,
    bench_render,
    // XML ingest
    bench_parse_xml,
    bench_xml_to_typst,
    // Escaping
    bench_escape_clean,
    bench_escape_quoted,
);
criterion_main!(benches);
