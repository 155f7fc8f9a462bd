use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use phpforge_lsp::config::Config;
use phpforge_lsp::parser;
use phpforge_lsp::render::{render_constructor, render_doc, render_getter};
use phpforge_lsp::selection::scan_declarations;
use phpforge_lsp::types::{Fragment, PropertySignature, Signature, TypeUnion};

/// A class with `count` typed properties followed by one throwing method.
fn document(count: usize) -> String {
    let mut src = String::from("<?php\n\nfinal class Generated\n{\n");
    for i in 0..count {
        src.push_str(&format!("    private ?string $field{i} = null;\n"));
    }
    src.push_str(concat!(
        "\n",
        "    public function run(int $id, array $rows = []): bool\n",
        "    {\n",
        "        foreach ($rows as $row) {\n",
        "            if (!$row) {\n",
        "                throw new InvalidRow();\n",
        "            }\n",
        "        }\n",
        "        try {\n",
        "            return $this->save($id);\n",
        "        } catch (IOError | Timeout $e) {\n",
        "            throw $e;\n",
        "        }\n",
        "    }\n",
        "}\n",
    ));
    src
}

/// Extraction of single lines, which re-parses a repaired snippet each time.
fn bench_extract(c: &mut Criterion) {
    let src = document(20);
    let property = Fragment::at_line(&src, 4).unwrap();
    let method_line = src
        .lines()
        .position(|l| l.contains("function run"))
        .unwrap();
    let method = Fragment::at_line(&src, method_line).unwrap();

    c.bench_function("extract_property", |b| {
        b.iter(|| parser::extract_property(black_box(&property)).unwrap())
    });
    c.bench_function("extract_function", |b| {
        b.iter(|| parser::extract_function(black_box(&src), black_box(&method)).unwrap())
    });
}

/// Pure template rendering from already extracted signatures.
fn bench_render(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("render_constructor");

    for &count in &[1usize, 10, 50] {
        let properties: Vec<PropertySignature> = (0..count)
            .map(|i| PropertySignature {
                name: format!("field{i}"),
                types: TypeUnion {
                    members: vec!["string".into()],
                    nullable: true,
                },
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &properties,
            |b, properties| {
                b.iter(|| render_constructor(properties, "    ", Some("Generated"), &config));
            },
        );
    }
    group.finish();

    let property = PropertySignature {
        name: "enabled".into(),
        types: TypeUnion::single("bool"),
    };
    c.bench_function("render_getter", |b| {
        b.iter(|| render_getter(black_box(&property), "    ", &config))
    });
    c.bench_function("render_property_doc", |b| {
        let signature = Signature::Property(property.clone());
        b.iter(|| render_doc(black_box(&signature), "    ", &config))
    });
}

/// Batch picking scans every line of the document with the recognizers.
fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_declarations");
    for &count in &[10usize, 200] {
        let src = document(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &src, |b, src| {
            b.iter(|| scan_declarations(src, |_| true).len());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract, bench_render, bench_scan);
criterion_main!(benches);
