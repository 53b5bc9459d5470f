use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use xbel::{convert, import_document, ConvertOptions};

const SMALL: &str = "Hotlist\n#FOLDER\n\tNAME=News\n#URL\n\tNAME=Example\n\tURL=http://example.com/\n-\n";

fn large_hotlist() -> String {
    let mut out = String::from("Opera Hotlist version 2.0\n");
    for folder in 0..50 {
        out.push_str(&format!("#FOLDER\n\tNAME=Folder {folder}\n\tCREATED=1104537600\n"));
        for bookmark in 0..40 {
            out.push_str(&format!(
                "#URL\n\tNAME=Bookmark {bookmark}\n\tURL=http://example.com/{folder}/{bookmark}\n\
                 \tCREATED=1104609600\n\tVISITED=1136073600\n\tDESCRIPTION=first\u{2}second\n\n"
            ));
        }
        out.push_str("-\n");
    }
    out
}

fn bench_small(c: &mut Criterion) {
    c.bench_function("xbel_convert_small", |b| b.iter(|| convert(black_box(SMALL))));
}

fn bench_large(c: &mut Criterion) {
    let input = large_hotlist();
    let options = ConvertOptions::default();
    c.bench_function("xbel_import_large", |b| {
        b.iter(|| import_document(black_box(input.as_bytes()), &options))
    });
}

criterion_group!(benches, bench_small, bench_large);
criterion_main!(benches);
