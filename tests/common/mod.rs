#![allow(dead_code)]

use std::path::PathBuf;

use lab_record_pdf::{Record, RenderOptions};

/// Output directory for files a test writes: tests/output/<name>/
pub fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(name);
    std::fs::create_dir_all(&dir).expect("create output dir");
    dir
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn options() -> RenderOptions {
    RenderOptions::without_watermark()
}

pub fn record(title: &str) -> Record {
    Record {
        name: "Alice".into(),
        reg_no: "21CS042".into(),
        exp_no: "3".into(),
        date: "12/08/2024".into(),
        title: title.into(),
        ..Record::default()
    }
}

pub fn numbered_lines(prefix: &str, n: usize) -> String {
    (1..=n)
        .map(|i| format!("{prefix} {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn contains(haystack: &[u8], needle: &str) -> bool {
    find(haystack, needle.as_bytes()).is_some()
}

/// Parse the whole file; panics when the xref, trailer or page tree is broken.
pub fn load(pdf: &[u8]) -> lopdf::Document {
    lopdf::Document::load_mem(pdf).expect("valid PDF")
}

pub fn page_count(pdf: &[u8]) -> usize {
    load(pdf).get_pages().len()
}

/// Decoded content operations of every page, in page order.
pub fn page_operations(pdf: &[u8]) -> Vec<Vec<lopdf::content::Operation>> {
    let doc = load(pdf);
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let data = doc.get_page_content(page_id).expect("page content");
            lopdf::content::Content::decode(&data)
                .expect("decodable content stream")
                .operations
        })
        .collect()
}

/// Page content streams (decompressed) as text, in page order.
pub fn content_streams(pdf: &[u8]) -> Vec<String> {
    let doc = load(pdf);
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let data = doc.get_page_content(page_id).expect("page content");
            String::from_utf8_lossy(&data).into_owned()
        })
        .collect()
}

/// Strings shown with `Tj` on one page.
pub fn shown_text(ops: &[lopdf::content::Operation]) -> Vec<String> {
    ops.iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(lopdf::Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}
