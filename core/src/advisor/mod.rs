pub mod expand;
pub mod model;
pub mod parser;
pub mod sanitize;

/// Bundled sample findings document, loadable without a file upload.
pub fn sample_document() -> &'static str {
    include_str!("../../data/sample_findings.json")
}
