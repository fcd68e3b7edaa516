mod block;
mod classify;
mod config;
mod error;
mod fence;
mod heading;
mod inline;
mod lists;
mod table;
mod title;
mod typst;

pub use block::{Block, Document, Span};
pub use classify::{Mode, classify, detect};
pub use config::{CodeConfig, Config, OutputConfig, OutputFormat, PageConfig};
pub use error::{Error, Result};

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Serialize a document to its JSON contract form.
pub fn document_to_json(document: &Document, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Convert a document to Typst markup.
pub fn document_to_typst(document: &Document, config: &Config) -> String {
    typst::document_to_typst(document, config)
}

/// Classify text and convert it to Typst markup using the compiled defaults.
pub fn text_to_typst(text: &str) -> String {
    document_to_typst(&classify(text), &Config::compiled_default())
}

/// Compile a document to PDF bytes.
pub fn document_to_pdf(document: &Document, config: &Config) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let typst_content = document_to_typst(document, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::TypstCompile(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::PdfExport(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_uses_kind_discriminators() {
        let json = document_to_json(&classify("• a"), false).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"bullet_item","content":[{"kind":"plain_text","text":"a"}]}]"#
        );
    }

    #[test]
    fn json_round_trips_nested_title() {
        let document = classify("**Title: A**\n**Title: B**\n- x\n- y");
        let json = document_to_json(&document, true).unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn pdf_has_pdf_header() {
        let document = classify("**Title: Report**\n# Findings\n- one\n- two");
        let bytes = document_to_pdf(&document, &Config::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
