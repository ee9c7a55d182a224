use chatrelay::documents::{PdfExtractParser, PdfParser, extract_text_from_pdf};
use chatrelay::errors::BotError;

struct FakeParser(Result<Vec<&'static str>, &'static str>);

impl PdfParser for FakeParser {
    fn parse(&self, _bytes: &[u8]) -> Result<Vec<String>, BotError> {
        match &self.0 {
            Ok(pages) => Ok(pages.iter().map(|p| p.to_string()).collect()),
            Err(e) => Err(BotError::PdfError(e.to_string())),
        }
    }
}

#[test]
fn test_empty_pages_are_skipped() {
    let parser = FakeParser(Ok(vec!["Hello", "", "World"]));
    assert_eq!(
        extract_text_from_pdf(&parser, b"%PDF").as_deref(),
        Some("Hello\nWorld")
    );
}

#[test]
fn test_result_is_trimmed() {
    let parser = FakeParser(Ok(vec!["  Title\n", "Body  \n"]));
    assert_eq!(
        extract_text_from_pdf(&parser, b"%PDF").as_deref(),
        Some("Title\n\nBody")
    );
}

#[test]
fn test_all_empty_pages_is_failure() {
    let parser = FakeParser(Ok(vec!["", "", "  "]));
    assert_eq!(extract_text_from_pdf(&parser, b"%PDF"), None);

    let parser = FakeParser(Ok(vec![]));
    assert_eq!(extract_text_from_pdf(&parser, b"%PDF"), None);
}

#[test]
fn test_parse_error_is_failure() {
    let parser = FakeParser(Err("invalid xref table"));
    assert_eq!(extract_text_from_pdf(&parser, b"garbage"), None);
}

#[test]
fn test_real_parser_rejects_non_pdf_bytes() {
    assert!(PdfExtractParser.parse(b"definitely not a pdf").is_err());
    assert_eq!(extract_text_from_pdf(&PdfExtractParser, b"definitely not a pdf"), None);
}
