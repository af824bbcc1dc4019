//! Daum Korean grammar checker adapter
//!
//! Daum renders its results as HTML: every flagged span is an element carrying
//! `data-error-type`, `data-error-input` and `data-error-output` attributes,
//! with an optional nested `.help` block. The markup carries no offsets, so
//! spans are located in the submitted text left to right.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::OnceLock;

use super::backend::{blank_input, CheckerBackend, ResponseKind};
use super::error::Unavailable;
use super::finding::{Category, NormalizedPayload, RawFinding};
use super::http::{read_text, HttpTransport};
use super::kind::BackendKind;
use super::markup::{find_chars, strip_markup};

fn error_selector() -> &'static Selector {
    static ERROR_SEL: OnceLock<Selector> = OnceLock::new();
    ERROR_SEL.get_or_init(|| Selector::parse("[data-error-input]").expect("valid selector"))
}

fn help_selector() -> &'static Selector {
    static HELP_SEL: OnceLock<Selector> = OnceLock::new();
    HELP_SEL.get_or_init(|| Selector::parse(".help").expect("valid selector"))
}

fn default_message(category: Category) -> &'static str {
    match category {
        Category::Spacing => "띄어쓰기 오류 (spacing error)",
        Category::Spelling => "맞춤법 오류 (spelling error)",
        Category::Info => "표준어 의심 (non-standard usage suspected)",
        _ => "문법 오류 (grammar error)",
    }
}

/// Extracts findings from a grammar checker result page
///
/// Elements whose span cannot be found in `text` are dropped.
pub fn parse_result_page(html: &str, text: &str) -> Vec<RawFinding> {
    let document = Html::parse_document(html);
    let mut findings = Vec::new();
    let mut cursor = 0;

    for element in document.select(error_selector()) {
        let attrs = element.value();
        let Some(input) = attrs.attr("data-error-input").map(str::trim) else {
            continue;
        };
        let Some(offset) = find_chars(text, input, cursor) else {
            continue;
        };
        let length = input.chars().count();
        cursor = offset + length;

        let category = attrs
            .attr("data-error-type")
            .map(Category::from_label)
            .unwrap_or(Category::Grammar);

        let help = element
            .select(help_selector())
            .next()
            .map(|h| strip_markup(&h.text().collect::<Vec<_>>().join(" ")))
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| default_message(category).to_string());

        let suggestions: Vec<String> = attrs
            .attr("data-error-output")
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != input)
            .map(|s| vec![s.to_string()])
            .unwrap_or_default();

        findings.push(
            RawFinding::new(offset, length, help)
                .with_original_text(input)
                .with_suggestions(suggestions)
                .with_category(category),
        );
    }

    findings
}

pub struct DaumBackend {
    transport: HttpTransport,
}

impl DaumBackend {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CheckerBackend for DaumBackend {
    fn id(&self) -> &str {
        BackendKind::Daum.id()
    }

    fn kind(&self) -> ResponseKind {
        ResponseKind::Markup
    }

    async fn check(&self, text: &str, _language: &str) -> Result<NormalizedPayload, Unavailable> {
        if let Some(empty) = blank_input(self.id(), text) {
            return Ok(empty);
        }

        let response = self.transport.post_form(&[("sentence", text)]).await?;
        let html = read_text(response).await?;

        Ok(NormalizedPayload::new(self.id(), parse_result_page(&html, text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<div class="cont_spell">
        <a href="#none" class="txt_spell" data-error-type="space"
           data-error-input="아버지가방에" data-error-output="아버지가 방에">
            <span class="inner_spell">아버지가 방에</span>
            <div class="help"><p>띄어쓰기가 <b>틀렸습니다</b>.</p></div>
        </a>
        <a href="#none" class="txt_spell" data-error-type="spell"
           data-error-input="들어가신다" data-error-output="들어가신다">
            <span class="inner_spell">들어가신다</span>
        </a>
        <a href="#none" class="txt_spell" data-error-type="spell"
           data-error-input="없는말" data-error-output="있는말"></a>
    </div>"##;

    #[test]
    fn test_parse_result_page() {
        let text = "아버지가방에 들어가신다";
        let findings = parse_result_page(PAGE, text);

        assert_eq!(findings.len(), 2);

        assert_eq!(findings[0].offset, 0);
        assert_eq!(findings[0].length, 6);
        assert_eq!(findings[0].category, Category::Spacing);
        assert_eq!(findings[0].suggestions, vec!["아버지가 방에"]);
        assert_eq!(findings[0].message, "띄어쓰기가 틀렸습니다 .");

        assert_eq!(findings[1].offset, 7);
        assert_eq!(findings[1].category, Category::Spelling);
        assert!(findings[1].suggestions.is_empty());
        assert_eq!(findings[1].message, default_message(Category::Spelling));
    }

    #[test]
    fn test_repeated_span_advances() {
        let page = r#"<a data-error-type="spell" data-error-input="됬다"></a>
                      <a data-error-type="spell" data-error-input="됬다"></a>"#;
        let findings = parse_result_page(page, "됬다 그리고 됬다");

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].offset, 0);
        assert_eq!(findings[1].offset, 7);
    }

    #[test]
    fn test_unstructured_page_is_clean() {
        assert!(parse_result_page("<p>서비스 점검 중</p>", "텍스트").is_empty());
    }
}
