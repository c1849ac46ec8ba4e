use newssense::infrastructure::extraction::{decode_entities, extract_article};

const ARTICLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Rates held steady &amp; markets rally</title>
  <style>p { color: red; }</style>
  <script>var p = "<p>not content</p>";</script>
</head>
<body>
  <nav><p>Home</p><p>World</p></nav>
  <!-- <p>commented out paragraph that is long enough to count</p> -->
  <article>
    <p class="lead">The central bank held interest rates steady on Tuesday, citing easing inflation.</p>
    <p>Officials said the <a href="/economy">economy</a> was on track for a &ldquo;soft landing&rdquo; this year.</p>
    <p>By Staff</p>
  </article>
</body>
</html>"#;

#[test]
fn given_article_page_when_extracting_then_returns_title() {
    let article = extract_article(ARTICLE_PAGE);

    assert_eq!(
        article.title.as_deref(),
        Some("Rates held steady & markets rally")
    );
}

#[test]
fn given_article_page_when_extracting_then_keeps_only_substantial_paragraphs() {
    let article = extract_article(ARTICLE_PAGE);

    assert_eq!(article.paragraphs.len(), 2);
    assert!(article.paragraphs[0].starts_with("The central bank held"));
    assert_eq!(
        article.paragraphs[1],
        "Officials said the economy was on track for a \u{201C}soft landing\u{201D} this year."
    );
}

#[test]
fn given_article_page_when_extracting_then_ignores_scripts_and_comments() {
    let body = extract_article(ARTICLE_PAGE).body();

    assert!(!body.contains("not content"));
    assert!(!body.contains("commented out"));
    assert!(body.contains("\n\n"));
}

#[test]
fn given_page_with_only_short_paragraphs_when_extracting_then_keeps_them_all() {
    let article = extract_article("<p>Breaking.</p><p>More soon.</p><p> </p>");

    assert_eq!(article.paragraphs, vec!["Breaking.", "More soon."]);
}

#[test]
fn given_page_without_paragraphs_when_extracting_then_returns_empty() {
    let article = extract_article("<html><body><div>No paragraphs here</div></body></html>");

    assert!(article.title.is_none());
    assert!(article.paragraphs.is_empty());
}

#[test]
fn given_numeric_and_named_entities_when_decoding_then_replaces_them() {
    assert_eq!(decode_entities("&#8377;500 &#x20AC;10 &lt;b&gt;"), "\u{20B9}500 \u{20AC}10 <b>");
    assert_eq!(decode_entities("Tom &amp; Jerry&nbsp;Inc"), "Tom & Jerry Inc");
}

#[test]
fn given_unknown_entity_when_decoding_then_leaves_it() {
    assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
}

#[test]
fn given_trailing_unclosed_paragraph_when_extracting_then_it_is_not_recovered() {
    let article = extract_article("<p>Closed paragraph.</p><p>Trailing text never closed");

    assert_eq!(article.paragraphs, vec!["Closed paragraph."]);
}

#[test]
fn given_nested_paragraphs_when_extracting_then_outer_tail_is_lost() {
    let article = extract_article("<p>Outer start <p>inner text</p> outer tail</p>");

    assert_eq!(article.paragraphs, vec!["Outer start inner text"]);
}
