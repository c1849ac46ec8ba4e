mod composite_source_extractor;
mod extractor_factory;
mod html_text;
mod mock_source_extractor;
mod pdf_adapter;
mod plain_text_adapter;
mod tesseract_ocr_adapter;
mod text_sanitizer;
mod url_article_adapter;
mod youtube_transcript_adapter;

pub use composite_source_extractor::CompositeSourceExtractor;
pub use extractor_factory::{ExtractorFactory, ExtractorFactoryError};
pub use html_text::{ArticleText, decode_entities, extract_article};
pub use mock_source_extractor::{MOCK_ARTICLE, MockSourceExtractor};
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use tesseract_ocr_adapter::TesseractOcrAdapter;
pub use text_sanitizer::{sanitize_extracted_text, sanitize_inline};
pub use url_article_adapter::{DEFAULT_USER_AGENT, UrlArticleAdapter};
pub use youtube_transcript_adapter::{
    DEFAULT_TIMEDTEXT_BASE_URL, YouTubeTranscriptAdapter, parse_timed_text,
};
