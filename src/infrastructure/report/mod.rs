mod latin1;
mod pdf_report_exporter;
mod report_layout;

pub use latin1::to_latin1_safe;
pub use pdf_report_exporter::PdfReportExporter;
pub use report_layout::{REPORT_TITLE, ReportLine, paginate, report_lines, wrap};
