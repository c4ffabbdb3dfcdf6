pub mod a001_content_type;
pub mod a002_document;
