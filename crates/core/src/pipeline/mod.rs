pub mod align_transcript_use_case;
pub mod aligned_document;
pub mod alignment_logger;
pub mod batch_executor;
pub mod document_stats;
pub mod infrastructure;
pub mod timestamp_renderer;
