pub mod aligned_token;
pub mod span_aggregator;
pub mod timestamp_aligner;
pub mod timing_table;
