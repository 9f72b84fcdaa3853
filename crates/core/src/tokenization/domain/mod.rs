pub mod entity_recognizer;
pub mod sentence_splitter;
pub mod token;
pub mod tokenizer;
