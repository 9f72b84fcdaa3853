pub mod punctuation_sentence_splitter;
pub mod regex_tokenizer;
