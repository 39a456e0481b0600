//! Utility modules.

pub mod file;
pub mod text;

pub use file::{calculate_checksum, load_document, read_text_file, save_document};
pub use text::{count_whole_word, normalize_text, split_paragraphs, split_words, word_count};
