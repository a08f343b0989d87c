pub mod char_predicate;
pub mod lazy_iter;
pub mod separator;
pub mod splitter;
