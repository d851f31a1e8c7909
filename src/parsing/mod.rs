pub mod signature;

pub use signature::{SignatureExtractor, find_methods_in_file};
