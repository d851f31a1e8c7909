//! ifacegen - generate an interface from the exported methods of a type
//!
//! # Architecture
//!
//! ```text
//! FileWalker → WorkerPool → SignatureExtractor (per file) → Aggregator → Assembler
//!      ↓            ↓                 ↓                          ↓            ↓
//!   walkdir   crossbeam-channel   line state machine      sorted + MultiError  text
//! ```
//!
//! The library never decides whether a run with per-file failures is a
//! success; [`Extraction`] carries both the signatures and the errors.

pub mod assembly;
pub mod config;
pub mod error;
pub mod indexing;
pub mod io;
pub mod parsing;

// Explicit exports for better API clarity
pub use assembly::{Assembler, InterfaceStyle, assemble};
pub use config::Settings;
pub use error::{AssembleError, AssembleResult, ExtractError, ExtractResult, MultiError};
pub use indexing::{Extraction, Extractor, extract};
pub use parsing::{SignatureExtractor, find_methods_in_file};
