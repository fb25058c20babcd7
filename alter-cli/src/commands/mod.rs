mod generate;
mod vocabulary;

// Generate commands
pub use generate::{build_request, run_generate};

// Vocabulary commands
pub use vocabulary::show_vocabulary;
