//! Info command implementation.

use vntext_pipeline::tables::{PunctuationCombinationIndex, SymbolTable};

/// Run the info command.
pub fn run() {
    println!("vntext Vietnamese text normalizer");
    println!("=================================");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Tables:");
    let symbols = SymbolTable::new();
    let index = PunctuationCombinationIndex::new();
    println!("  Emoticon entries (aliases included): {}", symbols.len());
    println!("  Punctuation combinations:            {}", index.len());
    println!();
    println!("Crates:");
    println!("  vntext-core: Core types and traits");
    println!("  vntext-pipeline: Normalization pipeline and tables");
    println!("  vntext-cli: This CLI tool");
}
