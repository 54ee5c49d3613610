pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    flag_summary, handle_scan, init_tracing, output_format_from_matches, scan_options_from_matches,
};

// Re-export scan functionality from linkrot-core
pub use linkrot_core::{OutputFormat, ScanOptions, ScanReport, execute_scan};
