use colored::Colorize;

pub mod report;
pub mod scan;

pub use report::{CheckSummary, OutputFormat, format_check_result, format_summary};
pub use scan::{
    ScanOptions, ScanReport, check_external_links, collect_external_links, execute_scan,
};

pub fn print_banner() {
    println!(
        "{} {}",
        "linkrot".bright_red().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "map a site, check its external links".bright_black());
    println!();
}
