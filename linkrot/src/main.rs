use linkrot::commands::command_argument_builder;
use linkrot::{handle_scan, init_tracing};
use linkrot_core::print_banner;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    init_tracing(matches.get_flag("debug"));

    if !matches.get_flag("quiet") {
        print_banner();
    }

    if let Err(e) = handle_scan(&matches).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
