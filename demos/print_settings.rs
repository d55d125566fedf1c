// Load application settings from the process environment and print them
//
// Run with: APP_GITHUB_CLIENT_ID=id APP_GITHUB_CLIENT_SECRET=s cargo run --example print_settings
// Print the variable reference instead: cargo run --example print_settings -- --docs

use envsettings::{AppSettings, DocsConfig, generate_docs};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if std::env::args().any(|arg| arg == "--docs") {
        print!(
            "{}",
            generate_docs::<AppSettings>(
                DocsConfig::new().with_title("Application Environment Variables")
            )
        );
        return;
    }

    // Fatal configuration errors stop the process before anything else starts
    let settings = match AppSettings::from_process_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&settings) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to render settings: {e}");
            std::process::exit(1);
        }
    }
}
