use generator::config::GeneratorConfig;
use generator::pipeline::{Pipeline, RunSummary};
use generator::{AppError, logger};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match GeneratorConfig::load_default() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    if let Err(e) = logger::setup_logger(config.logging()) {
        eprintln!("Warning: Failed to initialize logger: {e}");
    }

    let root = match std::env::current_dir() {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Failed to determine the working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pipeline = Pipeline::new(&config, root);
    println!("Reading source template: {}", pipeline.template_path().display());

    match pipeline.run() {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn print_summary(summary: &RunSummary) {
    for dir in &summary.removed_legacy_dirs {
        println!("Removed {}/ directory", dir.display());
    }

    println!("\nGenerating {} themes...", summary.display_name);
    for theme in &summary.themes {
        println!("  -> {}", theme.label);
    }

    println!("\nUpdated manifest:");
    println!("   Name: {}", summary.manifest_name);
    println!("   Display Name: {}", summary.display_name);
    println!("   Publisher: {}", summary.publisher);
    println!("   Themes: {}", summary.themes.len());

    println!("\nDone. Ready to package.");
}

fn fail(error: &AppError) -> ExitCode {
    log::error!("{error}");
    match error {
        AppError::InvalidConfig(errors) => {
            for e in errors {
                eprintln!("{}\n", e.user_message());
            }
        }
        other => eprintln!("Error: {other}"),
    }
    ExitCode::FAILURE
}
