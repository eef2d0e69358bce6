//! Operator commands that do not start the server.

use std::io::{BufRead, Write};
use texttale_core::StoryOptions;
use texttale_error::TextTaleResult;
use texttale_server::TextTaleConfig;
use texttale_storage::ArtifactRegistry;

/// Delete every audio file in the configured directory.
///
/// Asks for confirmation on stdin unless `yes` is set.
pub fn purge_audio(config: &TextTaleConfig, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let directory = config.audio().directory();

    if !yes {
        print!(
            "Delete ALL audio files in {}, including ones not created by TextTale? [y/N] ",
            directory.display()
        );
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted");
            return Ok(());
        }
    }

    let registry = ArtifactRegistry::startup(directory)?;
    let report = registry.cleanup_all()?;
    println!("Removed {} file(s)", report.removed);
    for failure in &report.failures {
        eprintln!("  could not remove {}: {}", failure.path.display(), failure.reason);
    }
    Ok(())
}

/// Print the option sets as pretty JSON.
pub fn print_options() -> TextTaleResult<()> {
    match serde_json::to_string_pretty(&StoryOptions::all()) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "Failed to render options"),
    }
    Ok(())
}
