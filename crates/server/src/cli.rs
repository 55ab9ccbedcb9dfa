//! CLI argument parsing and subcommand dispatch.

use std::path::Path;

use pdfquiz_core::quiz::{validate_quiz_count, DEFAULT_QUIZ_COUNT};
use pdfquiz_core::{Difficulty, Session};

use crate::app_config;
use crate::flow::{self, UploadOutcome};

/// Parse CLI arguments and dispatch to the appropriate subcommand.
///
/// Returns `Ok(true)` if a subcommand was handled, `Ok(false)` if `serve`
/// should be started (handled by the caller).
pub async fn dispatch(config: &pdfquiz_core::Config, args: &[String]) -> anyhow::Result<bool> {
    match args.get(1).map(|s| s.as_str()) {
        Some("extract") => {
            let Some(path) = args.get(2) else {
                anyhow::bail!("Usage: pdfquiz extract <path>");
            };
            extract(Path::new(path))?;
            Ok(true)
        }
        Some("quiz") => {
            let Some(path) = args.get(2) else {
                anyhow::bail!("Usage: pdfquiz quiz <path> [count] [difficulty]");
            };
            let count = match args.get(3) {
                Some(raw) => validate_quiz_count(raw.parse()?)?,
                None => DEFAULT_QUIZ_COUNT,
            };
            let difficulty = args
                .get(4)
                .map(|s| Difficulty::from(s.as_str()))
                .unwrap_or_default();
            quiz(config, Path::new(path), count, difficulty).await?;
            Ok(true)
        }
        Some("serve") | None => Ok(false),
        _ => {
            print_usage();
            Ok(true)
        }
    }
}

fn read_file(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok((file_name, bytes))
}

fn extract(path: &Path) -> anyhow::Result<()> {
    let (file_name, bytes) = read_file(path)?;
    let doc = pdfquiz_ingest::extract_text(&bytes, &file_name)?;
    eprintln!(
        "{} ({}): {} pages, {} chars",
        doc.filename,
        doc.file_type,
        doc.page_count(),
        doc.total_chars()
    );
    print!("{}", doc.full_text());
    Ok(())
}

/// One-shot run of upload + generate against the configured model.
async fn quiz(
    config: &pdfquiz_core::Config,
    path: &Path,
    count: u32,
    difficulty: Difficulty,
) -> anyhow::Result<()> {
    let Some(generator) = app_config::build_generator(config) else {
        anyhow::bail!("Quiz generation is not configured. Set GEMINI_API_KEY.");
    };
    let (file_name, bytes) = read_file(path)?;

    let mut session = Session::new();
    if let UploadOutcome::Processed { pages, chars } =
        flow::upload(&mut session, Some(&generator), &file_name, &bytes).await?
    {
        eprintln!("{file_name}: {pages} pages, {chars} chars");
    }
    println!("## Summary\n\n{}\n", session.summary());

    flow::generate_quizzes(&mut session, &generator, count, difficulty).await?;
    println!("## Quizzes\n\n{}", session.quizzes());
    Ok(())
}

fn print_usage() {
    println!("pdfquiz v{}", env!("CARGO_PKG_VERSION"));
    println!("Usage: pdfquiz <command>");
    println!("  serve                                Start HTTP server (default)");
    println!("  extract <path>                       Print the text extracted from a PDF or .txt file");
    println!("  quiz <path> [count] [difficulty]     Summarize a file and generate quizzes once");
    println!("                                       count: 10|15|20|25, difficulty: Easy|Normal|Advanced");
}
