//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::debug;

use chatlens::ChatlensError;
use chatlens::cli::Args;
use chatlens::core::output::write_report_json;
use chatlens::core::{Report, apply_filters};
use chatlens::format::write_to_format;
use chatlens::parser::TranscriptParser;

/// How many rows of each ranked table to print.
const SHOWN: usize = 5;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "chatlens=debug"
        } else {
            "chatlens=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();

    let filter_config = args.filter_config()?;
    let stats_config = args.stats_config()?;
    let selection = args.selection();

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("👤 View:    {}", selection);
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    println!();

    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let parser = TranscriptParser::with_config(args.transcript_config());
    let transcript = parser.parse(Path::new(&args.input))?;
    println!(
        "   Found {} records ({:.2}s)",
        transcript.len(),
        parse_start.elapsed().as_secs_f64()
    );
    if !transcript.skipped().is_empty() {
        println!(
            "⚠️  Skipped {} header(s) with unreadable dates",
            transcript.skipped().len()
        );
    }

    let total_records = transcript.len();
    let records = apply_filters(transcript.into_records(), &filter_config);
    if filter_config.is_active() {
        println!("🔍 {} records after filtering", records.len());
    }

    let report = Report::build(&records, selection, &stats_config);
    debug!(
        messages = report.stats.messages,
        months = report.monthly_timeline.len(),
        "report built"
    );
    print_report(&report);

    if let Some(ref path) = args.report {
        write_report_json(&report, path)?;
        println!("💾 Report saved to {}", path);
    }

    if let Some(ref path) = args.export {
        let format = args.export_format();
        write_to_format(&records, path, format, &args.output_config())?;
        println!("💾 Exported {} records as {} to {}", records.len(), format, path);
    }

    println!();
    println!(
        "✅ Done! {} records in {:.2}s",
        total_records,
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_report(report: &Report) {
    let stats = &report.stats;
    println!();
    println!("📊 Top statistics:");
    println!("   Messages:  {}", stats.messages);
    println!("   Words:     {}", stats.words);
    println!("   Media:     {}", stats.media);
    println!("   Links:     {}", stats.links);

    if let Some((day, count)) = report.busiest_days.first() {
        println!("📆 Busiest day:    {} ({})", day, count);
    }
    if let Some((month, count)) = report.busiest_months.first() {
        println!("🗓️  Busiest month:  {} ({})", month, count);
    }
    if let Some(peak) = report.monthly_timeline.iter().max_by_key(|p| p.messages) {
        println!("📈 Peak month:     {} ({})", peak.label, peak.messages);
    }

    if let Some(ref users) = report.busy_users {
        println!();
        println!("🏆 Most active:");
        for user in users.iter().take(SHOWN) {
            println!(
                "   {:<20} {:>6}  {:>6.2}%",
                user.author, user.messages, user.percent
            );
        }
    }

    if !report.common_words.is_empty() {
        println!();
        println!("💬 Common words:");
        let words: Vec<String> = report
            .common_words
            .iter()
            .take(SHOWN * 2)
            .map(|(w, n)| format!("{} ({})", w, n))
            .collect();
        println!("   {}", words.join(", "));
    }

    if !report.emojis.is_empty() {
        println!();
        let emojis: Vec<String> = report
            .emojis
            .iter()
            .take(SHOWN)
            .map(|(e, n)| format!("{} {}", e, n))
            .collect();
        println!("😀 Emojis:  {}", emojis.join("  "));
    }
}
