//! # chatview CLI
//!
//! Command-line interface for the chatview library.

use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatview::cli::Args;
use chatview::config::IngestConfig;
use chatview::core::{ChatStats, FilterConfig, OutputConfig, apply_filters, layout_rows};
use chatview::format::{format_file_size, write_to_format};
use chatview::ingest::{ChatIngestor, ExportFile};
use chatview::media::{DirectoryRegistry, InMemoryRegistry, MediaRegistry};
use chatview::{ChatviewError, ParsedChat};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the input parsed but held no messages.
async fn run() -> Result<bool, ChatviewError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let output_path = args.output_path();

    // Validate filters before touching the input
    let mut filter_config = FilterConfig::new();
    if let Some(ref date) = args.date_from {
        filter_config = filter_config.with_date_from(date)?;
    }
    if let Some(ref date) = args.date_to {
        filter_config = filter_config.with_date_to(date)?;
    }
    if let Some(ref from) = args.from {
        filter_config = filter_config.with_sender(from.clone());
    }

    println!("💬 chatview v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);
    if let Some(ref dir) = args.media_dir {
        println!("🖼️  Media:   {}", dir);
    }
    if let Some(ref date) = args.date_from {
        println!("📅 From:    {}", date);
    }
    if let Some(ref date) = args.date_to {
        println!("📅 To:      {}", date);
    }
    if let Some(ref from) = args.from {
        println!("👤 Sender:  {}", from);
    }
    println!();

    let registry: Arc<dyn MediaRegistry> = match args.media_dir {
        Some(ref dir) => Arc::new(DirectoryRegistry::new(dir)?),
        None => Arc::new(InMemoryRegistry::new()),
    };
    let ingestor = ChatIngestor::with_config(registry, IngestConfig::default());

    println!("⏳ Reading export...");
    let parse_start = Instant::now();
    let file = ExportFile::from_path(&args.input, ingestor.config().max_file_size).await?;
    println!("   {} ({})", file.name, format_file_size(file.size()));
    let chat = ingestor.parse_file(file).await?;
    println!(
        "   Found {} messages from {} participants ({:.2}s)",
        chat.messages.len(),
        chat.participants.len(),
        parse_start.elapsed().as_secs_f64()
    );

    if chat.is_empty() {
        ingestor.release(&chat);
        eprintln!("❌ {} is not a recognizable WhatsApp chat export.", args.input);
        return Ok(false);
    }

    let chat = match args.self_name {
        Some(ref name) => chat.with_self(name.clone()),
        None => chat,
    };
    let stats = ChatStats::from_chat(&chat);

    let view = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let messages = apply_filters(chat.messages.clone(), &filter_config);
        println!("   {} messages after filtering", messages.len());
        ParsedChat {
            messages,
            ..chat.clone()
        }
    } else {
        chat.clone()
    };

    let mut output_config = OutputConfig::new()
        .with_self_flag()
        .with_swapped(args.swap);
    if args.media_dir.is_some() {
        output_config = output_config.with_media();
    }
    if args.no_system {
        output_config = output_config.without_system();
    }

    println!("💾 Writing {}...", args.format);
    let write_result = write_to_format(&view, &output_path, args.format, &output_config);

    if args.media_dir.is_none() {
        ingestor.release(&chat);
    }
    write_result?;

    let days = layout_rows(&view.messages)
        .iter()
        .filter(|row| row.date_separator.is_some())
        .count();

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    println!();
    println!("📊 Summary:");
    println!("   Chat:      {}", chat.title());
    println!("   Self:      {}", display_self(&chat, args.swap));
    println!("   Messages:  {} ({} notices)", stats.total_messages, stats.system_like);
    if filter_config.is_active() {
        println!("   Filtered:  {} messages over {} days", view.messages.len(), days);
    } else {
        println!("   Days:      {}", days);
    }
    if let (Some(first), Some(last)) = (stats.first_message, stats.last_message) {
        println!("   Span:      {} → {}", first.date(), last.date());
    }
    println!(
        "   Media:     {} extracted, {} referenced",
        stats.media_count, stats.with_attachments
    );
    if stats.missing_media() > 0 {
        println!("   Missing:   {} attachments not in the export", stats.missing_media());
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(true)
}

fn display_self(chat: &ParsedChat, swapped: bool) -> String {
    if chat.self_name.is_empty() {
        return "(unknown)".to_string();
    }
    if swapped {
        format!("everyone except {}", chat.self_name)
    } else {
        chat.self_name.clone()
    }
}
