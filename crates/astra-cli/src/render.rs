//! Plain-text rendering of dashboard widgets.
//!
//! The browser dashboard rendered these payloads as charts and cards; the
//! terminal client renders text projections of the same data. Rendering is
//! presentation only — nothing here mutates state.

use astra_core::document::Document;
use astra_core::error::AstraError;
use astra_core::exchange::{
    MarketEvent, QueryExchange, ResultPayload, Sentiment, StandardResult, TrendSeriesSet,
};
use colored::Colorize;
use std::io::{BufRead, Write};

/// Non-blocking failure notification: one red line on stderr.
pub fn notify_error(err: &AstraError) {
    eprintln!("{} {}", "✗".red().bold(), err.notification().red());
}

/// Ack/status line.
pub fn notify_info(message: &str) {
    println!("{} {}", "·".bright_black(), message);
}

/// Asks for confirmation before a destructive call. Anything but an
/// explicit yes declines.
pub fn confirm_on_stdin(chat_id: &str) -> Result<bool, AstraError> {
    print!("Delete exchange '{chat_id}'? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Renders a result payload with the widget set its mode selects.
pub fn result(payload: &ResultPayload) {
    match payload {
        ResultPayload::Standard(standard) => standard_result(standard),
        ResultPayload::Rag(rag) => {
            section("Answer from your documents");
            paragraph(&rag.summary);
        }
    }
}

/// Renders a replayed history entry: the original query, then its result.
pub fn exchange(exchange: &QueryExchange) {
    println!(
        "{} {}",
        format!("[{}]", exchange.display_timestamp()).bright_black(),
        exchange.query.green()
    );
    result(&exchange.response);
}

fn standard_result(standard: &StandardResult) {
    section("Summary");
    paragraph(&standard.summary);

    if !standard.market_insights.is_empty() {
        section("Market Insights");
        paragraph(&standard.market_insights);
    }

    if !standard.social_trends.is_empty() {
        section("Social Trends");
        for trend in &standard.social_trends {
            let marker = match trend.sentiment {
                Sentiment::Positive => "▲".green(),
                Sentiment::Negative => "▼".red(),
                Sentiment::Neutral => "·".bright_black(),
            };
            println!("  {marker} {}", trend.trend);
        }
    }

    if !standard.competitor_trend.timeseries.is_empty() {
        series_set("Competitor Performance", &standard.competitor_trend.timeseries);
    }
    if !standard.market_trend.sector_performance.is_empty() {
        series_set("Market Trend", &standard.market_trend.sector_performance);
    }

    if !standard.event_spikes.events_detected.is_empty() {
        section("Recent Market Events");
        for event in &standard.event_spikes.events_detected {
            event_row(event);
        }
    }
}

fn series_set(fallback_title: &str, set: &TrendSeriesSet) {
    let title = set.title.as_deref().unwrap_or(fallback_title);
    section(title);
    if let (Some(first), Some(last)) = (set.x.first(), set.x.last()) {
        println!("  {}", format!("{first} – {last}").bright_black());
    }
    for series in &set.series {
        let (Some(first), Some(last)) = (series.data.first(), series.data.last()) else {
            continue;
        };
        let delta = last - first;
        let delta_text = format!("{delta:+.1}");
        let delta_colored = if delta >= 0.0 {
            delta_text.green()
        } else {
            delta_text.red()
        };
        let label = match &series.ticker {
            Some(ticker) => format!("{} ({ticker})", series.name),
            None => series.name.clone(),
        };
        println!("  {label}: {first:.1} → {last:.1} ({delta_colored})");
    }
}

fn event_row(event: &MarketEvent) {
    let direction = if event.direction == "+" {
        "▲".green()
    } else {
        "▼".red()
    };
    println!(
        "  {} {} {} {:+.1}%  {}",
        event.date.bright_black(),
        event.entity_or_topic.bold(),
        direction,
        event.price_move_1d_pct,
        event.headline
    );
}

/// Renders the history listing: position, timestamp, query text.
pub fn history_list(entries: &[QueryExchange]) {
    if entries.is_empty() {
        notify_info("no chats yet");
        return;
    }
    section("Chat History");
    for (position, entry) in entries.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", position + 1).bold(),
            format!("[{}]", entry.display_timestamp()).bright_black(),
            entry.query
        );
    }
}

/// Renders the document listing.
pub fn document_list(documents: &[Document]) {
    if documents.is_empty() {
        notify_info("no documents uploaded yet");
        return;
    }
    section("Your RAG Documents");
    for document in documents {
        println!(
            "  {} {}",
            document.display_name().bold(),
            format!("({})", document.id).bright_black()
        );
    }
}

fn section(title: &str) {
    println!();
    println!("{}", format!("── {title} ──").bright_magenta().bold());
}

fn paragraph(text: &str) {
    for line in text.lines() {
        println!("  {}", line.bright_blue());
    }
}
