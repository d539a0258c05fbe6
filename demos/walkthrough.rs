//! Step one worksheet sentence through every phase.
//!
//! Run with: `cargo run --example walkthrough`
//!
//! Set `RUST_LOG=worksheet_reveal=debug` to see each advance logged.
//!
//! The demo loads the bundled two-day catalog, presses the button on the
//! first sentence of day 1 until it completes, and prints after every press:
//! step, phase, the button text for the next press, and whatever became
//! visible. It finishes by printing the client JSON for the completed card.

use tracing_subscriber::EnvFilter;
use worksheet_reveal::worksheet_engine::layout::SentenceDisplay;
use worksheet_reveal::{to_client_json, Catalog, Session, SessionConfig, WorksheetError};

const DAYS: &str = include_str!("data/days.json");

fn describe(display: &SentenceDisplay) -> String {
    match display {
        SentenceDisplay::Original(text) => text.clone(),
        SentenceDisplay::Corrected { text, spans, trailing } => {
            let fixes: Vec<String> = spans.iter().map(|s| format!("{}→{}", s.wrong, s.right)).collect();
            let tail = trailing.as_ref().map(|t| format!(" +{}", t.text)).unwrap_or_default();
            format!("{text}  [{}]{tail}", fixes.join(", "))
        }
        SentenceDisplay::Fixed { text, highlight, .. } => match highlight {
            Some(r) => format!("{}[{}]{}", &text[..r.start], &text[r.clone()], &text[r.end..]),
            None => text.clone(),
        },
    }
}

fn main() -> Result<(), WorksheetError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = Catalog::from_json_str(DAYS)?;
    let mut session = Session::new(catalog, SessionConfig::default())?;
    let day = session.current_day();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Day {day}, sentence 1");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    loop {
        let view = session.view(day, 0)?;
        let header: Vec<String> = view
            .header
            .tags
            .iter()
            .map(|t| format!("{} {}", t.count, t.pos_type.abbr()))
            .collect();
        println!(
            "step {:>2}  phase {}  [{}]  Find {} errors and {}",
            view.step,
            view.phase,
            view.button,
            view.header.error_count,
            header.join(" ")
        );
        println!("    {}", describe(&view.display));
        if let Some(c) = view.corrections.first() {
            println!("    correction {} of {}: {}", c.number, c.total, c.correction.explanation);
        }
        if let Some(p) = view.pos_tags.first() {
            println!("    {} → {} ({})", p.prompt, p.word, p.pos_type.badge());
        }
        if let Some(m) = &view.manipulation {
            println!("    task: {}", m.task);
            if let Some(ex) = m.examples.first() {
                println!("    example: {ex}");
            }
        }
        if let Some(v) = view.vocabulary {
            println!("    vocabulary: {} ({}) – {}", v.word, v.word_type, v.simple_definition);
        }
        if !view.trigger_enabled() {
            break;
        }
        session.advance(day, 0)?;
    }

    let view = session.view(day, 0)?;
    println!();
    println!("{}", serde_json::to_string_pretty(&to_client_json(&view)).unwrap_or_default());
    Ok(())
}
