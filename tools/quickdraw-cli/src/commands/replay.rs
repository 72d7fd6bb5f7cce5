//! Replay a scripted session through the game core.

use std::path::PathBuf;

use quickdraw_classifier::ClassifierAdapter;
use quickdraw_common::clock::SessionClock;
use quickdraw_common::config::AppConfig;
use quickdraw_game::{GameSession, RoundOutcome, SessionControl};
use quickdraw_sketch_model::event::{parse_events, EventKind};

pub fn run(config: &AppConfig, script: PathBuf, seed: Option<u64>) -> anyhow::Result<()> {
    println!("Replaying session script: {}", script.display());

    let content = std::fs::read_to_string(&script)
        .map_err(|e| anyhow::anyhow!("Failed to read script {}: {e}", script.display()))?;
    let events =
        parse_events(&content).map_err(|e| anyhow::anyhow!("Failed to parse script: {e}"))?;
    println!("  Loaded {} events", events.len());

    let classifier = ClassifierAdapter::load(&config.model_path, &config.labels_path);
    if let Some(reason) = classifier.load_error() {
        println!("  [WARN] Classifier disabled: {reason}");
    }
    let mut session = GameSession::new(config, classifier);
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }

    let clock = SessionClock::start();
    tracing::debug!(epoch = clock.epoch_wall(), "Replay clock started");

    let mut rounds = 0u32;
    let mut last_start = None;
    for event in &events {
        let now = clock.at_offset_ns(event.timestamp_ns);
        let outcome = match &event.kind {
            EventKind::Pointer { .. } => match event.pointer_event() {
                Some(pointer) => session.handle_pointer(pointer, now),
                None => None,
            },
            EventKind::Command { command } => {
                if session.handle_command(*command, now) == SessionControl::Quit {
                    println!(
                        "  Quit at {:.2}s",
                        SessionClock::ns_to_secs(event.timestamp_ns)
                    );
                    break;
                }
                None
            }
            EventKind::Tick => session.tick(now),
        };

        let status = session.status(now);
        let started_at = session.judge().round().map(|round| round.started_at);
        if started_at != last_start {
            if let Some(word) = &status.target_word {
                rounds += 1;
                println!(
                    "  [{:>7.2}s] Round {rounds}: draw \"{word}\"",
                    SessionClock::ns_to_secs(event.timestamp_ns)
                );
            }
            last_start = started_at;
        }

        if let Some(outcome) = outcome {
            let guess = status
                .prediction
                .as_ref()
                .and_then(|p| p.label.clone().map(|label| (label, p.confidence)));
            let verdict = match outcome {
                RoundOutcome::Won => "recognized",
                RoundOutcome::TimedOut => "time's up",
            };
            match guess {
                Some((label, confidence)) => println!(
                    "  [{:>7.2}s] {verdict}: guessed {label} ({:.1}%)",
                    SessionClock::ns_to_secs(event.timestamp_ns),
                    confidence * 100.0
                ),
                None => println!(
                    "  [{:>7.2}s] {verdict}: no guess",
                    SessionClock::ns_to_secs(event.timestamp_ns)
                ),
            }
        }
    }

    println!("\nReplay complete. Rounds: {rounds}, score: {}", session.score());
    Ok(())
}

#[cfg(test)]
mod tests {
    use quickdraw_sketch_model::event::{parse_events, EventKind};

    #[test]
    fn sample_script_parses() {
        let events = parse_events(include_str!("../../fixtures/sample-session.jsonl")).unwrap();
        assert!(events.len() > 40);
        assert!(events
            .windows(2)
            .all(|pair| pair[0].timestamp_ns <= pair[1].timestamp_ns));
        assert!(matches!(events.last().unwrap().kind, EventKind::Command { .. }));
    }
}
