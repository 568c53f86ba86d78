//! `feelbot`: chat with the bot on stdin.
//!
//! One message per line. `/clear` starts a fresh conversation; EOF prints
//! the emotion analytics for the session and exits.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use feelbot::ai::{EmotionDistribution, FeelBot, WELCOME_MESSAGE};
use feelbot::config::{default_config_path, load_config};

fn init_tracing(fallback: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or("info")));
    // Logs go to stderr so replies on stdout stay pipeable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn print_distribution(out: &mut impl Write, dist: &EmotionDistribution) -> io::Result<()> {
    if dist.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n📊 Emotion Analytics ({} messages)", dist.total)?;
    for line in dist.summary_lines() {
        writeln!(out, "  {}", line)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let config_path = default_config_path();
    let config = load_config(&config_path);
    init_tracing(config.log_filter.as_deref());
    tracing::info!(
        path = %config_path.display(),
        compound = config.compound_sentiment,
        personalize = config.personalize,
        "feelbot starting"
    );

    let bot = FeelBot::from_config(&config);
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut dist = EmotionDistribution::new();

    writeln!(out, "FeelBot: {}", WELCOME_MESSAGE)?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "/clear" {
            print_distribution(&mut out, &dist)?;
            dist = EmotionDistribution::new();
            writeln!(out, "\nFeelBot: {}", WELCOME_MESSAGE)?;
            continue;
        }

        let turn = bot.respond_with_rng(&mut rng, text);
        let analysis = &turn.analysis;
        dist.record(analysis.primary_emotion, analysis.sentiment.label);

        writeln!(
            out,
            "[{}] {} {} • {} ({:.0}%)",
            turn.timestamp,
            analysis.primary_emotion.emoji(),
            analysis.primary_emotion,
            analysis.sentiment.label,
            analysis.confidence * 100.0
        )?;
        writeln!(out, "FeelBot: {}", turn.reply)?;
        out.flush().context("failed to flush stdout")?;
    }

    print_distribution(&mut out, &dist)?;
    Ok(())
}
