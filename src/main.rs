use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use football_picks::config::Config;
use football_picks::feed::{build_slate, FootballData, FootballProvider};
use football_picks::models::AnalysedFixture;
use football_picks::settlement::Prediction;
use football_picks::slate::Slate;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the picks
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let slate = match &config.slate {
        Some(path) => {
            let slate = Slate::load(path)?;
            info!("Slate loaded from {}: {} fixture(s)", path, slate.fixtures.len());
            slate
        }
        None => {
            let api_key = config.api_key.as_deref().unwrap_or_default();
            let provider = FootballData::new(api_key, Some(&config.api_url))?;
            let date = config.match_date();
            info!("Fetching {} slate from {}", date, provider.name());
            build_slate(&provider, date, &config.slate_options())
                .await
                .context("Failed to build slate")?
        }
    };

    let picks = slate.select(config.count);
    if picks.is_empty() {
        warn!(
            "No pick reached the confidence floor ({} fixture(s) considered)",
            slate.fixtures.len()
        );
    }
    for (rank, pick) in picks.iter().enumerate() {
        info!(
            "#{} {} vs {} → {} ({}%)",
            rank + 1,
            pick.fixture.home_team.name,
            pick.fixture.away_team.name,
            pick.analysis.pick_label,
            pick.confidence()
        );
    }

    if config.json {
        let now = Utc::now();
        let predictions: Vec<Prediction> = picks
            .iter()
            .map(|p| Prediction::from_analysed(p, now))
            .collect();
        println!("{}", serde_json::to_string_pretty(&predictions)?);
    } else {
        print!("{}", render_table(&picks));
    }

    Ok(())
}

fn render_table(picks: &[AnalysedFixture]) -> String {
    let mut out = String::new();
    for (rank, p) in picks.iter().enumerate() {
        let f = &p.fixture;
        out.push_str(&format!(
            "{:>2}. [{}] {} {} vs {}\n    {} · {}%\n",
            rank + 1,
            f.competition.code,
            f.utc_date.format("%H:%M"),
            f.home_team.name,
            f.away_team.name,
            p.analysis.pick_label,
            p.confidence()
        ));
        for reason in &p.analysis.reasoning {
            out.push_str(&format!("      - {reason}\n"));
        }
    }
    out
}
