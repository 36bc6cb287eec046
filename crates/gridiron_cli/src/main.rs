//! gridiron - command-line front end for the game simulator
//!
//! - `simulate`: play one game, print a summary or the JSON response
//! - `batch`: play many seeded games in parallel, print win rates

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridiron_core::api::json_api::{BatchResponse, GameResponse, SCHEMA_VERSION};
use gridiron_core::engine::batch::{simulate_batch, BatchConfig};
use gridiron_core::engine::config::seed_from_signed;
use gridiron_core::{simulate_game, GameConfig, Side, TeamId, TeamProfile};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridiron")]
#[command(about = "Stochastic American football game simulator", long_about = None)]
struct Cli {
    /// Debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct MatchupArgs {
    /// Home team id
    #[arg(long)]
    home: String,

    /// Away team id
    #[arg(long)]
    away: String,

    #[arg(long, default_value_t = 0.5)]
    home_strength: f64,

    #[arg(long, default_value_t = 0.5)]
    away_strength: f64,

    /// Weather multiplier on every sampled probability
    #[arg(long, default_value_t = 1.0)]
    weather: f64,

    /// Safety cap on plays per game
    #[arg(long, default_value_t = 200)]
    max_plays: usize,

    /// Play one sudden-death period when regulation ends tied
    #[arg(long)]
    overtime: bool,

    /// Kick off to the other team at the start of the third quarter
    #[arg(long)]
    halftime_kickoff: bool,
}

impl MatchupArgs {
    fn config(&self) -> GameConfig {
        let home = TeamId::or_fallback(&self.home, "HOME");
        let away = TeamId::or_fallback(&self.away, "AWAY");
        GameConfig::new(
            TeamProfile::with_strength(home.0, self.home_strength),
            TeamProfile::with_strength(away.0, self.away_strength),
        )
        .with_weather(self.weather)
        .with_max_plays(self.max_plays)
        .with_overtime(self.overtime)
        .with_halftime_kickoff(self.halftime_kickoff)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single game
    Simulate {
        #[command(flatten)]
        matchup: MatchupArgs,

        /// Seed (a fresh one is drawn and printed when omitted; negative
        /// seeds play with their magnitude)
        #[arg(long, allow_negative_numbers = true)]
        seed: Option<i64>,

        /// Print the JSON response instead of the text summary
        #[arg(long)]
        json: bool,

        /// Also write the JSON response (with the full play log) to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Simulate many games and report win rates
    Batch {
        #[command(flatten)]
        matchup: MatchupArgs,

        /// Number of games
        #[arg(long, default_value_t = 1000)]
        games: usize,

        /// Base seed; game i uses seed + i
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        seed: i64,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate { matchup, seed, json, out } => {
            let response = simulate(&matchup, seed.map(seed_from_signed), out.is_some())?;
            if let Some(path) = out {
                write_response(&path, &response)?;
                log::info!("response written to {}", path.display());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render_game(&response));
            }
        }

        Commands::Batch { matchup, games, seed, json } => {
            if games == 0 {
                anyhow::bail!("--games must be at least 1");
            }
            let base_seed = seed_from_signed(seed);
            let batch = BatchConfig::new(matchup.config(), games, base_seed);
            let summary = simulate_batch(&batch)?;
            let response = BatchResponse {
                schema_version: SCHEMA_VERSION,
                base_seed,
                home_team: batch.game.home,
                away_team: batch.game.away,
                summary,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render_batch(&response));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn simulate(matchup: &MatchupArgs, seed: Option<u64>, include_plays: bool) -> Result<GameResponse> {
    let result = simulate_game(matchup.config(), seed).context("simulation failed")?;
    Ok(GameResponse::from_result(result, include_plays)?)
}

fn write_response(path: &Path, response: &GameResponse) -> Result<()> {
    let json = serde_json::to_string_pretty(response)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn team_name(response: &GameResponse, side: Side) -> &str {
    match side {
        Side::Home => response.home_team.id.as_str(),
        Side::Away => response.away_team.id.as_str(),
    }
}

fn render_game(response: &GameResponse) -> String {
    let mut out = String::new();
    out.push_str("Gridiron Game Simulation\n");
    out.push_str(&"=".repeat(40));
    out.push('\n');
    out.push_str(&format!(
        "\nFinal Score: {} {} - {} {} ({:?})\n",
        response.home_team.id,
        response.home_score,
        response.away_team.id,
        response.away_score,
        response.end
    ));
    out.push_str(&format!("Seed: {}\n", response.seed));
    out.push_str(&format!("Total Plays: {}\n", response.report.total_plays));

    out.push_str("\nDrives:\n");
    for drive in &response.drives {
        out.push_str(&format!(
            "  Q{} {:<5} own {:>2}: {:>2} plays {:>4} yds  {}\n",
            drive.start_quarter,
            team_name(response, drive.team),
            drive.start_field_position,
            drive.play_count,
            drive.total_yards,
            drive.result
        ));
    }

    let report = &response.report;
    out.push_str("\nReport:\n");
    out.push_str(&format!("  Momentum volatility:   {:.3}\n", report.momentum_volatility));
    out.push_str(&format!("  Yards autocorrelation: {:.3}\n", report.yards_autocorrelation));
    out.push_str(&format!("  Coherence:             {:.3}\n", report.coherence));
    out.push_str(&format!(
        "  Scoring drives:        {} of {}\n",
        report.scoring_drives, report.total_drives
    ));
    out.push_str(&format!("  Mean drive yards:      {:.1}\n", report.mean_drive_yards));

    out.push_str("\nHighlights:\n");
    for h in &response.highlights {
        out.push_str(&format!(
            "Q{} - {}s - {} {}: {} yards\n",
            h.quarter,
            h.time_at_snap,
            team_name(response, h.team),
            h.play_type,
            h.yards
        ));
        out.push_str(&format!(
            "Score: {} {} - {} {}\n",
            response.home_team.id, h.home_score, response.away_team.id, h.away_score
        ));
        out.push_str(&"-".repeat(40));
        out.push('\n');
    }
    out
}

fn render_batch(response: &BatchResponse) -> String {
    let s = &response.summary;
    format!(
        "{} vs {} over {} games (base seed {})\n  {} wins: {} ({:.1}%)\n  {} wins: {} ({:.1}%)\n  ties: {}\n  mean score: {:.1} - {:.1}\n  capped: {}\n",
        response.home_team.id,
        response.away_team.id,
        s.games,
        response.base_seed,
        response.home_team.id,
        s.home_wins,
        s.home_win_rate * 100.0,
        response.away_team.id,
        s.away_wins,
        s.away_win_rate * 100.0,
        s.ties,
        s.mean_home_score,
        s.mean_away_score,
        s.capped
    )
}
