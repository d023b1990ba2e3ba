use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use spy_core::{GameConfig, KeyModality, KeySource, Locale, Role};
use spy_scene::{
    ActionTimeouts, Agent, DescribeOrder, GameReport, RandomAgent, Scene, SceneConfig,
    SpeakOrder, Transcript,
};

use super::paint_role;

const PLAYER_NAMES: [&str; 9] = [
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan",
];

#[derive(Args)]
pub struct PlayArgs {
    /// Number of players (4 to 9)
    #[arg(short, long, default_value_t = 6)]
    pub players: usize,

    /// Number of games to play back to back
    #[arg(short, long, default_value_t = 1)]
    pub games: u32,

    /// Include a Blank player who receives no key
    #[arg(long)]
    pub blank: bool,

    /// Deal image keys instead of text keys (requires --image-keys)
    #[arg(long)]
    pub image: bool,

    /// JSON-lines file of extra text key pairs
    #[arg(long)]
    pub keys: Option<PathBuf>,

    /// Directory of image key pairs (one subdirectory per pair)
    #[arg(long)]
    pub image_keys: Option<PathBuf>,

    /// Moderator language: en or zh
    #[arg(short, long, default_value = "en")]
    pub locale: String,

    /// Describe one player at a time instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Seat Blanks in the latter half of the speak order
    #[arg(long)]
    pub blanks_late: bool,

    /// Random seed for roles, keys, and agents
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Per-action agent timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Abort on the first agent failure instead of substituting defaults
    #[arg(long)]
    pub debug: bool,

    /// Write the audit log here (.md for markdown, anything else for JSON lines)
    #[arg(short, long)]
    pub transcript: Option<PathBuf>,

    /// Print game reports as JSON lines instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: PlayArgs) -> Result<(), String> {
    let locale = Locale::by_code(&args.locale)
        .ok_or_else(|| format!("unknown locale '{}' (expected en or zh)", args.locale))?;
    let keys = load_keys(&args)?;
    let modality = if args.image {
        KeyModality::Image
    } else {
        KeyModality::Text
    };
    if keys.pairs(modality).is_empty() {
        return Err(format!("no {modality} key pairs available"));
    }

    let config = scene_config(&args, locale, modality);
    let agents: Vec<Box<dyn Agent>> = (0..args.players)
        .map(|i| {
            let seed = args.seed.wrapping_add(i as u64 + 1);
            Box::new(RandomAgent::new(player_name(i), seed)) as Box<dyn Agent>
        })
        .collect();

    let mut scene = Scene::new(config, keys, agents).map_err(|e| e.to_string())?;
    let reports = scene
        .run()
        .await
        .map_err(|e| format!("game failed: {e}"))?;

    if args.json {
        for report in &reports {
            let line = serde_json::to_string(report).map_err(|e| e.to_string())?;
            println!("{line}");
        }
    } else {
        print_reports(&reports, &args);
    }

    if let Some(path) = &args.transcript {
        write_transcript(scene.sink(), path)?;
        if !args.json {
            println!("  Transcript written to {}", path.display());
        }
    }
    Ok(())
}

fn player_name(index: usize) -> String {
    PLAYER_NAMES
        .get(index)
        .map(|n| n.to_string())
        .unwrap_or_else(|| format!("Player{}", index + 1))
}

fn load_keys(args: &PlayArgs) -> Result<KeySource, String> {
    let mut keys = KeySource::builtin();
    if let Some(path) = &args.keys {
        let added = keys.load_text_file(path).map_err(|e| e.to_string())?;
        tracing::info!(path = %path.display(), added, "loaded text key pairs");
    }
    if let Some(dir) = &args.image_keys {
        let added = keys.load_image_dir(dir).map_err(|e| e.to_string())?;
        tracing::info!(dir = %dir.display(), added, "loaded image key pairs");
    }
    Ok(keys)
}

fn scene_config(args: &PlayArgs, locale: Locale, modality: KeyModality) -> SceneConfig {
    let game = GameConfig::default()
        .with_seed(args.seed)
        .with_blank(args.blank)
        .with_modality(modality)
        .with_locale(locale);
    let describe_order = if args.sequential {
        DescribeOrder::Sequential
    } else {
        DescribeOrder::Concurrent
    };
    let speak_order = if args.blanks_late {
        SpeakOrder::BlanksLate
    } else {
        SpeakOrder::Shuffled
    };
    let timeouts = args
        .timeout_ms
        .map(|ms| ActionTimeouts::uniform(Duration::from_millis(ms)))
        .unwrap_or_default();

    SceneConfig::default()
        .with_game(game)
        .with_games(args.games)
        .with_debug(args.debug)
        .with_describe_order(describe_order)
        .with_speak_order(speak_order)
        .with_timeouts(timeouts)
}

fn print_reports(reports: &[GameReport], args: &PlayArgs) {
    println!(
        "  {} {}",
        "Who is the Spy".bold(),
        format!(
            "({} players, {} games, seed={})",
            args.players,
            reports.len(),
            args.seed
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Game",
        "Rounds",
        "Winner",
        "Winners",
        "Spies",
        "Eliminated",
        "Civilian key",
        "Spy key",
    ]);

    let mut wins: BTreeMap<Role, usize> = BTreeMap::new();
    for (i, report) in reports.iter().enumerate() {
        let winner = match report.winner {
            Some(role) => {
                *wins.entry(role).or_default() += 1;
                paint_role(role).to_string()
            }
            None => "-".dimmed().to_string(),
        };
        table.add_row(vec![
            (i + 1).to_string(),
            report.rounds.to_string(),
            winner,
            report.winners.join(", "),
            report.players_with(Role::Spy).join(", "),
            report.eliminated.join(", "),
            report.civilian_key.to_string(),
            report.spy_key.to_string(),
        ]);
    }
    println!("{table}");

    if reports.len() > 1 {
        println!();
        println!("  {}", "Wins by role".bold().underline());
        for role in Role::ALL {
            let count = wins.get(&role).copied().unwrap_or(0);
            if count > 0 || role != Role::Blank || args.blank {
                println!("  {:<10} {count}", paint_role(role));
            }
        }
    }
}

fn write_transcript(transcript: &Transcript, path: &Path) -> Result<(), String> {
    let markdown = path.extension().is_some_and(|ext| ext == "md");
    let content = if markdown {
        transcript.export_markdown()
    } else {
        transcript
            .export_json_lines()
            .map_err(|e| format!("cannot serialize transcript: {e}"))?
    };
    std::fs::write(path, content).map_err(|e| format!("cannot write {}: {e}", path.display()))
}
