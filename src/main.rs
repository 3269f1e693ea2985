use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use vpiano::config::PlayerConfig;
use vpiano::event::{events_from_json, events_to_json, NoteEvent};
use vpiano::keymap::char_for;
use vpiano::layout::{key_offset_x, keys_for, Layout};
use vpiano::sink::LogSink;
use vpiano::{PianoError, Player, Result};

#[derive(Parser)]
#[command(name = "vpiano", about = "Virtual piano note engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the key table of a layout
    Keys {
        /// Keyboard layout (full or small)
        #[arg(short, long, default_value_t = Layout::Full)]
        layout: Layout,
    },
    /// Parse a score and print its note events as JSON
    Parse {
        #[command(flatten)]
        source: ScoreSource,
        /// Read the input as an HTML page
        #[arg(long)]
        html: bool,
    },
    /// Run a whole playback session and log every note played
    Play {
        #[command(flatten)]
        source: ScoreSource,
        /// Player settings (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Read the input as a JSON note event list
        #[arg(long, conflicts_with = "score")]
        json: bool,
    },
    /// List the embedded scores, or those whose name contains QUERY
    Scores { query: Option<String> },
}

#[derive(Args)]
struct ScoreSource {
    /// Score file
    #[arg(required_unless_present = "score")]
    file: Option<PathBuf>,
    /// Embedded score name (see `vpiano scores`)
    #[arg(short, long, conflicts_with = "file")]
    score: Option<String>,
}

impl ScoreSource {
    fn read(&self) -> Result<String> {
        if let Some(name) = &self.score {
            return vpiano_scores::get_score(name)
                .map(|score| score.content)
                .ok_or_else(|| PianoError::ScoreImport(format!("no embedded score named '{}'", name)));
        }
        match &self.file {
            Some(path) => read_file(path),
            None => Err(PianoError::ScoreImport("no score given".to_string())),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PianoError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keys { layout } => print_keys(layout),
        Commands::Parse { source, html } => parse_score(&source, html),
        Commands::Play {
            source,
            config,
            json,
        } => play_score(&source, config.as_deref(), json),
        Commands::Scores { query } => list_scores(query.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_keys(layout: Layout) -> Result<()> {
    println!("{:>4}  {:<4}  {:<5}  {:>3}  {:>6}", "midi", "name", "color", "key", "x");
    for key in keys_for(layout) {
        let color = if key.is_black { "black" } else { "white" };
        let label = char_for(key.midi).map(String::from).unwrap_or_default();
        let x = key_offset_x(key.midi, layout).unwrap_or_default();
        println!("{:>4}  {:<4}  {:<5}  {:>3}  {:>6.2}", key.midi, key.name, color, label, x);
    }
    Ok(())
}

fn load_events(source: &ScoreSource, html: bool) -> Result<Vec<NoteEvent>> {
    let text = source.read()?;
    if html {
        vpiano::parse_html(&text)
    } else {
        vpiano::parse(&text)
    }
}

fn parse_score(source: &ScoreSource, html: bool) -> Result<()> {
    let events = load_events(source, html)?;
    println!("{}", events_to_json(&events)?);
    Ok(())
}

fn play_score(source: &ScoreSource, config: Option<&Path>, json: bool) -> Result<()> {
    let config = match config {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig {
            autoplay: true,
            ..PlayerConfig::default()
        },
    };
    let events = if json {
        events_from_json(&source.read()?)?
    } else {
        load_events(source, false)?
    };

    let mut sink = LogSink::new(config.sample_root.clone());
    let mut player = Player::new(config)?;
    player.load(events);
    player.play();

    while !player.is_finished() {
        player.tick(&mut sink);
    }

    eprintln!(
        "Played {} notes in {:.1}s of playback",
        sink.played(),
        player.now()
    );
    Ok(())
}

fn list_scores(query: Option<&str>) -> Result<()> {
    let names: Vec<String> = match query {
        Some(q) => vpiano_scores::search(q)
            .into_iter()
            .map(|score| score.name)
            .collect(),
        None => vpiano_scores::list_scores()
            .into_iter()
            .map(String::from)
            .collect(),
    };
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
