use std::env;
use std::process;
use std::time::Duration;

use pinyin_chart::playback::{simulate, UniformTransport};
use pinyin_chart::{
    column_selection, is_valid, locate, normalize, row_selection, standalone_form, tones, Cell,
    Chart, ChartConfig, ChartError, JoinMode, Onset, RimeSlot,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: pinyin-chart [options] <command>

Commands:
  tones <syllable>          Print the five tone renderings
  check <onset> <row>       Print the canonical form and validity of a cell
  chart                     Print the chart model as JSON
  play row <row>            Simulate playback of a row
  play column <onset>       Simulate playback of a column
  play syllable <syllable>  Simulate playback of one syllable

Options:
  --config <file.yaml>      Load settings from a YAML file
  --notation <file.yaml>    Use a different notation table
  --locale <key>            Notation locale (default: urdu)
  --separated               Show notation as 'onset + rime'
  --clip-ms <ms>            Simulated clip length (default: 600)";

const DEFAULT_CLIP_MS: u64 = 600;

struct Options {
    config: Option<String>,
    notation: Option<String>,
    locale: Option<String>,
    separated: bool,
    clip_ms: u64,
    command: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let config = match load_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&options, &config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: None,
        notation: None,
        locale: None,
        separated: false,
        clip_ms: DEFAULT_CLIP_MS,
        command: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => options.config = Some(value_of(&mut iter, arg)?),
            "--notation" => options.notation = Some(value_of(&mut iter, arg)?),
            "--locale" => options.locale = Some(value_of(&mut iter, arg)?),
            "--separated" => options.separated = true,
            "--clip-ms" => {
                let value = value_of(&mut iter, arg)?;
                options.clip_ms = value
                    .parse()
                    .map_err(|_| format!("Invalid value for --clip-ms: '{}'", value))?;
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            _ => options.command.push(arg.clone()),
        }
    }

    if options.command.is_empty() {
        return Err("No command given".to_string());
    }
    Ok(options)
}

fn value_of<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<String, String> {
    iter.next()
        .cloned()
        .ok_or_else(|| format!("Missing value for {}", flag))
}

/// Config file first, then command-line overrides.
fn load_config(options: &Options) -> Result<ChartConfig, ChartError> {
    let mut config = match &options.config {
        Some(path) => ChartConfig::from_path(path)?,
        None => ChartConfig::default(),
    };
    if let Some(notation) = &options.notation {
        config.notation = Some(notation.into());
    }
    if let Some(locale) = &options.locale {
        config.locale = locale.clone();
    }
    if options.separated {
        config.join = JoinMode::Separated;
    }
    Ok(config)
}

fn run(options: &Options, config: &ChartConfig) -> Result<(), ChartError> {
    let command: Vec<&str> = options.command.iter().map(String::as_str).collect();

    match command.as_slice() {
        ["tones", syllable] => print_json(&tones(syllable)),
        ["check", onset, row] => {
            let onset: Onset = onset.parse()?;
            let slot: RimeSlot = row.parse()?;
            let table = config.notation_table()?;
            let valid = is_valid(onset, slot);
            let pinyin = normalize(onset, slot);
            print_json(&CheckReport {
                onset,
                row: slot.row(),
                rime: slot.rime().as_str(),
                valid,
                notation: valid.then(|| {
                    table.notate_cell(onset, slot.rime(), &config.locale, config.join)
                }),
                standalone: standalone_form(slot),
                pinyin,
            })
        }
        ["chart"] => {
            let table = config.notation_table()?;
            print_json(&Chart::build(&table, &config.locale, config.join))
        }
        ["play", "row", row] => play(options, config, &row_selection(row.parse()?)),
        ["play", "column", onset] => play(options, config, &column_selection(onset.parse()?)),
        ["play", "syllable", syllable] => {
            let canonical = match locate(syllable) {
                Some(Cell::Syllable(onset, slot)) => normalize(onset, slot),
                Some(Cell::Standalone(slot)) => standalone_form(slot).unwrap_or_default(),
                None => {
                    eprintln!("'{}' is not a syllable of the chart", syllable);
                    process::exit(1);
                }
            };
            play(options, config, &[canonical])
        }
        _ => {
            eprintln!("Unknown command '{}'", options.command.join(" "));
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    onset: Onset,
    row: usize,
    rime: &'static str,
    pinyin: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    notation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    standalone: Option<String>,
}

fn play(options: &Options, config: &ChartConfig, selection: &[String]) -> Result<(), ChartError> {
    let mut scheduler = config.scheduler();
    let mut transport = UniformTransport::new(Duration::from_millis(options.clip_ms));
    let timeline = simulate(&mut scheduler, &mut transport, selection);
    tracing::info!(syllables = selection.len(), clips = timeline.len(), "playback simulated");
    print_json(&timeline)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ChartError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ChartError::ConfigError(format!("cannot serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}
