//! forge – renders the bundled sample report or deck to JSON.
//!
//! Usage:
//!   forge <report|deck> [output.json] [--theme <preset|theme.json>] [--compact] [--title "Deck"]
//!
//! If `output.json` is omitted the result is written to `report.json` or
//! `deck.json` in the current directory.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

use doc_forge::package::JsonAdapter;
use doc_forge::pipeline::{package_deck, package_report, BuildConfig};
use doc_forge::templates::{cloudscript_deck, coursework_report, stylesheet};
use doc_forge::theme::{get_preset, Theme};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Sample {
    Report,
    Deck,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut sample: Option<Sample> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut theme_arg: Option<String> = None;
    let mut compact = false;
    let mut title: Option<String> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--compact" | "-c" => compact = true,
            "--theme" => match iter.next() {
                Some(v) => theme_arg = Some(v.clone()),
                None => {
                    eprintln!("Error: --theme needs a preset name or file.");
                    process::exit(1);
                }
            },
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("Error: --title needs a value.");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            value => {
                if positional == 0 {
                    sample = match value {
                        "report" => Some(Sample::Report),
                        "deck" => Some(Sample::Deck),
                        other => {
                            eprintln!("Unknown sample: {other}");
                            print_usage(&args[0]);
                            process::exit(1);
                        }
                    };
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(value));
                } else {
                    eprintln!("Unexpected argument: {value}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let sample = match sample {
        Some(s) => s,
        None => {
            eprintln!("Error: no sample specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let output = output_path.unwrap_or_else(|| {
        PathBuf::from(match sample {
            Sample::Report => "report.json",
            Sample::Deck => "deck.json",
        })
    });

    let theme = match theme_arg.as_deref() {
        None => Theme::cloudscript(),
        Some(name) => get_preset(name).unwrap_or_else(|| load_theme(Path::new(name))),
    };

    let resolver = match stylesheet().and_then(|r| r.freeze(&theme)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading stylesheet: {e}");
            process::exit(1);
        }
    };

    let mut adapter = if compact {
        JsonAdapter::compact()
    } else {
        JsonAdapter::pretty()
    };

    let rendered = match sample {
        Sample::Report => {
            coursework_report().and_then(|doc| package_report(&doc, &resolver, &mut adapter))
        }
        Sample::Deck => {
            let mut deck = cloudscript_deck();
            if let Some(t) = title {
                deck.title = t;
            }
            package_deck(&deck, &resolver, &BuildConfig::default(), &mut adapter)
        }
    };

    match rendered {
        Ok(json) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &json) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            eprintln!("Wrote '{}' ({} bytes)", output.display(), json.len());
        }
        Err(e) => {
            eprintln!("Error rendering: {e}");
            process::exit(1);
        }
    }
}

fn load_theme(path: &Path) -> Theme {
    let json = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", path.display());
            process::exit(1);
        }
    };
    match Theme::from_json(&json) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error loading theme: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("forge – sample report/deck renderer (doc-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <report|deck> [output.json] [--theme <preset|theme.json>] [--compact]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <report|deck>   Which bundled sample to render");
    eprintln!("  [output.json]   Output path (default: report.json / deck.json)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --theme         Preset name (cloudscript, print) or theme JSON file");
    eprintln!("  --compact, -c   Write JSON without indentation");
    eprintln!("  --title, -t     Deck title (deck only)");
    eprintln!("  --help          Print this message");
}
