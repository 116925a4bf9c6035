use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use speech_coach::config::OutputFormat;
use speech_coach::feedback::FeedbackReport;
use speech_coach::scoring::ScoreSet;
use speech_coach::session::{PrepareOptions, PreparedSession, SessionRecord};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a session file
    Score {
        /// Path to the session file (YAML, or JSON with a .json extension)
        session: PathBuf,

        /// Feed detected grammar mistakes into the grammar score
        #[arg(long)]
        detect_grammar: bool,
    },
    /// Show the audio statistics a session would be scored with
    Analyze {
        /// Path to the session file
        session: PathBuf,
    },
    /// Score a session and print rule-based feedback
    Feedback {
        /// Path to the session file
        session: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "speech-coach")]
#[command(about = "Score and review spoken practice sessions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/speech-coach/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format (overrides output.format from the config file)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Count punctuation in user lines as pauses when deriving audio metadata
    #[arg(long, global = true)]
    count_pauses: bool,

    /// Feed per-line recognition confidence into the confidence score
    #[arg(long, global = true)]
    entry_confidence: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Serialize)]
struct FeedbackOutput<'a> {
    scores: &'a ScoreSet,
    feedback: &'a FeedbackReport,
}

fn load_session_or_exit(path: &Path, verbose: bool) -> SessionRecord {
    let record = match speech_coach::session::load_session(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Session error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if verbose {
        let user_lines = record.transcript.iter().filter(|e| e.is_user()).count();
        eprintln!(
            "Loaded session \"{}\" ({}): {} transcript entries, {} from the user",
            record.topic,
            record.session_type,
            record.transcript.len(),
            user_lines
        );
        if record.audio_metadata.is_some() {
            eprintln!("  Using audio metadata from the session file");
        } else {
            eprintln!("  Deriving audio metadata from the transcript");
        }
    }

    record
}

fn prepare_or_exit<'a>(record: &'a SessionRecord, options: &PrepareOptions) -> PreparedSession<'a> {
    match record.prepare_with(options) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Session error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn print_or_exit(rendered: anyhow::Result<String>) {
    match rendered {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    if cli.verbose {
        let shown = config_path
            .clone()
            .unwrap_or_else(speech_coach::config::get_config_path);
        if shown.exists() {
            eprintln!("Loading config from {}", shown.display());
        } else {
            eprintln!("No config at {}, using defaults", shown.display());
        }
    }
    let config = match speech_coach::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = speech_coach::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        let weights = effective_scoring.weights();
        eprintln!(
            "Scoring: ideal {} wpm, weights fluency={} grammar={} clarity={} relevance={} confidence={} vocabulary={}",
            effective_scoring.ideal_wpm(),
            weights.fluency,
            weights.grammar,
            weights.clarity,
            weights.relevance,
            weights.confidence,
            weights.vocabulary
        );
    }

    let format = cli
        .format
        .or_else(|| config.output.as_ref().and_then(|o| o.format))
        .unwrap_or_default();
    let use_colors = speech_coach::output::should_use_colors();
    let options = PrepareOptions {
        count_pauses: cli.count_pauses,
        entry_confidence: cli.entry_confidence,
    };

    match cli.command {
        Commands::Score {
            session,
            detect_grammar,
        } => {
            let record = load_session_or_exit(&session, cli.verbose);
            let prepared = prepare_or_exit(&record, &options);

            let grammar_errors = if detect_grammar {
                speech_coach::feedback::detect_grammar_errors(&prepared.text)
            } else {
                Vec::new()
            };
            if cli.verbose && detect_grammar {
                eprintln!("Detected {} grammar errors", grammar_errors.len());
            }

            let report = speech_coach::scoring::calculate_scores_explained(
                &prepared.score_input(&grammar_errors),
                &effective_scoring,
            );

            if cli.verbose {
                eprintln!();
                eprintln!("{}", speech_coach::output::format_breakdown(&report.components));
                eprintln!();
            }

            let rendered = match format {
                OutputFormat::Table => Ok(speech_coach::output::format_score_table(
                    &report.scores,
                    use_colors,
                )),
                OutputFormat::Json => speech_coach::output::format_json(&report.scores),
                OutputFormat::Tsv => Ok(speech_coach::output::format_tsv(&report.scores)),
            };
            print_or_exit(rendered);
        }
        Commands::Analyze { session } => {
            let record = load_session_or_exit(&session, cli.verbose);
            let prepared = prepare_or_exit(&record, &options);
            let meta = &prepared.audio_metadata;

            let rendered = match format {
                OutputFormat::Table => Ok(speech_coach::output::format_metadata(meta, use_colors)),
                OutputFormat::Json => speech_coach::output::format_json(meta),
                OutputFormat::Tsv => Ok(speech_coach::output::format_metadata_tsv(meta)),
            };
            print_or_exit(rendered);
        }
        Commands::Feedback { session } => {
            let record = load_session_or_exit(&session, cli.verbose);
            let prepared = prepare_or_exit(&record, &options);

            let scores = speech_coach::scoring::calculate_scores_with(
                &prepared.score_input(&[]),
                &effective_scoring,
            );
            let report = speech_coach::feedback::build_feedback(&prepared.feedback_input(&scores));

            if cli.verbose {
                eprintln!(
                    "Feedback: {} strengths, {} areas for improvement, {} tips",
                    report.strengths.len(),
                    report.areas_for_improvement.len(),
                    report.tips.len()
                );
            }

            let rendered = match format {
                OutputFormat::Table => Ok(format!(
                    "{}\n\n{}",
                    speech_coach::output::format_score_table(&scores, use_colors),
                    speech_coach::output::format_feedback(&report, use_colors)
                )),
                OutputFormat::Json => speech_coach::output::format_json(&FeedbackOutput {
                    scores: &scores,
                    feedback: &report,
                }),
                OutputFormat::Tsv => {
                    // Scores, then one row per area for improvement
                    let mut lines = vec![speech_coach::output::format_tsv(&scores)];
                    lines.extend(report.areas_for_improvement.iter().map(|a| {
                        format!("improvement\t{}", a.title)
                    }));
                    Ok(lines.join("\n"))
                }
            };
            print_or_exit(rendered);
        }
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
