//! Command-line frontend.

use std::{
    fs,
    io::{self, Write},
    num::NonZero,
    path::PathBuf,
    time::Instant,
};

use clap::{Parser, Subcommand};
use flowline_catalog::{Catalog, CatalogError};
use flowline_core::{Difficulty, Puzzle};

use crate::{
    hint::Hints,
    progress::{JsonFileProgress, ProgressError, ProgressStore},
    render,
    script::{self, Command, ScriptError},
    session::Session,
    settings::Settings,
};

/// Connect matching dots with non-crossing paths that fill the board.
#[derive(Debug, Parser)]
#[command(name = "flowline", version, about)]
pub struct Cli {
    /// File recording completed levels.
    #[arg(
        long,
        value_name = "PATH",
        default_value = "flowline-progress.json",
        global = true
    )]
    pub progress_file: PathBuf,

    /// JSON puzzle pack merged over the built-in levels.
    #[arg(long, value_name = "PATH", global = true)]
    pub pack: Option<PathBuf>,

    /// Hints available per attempt.
    #[arg(long, value_name = "COUNT", global = true)]
    pub max_hints: Option<u32>,

    /// Number of boards kept for undo.
    #[arg(long, value_name = "ENTRIES", global = true)]
    pub history: Option<NonZero<usize>>,

    /// Seed for hint selection.
    #[arg(long, value_name = "SEED", global = true, hide = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// List levels with completion marks.
    List {
        /// Only list this difficulty.
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Print a puzzle.
    Show {
        difficulty: Difficulty,
        id: u32,
        /// Draw the solution paths too.
        #[arg(long)]
        solution: bool,
    },
    /// Play a puzzle by feeding it a gesture script.
    ///
    /// Steps are separated by `/`, `;` or newlines: `d x,y` press, `m x,y ...`
    /// move, `u` release, `h` hint, `z` undo, `y` redo, `r` reset.
    Play {
        difficulty: Difficulty,
        id: u32,
        #[arg(short, long)]
        script: String,
    },
    /// Show completed levels, optionally forgetting them first.
    Progress {
        /// Forget one difficulty, or everything when no difficulty is given.
        #[arg(long, value_name = "DIFFICULTY", num_args = 0..=1)]
        reset: Option<Option<Difficulty>>,
    },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CliError {
    #[display("{_0}")]
    Catalog(CatalogError),
    #[display("{_0}")]
    Progress(ProgressError),
    #[display("invalid script: {_0}")]
    Script(ScriptError),
    #[display("{_0}")]
    Io(io::Error),
    #[display("cannot read puzzle pack {}: {source}", path.display())]
    #[from(ignore)]
    Pack { path: PathBuf, source: io::Error },
    #[display("no {difficulty} puzzle with id {id}")]
    #[from(ignore)]
    UnknownLevel { difficulty: Difficulty, id: u32 },
}

impl Cli {
    /// Settings with the command-line overrides applied.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(max_hints) = self.max_hints {
            settings.hints.max_hints = max_hints;
        }
        if let Some(capacity) = self.history {
            settings.history.capacity = capacity;
        }
        settings
    }

    fn catalog(&self) -> Result<Catalog, CliError> {
        let mut catalog = Catalog::builtin();
        if let Some(path) = &self.pack {
            let json = fs::read_to_string(path).map_err(|source| CliError::Pack {
                path: path.clone(),
                source,
            })?;
            catalog.merge(Catalog::from_json(&json)?);
            log::debug!("merged puzzle pack {}", path.display());
        }
        Ok(catalog)
    }
}

/// Runs the parsed command, writing its report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    let catalog = cli.catalog()?;
    match &cli.action {
        Action::List { difficulty } => {
            let progress = JsonFileProgress::open(&cli.progress_file)?;
            list(&catalog, &progress, *difficulty, out)
        }
        Action::Show {
            difficulty,
            id,
            solution,
        } => {
            let puzzle = lookup(&catalog, *difficulty, *id)?;
            writeln!(out, "{} ({} #{})", puzzle.name, puzzle.difficulty, puzzle.id)?;
            write!(out, "{}", render::render_puzzle(puzzle, *solution))?;
            Ok(())
        }
        Action::Play {
            difficulty,
            id,
            script,
        } => {
            let commands = script::parse_script(script)?;
            let puzzle = lookup(&catalog, *difficulty, *id)?.clone();
            let progress = JsonFileProgress::open(&cli.progress_file)?;
            let settings = cli.settings();
            let hints = match cli.seed {
                Some(seed) => Hints::with_seed(settings.hints.clone(), seed),
                None => Hints::new(settings.hints.clone()),
            };
            let mut session = Session::with_hints(puzzle, settings, progress, hints);
            play(&mut session, &commands, out)
        }
        Action::Progress { reset } => {
            let mut progress = JsonFileProgress::open(&cli.progress_file)?;
            match reset {
                Some(Some(difficulty)) => progress.reset(*difficulty)?,
                Some(None) => progress.reset_all()?,
                None => {}
            }
            report_progress(&catalog, &progress, out)
        }
    }
}

fn lookup(catalog: &Catalog, difficulty: Difficulty, id: u32) -> Result<&Puzzle, CliError> {
    catalog
        .get(difficulty, id)
        .ok_or(CliError::UnknownLevel { difficulty, id })
}

fn list<P, W>(
    catalog: &Catalog,
    progress: &P,
    only: Option<Difficulty>,
    out: &mut W,
) -> Result<(), CliError>
where
    P: ProgressStore,
    W: Write,
{
    for difficulty in Difficulty::ALL {
        if only.is_some_and(|only| only != difficulty) {
            continue;
        }
        writeln!(out, "{difficulty}:")?;
        for puzzle in catalog.puzzles(difficulty) {
            let mark = if progress.is_completed(difficulty, puzzle.id) {
                'x'
            } else {
                ' '
            };
            writeln!(
                out,
                "  [{mark}] {:>2} {} ({}x{}, {} pairs)",
                puzzle.id,
                puzzle.name,
                puzzle.size,
                puzzle.size,
                puzzle.flows.len()
            )?;
        }
    }
    Ok(())
}

fn report_progress<P, W>(catalog: &Catalog, progress: &P, out: &mut W) -> Result<(), CliError>
where
    P: ProgressStore,
    W: Write,
{
    for difficulty in Difficulty::ALL {
        let done = progress.completed_levels(difficulty);
        let ids: Vec<String> = done.iter().map(u32::to_string).collect();
        writeln!(
            out,
            "{difficulty}: {}/{} completed [{}]",
            done.len(),
            catalog.level_count(difficulty),
            ids.join(", ")
        )?;
    }
    Ok(())
}

/// Feeds `commands` to `session` on a simulated clock.
///
/// A hint is printed fully drawn and then left to expire before the next
/// step.
fn play<P, W>(session: &mut Session<P>, commands: &[Command], out: &mut W) -> Result<(), CliError>
where
    P: ProgressStore,
    W: Write,
{
    let mut clock = Instant::now();
    let mut solved_now = false;
    for &command in commands {
        match command {
            Command::Press(pos) => solved_now |= session.press(pos)?.newly_solved,
            Command::Move(pos) => {
                let outcome = session.move_to(pos);
                log::debug!("move to {pos}: {:?}", outcome.event);
            }
            Command::Release => solved_now |= session.release()?.newly_solved,
            Command::Hint => match session.request_hint(clock) {
                Ok(hint) => {
                    writeln!(out, "hint: {}", hint.pair_id())?;
                    let shown = clock + session.settings().hints.animation;
                    let board = render::render_game(session.game(), session.hint_points(shown));
                    write!(out, "{board}")?;
                    clock += session.settings().hints.total();
                    session.tick(clock);
                }
                Err(err) => writeln!(out, "hint unavailable: {err}")?,
            },
            Command::Undo => {
                if !session.undo() {
                    writeln!(out, "nothing to undo")?;
                }
            }
            Command::Redo => {
                if !session.redo() {
                    writeln!(out, "nothing to redo")?;
                }
            }
            Command::Reset => session.reset(),
        }
    }

    write!(out, "{}", render::render_game(session.game(), None))?;
    writeln!(out, "{}", render::status_line(session.game()))?;
    if solved_now {
        let puzzle = session.puzzle();
        writeln!(
            out,
            "level {} #{} recorded as completed",
            puzzle.difficulty, puzzle.id
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{path::Path, process};

    use super::*;

    fn progress_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("flowline-cli-{}-{name}.json", process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    fn run_args(file: &Path, args: &[&str]) -> String {
        let mut argv = vec!["flowline", "--progress-file", file.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // "First Steps": solved by drawing each row / the bottom loop.
    const FIRST_STEPS: &str = "d 0,0 / m 1,0 2,0 3,0 / u \
        / d 0,1 / m 1,1 2,1 3,1 / u \
        / d 1,2 / m 2,2 3,2 / u \
        / d 0,2 / m 0,3 1,3 2,3 3,3 / u";

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "flowline",
            "play",
            "easy",
            "0",
            "--script",
            "u",
            "--max-hints",
            "5",
            "--history",
            "20",
        ])
        .unwrap();
        assert!(matches!(
            cli.action,
            Action::Play {
                difficulty: Difficulty::Easy,
                id: 0,
                ..
            }
        ));
        let settings = cli.settings();
        assert_eq!(settings.hints.max_hints, 5);
        assert_eq!(settings.history.capacity.get(), 20);
        assert_eq!(cli.progress_file, PathBuf::from("flowline-progress.json"));

        let reset_all = Cli::try_parse_from(["flowline", "progress", "--reset"]).unwrap();
        assert!(matches!(reset_all.action, Action::Progress { reset: Some(None) }));
        let reset_one = Cli::try_parse_from(["flowline", "progress", "--reset", "hard"]).unwrap();
        assert!(matches!(
            reset_one.action,
            Action::Progress {
                reset: Some(Some(Difficulty::Hard))
            }
        ));
        assert!(Cli::try_parse_from(["flowline", "show", "extreme", "0"]).is_err());
        assert!(Cli::try_parse_from(["flowline", "play", "easy", "0", "--history", "0"]).is_err());
    }

    #[test]
    fn test_show() {
        let file = progress_file("show");
        let out = run_args(&file, &["show", "easy", "0"]);
        assert_eq!(out, "First Steps (easy #0)\nR . . R\nB . . B\nG Y . Y\n. . . G\n");
        let out = run_args(&file, &["show", "easy", "0", "--solution"]);
        assert!(out.ends_with("R r r R\nB b b B\nG Y y Y\ng g g G\n"));
    }

    #[test]
    fn test_play_records_and_lists_progress() {
        let file = progress_file("play");
        let out = run_args(&file, &["play", "easy", "0", "--script", FIRST_STEPS]);
        assert!(out.contains("pairs 4/4, filled 100%, solved"), "{out}");
        assert!(out.contains("level easy #0 recorded as completed"), "{out}");

        let listed = run_args(&file, &["list", "--difficulty", "easy"]);
        assert!(listed.starts_with("easy:\n  [x]  0 First Steps"), "{listed}");
        assert!(!listed.contains("medium"));

        let report = run_args(&file, &["progress"]);
        assert!(report.starts_with("easy: 1/"), "{report}");
        assert!(report.contains("[0]"));

        let report = run_args(&file, &["progress", "--reset"]);
        assert!(report.starts_with("easy: 0/"), "{report}");
        fs::remove_file(&file).unwrap();
    }

    #[test]
    fn test_play_with_hint_undo_and_reset() {
        let file = progress_file("hint");
        let out = run_args(
            &file,
            &[
                "--seed",
                "3",
                "play",
                "easy",
                "0",
                "--script",
                "h / d 0,0 / m 1,0 2,0 3,0 / u / z / z / y / r / z",
            ],
        );
        assert!(out.starts_with("hint: "), "{out}");
        assert!(out.contains('*'), "{out}");
        assert!(out.contains("nothing to undo"), "{out}");
        assert!(out.ends_with("R . . R\nB . . B\nG Y . Y\n. . . G\npairs 0/4, filled 0%\n"), "{out}");
        assert!(!file.exists());
    }

    #[test]
    fn test_errors() {
        let file = progress_file("errors");
        let cli = Cli::try_parse_from(["flowline", "show", "hard", "99"]).unwrap();
        assert!(matches!(
            run(&cli, &mut Vec::new()),
            Err(CliError::UnknownLevel {
                difficulty: Difficulty::Hard,
                id: 99
            })
        ));

        let argv = ["flowline", "--progress-file", file.to_str().unwrap(), "play", "easy", "0", "-s", "q"];
        let cli = Cli::try_parse_from(argv).unwrap();
        assert!(matches!(run(&cli, &mut Vec::new()), Err(CliError::Script(_))));

        let cli = Cli::try_parse_from(["flowline", "--pack", "/nonexistent/pack.json", "list"]).unwrap();
        assert!(matches!(run(&cli, &mut Vec::new()), Err(CliError::Pack { .. })));
    }
}
