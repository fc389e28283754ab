use std::io::{self, Write};

use subcontrols_core::{Code, Color, Keyword};
use subcontrols_game::{
    BallastPuzzle, CodeBreaker, CommitOutcome, NavigationRiddle, Puzzle as _, PuzzleRegistry,
    RegistryError, SonarPuzzle, SpotDifference, StageOutcome, Transition, DIFFERENCES,
};
use subcontrols_solver::ToggleOutcome;

use crate::command::{Command, HELP};

/// Whether the console keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Applies `command` to the registry and prints the result to `out`.
pub(crate) fn handle<W: Write>(
    registry: &mut PuzzleRegistry,
    command: Command,
    out: &mut W,
) -> io::Result<Flow> {
    let banner_before = registry.banner().clone();

    let result = match command {
        Command::Code(code) => submit_code(registry, code, out),
        Command::Pick(color) => pick_color(registry, color, out),
        Command::Undo => undo_color(registry, out),
        Command::Sonar(cell) => {
            let outcome = registry.update(|sonar: &mut SonarPuzzle| sonar.toggle(cell));
            sonar_outcome(registry, outcome, out)
        }
        Command::Lever { lever, position } => {
            let moved =
                registry.update(|ballast: &mut BallastPuzzle| ballast.set_lever(lever, position));
            report(out, moved, |out, moved| {
                if moved {
                    writeln!(
                        out,
                        "{} set to {:+}. Adjustments primed, confirm to engage the ballast tanks.",
                        lever.label(),
                        position.offset()
                    )
                } else {
                    writeln!(out, "The ballast panel is locked; reset to try again.")
                }
            })
        }
        Command::Polarity => {
            let polarity = registry.update(|ballast: &mut BallastPuzzle| ballast.toggle_polarity());
            report(out, polarity, |out, polarity| match polarity {
                Some(polarity) => writeln!(out, "Polarity: {polarity}"),
                None => writeln!(out, "The ballast panel is locked; reset to try again."),
            })
        }
        Command::Confirm => confirm_ballast(registry, out),
        Command::Spot(id) => {
            let marked = registry.update(|spot: &mut SpotDifference| {
                spot.toggle(&id)
                    .map(|found| (found, spot.found_count(), spot.progress_message()))
            });
            report(out, marked, |out, marked| match marked {
                Some((found, count, message)) => {
                    let state = if found { "found" } else { "not found" };
                    writeln!(
                        out,
                        "{id} marked {state} ({count}/{}). {message}",
                        DIFFERENCES.len()
                    )
                }
                None if DIFFERENCES.iter().any(|diff| diff.id == id) => {
                    writeln!(out, "Every difference is already logged.")
                }
                None => writeln!(out, "No difference called {id:?}."),
            })
        }
        Command::Answer(answer) => {
            let correct =
                registry.update(|navigation: &mut NavigationRiddle| navigation.answer(&answer));
            report(out, correct, |out, correct| match correct {
                Some(true) => writeln!(out, "Course plotted."),
                Some(false) => writeln!(out, "The navigator shakes their head."),
                None => writeln!(out, "The riddle is already solved."),
            })
        }
        Command::Status(id) => {
            for puzzle in registry.iter() {
                if id.is_some_and(|id| id != puzzle.id()) {
                    continue;
                }
                writeln!(out, "== {} ({:?}) ==", puzzle.id().title(), puzzle.state())?;
                writeln!(out, "{}", puzzle.status())?;
            }
            if let Some(text) = registry.banner().text() {
                writeln!(out, "Banner: {text}")?;
            }
            Ok(())
        }
        Command::Reveal => writeln!(out, "{}", registry.reveal_all()),
        Command::Reset(None) => {
            registry.reset_all();
            match registry.seed() {
                Some(seed) => writeln!(out, "All puzzles reset. Seed {seed}"),
                None => writeln!(out, "All puzzles reset."),
            }
        }
        Command::Reset(Some(id)) => {
            let result = registry.reset(id);
            report(out, result, |out, seed| {
                writeln!(out, "{} reset. Seed {seed}", id.title())
            })
        }
        Command::Help => writeln!(out, "{HELP}"),
        Command::Quit => return Ok(Flow::Quit),
    };
    result?;

    if registry.banner() != &banner_before {
        match registry.banner().text() {
            Some(text) => writeln!(out, "*** {text} ***")?,
            None => writeln!(out, "(banner cleared)")?,
        }
    }
    Ok(Flow::Continue)
}

fn report<W, T, F>(out: &mut W, result: Result<T, RegistryError>, f: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W, T) -> io::Result<()>,
{
    match result {
        Ok(value) => f(out, value),
        Err(err) => {
            log::warn!("{err}");
            writeln!(out, "error: {err}")
        }
    }
}

fn submit_code<W: Write>(registry: &mut PuzzleRegistry, code: Code, out: &mut W) -> io::Result<()> {
    let result = registry.update(|breaker: &mut CodeBreaker| {
        let outcome = breaker.submit_attempt(code.colors());
        (outcome, breaker.disclosed_code(), breaker.keyword())
    });
    report(out, result, |out, (outcome, disclosed, keyword)| {
        print_commit(out, code, outcome, disclosed, keyword)
    })
}

fn pick_color<W: Write>(registry: &mut PuzzleRegistry, color: Color, out: &mut W) -> io::Result<()> {
    let result = registry.update(|breaker: &mut CodeBreaker| match breaker.stage_color(color) {
        StageOutcome::Complete { ticket } => {
            let code = Code::from_slice(breaker.staged());
            let outcome = breaker.commit_attempt(ticket);
            Picked::Committed(code, outcome, breaker.disclosed_code(), breaker.keyword())
        }
        StageOutcome::Staged { .. } => Picked::Staged(
            breaker
                .staged()
                .iter()
                .map(|color| color.name())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        StageOutcome::Ignored => Picked::Ignored,
    });
    report(out, result, |out, picked| match picked {
        Picked::Committed(Some(code), outcome, disclosed, keyword) => {
            print_commit(out, code, outcome, disclosed, keyword)
        }
        Picked::Staged(row) => writeln!(out, "Current row: [{row}]"),
        Picked::Committed(None, ..) | Picked::Ignored => {
            writeln!(out, "Control Unlock is locked; reset to play again.")
        }
    })
}

enum Picked {
    Staged(String),
    Committed(Option<Code>, CommitOutcome, Option<Code>, Option<Keyword>),
    Ignored,
}

fn undo_color<W: Write>(registry: &mut PuzzleRegistry, out: &mut W) -> io::Result<()> {
    let undone = registry.update(|breaker: &mut CodeBreaker| breaker.undo());
    report(out, undone, |out, undone| match undone {
        Some(color) => writeln!(out, "Removed {color}."),
        None => writeln!(out, "Nothing to undo."),
    })
}

fn print_commit<W: Write>(
    out: &mut W,
    code: Code,
    outcome: CommitOutcome,
    disclosed: Option<Code>,
    keyword: Option<Keyword>,
) -> io::Result<()> {
    let CommitOutcome::Scored { score, transition } = outcome else {
        return writeln!(out, "Control Unlock is locked; reset to play again.");
    };
    writeln!(out, "{code}  [{score}]")?;
    match transition {
        Transition::Solved => {
            let keyword = keyword.map(|keyword| keyword.to_string()).unwrap_or_default();
            writeln!(out, "Code cracked! Keyword: {keyword}")
        }
        Transition::Failed => {
            let secret = disclosed.map(|code| code.to_string()).unwrap_or_default();
            writeln!(out, "Game over! The correct code was: {secret}")
        }
        Transition::Continued | Transition::Ignored => Ok(()),
    }
}

fn sonar_outcome<W: Write>(
    registry: &PuzzleRegistry,
    outcome: Result<Option<ToggleOutcome>, RegistryError>,
    out: &mut W,
) -> io::Result<()> {
    report(out, outcome, |out, outcome| {
        let outcome = match outcome {
            None => return writeln!(out, "The sonar pattern is already locked."),
            Some(ToggleOutcome::OutOfBounds) => return writeln!(out, "That cell is off the grid."),
            Some(outcome) => outcome,
        };
        for violation in outcome.violations() {
            writeln!(out, "warning: {violation}")?;
        }
        if let Some(sonar) = registry.puzzle::<SonarPuzzle>() {
            writeln!(out, "{}", sonar.render(false))?;
            if sonar.state().is_solved() {
                writeln!(out, "Contact pattern locked.")?;
            }
        }
        Ok(())
    })
}

fn confirm_ballast<W: Write>(registry: &mut PuzzleRegistry, out: &mut W) -> io::Result<()> {
    let result = registry.update(|ballast: &mut BallastPuzzle| {
        ballast
            .confirm()
            .map(|confirmation| (confirmation, ballast.report(), ballast.lifecycle().budget().remaining()))
    });
    report(out, result, |out, confirmed| {
        let Some((confirmation, report, remaining)) = confirmed else {
            return writeln!(out, "The ballast panel is locked; reset to try again.");
        };
        writeln!(out, "{report}")?;
        match confirmation.transition {
            Transition::Solved => writeln!(out, "Systems balanced."),
            Transition::Failed => {
                writeln!(out, "Pressure hull breach imminent, reset required.")
            }
            Transition::Continued | Transition::Ignored => {
                writeln!(out, "Moves left: {}", remaining.unwrap_or_default())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use subcontrols_core::{Lever, LeverPosition};
    use subcontrols_game::PuzzleId;
    use subcontrols_generator::SecretSeed;

    use super::*;

    fn registry() -> PuzzleRegistry {
        let mut registry = PuzzleRegistry::with_default_puzzles();
        registry.init_all(SecretSeed::from_bytes([21; 32]));
        registry
    }

    fn run(registry: &mut PuzzleRegistry, line: &str) -> String {
        let mut out = Vec::new();
        let command = line.parse().unwrap();
        handle(registry, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_quit_stops() {
        let mut registry = registry();
        let mut out = Vec::new();
        assert!(handle(&mut registry, Command::Quit, &mut out).unwrap().is_quit());
        assert!(out.is_empty());
    }

    #[test]
    fn test_ballast_session_claims_banner() {
        let mut registry = registry();
        for (lever, position) in Lever::ALL.into_iter().zip([0, 0, 2, 4]) {
            let output = run(
                &mut registry,
                &format!("lever {} {position}", lever.id()),
            );
            assert!(output.contains("Adjustments primed"));
        }
        let output = run(&mut registry, "confirm");
        assert!(output.contains("Systems balanced."));
        assert!(output.contains("*** TRIM SECURED ***"));

        let output = run(&mut registry, "confirm");
        assert!(output.contains("locked"));
    }

    #[test]
    fn test_pick_commits_complete_row() {
        let mut registry = registry();
        for color in ["red", "red", "red"] {
            let output = run(&mut registry, &format!("pick {color}"));
            assert!(output.starts_with("Current row:"));
        }
        let output = run(&mut registry, "pick red");
        assert!(output.contains("red, red, red, red  ["));
        let breaker = registry.puzzle::<CodeBreaker>().unwrap();
        assert_eq!(breaker.history().len(), 1);
    }

    #[test]
    fn test_undo_on_empty_row() {
        let mut registry = registry();
        assert_eq!(run(&mut registry, "undo"), "Nothing to undo.\n");
        run(&mut registry, "pick blue");
        assert_eq!(run(&mut registry, "undo"), "Removed blue.\n");
    }

    #[test]
    fn test_rejected_sonar_toggle_prints_warning() {
        let mut registry = registry();
        let sonar = registry.puzzle::<SonarPuzzle>().unwrap();
        let target = sonar.board().target();
        let row = (0..6).find(|&row| target.row_target(row) == 0).unwrap();
        let output = run(&mut registry, &format!("sonar {row}-0"));
        assert!(output.contains(&format!("warning: Row {row} only holds 0 contacts")));
    }

    #[test]
    fn test_spot_unknown_id() {
        let mut registry = registry();
        let output = run(&mut registry, "spot periscope");
        assert_eq!(output, "No difference called \"periscope\".\n");
        let output = run(&mut registry, "spot buoy-flag");
        assert!(output.starts_with("buoy-flag marked found (1/6)."));
    }

    #[test]
    fn test_reveal_and_status_keep_state() {
        let mut registry = registry();
        let output = run(&mut registry, "reveal");
        assert_eq!(output.lines().count(), 5);
        let output = run(&mut registry, "status ballast");
        assert!(output.starts_with("== Ballast Trim (Unsolved) =="));
        assert!(registry.iter().all(|puzzle| puzzle.state().is_unsolved()));
    }

    #[test]
    fn test_reset_one_puzzle_reports_its_seed() {
        let mut registry = registry();
        let output = run(&mut registry, "reset sonar");
        let seed = registry.puzzle_seed(PuzzleId::Sonar).unwrap();
        assert_eq!(output, format!("Sonar Sweep reset. Seed {seed}\n"));
    }

    #[test]
    fn test_reset_all_reports_seed() {
        let mut registry = registry();
        let output = run(&mut registry, "reset");
        assert!(output.starts_with("All puzzles reset. Seed "));
        assert_eq!(
            registry
                .puzzle::<BallastPuzzle>()
                .map(|ballast| ballast.position(Lever::Bow)),
            Some(LeverPosition::CENTER)
        );
    }
}
