use subcontrols_core::Keyword;
use subcontrols_generator::SecretSeed;

use crate::{AttemptBudget, Lifecycle, Puzzle, PuzzleId, PuzzleState};

/// One difference between the two porthole scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Difference {
    /// Stable id used to mark the difference.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// The differences hidden in the porthole scenes.
pub const DIFFERENCES: [Difference; 6] = [
    Difference {
        id: "buoy-flag",
        label: "Signal buoy flag",
    },
    Difference {
        id: "jellyfish-glow",
        label: "Glowing jellyfish",
    },
    Difference {
        id: "sonar-ping",
        label: "Sonar pulse ring",
    },
    Difference {
        id: "kelp-height",
        label: "Starboard kelp height",
    },
    Difference {
        id: "vent-bubbles",
        label: "Vent bubble cluster",
    },
    Difference {
        id: "extra-viewport",
        label: "Extra hull viewport",
    },
];

/// The porthole spot-the-difference puzzle.
///
/// Differences are toggled found or not found by id. Finding all of them solves
/// the puzzle, which then stays solved until reset.
#[derive(Debug, Clone)]
pub struct SpotDifference {
    found: [bool; DIFFERENCES.len()],
    lifecycle: Lifecycle,
}

impl Default for SpotDifference {
    fn default() -> Self {
        Self::new()
    }
}

impl SpotDifference {
    /// Keyword disclosed when every difference is found.
    pub const KEYWORD: Keyword = Keyword::PERISCOPE;

    /// Creates the puzzle with nothing found.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            found: [false; DIFFERENCES.len()],
            lifecycle: Lifecycle::new(AttemptBudget::unlimited()),
        }
    }

    /// Returns `true` if the difference `id` is marked found.
    #[must_use]
    pub fn is_found(&self, id: &str) -> bool {
        Self::position(id).is_some_and(|i| self.found[i])
    }

    /// Returns the number of differences found.
    #[must_use]
    pub fn found_count(&self) -> usize {
        self.found.iter().filter(|found| **found).count()
    }

    /// Toggles the found mark of difference `id`.
    ///
    /// Returns the new mark, or `None` if `id` is unknown or the puzzle is solved.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if !self.lifecycle.accepts_attempts() {
            return None;
        }
        let i = Self::position(id)?;
        self.found[i] = !self.found[i];
        log::debug!("spot-diff: {id} marked {}", self.found[i]);
        if self.found_count() == DIFFERENCES.len() && self.lifecycle.record(true).is_solved() {
            log::info!("spot-diff: all differences logged");
        }
        Some(self.found[i])
    }

    /// Returns the progress hint for the current count.
    #[must_use]
    pub fn progress_message(&self) -> &'static str {
        match self.found_count() {
            0 => "Mark each mismatch to light the signal.",
            n if n == DIFFERENCES.len() => "All differences logged. Signal ready to transmit.",
            _ => "Keep scanning the portholes for anomalies.",
        }
    }

    fn position(id: &str) -> Option<usize> {
        DIFFERENCES.iter().position(|diff| diff.id == id.trim())
    }
}

impl Puzzle for SpotDifference {
    fn id(&self) -> PuzzleId {
        PuzzleId::SpotDifference
    }

    fn state(&self) -> PuzzleState {
        self.lifecycle.state()
    }

    fn reset_with_seed(&mut self, _seed: SecretSeed) {
        self.found = [false; DIFFERENCES.len()];
        self.lifecycle.reset();
        log::info!("spot-diff: reset");
    }

    fn reveal(&self) -> String {
        let labels = DIFFERENCES
            .iter()
            .map(|diff| format!("{} ({})", diff.label, diff.id))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Porthole Differences: {labels}. Keyword: {}", Self::KEYWORD)
    }

    fn status(&self) -> String {
        let mut lines: Vec<String> = DIFFERENCES
            .iter()
            .zip(self.found)
            .map(|(diff, found)| {
                let mark = if found { 'x' } else { ' ' };
                format!("[{mark}] {:<15} {}", diff.id, diff.label)
            })
            .collect();
        lines.push(format!(
            "Found {}/{}. {}",
            self.found_count(),
            DIFFERENCES.len(),
            self.progress_message()
        ));
        lines.join("\n")
    }

    fn banner(&self) -> Option<String> {
        self.state()
            .is_solved()
            .then(|| format!("UNLOCKED: {}", Self::KEYWORD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_all(puzzle: &mut SpotDifference) {
        for diff in DIFFERENCES {
            puzzle.toggle(diff.id);
        }
    }

    #[test]
    fn test_status_lists_every_difference() {
        let mut puzzle = SpotDifference::new();
        puzzle.toggle("buoy-flag");
        let status = puzzle.status();
        let lines: Vec<_> = status.lines().collect();
        assert_eq!(lines.len(), DIFFERENCES.len() + 1);
        assert!(lines[0].starts_with("[x] buoy-flag "));
        assert!(lines[1].starts_with("[ ] jellyfish-glow "));
        assert!(lines[6].starts_with("Found 1/6. "));
    }

    #[test]
    fn test_progress_messages() {
        let mut puzzle = SpotDifference::new();
        assert_eq!(puzzle.progress_message(), "Mark each mismatch to light the signal.");
        puzzle.toggle("kelp-height");
        assert_eq!(
            puzzle.progress_message(),
            "Keep scanning the portholes for anomalies."
        );
        find_all(&mut puzzle);
        // kelp-height was toggled twice and is now unmarked.
        assert_eq!(puzzle.found_count(), 5);
        puzzle.toggle("kelp-height");
        assert_eq!(
            puzzle.progress_message(),
            "All differences logged. Signal ready to transmit."
        );
    }

    #[test]
    fn test_finding_all_solves_and_locks() {
        let mut puzzle = SpotDifference::new();
        find_all(&mut puzzle);
        assert!(puzzle.state().is_solved());
        assert_eq!(puzzle.banner(), Some("UNLOCKED: PERISCOPE".to_owned()));
        assert_eq!(puzzle.toggle("buoy-flag"), None);
        assert!(puzzle.is_found("buoy-flag"));
    }

    #[test]
    fn test_toggle_unmarks() {
        let mut puzzle = SpotDifference::new();
        assert_eq!(puzzle.toggle("sonar-ping"), Some(true));
        assert_eq!(puzzle.toggle("sonar-ping"), Some(false));
        assert!(!puzzle.is_found("sonar-ping"));
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut puzzle = SpotDifference::new();
        assert_eq!(puzzle.toggle("periscope"), None);
        assert_eq!(puzzle.found_count(), 0);
    }

    #[test]
    fn test_reveal_does_not_mark() {
        let puzzle = SpotDifference::new();
        assert!(puzzle.reveal().contains("Extra hull viewport"));
        assert_eq!(puzzle.found_count(), 0);
        assert!(puzzle.state().is_unsolved());
    }

    #[test]
    fn test_reset_clears_marks() {
        let mut puzzle = SpotDifference::new();
        find_all(&mut puzzle);
        puzzle.reset();
        assert_eq!(puzzle.found_count(), 0);
        assert!(puzzle.state().is_unsolved());
        assert_eq!(puzzle.banner(), None);
    }
}
