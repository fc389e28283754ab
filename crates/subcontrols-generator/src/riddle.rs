//! Navigation riddles.

use subcontrols_core::Keyword;

/// A riddle with its accepted answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Riddle {
    prompt: &'static str,
    answers: &'static [&'static str],
    keyword: Keyword,
}

impl Riddle {
    /// Creates a riddle. Answers are compared case-insensitively.
    #[must_use]
    pub const fn new(
        prompt: &'static str,
        answers: &'static [&'static str],
        keyword: Keyword,
    ) -> Self {
        Self {
            prompt,
            answers,
            keyword,
        }
    }

    /// Returns the question text.
    #[must_use]
    pub const fn prompt(&self) -> &'static str {
        self.prompt
    }

    /// Returns the accepted answers.
    #[must_use]
    pub const fn answers(&self) -> &'static [&'static str] {
        self.answers
    }

    /// Returns the keyword unlocked by a correct answer.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Returns `true` if `answer` matches one of the accepted answers after
    /// trimming and case folding.
    ///
    /// # Examples
    ///
    /// ```
    /// use subcontrols_generator::RIDDLES;
    ///
    /// let riddle = RIDDLES[0];
    /// assert!(riddle.accepts("  A COMPASS "));
    /// assert!(!riddle.accepts("a map"));
    /// ```
    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        self.answers
            .iter()
            .any(|accepted| accepted.to_lowercase() == answer)
    }
}

/// The built-in riddle library.
pub const RIDDLES: [Riddle; 4] = [
    Riddle::new(
        "I have a needle but cannot sew, and I always point the way you should go. What am I?",
        &["compass", "a compass"],
        Keyword::COMPASS,
    ),
    Riddle::new(
        "I have a face that never smiles and two hands that measure the miles between stars. What am I?",
        &["sextant", "a sextant"],
        Keyword::COMPASS,
    ),
    Riddle::new(
        "Turn me and the whole boat follows, though I hide beneath the waves. What am I?",
        &["rudder", "the rudder", "a rudder"],
        Keyword::COMPASS,
    ),
    Riddle::new(
        "I shout into the dark and listen for the echo to find what hides below. What am I?",
        &["sonar", "a sonar"],
        Keyword::COMPASS,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_trimmed_case_folded_answers() {
        let riddle = RIDDLES[2];
        assert!(riddle.accepts("Rudder"));
        assert!(riddle.accepts("\tthe RUDDER\n"));
        assert!(!riddle.accepts("rudders"));
        assert!(!riddle.accepts(""));
    }

    #[test]
    fn test_every_riddle_has_an_answer() {
        for riddle in RIDDLES {
            assert!(!riddle.answers().is_empty());
            assert!(riddle.accepts(riddle.answers()[0]));
            assert_eq!(riddle.keyword(), Keyword::COMPASS);
        }
    }
}
