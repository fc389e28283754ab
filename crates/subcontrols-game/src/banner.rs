use crate::PuzzleId;

/// The shared keyword banner.
///
/// At most one puzzle owns the banner at a time. A solved puzzle claims it;
/// clearing is a no-op unless requested by the current owner, so one puzzle can
/// never hide another puzzle's success message.
///
/// # Examples
///
/// ```
/// use subcontrols_game::{KeywordBanner, PuzzleId};
///
/// let mut banner = KeywordBanner::new();
/// banner.claim(PuzzleId::Ballast, "TRIM SECURED");
///
/// assert!(!banner.clear(PuzzleId::Sonar));
/// assert_eq!(banner.text(), Some("TRIM SECURED"));
///
/// assert!(banner.clear(PuzzleId::Ballast));
/// assert_eq!(banner.text(), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeywordBanner {
    current: Option<(PuzzleId, String)>,
}

impl KeywordBanner {
    /// Creates an empty banner.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Returns the owner of the banner.
    #[must_use]
    pub fn owner(&self) -> Option<PuzzleId> {
        self.current.as_ref().map(|(owner, _)| *owner)
    }

    /// Returns the displayed text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, text)| text.as_str())
    }

    /// Shows `text` on behalf of `owner`, replacing any previous message.
    pub fn claim(&mut self, owner: PuzzleId, text: impl Into<String>) {
        let text = text.into();
        if self.owner() != Some(owner) {
            log::info!("keyword banner claimed by {owner}: {text}");
        }
        self.current = Some((owner, text));
    }

    /// Clears the banner if `owner` currently owns it.
    ///
    /// Returns `true` if the banner was cleared.
    pub fn clear(&mut self, owner: PuzzleId) -> bool {
        if self.owner() != Some(owner) {
            return false;
        }
        log::info!("keyword banner released by {owner}");
        self.current = None;
        true
    }

    /// Clears the banner regardless of its owner.
    pub fn clear_all(&mut self) {
        self.current = None;
    }
}
