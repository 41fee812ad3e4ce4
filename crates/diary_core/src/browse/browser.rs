//! Browse cursor state machine.

use crate::model::entry::Entry;

/// Command typed while an entry is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Delete,
    Quit,
    /// Anything else; the current entry is shown again.
    Unknown,
}

impl BrowseCommand {
    /// Parses one input line, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "n" => Self::Next,
            "d" => Self::Delete,
            "q" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

enum BrowseState<I> {
    Displaying { current: Entry, remaining: I },
    Finished,
}

/// Cursor over a finite entry sequence.
///
/// Starts on the first entry, or finished when the sequence is empty.
pub struct EntryBrowser<I: Iterator<Item = Entry>> {
    state: BrowseState<I>,
}

impl<I: Iterator<Item = Entry>> EntryBrowser<I> {
    pub fn new(entries: impl IntoIterator<Item = Entry, IntoIter = I>) -> Self {
        let mut remaining = entries.into_iter();
        let state = match remaining.next() {
            Some(current) => BrowseState::Displaying { current, remaining },
            None => BrowseState::Finished,
        };
        Self { state }
    }

    /// Entry on display, `None` once finished.
    pub fn current(&self) -> Option<&Entry> {
        match &self.state {
            BrowseState::Displaying { current, .. } => Some(current),
            BrowseState::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, BrowseState::Finished)
    }

    /// Moves to the next entry, finishing when none remain.
    pub fn advance(&mut self) {
        let state = std::mem::replace(&mut self.state, BrowseState::Finished);
        if let BrowseState::Displaying { mut remaining, .. } = state {
            if let Some(current) = remaining.next() {
                self.state = BrowseState::Displaying { current, remaining };
            }
        }
    }

    /// Leaves the browser.
    pub fn finish(&mut self) {
        self.state = BrowseState::Finished;
    }
}

#[cfg(test)]
mod tests {
    use super::{BrowseCommand, EntryBrowser};
    use crate::model::entry::Entry;

    fn entries(contents: &[&str]) -> Vec<Entry> {
        contents.iter().map(|content| Entry::new(*content)).collect()
    }

    #[test]
    fn empty_sequence_starts_finished() {
        let browser = EntryBrowser::new(Vec::<Entry>::new());
        assert!(browser.is_finished());
        assert!(browser.current().is_none());
    }

    #[test]
    fn advance_walks_sequence_then_finishes() {
        let mut browser = EntryBrowser::new(entries(&["a", "b"]));
        assert_eq!(browser.current().map(|e| e.content.as_str()), Some("a"));
        browser.advance();
        assert_eq!(browser.current().map(|e| e.content.as_str()), Some("b"));
        browser.advance();
        assert!(browser.is_finished());
        browser.advance();
        assert!(browser.is_finished());
    }

    #[test]
    fn finish_drops_remaining_entries() {
        let mut browser = EntryBrowser::new(entries(&["a", "b", "c"]));
        browser.finish();
        assert!(browser.current().is_none());
    }

    #[test]
    fn parse_recognizes_commands() {
        assert_eq!(BrowseCommand::parse("n"), BrowseCommand::Next);
        assert_eq!(BrowseCommand::parse(" D "), BrowseCommand::Delete);
        assert_eq!(BrowseCommand::parse("Q\n"), BrowseCommand::Quit);
        assert_eq!(BrowseCommand::parse(""), BrowseCommand::Unknown);
        assert_eq!(BrowseCommand::parse("next"), BrowseCommand::Unknown);
    }
}
