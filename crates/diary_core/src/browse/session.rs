//! Interactive browse loop.

use super::browser::{BrowseCommand, EntryBrowser};
use crate::model::entry::Entry;
use crate::repo::entry_repo::EntryRepository;
use crate::service::entry_service::{DeleteOutcome, EntryService};
use crate::ui::{render_entry, ConfirmPolicy, Console, UiResult};
use chrono::Local;
use log::debug;
use std::io::{BufRead, Write};

const BROWSE_PROMPT: &str = "Action: [ndq] ";

/// What happened during one browse session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowseSummary {
    /// Number of times an entry was rendered.
    pub displayed: usize,
    pub deleted: usize,
}

/// Browses `entries` until the user quits or the sequence runs out.
///
/// End of input counts as quit. An empty sequence returns immediately
/// without output.
pub fn browse_entries<R, In, Out>(
    service: &EntryService<R>,
    entries: impl IntoIterator<Item = Entry>,
    console: &mut Console<In, Out>,
) -> UiResult<BrowseSummary>
where
    R: EntryRepository,
    In: BufRead,
    Out: Write,
{
    let mut browser = EntryBrowser::new(entries);
    let mut summary = BrowseSummary::default();

    while let Some(entry) = browser.current().cloned() {
        console.clear()?;
        console.say(render_entry(&entry, &Local).trim_end())?;
        summary.displayed += 1;

        let Some(input) = console.prompt(BROWSE_PROMPT)? else {
            browser.finish();
            break;
        };

        match BrowseCommand::parse(&input) {
            BrowseCommand::Next => browser.advance(),
            BrowseCommand::Quit => browser.finish(),
            BrowseCommand::Delete => {
                if !console.confirm("Are you sure?", ConfirmPolicy::OptIn)? {
                    continue;
                }
                match service.delete_entry(&entry)? {
                    DeleteOutcome::Deleted => console.say("Entry deleted!")?,
                    DeleteOutcome::AlreadyDeleted => console.say("Entry was already deleted.")?,
                }
                summary.deleted += 1;
                browser.advance();
            }
            BrowseCommand::Unknown => {
                debug!("event=browse_input module=browse status=ignored input_len={}", input.len());
            }
        }
    }

    debug!(
        "event=browse_end module=browse status=ok displayed={} deleted={}",
        summary.displayed, summary.deleted
    );
    Ok(summary)
}
