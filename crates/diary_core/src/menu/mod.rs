//! Top-level command loop.
//!
//! # Responsibility
//! - Render the menu from the ordered [`MENU`] table and dispatch its actions.
//! - Keep the loop alive across recoverable storage failures.
//!
//! # Invariants
//! - `q` is handled by the loop and never appears in [`MENU`].
//! - Only lost-connection storage errors and console errors end the loop
//!   with an error.

use crate::browse::{browse_entries, BrowseSummary};
use crate::model::entry::Entry;
use crate::repo::entry_repo::EntryRepository;
use crate::service::entry_service::EntryService;
use crate::ui::{ConfirmPolicy, Console, UiError, UiResult};
use log::{debug, error, info};
use std::io::{BufRead, Write};

/// Key that leaves the loop.
pub const QUIT_KEY: char = 'q';

const MENU_PROMPT: &str = "Action: ";

/// Actions reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Add,
    View,
    Search,
}

/// One menu line: key, human-readable label, action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub key: char,
    pub label: &'static str,
    pub command: MenuCommand,
}

/// Menu in display order.
pub const MENU: &[MenuItem] = &[
    MenuItem {
        key: 'a',
        label: "Add an entry.",
        command: MenuCommand::Add,
    },
    MenuItem {
        key: 'v',
        label: "View previous entries.",
        command: MenuCommand::View,
    },
    MenuItem {
        key: 's',
        label: "Search previous entries.",
        command: MenuCommand::Search,
    },
];

/// Finds the menu item for one typed line.
pub fn lookup(input: &str) -> Option<&'static MenuItem> {
    let choice = input.trim().to_lowercase();
    let mut chars = choice.chars();
    let key = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    MENU.iter().find(|item| item.key == key)
}

/// Menu text shown before each command is read.
pub fn render_menu() -> String {
    let mut out = format!("Enter '{QUIT_KEY}' to quit.");
    for item in MENU {
        out.push_str(&format!("\n{}) {}", item.key, item.label));
    }
    out
}

/// Read-dispatch-redisplay loop over one entry service.
pub struct CommandLoop<'svc, R: EntryRepository> {
    service: &'svc EntryService<R>,
}

impl<'svc, R: EntryRepository> CommandLoop<'svc, R> {
    pub fn new(service: &'svc EntryService<R>) -> Self {
        Self { service }
    }

    /// Runs until `q` or end of input.
    ///
    /// # Errors
    /// - Console I/O failures.
    /// - Storage failures that mean the connection is gone.
    pub fn run<In: BufRead, Out: Write>(&self, console: &mut Console<In, Out>) -> UiResult<()> {
        loop {
            console.clear()?;
            console.say(&render_menu())?;
            let Some(input) = console.prompt(MENU_PROMPT)? else {
                info!("event=menu_exit module=menu status=ok reason=end_of_input");
                return Ok(());
            };

            if input.trim().eq_ignore_ascii_case(&QUIT_KEY.to_string()) {
                info!("event=menu_exit module=menu status=ok reason=quit");
                return Ok(());
            }

            let Some(item) = lookup(&input) else {
                debug!("event=menu_input module=menu status=ignored input_len={}", input.len());
                continue;
            };

            console.clear()?;
            match self.dispatch(item.command, console) {
                Ok(()) => {}
                Err(UiError::Storage(err)) if !err.is_connection_lost() => {
                    error!(
                        "event=menu_action module=menu status=error command={:?} error={}",
                        item.command, err
                    );
                    console.say(&format!("Storage error: {err}"))?;
                    console.prompt("Press Enter to return to the menu.")?;
                }
                Err(err) => {
                    error!(
                        "event=menu_action module=menu status=fatal command={:?} error={}",
                        item.command, err
                    );
                    return Err(err);
                }
            }
        }
    }

    fn dispatch<In: BufRead, Out: Write>(
        &self,
        command: MenuCommand,
        console: &mut Console<In, Out>,
    ) -> UiResult<()> {
        debug!("event=menu_dispatch module=menu command={command:?}");
        match command {
            MenuCommand::Add => self.add_entry(console).map(|_| ()),
            MenuCommand::View => self.view_entries(console).map(|_| ()),
            MenuCommand::Search => self.search_entries(console).map(|_| ()),
        }
    }

    /// Reads a free-form block and saves it unless the user opts out.
    ///
    /// Returns the created entry, or `None` when nothing was saved.
    pub fn add_entry<In: BufRead, Out: Write>(
        &self,
        console: &mut Console<In, Out>,
    ) -> UiResult<Option<Entry>> {
        console.say("Enter your entry. Press Ctrl+D (Ctrl+Z then Enter on Windows) when finished.")?;
        let block = console.read_block()?;
        let content = block.trim();
        if content.is_empty() {
            debug!("event=entry_add module=menu status=skipped reason=empty");
            return Ok(None);
        }

        if !console.confirm("Save entry?", ConfirmPolicy::OptOut)? {
            debug!("event=entry_add module=menu status=skipped reason=declined");
            return Ok(None);
        }

        let entry = self.service.create_entry(content)?;
        console.say("Saved successfully!")?;
        Ok(Some(entry))
    }

    /// Browses every entry, newest first.
    pub fn view_entries<In: BufRead, Out: Write>(
        &self,
        console: &mut Console<In, Out>,
    ) -> UiResult<BrowseSummary> {
        let entries = self.service.list_descending()?;
        browse_entries(self.service, entries, console)
    }

    /// Asks for a substring and browses the matching entries.
    pub fn search_entries<In: BufRead, Out: Write>(
        &self,
        console: &mut Console<In, Out>,
    ) -> UiResult<BrowseSummary> {
        let Some(query) = console.prompt("Search query: ")? else {
            return Ok(BrowseSummary::default());
        };
        let entries = self.service.search(&query)?;
        browse_entries(self.service, entries, console)
    }
}

#[cfg(test)]
mod tests {
    use super::{lookup, render_menu, MenuCommand, MENU, QUIT_KEY};

    #[test]
    fn menu_keys_are_unique_and_exclude_quit() {
        let mut keys: Vec<char> = MENU.iter().map(|item| item.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), MENU.len());
        assert!(!keys.contains(&QUIT_KEY));
    }

    #[test]
    fn lookup_is_case_insensitive_and_single_key() {
        assert_eq!(lookup("A").map(|item| item.command), Some(MenuCommand::Add));
        assert_eq!(lookup(" v\n").map(|item| item.command), Some(MenuCommand::View));
        assert_eq!(lookup("s").map(|item| item.command), Some(MenuCommand::Search));
        assert!(lookup("q").is_none());
        assert!(lookup("av").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn render_menu_lists_items_in_order() {
        assert_eq!(
            render_menu(),
            "Enter 'q' to quit.\na) Add an entry.\nv) View previous entries.\ns) Search previous entries."
        );
    }
}
