//! Derives the apt command for a selection of profiles.
//!
//! # Output Contract
//!
//! ```text
//! sudo apt update && sudo apt install -y <tok1> <tok2> ...
//! ```
//!
//! Tokens are gathered from the selected profiles in ascending order of
//! profile key, deduplicated by exact string equality, then sorted
//! ascending. Nothing follows the last token. An empty token list yields
//! [`EMPTY_SELECTION_TEXT`] instead.
//!
//! The result depends only on the final selection, never on the order in
//! which profiles were toggled.

use std::collections::BTreeSet;

use crate::profiles::ProfileCatalog;
use crate::selection::SelectionSet;

/// Returned when nothing is selected.
pub const EMPTY_SELECTION_TEXT: &str = "Select profiles to see installation command";

/// Everything before the first package token.
pub const APT_INSTALL_PREFIX: &str = "sudo apt update && sudo apt install -y ";

/// Package tokens for `selection`, deduplicated and sorted.
pub fn package_tokens(selection: &SelectionSet, catalog: &ProfileCatalog) -> Vec<&'static str> {
    let mut gathered: Vec<&'static str> = Vec::new();
    for id in selection.sorted_ids() {
        gathered.extend(catalog.get(id).packages.iter().copied());
    }

    // Sorting happens explicitly below; the set is only for dedup.
    let unique: BTreeSet<&'static str> = gathered.into_iter().collect();
    let mut tokens: Vec<&'static str> = unique.into_iter().collect();
    tokens.sort_unstable();
    tokens
}

/// Build the installation command for `selection`.
pub fn synthesize(selection: &SelectionSet, catalog: &ProfileCatalog) -> String {
    let tokens = package_tokens(selection, catalog);
    if tokens.is_empty() {
        return EMPTY_SELECTION_TEXT.to_string();
    }
    format!("{}{}", APT_INSTALL_PREFIX, tokens.join(" "))
}

/// Whether `command` is worth handing to a terminal.
pub fn is_installable(command: &str) -> bool {
    !command.is_empty() && command != EMPTY_SELECTION_TEXT
}
