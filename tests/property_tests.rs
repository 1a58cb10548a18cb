//! Property-Based Tests for the onboarding core
//!
//! Uses proptest for testing invariants and edge cases
//!
//! These tests verify:
//! - Toggle parity of profile membership
//! - Order independence of command synthesis
//! - Reveal sessions always end on exactly their (latest) source
//! - ProfileId string round-trips

use proptest::prelude::*;
use strum::IntoEnumIterator;

use onboard::command::{APT_INSTALL_PREFIX, EMPTY_SELECTION_TEXT, synthesize};
use onboard::profiles::{ProfileCatalog, ProfileId};
use onboard::reveal::{RevealSession, TickOutcome};
use onboard::selection::{DEFAULT_PROFILE, SelectionSet};

/// Strategy for generating valid ProfileId variants
fn profile_strategy() -> impl Strategy<Value = ProfileId> {
    let ids: Vec<ProfileId> = ProfileId::iter().collect();
    prop::sample::select(ids)
}

/// Toggle keys, including some that name no profile
fn toggle_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => profile_strategy().prop_map(|id| id.key().to_string()),
        1 => prop::sample::select(vec!["office", "", "ESSENTIAL", "gaming "])
            .prop_map(str::to_string),
    ]
}

// =============================================================================
// ProfileId Property Tests
// =============================================================================

proptest! {
    /// ProfileId: to_string → parse round-trip is identity
    #[test]
    fn profile_id_roundtrip(id in profile_strategy()) {
        let s = id.to_string();
        let parsed: ProfileId = s.parse().expect("Should parse");
        prop_assert_eq!(id, parsed);
        prop_assert_eq!(s.as_str(), id.key());
    }
}

// =============================================================================
// Selection Property Tests
// =============================================================================

proptest! {
    /// Membership after any toggle sequence = seeded XOR odd toggle count
    #[test]
    fn toggle_parity(keys in prop::collection::vec(toggle_key_strategy(), 0..40)) {
        let mut selection = SelectionSet::new();
        for key in &keys {
            selection.toggle(key);
        }

        for id in ProfileId::iter() {
            let toggles = keys.iter().filter(|k| k.as_str() == id.key()).count();
            let seeded = id == DEFAULT_PROFILE;
            prop_assert_eq!(selection.contains(id), seeded ^ (toggles % 2 == 1), "{}", id);
        }
    }

    /// Unknown keys never change the selection
    #[test]
    fn unknown_toggle_is_noop(key in "[A-Z0-9 _-]{0,12}") {
        let mut selection = SelectionSet::new();
        prop_assert_eq!(selection.toggle(&key), None);
        prop_assert_eq!(selection, SelectionSet::new());
    }
}

// =============================================================================
// Command Synthesis Property Tests
// =============================================================================

proptest! {
    /// Any permutation of the same toggles synthesizes the same bytes
    #[test]
    fn synthesize_is_order_independent(
        (ids, shuffled) in prop::collection::vec(profile_strategy(), 0..20)
            .prop_flat_map(|ids| (Just(ids.clone()), Just(ids).prop_shuffle()))
    ) {
        let catalog = ProfileCatalog::new();
        let forward = ids.iter().fold(SelectionSet::new(), |s, id| s.toggled(*id));
        let permuted = shuffled.iter().fold(SelectionSet::new(), |s, id| s.toggled(*id));
        prop_assert_eq!(synthesize(&forward, &catalog), synthesize(&permuted, &catalog));
    }

    /// Output is either the sentinel or the prefix followed by sorted unique tokens
    #[test]
    fn synthesize_output_shape(ids in prop::collection::hash_set(profile_strategy(), 0..9)) {
        let selection: SelectionSet = ids.iter().copied().collect();
        let command = synthesize(&selection, &ProfileCatalog::new());

        if ids.is_empty() {
            prop_assert_eq!(command, EMPTY_SELECTION_TEXT);
        } else {
            let tail = command.strip_prefix(APT_INSTALL_PREFIX).expect("prefix");
            let tokens: Vec<&str> = tail.split(' ').collect();
            let mut expected = tokens.clone();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(tokens, expected);
            prop_assert!(!command.ends_with(' '));
        }
    }
}

// =============================================================================
// Reveal Session Property Tests
// =============================================================================

/// Drive a session to completion, bounded so a bug cannot hang the test
fn drain(session: &mut RevealSession) {
    for _ in 0..100_000 {
        if let TickOutcome::Idle = session.tick() {
            return;
        }
    }
    panic!("session never finished");
}

proptest! {
    /// Revealed text is always a prefix of the source and ends equal to it
    #[test]
    fn reveal_is_prefix_until_complete(text in "\\PC{0,300}") {
        let mut session = RevealSession::license(text.clone());
        while !session.is_done() {
            session.tick();
            prop_assert!(text.starts_with(session.revealed()));
        }
        prop_assert_eq!(session.revealed(), text.as_str());
        prop_assert_eq!(session.revealed_count(), text.chars().count());
    }

    /// Replacing the source mid-reveal ends on the new source only
    #[test]
    fn replaced_source_reveals_in_full(
        old in "\\PC{1,80}",
        new in "\\PC{0,80}",
        ticks in 0usize..80,
    ) {
        let mut session = RevealSession::command(old);
        for _ in 0..ticks {
            session.tick();
        }
        session.replace_source(new.clone());
        prop_assert_eq!(session.revealed_count(), 0);
        drain(&mut session);
        prop_assert_eq!(session.revealed(), new.as_str());
    }
}
