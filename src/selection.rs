//! The set of profiles the user has switched on.

use std::collections::HashSet;

use crate::profiles::ProfileId;

/// Profile selected when the wizard starts.
pub const DEFAULT_PROFILE: ProfileId = ProfileId::Essential;

/// Emitted by a successful toggle so observers can refresh dependent views
/// (package list visibility, command preview) without the selection knowing
/// about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub id: ProfileId,
    /// Membership after the toggle.
    pub selected: bool,
}

/// Unordered set of selected profile ids.
///
/// Iteration order of the backing set is never observed; callers that need
/// an order use [`SelectionSet::sorted_ids`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<ProfileId>,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSet {
    /// A selection seeded with [`DEFAULT_PROFILE`].
    pub fn new() -> Self {
        let mut ids = HashSet::new();
        ids.insert(DEFAULT_PROFILE);
        Self { ids }
    }

    pub fn empty() -> Self {
        Self {
            ids: HashSet::new(),
        }
    }

    pub fn contains(&self, id: ProfileId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of the profile named `key`.
    ///
    /// Unknown keys are ignored and yield `None`.
    pub fn toggle(&mut self, key: &str) -> Option<SelectionChange> {
        match key.parse::<ProfileId>() {
            Ok(id) => Some(self.toggle_id(id)),
            Err(_) => {
                tracing::debug!(key, "ignoring toggle of unknown profile");
                None
            }
        }
    }

    /// Flip membership of `id`.
    pub fn toggle_id(&mut self, id: ProfileId) -> SelectionChange {
        let selected = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        tracing::debug!(profile = %id, selected, "profile toggled");
        SelectionChange { id, selected }
    }

    /// Pure form of [`toggle_id`](Self::toggle_id).
    pub fn toggled(mut self, id: ProfileId) -> Self {
        self.toggle_id(id);
        self
    }

    /// Selected ids in ascending order of their key.
    pub fn sorted_ids(&self) -> Vec<ProfileId> {
        let mut ids: Vec<ProfileId> = self.ids.iter().copied().collect();
        ids.sort_by(|a, b| a.key().cmp(b.key()));
        ids
    }
}

impl FromIterator<ProfileId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ProfileId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_seeded_with_essential() {
        let selection = SelectionSet::new();
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(ProfileId::Essential));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = SelectionSet::new();
        let change = selection.toggle("gaming");
        assert_eq!(
            change,
            Some(SelectionChange {
                id: ProfileId::Gaming,
                selected: true
            })
        );
        assert!(selection.contains(ProfileId::Gaming));

        let change = selection.toggle("gaming");
        assert_eq!(change.map(|c| c.selected), Some(false));
        assert!(!selection.contains(ProfileId::Gaming));
    }

    #[test]
    fn test_toggle_essential_off_leaves_empty_set() {
        let mut selection = SelectionSet::new();
        selection.toggle("essential");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut selection = SelectionSet::new();
        assert_eq!(selection.toggle("office"), None);
        assert_eq!(selection, SelectionSet::new());
    }

    #[test]
    fn test_toggled_is_pure() {
        let before = SelectionSet::new();
        let after = before.clone().toggled(ProfileId::Dev);
        assert!(!before.contains(ProfileId::Dev));
        assert!(after.contains(ProfileId::Dev));
    }

    #[test]
    fn test_sorted_ids_are_lexicographic() {
        let selection: SelectionSet = [ProfileId::Student, ProfileId::Art, ProfileId::Dev]
            .into_iter()
            .collect();
        assert_eq!(
            selection.sorted_ids(),
            vec![ProfileId::Art, ProfileId::Dev, ProfileId::Student]
        );
    }
}
