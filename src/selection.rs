/// An insertion-ordered toggle set of record ids.
///
/// Selecting an id that is already a member removes it; selecting an absent
/// id appends it. The order ids were first selected in is the order they
/// appear in the submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<i32>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns `true` when the id is selected
    /// after the call, `false` when it was deselected.
    pub fn toggle(&mut self, id: i32) -> bool {
        if let Some(pos) = self.ids.iter().position(|&existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: i32) -> bool {
        self.ids.contains(&id)
    }

    /// Drop every selected id the predicate rejects. Used to intersect the
    /// selection with a freshly fetched candidate list.
    pub fn retain(&mut self, mut keep: impl FnMut(i32) -> bool) {
        self.ids.retain(|&id| keep(id));
    }

    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
