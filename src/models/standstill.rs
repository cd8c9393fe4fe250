//! Standstill reference: anchor or link.

use serde::{Deserialize, Serialize};

/// A reference to something a link can stand after: either a chain anchor
/// or another link.
///
/// This is the index-based form of the anchor/link polymorphism: the
/// variants carry indices into the chain set's flat anchor and link tables
/// rather than owning the referenced record, which keeps traversal
/// bounds-checked and cloning cheap.
///
/// # Examples
///
/// ```
/// use u_chainplan::models::StandstillRef;
///
/// let s = StandstillRef::Anchor(0);
/// assert!(s.is_anchor());
/// assert_eq!(StandstillRef::Link(3).as_link(), Some(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandstillRef {
    /// An anchor, by index in the anchor table.
    Anchor(usize),
    /// A link, by index in the link table.
    Link(usize),
}

impl StandstillRef {
    /// Returns `true` if this reference points at an anchor.
    pub fn is_anchor(&self) -> bool {
        matches!(self, StandstillRef::Anchor(_))
    }

    /// Returns `true` if this reference points at a link.
    pub fn is_link(&self) -> bool {
        matches!(self, StandstillRef::Link(_))
    }

    /// The anchor index, if this reference points at an anchor.
    pub fn as_anchor(&self) -> Option<usize> {
        match self {
            StandstillRef::Anchor(a) => Some(*a),
            StandstillRef::Link(_) => None,
        }
    }

    /// The link index, if this reference points at a link.
    pub fn as_link(&self) -> Option<usize> {
        match self {
            StandstillRef::Anchor(_) => None,
            StandstillRef::Link(l) => Some(*l),
        }
    }
}
