//! The persisted/exchanged heap snapshot (§6.1): a contiguous array of
//! links, one free-list per size class, and a root location.

use serde::{Deserialize, Serialize};

use icalc_core::Link;

use crate::heap::{Heap, Loc};

/// A plain, serializable snapshot of everything spec §6.1 names. Endianness
/// is host-native 64-bit, matching `Link`'s own in-memory bit layout — no
/// byte-swapping is performed on either side of a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeapImage {
    pub links: Vec<u64>,
    pub free_lists: Vec<Vec<u64>>,
    pub root: u64,
}

impl HeapImage {
    /// Snapshot a live heap. `root` is the caller's chosen entry point;
    /// it is carried through unchanged, not interpreted by this crate.
    pub fn from_heap(heap: &Heap, root: Loc) -> HeapImage {
        let (links, free_lists) = heap.raw_parts();
        HeapImage {
            links: links.iter().map(|l| l.raw()).collect(),
            free_lists,
            root,
        }
    }

    /// Rebuild a live [`Heap`] and recover the root location from a
    /// snapshot produced by the rule compiler or a prior [`HeapImage`].
    pub fn into_heap(self) -> (Heap, Loc) {
        let links = self.links.into_iter().map(Link::from_raw).collect();
        (Heap::from_raw_parts(links, self.free_lists), self.root)
    }
}
