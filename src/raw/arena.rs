use alloc::vec::Vec;

use super::node_id::NodeId;

/// Slab of tree nodes addressed by stable `NodeId`s.
///
/// Vacant slots form an intrusive free list threaded through the slot
/// vector, so releasing a node never allocates and ids are recycled in LIFO
/// order. Every element handed to `alloc` is given back by exactly one
/// `take` (or dropped by `clear`/`Drop`).
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    next_free: Option<NodeId>,
    live: usize,
}

#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    /// Link to the next vacant slot, if any.
    Vacant(Option<NodeId>),
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new(), next_free: None, live: 0 }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity), next_free: None, live: 0 }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.live
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        self.live += 1;
        if let Some(id) = self.next_free {
            match core::mem::replace(&mut self.slots[id.to_index()], Slot::Occupied(element)) {
                Slot::Vacant(next) => self.next_free = next,
                Slot::Occupied(_) => {
                    unreachable!("`Arena::alloc()` - free list points at an occupied slot!")
                }
            }
            id
        } else {
            // `NodeId::from_index` rejects indices beyond the id range, so
            // the arena can never hand out more ids than the niche allows.
            self.slots.push(Slot::Occupied(element));
            NodeId::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        match &self.slots[id.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get()` - `id` is vacant!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        match &mut self.slots[id.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get_mut()` - `id` is vacant!"),
        }
    }

    /// Releases the slot and returns its element. The id may be handed out
    /// again by a later `alloc`.
    pub(crate) fn take(&mut self, id: NodeId) -> T {
        match core::mem::replace(&mut self.slots[id.to_index()], Slot::Vacant(self.next_free)) {
            Slot::Occupied(element) => {
                self.next_free = Some(id);
                self.live -= 1;
                element
            }
            Slot::Vacant(_) => panic!("`Arena::take()` - `id` is vacant!"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.next_free = None;
        self.live = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn released_ids_are_recycled_lifo() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);

        assert_eq!(arena.take(a), 1);
        assert_eq!(arena.take(b), 2);
        assert_eq!(arena.len(), 0);

        // Most recently released slot comes back first.
        assert_eq!(arena.alloc(3), b);
        assert_eq!(arena.alloc(4), a);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`Arena::take()` - `id` is vacant!")]
    fn double_take_is_rejected() {
        let mut arena: Arena<u32> = Arena::new();
        let id = arena.alloc(7);
        let _ = arena.take(id);
        let _ = arena.take(id);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Alloc(u32),
        Overwrite(usize, u32),
        Take(usize),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            8 => any::<u32>().prop_map(Op::Alloc),
            3 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Op::Overwrite(which, value)),
            4 => any::<usize>().prop_map(Op::Take),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        /// Replays random alloc/take/overwrite sequences against a plain
        /// `Vec` model and checks every live element stays addressable.
        #[test]
        fn arena_matches_a_vec_model(ops in prop::collection::vec(op_strategy(), 0..512)) {
            let mut model: Vec<(NodeId, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for op in ops {
                match op {
                    Op::Alloc(value) => {
                        let id = arena.alloc(value);
                        model.push((id, value));
                    }
                    Op::Overwrite(which, value) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Op::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = which % model.len();
                        let (id, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(id), expected);
                    }
                    Op::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                for &(id, value) in &model {
                    prop_assert_eq!(*arena.get(id), value);
                }
            }
        }
    }
}
