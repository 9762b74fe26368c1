use tracing::trace;

use crate::container::Container;
use crate::mapping::NodeMapping;
use crate::mapping::direct_mapping::DirectMapping;

/// What an occupied slot of an access container points at.
pub enum Child<T, C> {
    Access(Box<AccessContainer<T, C>>),
    Leaf(Box<C>),
}

impl<T, C: Container<T>> Child<T, C> {
    pub fn is_empty(&self) -> bool {
        match self {
            Child::Access(access) => access.is_empty(),
            Child::Leaf(leaf) => leaf.is_empty(),
        }
    }
}

/// A 256-way branch node. The slot for byte `b` holds everything whose next unconsumed key byte
/// is `b`; an item whose key ends exactly here sits in `single`.
pub struct AccessContainer<T, C> {
    pub(crate) single: Option<T>,
    pub(crate) records: DirectMapping<Child<T, C>>,
}

impl<T, C> Default for AccessContainer<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AccessContainer<T, C> {
    pub fn new() -> Self {
        Self {
            single: None,
            records: DirectMapping::new(),
        }
    }

    #[inline]
    pub fn single(&self) -> Option<&T> {
        self.single.as_ref()
    }

    #[inline]
    pub fn child(&self, byte: u8) -> Option<&Child<T, C>> {
        self.records.seek_child(byte)
    }

    #[inline]
    pub fn num_children(&self) -> usize {
        self.records.num_children()
    }

    /// Occupied slots in ascending byte order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (u8, &Child<T, C>)> {
        self.records.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.single.is_none() && self.records.num_children() == 0
    }
}

impl<T, C: Container<T>> AccessContainer<T, C> {
    /// Splits an over-full leaf into a new access container one level deeper.
    ///
    /// Every suffix entry moves to the child leaf for its first byte with that byte removed; the
    /// leaf's own `single` becomes this container's `single`. Any child leaf that still holds
    /// more than `container_max` items is burst in turn, level by level, without recursion.
    pub(crate) fn from_burst(leaf: C, container_max: usize) -> Self {
        let (mut access, moved) = Self::split(leaf);
        let created = access.num_children();
        let mut cascaded = 0usize;

        {
            let mut pending: Vec<&mut AccessContainer<T, C>> = vec![&mut access];
            while let Some(node) = pending.pop() {
                for (_, child) in node.records.iter_mut() {
                    if let Child::Leaf(leaf) = child
                        && leaf.len() > container_max
                    {
                        let (deeper, _) = Self::split(std::mem::take(&mut **leaf));
                        *child = Child::Access(Box::new(deeper));
                        cascaded += 1;
                    }
                    // Only just-split children can be access containers here.
                    if let Child::Access(inner) = child {
                        pending.push(&mut **inner);
                    }
                }
            }
        }

        trace!(
            moved,
            children = created,
            cascaded,
            container_max,
            "burst leaf container"
        );
        access
    }

    /// One level of a burst. Returns the new container and the number of entries moved.
    fn split(leaf: C) -> (Self, usize) {
        let mut access = Self::new();
        let mut moved = 0usize;

        let single = leaf.drain_into(|suffix, item| {
            let Some((&byte, rest)) = suffix.split_first() else {
                unreachable!("leaf entries always carry a non-empty suffix");
            };
            moved += 1;
            if access.records.seek_child(byte).is_none() {
                access.records.add_child(byte, Child::Leaf(Box::default()));
            }
            let Some(Child::Leaf(child)) = access.records.seek_child_mut(byte) else {
                unreachable!("slot {byte} was just populated with a leaf");
            };
            if rest.is_empty() {
                child.set_single(item);
            } else {
                child.push_entry(rest, item);
            }
        });
        access.single = single;
        (access, moved)
    }
}

// Deep chains of access containers would otherwise be freed by one nested drop per level.
impl<T, C> Drop for AccessContainer<T, C> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<AccessContainer<T, C>>> = Vec::new();
        for (_, child) in self.records.drain() {
            if let Child::Access(inner) = child {
                pending.push(inner);
            }
        }
        while let Some(mut node) = pending.pop() {
            for (_, child) in node.records.drain() {
                if let Child::Access(inner) = child {
                    pending.push(inner);
                }
            }
        }
    }
}
