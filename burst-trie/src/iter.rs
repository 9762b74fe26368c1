use std::iter::FusedIterator;

use crate::container::{Container, ContainerIter};
use crate::node::{AccessContainer, Child};
use crate::order::TravOrder;

enum Step<'a, T, C> {
    Emit(usize, &'a [u8], &'a T),
    Descend(usize, u8, &'a Child<T, C>),
    Pop,
}

/// The terminal item of `node`, unless it was already handed out.
#[inline]
fn single_once<'a, T, C>(node: &'a AccessContainer<T, C>, done: &mut bool) -> Option<&'a T> {
    if std::mem::replace(done, true) {
        return None;
    }
    node.single()
}

enum Frame<'a, T, C> {
    Access {
        node: &'a AccessContainer<T, C>,
        depth: usize,
        single_done: bool,
        // Next slot to visit ascending, or one past it descending.
        cursor: usize,
    },
    Leaf {
        depth: usize,
        entries: ContainerIter<'a, T>,
    },
}

/// Depth-first walk over the containers of a trie, with an explicit stack so it can stop and
/// resume between any two items.
struct Walk<'a, T, C> {
    stack: Vec<Frame<'a, T, C>>,
    // Key bytes consumed on the way to the frame on top of the stack. May be longer than that
    // frame's depth after a deeper frame was popped.
    path: Vec<u8>,
    order: TravOrder,
    remaining: usize,
}

impl<'a, T, C: Container<T>> Walk<'a, T, C> {
    fn new(root: Option<&'a AccessContainer<T, C>>, len: usize, order: TravOrder) -> Self {
        let stack = match root {
            Some(node) => vec![Self::access_frame(node, 0, order)],
            None => Vec::new(),
        };
        Self {
            stack,
            path: Vec::new(),
            order,
            remaining: if root.is_some() { len } else { 0 },
        }
    }

    fn access_frame(
        node: &'a AccessContainer<T, C>,
        depth: usize,
        order: TravOrder,
    ) -> Frame<'a, T, C> {
        Frame::Access {
            node,
            depth,
            single_done: false,
            cursor: if order.is_descending() { 256 } else { 0 },
        }
    }

    /// The next item, with the depth of the container holding it and its suffix there.
    fn advance(&mut self) -> Option<(usize, &'a [u8], &'a T)> {
        loop {
            match self.step()? {
                Step::Emit(depth, suffix, item) => {
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some((depth, suffix, item));
                }
                Step::Descend(depth, byte, child) => {
                    self.path.truncate(depth);
                    self.path.push(byte);
                    let frame = match child {
                        Child::Access(inner) => Self::access_frame(inner, depth + 1, self.order),
                        Child::Leaf(leaf) => Frame::Leaf {
                            depth: depth + 1,
                            entries: leaf.iter(self.order),
                        },
                    };
                    self.stack.push(frame);
                }
                Step::Pop => {
                    self.stack.pop();
                }
            }
        }
    }

    /// Advances the frame on top of the stack by one position.
    fn step(&mut self) -> Option<Step<'a, T, C>> {
        let descending = self.order.is_descending();
        let step = match self.stack.last_mut()? {
            Frame::Leaf { depth, entries } => match entries.next() {
                Some((suffix, item)) => Step::Emit(*depth, suffix, item),
                None => Step::Pop,
            },
            Frame::Access {
                node,
                depth,
                single_done,
                cursor,
            } => {
                let node = *node;
                // Ascending walks emit the terminal item before any slot, descending ones after
                // the last.
                if !descending
                    && !*single_done
                    && let Some(item) = single_once(node, single_done)
                {
                    return Some(Step::Emit(*depth, &[], item));
                }

                let next = if descending {
                    node.records.prev_child(*cursor)
                } else {
                    node.records.next_child(*cursor)
                };
                match next {
                    Some((byte, child)) => {
                        *cursor = if descending {
                            byte as usize
                        } else {
                            byte as usize + 1
                        };
                        Step::Descend(*depth, byte, child)
                    }
                    None => match single_once(node, single_done) {
                        Some(item) => Step::Emit(*depth, &[], item),
                        None => Step::Pop,
                    },
                }
            }
        };
        Some(step)
    }

    fn key(&self, depth: usize, suffix: &[u8]) -> Vec<u8> {
        let mut key = Vec::with_capacity(depth + suffix.len());
        key.extend_from_slice(&self.path[..depth]);
        key.extend_from_slice(suffix);
        key
    }
}

/// Items of a [`BurstTrie`](crate::tree::BurstTrie) in the requested order.
pub struct Iter<'a, T, C> {
    walk: Walk<'a, T, C>,
}

impl<'a, T, C: Container<T>> Iter<'a, T, C> {
    pub(crate) fn new(
        root: Option<&'a AccessContainer<T, C>>,
        len: usize,
        order: TravOrder,
    ) -> Self {
        Self {
            walk: Walk::new(root, len, order),
        }
    }
}

impl<'a, T, C: Container<T>> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.advance().map(|(_, _, item)| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T, C: Container<T>> ExactSizeIterator for Iter<'_, T, C> {}

impl<T, C: Container<T>> FusedIterator for Iter<'_, T, C> {}

/// `(key, item)` pairs of a [`BurstTrie`](crate::tree::BurstTrie), with each key rebuilt from the
/// bytes consumed on the way down plus the leaf suffix.
pub struct Entries<'a, T, C> {
    walk: Walk<'a, T, C>,
}

impl<'a, T, C: Container<T>> Entries<'a, T, C> {
    pub(crate) fn new(
        root: Option<&'a AccessContainer<T, C>>,
        len: usize,
        order: TravOrder,
    ) -> Self {
        Self {
            walk: Walk::new(root, len, order),
        }
    }
}

impl<'a, T, C: Container<T>> Iterator for Entries<'a, T, C> {
    type Item = (Vec<u8>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, suffix, item) = self.walk.advance()?;
        Some((self.walk.key(depth, suffix), item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T, C: Container<T>> ExactSizeIterator for Entries<'_, T, C> {}

impl<T, C: Container<T>> FusedIterator for Entries<'_, T, C> {}
