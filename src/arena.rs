//! Slot allocator with stable, generation-checked handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A struct representing a handle to an object in a `TypedArena<T>`.
///
/// A handle stays valid until the object it refers to is freed. Freeing bumps the generation of
/// the slot, so a handle that outlives its object is rejected by `get` even after the slot has
/// been reused.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
    generation: u32,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

struct Slot<T> {
    generation: u32,
    block: Block<T>,
}

/// A simple allocator that only allocates a single type of object.
///
/// All objects inside the arena will be destroyed when the typed arena is destroyed. Freed slots
/// are kept in an intrusive free list and reused by later allocations. The underlying container
/// is a single `Vec` so objects are never addressed by pointer and the arena uses no unsafe code.
///
/// # Examples
///
/// ```
/// use algo_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert_eq!(arena.get(x), None);
/// ```
pub struct TypedArena<T> {
    head: Option<usize>,
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn new() -> Self {
        TypedArena {
            head: None,
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Allocates an object in the typed arena and returns a `Handle` that can later be used to
    /// retrieve mutable and immutable references to the object, and to deallocate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    block: Block::Occupied(value),
                });
                Handle {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            },
            Some(index) => {
                let slot = &mut self.slots[index];
                match mem::replace(&mut slot.block, Block::Occupied(value)) {
                    Block::Vacant(next) => self.head = next,
                    Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
                }
                Handle {
                    index,
                    generation: slot.generation,
                }
            },
        }
    }

    /// Deallocates an object in the typed arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use algo_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.is_live(handle) {
            panic!("Error: attempting to free invalid or vacant block.");
        }
        let slot = &mut self.slots[handle.index];
        slot.generation = slot.generation.wrapping_add(1);
        let old_block = mem::replace(&mut slot.block, Block::Vacant(self.head.take()));
        self.head = Some(handle.index);
        self.len -= 1;
        match old_block {
            Block::Occupied(value) => value,
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the
    /// handle does not correspond to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index) {
            Some(Slot {
                generation,
                block: Block::Occupied(value),
            }) if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the handle
    /// does not correspond to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index) {
            Some(Slot {
                generation,
                block: Block::Occupied(value),
            }) if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if the handle refers to a live object.
    pub fn is_live(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns the number of live objects in the typed arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the typed arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Destroys every object in the typed arena. Handles issued before the call are never
    /// accepted again, even once their slots are reused.
    pub fn clear(&mut self) {
        let mut next = None;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.generation = slot.generation.wrapping_add(1);
            slot.block = Block::Vacant(next);
            next = Some(index);
        }
        self.head = next;
        self.len = 0;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
