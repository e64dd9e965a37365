//! Thinkers are the objects in a level that get a chance to do something
//! every tic: moving floors, elevators, bobbing liquids.
//!
//! Doom keeps them in a zone-allocated doubly linked list and hands out raw
//! pointers. Here the `ThinkerAlloc` is a fixed-capacity slot buffer, the
//! lists link slots by index, and everything outside the allocator refers to a
//! thinker through a generation-checked `ThinkerId`. A slot that has been
//! released bumps its generation, so an old id can never reach whatever is
//! pushed in to that slot next.
//!
//! Doom source name `p_tick`

use std::fmt::{self, Debug};

use log::{debug, warn};

use crate::{
    env::{elevator::Elevator, floor::FloorMove, liquid::AnimatedLiquid},
    level::{Level, TicContext},
};

/// Handle to a live thinker. Cheap to copy and safe to keep after the thinker
/// is gone, at which point lookups simply fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThinkerId {
    index: u32,
    generation: u32,
}

impl ThinkerId {
    pub const fn index(&self) -> usize {
        self.index as usize
    }

    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

/// Every thinker belongs to exactly one class list. Lists are run in the
/// order of `ThinkerClass::ALL`, each in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinkerClass {
    /// Anything that moves a sector plane
    Mover,
    /// Cosmetic thinkers such as animated liquids
    Misc,
}

impl ThinkerClass {
    pub const ALL: [ThinkerClass; 2] = [ThinkerClass::Mover, ThinkerClass::Misc];

    const fn list(self) -> usize {
        match self {
            ThinkerClass::Mover => 0,
            ThinkerClass::Misc => 1,
        }
    }
}

/// Every thinker payload implements this.
pub trait Think {
    /// Run one tic of the thinker. The impl of this trait function should
    /// return true *if* the thinker is finished and is to be removed. Any
    /// sector slot the thinker occupies must be cleared before returning true.
    fn think(&mut self, level: &mut Level, tic: &TicContext) -> bool;
}

/// All thinker payloads need to be registered here.
pub enum ThinkerData {
    FloorMove(FloorMove),
    Elevator(Elevator),
    AnimatedLiquid(AnimatedLiquid),
    /// Set when the thinker should be removed from outside of its own
    /// `think()`. On the next run it will be unlinked and set to `Free`.
    Remove,
    /// Used to mark a `ThinkerAlloc` slot as free to be re-used.
    Free,
}

impl ThinkerData {
    pub const fn class(&self) -> ThinkerClass {
        match self {
            ThinkerData::FloorMove(_) | ThinkerData::Elevator(_) => ThinkerClass::Mover,
            ThinkerData::AnimatedLiquid(_) | ThinkerData::Remove | ThinkerData::Free => {
                ThinkerClass::Misc
            }
        }
    }

    pub const fn should_remove(&self) -> bool {
        matches!(self, ThinkerData::Remove)
    }

    fn think(&mut self, level: &mut Level, tic: &TicContext) -> bool {
        match self {
            ThinkerData::FloorMove(floor) => floor.think(level, tic),
            ThinkerData::Elevator(elevator) => elevator.think(level, tic),
            ThinkerData::AnimatedLiquid(liquid) => liquid.think(level, tic),
            ThinkerData::Remove | ThinkerData::Free => true,
        }
    }

    pub fn floor_move(&self) -> Option<&FloorMove> {
        match self {
            ThinkerData::FloorMove(floor) => Some(floor),
            _ => None,
        }
    }

    pub fn elevator(&self) -> Option<&Elevator> {
        match self {
            ThinkerData::Elevator(elevator) => Some(elevator),
            _ => None,
        }
    }

    pub fn animated_liquid(&self) -> Option<&AnimatedLiquid> {
        match self {
            ThinkerData::AnimatedLiquid(liquid) => Some(liquid),
            _ => None,
        }
    }
}

impl Debug for ThinkerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FloorMove(_) => f.debug_tuple("FloorMove").finish(),
            Self::Elevator(_) => f.debug_tuple("Elevator").finish(),
            Self::AnimatedLiquid(_) => f.debug_tuple("AnimatedLiquid").finish(),
            Self::Remove => f.debug_tuple("Remove").finish(),
            Self::Free => f.debug_tuple("Free - this shouldn't ever be seen").finish(),
        }
    }
}

struct Slot {
    generation: u32,
    /// The list the slot is linked in. Kept apart from `data` since that is
    /// swapped out while the thinker runs.
    class: ThinkerClass,
    prev: Option<usize>,
    next: Option<usize>,
    data: ThinkerData,
}

#[derive(Default, Clone, Copy)]
struct ClassList {
    head: Option<usize>,
    tail: Option<usize>,
}

/// A custom allocation for `Thinker` objects. This intends to keep them in a
/// contiguous zone of memory that lives exactly as long as the level.
pub struct ThinkerAlloc {
    slots: Vec<Slot>,
    /// Total capacity. Not possible to allocate over this.
    capacity: usize,
    /// Actual used slots
    len: usize,
    /// The next free slot to insert in
    next_free: usize,
    lists: [ClassList; 2],
}

impl ThinkerAlloc {
    pub fn new(capacity: usize) -> Self {
        // Need to initialise everything to a blank slate
        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                class: ThinkerClass::Misc,
                prev: None,
                next: None,
                data: ThinkerData::Free,
            })
            .collect();

        Self {
            slots,
            capacity,
            len: 0,
            next_free: 0,
            lists: [ClassList::default(); 2],
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn find_first_free(&self) -> Option<usize> {
        if self.len >= self.capacity {
            return None;
        }
        (self.next_free..self.capacity)
            .chain(0..self.next_free)
            .find(|&idx| matches!(self.slots[idx].data, ThinkerData::Free))
    }

    /// Push a thinker to the end of its class list and return its id.
    ///
    /// Running out of slots is not recoverable: the level was sized for the
    /// worst case when created.
    pub fn push(&mut self, data: ThinkerData) -> ThinkerId {
        if matches!(data, ThinkerData::Free | ThinkerData::Remove) {
            panic!("Can't push a thinker with ThinkerData::{data:?}");
        }
        let Some(idx) = self.find_first_free() else {
            panic!("No more thinker slots");
        };
        debug!("Adding Thinker of type {:?} at {idx}", data);

        let class = data.class();
        let list = class.list();
        let tail = self.lists[list].tail;
        {
            let slot = &mut self.slots[idx];
            slot.data = data;
            slot.class = class;
            slot.prev = tail;
            slot.next = None;
        }
        match tail {
            Some(tail) => self.slots[tail].next = Some(idx),
            None => self.lists[list].head = Some(idx),
        }
        self.lists[list].tail = Some(idx);

        self.len += 1;
        self.next_free = (idx + 1) % self.capacity;
        ThinkerId {
            index: idx as u32,
            generation: self.slots[idx].generation,
        }
    }

    fn slot_for(&self, id: ThinkerId) -> Option<&Slot> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
    }

    /// True if `id` still refers to a thinker that has not been released
    pub fn contains(&self, id: ThinkerId) -> bool {
        self.slot_for(id)
            .is_some_and(|slot| !matches!(slot.data, ThinkerData::Free))
    }

    pub fn get(&self, id: ThinkerId) -> Option<&ThinkerData> {
        self.slot_for(id)
            .map(|slot| &slot.data)
            .filter(|data| !matches!(data, ThinkerData::Free | ThinkerData::Remove))
    }

    pub fn get_mut(&mut self, id: ThinkerId) -> Option<&mut ThinkerData> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .map(|slot| &mut slot.data)
            .filter(|data| !matches!(data, ThinkerData::Free | ThinkerData::Remove))
    }

    /// Flag the thinker for removal. It stays linked, is not run again, and
    /// is released when the dispatcher next reaches it. The owner must have
    /// already cleared any sector slot pointing at it.
    pub fn mark_remove(&mut self, id: ThinkerId) -> bool {
        match self.get_mut(id) {
            Some(data) => {
                *data = ThinkerData::Remove;
                true
            }
            None => {
                warn!("mark_remove() on a thinker that no longer exists: {id:?}");
                false
            }
        }
    }

    /// Unlink the slot at `idx` and make it available again.
    fn release(&mut self, idx: usize) {
        let (prev, next, list) = {
            let slot = &self.slots[idx];
            (slot.prev, slot.next, slot.class.list())
        };
        debug!("Removing Thinker {:?} at {idx}", self.slots[idx].data);

        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.lists[list].head = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.lists[list].tail = prev,
        }

        let slot = &mut self.slots[idx];
        slot.prev = None;
        slot.next = None;
        slot.data = ThinkerData::Free;
        slot.generation = slot.generation.wrapping_add(1);

        self.len -= 1;
        // reuse the slot on next insert
        self.next_free = idx;
    }

    /// Release every thinker at once. Used when the level is torn down.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if !matches!(slot.data, ThinkerData::Free) {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.prev = None;
            slot.next = None;
            slot.data = ThinkerData::Free;
        }
        self.lists = [ClassList::default(); 2];
        self.len = 0;
        self.next_free = 0;
    }

    fn id_at(&self, idx: usize) -> ThinkerId {
        ThinkerId {
            index: idx as u32,
            generation: self.slots[idx].generation,
        }
    }

    /// Iterate a class list in run order. Thinkers marked for removal are
    /// skipped.
    pub fn iter_class(
        &self,
        class: ThinkerClass,
    ) -> impl Iterator<Item = (ThinkerId, &ThinkerData)> + '_ {
        let mut current = self.lists[class.list()].head;
        std::iter::from_fn(move || {
            while let Some(idx) = current {
                current = self.slots[idx].next;
                let data = &self.slots[idx].data;
                if !data.should_remove() {
                    return Some((self.id_at(idx), data));
                }
            }
            None
        })
    }

    /// Iterates through the class list until either the closure returns true
    /// or the end is reached.
    pub fn find_thinker<F>(&self, class: ThinkerClass, finder: F) -> Option<ThinkerId>
    where
        F: Fn(&ThinkerData) -> bool,
    {
        self.iter_class(class)
            .find(|(_, data)| finder(data))
            .map(|(id, _)| id)
    }
}

impl Level {
    /// Run every thinker once, class by class, each class in creation order.
    ///
    /// A thinker pushed while the pass is running is appended to its list and
    /// so is reached in this same pass. A thinker that returns true from
    /// `think()` is released as soon as the cursor has moved past it.
    ///
    /// Doom function name `P_RunThinkers`
    pub fn run_thinkers(&mut self, tic: &TicContext) {
        #[cfg(feature = "hprof")]
        coarse_prof::profile!("run_thinkers");

        for class in ThinkerClass::ALL {
            let mut current = self.thinkers.lists[class.list()].head;
            while let Some(idx) = current {
                // The payload is moved out while it runs so it can borrow the
                // level mutably, including the allocator it lives in.
                let mut data = std::mem::replace(
                    &mut self.thinkers.slots[idx].data,
                    ThinkerData::Remove,
                );
                let done = match data {
                    ThinkerData::Remove | ThinkerData::Free => true,
                    _ => data.think(self, tic),
                };

                current = self.thinkers.slots[idx].next;
                if done {
                    self.thinkers.release(idx);
                } else {
                    self.thinkers.slots[idx].data = data;
                }
            }
        }
    }
}
