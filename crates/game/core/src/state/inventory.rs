use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::consumable::ConsumableKind;

/// Stack of identical consumables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableStack {
    pub kind: ConsumableKind,
    pub charges: u32,
}

/// Consumables carried by the player, one stack per kind.
///
/// Stacks never hold zero charges: the stack is removed as soon as its last
/// charge is spent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    stacks: ArrayVec<ConsumableStack, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds `charges` to the stack of `kind`, opening a slot if needed.
    ///
    /// Returns false when a new slot is required but the inventory is full.
    pub fn add(&mut self, kind: ConsumableKind, charges: u32) -> bool {
        if charges == 0 {
            return true;
        }
        if let Some(stack) = self.stacks.iter_mut().find(|s| s.kind == kind) {
            stack.charges = stack.charges.saturating_add(charges);
            return true;
        }
        self.stacks.try_push(ConsumableStack { kind, charges }).is_ok()
    }

    /// Remaining charges of `kind` (zero when not carried).
    pub fn charges(&self, kind: ConsumableKind) -> u32 {
        self.stacks
            .iter()
            .find(|s| s.kind == kind)
            .map_or(0, |s| s.charges)
    }

    /// Spends one charge, dropping the stack when it empties.
    ///
    /// Returns false without mutation when nothing is left to spend.
    pub fn consume(&mut self, kind: ConsumableKind) -> bool {
        let Some(index) = self.stacks.iter().position(|s| s.kind == kind) else {
            return false;
        };
        let stack = &mut self.stacks[index];
        stack.charges -= 1;
        if stack.charges == 0 {
            self.stacks.remove(index);
        }
        true
    }

    pub fn stacks(&self) -> &[ConsumableStack] {
        &self.stacks
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
