//! Vendor: the player buys catalog gear for the current level

use crate::arena::tournament::Arena;
use crate::combat::{CatalogEntry, ItemKind};
use crate::core::error::{Result, TourneyError};

impl Arena {
    /// What the vendor sells: catalog entries within one level of the arena
    pub fn vendor_stock(&self, kind: ItemKind) -> Vec<&CatalogEntry> {
        self.catalog.eligible(kind, self.level)
    }

    /// Buy stock item `index` for the player; it lands in the inventory
    pub fn buy(&mut self, kind: ItemKind, index: usize) -> Result<()> {
        let stock = self.catalog.eligible(kind, self.level);
        let entry = stock.get(index).ok_or(TourneyError::VendorIndex {
            kind,
            index,
            len: stock.len(),
        })?;
        let item = entry.to_equipment(kind)?;

        let len = self.knights.len();
        let player = self
            .knights
            .first_mut()
            .ok_or(TourneyError::KnightIndex { index: 0, len })?;

        if let Err(e) = player.spend_gold(u64::from(item.value())) {
            tracing::warn!("{} cannot afford {}: {}", player.name(), item.name(), e);
            return Err(e);
        }
        tracing::info!("{} buys {} for {} gold", player.name(), item.name(), item.value());
        player.stash(item);
        Ok(())
    }
}
