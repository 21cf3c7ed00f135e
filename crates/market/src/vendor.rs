use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use marketplace_core::{DomainError, DomainResult, Entity, VendorId};

use crate::item::Item;

/// One inventory line: an item and how many units are on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    item: Item,
    quantity: u64,
}

impl StockLine {
    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

/// A seller holding a quantity per stocked item.
///
/// Inventory lines keep first-stocked order. Quantities only ever grow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VendorRecord")]
pub struct Vendor {
    id: VendorId,
    name: String,
    inventory: Vec<StockLine>,
}

/// Wire form of [`Vendor`]; every item must appear on at most one line.
#[derive(Deserialize)]
struct VendorRecord {
    id: VendorId,
    name: String,
    inventory: Vec<StockLine>,
}

impl TryFrom<VendorRecord> for Vendor {
    type Error = DomainError;

    fn try_from(record: VendorRecord) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        if let Some(dup) = record
            .inventory
            .iter()
            .find(|line| !seen.insert(line.item.id_typed()))
        {
            return Err(DomainError::validation(format!(
                "vendor {} lists {} on more than one line",
                record.name,
                dup.item.name()
            )));
        }
        Ok(Self {
            id: record.id,
            name: record.name,
            inventory: record.inventory,
        })
    }
}

impl Vendor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: VendorId::new(),
            name: name.into(),
            inventory: Vec::new(),
        }
    }

    pub fn id_typed(&self) -> VendorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inventory(&self) -> &[StockLine] {
        &self.inventory
    }

    /// Add `quantity` units of `item`, starting from zero if it was not stocked.
    ///
    /// Negative quantities and totals that would overflow are rejected without
    /// touching the inventory.
    pub fn stock(&mut self, item: &Item, quantity: i64) -> DomainResult<()> {
        let Ok(quantity) = u64::try_from(quantity) else {
            tracing::warn!(vendor = %self.name, item = %item.name(), quantity, "rejected negative stock quantity");
            return Err(DomainError::invalid_quantity(format!(
                "cannot stock {quantity} units of {}",
                item.name()
            )));
        };

        let total = match self.line_mut(item) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    DomainError::invalid_quantity(format!(
                        "stock of {} would overflow",
                        item.name()
                    ))
                })?;
                line.quantity
            }
            None => {
                self.inventory.push(StockLine {
                    item: item.clone(),
                    quantity,
                });
                quantity
            }
        };

        tracing::debug!(vendor = %self.name, item = %item.name(), added = quantity, total, "stocked item");
        Ok(())
    }

    /// Whether `item` appears in the inventory, even at zero units.
    pub fn sells(&self, item: &Item) -> bool {
        self.line(item).is_some()
    }

    /// Units of `item` on hand; zero when never stocked.
    pub fn check_stock(&self, item: &Item) -> u64 {
        self.line(item).map_or(0, StockLine::quantity)
    }

    /// Value of the whole inventory at list price, in minor units.
    ///
    /// Saturates at `u64::MAX`.
    pub fn potential_revenue_cents(&self) -> u64 {
        self.inventory.iter().fold(0u64, |acc, line| {
            let line_total = line
                .item
                .price()
                .total_cents(line.quantity)
                .unwrap_or(u64::MAX);
            acc.saturating_add(line_total)
        })
    }

    fn line(&self, item: &Item) -> Option<&StockLine> {
        self.inventory.iter().find(|line| line.item == *item)
    }

    fn line_mut(&mut self, item: &Item) -> Option<&mut StockLine> {
        self.inventory.iter_mut().find(|line| line.item == *item)
    }
}

impl Entity for Vendor {
    type Id = VendorId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Vendor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vendor {}
