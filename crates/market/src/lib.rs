//! Farmers-market domain module.
//!
//! Vendors stock items; a market aggregates its vendors into read-only views
//! (who sells what, total inventory, overstock, sorted names, today's date).
//! Pure in-memory logic: no IO apart from the injected clock.

pub mod config;
pub mod item;
pub mod market;
pub mod vendor;

pub use config::MarketConfig;
pub use item::{Item, Price};
pub use market::{InventoryEntry, Market, TotalInventory};
pub use vendor::{StockLine, Vendor};
