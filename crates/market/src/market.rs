use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use marketplace_core::{Clock, ItemId, SystemClock, VendorId};

use crate::config::MarketConfig;
use crate::item::Item;
use crate::vendor::Vendor;

/// Aggregate stock of one item across every registered vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry<'a> {
    /// Sum of the item's stocked quantity over `vendors`.
    pub quantity: u64,
    /// Vendors that stock the item, in registration order.
    pub vendors: Vec<&'a Vendor>,
}

impl InventoryEntry<'_> {
    /// Number of distinct vendors, ignoring repeat registrations of one vendor.
    pub fn distinct_vendors(&self) -> usize {
        self.vendors
            .iter()
            .map(|v| v.id_typed())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Ordered item → [`InventoryEntry`] view produced by [`Market::total_inventory`].
///
/// Items appear in the order they are first found while walking vendors in
/// registration order, then each vendor's inventory in stocking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalInventory<'a> {
    entries: Vec<(&'a Item, InventoryEntry<'a>)>,
}

impl<'a> TotalInventory<'a> {
    pub fn get(&self, item: &Item) -> Option<&InventoryEntry<'a>> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == item)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Item, &InventoryEntry<'a>)> + '_ {
        self.entries.iter().map(|(item, entry)| (*item, entry))
    }

    pub fn items(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.entries.iter().map(|(item, _)| *item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named collection of vendors with cross-vendor views computed on demand.
///
/// Vendors are kept in registration order and never deduplicated.
#[derive(Debug, Clone)]
pub struct Market {
    name: String,
    vendors: Vec<Vendor>,
    clock: Arc<dyn Clock>,
    config: MarketConfig,
}

impl Market {
    /// Market dated by the system clock, with default rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_clock(name, Arc::new(SystemClock))
    }

    pub fn with_clock(name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(name, clock, MarketConfig::default())
    }

    pub fn with_config(name: impl Into<String>, clock: Arc<dyn Clock>, config: MarketConfig) -> Self {
        Self {
            name: name.into(),
            vendors: Vec::new(),
            clock,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn add_vendor(&mut self, vendor: Vendor) {
        tracing::debug!(market = %self.name, vendor = %vendor.name(), vendor_id = %vendor.id_typed(), "registered vendor");
        self.vendors.push(vendor);
    }

    /// First registered vendor with the given handle, for restocking in place.
    pub fn vendor_mut(&mut self, id: &VendorId) -> Option<&mut Vendor> {
        self.vendors.iter_mut().find(|v| v.id_typed() == *id)
    }

    pub fn vendor_names(&self) -> Vec<&str> {
        self.vendors.iter().map(Vendor::name).collect()
    }

    pub fn vendors_that_sell(&self, item: &Item) -> Vec<&Vendor> {
        self.vendors.iter().filter(|v| v.sells(item)).collect()
    }

    /// Aggregate quantity of `item` across vendors; zero when nobody stocks it.
    pub fn total_quantity(&self, item: &Item) -> u64 {
        self.vendors
            .iter()
            .fold(0u64, |acc, v| acc.saturating_add(v.check_stock(item)))
    }

    pub fn total_inventory(&self) -> TotalInventory<'_> {
        let mut entries: Vec<(&Item, InventoryEntry<'_>)> = Vec::new();
        let mut slots: HashMap<ItemId, usize> = HashMap::new();

        for vendor in &self.vendors {
            for line in vendor.inventory() {
                let slot = *slots.entry(line.item().id_typed()).or_insert_with(|| {
                    entries.push((
                        line.item(),
                        InventoryEntry {
                            quantity: 0,
                            vendors: Vec::new(),
                        },
                    ));
                    entries.len() - 1
                });

                let entry = &mut entries[slot].1;
                entry.quantity = entry.quantity.saturating_add(line.quantity());
                entry.vendors.push(vendor);
            }
        }

        TotalInventory { entries }
    }

    /// Items whose aggregate quantity exceeds the threshold and that more
    /// than one vendor stocks (per `MarketConfig`), in `total_inventory` order.
    pub fn overstocked_items(&self) -> Vec<&Item> {
        let threshold = self.config.overstock_threshold();
        let min_vendors = self.config.overstock_min_vendors();

        self.total_inventory()
            .iter()
            .filter(|(_, entry)| entry.quantity > threshold && entry.distinct_vendors() >= min_vendors)
            .map(|(item, _)| item)
            .collect()
    }

    /// Distinct item names across all vendors, ascending.
    pub fn sorted_item_list(&self) -> Vec<&str> {
        self.vendors
            .iter()
            .flat_map(|v| v.inventory())
            .map(|line| line.item().name())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Today's date from the market's clock, `DD/MM/YYYY` unless configured otherwise.
    pub fn date(&self) -> String {
        self.clock
            .today()
            .format(self.config.date_format())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_core::FixedClock;
    use proptest::prelude::*;

    fn fixed_market(name: &str) -> Market {
        Market::with_clock(name, Arc::new(FixedClock::from_ymd(2020, 2, 24).unwrap()))
    }

    #[test]
    fn starts_without_vendors() {
        let market = fixed_market("South Pearl Street Farmers Market");
        assert_eq!(market.name(), "South Pearl Street Farmers Market");
        assert!(market.vendors().is_empty());
        assert!(market.vendor_names().is_empty());
        assert!(market.total_inventory().is_empty());
        assert!(market.overstocked_items().is_empty());
        assert!(market.sorted_item_list().is_empty());
    }

    #[test]
    fn unknown_item_yields_empty_results() {
        let mut market = fixed_market("Market");
        let mut vendor = Vendor::new("Rocky Mountain Fresh");
        vendor.stock(&Item::new("Peach", "$0.75").unwrap(), 35).unwrap();
        market.add_vendor(vendor);

        let onion = Item::new("Onion", "$0.25").unwrap();
        assert!(market.vendors_that_sell(&onion).is_empty());
        assert!(market.total_inventory().get(&onion).is_none());
        assert_eq!(market.total_quantity(&onion), 0);
    }

    #[test]
    fn duplicate_registration_is_kept() {
        let mut market = fixed_market("Market");
        let peach = Item::new("Peach", "$0.75").unwrap();
        let mut vendor = Vendor::new("Rocky Mountain Fresh");
        vendor.stock(&peach, 60).unwrap();

        market.add_vendor(vendor.clone());
        market.add_vendor(vendor);

        assert_eq!(market.vendor_names(), vec!["Rocky Mountain Fresh", "Rocky Mountain Fresh"]);
        assert_eq!(market.vendors_that_sell(&peach).len(), 2);

        let total = market.total_inventory();
        let entry = total.get(&peach).unwrap();
        assert_eq!(entry.quantity, 120);
        assert_eq!(entry.vendors.len(), 2);
        assert_eq!(entry.distinct_vendors(), 1);

        // One vendor counted twice is still a single seller.
        assert!(market.overstocked_items().is_empty());
    }

    #[test]
    fn lookalike_items_are_separate_entries() {
        let mut market = fixed_market("Market");
        let peach = Item::new("Peach", "$0.75").unwrap();
        let lookalike = Item::new("Peach", "$0.75").unwrap();

        let mut v1 = Vendor::new("Rocky Mountain Fresh");
        v1.stock(&peach, 40).unwrap();
        let mut v2 = Vendor::new("Palisade Peach Shack");
        v2.stock(&lookalike, 40).unwrap();
        market.add_vendor(v1);
        market.add_vendor(v2);

        let total = market.total_inventory();
        assert_eq!(total.len(), 2);
        assert_eq!(total.get(&peach).unwrap().quantity, 40);
        assert_eq!(total.get(&lookalike).unwrap().quantity, 40);
        assert!(market.overstocked_items().is_empty());
        assert_eq!(market.sorted_item_list(), vec!["Peach"]);
    }

    #[test]
    fn zero_stock_still_counts_as_selling() {
        let mut market = fixed_market("Market");
        let peach = Item::new("Peach", "$0.75").unwrap();
        let mut v1 = Vendor::new("Rocky Mountain Fresh");
        v1.stock(&peach, 0).unwrap();
        market.add_vendor(v1);

        assert_eq!(market.vendors_that_sell(&peach).len(), 1);
        let total = market.total_inventory();
        assert_eq!(total.get(&peach).unwrap().quantity, 0);
        assert_eq!(total.get(&peach).unwrap().vendors.len(), 1);
    }

    #[test]
    fn vendor_mut_restocks_registered_vendor() {
        let mut market = fixed_market("Market");
        let peach = Item::new("Peach", "$0.75").unwrap();
        let vendor = Vendor::new("Rocky Mountain Fresh");
        let id = vendor.id_typed();
        market.add_vendor(vendor);

        market.vendor_mut(&id).unwrap().stock(&peach, 12).unwrap();
        assert_eq!(market.total_quantity(&peach), 12);
        assert!(market.vendor_mut(&VendorId::new()).is_none());
    }

    #[test]
    fn overstock_rules_follow_config() {
        let clock = Arc::new(FixedClock::from_ymd(2020, 2, 24).unwrap());
        let config = MarketConfig::new(10, 1, "%d/%m/%Y").unwrap();
        let mut market = Market::with_config("Market", clock, config);

        let peach = Item::new("Peach", "$0.75").unwrap();
        let tomato = Item::new("Tomato", "$0.50").unwrap();
        let mut vendor = Vendor::new("Rocky Mountain Fresh");
        vendor.stock(&peach, 11).unwrap();
        vendor.stock(&tomato, 10).unwrap();
        market.add_vendor(vendor);

        assert_eq!(market.overstocked_items(), vec![&peach]);
    }

    #[test]
    fn date_uses_injected_clock_and_format() {
        assert_eq!(fixed_market("Market").date(), "24/02/2020");

        let clock = Arc::new(FixedClock::from_ymd(2020, 2, 4).unwrap());
        let config = MarketConfig::new(50, 2, "%Y-%m-%d").unwrap();
        let market = Market::with_config("Market", clock, config);
        assert_eq!(market.date(), "2020-02-04");
    }

    /// Build a market from a grid of quantities: `grid[v][i]` is how many
    /// units of item `i` vendor `v` stocks (`None` = not stocked).
    fn market_from_grid(grid: &[Vec<Option<u16>>], items: &[Item]) -> Market {
        let mut market = fixed_market("Generated");
        for (v, row) in grid.iter().enumerate() {
            let mut vendor = Vendor::new(format!("Vendor {v}"));
            for (item, qty) in items.iter().zip(row) {
                if let Some(qty) = qty {
                    vendor.stock(item, i64::from(*qty)).unwrap();
                }
            }
            market.add_vendor(vendor);
        }
        market
    }

    fn grid_strategy() -> impl Strategy<Value = Vec<Vec<Option<u16>>>> {
        prop::collection::vec(prop::collection::vec(prop::option::of(0u16..80u16), 5), 0..6)
    }

    fn sample_items() -> Vec<Item> {
        ["Peach", "Tomato", "Banana Nice Cream", "Peach", "Onion"]
            .iter()
            .map(|name| Item::new(*name, "$1.00").unwrap())
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: vendor names mirror the vendor list in registration order.
        #[test]
        fn vendor_names_preserve_order(grid in grid_strategy()) {
            let market = market_from_grid(&grid, &sample_items());
            let names = market.vendor_names();
            prop_assert_eq!(names.len(), market.vendors().len());
            for (i, name) in names.iter().enumerate() {
                prop_assert_eq!(name.to_string(), format!("Vendor {i}"));
            }
        }

        /// Property: aggregate quantity is the sum over stocking vendors.
        #[test]
        fn total_inventory_sums_vendor_stock(grid in grid_strategy()) {
            let items = sample_items();
            let market = market_from_grid(&grid, &items);
            let total = market.total_inventory();

            for (i, item) in items.iter().enumerate() {
                let stocked: Vec<u64> = grid.iter().filter_map(|row| row[i]).map(u64::from).collect();
                match total.get(item) {
                    Some(entry) => {
                        prop_assert_eq!(entry.quantity, stocked.iter().sum::<u64>());
                        prop_assert_eq!(entry.vendors.len(), stocked.len());
                        prop_assert_eq!(entry.quantity, market.total_quantity(item));
                    }
                    None => prop_assert!(stocked.is_empty()),
                }
            }
        }

        /// Property: overstocked = quantity > 50 and more than one vendor.
        #[test]
        fn overstocked_matches_definition(grid in grid_strategy()) {
            let items = sample_items();
            let market = market_from_grid(&grid, &items);
            let overstocked = market.overstocked_items();

            for (i, item) in items.iter().enumerate() {
                let stocked: Vec<u64> = grid.iter().filter_map(|row| row[i]).map(u64::from).collect();
                let expected = stocked.iter().sum::<u64>() > 50 && stocked.len() > 1;
                prop_assert_eq!(overstocked.contains(&item), expected);
            }
        }

        /// Property: item names come back sorted and unique.
        #[test]
        fn sorted_item_list_is_sorted_and_unique(grid in grid_strategy()) {
            let market = market_from_grid(&grid, &sample_items());
            let names = market.sorted_item_list();
            prop_assert!(names.windows(2).all(|w| w[0] < w[1]));

            let stocked: BTreeSet<&str> = market
                .vendors()
                .iter()
                .flat_map(|v| v.inventory())
                .map(|l| l.item().name())
                .collect();
            prop_assert_eq!(names.len(), stocked.len());
        }
    }
}
