use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use marketplace_core::{DomainError, DomainResult, Entity, ItemId, ValueObject};

/// Monetary amount parsed from a display string such as `"$0.75"`.
///
/// Stored in minor units (cents) alongside the currency symbol, so
/// `Display` reproduces the canonical display string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    cents: u64,
    symbol: char,
}

impl ValueObject for Price {}

impl Price {
    pub fn new(symbol: char, cents: u64) -> Self {
        Self { cents, symbol }
    }

    /// Parse `<symbol><digits>.<digits>`.
    ///
    /// The symbol is a single character that is neither a digit, whitespace,
    /// nor a sign. One or two fractional digits are accepted (`"$5.3"` is 530
    /// cents); sub-cent precision is rejected.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let mut chars = raw.chars();
        let symbol = chars
            .next()
            .ok_or_else(|| DomainError::invalid_price("price cannot be empty"))?;
        if symbol.is_ascii_digit() || symbol.is_whitespace() || matches!(symbol, '.' | '-' | '+') {
            return Err(DomainError::invalid_price(format!(
                "{raw:?} must start with a currency symbol"
            )));
        }

        let amount = chars.as_str();
        let (whole, frac) = amount.split_once('.').ok_or_else(|| {
            DomainError::invalid_price(format!("{raw:?} must contain a decimal point"))
        })?;

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_price(format!(
                "{raw:?} has a malformed whole amount"
            )));
        }
        if frac.is_empty() || frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_price(format!(
                "{raw:?} must have one or two fractional digits"
            )));
        }

        let whole: u64 = whole
            .parse()
            .map_err(|_| DomainError::invalid_price(format!("{raw:?} is out of range")))?;
        // One digit means tenths: "5.3" is 5.30.
        let scale = if frac.len() == 1 { 10 } else { 1 };
        let frac_cents = frac
            .parse::<u64>()
            .map_err(|_| DomainError::invalid_price(format!("{raw:?} is out of range")))?
            * scale;

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(|| DomainError::invalid_price(format!("{raw:?} is out of range")))?;

        Ok(Self { cents, symbol })
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Amount in major units (e.g. dollars). Lossy; use `cents` for arithmetic.
    pub fn as_major(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Price of `quantity` units in cents, `None` on overflow.
    pub fn total_cents(&self, quantity: u64) -> Option<u64> {
        self.cents.checked_mul(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}.{:02}", self.symbol, self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A named, priced good.
///
/// Items are entities: equality and hashing use the handle minted at
/// construction, so two separately built items with the same name and price
/// are distinct inventory entries. Clones share the handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    id: ItemId,
    name: String,
    price: Price,
}

/// Wire form of [`Item`], checked before it becomes one.
#[derive(Deserialize)]
struct ItemRecord {
    id: ItemId,
    name: String,
    price: Price,
}

impl TryFrom<ItemRecord> for Item {
    type Error = DomainError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(Self {
            id: record.id,
            name: record.name,
            price: record.price,
        })
    }
}

impl Item {
    pub fn new(name: impl Into<String>, price: &str) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        let price = Price::parse(price)?;
        Ok(Self {
            id: ItemId::new(),
            name,
            price,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Value comparison on name and price, ignoring identity.
    pub fn same_value(&self, other: &Item) -> bool {
        self.name == other.name && self.price == other.price
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl core::hash::Hash for Item {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
