//! Product catalog backing the showcase gallery.

use std::fmt;

/// The fixed set of showcased pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductKey {
    Ring,
    Necklace,
    Earrings,
}

impl ProductKey {
    /// All keys in gallery order.
    pub const ALL: [ProductKey; 3] = [Self::Ring, Self::Necklace, Self::Earrings];

    /// Parse a product key from its storage name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ring" => Some(Self::Ring),
            "necklace" => Some(Self::Necklace),
            "earrings" => Some(Self::Earrings),
            _ => None,
        }
    }

    /// Stable name used in the persisted counter blob.
    #[must_use]
    pub fn storage_name(&self) -> &'static str {
        match self {
            Self::Ring => "ring",
            Self::Necklace => "necklace",
            Self::Earrings => "earrings",
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_name())
    }
}

/// A showcased piece: display copy plus the unit price the calculator uses.
#[derive(Debug, Clone, Copy)]
pub struct Product {
    pub key: ProductKey,
    pub name: &'static str,
    pub price: f64,
    pub blurb: &'static str,
    pub art: &'static [&'static str],
}

/// Gallery contents, in display order.
pub const PRODUCTS: [Product; 3] = [
    Product {
        key: ProductKey::Ring,
        name: "Gemstone Ring",
        price: 500.0,
        blurb: "Hand-set garnet on a brushed silver band.",
        art: &[
            "   .-=-.   ",
            "  /  *  \\  ",
            " |       | ",
            "  \\     /  ",
            "   `---'   ",
        ],
    },
    Product {
        key: ProductKey::Necklace,
        name: "Pearl Necklace",
        price: 750.0,
        blurb: "Forty-two freshwater pearls on silk cord.",
        art: &[
            " o-o-o-o-o ",
            "o         o",
            "o         o",
            " o       o ",
            "   `o-o'   ",
        ],
    },
    Product {
        key: ProductKey::Earrings,
        name: "Diamond Earrings",
        price: 1200.0,
        blurb: "Bezel-set studs, conflict-free stones.",
        art: &[
            "  n     n  ",
            "  |     |  ",
            "  o     o  ",
            " <*>   <*> ",
            "  v     v  ",
        ],
    },
];

/// Look up the catalog entry for a key.
#[must_use]
pub fn product(key: ProductKey) -> &'static Product {
    match key {
        ProductKey::Ring => &PRODUCTS[0],
        ProductKey::Necklace => &PRODUCTS[1],
        ProductKey::Earrings => &PRODUCTS[2],
    }
}
