//! Product categories.

use serde::{Deserialize, Serialize};

/// Error returned when a string names no known [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

/// The fixed set of catalog categories.
///
/// Serialized and parsed as the exact, case-sensitive names shown in the
/// category selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Mobile,
    Laptop,
    Gaming,
    Audio,
    Accessories,
    TV,
    Appliances,
}

impl Category {
    /// Every category, in selector order.
    pub const ALL: [Self; 7] = [
        Self::Mobile,
        Self::Laptop,
        Self::Gaming,
        Self::Audio,
        Self::Accessories,
        Self::TV,
        Self::Appliances,
    ];

    /// The exact category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Laptop => "Laptop",
            Self::Gaming => "Gaming",
            Self::Audio => "Audio",
            Self::Accessories => "Accessories",
            Self::TV => "TV",
            Self::Appliances => "Appliances",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoryParseError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("mobile".parse::<Category>().is_err());
        assert!("Tv".parse::<Category>().is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Furniture".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: Furniture");
    }

    #[test]
    fn test_serde_uses_exact_name() {
        assert_eq!(serde_json::to_string(&Category::TV).unwrap(), "\"TV\"");
    }
}
