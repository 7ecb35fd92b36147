//! Merchandising badge shown on a product card.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Badge rendered in the corner of a product card.
///
/// The set is closed in the studio: editors pick from a dropdown, so any
/// other string coming back from the Content Lake is a data error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Sales")]
    Sales,
}

impl Badge {
    /// Every badge an editor can choose, in dropdown order.
    pub const ALL: [Self; 2] = [Self::New, Self::Sales];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Sales => "Sales",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown badge: {0}")]
pub struct ParseBadgeError(String);

impl FromStr for Badge {
    type Err = ParseBadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Sales" => Ok(Self::Sales),
            other => Err(ParseBadgeError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_from_str() {
        for badge in Badge::ALL {
            assert_eq!(badge.as_str().parse::<Badge>().unwrap(), badge);
        }
    }

    #[test]
    fn serde_uses_studio_labels() {
        assert_eq!(serde_json::to_string(&Badge::Sales).unwrap(), "\"Sales\"");
        let badge: Badge = serde_json::from_str("\"New\"").unwrap();
        assert_eq!(badge, Badge::New);
    }

    #[test]
    fn rejects_unknown_labels() {
        assert!("Clearance".parse::<Badge>().is_err());
    }
}
