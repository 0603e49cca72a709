//! Travel profile.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid profile name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid travel profile: {0} (expected 'bike' or 'foot')")]
pub struct InvalidProfile(String);

/// The travel mode used to request routes.
///
/// Each profile maps to its own named endpoint on the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Bicycle routing.
    Bike,
    /// Walking routing.
    Foot,
}

impl Profile {
    /// The named service endpoint serving this profile.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Profile::Bike => "routed-bike",
            Profile::Foot => "routed-foot",
        }
    }

    /// The profile segment used in route request paths.
    pub fn route_profile(&self) -> &'static str {
        match self {
            Profile::Bike => "bike",
            Profile::Foot => "foot",
        }
    }
}

impl FromStr for Profile {
    type Err = InvalidProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bike" | "bicycle" => Ok(Profile::Bike),
            "foot" | "walk" => Ok(Profile::Foot),
            other => Err(InvalidProfile(other.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_profiles() {
        assert_eq!("bike".parse::<Profile>().unwrap(), Profile::Bike);
        assert_eq!("Foot".parse::<Profile>().unwrap(), Profile::Foot);
        assert_eq!("walk".parse::<Profile>().unwrap(), Profile::Foot);
    }

    #[test]
    fn parse_unknown_profile() {
        let err = "car".parse::<Profile>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid travel profile: car (expected 'bike' or 'foot')"
        );
    }

    #[test]
    fn endpoints_are_distinct_per_profile() {
        assert_eq!(Profile::Bike.endpoint(), "routed-bike");
        assert_eq!(Profile::Foot.endpoint(), "routed-foot");
        assert_ne!(Profile::Bike.endpoint(), Profile::Foot.endpoint());
    }

    #[test]
    fn display_matches_route_profile() {
        assert_eq!(Profile::Bike.to_string(), "bike");
        assert_eq!(Profile::Foot.to_string(), "foot");
    }
}
