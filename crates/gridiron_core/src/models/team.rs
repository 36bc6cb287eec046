use serde::{Deserialize, Serialize};
use std::fmt;

/// Neutral strength rating used whenever a rating is missing or unusable.
pub const DEFAULT_STRENGTH: f64 = 0.5;

/// Opaque team identifier ("GB", "CHI", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Trimmed id, or `fallback` (with a warning) when nothing is left.
    pub fn or_fallback(id: &str, fallback: &str) -> Self {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            log::warn!("blank team id, using {}", fallback);
            Self::new(fallback)
        } else {
            Self::new(trimmed)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Home/away side of the matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// A team as seen by the simulation: an id plus a strength rating in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub id: TeamId,
    #[serde(default = "default_strength")]
    pub strength: f64,
}

fn default_strength() -> f64 {
    DEFAULT_STRENGTH
}

impl TeamProfile {
    /// Build a profile with the neutral rating.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: TeamId::new(id), strength: DEFAULT_STRENGTH }
    }

    /// Build a profile, clamping the rating into [0, 1].
    ///
    /// Non-finite ratings fall back to [`DEFAULT_STRENGTH`].
    pub fn with_strength(id: impl Into<String>, strength: f64) -> Self {
        let mut profile = Self::new(id);
        profile.strength = sanitize_strength(&profile.id, strength);
        profile
    }

    /// Re-apply the rating clamp (used after deserialization).
    pub fn sanitized(mut self) -> Self {
        self.strength = sanitize_strength(&self.id, self.strength);
        self
    }
}

fn sanitize_strength(id: &TeamId, strength: f64) -> f64 {
    if !strength.is_finite() {
        log::warn!("team {}: non-finite strength {}, using {}", id, strength, DEFAULT_STRENGTH);
        return DEFAULT_STRENGTH;
    }
    if !(0.0..=1.0).contains(&strength) {
        log::warn!("team {}: strength {} clamped to [0, 1]", id, strength);
    }
    strength.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_clamped() {
        assert_eq!(TeamProfile::with_strength("GB", 1.7).strength, 1.0);
        assert_eq!(TeamProfile::with_strength("GB", -0.2).strength, 0.0);
        assert_eq!(TeamProfile::with_strength("GB", 0.8).strength, 0.8);
    }

    #[test]
    fn test_non_finite_strength_falls_back() {
        assert_eq!(TeamProfile::with_strength("GB", f64::NAN).strength, DEFAULT_STRENGTH);
        assert_eq!(TeamProfile::with_strength("GB", f64::INFINITY).strength, DEFAULT_STRENGTH);
    }

    #[test]
    fn test_missing_strength_deserializes_to_default() {
        let profile: TeamProfile = serde_json::from_str(r#"{"id":"CHI"}"#).unwrap();
        assert_eq!(profile.id.as_str(), "CHI");
        assert_eq!(profile.strength, DEFAULT_STRENGTH);
    }

    #[test]
    fn test_blank_id_falls_back() {
        assert_eq!(TeamId::or_fallback("  ", "HOME").as_str(), "HOME");
        assert_eq!(TeamId::or_fallback("", "AWAY").as_str(), "AWAY");
        assert_eq!(TeamId::or_fallback(" GB ", "HOME").as_str(), "GB");
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Home.opponent(), Side::Away);
        assert_eq!(Side::Away.opponent(), Side::Home);
    }
}
