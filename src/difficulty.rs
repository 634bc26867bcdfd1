use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Engine skill level on the 0 to 20 scale, indexed by difficulty minus one.
pub const SKILL_LEVELS: [u8; 6] = [1, 3, 6, 10, 13, 16];
pub const LABELS: [&str; 6] = ["Beginner", "Easy", "Medium", "Hard", "Expert", "Insane"];
pub const APPROXIMATE_RATINGS: [u16; 6] = [800, 1000, 1300, 1600, 1900, 2200];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidDifficulty {
    OutOfRange(u8),
    ParseIntError(ParseIntError),
}
impl From<ParseIntError> for InvalidDifficulty {
    fn from(value: ParseIntError) -> Self {
        InvalidDifficulty::ParseIntError(value)
    }
}
impl Display for InvalidDifficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidDifficulty::OutOfRange(level) => {
                write!(f, "difficulty {level} is outside of 1 to 6")?;
            }
            InvalidDifficulty::ParseIntError(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for InvalidDifficulty {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InvalidDifficulty::OutOfRange(_) => None,
            InvalidDifficulty::ParseIntError(err) => Some(err),
        }
    }
}
/// Opponent strength from 1 to 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Self = Difficulty(1);
    pub const MAX: Self = Difficulty(6);

    pub fn new(level: u8) -> Result<Self, InvalidDifficulty> {
        if (1..=6).contains(&level) {
            Ok(Difficulty(level))
        } else {
            Err(InvalidDifficulty::OutOfRange(level))
        }
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=6).map(Difficulty)
    }
    pub fn level(self) -> u8 {
        self.0
    }
    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
    pub fn skill_level(self) -> u8 {
        SKILL_LEVELS[self.index()]
    }
    pub fn label(self) -> &'static str {
        LABELS[self.index()]
    }
    pub fn approximate_rating(self) -> u16 {
        APPROXIMATE_RATINGS[self.index()]
    }
}
impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(3)
    }
}
impl TryFrom<u8> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Difficulty::new(value)
    }
}
impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}
impl FromStr for Difficulty {
    type Err = InvalidDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::new(s.trim().parse()?)
    }
}
impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())?;
        Ok(())
    }
}
/// What an external engine process needs for one move request. The process
/// is acquired per request with these settings and released afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    pub difficulty: Difficulty,
    pub move_time_ms: u64,
    pub hash_mb: u32,
    pub threads: u32,
}
impl Default for OpponentConfig {
    fn default() -> Self {
        OpponentConfig {
            difficulty: Difficulty::default(),
            move_time_ms: 100,
            hash_mb: 16,
            threads: 1,
        }
    }
}
impl OpponentConfig {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        OpponentConfig {
            difficulty,
            ..OpponentConfig::default()
        }
    }
}
#[cfg(test)]
mod test {
    use crate::difficulty::{Difficulty, InvalidDifficulty, OpponentConfig};

    #[test]
    fn range() {
        assert_eq!(Difficulty::new(0), Err(InvalidDifficulty::OutOfRange(0)));
        assert_eq!(Difficulty::new(7), Err(InvalidDifficulty::OutOfRange(7)));
        assert_eq!(Difficulty::all().count(), 6);
        assert_eq!(Difficulty::default().level(), 3);
        assert_eq!(Difficulty::default().label(), "Medium");
    }
    #[test]
    fn skill_table() {
        let skills: Vec<_> = Difficulty::all().map(Difficulty::skill_level).collect();
        assert_eq!(skills, [1, 3, 6, 10, 13, 16]);
        assert_eq!(Difficulty::MIN.approximate_rating(), 800);
        assert_eq!(Difficulty::MAX.label(), "Insane");
    }
    #[test]
    fn parse() {
        assert_eq!("5".parse::<Difficulty>(), Ok(Difficulty::new(5).unwrap()));
        assert!(matches!(
            "five".parse::<Difficulty>(),
            Err(InvalidDifficulty::ParseIntError(_))
        ));
    }
    #[test]
    fn serde() {
        let difficulty: Difficulty = serde_json::from_str("4").unwrap();
        assert_eq!(difficulty.level(), 4);
        assert!(serde_json::from_str::<Difficulty>("9").is_err());
        assert_eq!(serde_json::to_string(&difficulty).unwrap(), "4");
    }
    #[test]
    fn config_defaults() {
        let config: OpponentConfig = serde_json::from_str(r#"{"difficulty": 6}"#).unwrap();
        assert_eq!(
            config,
            OpponentConfig {
                difficulty: Difficulty::MAX,
                move_time_ms: 100,
                hash_mb: 16,
                threads: 1,
            }
        );
    }
}
