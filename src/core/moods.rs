use std::fmt;
use std::str::FromStr;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{Error, Result};

/// 고정된 기분 목록.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Relaxed,
    Energetic,
    Romantic,
    Nostalgic,
    Focused,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Relaxed,
        Mood::Energetic,
        Mood::Romantic,
        Mood::Nostalgic,
        Mood::Focused,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Relaxed => "relaxed",
            Mood::Energetic => "energetic",
            Mood::Romantic => "romantic",
            Mood::Nostalgic => "nostalgic",
            Mood::Focused => "focused",
        }
    }

    /// 이 기분으로 검색할 후보 검색어. 항상 비어 있지 않다.
    pub fn search_terms(self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &["happy", "joyful", "upbeat", "cheerful", "positive", "dance", "party"],
            Mood::Sad => &["sad", "melancholic", "emotional", "heartbreak", "lonely", "tears", "blue"],
            Mood::Angry => &["angry", "rage", "furious", "intense", "powerful", "aggressive", "rock"],
            Mood::Relaxed => &["relaxed", "calm", "peaceful", "chill", "ambient", "meditation", "zen"],
            Mood::Energetic => &["energetic", "pump", "workout", "motivation", "power", "energy", "fast"],
            Mood::Romantic => &["romantic", "love", "passion", "romance", "heart", "sweet", "tender"],
            Mood::Nostalgic => &["nostalgic", "retro", "classic", "oldies", "memories", "vintage", "throwback"],
            Mood::Focused => &[
                "focused",
                "concentration",
                "study",
                "work",
                "productivity",
                "instrumental",
                "classical",
            ],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| Error::UnknownMood(s.to_string()))
    }
}

/// 기분 이름으로 후보 검색어를 찾는다.
pub fn terms_for(mood: &str) -> Result<&'static [&'static str]> {
    Ok(mood.parse::<Mood>()?.search_terms())
}

/// 후보 검색어 중 하나를 균등하게 뽑는다.
pub fn pick_term<R: Rng + ?Sized>(mood: Mood, rng: &mut R) -> &'static str {
    let terms = mood.search_terms();
    terms.choose(rng).copied().unwrap_or(terms[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_every_mood_has_terms() {
        for mood in Mood::ALL {
            let terms = mood.search_terms();
            assert!(!terms.is_empty());
            assert_eq!(terms[0], mood.as_str());
        }
    }

    #[test]
    fn test_terms_for_known_mood() {
        let terms = terms_for("sad").unwrap();
        assert!(terms.contains(&"heartbreak"));
    }

    #[test]
    fn test_terms_for_unknown_mood() {
        assert_eq!(
            terms_for("bored"),
            Err(Error::UnknownMood("bored".to_string()))
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Relaxed ".parse::<Mood>(), Ok(Mood::Relaxed));
        assert_eq!("FOCUSED".parse::<Mood>(), Ok(Mood::Focused));
    }

    #[test]
    fn test_pick_term_reaches_every_candidate() {
        let mut rng = StdRng::seed_from_u64(7);
        for mood in Mood::ALL {
            let seen: HashSet<&str> = (0..500).map(|_| pick_term(mood, &mut rng)).collect();
            assert_eq!(seen.len(), mood.search_terms().len(), "mood {}", mood);
        }
    }
}
