//! Closed vocabularies accepted by the request contract.
//!
//! Wire names are case-sensitive: zodiac signs, animals, genders and vibe
//! keywords are lowercase, MBTI codes are uppercase.

use std::fmt;

use serde::Serialize;

/// A categorical field with a fixed set of wire names.
pub trait Vocabulary: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }

    fn wire_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl Vocabulary for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Gender context the suggested names should fit.
    Gender {
        Female => "female",
        Male => "male",
        Neutral => "neutral",
    }
}

vocabulary! {
    /// Western zodiac sign.
    Zodiac {
        Aries => "aries",
        Taurus => "taurus",
        Gemini => "gemini",
        Cancer => "cancer",
        Leo => "leo",
        Virgo => "virgo",
        Libra => "libra",
        Scorpio => "scorpio",
        Sagittarius => "sagittarius",
        Capricorn => "capricorn",
        Aquarius => "aquarius",
        Pisces => "pisces",
    }
}

vocabulary! {
    /// Chinese zodiac animal, in cycle order.
    ChineseZodiac {
        Rat => "rat",
        Ox => "ox",
        Tiger => "tiger",
        Rabbit => "rabbit",
        Dragon => "dragon",
        Snake => "snake",
        Horse => "horse",
        Goat => "goat",
        Monkey => "monkey",
        Rooster => "rooster",
        Dog => "dog",
        Pig => "pig",
    }
}

vocabulary! {
    Mbti {
        Intj => "INTJ",
        Intp => "INTP",
        Entj => "ENTJ",
        Entp => "ENTP",
        Infj => "INFJ",
        Infp => "INFP",
        Enfj => "ENFJ",
        Enfp => "ENFP",
        Istj => "ISTJ",
        Isfj => "ISFJ",
        Estj => "ESTJ",
        Esfj => "ESFJ",
        Istp => "ISTP",
        Isfp => "ISFP",
        Estp => "ESTP",
        Esfp => "ESFP",
    }
}

vocabulary! {
    /// Personality impression the user wants the name to carry.
    VibeKeyword {
        Rational => "rational",
        Gentle => "gentle",
        Independent => "independent",
        Creative => "creative",
        Warm => "warm",
        Restrained => "restrained",
        Elegant => "elegant",
        Confident => "confident",
    }
}
