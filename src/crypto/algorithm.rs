//! The closed set of supported signature algorithms and their size metadata.

use crate::error::ChainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature family, independent of the security level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgoFamily {
    MlDsa,
    Falcon,
    Hawk,
}

impl AlgoFamily {
    pub const ALL: [AlgoFamily; 3] = [AlgoFamily::MlDsa, AlgoFamily::Falcon, AlgoFamily::Hawk];

    pub fn name(&self) -> &'static str {
        match self {
            AlgoFamily::MlDsa => "ML-DSA",
            AlgoFamily::Falcon => "Falcon",
            AlgoFamily::Hawk => "Hawk",
        }
    }

    /// Variant strings accepted for this family.
    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            AlgoFamily::MlDsa => &["44", "65", "87"],
            AlgoFamily::Falcon | AlgoFamily::Hawk => &["512", "1024"],
        }
    }

    /// Falcon produces compressed signatures of varying length; the others
    /// always emit exactly the maximum size.
    pub fn has_fixed_length_signatures(&self) -> bool {
        !matches!(self, AlgoFamily::Falcon)
    }
}

impl fmt::Display for AlgoFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgoFamily {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "mldsa" => Ok(AlgoFamily::MlDsa),
            "falcon" => Ok(AlgoFamily::Falcon),
            "hawk" => Ok(AlgoFamily::Hawk),
            _ => Err(ChainError::UnsupportedAlgorithm {
                family: s.to_string(),
                variant: String::new(),
            }),
        }
    }
}

/// One concrete (family, variant) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    MlDsa44,
    MlDsa65,
    MlDsa87,
    Falcon512,
    Falcon1024,
    Hawk512,
    Hawk1024,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::MlDsa44,
        Algorithm::MlDsa65,
        Algorithm::MlDsa87,
        Algorithm::Falcon512,
        Algorithm::Falcon1024,
        Algorithm::Hawk512,
        Algorithm::Hawk1024,
    ];

    /// Resolve a (family, variant) selection. Unknown variants are a
    /// configuration error.
    pub fn from_parts(family: AlgoFamily, variant: &str) -> Result<Self, ChainError> {
        let algorithm = match (family, variant.trim()) {
            (AlgoFamily::MlDsa, "44") => Algorithm::MlDsa44,
            (AlgoFamily::MlDsa, "65") => Algorithm::MlDsa65,
            (AlgoFamily::MlDsa, "87") => Algorithm::MlDsa87,
            (AlgoFamily::Falcon, "512") => Algorithm::Falcon512,
            (AlgoFamily::Falcon, "1024") => Algorithm::Falcon1024,
            (AlgoFamily::Hawk, "512") => Algorithm::Hawk512,
            (AlgoFamily::Hawk, "1024") => Algorithm::Hawk1024,
            _ => {
                return Err(ChainError::UnsupportedAlgorithm {
                    family: family.name().to_string(),
                    variant: variant.to_string(),
                });
            }
        };
        Ok(algorithm)
    }

    pub fn family(&self) -> AlgoFamily {
        match self {
            Algorithm::MlDsa44 | Algorithm::MlDsa65 | Algorithm::MlDsa87 => AlgoFamily::MlDsa,
            Algorithm::Falcon512 | Algorithm::Falcon1024 => AlgoFamily::Falcon,
            Algorithm::Hawk512 | Algorithm::Hawk1024 => AlgoFamily::Hawk,
        }
    }

    pub fn variant(&self) -> &'static str {
        match self {
            Algorithm::MlDsa44 => "44",
            Algorithm::MlDsa65 => "65",
            Algorithm::MlDsa87 => "87",
            Algorithm::Falcon512 | Algorithm::Hawk512 => "512",
            Algorithm::Falcon1024 | Algorithm::Hawk1024 => "1024",
        }
    }

    /// Display name, e.g. `ML-DSA-65`.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::MlDsa44 => "ML-DSA-44",
            Algorithm::MlDsa65 => "ML-DSA-65",
            Algorithm::MlDsa87 => "ML-DSA-87",
            Algorithm::Falcon512 => "Falcon-512",
            Algorithm::Falcon1024 => "Falcon-1024",
            Algorithm::Hawk512 => "Hawk-512",
            Algorithm::Hawk1024 => "Hawk-1024",
        }
    }

    pub fn public_key_size(&self) -> usize {
        match self {
            Algorithm::MlDsa44 => 1312,
            Algorithm::MlDsa65 => 1952,
            Algorithm::MlDsa87 => 2592,
            Algorithm::Falcon512 => 897,
            Algorithm::Falcon1024 => 1793,
            Algorithm::Hawk512 => 1024,
            Algorithm::Hawk1024 => 2440,
        }
    }

    pub fn secret_key_size(&self) -> usize {
        match self {
            Algorithm::MlDsa44 => 2560,
            Algorithm::MlDsa65 => 4032,
            Algorithm::MlDsa87 => 4896,
            Algorithm::Falcon512 => 1281,
            Algorithm::Falcon1024 => 2305,
            Algorithm::Hawk512 => 184,
            Algorithm::Hawk1024 => 360,
        }
    }

    pub fn max_signature_size(&self) -> usize {
        match self {
            Algorithm::MlDsa44 => 2420,
            Algorithm::MlDsa65 => 3309,
            Algorithm::MlDsa87 => 4627,
            Algorithm::Falcon512 => 752,
            Algorithm::Falcon1024 => 1462,
            Algorithm::Hawk512 => 555,
            Algorithm::Hawk1024 => 1221,
        }
    }

    pub fn has_fixed_length_signatures(&self) -> bool {
        self.family().has_fixed_length_signatures()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ChainError;

    /// Accepts `ML-DSA-65`, `mldsa65`, `falcon-1024`, `Hawk_512` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split_at = trimmed
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| ChainError::UnsupportedAlgorithm {
                family: trimmed.to_string(),
                variant: String::new(),
            })?;
        let (family, variant) = trimmed.split_at(split_at);
        let family: AlgoFamily = family.trim_end_matches(&['-', '_'][..]).parse()?;
        Algorithm::from_parts(family, variant)
    }
}
