use std::fmt;
use std::str::FromStr;

use crate::error::MultiplicityError;

/// Parsed multiplicity token: `"N"` or `"min..max"`.
///
/// Bounds stay textual so `*` and other open markers pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplicity {
    pub min: String,
    pub max: String,
}

/// Range separator used by multiplicity tokens.
const RANGE_SEPARATOR: &str = "..";

impl Multiplicity {
    pub fn exact(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            min: value.clone(),
            max: value,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }
}

impl FromStr for Multiplicity {
    type Err = MultiplicityError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.split_once(RANGE_SEPARATOR) {
            None if token.is_empty() => Err(MultiplicityError::Empty),
            None => Ok(Self::exact(token)),
            Some((min, max)) => {
                if min.is_empty() || max.is_empty() {
                    return Err(MultiplicityError::EmptyBound(token.to_string()));
                }
                if max.contains(RANGE_SEPARATOR) {
                    return Err(MultiplicityError::ExtraSeparator(token.to_string()));
                }
                Ok(Self {
                    min: min.to_string(),
                    max: max.to_string(),
                })
            }
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}{RANGE_SEPARATOR}{}", self.min, self.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_token() {
        let m: Multiplicity = "1".parse().unwrap();
        assert_eq!(m.min, "1");
        assert_eq!(m.max, "1");
        assert!(m.is_exact());
    }

    #[test]
    fn test_range_token() {
        let m: Multiplicity = "0..*".parse().unwrap();
        assert_eq!(m.min, "0");
        assert_eq!(m.max, "*");
        assert_eq!(m.to_string(), "0..*");
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!("".parse::<Multiplicity>(), Err(MultiplicityError::Empty));
        assert_eq!(
            "..".parse::<Multiplicity>(),
            Err(MultiplicityError::EmptyBound("..".to_string()))
        );
        assert_eq!(
            "0..".parse::<Multiplicity>(),
            Err(MultiplicityError::EmptyBound("0..".to_string()))
        );
        assert_eq!(
            "0..1..2".parse::<Multiplicity>(),
            Err(MultiplicityError::ExtraSeparator("0..1..2".to_string()))
        );
    }
}
