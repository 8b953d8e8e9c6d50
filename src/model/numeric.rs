use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::LoadError;

/// Amounts are stored with two decimal places, rounded away from zero.
pub const SCALE: u32 = 2;

/// A rational number in GnuCash's `numerator/denominator` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from(self.numerator).checked_div(Decimal::from(self.denominator))
    }

    pub fn rounded(&self) -> Option<Decimal> {
        self.to_decimal().map(|d| {
            let mut d = d.round_dp_with_strategy(SCALE, RoundingStrategy::AwayFromZero);
            d.rescale(SCALE);
            d
        })
    }
}

impl FromStr for Fraction {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || LoadError::Format(format!("invalid number {:?}", s));
        match s.split('/').collect::<Vec<_>>().as_slice() {
            &[num, denom] => {
                let numerator = num.parse::<i64>().map_err(|_| invalid())?;
                let denominator = denom.parse::<i64>().map_err(|_| invalid())?;
                if denominator == 0 {
                    return Err(invalid());
                }
                Ok(Fraction {
                    numerator,
                    denominator,
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

pub fn parse_number(s: &str) -> Result<Decimal, LoadError> {
    let fraction = s.parse::<Fraction>()?;
    fraction
        .rounded()
        .ok_or_else(|| LoadError::Format(format!("number out of range {}", fraction)))
}

pub fn parse_integer(s: &str) -> Result<i64, LoadError> {
    s.trim()
        .parse()
        .map_err(|_| LoadError::Format(format!("invalid integer {:?}", s)))
}

#[cfg(test)]
mod test_numeric {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("100/100").unwrap(), dec("1.00"));
        assert_eq!(parse_number("333/1000").unwrap(), dec("0.34"));
        assert_eq!(parse_number("0/100000").unwrap(), dec("0.00"));
        assert_eq!(parse_number("-333/1000").unwrap(), dec("-0.34"));
        assert_eq!(parse_number("2100000/100000").unwrap(), dec("21.00"));
        assert_eq!(parse_number(" 12100/100\n").unwrap(), dec("121.00"));
        assert_eq!(parse_number("1/3").unwrap(), dec("0.34"));
        assert_eq!(parse_number("-12100/100").unwrap(), dec("-121.00"));
    }

    #[test]
    fn test_scale() {
        assert_eq!(parse_number("100/100").unwrap().to_string(), "1.00");
        assert_eq!(parse_number("0/1").unwrap().to_string(), "0.00");
        assert_eq!(parse_number("5/1000").unwrap().to_string(), "0.01");
    }

    #[test]
    fn test_invalid() {
        for s in ["100", "", "1/2/3", "a/100", "100/b", "1.5/2", "1/0", "/"] {
            assert!(
                matches!(parse_number(s), Err(LoadError::Format(_))),
                "{:?} should not parse",
                s
            );
        }
    }

    #[test]
    fn test_fraction() {
        let f = "333/1000".parse::<Fraction>().unwrap();
        assert_eq!(
            f,
            Fraction {
                numerator: 333,
                denominator: 1000
            }
        );
        assert_eq!(f.to_decimal(), Some(dec("0.333")));
        assert_eq!(f.rounded(), Some(dec("0.34")));
        assert_eq!(f.to_string(), "333/1000");
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("100").unwrap(), 100);
        assert_eq!(parse_integer("-7").unwrap(), -7);
        assert!(parse_integer("1.5").is_err());
    }
}
