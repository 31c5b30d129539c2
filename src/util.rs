use crate::error::{Error, Result};
use crate::game::Side;
use serde::Deserialize;
use std::convert::TryFrom;
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AwayHome<T> {
    pub away: T,
    pub home: T,
}

impl<T> AwayHome<T> {
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }

    pub fn map_opt<F, U>(&self, f: F) -> Option<AwayHome<U>>
    where
        F: Fn(&T) -> Option<U>,
    {
        Some(AwayHome {
            away: f(&self.away)?,
            home: f(&self.home)?,
        })
    }
}

/// How weight is spread over a projection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Scheme {
    Constant,
    Linear,
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Scheme> {
        match s {
            "constant" => Ok(Scheme::Constant),
            "linear" => Ok(Scheme::Linear),
            _ => Err(Error::invalid("scheme", s)),
        }
    }
}

impl TryFrom<String> for Scheme {
    type Error = Error;

    fn try_from(s: String) -> Result<Scheme> {
        s.parse()
    }
}

/// Weights for a window of `window` games, oldest first, summing to 1. Under
/// `Linear` the most recent game gets the largest weight.
#[allow(clippy::cast_precision_loss)]
pub fn weights(window: usize, scheme: Scheme) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::invalid("window", "0"));
    }
    Ok(match scheme {
        Scheme::Constant => vec![1.0 / window as f64; window],
        Scheme::Linear => {
            let total = (window * (window + 1) / 2) as f64;
            (1..=window).map(|i| i as f64 / total).collect()
        }
    })
}

#[allow(clippy::cast_precision_loss)]
pub fn dot(weights: &[f64], values: &[u32]) -> f64 {
    debug_assert_eq!(weights.len(), values.len());
    weights
        .iter()
        .zip(values)
        .map(|(w, v)| w * f64::from(*v))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{dot, weights, AwayHome, Scheme};
    use crate::game::Side;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_weights() {
        for (w, expected) in weights(4, Scheme::Constant).unwrap().iter().zip(&[0.25; 4]) {
            assert_approx_eq!(*w, *expected);
        }
        let linear = weights(4, Scheme::Linear).unwrap();
        for (w, expected) in linear.iter().zip(&[0.1, 0.2, 0.3, 0.4]) {
            assert_approx_eq!(*w, *expected);
        }
        assert!(weights(0, Scheme::Constant).is_err());
    }

    #[test]
    fn test_weights_sum_to_one() {
        for window in 1..=20 {
            assert_approx_eq!(weights(window, Scheme::Constant).unwrap().iter().sum::<f64>(), 1.0);
            let linear = weights(window, Scheme::Linear).unwrap();
            assert_approx_eq!(linear.iter().sum::<f64>(), 1.0);
            assert!(linear.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_dot() {
        assert_approx_eq!(dot(&[0.1, 0.2, 0.3, 0.4], &[4, 3, 2, 1]), 2.0);
        assert_approx_eq!(dot(&[], &[]), 0.0);
    }

    #[test]
    fn test_parse_scheme() {
        assert_eq!("linear".parse::<Scheme>().unwrap(), Scheme::Linear);
        assert!("exponential".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_away_home() {
        let mut pair = AwayHome { away: 1, home: 2 };
        *pair.get_mut(Side::Away) += 10;
        assert_eq!(*pair.get(Side::Away), 11);
        assert_eq!(*pair.get(Side::Home), 2);
        assert_eq!(
            pair.map_opt(|x| if *x > 5 { Some(*x) } else { None }),
            None
        );
        assert_eq!(
            pair.map_opt(|x| Some(x * 2)),
            Some(AwayHome { away: 22, home: 4 })
        );
    }
}
