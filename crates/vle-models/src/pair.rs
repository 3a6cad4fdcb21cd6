//! Volatility ordering of a compound pair.

use crate::error::ModelResult;
use serde::Serialize;
use tracing::debug;
use vle_props::SaturationPressureProvider;

/// Two canonical compound names; component 1 is the more volatile one once ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundPair {
    pub first: String,
    pub second: String,
}

/// A pair ordered by saturation pressure at a reference temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedPair {
    pub pair: CompoundPair,
    /// True when the input order was reversed.
    pub swapped: bool,
    pub reference_temperature_k: f64,
    /// Saturation pressures (kPa) of the ordered components at the reference temperature.
    pub psat_kpa: [f64; 2],
}

impl CompoundPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn swapped(&self) -> Self {
        Self {
            first: self.second.clone(),
            second: self.first.clone(),
        }
    }

    /// Put the component with the higher saturation pressure at `t_k` first.
    ///
    /// Ties keep the given order.
    pub fn order_by_volatility<P>(&self, provider: &P, t_k: f64) -> ModelResult<OrderedPair>
    where
        P: SaturationPressureProvider + ?Sized,
    {
        let p_first = provider.psat_kpa(&self.first, t_k)?;
        let p_second = provider.psat_kpa(&self.second, t_k)?;
        let swapped = p_second > p_first;
        debug!(
            first = %self.first,
            second = %self.second,
            p_first,
            p_second,
            swapped,
            "ordered pair by volatility"
        );

        Ok(if swapped {
            OrderedPair {
                pair: self.swapped(),
                swapped,
                reference_temperature_k: t_k,
                psat_kpa: [p_second, p_first],
            }
        } else {
            OrderedPair {
                pair: self.clone(),
                swapped,
                reference_temperature_k: t_k,
                psat_kpa: [p_first, p_second],
            }
        })
    }
}
