use crate::error::{PressError, Result};

/// Where the start-to-start period came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceSource {
    PacketsPerSecond,
    Period,
    Default,
}

/// Resolved packet cadence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    /// Start-to-start period in seconds
    pub period_secs: f64,
    pub source: CadenceSource,
}

impl Cadence {
    /// Pick the period from a packets-per-second rate or an explicit period.
    ///
    /// The two are meant to be mutually exclusive; if both are given the
    /// rate wins.
    pub fn resolve(pps: Option<f64>, period: Option<f64>, default_period: f64) -> Result<Self> {
        if let Some(pps) = pps {
            if !pps.is_finite() || pps <= 0.0 {
                return Err(PressError::InvalidCadence(format!(
                    "packets per second must be positive, got {}",
                    pps
                )));
            }
            return Ok(Self {
                period_secs: 1.0 / pps,
                source: CadenceSource::PacketsPerSecond,
            });
        }

        if let Some(period) = period {
            check_period(period)?;
            return Ok(Self {
                period_secs: period,
                source: CadenceSource::Period,
            });
        }

        check_period(default_period)?;
        Ok(Self {
            period_secs: default_period,
            source: CadenceSource::Default,
        })
    }

    pub fn from_period(period_secs: f64) -> Result<Self> {
        Self::resolve(None, Some(period_secs), period_secs)
    }

    pub fn packets_per_second(&self) -> f64 {
        1.0 / self.period_secs
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            period_secs: crate::DEFAULT_PERIOD_SECS,
            source: CadenceSource::Default,
        }
    }
}

pub(crate) fn check_period(period: f64) -> Result<()> {
    if !period.is_finite() || period <= 0.0 {
        return Err(PressError::InvalidCadence(format!(
            "period must be positive, got {}",
            period
        )));
    }
    Ok(())
}

/// Start-to-start period in seconds; see [`Cadence::resolve`]
pub fn resolve_period(pps: Option<f64>, period: Option<f64>, default_period: f64) -> Result<f64> {
    Cadence::resolve(pps, period, default_period).map(|c| c.period_secs)
}
