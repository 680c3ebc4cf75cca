//! # Orbital quantities derived from mean motion
//!
//! TLE and OMM records carry the **mean motion** `n` (revolutions per day) but no explicit
//! size of the orbit. Kepler's third law recovers the semi-major axis:
//!
//! ```text
//! n [rad/s] = n [rev/day] · 2π / 86400
//! a         = (μ / n²)^(1/3)
//! h         = a − R⊕
//! ```
//!
//! with `μ = 398600.4418 km³/s²` and `R⊕ = 6371 km`.
//!
//! The orbit is treated as circular: the semi-major axis stands in for the mean altitude and
//! apogee/perigee are not modelled. This is enough to separate constellation shells, which are
//! tens of kilometers apart.
use crate::constants::{Kilometer, RevPerDay, DPI, EARTH_RADIUS_KM, MU_EARTH, SECONDS_PER_DAY};
use crate::tlebins_errors::TleBinsError;

/// Convert a mean motion from revolutions per day to radians per second.
pub fn mean_motion_to_rad_per_sec(mean_motion: RevPerDay) -> f64 {
    mean_motion * DPI / SECONDS_PER_DAY
}

/// Semi-major axis (km) of an orbit with the given mean motion.
///
/// Arguments
/// -----------------
/// * `mean_motion` – Mean motion in revolutions per day.
///
/// Return
/// ----------
/// * The semi-major axis in kilometers, or [`TleBinsError::NonPositiveMeanMotion`] when the
///   mean motion is zero, negative, or not finite (`n²` would vanish or be meaningless).
pub fn semi_major_axis(mean_motion: RevPerDay) -> Result<Kilometer, TleBinsError> {
    if !mean_motion.is_finite() || mean_motion <= 0.0 {
        return Err(TleBinsError::NonPositiveMeanMotion(mean_motion));
    }
    let n = mean_motion_to_rad_per_sec(mean_motion);
    Ok((MU_EARTH / n.powi(2)).cbrt())
}

/// Mean altitude (km) above the mean Earth radius, assuming a circular orbit.
///
/// Arguments
/// -----------------
/// * `mean_motion` – Mean motion in revolutions per day.
///
/// Return
/// ----------
/// * `a − R⊕` in kilometers; fails like [`semi_major_axis`].
pub fn mean_motion_to_altitude(mean_motion: RevPerDay) -> Result<Kilometer, TleBinsError> {
    Ok(semi_major_axis(mean_motion)? - EARTH_RADIUS_KM)
}
