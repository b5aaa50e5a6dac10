//! Identifiers of the calibration maps used by the analysis core.

use std::fmt;

/// A calibration map the analysis core reads from a tune file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapId {
    /// RPM breakpoints shared by `fuel_base` and the PE enable vectors.
    RpmAxis,
    /// Load (g/rev) breakpoints of `fuel_base`.
    LoadAxis,
    /// Base fuel table, indexed by RPM row and load column.
    FuelBase,
    /// Minimum load to enable power enrichment, per RPM breakpoint.
    EnableLoad,
    /// Minimum throttle to enable power enrichment, per RPM breakpoint.
    EnableTps,
    /// Power enrichment delay counters.
    DelayCounter,
    /// RPM breakpoints of the delay counters.
    DelayAxis,
}

impl MapId {
    /// The `id` string used in the tune file.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapId::RpmAxis => "base_spark_rpm_index",
            MapId::LoadAxis => "base_spark_map_index",
            MapId::FuelBase => "fuel_base",
            MapId::EnableLoad => "pe_enable_load",
            MapId::EnableTps => "pe_enable_tps",
            MapId::DelayCounter => "pe_delay",
            MapId::DelayAxis => "pe_delay_index",
        }
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
