//! Configuration types deserialized from `flo2v.toml`.

use serde::Deserialize;

/// The top-level generator configuration.
///
/// Every section and field is optional; an empty file yields the canonical
/// output conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flo2vConfig {
    /// Settings for the generated design module.
    #[serde(default)]
    pub module: ModuleConfig,
    /// Settings for the generated testbench.
    #[serde(default)]
    pub testbench: TestbenchConfig,
}

/// Settings for the generated design module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Separator between the module name and the `clk`/`reset` port names.
    #[serde(default)]
    pub port_suffix: PortSuffix,
    /// Base case of the `log2` priority encoder.
    #[serde(default)]
    pub log2_base: Log2Base,
}

/// Settings for the generated testbench.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestbenchConfig {
    /// Clock period in timescale units. Must be positive and even.
    #[serde(default = "default_clock_period")]
    pub clock_period: u64,
    /// The `` `timescale `` directive argument.
    #[serde(default = "default_timescale")]
    pub timescale: String,
    /// Assignment style used for `wire_poke` drives and the reset pulse.
    #[serde(default)]
    pub drive: DriveStyle,
}

impl Default for TestbenchConfig {
    fn default() -> Self {
        Self {
            clock_period: default_clock_period(),
            timescale: default_timescale(),
            drive: DriveStyle::default(),
        }
    }
}

fn default_clock_period() -> u64 {
    10
}

fn default_timescale() -> String {
    "1ps/1ps".to_string()
}

/// How the clock and reset port names are joined to the module name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSuffix {
    /// `Top_clk`, `Top_reset`.
    #[default]
    Single,
    /// `Top__clk`, `Top__reset`, as emitted by older generators.
    Double,
}

impl PortSuffix {
    /// The separator text.
    pub fn separator(self) -> &'static str {
        match self {
            PortSuffix::Single => "_",
            PortSuffix::Double => "__",
        }
    }
}

/// Base case of the `log2` priority encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Log2Base {
    /// Falls back to 1 and tests bits 2 and up, so `log2(1) == 1`.
    #[default]
    One,
    /// Falls back to 0 and tests bits 1 and up, so `log2(1) == 0`.
    Zero,
}

impl Log2Base {
    /// The value produced when no tested bit is set.
    pub fn default_value(self) -> u32 {
        match self {
            Log2Base::One => 1,
            Log2Base::Zero => 0,
        }
    }

    /// The lowest bit index that gets its own conditional tier.
    pub fn first_bit(self) -> u32 {
        match self {
            Log2Base::One => 2,
            Log2Base::Zero => 1,
        }
    }
}

/// Assignment operator used in the testbench's stimulus block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveStyle {
    /// `a <= 4'd3;`
    #[default]
    Nonblocking,
    /// `a = 4'd3;`, as emitted by older generators.
    Blocking,
}

impl DriveStyle {
    /// The assignment operator text.
    pub fn operator(self) -> &'static str {
        match self {
            DriveStyle::Nonblocking => "<=",
            DriveStyle::Blocking => "=",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_defaults() {
        let config = Flo2vConfig::default();
        assert_eq!(config.module.port_suffix.separator(), "_");
        assert_eq!(config.module.log2_base, Log2Base::One);
        assert_eq!(config.testbench.clock_period, 10);
        assert_eq!(config.testbench.timescale, "1ps/1ps");
        assert_eq!(config.testbench.drive.operator(), "<=");
    }

    #[test]
    fn log2_conventions() {
        assert_eq!(Log2Base::One.default_value(), 1);
        assert_eq!(Log2Base::One.first_bit(), 2);
        assert_eq!(Log2Base::Zero.default_value(), 0);
        assert_eq!(Log2Base::Zero.first_bit(), 1);
    }
}
