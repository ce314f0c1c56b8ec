//! Input records and error types for patch antenna design
//!
//! This module defines [`DesignSpec`], the immutable per-call input record,
//! the [`FeedTopology`] selector, and the [`ComputationError`] type that every
//! numeric fault in the calculation pipeline surfaces as.
//!
//! ## Example
//!
//! ```
//! use patchcalc_core::types::{DesignSpec, FeedTopology};
//!
//! let spec = DesignSpec::builder()
//!     .frequency_ghz(5.8)
//!     .dielectric_constant(2.2)
//!     .substrate_height_mm(0.787)
//!     .topology(FeedTopology::CoaxialProbe)
//!     .build();
//!
//! assert!(spec.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for design calculations
pub type DesignResult<T> = Result<T, ComputationError>;

/// Errors that can occur during a design calculation
///
/// Every stage of the pipeline maps its numeric hazards onto this single
/// type, so callers never see a raw arithmetic fault.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputationError {
    /// Input record failed validation before any arithmetic ran
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Square root of a non-positive operand
    #[error("square root of non-positive value in {context}: {value}")]
    SqrtDomain { context: &'static str, value: f64 },

    /// Logarithm of a non-positive operand
    #[error("logarithm of non-positive value in {context}: {value}")]
    LogDomain { context: &'static str, value: f64 },

    /// Division by a zero or near-zero denominator
    #[error("near-zero denominator in {context}: {value:e}")]
    NearZeroDenominator { context: &'static str, value: f64 },

    /// A computed quantity came out NaN or infinite
    #[error("non-finite result for {0}")]
    NonFinite(&'static str),
}

/// Antenna feed/shape variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedTopology {
    /// Microstrip line penetrating a rectangular notch into the patch
    InsetFed,
    /// Coaxial probe through the ground plane and substrate
    CoaxialProbe,
    /// Corner-truncated patch generating circular polarization
    CircularlyPolarized,
}

impl fmt::Display for FeedTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedTopology::InsetFed => write!(f, "inset-fed"),
            FeedTopology::CoaxialProbe => write!(f, "coaxial probe"),
            FeedTopology::CircularlyPolarized => write!(f, "circularly polarized"),
        }
    }
}

impl Default for FeedTopology {
    fn default() -> Self {
        FeedTopology::InsetFed
    }
}

/// Operator-supplied design inputs
///
/// Dimensions are in millimetres, the frequency in GHz, and the feed
/// impedance in ohms. When `auto_height` is set the supplied
/// `substrate_height_mm` is ignored and the designer synthesizes a height
/// from the frequency and permittivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSpec {
    /// Operating frequency f in GHz
    pub frequency_ghz: f64,
    /// Relative permittivity εr of the substrate
    pub dielectric_constant: f64,
    /// Conductor thickness t in mm
    pub conductor_thickness_mm: f64,
    /// Substrate height h in mm
    pub substrate_height_mm: f64,
    /// Target feed impedance Zo in ohms
    pub feed_impedance_ohms: f64,
    /// Feed/shape variant to design for
    pub topology: FeedTopology,
    /// Recompute the substrate height from f and εr
    pub auto_height: bool,
}

impl Default for DesignSpec {
    /// A 2.4 GHz inset-fed patch on 1.6 mm FR-4 with 35 µm copper, fed at 50 Ω.
    fn default() -> Self {
        Self {
            frequency_ghz: 2.4,
            dielectric_constant: 4.4,
            conductor_thickness_mm: 0.035,
            substrate_height_mm: 1.6,
            feed_impedance_ohms: 50.0,
            topology: FeedTopology::InsetFed,
            auto_height: false,
        }
    }
}

impl DesignSpec {
    /// Create a new builder seeded with the default FR-4 spec
    pub fn builder() -> DesignSpecBuilder {
        DesignSpecBuilder::default()
    }

    /// Check the record against the documented input ranges.
    ///
    /// The substrate height is not checked when `auto_height` is set, since
    /// the designer replaces it before any formula reads it.
    pub fn validate(&self) -> DesignResult<()> {
        if !self.frequency_ghz.is_finite() || self.frequency_ghz <= 0.0 {
            return Err(ComputationError::InvalidInput(format!(
                "frequency must be a positive number of GHz, got {}",
                self.frequency_ghz
            )));
        }
        if !self.dielectric_constant.is_finite() || self.dielectric_constant < 1.0 {
            return Err(ComputationError::InvalidInput(format!(
                "dielectric constant must be >= 1, got {}",
                self.dielectric_constant
            )));
        }
        if !self.conductor_thickness_mm.is_finite() || self.conductor_thickness_mm < 0.0 {
            return Err(ComputationError::InvalidInput(format!(
                "conductor thickness must be >= 0 mm, got {}",
                self.conductor_thickness_mm
            )));
        }
        if !self.auto_height
            && (!self.substrate_height_mm.is_finite() || self.substrate_height_mm <= 0.0)
        {
            return Err(ComputationError::InvalidInput(format!(
                "substrate height must be a positive number of mm, got {}",
                self.substrate_height_mm
            )));
        }
        if !self.feed_impedance_ohms.is_finite() || self.feed_impedance_ohms <= 0.0 {
            return Err(ComputationError::InvalidInput(format!(
                "feed impedance must be a positive number of ohms, got {}",
                self.feed_impedance_ohms
            )));
        }
        Ok(())
    }
}

/// Builder for [`DesignSpec`]
#[derive(Debug, Default)]
pub struct DesignSpecBuilder {
    spec: DesignSpec,
}

impl DesignSpecBuilder {
    pub fn frequency_ghz(mut self, f: f64) -> Self {
        self.spec.frequency_ghz = f;
        self
    }

    pub fn dielectric_constant(mut self, er: f64) -> Self {
        self.spec.dielectric_constant = er;
        self
    }

    pub fn conductor_thickness_mm(mut self, t: f64) -> Self {
        self.spec.conductor_thickness_mm = t;
        self
    }

    pub fn substrate_height_mm(mut self, h: f64) -> Self {
        self.spec.substrate_height_mm = h;
        self
    }

    pub fn feed_impedance_ohms(mut self, zo: f64) -> Self {
        self.spec.feed_impedance_ohms = zo;
        self
    }

    pub fn topology(mut self, topology: FeedTopology) -> Self {
        self.spec.topology = topology;
        self
    }

    pub fn auto_height(mut self, enabled: bool) -> Self {
        self.spec.auto_height = enabled;
        self
    }

    pub fn build(self) -> DesignSpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_valid() {
        let spec = DesignSpec::default();
        assert!(spec.validate().is_ok());
        assert!((spec.frequency_ghz - 2.4).abs() < 1e-12);
        assert!((spec.dielectric_constant - 4.4).abs() < 1e-12);
        assert!((spec.substrate_height_mm - 1.6).abs() < 1e-12);
        assert_eq!(spec.topology, FeedTopology::InsetFed);
        assert!(!spec.auto_height);
    }

    #[test]
    fn builder_overrides_defaults() {
        let spec = DesignSpec::builder()
            .frequency_ghz(5.8)
            .dielectric_constant(2.2)
            .conductor_thickness_mm(0.017)
            .substrate_height_mm(0.787)
            .feed_impedance_ohms(75.0)
            .topology(FeedTopology::CircularlyPolarized)
            .auto_height(true)
            .build();
        assert!((spec.frequency_ghz - 5.8).abs() < 1e-12);
        assert!((spec.dielectric_constant - 2.2).abs() < 1e-12);
        assert!((spec.conductor_thickness_mm - 0.017).abs() < 1e-12);
        assert!((spec.substrate_height_mm - 0.787).abs() < 1e-12);
        assert!((spec.feed_impedance_ohms - 75.0).abs() < 1e-12);
        assert_eq!(spec.topology, FeedTopology::CircularlyPolarized);
        assert!(spec.auto_height);
    }

    #[test]
    fn validate_rejects_non_positive_frequency() {
        let spec = DesignSpec {
            frequency_ghz: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(ComputationError::InvalidInput(_))
        ));
        let spec = DesignSpec {
            frequency_ghz: -1.0,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn validate_rejects_permittivity_below_one() {
        let spec = DesignSpec {
            dielectric_constant: 0.9,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_thickness() {
        let spec = DesignSpec {
            conductor_thickness_mm: -0.01,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_height_unless_auto() {
        let spec = DesignSpec {
            substrate_height_mm: 0.0,
            ..Default::default()
        };
        assert!(spec.validate().is_err());

        // With auto-height the supplied height is never read.
        let spec = DesignSpec {
            substrate_height_mm: 0.0,
            auto_height: true,
            ..Default::default()
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_impedance() {
        let spec = DesignSpec {
            feed_impedance_ohms: 0.0,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_fields() {
        let spec = DesignSpec {
            frequency_ghz: f64::NAN,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
        let spec = DesignSpec {
            dielectric_constant: f64::INFINITY,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn topology_display_names() {
        assert_eq!(FeedTopology::InsetFed.to_string(), "inset-fed");
        assert_eq!(FeedTopology::CoaxialProbe.to_string(), "coaxial probe");
        assert_eq!(
            FeedTopology::CircularlyPolarized.to_string(),
            "circularly polarized"
        );
    }

    #[test]
    fn spec_serde_round_trip() {
        let spec = DesignSpec::builder()
            .frequency_ghz(3.5)
            .topology(FeedTopology::CoaxialProbe)
            .build();
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"coaxial-probe\""));
        let back: DesignSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn error_messages_name_the_fault() {
        let err = ComputationError::SqrtDomain {
            context: "effective permittivity",
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("square root"), "message: {msg}");
        assert!(msg.contains("effective permittivity"), "message: {msg}");
    }
}
