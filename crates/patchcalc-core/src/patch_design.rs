//! # Microstrip Patch Designer
//!
//! Closed-form design of a rectangular microstrip patch antenna from a
//! [`DesignSpec`]. The calculation runs in stages: substrate height
//! resolution (optional synthesis from frequency and permittivity), base
//! microstrip geometry (patch width, effective permittivity, effective
//! length, Hammerstad-Jensen fringing extension, ground-plane margins), and
//! a feed-specific stage selected by the topology:
//!
//! - **Inset-fed**: inset notch depth, feed-line width, input resistance,
//!   matched impedance, return loss and VSWR at the feed port
//! - **Coaxial probe**: feed point offsets from the patch corner
//! - **Circularly polarized**: quality factor and corner truncation size
//!
//! Each stage maps its numeric hazards (negative-domain roots, log of zero,
//! near-zero denominators, non-finite intermediates) onto
//! [`ComputationError`], so a caller either receives a complete
//! [`PatchDesign`] or a single descriptive error.
//!
//! ## Example
//!
//! ```
//! use patchcalc_core::patch_design::{FeedDesign, PatchDesigner};
//! use patchcalc_core::types::DesignSpec;
//!
//! // 2.4 GHz inset-fed patch on 1.6 mm FR-4
//! let design = PatchDesigner::new(DesignSpec::default()).design().unwrap();
//!
//! assert!(design.patch_width_mm > design.patch_length_mm);
//! match design.feed {
//!     FeedDesign::InsetFed(inset) => assert!(inset.vswr > 1.0),
//!     _ => unreachable!("default spec is inset-fed"),
//! }
//! ```

use crate::types::{ComputationError, DesignResult, DesignSpec, FeedTopology};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// Speed of light in mm/s, matching the millimetre unit system of the inputs
pub const C_MM_PER_S: f64 = 299_792_458_000.0;

/// Denominators smaller than this are treated as division by zero
const NEAR_ZERO: f64 = 1e-12;

// ── Checked arithmetic helpers ───────────────────────────────────────────────

/// Square root with a domain guard.
fn checked_sqrt(value: f64, context: &'static str) -> DesignResult<f64> {
    if value <= 0.0 {
        return Err(ComputationError::SqrtDomain { context, value });
    }
    Ok(value.sqrt())
}

/// Base-10 logarithm with a domain guard.
fn checked_log10(value: f64, context: &'static str) -> DesignResult<f64> {
    if value <= 0.0 {
        return Err(ComputationError::LogDomain { context, value });
    }
    Ok(value.log10())
}

/// Division with a near-zero denominator guard.
fn checked_div(num: f64, den: f64, context: &'static str) -> DesignResult<f64> {
    if den.abs() < NEAR_ZERO {
        return Err(ComputationError::NearZeroDenominator {
            context,
            value: den,
        });
    }
    Ok(num / den)
}

// ── Output types ─────────────────────────────────────────────────────────────

/// Inset-fed feed synthesis and matching analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsetFeed {
    /// Inset notch depth Fi in mm
    pub inset_depth_mm: f64,
    /// Feed line width Wf in mm
    pub line_width_mm: f64,
    /// Edge input resistance Rin in ohms
    pub input_resistance_ohms: f64,
    /// Input impedance Zin seen at the inset point in ohms
    pub matched_impedance_ohms: f64,
    /// Return loss S11 in dB
    pub return_loss_db: f64,
    /// Voltage standing wave ratio at the feed port
    pub vswr: f64,
}

/// Coaxial probe feed point location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeFeed {
    /// Probe offset Xf along the resonant length in mm
    pub offset_x_mm: f64,
    /// Probe offset Yf along the width in mm
    pub offset_y_mm: f64,
}

/// Corner truncation sizing for circular polarization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerTruncation {
    /// Corner truncation size a in mm
    pub truncation_mm: f64,
    /// Unloaded quality factor Q of the patch
    pub quality_factor: f64,
}

/// Feed-specific design output, one variant per topology
///
/// Carrying the topology as a sum type means a design can never hold fields
/// from a feed it was not computed for; consumers dispatch with `match`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topology", rename_all = "kebab-case")]
pub enum FeedDesign {
    InsetFed(InsetFeed),
    CoaxialProbe(ProbeFeed),
    CircularlyPolarized(CornerTruncation),
}

impl FeedDesign {
    /// The topology this feed design was computed for
    pub fn topology(&self) -> FeedTopology {
        match self {
            FeedDesign::InsetFed(_) => FeedTopology::InsetFed,
            FeedDesign::CoaxialProbe(_) => FeedTopology::CoaxialProbe,
            FeedDesign::CircularlyPolarized(_) => FeedTopology::CircularlyPolarized,
        }
    }
}

/// Complete design output
///
/// `spec` echoes the inputs the calculation actually used; with auto-height
/// the synthesized substrate height appears here, not the operator-supplied
/// one. All dimensions are in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchDesign {
    /// Inputs as resolved by the designer
    pub spec: DesignSpec,
    /// Patch width W
    pub patch_width_mm: f64,
    /// Patch resonant length L
    pub patch_length_mm: f64,
    /// Ground plane width Wg
    pub ground_width_mm: f64,
    /// Ground plane length Lg
    pub ground_length_mm: f64,
    /// Hammerstad-Jensen fringing length extension ΔL
    pub fringing_extension_mm: f64,
    /// Effective permittivity εreff of the mixed air/substrate region
    pub effective_permittivity: f64,
    /// Electrical (effective) length Leff
    pub effective_length_mm: f64,
    /// Feed-specific outputs
    pub feed: FeedDesign,
}

impl PatchDesign {
    /// Verify that every output quantity is finite.
    fn ensure_finite(&self) -> DesignResult<()> {
        let mut fields = vec![
            ("substrate height h", self.spec.substrate_height_mm),
            ("patch width W", self.patch_width_mm),
            ("patch length L", self.patch_length_mm),
            ("ground width Wg", self.ground_width_mm),
            ("ground length Lg", self.ground_length_mm),
            ("fringing extension dL", self.fringing_extension_mm),
            ("effective permittivity", self.effective_permittivity),
            ("effective length Leff", self.effective_length_mm),
        ];
        match self.feed {
            FeedDesign::InsetFed(inset) => {
                fields.push(("inset depth Fi", inset.inset_depth_mm));
                fields.push(("feed line width Wf", inset.line_width_mm));
                fields.push(("input resistance Rin", inset.input_resistance_ohms));
                fields.push(("matched impedance Zin", inset.matched_impedance_ohms));
                fields.push(("return loss S11", inset.return_loss_db));
                fields.push(("VSWR", inset.vswr));
            }
            FeedDesign::CoaxialProbe(probe) => {
                fields.push(("feed offset Xf", probe.offset_x_mm));
                fields.push(("feed offset Yf", probe.offset_y_mm));
            }
            FeedDesign::CircularlyPolarized(cp) => {
                fields.push(("corner truncation a", cp.truncation_mm));
                fields.push(("quality factor Q", cp.quality_factor));
            }
        }
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ComputationError::NonFinite(name));
            }
        }
        Ok(())
    }
}

impl fmt::Display for PatchDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.spec;
        writeln!(f, "Microstrip patch design ({})", s.topology)?;
        writeln!(f, "  Frequency            : {:.4} GHz", s.frequency_ghz)?;
        writeln!(f, "  Dielectric constant  : {:.4}", s.dielectric_constant)?;
        writeln!(f, "  Conductor thickness  : {:.4} mm", s.conductor_thickness_mm)?;
        writeln!(f, "  Substrate height     : {:.4} mm", s.substrate_height_mm)?;
        writeln!(f, "  Patch width (W)      : {:.4} mm", self.patch_width_mm)?;
        writeln!(f, "  Patch length (L)     : {:.4} mm", self.patch_length_mm)?;
        writeln!(f, "  Ground plane         : {:.4} x {:.4} mm", self.ground_width_mm, self.ground_length_mm)?;
        writeln!(f, "  Effective permittivity: {:.4}", self.effective_permittivity)?;
        writeln!(f, "  Effective length     : {:.4} mm", self.effective_length_mm)?;
        writeln!(f, "  Fringing extension   : {:.4} mm", self.fringing_extension_mm)?;
        match self.feed {
            FeedDesign::InsetFed(inset) => {
                writeln!(f, "  Inset depth (Fi)     : {:.4} mm", inset.inset_depth_mm)?;
                writeln!(f, "  Feed line width (Wf) : {:.4} mm", inset.line_width_mm)?;
                writeln!(f, "  Input resistance     : {:.4} ohm", inset.input_resistance_ohms)?;
                writeln!(f, "  Input impedance (Zin): {:.4} ohm", inset.matched_impedance_ohms)?;
                writeln!(f, "  Return loss (S11)    : {:.4} dB", inset.return_loss_db)?;
                writeln!(f, "  VSWR                 : {:.4}", inset.vswr)?;
                if inset.vswr < 2.0 {
                    writeln!(f, "  Matching             : good (VSWR < 2)")?;
                } else {
                    writeln!(f, "  Matching             : poor (VSWR >= 2)")?;
                }
            }
            FeedDesign::CoaxialProbe(probe) => {
                writeln!(f, "  Feed point Xf        : {:.4} mm", probe.offset_x_mm)?;
                writeln!(f, "  Feed point Yf        : {:.4} mm", probe.offset_y_mm)?;
            }
            FeedDesign::CircularlyPolarized(cp) => {
                writeln!(f, "  Corner truncation (a): {:.4} mm", cp.truncation_mm)?;
                writeln!(f, "  Quality factor (Q)   : {:.4}", cp.quality_factor)?;
            }
        }
        Ok(())
    }
}

// ── Designer ─────────────────────────────────────────────────────────────────

/// Closed-form microstrip patch designer.
///
/// Create with [`PatchDesigner::new`], then call
/// [`design()`](PatchDesigner::design). The designer holds no state beyond
/// the spec; every call is a pure function of its inputs, so instances can
/// be shared or rebuilt freely.
#[derive(Debug, Clone)]
pub struct PatchDesigner {
    spec: DesignSpec,
}

impl PatchDesigner {
    /// Create a designer for the given spec.
    pub fn new(spec: DesignSpec) -> Self {
        Self { spec }
    }

    /// Run the full design calculation.
    ///
    /// Returns a complete [`PatchDesign`] or the first
    /// [`ComputationError`] encountered; no partially populated output is
    /// ever returned.
    pub fn design(&self) -> DesignResult<PatchDesign> {
        self.spec.validate()?;

        let mut spec = self.spec;
        let f_hz = spec.frequency_ghz * 1e9;
        let er = spec.dielectric_constant;

        // Substrate height resolution. 0.3c/(2π f √εr) keeps h a small
        // fraction of the guided wavelength.
        if spec.auto_height {
            let root_er = checked_sqrt(er, "substrate height synthesis sqrt(er)")?;
            spec.substrate_height_mm = checked_div(
                0.3 * C_MM_PER_S,
                2.0 * PI * f_hz * root_er,
                "substrate height synthesis",
            )?;
            debug!(
                "auto height: h = {:.4} mm at {} GHz",
                spec.substrate_height_mm, spec.frequency_ghz
            );
        }
        let h = spec.substrate_height_mm;

        // Base microstrip geometry, common to every topology.
        let root_half_er = checked_sqrt((er + 1.0) / 2.0, "patch width sqrt((er+1)/2)")?;
        let w = checked_div(C_MM_PER_S, 2.0 * f_hz * root_half_er, "patch width W")?;
        let h_over_w = checked_div(h, w, "h/W ratio")?;
        let ereff = (er + 1.0) / 2.0
            + (er - 1.0) / 2.0
                * checked_div(
                    1.0,
                    checked_sqrt(1.0 + 12.0 * h_over_w, "effective permittivity root")?,
                    "effective permittivity",
                )?;
        let root_ereff = checked_sqrt(ereff, "sqrt(ereff)")?;
        let leff = checked_div(C_MM_PER_S, 2.0 * f_hz * root_ereff, "effective length Leff")?;

        // Hammerstad-Jensen fringing extension. The denominator vanishes at
        // ereff = 0.258 or W/h = 0.8.
        let w_over_h = checked_div(w, h, "W/h ratio")?;
        let dl = 0.412
            * h
            * checked_div(
                (ereff + 0.3) * (w_over_h + 0.264),
                (ereff - 0.258) * (w_over_h - 0.8),
                "fringing extension denominator",
            )?;
        let l = leff - 2.0 * dl;
        let lg = l + 6.0 * h;
        let wg = w + 6.0 * h;

        debug!(
            "base geometry: W = {:.4} mm, L = {:.4} mm, ereff = {:.4}",
            w, l, ereff
        );

        let feed = match spec.topology {
            FeedTopology::InsetFed => FeedDesign::InsetFed(Self::inset_feed(&spec, w, l)?),
            FeedTopology::CoaxialProbe => FeedDesign::CoaxialProbe(ProbeFeed {
                offset_x_mm: l / (2.0 * root_ereff),
                offset_y_mm: w / (3.0 * root_ereff),
            }),
            FeedTopology::CircularlyPolarized => {
                let q = checked_div(C_MM_PER_S * root_ereff, 4.0 * f_hz * h, "quality factor Q")?;
                let a = l * checked_sqrt(1.0 / (2.0 * q), "corner truncation sqrt(1/2Q)")?;
                FeedDesign::CircularlyPolarized(CornerTruncation {
                    truncation_mm: a,
                    quality_factor: q,
                })
            }
        };

        let design = PatchDesign {
            spec,
            patch_width_mm: w,
            patch_length_mm: l,
            ground_width_mm: wg,
            ground_length_mm: lg,
            fringing_extension_mm: dl,
            effective_permittivity: ereff,
            effective_length_mm: leff,
            feed,
        };
        design.ensure_finite()?;
        Ok(design)
    }

    /// Inset feed synthesis and matching analysis.
    ///
    /// `spec` is the resolved record, so `substrate_height_mm` is already the
    /// synthesized value when auto-height was requested.
    fn inset_feed(spec: &DesignSpec, w: f64, l: f64) -> DesignResult<InsetFeed> {
        let er = spec.dielectric_constant;
        let h = spec.substrate_height_mm;
        let zo = spec.feed_impedance_ohms;
        let t = spec.conductor_thickness_mm;

        // Empirical inset-depth correction polynomial in εr.
        let poly = 0.001699 * er.powi(7) + 0.13761 * er.powi(6) - 6.1783 * er.powi(5)
            + 93.187 * er.powi(4)
            - 682.69 * er.powi(3)
            + 2561.9 * er.powi(2)
            - 4043.0 * er
            + 6697.0;
        let fi = 1e-4 * poly * (l / 2.0) * 0.83477;

        // Microstrip line width for the target impedance, inverted from the
        // classical synthesis formula. The exponent base is Euler's number,
        // not the permittivity.
        let exponent = (zo * checked_sqrt(er + 1.41, "feed width sqrt(er+1.41)")? / 87.0).exp();
        let wf = checked_div(7.48 * h, exponent, "feed line width Wf")? - 1.25 * t;

        let rin = checked_div(w * w, 1.5 * er, "input resistance Rin")?;
        let zin = checked_div(
            zo,
            1.0 + checked_div(zo, rin, "Zo/Rin ratio")?,
            "matched impedance Zin",
        )?;

        // Reflection coefficient at the feed port. Γ = 0 is a perfect-match
        // degeneracy (log of zero); |Γ| = 1 is total mismatch (VSWR pole).
        let gamma = checked_div(zin - zo, zin + zo, "reflection coefficient")?;
        let s11 = 20.0 * checked_log10(gamma.abs(), "return loss |gamma|")?;
        let vswr = checked_div(1.0 + gamma.abs(), 1.0 - gamma.abs(), "VSWR")?;

        Ok(InsetFeed {
            inset_depth_mm: fi,
            line_width_mm: wf,
            input_resistance_ohms: rin,
            matched_impedance_ohms: zin,
            return_loss_db: s11,
            vswr,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
