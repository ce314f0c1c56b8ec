//! # Patchcalc Core
//!
//! Closed-form design calculations for rectangular microstrip patch
//! antennas. From a small operator-supplied input record (operating
//! frequency, substrate permittivity, conductor and substrate heights,
//! target feed impedance, feed topology) the crate derives:
//!
//! - **Patch geometry**: width, resonant length, ground-plane size,
//!   effective permittivity and the Hammerstad-Jensen fringing extension
//! - **Feed design**: inset-notch synthesis with matching analysis
//!   (S11, VSWR), coaxial probe placement, or corner-truncation sizing for
//!   circular polarization, selected by the topology
//! - **Preview geometry**: the polygon outlines a rendering front end needs
//!   to draw the inset-fed structure schematically
//!
//! The crate is purely computational: no simulation, no optimization, no
//! I/O. Every call is a synchronous, pure function of its inputs, so the
//! types can be used from any thread without locking.
//!
//! ## Example
//!
//! ```
//! use patchcalc_core::{DesignSpec, FeedTopology, PatchDesigner};
//!
//! // 2.4 GHz patch on 1.6 mm FR-4, inset-fed at 50 ohms
//! let spec = DesignSpec::builder()
//!     .frequency_ghz(2.4)
//!     .dielectric_constant(4.4)
//!     .substrate_height_mm(1.6)
//!     .feed_impedance_ohms(50.0)
//!     .topology(FeedTopology::InsetFed)
//!     .build();
//!
//! let design = PatchDesigner::new(spec).design().expect("valid design");
//! assert!(design.patch_width_mm > 0.0);
//!
//! let outline = design.outline().expect("inset-fed designs have outlines");
//! assert_eq!(outline.patch.len(), 12);
//! ```

pub mod patch_design;
pub mod structure_outline;
pub mod types;

pub use patch_design::{
    CornerTruncation, FeedDesign, InsetFeed, PatchDesign, PatchDesigner, ProbeFeed,
};
pub use structure_outline::StructureOutline;
pub use types::{ComputationError, DesignResult, DesignSpec, DesignSpecBuilder, FeedTopology};
