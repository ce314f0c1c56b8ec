//! # Structure Outline
//!
//! Polygon geometry for the schematic preview of an inset-fed patch. From
//! the patch dimensions and feed fields this module builds three ordered
//! coordinate lists, all in millimetres with the ground-plane corner at the
//! origin:
//!
//! - the closed ground-plane rectangle (5 points, first repeated last)
//! - the patch outline (12 points tracing the inset notch and feed line)
//! - the fringing-extended outline (same traversal, outer edges pushed out
//!   by the fringing extension)
//!
//! The lists are only consumed by a rendering collaborator; nothing further
//! is computed from them.
//!
//! ## Example
//!
//! ```
//! use patchcalc_core::patch_design::PatchDesigner;
//! use patchcalc_core::types::DesignSpec;
//!
//! let design = PatchDesigner::new(DesignSpec::default()).design().unwrap();
//! let outline = design.outline().expect("inset-fed designs have an outline");
//!
//! assert_eq!(outline.ground.len(), 5);
//! assert_eq!(outline.patch.len(), 12);
//! assert_eq!(outline.fringing.len(), 12);
//! ```

use crate::patch_design::{FeedDesign, PatchDesign};
use serde::{Deserialize, Serialize};

/// Schematic preview geometry for an inset-fed patch
///
/// Recomputed in full on every build; never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureOutline {
    /// Ground-plane rectangle, closed (first vertex repeated last)
    pub ground: Vec<(f64, f64)>,
    /// Patch outline with the inset notch and feed line, open
    pub patch: Vec<(f64, f64)>,
    /// Patch outline with the fringing-field halo, same vertex order
    pub fringing: Vec<(f64, f64)>,
}

impl StructureOutline {
    /// Build the preview geometry from inset-fed design fields.
    ///
    /// Arguments are the inset notch depth Fi, feed line width Wf, patch
    /// width W and length L, ground length Lg and width Wg, and the fringing
    /// extension dl. The patch outline runs counter-clockwise from the
    /// lower-left corner: along the bottom edge to the notch, up and across
    /// the notch floor, down the feed line to the ground baseline, back up
    /// the far notch wall, on to the lower-right corner, then around the top.
    pub fn build(
        inset_depth: f64,
        line_width: f64,
        patch_width: f64,
        patch_length: f64,
        ground_length: f64,
        ground_width: f64,
        fringing_ext: f64,
    ) -> Self {
        let (fi, wf, w, l) = (inset_depth, line_width, patch_width, patch_length);
        let (lg, wg, dl) = (ground_length, ground_width, fringing_ext);

        let ground = vec![(0.0, 0.0), (wg, 0.0), (wg, lg), (0.0, lg), (0.0, 0.0)];

        // Twelve vertices A..L. A/J and L/K are the patch corners; B..I trace
        // the notch walls and the feed line down to the y = 0 baseline.
        let ax = (wg - w) / 2.0;
        let ay = (lg - l) / 2.0;
        let bx = (wg - 2.0 * fi - wf) / 2.0;
        let cy = ay + fi;
        let dx = (wg - wf) / 2.0;
        let fx = (wg + wf) / 2.0;
        let hx = fx + fi;
        let jx = (wg + w) / 2.0;
        let ky = (lg + l) / 2.0;

        let patch = vec![
            (ax, ay), // A: lower-left corner
            (bx, ay), // B: notch left wall, bottom
            (bx, cy), // C: notch left wall, top
            (dx, cy), // D: feed line left edge at notch floor
            (dx, 0.0), // E: feed line left edge at baseline
            (fx, 0.0), // F: feed line right edge at baseline
            (fx, cy), // G: feed line right edge at notch floor
            (hx, cy), // H: notch right wall, top
            (hx, ay), // I: notch right wall, bottom
            (jx, ay), // J: lower-right corner
            (jx, ky), // K: upper-right corner
            (ax, ky), // L: upper-left corner
        ];

        // Same x-coordinates; the lower-region vertices move down by dl and
        // the top corners up by dl. E and F stay on the baseline since
        // fringing does not extend into the feed gap.
        let fringing = vec![
            (ax, ay - dl),
            (bx, ay - dl),
            (bx, cy - dl),
            (dx, cy - dl),
            (dx, 0.0),
            (fx, 0.0),
            (fx, cy - dl),
            (hx, cy - dl),
            (hx, ay - dl),
            (jx, ay - dl),
            (jx, ky + dl),
            (ax, ky + dl),
        ];

        StructureOutline {
            ground,
            patch,
            fringing,
        }
    }

    /// Enclosing extents over all three coordinate lists, as
    /// `((min_x, min_y), (max_x, max_y))`. Useful for sizing plot axes.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in self
            .ground
            .iter()
            .chain(self.patch.iter())
            .chain(self.fringing.iter())
        {
            min.0 = min.0.min(x);
            min.1 = min.1.min(y);
            max.0 = max.0.max(x);
            max.1 = max.1.max(y);
        }
        (min, max)
    }
}

impl PatchDesign {
    /// Preview geometry for this design.
    ///
    /// Only the inset-fed topology has a defined outline; the other feed
    /// variants return `None` rather than geometry built from fields they
    /// do not carry.
    pub fn outline(&self) -> Option<StructureOutline> {
        match self.feed {
            FeedDesign::InsetFed(inset) => Some(StructureOutline::build(
                inset.inset_depth_mm,
                inset.line_width_mm,
                self.patch_width_mm,
                self.patch_length_mm,
                self.ground_length_mm,
                self.ground_width_mm,
                self.fringing_extension_mm,
            )),
            FeedDesign::CoaxialProbe(_) | FeedDesign::CircularlyPolarized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch_design::PatchDesigner;
    use crate::types::{DesignSpec, FeedTopology};

    fn fr4_outline() -> (PatchDesign, StructureOutline) {
        let design = PatchDesigner::new(DesignSpec::default())
            .design()
            .expect("default spec should design cleanly");
        let outline = design.outline().expect("inset-fed design has an outline");
        (design, outline)
    }

    #[test]
    fn ground_rectangle_is_closed() {
        let (design, outline) = fr4_outline();
        assert_eq!(outline.ground.len(), 5);
        assert_eq!(outline.ground[0], outline.ground[4]);
        assert_eq!(outline.ground[1], (design.ground_width_mm, 0.0));
        assert_eq!(
            outline.ground[2],
            (design.ground_width_mm, design.ground_length_mm)
        );
    }

    #[test]
    fn patch_outline_has_twelve_vertices() {
        let (_, outline) = fr4_outline();
        assert_eq!(outline.patch.len(), 12);
        assert_eq!(outline.fringing.len(), 12);
    }

    #[test]
    fn fringing_x_coordinates_match_patch_exactly() {
        let (_, outline) = fr4_outline();
        for (i, (p, f)) in outline.patch.iter().zip(outline.fringing.iter()).enumerate() {
            assert_eq!(p.0, f.0, "x mismatch at vertex {i}");
        }
    }

    #[test]
    fn baseline_vertices_are_not_shifted() {
        let (_, outline) = fr4_outline();
        // E and F sit on the ground baseline in both outlines.
        for idx in [4, 5] {
            assert_eq!(outline.patch[idx].1, 0.0, "patch vertex {idx}");
            assert_eq!(outline.fringing[idx].1, 0.0, "fringing vertex {idx}");
        }
    }

    #[test]
    fn fringing_shifts_outward_by_dl() {
        let (design, outline) = fr4_outline();
        let dl = design.fringing_extension_mm;
        assert!(dl > 0.0);
        // Lower-region vertices move down, top corners move up.
        for idx in [0, 1, 2, 3, 6, 7, 8, 9] {
            assert!(
                (outline.fringing[idx].1 - (outline.patch[idx].1 - dl)).abs() < 1e-12,
                "vertex {idx} not shifted down by dl"
            );
        }
        for idx in [10, 11] {
            assert!(
                (outline.fringing[idx].1 - (outline.patch[idx].1 + dl)).abs() < 1e-12,
                "vertex {idx} not shifted up by dl"
            );
        }
    }

    #[test]
    fn patch_is_centered_on_the_ground_plane() {
        let (design, outline) = fr4_outline();
        let (ax, ay) = outline.patch[0];
        assert!(
            ((design.ground_width_mm - design.patch_width_mm) / 2.0 - ax).abs() < 1e-12
        );
        assert!(
            ((design.ground_length_mm - design.patch_length_mm) / 2.0 - ay).abs() < 1e-12
        );
        // Right edge mirrors the left edge.
        let (jx, _) = outline.patch[9];
        assert!(
            (design.ground_width_mm - jx - ax).abs() < 1e-9,
            "patch not centered: ax = {ax}, jx = {jx}"
        );
    }

    #[test]
    fn notch_traversal_is_ordered_and_non_degenerate() {
        let (_, outline) = fr4_outline();
        let xs: Vec<f64> = outline.patch.iter().map(|p| p.0).collect();
        // A < B < D = E < F = G < H < J along the bottom edge.
        assert!(xs[0] < xs[1], "A.x < B.x");
        assert!(xs[1] < xs[3], "B.x < D.x");
        assert_eq!(xs[3], xs[4], "D.x == E.x");
        assert!(xs[4] < xs[5], "E.x < F.x");
        assert_eq!(xs[5], xs[6], "F.x == G.x");
        assert!(xs[6] < xs[7], "G.x < H.x");
        assert!(xs[8] < xs[9], "I.x < J.x");
        // Notch floor sits above the bottom edge by the inset depth.
        assert!(outline.patch[2].1 > outline.patch[1].1);
    }

    #[test]
    fn bounds_enclose_every_vertex() {
        let (design, outline) = fr4_outline();
        let ((min_x, min_y), (max_x, max_y)) = outline.bounds();
        assert_eq!(min_x, 0.0);
        assert_eq!(min_y, 0.0);
        assert_eq!(max_x, design.ground_width_mm);
        assert_eq!(max_y, design.ground_length_mm);
        for &(x, y) in outline
            .ground
            .iter()
            .chain(outline.patch.iter())
            .chain(outline.fringing.iter())
        {
            assert!(x >= min_x && x <= max_x);
            assert!(y >= min_y && y <= max_y);
        }
    }

    #[test]
    fn only_inset_fed_designs_have_an_outline() {
        for (topology, expect_outline) in [
            (FeedTopology::InsetFed, true),
            (FeedTopology::CoaxialProbe, false),
            (FeedTopology::CircularlyPolarized, false),
        ] {
            let spec = DesignSpec {
                topology,
                ..Default::default()
            };
            let design = PatchDesigner::new(spec).design().unwrap();
            assert_eq!(design.outline().is_some(), expect_outline, "{topology}");
        }
    }

    #[test]
    fn build_accepts_degenerate_but_finite_inputs() {
        // Zero inset depth and zero fringing still produce well-formed lists.
        let outline = StructureOutline::build(0.0, 2.0, 30.0, 25.0, 35.0, 40.0, 0.0);
        assert_eq!(outline.patch.len(), 12);
        assert_eq!(outline.patch, outline.fringing);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let (design, outline) = fr4_outline();
        let again = design.outline().unwrap();
        assert_eq!(outline, again);
    }

    #[test]
    fn outline_serde_round_trip() {
        let (_, outline) = fr4_outline();
        let json = serde_json::to_string(&outline).unwrap();
        let back: StructureOutline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outline);
    }
}
