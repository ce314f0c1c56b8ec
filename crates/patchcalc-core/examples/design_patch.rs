//! Design a 2.4 GHz inset-fed patch on FR-4 and dump the preview geometry
//!
//! Run with: cargo run --example design_patch -p patchcalc-core

use patchcalc_core::{DesignSpec, FeedTopology, PatchDesigner};

fn main() {
    let spec = DesignSpec::builder()
        .frequency_ghz(2.4)
        .dielectric_constant(4.4)
        .conductor_thickness_mm(0.035)
        .substrate_height_mm(1.6)
        .feed_impedance_ohms(50.0)
        .topology(FeedTopology::InsetFed)
        .build();

    let design = match PatchDesigner::new(spec).design() {
        Ok(design) => design,
        Err(err) => {
            eprintln!("design failed: {err}");
            std::process::exit(1);
        }
    };

    print!("{design}");

    let outline = design.outline().expect("inset-fed designs have an outline");
    let ((min_x, min_y), (max_x, max_y)) = outline.bounds();
    println!("\nPreview geometry ({min_x:.1},{min_y:.1}) .. ({max_x:.1},{max_y:.1}) mm");
    println!("  patch outline:");
    for (label, (x, y)) in ('A'..='L').zip(outline.patch.iter()) {
        println!("    {label}: ({x:8.3}, {y:8.3})");
    }

    // The other topologies share the same base geometry.
    for topology in [FeedTopology::CoaxialProbe, FeedTopology::CircularlyPolarized] {
        let spec = DesignSpec { topology, ..spec };
        match PatchDesigner::new(spec).design() {
            Ok(design) => print!("\n{design}"),
            Err(err) => eprintln!("{topology} design failed: {err}"),
        }
    }
}
