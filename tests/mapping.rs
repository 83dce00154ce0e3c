#![allow(missing_docs)]
//! Host-level tests for mapping primitives.

use led_panel_kit::Error;
use led_panel_kit::led2d::layout::{LedLayout, PhysicalIndex};

fn index(value: usize) -> PhysicalIndex {
    PhysicalIndex::new(value).expect("nonzero index")
}

#[test]
fn linear_h_returns_expected() {
    let linear = LedLayout::linear_h(5).expect("valid layout");
    assert_eq!(
        linear.index_to_xy(),
        &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]
    );
}

#[test]
fn linear_v_returns_expected() {
    let linear = LedLayout::linear_v(5).expect("valid layout");
    assert_eq!(
        linear.index_to_xy(),
        &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]
    );
}

#[test]
fn serpentine_column_major_3x2_matches_expected() {
    let map = LedLayout::serpentine_column_major(3, 2).expect("valid layout");
    assert_eq!(
        map.index_to_xy(),
        &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)]
    );
}

#[test]
fn serpentine_row_major_3x2_matches_expected() {
    let map = LedLayout::serpentine_row_major(3, 2).expect("valid layout");
    assert_eq!(
        map.index_to_xy(),
        &[(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]
    );
}

#[test]
fn rotate_and_flip_small_grid() {
    let map = LedLayout::new(
        3,
        2,
        vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)],
    )
    .expect("valid layout");

    let rotated = map.rotate_cw();
    assert_eq!(
        rotated.index_to_xy(),
        &[(1, 0), (1, 1), (1, 2), (0, 0), (0, 1), (0, 2)]
    );

    let flipped = map.flip_h();
    assert_eq!(
        flipped.index_to_xy(),
        &[(2, 0), (1, 0), (0, 0), (2, 1), (1, 1), (0, 1)]
    );
}

#[test]
fn serpentine_transforms_match_expected() {
    let serpentine = LedLayout::serpentine_column_major(3, 2).expect("valid layout");

    assert_eq!(
        serpentine.rotate_cw().index_to_xy(),
        &[(1, 0), (0, 0), (0, 1), (1, 1), (1, 2), (0, 2)]
    );
    assert_eq!(
        serpentine.rotate_180().index_to_xy(),
        &[(2, 1), (2, 0), (1, 0), (1, 1), (0, 1), (0, 0)]
    );
    assert_eq!(
        serpentine.rotate_ccw().index_to_xy(),
        &[(0, 2), (1, 2), (1, 1), (0, 1), (0, 0), (1, 0)]
    );
    assert_eq!(
        serpentine.flip_h().index_to_xy(),
        &[(2, 0), (2, 1), (1, 1), (1, 0), (0, 0), (0, 1)]
    );
    assert_eq!(
        serpentine.flip_v().index_to_xy(),
        &[(0, 1), (0, 0), (1, 0), (1, 1), (2, 1), (2, 0)]
    );
}

#[test]
fn combine_horizontal_and_vertical() {
    let serpentine = LedLayout::serpentine_column_major(3, 2).expect("valid layout");

    let combined_h = serpentine.combine_h(&serpentine).expect("same heights");
    assert_eq!(
        combined_h.index_to_xy(),
        &[
            (0, 0),
            (0, 1),
            (1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (3, 0),
            (3, 1),
            (4, 1),
            (4, 0),
            (5, 0),
            (5, 1),
        ]
    );

    let combined_v = serpentine.combine_v(&serpentine).expect("same widths");
    assert_eq!(
        combined_v.index_to_xy(),
        &[
            (0, 0),
            (0, 1),
            (1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (0, 2),
            (0, 3),
            (1, 3),
            (1, 2),
            (2, 2),
            (2, 3),
        ]
    );
}

#[test]
fn combine_rejects_mismatched_edges() {
    let wide = LedLayout::serpentine_column_major(3, 2).expect("valid layout");
    let tall = LedLayout::serpentine_column_major(3, 4).expect("valid layout");

    assert!(matches!(
        wide.combine_h(&tall),
        Err(Error::CombineMismatch { left: 2, right: 4 })
    ));
    let narrow = LedLayout::serpentine_column_major(2, 2).expect("valid layout");
    assert!(matches!(
        wide.combine_v(&narrow),
        Err(Error::CombineMismatch { left: 3, right: 2 })
    ));
}

#[test]
fn new_rejects_duplicate_cell() {
    let result = LedLayout::new(3, 1, vec![(0, 0), (1, 0), (1, 0)]);
    assert!(matches!(result, Err(Error::LayoutDuplicate { x: 1, y: 0 })));
}

#[test]
fn new_rejects_out_of_bounds_column() {
    let result = LedLayout::new(3, 1, vec![(0, 0), (1, 0), (3, 0)]);
    assert!(matches!(
        result,
        Err(Error::LayoutOutOfBounds { x: 3, y: 0 })
    ));
}

#[test]
fn new_rejects_mismatched_dimensions() {
    let result = LedLayout::new(3, 2, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1)]);
    assert!(matches!(result, Err(Error::LayoutSize { len: 5, .. })));
}

#[test]
fn new_rejects_zero_dimensions() {
    assert!(matches!(
        LedLayout::new(0, 4, Vec::new()),
        Err(Error::LayoutSize { .. })
    ));
    assert!(matches!(
        LedLayout::stacked_serpentine(32, 8, 0),
        Err(Error::LayoutSize { .. })
    ));
}

// The reference rig: six 32x8 panels, 1536 LEDs, wired as one strip.
#[test]
fn stacked_serpentine_reference_rig_is_a_bijection() {
    let layout = LedLayout::stacked_serpentine(32, 8, 6).expect("valid layout");
    assert_eq!(layout.width(), 32);
    assert_eq!(layout.height(), 48);
    assert_eq!(layout.len(), 1536);

    // Every physical index maps to a unique in-rectangle cell, and the
    // inverse lookup round-trips.
    let mut seen = vec![false; layout.len()];
    for led in 1..=layout.len() {
        let physical = index(led);
        let (x, y) = layout.xy_at(physical).expect("index within strip");
        assert!(usize::from(x) < layout.width());
        assert!(usize::from(y) < layout.height());
        let cell = usize::from(y) * layout.width() + usize::from(x);
        assert!(!seen[cell], "cell ({x}, {y}) mapped twice");
        seen[cell] = true;
        assert_eq!(layout.index_of(x, y), Some(physical));
    }
    assert!(seen.iter().all(|&covered| covered));
}

#[test]
fn stacked_serpentine_reference_rig_endpoints() {
    let layout = LedLayout::stacked_serpentine(32, 8, 6).expect("valid layout");

    // First LED sits at the logical origin; the last lands in row 47.
    assert_eq!(layout.xy_at(index(1)), Some((0, 0)));
    assert_eq!(layout.xy_at(index(2)), Some((0, 1)));
    assert_eq!(layout.xy_at(index(1536)), Some((0, 47)));
    assert_eq!(layout.xy_at(index(1537)), None);

    // Odd panels run right-to-left: the second panel's first LED starts in
    // the mirrored column.
    assert_eq!(layout.xy_at(index(257)), Some((31, 15)));
}

#[test]
fn stacked_serpentine_single_panel_matches_plain_serpentine() {
    let stacked = LedLayout::stacked_serpentine(32, 8, 1).expect("valid layout");
    let plain = LedLayout::serpentine_column_major(32, 8).expect("valid layout");
    assert_eq!(stacked, plain);
}

#[test]
fn five_panel_variant_shares_the_parity_rule() {
    let layout = LedLayout::stacked_serpentine(32, 8, 5).expect("valid layout");
    assert_eq!(layout.len(), 1280);
    assert_eq!(layout.height(), 40);
    // Panels 0, 2, 4 are even-parity; the final panel therefore starts at
    // its own origin corner like the first.
    assert_eq!(layout.xy_at(index(1025)), Some((0, 32)));
}

#[test]
fn out_of_rectangle_lookups_are_rejected() {
    let layout = LedLayout::stacked_serpentine(32, 8, 6).expect("valid layout");
    assert_eq!(layout.index_of(32, 0), None);
    assert_eq!(layout.index_of(0, 48), None);
    // The bottom-right cell is lit by the last panel's first LED, because
    // odd-parity panels carry the serpentine rotated 180 degrees.
    assert_eq!(layout.index_of(31, 47).map(PhysicalIndex::get), Some(1281));
}

#[test]
fn mapping_by_xy_inverts_the_wiring_order() {
    let layout = LedLayout::serpentine_column_major(3, 2).expect("valid layout");
    // Wiring: [(0,0), (0,1), (1,1), (1,0), (2,0), (2,1)]
    assert_eq!(layout.mapping_by_xy(), &[0, 3, 4, 1, 2, 5]);
}
