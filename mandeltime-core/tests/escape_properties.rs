use mandeltime_core::{evaluate, EscapeEvaluator, IterationBound, IterationResult, PlaneWindow};

/// Sample points covering the reference window on a coarse lattice.
fn lattice(cols: u32, rows: u32) -> Vec<(f64, f64)> {
    let m = PlaneWindow::REFERENCE.mapping(cols, rows);
    let mut points = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            points.push((m.re(col), m.im(row)));
        }
    }
    points
}

#[test]
fn values_stay_in_byte_range_for_small_bounds() {
    for (re, im) in lattice(60, 40) {
        for n in [1, 10, 100, 255] {
            let v = evaluate(re, im, n);
            assert!(v <= 255, "evaluate({re}, {im}, {n}) = {v}");
            // Escapes are reported as indices below the bound.
            assert!(v == 255 || v < n);
        }
    }
}

#[test]
fn escape_index_is_stable_once_found() {
    for (re, im) in lattice(45, 30) {
        let first = evaluate(re, im, 50);
        if first == 255 {
            continue;
        }
        for n in [51, 100, 500, 2000] {
            assert_eq!(
                evaluate(re, im, n),
                first,
                "escape index at ({re}, {im}) changed when raising the bound to {n}"
            );
        }
    }
}

#[test]
fn sentinel_holds_above_255_iterations() {
    assert_eq!(evaluate(0.0, 0.0, 256), 255);
    assert_eq!(evaluate(-0.1, 0.1, 5000), 255);
}

#[test]
fn escape_at_255_is_distinguishable_from_bounded() {
    let evaluator = EscapeEvaluator::new(IterationBound::new(5000).unwrap());
    let result = evaluator.iterate(mandeltime_core::Complex::new(0.2501, 0.0));
    assert!(result.escaped());
    assert!(result.value() >= 255);
    assert_ne!(result, IterationResult::Bounded);
    assert!(result.pixel() < 255);
}

#[test]
fn lattice_contains_both_escaped_and_bounded_points() {
    let values: Vec<u32> = lattice(30, 20)
        .into_iter()
        .map(|(re, im)| evaluate(re, im, 100))
        .collect();
    assert!(values.iter().any(|&v| v == 255));
    assert!(values.iter().any(|&v| v < 255));
}
