//! Scalar angle arithmetic shared by the coordinate types.
//!
//! Everything here works on plain `f64` degrees; the public API wraps the
//! results back into [`uom`] quantities at the boundary.

/// Normalizes a bearing-style angle into [0°, 360°).
pub(crate) fn normalize_bearing(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Wraps a longitude into (-180°, 180°].
///
/// -180° itself is never produced; the antimeridian always comes out as
/// +180°.
pub(crate) fn wrap_longitude(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Mirror-folds a latitude into [-90°, 90°], reflecting at the poles rather
/// than wrapping.
///
/// Returns the folded latitude and whether the path from 0° to the input
/// passed over a pole, in which case the longitude of the shifted location
/// must be flipped by 180°. The crossing test looks at which quadrant of the
/// 360° latitude cycle the unfolded value landed in: quadrants 1 and 2 (and
/// their negative counterparts) lie on the far side of a pole.
pub(crate) fn fold_latitude(degrees: f64) -> (f64, bool) {
    let quarters = degrees / 90.0;
    #[allow(clippy::cast_possible_truncation)]
    let crossed_pole = matches!(quarters.floor().rem_euclid(4.0) as i64, 1 | 2);
    let cycle = quarters.rem_euclid(4.0);
    let folded = if cycle <= 1.0 {
        cycle
    } else if cycle <= 3.0 {
        2.0 - cycle
    } else {
        cycle - 4.0
    };
    (folded * 90.0, crossed_pole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(360.0, 0.0)]
    #[case(300.0 + 180.0, 120.0)]
    #[case(-100.0 + 180.0, 80.0)]
    #[case(-90.0, 270.0)]
    #[case(720.5, 0.5)]
    fn bearing_normalizes_into_full_turn(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(normalize_bearing(input), expected);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(180.0, 180.0)]
    #[case(-180.0, 180.0)]
    #[case(200.0, -160.0)]
    #[case(360.0, 0.0)]
    #[case(-200.0, 160.0)]
    #[case(540.0, 180.0)]
    fn longitude_wraps_into_signed_half_open_range(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(wrap_longitude(input), expected);
    }

    #[rstest]
    #[case(10.0, 10.0, false)]
    #[case(100.0, 80.0, true)]
    #[case(180.0, 0.0, true)]
    #[case(280.0, -80.0, false)]
    #[case(360.0, 0.0, false)]
    #[case(-100.0, -80.0, true)]
    #[case(-280.0, 80.0, false)]
    #[case(-10.0, -10.0, false)]
    fn latitude_folds_at_the_poles(
        #[case] input: f64,
        #[case] expected: f64,
        #[case] crossed: bool,
    ) {
        assert_eq!(fold_latitude(input), (expected, crossed));
    }
}
