//! Float comparison helpers shared by unit and integration tests.

#[inline]
pub fn f64_to_ordered_u64(x: f64) -> u64 {
    let bits = x.to_bits();
    if bits & 0x8000_0000_0000_0000 != 0 {
        !bits
    } else {
        bits | 0x8000_0000_0000_0000
    }
}

#[inline]
pub fn ulp_diff(a: f64, b: f64) -> u64 {
    f64_to_ordered_u64(a).abs_diff(f64_to_ordered_u64(b))
}

#[track_caller]
pub fn assert_ulp_le(a: f64, b: f64, max_ulp: u64, ctx: &str) {
    if a == 0.0 && b == 0.0 {
        return;
    }
    assert!(
        a.is_finite() && b.is_finite(),
        "non-finite value in {}",
        ctx
    );
    let d = ulp_diff(a, b);
    assert!(
        d <= max_ulp,
        "{}: ULP={} exceeds {}, a={} b={}",
        ctx,
        d,
        max_ulp,
        a,
        b
    );
}

/// Asserts `|a - b| <= tol`.
#[track_caller]
pub fn assert_abs_le(a: f64, b: f64, tol: f64, ctx: &str) {
    assert!(
        a.is_finite() && b.is_finite(),
        "non-finite value in {}: a={} b={}",
        ctx,
        a,
        b
    );
    let d = (a - b).abs();
    assert!(
        d <= tol,
        "{}: |{} - {}| = {:e} exceeds {:e}",
        ctx,
        a,
        b,
        d,
        tol
    );
}

/// Asserts `|a - b| / |b| <= rel`.
#[track_caller]
pub fn assert_rel_le(a: f64, b: f64, rel: f64, ctx: &str) {
    assert!(b != 0.0, "{}: relative comparison against zero", ctx);
    let r = ((a - b) / b).abs();
    assert!(
        r <= rel,
        "{}: relative error {:e} between {} and {} exceeds {:e}",
        ctx,
        r,
        a,
        b,
        rel
    );
}

#[macro_export]
macro_rules! assert_latlng_close {
    ($actual:expr, $expected:expr, $tol_deg:expr) => {{
        let actual: $crate::LatLng = $actual;
        let expected: $crate::LatLng = $expected;
        $crate::test_helpers::assert_abs_le(
            actual.latitude,
            expected.latitude,
            $tol_deg,
            &format!("latitude of {} vs {}", stringify!($actual), stringify!($expected)),
        );
        $crate::test_helpers::assert_abs_le(
            actual.longitude,
            expected.longitude,
            $tol_deg,
            &format!("longitude of {} vs {}", stringify!($actual), stringify!($expected)),
        );
    }};
}
