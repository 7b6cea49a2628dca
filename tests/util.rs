/// Check whether two floats differ by at most 5e-5 times the larger magnitude (or 5e-5 outright near zero).
#[macro_export]
macro_rules! assert_floats_near_equal {
    ($val1:expr, $val2:expr, $msg:expr) => {{
        let a: f64 = $val1;
        let b: f64 = $val2;
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() <= 0.00005 * scale, "{}: {} vs {}", $msg, a, b);
    }};
}
