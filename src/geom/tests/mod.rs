mod test_layout_serde;
mod test_section_basic;

pub(super) fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}
