/// Geometry failures that must not be papered over with NaN.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("geometric invariant violated: {context} (a={a}, b={b}, c={c})")]
    InvariantViolation {
        context: &'static str,
        a: f64,
        b: f64,
        c: f64,
    },
}
