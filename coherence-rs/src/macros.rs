/// Build a purely real [`num_complex::Complex64`].
macro_rules! real {
    ($value:expr) => {{
        num_complex::Complex64::new($value, 0.0)
    }};
}

/// Build a purely imaginary [`num_complex::Complex64`].
macro_rules! imag {
    ($value:expr) => {{
        num_complex::Complex64::new(0.0, $value)
    }};
}

pub(crate) use imag;
pub(crate) use real;
