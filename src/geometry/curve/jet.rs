use crate::math::Vector3;

/// A fixed-size triple returned by a curve callback.
///
/// The solver reads the three slots as the function value followed by its
/// first and second derivatives with respect to the single argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jet {
    /// Function value.
    pub value: f64,
    /// First derivative.
    pub d1: f64,
    /// Second derivative.
    pub d2: f64,
}

impl Jet {
    /// Creates a new jet.
    #[must_use]
    pub fn new(value: f64, d1: f64, d2: f64) -> Self {
        Self { value, d1, d2 }
    }

    /// Returns the triple as an array in `(value, d1, d2)` order.
    #[must_use]
    pub fn to_array(self) -> [f64; 3] {
        [self.value, self.d1, self.d2]
    }

    /// Returns the triple as a vector in `(value, d1, d2)` order.
    #[must_use]
    pub fn to_vector(self) -> Vector3 {
        Vector3::new(self.value, self.d1, self.d2)
    }
}

impl From<Jet> for [f64; 3] {
    fn from(jet: Jet) -> Self {
        jet.to_array()
    }
}

impl From<Jet> for Vector3 {
    fn from(jet: Jet) -> Self {
        jet.to_vector()
    }
}
