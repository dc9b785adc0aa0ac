//! Point charges placed in the plane.

use glam::Vec2;

/// Sign of a charge, used to pick the tracing direction and the draw colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Unit charge magnitude carrying this sign.
    pub fn unit_charge(self) -> f32 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

/// A point source of field: plane position plus signed magnitude.
///
/// Charges are immutable once placed. A zero `q` is allowed and simply
/// contributes nothing to the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    pub position: Vec2,
    pub q: f32,
}

impl Charge {
    pub fn new(position: Vec2, q: f32) -> Self {
        Self { position, q }
    }

    /// Unit charge of the given polarity.
    pub fn unit(position: Vec2, polarity: Polarity) -> Self {
        Self::new(position, polarity.unit_charge())
    }

    /// Polarity for colouring. Zero counts as positive.
    pub fn polarity(&self) -> Polarity {
        if self.q < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }

    /// Direction sign for field-line tracing: lines leave positive charges
    /// along the field and arrive at negative charges against it.
    pub fn trace_sign(&self) -> f32 {
        if self.q < 0.0 {
            -1.0
        } else {
            1.0
        }
    }
}

/// The dipole a fresh session starts with.
pub fn default_dipole() -> Vec<Charge> {
    vec![
        Charge::new(Vec2::new(-150.0, 0.0), 1.0),
        Charge::new(Vec2::new(150.0, 0.0), -1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_sign_follows_charge_sign() {
        assert_eq!(Charge::new(Vec2::ZERO, 2.5).trace_sign(), 1.0);
        assert_eq!(Charge::new(Vec2::ZERO, -0.1).trace_sign(), -1.0);
        // Zero charge traces forward, like a positive one
        assert_eq!(Charge::new(Vec2::ZERO, 0.0).trace_sign(), 1.0);
    }

    #[test]
    fn test_unit_charge_polarity_round_trip() {
        let pos = Charge::unit(Vec2::new(1.0, 2.0), Polarity::Positive);
        let neg = Charge::unit(Vec2::new(1.0, 2.0), Polarity::Negative);
        assert_eq!(pos.q, 1.0);
        assert_eq!(neg.q, -1.0);
        assert_eq!(pos.polarity(), Polarity::Positive);
        assert_eq!(neg.polarity(), Polarity::Negative);
    }

    #[test]
    fn test_default_dipole_is_symmetric() {
        let dipole = default_dipole();
        assert_eq!(dipole.len(), 2);
        assert_eq!(dipole[0].position, -dipole[1].position);
        assert_eq!(dipole[0].q, -dipole[1].q);
    }
}
