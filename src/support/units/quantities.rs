use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, N3, P1, P2, P3, Z0},
};

/// Seebeck coefficient, V/K in SI.
pub type SeebeckCoefficient = Quantity<ISQ<P2, P1, N3, N1, N1, Z0, Z0>, SI<f64>, f64>;

/// Lumped thermal resistance, K/W in SI.
pub type ThermalResistance = Quantity<ISQ<N2, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;
