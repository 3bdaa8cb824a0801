use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::{array, Array2};
use num_complex::Complex64;

use crate::{
    expression::Expression,
    instruction::{write_expression_parameter_string, write_qubits, Qubit},
    macros::{imag, real},
    quil::Quil,
};

/// The single-qubit gates coherence sequences are assembled from.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum StandardGate {
    /// Idle for one gate time.
    I,
    /// Excitation: flips the basis state.
    X,
    /// Inversion about the y axis, the refocusing pulse of an echo.
    Y,
    /// Balanced mixing into an equal superposition.
    H,
    /// Rotation about the y axis by an angle.
    Ry,
    /// Phase rotation by an angle.
    Phase,
}

impl StandardGate {
    /// How many parameters a gate of this kind takes.
    pub fn parameter_count(&self) -> usize {
        match self {
            StandardGate::I | StandardGate::X | StandardGate::Y | StandardGate::H => 0,
            StandardGate::Ry | StandardGate::Phase => 1,
        }
    }
}

/// A gate applied to specific qubits.
///
/// Every constructor checks the parameter count against the kind, so a `Gate` always has a
/// matrix unless one of its parameters is not finite.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gate {
    kind: StandardGate,
    parameters: Vec<Expression>,
    qubits: Vec<Qubit>,
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    #[error("a gate must operate on 1 or more qubits")]
    EmptyQubits,

    #[error("gate `{gate}` acts on {expected} qubit(s), but was given {actual}")]
    QubitCount {
        gate: StandardGate,
        expected: usize,
        actual: usize,
    },

    #[error("gate `{gate}` expects {expected} parameters, but got {actual}")]
    ParameterCount {
        gate: StandardGate,
        expected: usize,
        actual: usize,
    },

    #[error("cannot produce a matrix for gate `{gate}` with non-finite parameters {parameters:?}")]
    MatrixNonFiniteParams {
        gate: StandardGate,
        parameters: Vec<Expression>,
    },
}

/// Matrix version of a gate.
pub type Matrix = Array2<Complex64>;

impl Gate {
    /// Build a new gate
    ///
    /// # Errors
    ///
    /// Returns an error if no qubits are given, if the gate is given more qubits than it acts on,
    /// or if the number of parameters doesn't match the gate kind.
    pub fn new(
        kind: StandardGate,
        parameters: Vec<Expression>,
        qubits: Vec<Qubit>,
    ) -> Result<Self, GateError> {
        if qubits.is_empty() {
            return Err(GateError::EmptyQubits);
        }
        if qubits.len() != 1 {
            return Err(GateError::QubitCount {
                gate: kind,
                expected: 1,
                actual: qubits.len(),
            });
        }
        if parameters.len() != kind.parameter_count() {
            return Err(GateError::ParameterCount {
                gate: kind,
                expected: kind.parameter_count(),
                actual: parameters.len(),
            });
        }

        Ok(Self {
            kind,
            parameters,
            qubits,
        })
    }

    fn fixed(kind: StandardGate, qubit: Qubit) -> Self {
        debug_assert_eq!(kind.parameter_count(), 0);
        Self {
            kind,
            parameters: vec![],
            qubits: vec![qubit],
        }
    }

    fn rotation(kind: StandardGate, angle: Expression, qubit: Qubit) -> Self {
        debug_assert_eq!(kind.parameter_count(), 1);
        Self {
            kind,
            parameters: vec![angle],
            qubits: vec![qubit],
        }
    }

    pub fn kind(&self) -> StandardGate {
        self.kind
    }

    pub fn parameters(&self) -> &[Expression] {
        &self.parameters
    }

    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Whether this gate acts on `qubit`.
    pub fn acts_on(&self, qubit: Qubit) -> bool {
        self.qubits.contains(&qubit)
    }

    pub fn identity(qubit: Qubit) -> Self {
        Self::fixed(StandardGate::I, qubit)
    }

    pub fn x(qubit: Qubit) -> Self {
        Self::fixed(StandardGate::X, qubit)
    }

    pub fn y(qubit: Qubit) -> Self {
        Self::fixed(StandardGate::Y, qubit)
    }

    pub fn h(qubit: Qubit) -> Self {
        Self::fixed(StandardGate::H, qubit)
    }

    pub fn ry(angle: Expression, qubit: Qubit) -> Self {
        Self::rotation(StandardGate::Ry, angle, qubit)
    }

    pub fn phase(angle: Expression, qubit: Qubit) -> Self {
        Self::rotation(StandardGate::Phase, angle, qubit)
    }

    /// `RY(pi/2)`: the quarter turn that opens and closes an echo sequence.
    pub fn quarter_turn(qubit: Qubit) -> Self {
        Self::ry(Expression::quarter_turn(), qubit)
    }

    /// The 2x2 unitary of this gate.
    ///
    /// # Errors
    ///
    /// Returns an error if the angle of `RY` or `PHASE` evaluates to NaN or an infinity.
    pub fn to_matrix(&self) -> Result<Matrix, GateError> {
        let _0 = real!(0.0);
        let _1 = real!(1.0);
        let _i = imag!(1.0);
        let _1_sqrt_2 = real!(FRAC_1_SQRT_2);

        let matrix = match self.kind {
            StandardGate::I => Array2::eye(2),
            StandardGate::X => array![[_0, _1], [_1, _0]],
            StandardGate::Y => array![[_0, -_i], [_i, _0]],
            StandardGate::H => array![[_1, _1], [_1, -_1]] * _1_sqrt_2,
            StandardGate::Ry => {
                let t = real!(self.angle()? / 2.0);
                array![[t.cos(), -t.sin()], [t.sin(), t.cos()]]
            }
            StandardGate::Phase => array![[_1, _0], [_0, Complex64::cis(self.angle()?)]],
        };
        Ok(matrix)
    }

    fn angle(&self) -> Result<f64, GateError> {
        match self.parameters.as_slice() {
            [angle] if angle.to_real().is_finite() => Ok(angle.to_real()),
            _ => Err(GateError::MatrixNonFiniteParams {
                gate: self.kind,
                parameters: self.parameters.clone(),
            }),
        }
    }
}

impl Quil for Gate {
    fn write(
        &self,
        f: &mut impl std::fmt::Write,
        fall_back_to_debug: bool,
    ) -> crate::quil::ToQuilResult<()> {
        write!(f, "{}", self.kind)?;
        write_expression_parameter_string(f, fall_back_to_debug, &self.parameters)?;
        write_qubits(f, fall_back_to_debug, &self.qubits)
    }
}

#[cfg(test)]
mod test_gate_into_matrix {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::{Gate, GateError, Matrix, StandardGate};
    use crate::{expression::Expression, instruction::Qubit, macros::real};

    fn q0() -> Qubit {
        Qubit::new(0)
    }

    fn product(gates: &[Gate]) -> Matrix {
        gates
            .iter()
            .fold(Matrix::eye(2), |acc, gate| gate.to_matrix().unwrap().dot(&acc))
    }

    #[test]
    fn quarter_turn_mixes_evenly() {
        let u2 = array![[real!(1.0), real!(-1.0)], [real!(1.0), real!(1.0)]] * real!(FRAC_1_SQRT_2);
        assert_abs_diff_eq!(Gate::quarter_turn(q0()).to_matrix().unwrap(), u2, epsilon = 1e-12);
    }

    #[test]
    fn two_quarter_turns_are_a_half_turn() {
        let half = Gate::ry(Expression::PiConstant, q0()).to_matrix().unwrap();
        let twice = product(&[Gate::quarter_turn(q0()), Gate::quarter_turn(q0())]);
        assert_abs_diff_eq!(twice, half, epsilon = 1e-12);
    }

    #[test]
    fn mixing_around_zero_phase_is_identity() {
        let ramsey = product(&[
            Gate::h(q0()),
            Gate::phase(Expression::Number(0.0), q0()),
            Gate::h(q0()),
        ]);
        assert_abs_diff_eq!(ramsey, Matrix::eye(2), epsilon = 1e-12);
    }

    #[test]
    fn mixing_around_half_turn_phase_flips() {
        let ramsey = product(&[
            Gate::h(q0()),
            Gate::phase(Expression::Number(PI), q0()),
            Gate::h(q0()),
        ]);
        let x = Gate::x(q0()).to_matrix().unwrap();
        assert_abs_diff_eq!(ramsey, x, epsilon = 1e-12);
    }

    #[rstest]
    #[case(Gate::identity(q0()))]
    #[case(Gate::x(q0()))]
    #[case(Gate::y(q0()))]
    #[case(Gate::h(q0()))]
    #[case(Gate::quarter_turn(q0()))]
    #[case(Gate::phase(Expression::Number(1.25), q0()))]
    fn gates_are_unitary(#[case] gate: Gate) {
        let matrix = gate.to_matrix().unwrap();
        let adjoint = matrix.t().mapv(|c| c.conj());
        assert_abs_diff_eq!(adjoint.dot(&matrix), Matrix::eye(2), epsilon = 1e-12);
    }

    #[test]
    fn non_finite_parameters_have_no_matrix() {
        let gate = Gate::phase(Expression::Number(f64::NAN), q0());
        assert!(matches!(
            gate.to_matrix(),
            Err(GateError::MatrixNonFiniteParams {
                gate: StandardGate::Phase,
                ..
            })
        ));
    }

    #[rstest]
    #[case(Gate::ry(Expression::Number(f64::INFINITY), q0()))]
    #[case(Gate::ry(Expression::PiConstant / Expression::Number(0.0), q0()))]
    fn non_finite_rotation_has_no_matrix(#[case] gate: Gate) {
        assert_eq!(
            gate.to_matrix(),
            Err(GateError::MatrixNonFiniteParams {
                gate: StandardGate::Ry,
                parameters: gate.parameters().to_vec(),
            })
        );
    }

    #[test]
    fn every_kind_has_a_matrix() {
        for kind in StandardGate::iter() {
            let parameters = vec![Expression::Number(0.5); kind.parameter_count()];
            let gate = Gate::new(kind, parameters, vec![q0()]).unwrap();
            assert_eq!(gate.to_matrix().unwrap().shape(), &[2, 2]);
        }
    }
}

#[cfg(test)]
mod test_gate {
    use rstest::rstest;

    use super::{Gate, GateError, StandardGate};
    use crate::{expression::Expression, instruction::Qubit, quil::Quil};

    #[rstest]
    #[case("I", StandardGate::I)]
    #[case("RY", StandardGate::Ry)]
    #[case("PHASE", StandardGate::Phase)]
    fn kind_names(#[case] name: &str, #[case] kind: StandardGate) {
        assert_eq!(kind.to_string(), name);
        assert_eq!(name.parse::<StandardGate>().unwrap(), kind);
    }

    #[test]
    fn new_validates_shape() {
        assert_eq!(
            Gate::new(StandardGate::X, vec![], vec![]),
            Err(GateError::EmptyQubits)
        );
        assert_eq!(
            Gate::new(StandardGate::Phase, vec![], vec![Qubit::new(0)]),
            Err(GateError::ParameterCount {
                gate: StandardGate::Phase,
                expected: 1,
                actual: 0,
            })
        );
        assert_eq!(
            Gate::new(StandardGate::H, vec![], vec![Qubit::new(0), Qubit::new(1)]),
            Err(GateError::QubitCount {
                gate: StandardGate::H,
                expected: 1,
                actual: 2,
            })
        );
        assert_eq!(
            Gate::new(StandardGate::Y, vec![], vec![Qubit::new(1)]),
            Ok(Gate::y(Qubit::new(1)))
        );
    }

    #[test]
    fn constructors_agree_with_new() {
        let q = Qubit::new(2);
        let half = Expression::Number(0.5);
        for (built, kind, parameters) in [
            (Gate::identity(q), StandardGate::I, vec![]),
            (Gate::x(q), StandardGate::X, vec![]),
            (Gate::y(q), StandardGate::Y, vec![]),
            (Gate::h(q), StandardGate::H, vec![]),
            (Gate::ry(half.clone(), q), StandardGate::Ry, vec![half.clone()]),
            (Gate::phase(half.clone(), q), StandardGate::Phase, vec![half.clone()]),
        ] {
            assert_eq!(Gate::new(kind, parameters, vec![q]), Ok(built.clone()));
            assert_eq!(built.kind(), kind);
            assert_eq!(built.qubits(), &[q]);
            assert!(built.acts_on(q));
            assert!(!built.acts_on(Qubit::new(0)));
        }
    }

    #[test]
    fn phase_quil() {
        let gate = Gate::phase(Expression::Number(0.5), Qubit::new(7));
        assert_eq!(gate.to_quil().unwrap(), "PHASE(0.5) 7");
    }
}
