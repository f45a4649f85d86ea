//! Dense statevector and gate kernels.

use num_complex::Complex64;

use qsketch_ir::{GateKind, GateOp, Matrix2, QubitId};

use crate::error::{SimError, SimResult};

/// A statevector representing a quantum state.
///
/// Amplitude index bit `i` is the state of qubit `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: u32) -> Self {
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Wrap an existing amplitude vector, for sampling or inspecting a state
    /// prepared outside the engine. The length must be a non-zero power of
    /// two, otherwise [`SimError::DimensionMismatch`] is returned.
    ///
    /// No normalization is performed; the sampler rejects a state whose norm
    /// is off.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(SimError::DimensionMismatch(len));
        }
        Ok(Self {
            amplitudes,
            num_qubits: len.trailing_zeros(),
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of amplitudes (2^n).
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Probability of observing `bitstring` (qubit 0 first).
    ///
    /// Returns `None` if the string is not a bitstring of the register's width.
    pub fn probability(&self, bitstring: &str) -> Option<f64> {
        let index = self.bitstring_to_index(bitstring)?;
        Some(self.amplitudes[index].norm_sqr())
    }

    /// Apply an operation. Measurement leaves the state untouched.
    ///
    /// The operation is validated against this register first; an invalid
    /// one is rejected and the state is not modified.
    pub fn apply(&mut self, op: &GateOp) -> SimResult<()> {
        op.validate(self.num_qubits)?;
        self.apply_validated(op);
        Ok(())
    }

    /// Apply an operation already validated against this register.
    ///
    /// X, CX and CZ use permutation and phase kernels; every other unitary
    /// goes through its 2×2 matrix.
    pub(crate) fn apply_validated(&mut self, op: &GateOp) {
        let Some(target) = op.target else {
            // Only Measure has no target
            return;
        };
        match (op.kind, op.control) {
            (GateKind::X, None) => self.apply_x(target),
            (GateKind::CX, Some(control)) => self.apply_cx(control, target),
            (GateKind::CZ, Some(control)) => self.apply_cz(control, target),
            (kind, control) => {
                if let Some(matrix) = kind.matrix() {
                    match control {
                        Some(control) => self.apply_controlled(&matrix, control, target),
                        None => self.apply_single(&matrix, target),
                    }
                }
            }
        }
    }

    // =========================================================================
    // Generic kernels
    // =========================================================================

    /// Apply a 2×2 matrix to every amplitude pair differing only in `target`.
    pub fn apply_single(&mut self, matrix: &Matrix2, target: QubitId) {
        let bit = target.index();
        let mask = target.mask();
        for k in 0..(self.dimension() >> 1) {
            let i = insert_zero_bit(k, bit);
            self.mix(matrix, i, i | mask);
        }
    }

    /// Apply a 2×2 matrix to `target` on the subspace where `control` is 1.
    pub fn apply_controlled(&mut self, matrix: &Matrix2, control: QubitId, target: QubitId) {
        let (low, high) = ordered_bits(control, target);
        let ctrl_mask = control.mask();
        let tgt_mask = target.mask();
        for k in 0..(self.dimension() >> 2) {
            let i = insert_zero_bit(insert_zero_bit(k, low), high) | ctrl_mask;
            self.mix(matrix, i, i | tgt_mask);
        }
    }

    #[inline]
    fn mix(&mut self, m: &Matrix2, i: usize, j: usize) {
        let a = self.amplitudes[i];
        let b = self.amplitudes[j];
        self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
        self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
    }

    // =========================================================================
    // Gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: QubitId) {
        let bit = qubit.index();
        let mask = qubit.mask();
        for k in 0..(self.dimension() >> 1) {
            let i = insert_zero_bit(k, bit);
            self.amplitudes.swap(i, i | mask);
        }
    }

    fn apply_cx(&mut self, control: QubitId, target: QubitId) {
        let (low, high) = ordered_bits(control, target);
        let ctrl_mask = control.mask();
        let tgt_mask = target.mask();
        for k in 0..(self.dimension() >> 2) {
            let i = insert_zero_bit(insert_zero_bit(k, low), high) | ctrl_mask;
            self.amplitudes.swap(i, i | tgt_mask);
        }
    }

    fn apply_cz(&mut self, control: QubitId, target: QubitId) {
        let (low, high) = ordered_bits(control, target);
        let both = control.mask() | target.mask();
        for k in 0..(self.dimension() >> 2) {
            let i = insert_zero_bit(insert_zero_bit(k, low), high) | both;
            self.amplitudes[i] = -self.amplitudes[i];
        }
    }

    // =========================================================================
    // Bitstrings
    // =========================================================================

    /// Convert a basis-state index to a bitstring, qubit 0 first.
    pub fn index_to_bitstring(&self, index: usize) -> String {
        index_to_bitstring(index, self.num_qubits)
    }

    fn bitstring_to_index(&self, bitstring: &str) -> Option<usize> {
        if bitstring.len() != self.num_qubits as usize {
            return None;
        }
        bitstring
            .bytes()
            .enumerate()
            .try_fold(0usize, |acc, (q, b)| match b {
                b'0' => Some(acc),
                b'1' => Some(acc | (1 << q)),
                _ => None,
            })
    }
}

/// Render a basis-state index as a bitstring with qubit 0 first.
pub fn index_to_bitstring(index: usize, num_qubits: u32) -> String {
    format!("{:0width$b}", index, width = num_qubits as usize)
        .chars()
        .rev()
        .collect()
}

/// Spread `k` so that bit position `bit` is a zero.
#[inline]
fn insert_zero_bit(k: usize, bit: usize) -> usize {
    let low = k & ((1 << bit) - 1);
    ((k >> bit) << (bit + 1)) | low
}

#[inline]
fn ordered_bits(a: QubitId, b: QubitId) -> (usize, usize) {
    let (a, b) = (a.index(), b.index());
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsketch_ir::{GateViolation, IrError};

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn sv_with(num_qubits: u32, ops: &[GateOp]) -> Statevector {
        let mut sv = Statevector::new(num_qubits);
        for op in ops {
            sv.apply(op).unwrap();
        }
        sv
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
        assert_eq!(sv.dimension(), 4);
    }

    #[test]
    fn test_hadamard() {
        let sv = sv_with(1, &[GateOp::h(QubitId(0))]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_hadamard_twice_is_identity() {
        let sv = sv_with(2, &[GateOp::h(QubitId(1)), GateOp::h(QubitId(1))]);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes[1..].iter().all(|a| a.norm() < 1e-12));
    }

    #[test]
    fn test_x_gate_bit_ordering() {
        // X on qubit 1 of a 3-qubit register sets bit 1: index 2, bitstring "010".
        let sv = sv_with(3, &[GateOp::x(QubitId(1))]);
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(1.0, 0.0)));
        assert_eq!(sv.index_to_bitstring(2), "010");
        assert_eq!(sv.probability("010"), Some(1.0));
    }

    #[test]
    fn test_bell_state() {
        let sv = sv_with(2, &[GateOp::h(QubitId(0)), GateOp::cx(QubitId(0), QubitId(1))]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_cx_requires_control() {
        // Control q1 is |0⟩, so the target must not flip.
        let sv = sv_with(2, &[GateOp::cx(QubitId(1), QubitId(0))]);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));

        let sv = sv_with(2, &[GateOp::x(QubitId(1)), GateOp::cx(QubitId(1), QubitId(0))]);
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_cx_non_adjacent_qubits() {
        let sv = sv_with(
            4,
            &[GateOp::x(QubitId(3)), GateOp::cx(QubitId(3), QubitId(0))],
        );
        assert_eq!(sv.probability("1001"), Some(1.0));
    }

    #[test]
    fn test_cz_phase_and_symmetry() {
        let prep = [GateOp::h(QubitId(0)), GateOp::h(QubitId(1))];
        let mut a = sv_with(2, &prep);
        let mut b = a.clone();
        a.apply(&GateOp::cz(QubitId(0), QubitId(1))).unwrap();
        b.apply(&GateOp::cz(QubitId(1), QubitId(0))).unwrap();

        assert!(approx_eq(a.amplitudes[3], Complex64::new(-0.5, 0.0)));
        assert!(approx_eq(a.amplitudes[0], Complex64::new(0.5, 0.0)));
        for (x, y) in a.amplitudes.iter().zip(&b.amplitudes) {
            assert!(approx_eq(*x, *y));
        }
    }

    #[test]
    fn test_generic_kernels_match_fast_paths() {
        let prep = [
            GateOp::h(QubitId(0)),
            GateOp::h(QubitId(2)),
            GateOp::cx(QubitId(0), QubitId(1)),
        ];
        for op in [
            GateOp::h(QubitId(1)),
            GateOp::x(QubitId(2)),
            GateOp::cx(QubitId(2), QubitId(1)),
            GateOp::cz(QubitId(0), QubitId(2)),
        ] {
            let mut fast = sv_with(3, &prep);
            fast.apply(&op).unwrap();

            let mut generic = sv_with(3, &prep);
            let matrix = op.kind.matrix().unwrap();
            match op.control {
                Some(c) => generic.apply_controlled(&matrix, c, op.target.unwrap()),
                None => generic.apply_single(&matrix, op.target.unwrap()),
            }

            for (x, y) in fast.amplitudes.iter().zip(&generic.amplitudes) {
                assert!(approx_eq(*x, *y), "kernels disagree for {op}");
            }
        }
    }

    #[test]
    fn test_measure_is_noop() {
        let before = sv_with(2, &[GateOp::h(QubitId(0))]);
        let mut after = before.clone();
        after.apply(&GateOp::measure()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_malformed_ops_rejected_without_mutation() {
        let before = sv_with(2, &[GateOp::h(QubitId(0))]);
        let mut sv = before.clone();

        for op in [
            GateOp::new(GateKind::CX, Some(QubitId(1)), None),
            GateOp::new(GateKind::X, Some(QubitId(1)), Some(QubitId(0))),
            GateOp::new(GateKind::H, None, None),
            GateOp::cz(QubitId(1), QubitId(1)),
        ] {
            assert!(
                matches!(sv.apply(&op), Err(SimError::Ir(IrError::InvalidGate { .. }))),
                "{op:?} was accepted"
            );
        }
        assert_eq!(sv, before);
    }

    #[test]
    fn test_out_of_range_target_rejected() {
        let mut sv = Statevector::new(2);
        let result = sv.apply(&GateOp::x(QubitId(5)));
        assert!(matches!(
            result,
            Err(SimError::Ir(IrError::InvalidGate {
                reason: GateViolation::QubitOutOfRange { .. },
                ..
            }))
        ));
        assert_eq!(sv, Statevector::new(2));
    }

    #[test]
    fn test_hadamard_uses_gate_matrix() {
        let mut via_apply = Statevector::new(2);
        via_apply.apply(&GateOp::h(QubitId(1))).unwrap();

        let mut via_matrix = Statevector::new(2);
        via_matrix.apply_single(&GateKind::H.matrix().unwrap(), QubitId(1));

        assert_eq!(via_apply, via_matrix);
    }

    #[test]
    fn test_insert_zero_bit() {
        assert_eq!(insert_zero_bit(0b11, 0), 0b110);
        assert_eq!(insert_zero_bit(0b11, 1), 0b101);
        assert_eq!(insert_zero_bit(0b11, 2), 0b011);
    }

    #[test]
    fn test_from_amplitudes() {
        assert!(matches!(
            Statevector::from_amplitudes(Vec::new()),
            Err(SimError::DimensionMismatch(0))
        ));
        let half = Complex64::new(0.5, 0.0);
        let sv = Statevector::from_amplitudes(vec![half; 4]).unwrap();
        assert_eq!(sv.num_qubits(), 2);
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);

        assert!(matches!(
            Statevector::from_amplitudes(vec![half; 3]),
            Err(SimError::DimensionMismatch(3))
        ));
    }

    #[test]
    fn test_probability_rejects_bad_bitstrings() {
        let sv = Statevector::new(2);
        assert_eq!(sv.probability("00"), Some(1.0));
        assert_eq!(sv.probability("0"), None);
        assert_eq!(sv.probability("0a"), None);
    }
}
