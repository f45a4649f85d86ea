//! Property-based tests for evolution and sampling.
//!
//! Unitary gates preserve the norm, and every histogram accounts for exactly
//! the requested number of shots.

use proptest::prelude::*;
use qsketch_ir::{Circuit, GateOp, QubitId};
use qsketch_sim::{MeasurementSampler, SimulationService, SimulatorConfig, StateVectorEngine};

/// Generate a valid unitary gate on an `n`-qubit register.
fn arb_unitary_op(n: u32) -> impl Strategy<Value = GateOp> {
    let single = (0..n, prop::bool::ANY).prop_map(|(q, hadamard)| {
        if hadamard {
            GateOp::h(QubitId(q))
        } else {
            GateOp::x(QubitId(q))
        }
    });
    let pair = (0..n, 1..n.max(2), prop::bool::ANY).prop_map(move |(c, offset, cz)| {
        let t = (c + offset) % n.max(2);
        let (c, t) = (QubitId(c), QubitId(t));
        if cz { GateOp::cz(c, t) } else { GateOp::cx(c, t) }
    });
    if n < 2 {
        single.boxed()
    } else {
        prop_oneof![single, pair].boxed()
    }
}

/// Generate a register size and a valid circuit on it.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1u32..=6).prop_flat_map(|n| {
        prop::collection::vec(arb_unitary_op(n), 0..40).prop_map(move |ops| {
            let mut circuit = Circuit::new(n).unwrap();
            for op in ops {
                circuit.append(op).unwrap();
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn evolution_preserves_norm(circuit in arb_circuit()) {
        let state = StateVectorEngine::new().evolve(&circuit);
        prop_assert!((state.norm_sqr() - 1.0).abs() <= 1e-9, "norm = {}", state.norm_sqr());
    }

    #[test]
    fn histogram_accounts_for_every_shot(circuit in arb_circuit(), shots in 1u64..3000, seed in any::<u64>()) {
        let state = StateVectorEngine::new().evolve(&circuit);
        let counts = MeasurementSampler::new()
            .with_seed(Some(seed))
            .sample(&state, shots)
            .unwrap();

        prop_assert_eq!(counts.shots(), shots);
        prop_assert_eq!(counts.iter().map(|(_, c)| c).sum::<u64>(), shots);
        let width = circuit.num_qubits() as usize;
        prop_assert!(counts.iter().all(|(bits, _)| bits.len() == width));
    }

    #[test]
    fn sampled_outcomes_have_nonzero_probability(circuit in arb_circuit(), seed in any::<u64>()) {
        let state = StateVectorEngine::new().evolve(&circuit);
        let counts = MeasurementSampler::new()
            .with_seed(Some(seed))
            .sample(&state, 256)
            .unwrap();

        for (bits, _) in counts.iter() {
            let p = state.probability(bits).unwrap();
            prop_assert!(p > 1e-12, "sampled {} with probability {}", bits, p);
        }
    }

    #[test]
    fn same_seed_same_histogram(circuit in arb_circuit(), seed in any::<u64>()) {
        prop_assume!(!circuit.is_empty());
        let service = SimulationService::with_config(SimulatorConfig::new().with_seed(seed));
        let a = service.simulate(&circuit, 500).unwrap();
        let b = service.simulate(&circuit, 500).unwrap();
        prop_assert_eq!(a.counts, b.counts);
    }
}
