use ferrite_ffn::{ActivationFunction, Error, Matrix, Network, NetworkBuilder};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn forward_output_width_matches_last_layer() {
    let mut rng = StdRng::seed_from_u64(11);
    for widths in [vec![1, 1], vec![3, 5, 2], vec![4, 8, 8, 8, 6], vec![10, 1]] {
        let net = Network::with_rng(&widths, &mut rng).unwrap();
        let input = vec![0.25; widths[0]];
        let out = net.forward(&input).unwrap();
        assert_eq!(out.len(), *widths.last().unwrap(), "{widths:?}");
    }
}

#[test]
fn invalid_topologies_are_rejected() {
    let cases: [&[usize]; 5] = [&[], &[4], &[0, 2], &[3, 0], &[2, 3, 0, 1]];
    for widths in cases {
        assert!(
            matches!(Network::new(widths), Err(Error::InvalidTopology(_))),
            "{widths:?} should be rejected"
        );
    }
}

#[test]
fn wrongly_sized_input_is_a_dimension_mismatch() {
    let net = Network::new(&[3, 4, 2]).unwrap();
    for bad in [vec![], vec![1.0; 2], vec![1.0; 4]] {
        assert!(matches!(net.forward(&bad), Err(Error::DimensionMismatch { .. })));
    }
}

#[test]
fn fixed_parameter_forward_is_exact() {
    // [2, 3] with the default Identity output layer.
    let mut net = Network::new(&[2, 3]).unwrap();
    net.layers[0].weights = Matrix {
        rows: 2,
        cols: 3,
        data: vec![vec![0.5, -1.0, 2.0], vec![1.5, 0.25, -0.5]],
    };
    net.layers[0].biases = Matrix::row(vec![1.0, -2.0, 0.5]);

    // z_j = Σ_i x_i · W[i][j] + b_j with x = [2, 4]
    assert_eq!(net.forward(&[2.0, 4.0]).unwrap(), vec![8.0, -3.0, 2.5]);
}

#[test]
fn forward_is_pure_and_ignores_dropout() {
    let net = NetworkBuilder::new(3)
        .dense(16, ActivationFunction::ReLU)
        .dropout(0.5)
        .dense(2, ActivationFunction::Identity)
        .build_with_rng(&mut StdRng::seed_from_u64(5))
        .unwrap();
    let input = [0.3, -1.2, 0.8];
    let first = net.forward(&input).unwrap();
    for _ in 0..5 {
        assert_eq!(net.forward(&input).unwrap(), first);
    }
}

#[test]
fn softmax_output_is_a_distribution() {
    let net = Network::with_activations(
        &[4, 6, 3],
        ActivationFunction::Tanh,
        ActivationFunction::Softmax,
        &mut StdRng::seed_from_u64(2),
    )
    .unwrap();
    let out = net.forward(&[1.0, -2.0, 0.5, 3.0]).unwrap();
    assert!((out.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    assert!(out.iter().all(|&p| p > 0.0 && p < 1.0));
}
