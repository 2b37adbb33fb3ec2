use ferrite_ffn::{ActivationFunction, Network, Result};

fn main() -> Result<()> {
    env_logger::init();

    let mut network = Network::with_activations(
        &[2, 4, 1],
        ActivationFunction::Tanh,
        ActivationFunction::Sigmoid,
        &mut rand::thread_rng(),
    )?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    for round in 0..10 {
        let history = network.train(&inputs, &expected_outputs, 1000, 0.5)?;
        println!("Epoch {}: loss = {:.6}", (round + 1) * 1000, history.last_loss().unwrap_or(f64::NAN));
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.forward(input)?[0]);
    }
    Ok(())
}
