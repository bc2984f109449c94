use sigmoid_nn::{Classifier, TrainConfig};

fn main() -> sigmoid_nn::Result<()> {
    tracing_subscriber::fmt::init();

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let labels = [0, 1, 1, 0];

    let config = TrainConfig::new(2, 1, 0.0).with_seed(2);
    let network = Classifier::new(&inputs, &labels, config)?;

    let report = network.report();
    println!(
        "{:?} after {} iterations: cost = {:.6}",
        report.outcome, report.iterations, report.final_cost
    );
    for input in &inputs {
        println!("Input: {:?} -> {}", input, network.predict(input)?);
    }
    Ok(())
}
