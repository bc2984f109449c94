use sigmoid_nn::{Classifier, TrainConfig};

/// RGB channels scaled from 0-255 into [0, 1].
fn rgb(r: f64, g: f64, b: f64) -> Vec<f64> {
    vec![r / 255.0, g / 255.0, b / 255.0]
}

fn main() -> sigmoid_nn::Result<()> {
    tracing_subscriber::fmt::init();

    let data = vec![
        rgb(255.0, 255.0, 255.0),
        rgb(255.0, 0.0, 0.0),
        rgb(0.0, 255.0, 0.0),
        rgb(0.0, 0.0, 255.0),
        rgb(255.0, 255.0, 0.0),
        rgb(255.0, 0.0, 255.0),
        rgb(0.0, 255.0, 255.0),
        rgb(120.0, 120.0, 120.0),
        rgb(0.0, 0.0, 0.0),
    ];
    let labels = [
        "White", "Red", "Green", "Blue", "Yellow", "Purple", "Cyan", "Gray", "Black",
    ];

    let config = TrainConfig::default().with_hidden_layers(9, 1).with_regularization(0.01);
    let network = Classifier::new(&data, &labels, config)?;

    println!("{}", serde_json::to_string_pretty(network.report())?);

    let tests = [
        (235.0, 15.0, 92.0),
        (35.0, 64.0, 249.0),
        (25.0, 15.0, 48.0),
        (123.0, 100.0, 130.0),
    ];
    for (r, g, b) in tests {
        println!("{r} {g} {b} is {}", network.predict(&rgb(r, g, b))?);
    }
    Ok(())
}
