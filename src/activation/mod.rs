pub mod sigmoid;

pub use sigmoid::{sigmoid, sigmoid_all, sigmoid_gradient, sigmoid_gradient_all};
