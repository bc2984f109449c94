pub mod forward;
pub mod backward;

pub use forward::{argmax, propagate, propagate_batch, ForwardPass};
pub use backward::{apply_gradients, gradients, layer_errors, output_errors, propagate_backwards};
