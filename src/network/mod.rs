pub mod init;
pub mod network;

pub use init::{init_layer, init_network, INIT_EPSILON};
pub use network::Network;
