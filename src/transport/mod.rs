//! The packet transport pipeline: builder, receiver state machine,
//! validator, and the serial abstractions and facade built on top of them.

pub mod builder;
pub mod handle;
pub mod parser;
pub mod receiver;
pub mod residual;
pub mod serial;
pub mod serial_mock;
pub mod validator;

pub use handle::{PacketTransport, TransportStats};
pub use residual::Residual;
pub use serial::SerialPort;
