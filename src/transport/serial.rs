//! # Serial Transport
//!
//! Opens a serial port with tokio-serial and wraps it in a
//! [`StreamTransport`]. Framing is 8 data bits, no parity, one stop bit.

use crate::constants::DEFAULT_BAUDRATE;
use crate::error::TelegenError;
use crate::transport::StreamTransport;
use log::info;
use std::time::Duration;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Transport over a native serial port.
pub type SerialTransport = StreamTransport<SerialStream>;

/// Configuration for serial connection.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub port: String,
    pub baudrate: u32,
    pub timeout: Duration,
}

impl SerialConfig {
    pub fn new(port: impl Into<String>) -> Self {
        SerialConfig {
            port: port.into(),
            baudrate: DEFAULT_BAUDRATE,
            timeout: Duration::from_millis(500),
        }
    }

    pub fn with_baudrate(mut self, baudrate: u32) -> Self {
        self.baudrate = baudrate;
        self
    }
}

/// Opens the configured serial port.
pub fn open_serial(config: &SerialConfig) -> Result<SerialTransport, TelegenError> {
    let port = tokio_serial::new(&config.port, config.baudrate)
        .data_bits(tokio_serial::DataBits::Eight)
        .stop_bits(tokio_serial::StopBits::One)
        .parity(tokio_serial::Parity::None)
        .timeout(config.timeout)
        .open_native_async()
        .map_err(|e| TelegenError::Transport(format!("{}: {e}", config.port)))?;

    info!("opened {} at {} baud", config.port, config.baudrate);
    Ok(StreamTransport::new(port))
}

/// Names of the serial ports present on this machine.
pub fn available_ports() -> Result<Vec<String>, TelegenError> {
    tokio_serial::available_ports()
        .map(|ports| ports.into_iter().map(|p| p.port_name).collect())
        .map_err(|e| TelegenError::Transport(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_8n1_terminal_speed() {
        let config = SerialConfig::new("/dev/ttyUSB0");
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.with_baudrate(2400).baudrate, 2400);
    }

    #[tokio::test]
    async fn missing_port_is_a_transport_error() {
        let result = open_serial(&SerialConfig::new("/dev/does-not-exist-telegen"));
        assert!(matches!(result, Err(TelegenError::Transport(_))));
    }
}
