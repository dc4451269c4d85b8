//! # Telegram Transport
//!
//! The generator only produces telegram strings. Delivering them is the job
//! of a [`Transport`]: it accepts a complete hex telegram, writes it out, and
//! hands back raw received bytes stamped with their arrival time. Every
//! exchange is returned as a [`TrafficEntry`] so callers can keep a log in the
//! `dd.mm.YYYY HH:MM:SS.mmm [TX] - 1B 50 1B 51 01` format.

pub mod mock;
pub mod serial;

use crate::error::TelegenError;
use crate::generator::session::TelegramBatch;
use crate::util::hex::{format_hex_spaced, parse_telegram};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub use mock::MockSerialPort;
pub use serial::{available_ports, open_serial, SerialConfig, SerialTransport};

const READ_BUFFER_SIZE: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Rx,
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Rx => "RX",
            Direction::Tx => "TX",
        })
    }
}

/// Bytes that crossed the link, with local arrival/departure time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficEntry {
    pub timestamp: DateTime<Local>,
    pub direction: Direction,
    pub bytes: Vec<u8>,
}

impl TrafficEntry {
    pub fn now(direction: Direction, bytes: Vec<u8>) -> Self {
        TrafficEntry {
            timestamp: Local::now(),
            direction,
            bytes,
        }
    }
}

impl fmt::Display for TrafficEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] - {}",
            self.timestamp.format("%d.%m.%Y %H:%M:%S%.3f"),
            self.direction,
            format_hex_spaced(&self.bytes)
        )
    }
}

/// Link that carries generated telegrams to a device under test.
#[async_trait]
pub trait Transport: Send {
    /// Writes one space-delimited hex telegram.
    async fn transmit(&mut self, telegram: &str) -> Result<TrafficEntry, TelegenError>;

    /// Returns whatever arrives within `wait`, `None` if nothing did.
    async fn receive(&mut self, wait: Duration) -> Result<Option<TrafficEntry>, TelegenError>;
}

/// Transport over any async byte stream (serial port, mock, pipe).
pub struct StreamTransport<S> {
    stream: S,
}

impl<S> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        StreamTransport { stream }
    }
}

#[async_trait]
impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn transmit(&mut self, telegram: &str) -> Result<TrafficEntry, TelegenError> {
        let bytes = parse_telegram(telegram)?;
        self.stream
            .write_all(&bytes)
            .await
            .map_err(|e| TelegenError::Transport(e.to_string()))?;
        self.stream
            .flush()
            .await
            .map_err(|e| TelegenError::Transport(e.to_string()))?;

        let entry = TrafficEntry::now(Direction::Tx, bytes);
        debug!("{entry}");
        Ok(entry)
    }

    async fn receive(&mut self, wait: Duration) -> Result<Option<TrafficEntry>, TelegenError> {
        let mut buf = vec![0u8; READ_BUFFER_SIZE];
        let n = match tokio::time::timeout(wait, self.stream.read(&mut buf)).await {
            Err(_) => return Ok(None),
            Ok(res) => res.map_err(|e| TelegenError::Transport(e.to_string()))?,
        };
        if n == 0 {
            return Ok(None);
        }

        buf.truncate(n);
        let entry = TrafficEntry::now(Direction::Rx, buf);
        debug!("{entry}");
        Ok(Some(entry))
    }
}

/// Transmits every telegram of `batch`, listening for `wait` after each one.
///
/// Returns the interleaved TX/RX log. Stops at the first link error.
pub async fn transmit_batch<T>(
    transport: &mut T,
    batch: &TelegramBatch,
    wait: Duration,
) -> Result<Vec<TrafficEntry>, TelegenError>
where
    T: Transport + ?Sized,
{
    let mut log = Vec::with_capacity(batch.len() * 2);
    for telegram in batch.iter() {
        log.push(transport.transmit(&telegram.wire).await?);
        if let Some(rx) = transport.receive(wait).await? {
            log.push(rx);
        }
    }
    Ok(log)
}
