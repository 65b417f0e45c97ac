//! Sending requests to the stock server over TCP.
//!
//! `StockClient` keeps one connection open and performs request/response round
//! trips over it. Server-side failures come back as `StockError::Rejected` so callers
//! can match on the error code.
use log::debug;
use stock_common::{
    PriceUpdate, Request, Response, SecurityName, SecuritySnapshot, StockError,
};
use stock_common::Result;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::time::Duration;

/// Read timeout applied to every response.
const RESPONSE_TIMEOUT_SECS: u64 = 10;

/// Blocking connection to the stock server.
pub struct StockClient {
    writer: TcpStream,
    reader: BufReader<TcpStream>,
}

impl StockClient {
    /// Connect to `server_addr` (`host:port`).
    pub fn connect(server_addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(server_addr).map_err(|e| {
            StockError::Format(format!("Failed to connect to server {}: {}", server_addr, e))
        })?;
        stream.set_read_timeout(Some(Duration::from_secs(RESPONSE_TIMEOUT_SECS)))?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            writer: stream,
            reader,
        })
    }

    /// Send one request and wait for its response.
    pub fn send(&mut self, request: &Request) -> Result<Response> {
        let frame = request.to_frame()?;
        debug!("Sending request: {}", String::from_utf8_lossy(&frame).trim());
        self.writer.write_all(&frame)?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(StockError::ConnectionClosed);
        }
        Ok(serde_json::from_str(line.trim())?)
    }

    /// Register a new security.
    pub fn create(&mut self, name: &str, price: f64) -> Result<()> {
        let response = self.send(&Request::Create(PriceUpdate::new(name, price)))?;
        expect_ok(response)
    }

    /// Append a price to an existing security.
    pub fn update(&mut self, name: &str, price: f64) -> Result<()> {
        let response = self.send(&Request::Update(PriceUpdate::new(name, price)))?;
        expect_ok(response)
    }

    /// Fetch a security with its full history.
    pub fn get(&mut self, name: &str) -> Result<SecuritySnapshot> {
        match self.send(&Request::Get(SecurityName::new(name)))? {
            Response::Security(snapshot) => Ok(snapshot),
            Response::Error(payload) => Err(payload.into()),
            Response::Ok => Err(StockError::Format(String::from(
                "Server answered a get request without a security",
            ))),
        }
    }
}

fn expect_ok(response: Response) -> Result<()> {
    match response {
        Response::Ok => Ok(()),
        Response::Error(payload) => Err(payload.into()),
        Response::Security(_) => Err(StockError::Format(String::from(
            "Server answered a mutation with a security payload",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_common::ErrorCode;

    #[test]
    fn ok_response_is_success() {
        assert!(expect_ok(Response::Ok).is_ok());
    }

    #[test]
    fn error_response_becomes_rejected() {
        let err = expect_ok(Response::error(ErrorCode::AlreadyExists, "AMC exists")).unwrap_err();
        assert!(matches!(
            err,
            StockError::Rejected {
                code: ErrorCode::AlreadyExists,
                ..
            }
        ));
    }

    #[test]
    fn connect_to_closed_port_fails() {
        assert!(StockClient::connect("127.0.0.1:1").is_err());
    }
}
