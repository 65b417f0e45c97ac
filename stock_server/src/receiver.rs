//! TCP front end of the stock server.
//!
//! `RequestReceiver` accepts connections and `handle_connection` serves one of them:
//! newline-delimited JSON requests in, one JSON response per request out.
use crate::service::StockService;
use log::{debug, error, info, warn};
use stock_common::net::MAX_FRAME_BYTES;
use stock_common::{ErrorCode, Request, Response, Result, StockError};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Chunks of an oversized frame skipped before the connection is dropped anyway.
const MAX_DISCARD_FRAMES: usize = 64;

/// TCP request receiver that accepts client connections and serves them.
///
/// Each accepted connection gets its own thread. A connection carries any number of
/// newline-delimited JSON requests; every request is answered on the same
/// connection, in order. Errors on one connection are logged and only close that
/// connection; the accept loop keeps serving everyone else.
pub struct RequestReceiver {
    /// The underlying TCP listening socket.
    pub(crate) socket: TcpListener,
}

impl RequestReceiver {
    /// Bind a new TCP receiver to the provided `bind_addr` (e.g., `127.0.0.1:10000`).
    pub fn new(bind_addr: &str) -> Result<Self> {
        let socket = TcpListener::bind(bind_addr)?;
        Ok(Self { socket })
    }

    /// Address the receiver is actually bound to (useful with port `0`).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Blocking loop that accepts TCP connections and spawns a handler thread for
    /// each of them.
    pub fn receive_loop(self, service: Arc<StockService>) -> Result<()> {
        info!("Request TCP server is started on {}", self.socket.local_addr()?);

        for stream in self.socket.incoming() {
            match stream {
                Ok(stream) => {
                    let service = Arc::clone(&service);
                    let spawned = thread::Builder::new()
                        .name(String::from("stock-connection"))
                        .spawn(move || {
                            let peer = stream.peer_addr().ok();
                            if let Err(e) = handle_connection(stream, &service) {
                                error!("Connection {:?} failed: {}", peer, e);
                            }
                        });
                    if let Err(e) = spawned {
                        error!("Failed to spawn connection thread: {}", e);
                    }
                }
                Err(e) => error!("TCP connection error: {}", e),
            }
        }
        Ok(())
    }
}

/// Serve one client connection until it closes.
///
/// Frames that fail to decode, including frames that are not valid UTF-8, get a
/// `bad_request` response and the connection stays open. A frame longer than
/// `MAX_FRAME_BYTES` also gets `bad_request`; the rest of that frame is discarded and
/// the connection is closed since the client is not speaking the protocol.
pub fn handle_connection(stream: TcpStream, service: &StockService) -> Result<()> {
    let peer = stream.peer_addr()?;
    debug!("Client connected: {}", peer);

    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    let mut frame = Vec::new();

    loop {
        frame.clear();
        let size = read_frame(&mut reader, &mut frame)?;
        if size == 0 {
            break;
        }
        if size > MAX_FRAME_BYTES && !frame.ends_with(b"\n") {
            warn!("Frame from {} exceeds {} bytes", peer, MAX_FRAME_BYTES);
            let response = Response::error(
                ErrorCode::BadRequest,
                format!("frame exceeds {} bytes", MAX_FRAME_BYTES),
            );
            writer.write_all(&response.to_frame()?)?;
            discard_frame(&mut reader, &mut frame)?;
            writer.shutdown(Shutdown::Both)?;
            return Err(StockError::Format(format!("oversized frame from {}", peer)));
        }

        let payload = frame.trim_ascii();
        if payload.is_empty() {
            continue;
        }

        let response = match serde_json::from_slice::<Request>(payload) {
            Ok(request) => {
                debug!("Received {:?} for {} from {}", request, request.name(), peer);
                service.handle(request)
            }
            Err(e) => {
                warn!(
                    "Undecodable frame from {}: {} ({})",
                    peer,
                    e,
                    String::from_utf8_lossy(payload)
                );
                Response::error(ErrorCode::BadRequest, format!("invalid request: {}", e))
            }
        };
        writer.write_all(&response.to_frame()?)?;
    }

    debug!("Client disconnected: {}", peer);
    Ok(())
}

/// Read at most `MAX_FRAME_BYTES + 1` bytes up to and including the next newline.
fn read_frame<R: BufRead>(reader: &mut R, frame: &mut Vec<u8>) -> Result<usize> {
    Ok(reader
        .by_ref()
        .take(MAX_FRAME_BYTES as u64 + 1)
        .read_until(b'\n', frame)?)
}

/// Skip the remainder of an oversized frame, up to `MAX_DISCARD_FRAMES` chunks.
fn discard_frame<R: BufRead>(reader: &mut R, scratch: &mut Vec<u8>) -> Result<()> {
    for _ in 0..MAX_DISCARD_FRAMES {
        scratch.clear();
        if read_frame(reader, scratch)? == 0 || scratch.ends_with(b"\n") {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_frame_keeps_raw_bytes() {
        let mut reader = Cursor::new(b"\xff\xfe garbage\n{}\n".to_vec());
        let mut frame = Vec::new();
        assert_eq!(read_frame(&mut reader, &mut frame).unwrap(), 11);
        assert_eq!(frame, b"\xff\xfe garbage\n");

        frame.clear();
        read_frame(&mut reader, &mut frame).unwrap();
        assert_eq!(frame, b"{}\n");
    }

    #[test]
    fn read_frame_stops_past_the_limit() {
        let mut data = vec![b'a'; MAX_FRAME_BYTES * 2];
        data.extend_from_slice(b"\n{}\n");
        let mut reader = Cursor::new(data);
        let mut frame = Vec::new();

        assert_eq!(
            read_frame(&mut reader, &mut frame).unwrap(),
            MAX_FRAME_BYTES + 1
        );
        discard_frame(&mut reader, &mut frame).unwrap();

        frame.clear();
        read_frame(&mut reader, &mut frame).unwrap();
        assert_eq!(frame, b"{}\n");
    }
}
