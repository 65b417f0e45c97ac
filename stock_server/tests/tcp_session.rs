use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;

use stock_common::net::MAX_FRAME_BYTES;
use stock_common::{ErrorCode, PriceUpdate, Request, Response, SecurityName};
use stock_server::{PriceLedger, RequestReceiver, StockService};

fn start_server() -> SocketAddr {
    let receiver = RequestReceiver::new("127.0.0.1:0").unwrap();
    let addr = receiver.local_addr().unwrap();
    let service = Arc::new(StockService::new(Arc::new(PriceLedger::new())));
    thread::spawn(move || receiver.receive_loop(service));
    addr
}

struct Session {
    writer: TcpStream,
    reader: BufReader<TcpStream>,
}

impl Session {
    fn connect(addr: SocketAddr) -> Self {
        let writer = TcpStream::connect(addr).unwrap();
        let reader = BufReader::new(writer.try_clone().unwrap());
        Self { writer, reader }
    }

    fn send_raw(&mut self, frame: &[u8]) -> Response {
        self.writer.write_all(frame).unwrap();
        let mut line = String::new();
        self.reader.read_line(&mut line).unwrap();
        serde_json::from_str(&line).unwrap()
    }

    fn call(&mut self, request: Request) -> Response {
        self.send_raw(&request.to_frame().unwrap())
    }

    fn is_closed(&mut self) -> bool {
        let mut line = String::new();
        self.reader.read_line(&mut line).unwrap() == 0
    }
}

fn code(response: &Response) -> Option<ErrorCode> {
    match response {
        Response::Error(payload) => Some(payload.code),
        _ => None,
    }
}

#[test]
fn create_update_get_over_tcp() {
    let mut session = Session::connect(start_server());

    assert_eq!(
        session.call(Request::Create(PriceUpdate::new("X", 10.0))),
        Response::Ok
    );
    assert_eq!(
        session.call(Request::Update(PriceUpdate::new("X", 12.0))),
        Response::Ok
    );
    assert_eq!(
        session.call(Request::Update(PriceUpdate::new("X", 15.0))),
        Response::Ok
    );

    match session.call(Request::Get(SecurityName::new("X"))) {
        Response::Security(snapshot) => {
            assert_eq!(snapshot.prices(), vec![10.0, 12.0, 15.0]);
            assert!(snapshot.is_chronological());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn domain_errors_are_reported_per_request() {
    let mut session = Session::connect(start_server());

    session.call(Request::Create(PriceUpdate::new("AMC", 1.0)));
    let duplicate = session.call(Request::Create(PriceUpdate::new("AMC", 2.0)));
    assert_eq!(code(&duplicate), Some(ErrorCode::AlreadyExists));

    let missing = session.call(Request::Update(PriceUpdate::new("GME", 2.0)));
    assert_eq!(code(&missing), Some(ErrorCode::NotFound));

    let unknown = session.call(Request::Get(SecurityName::new("GME")));
    assert_eq!(code(&unknown), Some(ErrorCode::NotFound));

    let negative = session.call(Request::Update(PriceUpdate::new("AMC", -3.0)));
    assert_eq!(code(&negative), Some(ErrorCode::InvalidArgument));
}

#[test]
fn garbage_frame_keeps_connection_open() {
    let mut session = Session::connect(start_server());

    let garbage = session.send_raw(b"this is not json\n");
    assert_eq!(code(&garbage), Some(ErrorCode::BadRequest));

    let missing_price = session.send_raw(b"{\"op\":\"create\",\"name\":\"AMC\"}\n");
    assert_eq!(code(&missing_price), Some(ErrorCode::BadRequest));

    assert_eq!(
        session.call(Request::Create(PriceUpdate::new("AMC", 1.0))),
        Response::Ok
    );
}

#[test]
fn non_utf8_frame_is_bad_request_and_connection_survives() {
    let mut session = Session::connect(start_server());

    let binary = session.send_raw(b"\xff\xfe garbage\n");
    assert_eq!(code(&binary), Some(ErrorCode::BadRequest));

    assert_eq!(
        session.call(Request::Create(PriceUpdate::new("X", 1.0))),
        Response::Ok
    );
    match session.call(Request::Get(SecurityName::new("X"))) {
        Response::Security(snapshot) => assert_eq!(snapshot.prices(), vec![1.0]),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn oversized_frame_is_bad_request_then_closed() {
    let mut session = Session::connect(start_server());

    let mut frame = vec![b'a'; MAX_FRAME_BYTES * 2];
    frame.push(b'\n');
    let response = session.send_raw(&frame);
    assert_eq!(code(&response), Some(ErrorCode::BadRequest));
    assert!(session.is_closed());
}

#[test]
fn oversized_multibyte_frame_is_still_answered() {
    let mut session = Session::connect(start_server());

    let mut frame = "é".repeat(MAX_FRAME_BYTES).into_bytes();
    frame.push(b'\n');
    let response = session.send_raw(&frame);
    assert_eq!(code(&response), Some(ErrorCode::BadRequest));
    assert!(session.is_closed());
}

#[test]
fn concurrent_clients_share_one_ledger() {
    let addr = start_server();
    Session::connect(addr).call(Request::Create(PriceUpdate::new("X", 0.0)));

    let clients: Vec<_> = (0..4)
        .map(|client| {
            thread::spawn(move || {
                let mut session = Session::connect(addr);
                for i in 0..25 {
                    let price = (client * 100 + i) as f64;
                    assert_eq!(
                        session.call(Request::Update(PriceUpdate::new("X", price))),
                        Response::Ok
                    );
                }
            })
        })
        .collect();
    for client in clients {
        client.join().unwrap();
    }

    match Session::connect(addr).call(Request::Get(SecurityName::new("X"))) {
        Response::Security(snapshot) => {
            assert_eq!(snapshot.history.len(), 1 + 4 * 25);
            assert!(snapshot.is_chronological());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}
