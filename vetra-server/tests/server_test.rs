use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use vetra_catalog::{seed, InventoryStore};
use vetra_ledger::BookingService;
use vetra_server::{serve, ConnectionSettings};

async fn start_server() -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let store = Arc::new(InventoryStore::new(seed::catalog()));
    let service = Arc::new(BookingService::new(store));
    let settings = ConnectionSettings {
        read_timeout: Duration::from_secs(5),
        recv_buffer_bytes: 4096,
    };

    tokio::spawn(async move {
        let _ = serve(listener, service, settings).await;
    });

    addr
}

/// Send one JSON message and read back one JSON response, accumulating
/// reads until the buffer parses (responses carry no framing either).
async fn call(stream: &mut TcpStream, request: Value) -> Value {
    stream
        .write_all(request.to_string().as_bytes())
        .await
        .unwrap();

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "server closed the connection mid-response");
        buf.extend_from_slice(&chunk[..n]);
        if let Ok(value) = serde_json::from_slice::<Value>(&buf) {
            return value;
        }
    }
}

#[tokio::test]
async fn test_listing_and_booking_over_tcp() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let buses = call(&mut stream, json!({"action": "get_buses"})).await;
    assert_eq!(buses["status"], "success");
    assert_eq!(buses["data"].as_array().unwrap().len(), 3);

    let booked = call(
        &mut stream,
        json!({
            "action": "book_bus",
            "bus_id": "XE001",
            "seats": 5,
            "customer": {"name": "Anh", "phone": "0901234567"},
        }),
    )
    .await;
    assert_eq!(booked["status"], "success");
    assert_eq!(booked["booking_info"]["seats"], json!([1, 2, 3, 4, 5]));
    assert_eq!(booked["booking_info"]["total_price"], 600000);

    // Availability reflects the booking on the same connection.
    let buses = call(&mut stream, json!({"action": "get_buses"})).await;
    let xe001 = buses["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == "XE001")
        .unwrap();
    assert_eq!(xe001["available_seats"], 35);

    // Cancel refunds the full price and restores availability.
    let booking_id = booked["booking_info"]["booking_id"].as_str().unwrap();
    let cancelled = call(&mut stream, json!({"action": "cancel_booking", "booking_id": booking_id})).await;
    assert_eq!(cancelled["status"], "success");
    assert_eq!(cancelled["refund_amount"], 600000);

    let buses = call(&mut stream, json!({"action": "get_buses"})).await;
    let xe001 = buses["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == "XE001")
        .unwrap();
    assert_eq!(xe001["available_seats"], 40);
}

#[tokio::test]
async fn test_bad_requests_keep_the_session_alive() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    // Undecodable payload.
    stream.write_all(b"this is not json").await.unwrap();
    let mut chunk = [0u8; 4096];
    let n = stream.read(&mut chunk).await.unwrap();
    let response: Value = serde_json::from_slice(&chunk[..n]).unwrap();
    assert_eq!(response["status"], "error");

    // Unknown action.
    let response = call(&mut stream, json!({"action": "teleport"})).await;
    assert_eq!(response["status"], "error");

    // Missing required fields.
    let response = call(&mut stream, json!({"action": "book_movie", "movie_id": "PHIM001"})).await;
    assert_eq!(response["status"], "error");

    // The same connection still serves good requests.
    let response = call(&mut stream, json!({"action": "get_movies"})).await;
    assert_eq!(response["status"], "success");
    assert_eq!(response["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_connections_share_one_inventory() {
    let addr = start_server().await;
    let mut first = TcpStream::connect(addr).await.unwrap();
    let mut second = TcpStream::connect(addr).await.unwrap();

    let booked = call(
        &mut first,
        json!({
            "action": "book_movie",
            "movie_id": "PHIM002",
            "seats": 11,
            "customer": {"name": "Chi", "phone": "0777"},
        }),
    )
    .await;
    assert_eq!(booked["status"], "success");
    assert_eq!(booked["booking_info"]["seats"][0], "A1");
    assert_eq!(booked["booking_info"]["seats"][10], "B1");

    // The other connection sees the booking.
    let movies = call(&mut second, json!({"action": "get_movies"})).await;
    let phim002 = movies["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == "PHIM002")
        .unwrap();
    assert_eq!(phim002["available_seats"], 80 - 11);

    let listed = call(&mut second, json!({"action": "get_bookings", "customer_phone": "0777"})).await;
    assert_eq!(listed["count"], 1);
    assert_eq!(
        listed["data"][0]["booking_id"],
        booked["booking_info"]["booking_id"]
    );
}

#[tokio::test]
async fn test_concurrent_clients_never_oversell() {
    let addr = start_server().await;

    // XE003 has 30 seats; 20 clients each try to book 3.
    let mut handles = Vec::new();
    for _ in 0..20 {
        handles.push(tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            let response = call(
                &mut stream,
                json!({
                    "action": "book_bus",
                    "bus_id": "XE003",
                    "seats": 3,
                    "customer": {"name": "Race", "phone": "0123"},
                }),
            )
            .await;
            response["status"] == "success"
        }));
    }

    let mut wins = 0;
    for handle in handles {
        if handle.await.unwrap() {
            wins += 1;
        }
    }
    assert_eq!(wins, 10);

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let buses = call(&mut stream, json!({"action": "get_buses"})).await;
    let xe003 = buses["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == "XE003")
        .unwrap();
    assert_eq!(xe003["available_seats"], 0);
}
