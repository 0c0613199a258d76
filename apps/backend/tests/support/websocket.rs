// WebSocket test utilities

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use bubble_backend::middleware::request_trace::RequestTrace;
use bubble_backend::middleware::structured_logger::StructuredLogger;
use bubble_backend::middleware::trace_span::TraceSpan;
use bubble_backend::routes;
use bubble_backend::state::app_state::AppState;
use bubble_backend::ws::hub::RoomRegistry;

/// A running server bound to a random local port.
pub struct TestServer {
    pub handle: ServerHandle,
    pub addr: SocketAddr,
    pub join: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
        let _ = self.join.await;
    }
}

/// Start a real HTTP server with the production routes so tests can connect
/// with tokio-tungstenite.
pub async fn start_test_server(state: AppState) -> Result<TestServer, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let state_data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);

    Ok(TestServer { handle, addr, join })
}

pub async fn wait_for_connections(
    rooms: &RoomRegistry,
    expected: usize,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = tokio::time::Instant::now();
    loop {
        if rooms.active_connections_count() == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!(
                "timeout waiting for active_connections_count == {expected} (got {})",
                rooms.active_connections_count()
            )
            .into());
        }
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
