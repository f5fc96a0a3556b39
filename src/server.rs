use std::io;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument};

use crate::commands::Command;
use crate::connection::Connection;
use crate::frame::{self, Frame};
use crate::store::Store;
use crate::Error;

pub async fn run(address: &str, port: u16) -> Result<(), Error> {
    let _ = tracing_subscriber::fmt()
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let listener = TcpListener::bind((address, port)).await?;
    let store = Store::new();

    info!("StateDB server listening on {}", listener.local_addr()?);

    loop {
        let (socket, client_address) = listener.accept().await?;
        let store = store.clone();
        info!("Accepted connection from {:?}", client_address);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, store).await {
                if is_disconnect(&e) {
                    debug!("Client went away: {}", e);
                } else {
                    error!("Connection error: {}", e);
                }
            }
        });
    }
}

#[instrument(name = "connection", skip(stream, store), fields(client_address))]
async fn handle_connection(stream: TcpStream, store: Store) -> Result<(), Error> {
    let mut conn = Connection::new(stream);

    // The connection's identity record owns the peer address; the span reads
    // it from there rather than carrying a second copy.
    if let Some(address) = conn.client_info.address.as_deref() {
        tracing::Span::current().record("client_address", address);
    }

    loop {
        let frame = match conn.read_frame().await {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            // Malformed input is answered with an error reply and the
            // connection continues; buffered garbage is dropped so the next
            // read starts on a fresh frame.
            Err(e) if e.downcast_ref::<frame::Error>().is_some() => {
                debug!("Dropping malformed input: {}", e);
                conn.discard_input();
                conn.write_frame(&Frame::Error("ERR invalid command format".to_string()))
                    .await?;
                continue;
            }
            Err(e) => return Err(e),
        };

        debug!("Received frame from client: {:?}", frame);

        let response = match Command::try_from(frame) {
            Ok(cmd) => cmd.exec(store.clone(), &mut conn.client_info)?,
            Err(e) => Frame::Error(e.to_string()),
        };

        debug!("Sending response to client: {:?}", response);
        conn.write_frame(&response).await?;
    }

    info!("Connection closed");
    Ok(())
}

/// A reset or broken pipe is an ordinary client departure, not a fault.
fn is_disconnect(err: &Error) -> bool {
    matches!(
        err.downcast_ref::<io::Error>().map(io::Error::kind),
        Some(io::ErrorKind::ConnectionReset) | Some(io::ErrorKind::BrokenPipe)
    )
}
