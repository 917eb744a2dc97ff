//! Websocket transport for the realtime feed
//!
//! A worker thread owns the socket. Room commands reach it over a channel;
//! inbound frames and connection changes go out through a callback.
//!
//! Frames are plain JSON text, `{"event": "<name>", "data": <payload>}`. This
//! is not the socket.io protocol: there is no engine.io handshake, no packet
//! type prefix and no acks. The client only talks to a server that exposes
//! this framing on its websocket endpoint, not to a stock socket.io server.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use sms::{RealtimeEvent, RoomCommand, RoomTransport};
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message as WsMessage, WebSocket, connect};

/// How often the worker polls for commands while connected
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Pause between connection attempts
const RETRY_DELAY: Duration = Duration::from_secs(3);

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;

/// Handle to the worker; dropping it stops the worker
pub struct WsTransport {
    commands: mpsc::Sender<RoomCommand>,
}

impl RoomTransport for WsTransport {
    fn send(&self, command: &RoomCommand) -> Result<()> {
        self.commands
            .send(command.clone())
            .context("Realtime worker has stopped")
    }
}

/// Start the worker for `url`, delivering events to `on_event`
pub fn spawn<F>(url: String, on_event: F) -> WsTransport
where
    F: Fn(RealtimeEvent) + Send + 'static,
{
    let (commands, command_rx) = mpsc::channel();
    thread::spawn(move || Worker::new(url, command_rx, on_event).run());
    WsTransport { commands }
}

struct Worker<F> {
    url: String,
    commands: mpsc::Receiver<RoomCommand>,
    on_event: F,
    socket: Option<Socket>,
    next_attempt: Instant,
}

impl<F: Fn(RealtimeEvent)> Worker<F> {
    fn new(url: String, commands: mpsc::Receiver<RoomCommand>, on_event: F) -> Self {
        Self {
            url,
            commands,
            on_event,
            socket: None,
            next_attempt: Instant::now(),
        }
    }

    fn run(mut self) {
        loop {
            if self.socket.is_none() && Instant::now() >= self.next_attempt {
                self.try_connect();
            }

            match self.commands.recv_timeout(POLL_INTERVAL) {
                Ok(command) => self.send_command(&command),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }

            self.poll_inbound();
        }

        if let Some(mut socket) = self.socket.take() {
            let _ = socket.close(None);
        }
        debug!("Realtime worker stopped");
    }

    fn try_connect(&mut self) {
        debug!("Connecting to {}", self.url);
        match connect(self.url.as_str()) {
            Ok((socket, _response)) => {
                if let MaybeTlsStream::Plain(stream) = socket.get_ref()
                    && let Err(e) = stream.set_nonblocking(true)
                {
                    warn!("Failed to make realtime socket non-blocking: {}", e);
                }
                info!("Realtime socket open: {}", self.url);
                self.socket = Some(socket);
                (self.on_event)(RealtimeEvent::Connect);
            }
            Err(e) => {
                debug!("Realtime connect failed: {}", e);
                self.next_attempt = Instant::now() + RETRY_DELAY;
            }
        }
    }

    fn send_command(&mut self, command: &RoomCommand) {
        let Some(socket) = self.socket.as_mut() else {
            debug!("Not connected, dropping {:?}", command);
            return;
        };

        let frame = match command.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to encode {:?}: {}", command, e);
                return;
            }
        };

        if let Err(e) = socket.send(WsMessage::text(frame))
            && !would_block(&e)
        {
            warn!("Realtime send failed: {}", e);
            self.drop_socket();
        }
    }

    fn poll_inbound(&mut self) {
        loop {
            let Some(socket) = self.socket.as_mut() else {
                return;
            };

            match socket.read() {
                Ok(WsMessage::Text(text)) => match RealtimeEvent::from_frame(text.as_str()) {
                    Ok(event) => (self.on_event)(event),
                    Err(e) => debug!("Ignoring realtime frame: {} ({})", text.as_str(), e),
                },
                Ok(WsMessage::Close(_)) => {
                    info!("Realtime socket closed by server");
                    self.drop_socket();
                    return;
                }
                Ok(_) => {}
                Err(e) if would_block(&e) => {
                    // Push out anything a previous send left buffered
                    if let Err(e) = socket.flush()
                        && !would_block(&e)
                    {
                        warn!("Realtime flush failed: {}", e);
                        self.drop_socket();
                    }
                    return;
                }
                Err(e) => {
                    warn!("Realtime read failed: {}", e);
                    self.drop_socket();
                    return;
                }
            }
        }
    }

    fn drop_socket(&mut self) {
        self.socket = None;
        self.next_attempt = Instant::now() + RETRY_DELAY;
        (self.on_event)(RealtimeEvent::Disconnect);
    }
}

fn would_block(e: &tungstenite::Error) -> bool {
    matches!(e, tungstenite::Error::Io(io) if io.kind() == std::io::ErrorKind::WouldBlock)
}
