//! Client-side connection handling.
//!
//! The GUI never blocks on the network: messages are received on a
//! background task and handed over through a channel that `poll` drains
//! once per frame. A connection error is delivered through the same channel,
//! once, when the stream dies.

use self::message::{DownMessage, UpMessage};
use anyhow::{anyhow, bail, Result};
use crossbeam_channel::{
    Receiver,
    Sender,
    TryRecvError,
    unbounded,
};
use futures::{SinkExt, StreamExt};
use tokio::{
    runtime::Handle,
    sync::mpsc::{
        UnboundedSender as TokioUnboundedSender,
        UnboundedReceiver as TokioUnboundedReceiver,
        unbounded_channel as tokio_unbounded_channel,
    },
};
use tokio_tungstenite::{
    connect_async,
    tungstenite::Message as WsMessage,
};
use url::Url;


pub mod message;


pub const DEFAULT_PORT: u16 = 35100;


#[derive(Debug)]
enum UpSender {
    Ws(TokioUnboundedSender<UpMessage>),
    Local(Sender<UpMessage>),
}

/// Handle to the game server. Owned by the game handler; polled every frame.
#[derive(Debug)]
pub struct Connection {
    send_up: UpSender,
    recv_down: Receiver<Result<DownMessage>>,
    closed: bool,
}

impl Connection {
    /// Asynchronously begin connecting to a websocket server and return
    /// immediately. Connect errors arrive through `poll` like any other
    /// connection error.
    pub fn connect(address: &str, rt: &Handle) -> Self {
        let (send_up, recv_up) = tokio_unbounded_channel();
        let (send_down, recv_down) = unbounded();

        let address = address.to_owned();
        rt.spawn(async move {
            if let Err(e) = run_connection(address, &send_down, recv_up).await {
                let _ = send_down.send(Err(e));
            }
        });

        Connection {
            send_up: UpSender::Ws(send_up),
            recv_down,
            closed: false,
        }
    }

    /// An in-process connection pair: the returned `ServerEnd` plays the
    /// server role over plain channels. Used by tests and local sessions.
    pub fn loopback() -> (Self, ServerEnd) {
        let (send_up, recv_up) = unbounded();
        let (send_down, recv_down) = unbounded();
        let connection = Connection {
            send_up: UpSender::Local(send_up),
            recv_down,
            closed: false,
        };
        let server = ServerEnd {
            recv_up,
            send_down,
        };
        (connection, server)
    }

    /// Queue a message for sending; never blocks. Messages sent after the
    /// connection died are dropped silently; the death itself is reported
    /// through `poll`.
    pub fn send(&mut self, msg: UpMessage) {
        match &self.send_up {
            UpSender::Ws(sender) => {
                let _ = sender.send(msg);
            }
            UpSender::Local(sender) => {
                let _ = sender.send(msg);
            }
        }
    }

    /// Check for a received message without blocking.
    ///
    /// Returns `Ok(None)` when nothing is pending. A connection failure is
    /// returned as `Err` exactly once; after that the connection reports
    /// `Ok(None)` forever.
    pub fn poll(&mut self) -> Result<Option<DownMessage>> {
        if self.closed {
            return Ok(None);
        }
        match self.recv_down.try_recv() {
            Ok(Ok(msg)) => Ok(Some(msg)),
            Ok(Err(e)) => {
                self.closed = true;
                Err(e)
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                Err(anyhow!("connection closed"))
            }
        }
    }
}

/// The server side of a loopback connection.
#[derive(Debug)]
pub struct ServerEnd {
    recv_up: Receiver<UpMessage>,
    send_down: Sender<Result<DownMessage>>,
}

impl ServerEnd {
    /// Deliver a message to the client. Returns false if the client side was
    /// dropped.
    pub fn send(&self, msg: DownMessage) -> bool {
        self.send_down.send(Ok(msg)).is_ok()
    }

    /// Take the next command the client sent, if any.
    pub fn try_recv(&self) -> Option<UpMessage> {
        self.recv_up.try_recv().ok()
    }
}

fn normalize_address(address: &str) -> Result<Url> {
    let mut url = match Url::parse(address) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("ws://{}", address))?
        }
        Err(e) => return Err(e.into()),
    };
    if url.port().is_none() {
        let _ = url.set_port(Some(DEFAULT_PORT));
    }
    Ok(url)
}

async fn run_connection(
    address: String,
    send_down: &Sender<Result<DownMessage>>,
    mut recv_up: TokioUnboundedReceiver<UpMessage>,
) -> Result<()> {
    let url = normalize_address(&address)?;
    info!("connecting to {}", url);

    let (ws, _) = connect_async(url.as_str()).await?;
    let (mut ws_send, mut ws_recv) = ws.split();

    loop {
        tokio::select! {
            up = recv_up.recv() => match up {
                Some(msg) => {
                    let buf = bincode::serialize(&msg)?;
                    trace!(?msg, "sending up {} bytes", buf.len());
                    ws_send.send(WsMessage::Binary(buf)).await?;
                }
                // the Connection handle was dropped
                None => return Ok(()),
            },
            down = ws_recv.next() => {
                let ws_msg = down
                    .ok_or_else(|| anyhow!("connection closing (stream ended)"))??;
                match ws_msg {
                    WsMessage::Binary(buf) => {
                        let msg = bincode::deserialize(&buf)?;
                        let _ = send_down.send(Ok(msg));
                    }
                    WsMessage::Ping(_) | WsMessage::Pong(_) => {}
                    WsMessage::Text(_) => bail!("receipt of ws text message"),
                    WsMessage::Close(_) => {
                        bail!("connection closing (received close frame)")
                    }
                    WsMessage::Frame(_) => unreachable!(),
                }
            }
        }
    }
}
