use super::messages::{InboundEvent, StreamingRequest, StreamingResponse};
use super::Transport;
use crate::error::StreamError;
use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{info, warn};
use url::Url;

/// Inbound events buffered between the reader task and the router.
const INBOUND_CHANNEL_CAPACITY: usize = 32;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Duplex WebSocket connection to the recognition service.
///
/// `connect` splits the stream: the returned transport owns the outbound
/// half, while a spawned reader task turns the inbound half into
/// [`InboundEvent`]s on a bounded channel.
pub struct WsTransport {
    write: WsSink,
}

impl WsTransport {
    pub async fn connect(
        endpoint: &str,
        api_key: Option<&str>,
    ) -> Result<(Self, mpsc::Receiver<InboundEvent>), StreamError> {
        let mut url = Url::parse(endpoint).map_err(|e| StreamError::Connection {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        if let Some(key) = api_key {
            url.query_pairs_mut().append_pair("token", key);
        }

        // Log the bare endpoint, not the URL carrying the token
        info!("Connecting to {}", endpoint);

        let (ws_stream, _) =
            connect_async(url.to_string())
                .await
                .map_err(|e| StreamError::Connection {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                })?;

        info!("Connected to {}", endpoint);

        let (write, read) = ws_stream.split();
        let (tx, rx) = mpsc::channel(INBOUND_CHANNEL_CAPACITY);

        tokio::spawn(read_loop(read, tx));

        Ok((Self { write }, rx))
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, request: StreamingRequest) -> Result<(), StreamError> {
        let payload = serde_json::to_string(&request).map_err(|e| StreamError::Transport {
            message: format!("failed to encode outbound message: {}", e),
        })?;

        self.write
            .send(Message::Text(payload))
            .await
            .map_err(|e| StreamError::StreamClosed {
                message: e.to_string(),
            })
    }

    async fn close(&mut self) -> Result<(), StreamError> {
        self.write
            .close()
            .await
            .map_err(|e| StreamError::StreamClosed {
                message: e.to_string(),
            })
    }
}

/// Reader task: translates inbound WebSocket frames into events until the
/// stream terminates. Sends at most one terminal event, then exits, so
/// nothing is ever delivered after an error or end-of-stream.
async fn read_loop(mut read: WsSource, tx: mpsc::Sender<InboundEvent>) {
    while let Some(msg) = read.next().await {
        let event = match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<StreamingResponse>(&text) {
                Ok(response) => InboundEvent::Message(response),
                Err(e) => {
                    warn!("Failed to parse inbound message: {}", e);
                    continue;
                }
            },
            Ok(Message::Binary(bytes)) => match serde_json::from_slice::<StreamingResponse>(&bytes)
            {
                Ok(response) => InboundEvent::Message(response),
                Err(e) => {
                    warn!("Failed to parse inbound message: {}", e);
                    continue;
                }
            },
            Ok(Message::Close(_)) => InboundEvent::End,
            Ok(_) => continue, // ping/pong
            Err(e) => InboundEvent::Error(StreamError::Transport {
                message: e.to_string(),
            }),
        };

        let terminal = matches!(event, InboundEvent::End | InboundEvent::Error(_));

        if tx.send(event).await.is_err() {
            // Router went away; nothing left to deliver to
            return;
        }

        if terminal {
            return;
        }
    }

    // Stream ended without a close frame
    let _ = tx.send(InboundEvent::End).await;
}
