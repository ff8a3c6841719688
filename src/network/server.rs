use crate::core::{Board, Move};
use crate::display::render_board;
use crate::network::protocol::{MoveRequest, MoveResponse};
use crate::scoring::Scorer;
use crate::selector::MoveSelector;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// 1 リクエスト行の上限 (改行を含まない)
pub const MAX_LINE_BYTES: usize = 16 * 1024;

pub async fn start_server<S>(addr: &str, selector: Arc<MoveSelector<S>>) -> anyhow::Result<()>
where
    S: Scorer + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "move service ready");
    serve(listener, selector).await
}

/// Accept loop. Each connection gets its own task; the selector is shared
/// read-only.
pub async fn serve<S>(listener: TcpListener, selector: Arc<MoveSelector<S>>) -> anyhow::Result<()>
where
    S: Scorer + 'static,
{
    loop {
        let (socket, peer) = listener.accept().await?;
        let selector = Arc::clone(&selector);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, selector).await {
                tracing::warn!(%peer, error = %e, "connection closed with error");
            }
        });
    }
}

async fn handle_connection<S: Scorer>(
    mut socket: TcpStream,
    selector: Arc<MoveSelector<S>>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.split();
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        let limit = MAX_LINE_BYTES as u64 + 1;
        if (&mut reader).take(limit).read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        let oversized = line.last() != Some(&b'\n') && line.len() > MAX_LINE_BYTES;
        if oversized {
            // the rest of the line is still unread, so the stream can't be resynced
            tracing::warn!(limit = MAX_LINE_BYTES, "move request line too long, closing");
            write_response(&mut writer, Move::NONE).await?;
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let mv = match serde_json::from_slice::<MoveRequest>(&line) {
            Ok(request) => handle_request(&selector, &request).await,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable move request");
                Move::NONE
            }
        };
        write_response(&mut writer, mv).await?;
    }
    Ok(())
}

async fn write_response<W>(writer: &mut W, mv: Move) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(&MoveResponse::from(mv))? + "\n";
    writer.write_all(json.as_bytes()).await?;
    Ok(())
}

async fn handle_request<S: Scorer>(selector: &MoveSelector<S>, request: &MoveRequest) -> Move {
    if tracing::enabled!(tracing::Level::DEBUG) {
        if let Ok(board) = Board::from_wire(&request.board) {
            tracing::debug!(
                player = request.player,
                "new move request\n{}",
                render_board(&board, true)
            );
        }
    }

    let mv = selector.select_move(&request.board, request.player).await;
    tracing::info!(player = request.player, column = mv.to_wire(), "best move: {}", mv);
    mv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, CELLS};
    use crate::network::client::NetworkClient;
    use crate::scoring::{ScoreMap, ScoringUnavailable};
    use std::net::SocketAddr;

    /// Prefers column 5, then 2; anything else unscored.
    struct FixedScorer;

    #[async_trait::async_trait]
    impl Scorer for FixedScorer {
        async fn fetch_scores(
            &self,
            _encoded_board: &str,
            _player: PlayerId,
        ) -> Result<ScoreMap, ScoringUnavailable> {
            Ok([(5, 2.0), (2, 1.0)].into_iter().collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    async fn spawn_server() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let selector = Arc::new(MoveSelector::new(FixedScorer));
        tokio::spawn(serve(listener, selector));
        addr
    }

    #[tokio::test]
    async fn test_answers_requests_in_order() {
        let addr = spawn_server().await;
        let mut client = NetworkClient::connect(&addr.to_string()).await.unwrap();

        let empty = vec![0; CELLS];
        assert_eq!(client.request_move(&empty, 1).await.unwrap(), 5);

        // column 5 full: falls back to 2
        let mut board = Board::new();
        for _ in 0..6 {
            board.drop_piece(5, PlayerId::Player2);
        }
        assert_eq!(client.request_move(&board.to_wire(), 2).await.unwrap(), 2);

        // malformed board
        assert_eq!(client.request_move(&[0; 10], 1).await.unwrap(), -1);
    }

    async fn read_column(lines: &mut tokio::io::Lines<BufReader<TcpStream>>) -> Option<i8> {
        let line = lines.next_line().await.unwrap()?;
        let response: MoveResponse = serde_json::from_str(&line).unwrap();
        Some(response.column)
    }

    #[tokio::test]
    async fn test_garbage_line_gets_sentinel() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(b"hello\n").await.unwrap();

        let mut lines = BufReader::new(stream).lines();
        assert_eq!(read_column(&mut lines).await, Some(-1));
    }

    #[tokio::test]
    async fn test_invalid_utf8_keeps_connection_open() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = serde_json::to_string(&MoveRequest {
            board: vec![0; CELLS],
            player: 1,
        })
        .unwrap();
        stream.write_all(b"\xff\xfe\n").await.unwrap();
        stream.write_all(format!("{}\n", request).as_bytes()).await.unwrap();

        let mut lines = BufReader::new(stream).lines();
        assert_eq!(read_column(&mut lines).await, Some(-1));
        assert_eq!(read_column(&mut lines).await, Some(5));
    }

    #[tokio::test]
    async fn test_oversized_line_closes_connection() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();
        // exactly one byte over the limit, no newline
        stream
            .write_all(&vec![b'a'; MAX_LINE_BYTES + 1])
            .await
            .unwrap();

        let mut lines = BufReader::new(stream).lines();
        assert_eq!(read_column(&mut lines).await, Some(-1));
        assert_eq!(read_column(&mut lines).await, None);
    }
}
