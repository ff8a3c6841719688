use crate::network::protocol::{MoveRequest, MoveResponse};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

pub struct NetworkClient {
    stream: BufReader<TcpStream>,
}

impl NetworkClient {
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            stream: BufReader::new(stream),
        })
    }

    /// Sends one request and waits for its column (-1 = no move).
    pub async fn request_move(&mut self, board: &[i64], player: i64) -> anyhow::Result<i8> {
        let request = MoveRequest {
            board: board.to_vec(),
            player,
        };
        let json = serde_json::to_string(&request)? + "\n";
        self.stream.get_mut().write_all(json.as_bytes()).await?;

        let mut line = String::new();
        if self.stream.read_line(&mut line).await? == 0 {
            anyhow::bail!("server closed the connection");
        }
        let response: MoveResponse = serde_json::from_str(&line)?;
        Ok(response.column)
    }
}
