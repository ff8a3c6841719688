use super::{parse_scores, ScoreMap, Scorer, ScoringUnavailable};
use crate::config::ScoringConfig;
use crate::core::PlayerId;
use std::time::Duration;

/// Scoring over HTTP: `GET <endpoint>?board_data=<42 digits>&player=<1|2>`.
pub struct HttpScorer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpScorer {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_config(config: &ScoringConfig) -> anyhow::Result<Self> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Scorer for HttpScorer {
    async fn fetch_scores(
        &self,
        encoded_board: &str,
        player: PlayerId,
    ) -> Result<ScoreMap, ScoringUnavailable> {
        let player = player.as_wire().to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("board_data", encoded_board), ("player", player.as_str())])
            .send()
            .await
            .map_err(|e| ScoringUnavailable::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringUnavailable::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScoringUnavailable::Transport(e.to_string()))?;
        parse_scores(&body)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// One-shot HTTP server; resolves to the request line it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/getMoves", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let text = String::from_utf8_lossy(&request).to_string();
            text.lines().next().unwrap_or_default().to_string()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn test_fetch_sends_encoded_board_and_player() {
        let (url, server) = serve_once("200 OK", r#"{"0": "1", "1": 2.5, "9": 7}"#).await;
        let scorer = HttpScorer::new(&url, Duration::from_secs(5)).unwrap();

        let encoded = "0".repeat(42);
        let scores = scorer
            .fetch_scores(&encoded, PlayerId::Player2)
            .await
            .unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[&0], 1.0);
        assert_eq!(scores[&1], 2.5);

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /getMoves?"));
        assert!(request_line.contains(&format!("board_data={}", encoded)));
        assert!(request_line.contains("player=2"));
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let (url, _server) = serve_once("500 Internal Server Error", "oops").await;
        let scorer = HttpScorer::new(&url, Duration::from_secs(5)).unwrap();
        let result = scorer.fetch_scores(&"0".repeat(42), PlayerId::Player1).await;
        assert!(matches!(result, Err(ScoringUnavailable::Status(500))));
    }

    #[tokio::test]
    async fn test_garbage_body_is_unavailable() {
        let (url, _server) = serve_once("200 OK", "not json").await;
        let scorer = HttpScorer::new(&url, Duration::from_secs(5)).unwrap();
        let result = scorer.fetch_scores(&"0".repeat(42), PlayerId::Player1).await;
        assert!(matches!(result, Err(ScoringUnavailable::Body(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let scorer =
            HttpScorer::new(&format!("http://{}/getMoves", addr), Duration::from_secs(2)).unwrap();
        let result = scorer.fetch_scores(&"0".repeat(42), PlayerId::Player1).await;
        assert!(matches!(result, Err(ScoringUnavailable::Transport(_))));
    }

    #[tokio::test]
    async fn test_hung_service_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/getMoves", listener.local_addr().unwrap());
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let scorer = HttpScorer::new(&url, Duration::from_millis(200)).unwrap();
        let result = scorer.fetch_scores(&"0".repeat(42), PlayerId::Player1).await;
        assert!(matches!(result, Err(ScoringUnavailable::Transport(_))));
    }
}
