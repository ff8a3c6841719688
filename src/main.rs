use connect4_gamer::config::GamerConfig;
use connect4_gamer::display::render_board;
use connect4_gamer::network::{start_server, NetworkClient};
use connect4_gamer::{Board, HttpScorer, MoveSelector};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage:
  connect4-gamer serve [listen-addr]
  connect4-gamer ask <board> <player> [server-addr]

<board> is 42 cells bottom row first, either as digits (\"000...\") or comma separated.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = GamerConfig::load_or_default();

    match args.first().map(String::as_str) {
        Some("serve") | None => {
            let addr = args.get(1).cloned().unwrap_or(config.listen_addr.clone());
            run_server(&config, &addr).await
        }
        Some("ask") => {
            let (Some(board), Some(player)) = (args.get(1), args.get(2)) else {
                anyhow::bail!("{}", USAGE);
            };
            let addr = args.get(3).cloned().unwrap_or(config.listen_addr.clone());
            run_client(&addr, board, player).await
        }
        Some(_) => anyhow::bail!("{}", USAGE),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_server(config: &GamerConfig, addr: &str) -> anyhow::Result<()> {
    let scorer = HttpScorer::from_config(&config.scoring)?;
    tracing::info!(
        endpoint = scorer.endpoint(),
        timeout_secs = config.scoring.timeout_secs,
        "scoring service configured"
    );
    let selector = Arc::new(MoveSelector::new(scorer));
    start_server(addr, selector).await
}

async fn run_client(addr: &str, board: &str, player: &str) -> anyhow::Result<()> {
    let board = parse_board_arg(board)?;
    let player: i64 = player.parse()?;

    if let Ok(parsed) = Board::from_wire(&board) {
        print!("{}", render_board(&parsed, true));
    }

    let mut client = NetworkClient::connect(addr).await?;
    let column = client.request_move(&board, player).await?;
    println!("{}", column);
    Ok(())
}

fn parse_board_arg(arg: &str) -> anyhow::Result<Vec<i64>> {
    if arg.contains(',') {
        arg.split(',')
            .map(|s| s.trim().parse::<i64>().map_err(anyhow::Error::from))
            .collect()
    } else {
        arg.chars()
            .map(|ch| {
                ch.to_digit(10)
                    .map(i64::from)
                    .ok_or_else(|| anyhow::anyhow!("invalid cell {:?}", ch))
            })
            .collect()
    }
}
