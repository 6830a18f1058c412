use anyhow::Result;
use minimax_chess::uci::UciHandler;

fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let mut uci = UciHandler::new();
    uci.run()
}
