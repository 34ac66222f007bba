#[cfg_attr(not(feature = "audio"), allow(dead_code))]
mod audio;
mod cli;
mod config;
mod core;
mod error;
mod logging;
mod models;
mod sources;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    let cfg = config::load_config();

    let log_guard = match logging::init_logging(&cfg.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("로그 초기화 실패: {:#}", e);
            None
        }
    };

    if let Err(e) = cli::run(cli, cfg) {
        tracing::error!(error = ?e, "명령 실패");
        eprintln!("오류: {:#}", e);
        drop(log_guard);
        std::process::exit(1);
    }
}
