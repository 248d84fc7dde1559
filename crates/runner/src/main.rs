use bazaar_runner::cli::USAGE;
use bazaar_runner::{Command, SimulationHost, StopReason, parse_args, render_snapshot};
use log::{info, warn};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            eprintln!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let depth = config.display_depth;
    let host = match SimulationHost::new(config) {
        Ok(host) => host,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let stop = host.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping");
            stop.stop();
        }
    });

    let mut snapshots = host.subscribe();
    let renderer = tokio::spawn(async move {
        loop {
            match snapshots.recv().await {
                Ok(snapshot) => println!("{}", render_snapshot(&snapshot, depth)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Console fell behind, skipped {} snapshots", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let report = host.run().await;
    let _ = renderer.await;

    println!(
        "Finished at tick {} (seed {}): price {:.2}, {} trades, {} units traded, {} orders evicted",
        report.final_snapshot.tick,
        report.seed,
        report.final_snapshot.current_price,
        report.stats.trades,
        report.stats.volume,
        report.stats.evicted
    );

    if let StopReason::Fault(e) = report.reason {
        eprintln!("Simulation fault: {}", e);
        std::process::exit(1);
    }
}
