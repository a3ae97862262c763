use anyhow::Context;
use bridge::routes::HttpBridge;
use clap::Parser;
use generator::batch::build_detections;
use log::info;
use parkcore::analysis::LowConfidenceSelector;
use parkcore::ParkingAgent;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::AgentConfig;
use workflow::curator::Curator;

mod bridge;
mod generator;
mod search;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Parking scan agent: summaries, scan log and daily stats")]
struct Args {
    /// Load the agent config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,
    /// Unsplash access key used for low-confidence image lookups
    #[arg(long, env = "UNSPLASH_KEY", hide_env_values = true)]
    unsplash_key: Option<String>,
    #[arg(long, default_value_t = 3)]
    images_per_query: usize,
    /// Push one synthetic scan through the agent and print the results
    #[arg(long, default_value_t = false)]
    demo: bool,
    /// Serve the HTTP endpoints until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = args.config {
        AgentConfig::load(path)?
    } else {
        AgentConfig::from_args(args.bind, None, args.images_per_query)
    };
    if config.unsplash_key.is_none() {
        config.unsplash_key = args.unsplash_key;
    }

    let agent = Arc::new(
        ParkingAgent::default()
            .with_selector(LowConfidenceSelector::new(config.low_confidence_threshold)),
    );
    let curator = Curator::new(&config)?;
    let bridge = HttpBridge::new(agent.clone(), curator.clone());

    if args.demo {
        let detections = build_detections(&config.demo);
        let record = agent.ingest(
            config.demo.user.clone(),
            config.demo.filename.clone(),
            detections.clone(),
        );
        let summary = agent.summarize(&detections);
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for image curation")?;
        let curated = runtime.block_on(curator.curate(summary.low_confidence.clone()));
        let stats = agent.daily_stats();

        println!(
            "Demo scan by {} ({}) -> {} spots, {} available, {} occupied ({:.1}%)",
            record.user(),
            record.filename(),
            detections.len(),
            summary.occupancy.num_available,
            summary.occupancy.num_occupied,
            summary.occupancy.percent_occupied
        );
        println!("Summary: {}", summary.occupancy.summary);
        for spot in &curated {
            println!(
                "  low confidence -> '{}' ({} images)",
                spot.searched_query,
                spot.fetched_images.len()
            );
        }
        println!(
            "Today: scans={} lowConf={} avgConf={} statuses={:?}",
            stats.scans_today, stats.low_conf, stats.avg_conf, stats.top_statuses
        );
    }
    if args.serve {
        let _server = bridge.serve(config.bind)?;
        bridge.publish_status("HTTP endpoints running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
        info!("shutting down");
    }

    Ok(())
}
