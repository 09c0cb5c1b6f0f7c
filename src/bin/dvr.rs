//! 距离向量路由仿真
//!
//! 读取拓扑、消息与变更文件，逐轮输出路由表与消息投递结果。

use clap::Parser;
use routesim_rs::error::SimError;
use routesim_rs::proto::ProtocolKind;
use routesim_rs::sim::{Scenario, SimOpts, Simulation, write_json, write_text};
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "dvr", about = "距离向量路由仿真：拓扑变更后的路由表与消息投递")]
struct Args {
    /// 初始拓扑文件，每行 `<a> <b> <cost>`
    topology: PathBuf,
    /// 消息文件，每行 `<from> <to> <message>`
    messages: PathBuf,
    /// 变更文件，每行 `<a> <b> <cost>`，cost 为 -999 表示删除链路
    changes: PathBuf,
    /// 输出文件
    #[arg(default_value = "output.txt")]
    output: PathBuf,
    /// 额外把每一轮的快照写成 JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// DV 收敛循环的最大轮数
    #[arg(long, default_value_t = 10_000)]
    max_passes: usize,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!(%err, "仿真失败");
        eprintln!("dvr: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let scenario = Scenario::from_files(&args.topology, &args.messages, &args.changes)?;

    let mut opts = SimOpts::default();
    opts.distance_vector.max_passes = args.max_passes;

    let rounds = Simulation::run(&scenario, ProtocolKind::DistanceVector, &opts)?;
    write_text(&args.output, &rounds)?;
    if let Some(path) = &args.json {
        write_json(path, &rounds)?;
    }
    Ok(())
}
