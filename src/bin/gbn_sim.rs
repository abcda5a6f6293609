//! Go-Back-N 仿真
//!
//! 发送端 A 经有损信道向接收端 B 单向传输应用层消息，打印协议统计。

use clap::Parser;
use gbn_sim::net::{AppConfig, ChannelConfig, NetWorld};
use gbn_sim::proto::gbn::{DEFAULT_RTT_UNITS, DEFAULT_SEQ_SPACE, DEFAULT_WINDOW_SIZE, GbnConfig};
use gbn_sim::sim::{SimTime, Simulator};
use gbn_sim::viz::VizLogger;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "gbn-sim", about = "Go-Back-N 仿真：A->B 单向传输，有损/损坏信道")]
struct Args {
    /// 应用层产生的消息总数
    #[arg(long, default_value_t = 10)]
    messages: u64,

    /// 丢包概率 [0, 1]
    #[arg(long, default_value_t = 0.0)]
    loss_prob: f64,

    /// 损坏概率 [0, 1]
    #[arg(long, default_value_t = 0.0)]
    corrupt_prob: f64,

    /// 相邻消息的平均间隔（时间单位）
    #[arg(long, default_value_t = 10.0)]
    mean_interval: f64,

    /// 随机数种子
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// 超时重传时间（时间单位）
    #[arg(long, default_value_t = DEFAULT_RTT_UNITS)]
    rtt: f64,

    /// 发送窗口大小
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// 序号空间大小（至少 窗口大小 + 1）
    #[arg(long, default_value_t = DEFAULT_SEQ_SPACE)]
    seq_space: usize,

    /// 仿真运行到多少时间单位；不填则运行到事件队列为空
    #[arg(long)]
    until: Option<f64>,

    /// 输出信道事件 JSON 文件；不填则不生成
    #[arg(long)]
    viz_json: Option<PathBuf>,

    /// 输出统计 JSON 文件；不填则不生成
    #[arg(long)]
    stats_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    // 信道必然丢包/损坏时重传永不停止，只能跑到指定时间。
    if args.until.is_none() && args.messages > 0 && (args.loss_prob >= 1.0 || args.corrupt_prob >= 1.0) {
        eprintln!("invalid configuration: --until is required when every packet is lost or corrupted");
        return ExitCode::from(2);
    }

    let world = GbnConfig::new(args.rtt, args.window_size, args.seq_space).and_then(|cfg| {
        let chan = ChannelConfig {
            loss_prob: args.loss_prob,
            corrupt_prob: args.corrupt_prob,
            seed: args.seed,
        };
        let app = AppConfig {
            max_messages: args.messages,
            mean_interval: args.mean_interval,
        };
        NetWorld::new(cfg, chan, app)
    });
    let mut world = match world {
        Ok(w) => w,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };

    let mut sim = Simulator::default();
    if args.viz_json.is_some() {
        world.net.viz = Some(VizLogger::default());
    }
    world.start(&mut sim);

    match args.until {
        Some(t) => sim.run_until(SimTime::from_units(t), &mut world),
        None => sim.run(&mut world),
    }

    if let Some(path) = &args.viz_json {
        if let Some(v) = world.net.viz.take() {
            let written = v
                .to_json_pretty()
                .map_err(|e| e.to_string())
                .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
            if let Err(e) = written {
                eprintln!("failed to write {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
            eprintln!("wrote viz events to {}", path.display());
        }
    }

    let summary = world.summary(sim.now());
    if let Some(path) = &args.stats_json {
        let written = serde_json::to_string_pretty(&summary)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            eprintln!("failed to write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    let s = &summary.sender;
    let r = &summary.receiver;
    let c = &summary.channel;
    println!(
        "done @ {:.3}\n  A: offered={}, window_full={}, acks={}, new_acks={}, dup_acks={}, corrupted_acks={}, resent={}\n  B: delivered={}, corrupted={}, acks_sent={}\n  channel: to_layer3={}, lost={}, corrupted={}, to_layer5={}",
        summary.final_time,
        s.messages_offered,
        s.window_full,
        s.total_acks_received,
        s.new_acks,
        s.duplicate_acks,
        s.corrupted_acks,
        s.packets_resent,
        r.packets_received,
        r.corrupted_packets,
        r.acks_sent,
        c.to_layer3,
        c.lost,
        c.corrupted,
        c.to_layer5,
    );

    if let Some(e) = world.net.fatal() {
        eprintln!("simulation aborted: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
