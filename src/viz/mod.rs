//! 信道事件记录
//!
//! 仿真期间把信道与定时器上的每个动作记成结构化事件，结束后整体写成 JSON 数组，
//! 供离线回放或脚本分析。

mod types;

pub use types::{CorruptField, VizEvent, VizEventKind, VizLogger, VizPacket};
