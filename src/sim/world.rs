//! 世界 trait
//!
//! 定义仿真世界接口。

use super::simulator::Simulator;
use std::any::Any;

/// 仿真世界：由业务层实现（例如发送端/接收端/信道）。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn on_tick(&mut self, _sim: &mut Simulator) {}

    /// 返回 true 时仿真器在当前事件之后立即停止（不可恢复的错误）。
    fn halted(&self) -> bool {
        false
    }
}
