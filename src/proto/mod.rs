//! 传输层/协议模块
//!
//! 目前只有 Go-Back-N（逐包确认的混合变体），用于仿真实验。

pub mod gbn;
