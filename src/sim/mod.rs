//! 仿真模块
//!
//! 此模块把拓扑与协议引擎串成一次完整的仿真：输入记录解析、逐轮驱动、
//! 消息投递，以及文本 / JSON 输出。

// 子模块声明
mod delivery;
mod output;
mod records;
mod scenario;
mod simulation;
mod snapshot;

// 重新导出公共接口
pub use delivery::{Delivery, MessageOutcome, MessageRecord, deliver, resolve};
pub use output::{render_text, write_json, write_text};
pub use records::{parse_link_records, parse_message_records, read_link_file, read_message_file};
pub use scenario::Scenario;
pub use simulation::{SimOpts, Simulation};
pub use snapshot::{RoundSnapshot, RouterTable, TableRow};
