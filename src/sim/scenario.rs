//! 场景描述
//!
//! 一次仿真的全部输入：初始拓扑、变更序列与待投递消息。
//! 可以从三个记录文件组装，也可以从一个 JSON 文件读取：
//!
//! ```json
//! {
//!   "protocol": "link_state",
//!   "topology": [[1, 2, 6]],
//!   "changes": [[1, 2, -999]],
//!   "messages": [{ "from": 2, "to": 1, "text": "How are you?" }]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::delivery::MessageRecord;
use super::records::{read_link_file, read_message_file};
use crate::error::RecordError;
use crate::net::LinkRecord;
use crate::proto::ProtocolKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// 缺省时由命令行决定，再缺省为距离向量
    #[serde(default)]
    pub protocol: Option<ProtocolKind>,
    pub topology: Vec<LinkRecord>,
    #[serde(default)]
    pub changes: Vec<LinkRecord>,
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
}

impl Scenario {
    pub fn from_json_str(raw: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, RecordError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// 由拓扑、消息、变更三个记录文件组装
    pub fn from_files(topology: &Path, messages: &Path, changes: &Path) -> Result<Self, RecordError> {
        Ok(Self {
            protocol: None,
            topology: read_link_file(topology)?,
            changes: read_link_file(changes)?,
            messages: read_message_file(messages)?,
        })
    }
}
