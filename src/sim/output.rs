//! 结果输出：文本文件与 JSON 转储

use std::fs;
use std::path::Path;

use tracing::info;

use super::snapshot::RoundSnapshot;
use crate::error::RecordError;

/// 把所有轮次拼成一份文本输出
pub fn render_text(rounds: &[RoundSnapshot]) -> String {
    rounds.iter().map(|r| r.to_string()).collect()
}

pub fn write_text(path: &Path, rounds: &[RoundSnapshot]) -> Result<(), RecordError> {
    fs::write(path, render_text(rounds))?;
    info!(path = %path.display(), rounds = rounds.len(), "📝 文本输出已写入");
    Ok(())
}

pub fn write_json(path: &Path, rounds: &[RoundSnapshot]) -> Result<(), RecordError> {
    let raw = serde_json::to_string_pretty(rounds)?;
    fs::write(path, raw)?;
    info!(path = %path.display(), rounds = rounds.len(), "📝 JSON 输出已写入");
    Ok(())
}
