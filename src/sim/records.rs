//! 输入记录解析
//!
//! 拓扑 / 变更文件：每行 `<a> <b> <cost>`，空白分隔。
//! 消息文件：每行 `<from> <to> <text...>`，前两个空白分隔的记号是 id，
//! 第二个 id 后的一个分隔符之后的内容原样作为消息。空行一律忽略。

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::RecordError;
use crate::net::{LinkRecord, RouterId};
use crate::sim::delivery::MessageRecord;

pub fn parse_link_records(src: &str) -> Result<Vec<LinkRecord>, RecordError> {
    let mut records = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [a, b, cost] => records.push(LinkRecord {
                a: parse_id(a, line)?,
                b: parse_id(b, line)?,
                cost: parse_token::<i64>(cost, line, "cost")?,
            }),
            _ => {
                return Err(RecordError::Malformed {
                    line,
                    reason: format!("expected `<a> <b> <cost>`, got {} fields", tokens.len()),
                });
            }
        }
    }
    Ok(records)
}

pub fn parse_message_records(src: &str) -> Result<Vec<MessageRecord>, RecordError> {
    let mut records = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let raw = raw.trim_end_matches('\r');
        if raw.trim().is_empty() {
            continue;
        }
        let Some((from, rest)) = raw.trim_start().split_once(char::is_whitespace) else {
            return Err(RecordError::Malformed {
                line,
                reason: "expected `<from> <to> <message>`".to_string(),
            });
        };
        // 第二个 id 之后恰好跳过一个分隔符，消息其余部分保持原样
        let (to, text) = rest
            .trim_start()
            .split_once(char::is_whitespace)
            .unwrap_or((rest.trim_start(), ""));
        records.push(MessageRecord {
            from: parse_id(from, line)?,
            to: parse_id(to, line)?,
            text: text.to_string(),
        });
    }
    Ok(records)
}

pub fn read_link_file(path: &Path) -> Result<Vec<LinkRecord>, RecordError> {
    parse_link_records(&fs::read_to_string(path)?)
}

pub fn read_message_file(path: &Path) -> Result<Vec<MessageRecord>, RecordError> {
    parse_message_records(&fs::read_to_string(path)?)
}

fn parse_id(token: &str, line: usize) -> Result<RouterId, RecordError> {
    parse_token::<u32>(token, line, "router id").map(RouterId)
}

fn parse_token<T: FromStr>(token: &str, line: usize, what: &str) -> Result<T, RecordError> {
    token.trim().parse().map_err(|_| RecordError::Malformed {
        line,
        reason: format!("invalid {what} `{token}`"),
    })
}
