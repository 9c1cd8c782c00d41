use gridlink_core::{Cell, DispatchEntry, DispatchQueue};
use serde::Deserialize;
use tracing::debug;

use crate::errors::DecodeError;

/// One line of the wire protocol. Every field is optional; absent fields
/// are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateMessage {
    pub step: Option<i64>,
    pub message: Option<String>,
    pub matrix: Option<Vec<Vec<f64>>>,
    #[serde(rename = "agentPosition", alias = "AgentPosition")]
    pub agent_position: Option<Vec<i32>>,
    #[serde(rename = "agentPath", alias = "AgentPath")]
    pub agent_path: Option<Vec<Vec<i32>>>,
}

impl UpdateMessage {
    /// Queue entries carried by this message: the grid first, then the agent move.
    pub fn into_entries(self) -> Result<Vec<DispatchEntry>, DecodeError> {
        let mut out = Vec::with_capacity(2);
        if let Some(matrix) = self.matrix {
            out.push(DispatchEntry::GridReplace(round_matrix(matrix)?));
        }
        match self.agent_position.as_deref() {
            Some(&[row, col]) => out.push(DispatchEntry::AgentMove(Cell::new(row, col))),
            Some(other) => debug!(len = other.len(), "ignoring agentPosition without exactly two coordinates"),
            None => {}
        }
        Ok(out)
    }
}

/// Round every cell to the nearest integer, ties to even.
pub fn round_matrix(matrix: Vec<Vec<f64>>) -> Result<Vec<Vec<i32>>, DecodeError> {
    matrix
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .into_iter()
                .enumerate()
                .map(|(col, value)| {
                    let r = value.round_ties_even();
                    if r.is_finite() && r >= i32::MIN as f64 && r <= i32::MAX as f64 {
                        Ok(r as i32)
                    } else {
                        Err(DecodeError::CellOutOfRange { row, col, value })
                    }
                })
                .collect()
        })
        .collect()
}

pub fn decode_line(line: &str) -> Result<Vec<DispatchEntry>, DecodeError> {
    let msg: UpdateMessage = serde_json::from_str(line)?;
    debug!(
        step = ?msg.step,
        message = msg.message.as_deref().unwrap_or(""),
        path_len = ?msg.agent_path.as_ref().map(Vec::len),
        "update decoded"
    );
    msg.into_entries()
}

/// Decode one complete line and enqueue what it carries. Returns the number
/// of entries enqueued. Nothing is enqueued when decoding fails.
pub fn submit(queue: &DispatchQueue, line: &str) -> Result<usize, DecodeError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(0);
    }
    let entries = decode_line(line)?;
    let n = entries.len();
    for entry in entries {
        queue.enqueue(entry);
    }
    Ok(n)
}

pub fn submit_bytes(queue: &DispatchQueue, line: &[u8]) -> Result<usize, DecodeError> {
    submit(queue, std::str::from_utf8(line)?)
}

/// Longest line accepted before the rest of it is thrown away.
pub const DEFAULT_MAX_LINE_BYTES: usize = 16 * 1024 * 1024;

/// Accumulates raw reads and hands back complete `\n`-terminated lines.
/// A line longer than the limit is dropped and reported once; memory held
/// for a single connection stays bounded by the limit plus one read.
#[derive(Debug)]
pub struct LineBuffer {
    buf: Vec<u8>,
    // bytes already known to contain no newline
    scanned: usize,
    limit: usize,
    // inside an oversized line, skipping up to its newline
    discarding: bool,
}

impl Default for LineBuffer {
    fn default() -> Self { Self::with_limit(DEFAULT_MAX_LINE_BYTES) }
}

impl LineBuffer {
    pub fn new() -> Self { Self::default() }

    pub fn with_limit(limit: usize) -> Self {
        Self { buf: Vec::new(), scanned: 0, limit: limit.max(1), discarding: false }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Next complete line without its terminator, `Some(Err(..))` for a line
    /// over the limit, or None if the buffer holds only a partial line.
    pub fn next_line(&mut self) -> Option<Result<Vec<u8>, DecodeError>> {
        loop {
            match self.buf[self.scanned..].iter().position(|&b| b == b'\n') {
                Some(off) => {
                    let end = self.scanned + off;
                    self.scanned = 0;
                    if self.discarding {
                        self.buf.drain(..=end);
                        self.discarding = false;
                        continue;
                    }
                    if end > self.limit {
                        self.buf.drain(..=end);
                        return Some(Err(DecodeError::LineTooLong { len: end, limit: self.limit }));
                    }
                    let mut line: Vec<u8> = self.buf.drain(..=end).collect();
                    line.pop();
                    return Some(Ok(line));
                }
                None if self.discarding => {
                    self.buf.clear();
                    self.scanned = 0;
                    return None;
                }
                None if self.buf.len() > self.limit => {
                    let len = self.buf.len();
                    self.buf.clear();
                    self.scanned = 0;
                    self.discarding = true;
                    return Some(Err(DecodeError::LineTooLong { len, limit: self.limit }));
                }
                None => {
                    self.scanned = self.buf.len();
                    return None;
                }
            }
        }
    }

    /// Bytes of the unterminated tail.
    pub fn pending(&self) -> usize { self.buf.len() }
}
