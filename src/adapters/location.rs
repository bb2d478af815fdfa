use crate::domain::model::{Coordinate, PositionReading};
use crate::domain::ports::PositionSource;
use crate::utils::error::{LocatorError, Result};
use std::collections::VecDeque;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// 只回傳一次的固定位置（例如命令列指定的座標）
#[derive(Debug, Clone)]
pub struct FixedPosition {
    reading: Option<PositionReading>,
}

impl FixedPosition {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            reading: Some(PositionReading::now(coordinate)),
        }
    }
}

impl PositionSource for FixedPosition {
    async fn next_reading(&mut self) -> Option<Result<PositionReading>> {
        self.reading.take().map(Ok)
    }
}

/// 預先排好的讀數序列，可包含拒絕（`Err`）
#[derive(Debug, Default)]
pub struct ScriptedPositions {
    readings: VecDeque<Result<PositionReading>>,
}

impl ScriptedPositions {
    pub fn new(readings: impl IntoIterator<Item = PositionReading>) -> Self {
        Self {
            readings: readings.into_iter().map(Ok).collect(),
        }
    }

    pub fn then_refuse(mut self, reason: &str) -> Self {
        self.readings.push_back(Err(LocatorError::LocationUnavailable {
            reason: reason.to_string(),
        }));
        self
    }

    /// 尚未被讀取的讀數數量
    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl PositionSource for ScriptedPositions {
    async fn next_reading(&mut self) -> Option<Result<PositionReading>> {
        self.readings.pop_front()
    }
}

/// 逐行讀取 `lat,lon`；空白行與 `#` 註解略過，格式錯誤的行記錄後略過
pub struct LinePositionSource<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: AsyncBufRead + Unpin + Send> LinePositionSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_number: 0,
        }
    }
}

pub type StdinPositionSource = LinePositionSource<BufReader<Stdin>>;

impl StdinPositionSource {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> PositionSource for LinePositionSource<R> {
    async fn next_reading(&mut self) -> Option<Result<PositionReading>> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer).await {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(LocatorError::IoError(e))),
            }
            self.line_number += 1;

            // 非 UTF-8 的行與格式錯誤的行一樣略過
            let line = match std::str::from_utf8(&self.buffer) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("⚠️ Ignoring line {}: {}", self.line_number, e);
                    continue;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match parse_coordinate(trimmed) {
                Ok(coordinate) => return Some(Ok(PositionReading::now(coordinate))),
                Err(e) => {
                    tracing::warn!("⚠️ Ignoring line {}: {}", self.line_number, e);
                }
            }
        }
    }
}

/// 解析 `lat,lon` 並檢查範圍
pub fn parse_coordinate(input: &str) -> Result<Coordinate> {
    let malformed = || LocatorError::MalformedInput {
        message: format!("expected 'latitude,longitude', got '{}'", input),
    };

    let (lat, lon) = input.split_once(',').ok_or_else(malformed)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let longitude: f64 = lon.trim().parse().map_err(|_| malformed())?;
    Coordinate::try_new(latitude, longitude)
}
