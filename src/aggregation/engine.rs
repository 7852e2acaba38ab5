use std::io::Read;

use crate::aggregation::header::validate_header;
use crate::aggregation::parser::parse_row;
use crate::aggregation::table::SymbolTable;
use crate::error::AggregationError;
use crate::models::SymbolSummary;
use crate::reader::{Row, RowReader};
use crate::utils::logging;

/// 엔진 상태
///
/// `AwaitingHeader → Streaming → Finalized`, 오류가 나면 어느 단계에서든 `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    AwaitingHeader,
    Streaming,
    Finalized,
    Failed,
}

/// 집계 엔진 - 헤더 검증 후 행 단위로 심볼 테이블을 갱신한다
pub struct AggregationEngine {
    state: EngineState,
    table: SymbolTable,
    rows_processed: u64,
    progress_interval: u64,
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationEngine {
    pub fn new() -> Self {
        AggregationEngine {
            state: EngineState::AwaitingHeader,
            table: SymbolTable::new(),
            rows_processed: 0,
            progress_interval: 0,
        }
    }

    /// N 행마다 진행 로그 (0 이면 끔)
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn rows_processed(&self) -> u64 {
        self.rows_processed
    }

    /// 헤더 행 검증 (한 번만 허용)
    pub fn accept_header(&mut self, header: &Row) -> Result<(), AggregationError> {
        self.expect_state(EngineState::AwaitingHeader, "accept_header")?;

        validate_header(header).map_err(|e| self.fail(e))?;

        log::debug!("헤더 확인 완료 (line {})", header.line());
        self.state = EngineState::Streaming;
        Ok(())
    }

    /// 데이터 행 하나를 파싱하고 테이블에 반영
    pub fn accept_row(&mut self, row: &Row) -> Result<(), AggregationError> {
        self.expect_state(EngineState::Streaming, "accept_row")?;

        let event = parse_row(row).map_err(|e| self.fail(e))?;
        if let Err(fault) = self.table.fold(&event) {
            return Err(self.fail(AggregationError::MalformedRow {
                line: row.line(),
                fault,
                raw: row.raw(),
            }));
        }

        self.rows_processed += 1;
        if self.progress_interval > 0 && self.rows_processed % self.progress_interval == 0 {
            logging::log_progress(self.rows_processed, self.table.len());
        }
        Ok(())
    }

    /// 입력 종료 처리. 심볼 순으로 정렬된 최종 레코드를 돌려준다.
    pub fn finalize(&mut self) -> Result<Vec<SymbolSummary>, AggregationError> {
        if self.state == EngineState::AwaitingHeader {
            return Err(self.fail(AggregationError::SchemaError {
                raw: Vec::new(),
                normalized: Vec::new(),
            }));
        }
        self.expect_state(EngineState::Streaming, "finalize")?;

        self.state = EngineState::Finalized;
        Ok(std::mem::take(&mut self.table).into_summaries())
    }

    /// 리더를 끝까지 소비하며 집계
    pub fn run<R: Read>(&mut self, mut reader: RowReader<R>) -> Result<Vec<SymbolSummary>, AggregationError> {
        match reader.read_header().map_err(|e| self.fail(e))? {
            Some(header) => self.accept_header(&header)?,
            None => log::warn!("입력이 비어 있음 - 헤더 없음"),
        }

        for row in reader {
            let row = row.map_err(|e| self.fail(e))?;
            self.accept_row(&row)?;
        }

        self.finalize()
    }

    fn expect_state(&mut self, expected: EngineState, op: &str) -> Result<(), AggregationError> {
        if self.state == expected {
            return Ok(());
        }

        let err = AggregationError::InvalidState(format!(
            "{} requires {:?}, engine is {:?}",
            op, expected, self.state
        ));
        if self.state != EngineState::Finalized {
            self.state = EngineState::Failed;
        }
        Err(err)
    }

    fn fail(&mut self, err: AggregationError) -> AggregationError {
        self.state = EngineState::Failed;
        err
    }
}
