//! 행 리더
//!
//! 바이트 스트림을 구분자 기반 레코드로 한 줄씩 읽는다. 한 번에 한 행만 메모리에 둔다.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ByteRecord, StringRecord};

use crate::aggregation::header::normalize_header;
use crate::error::{AggregationError, RowFault};

/// 입력의 한 행
#[derive(Debug, Clone)]
pub struct Row {
    line: u64,
    record: StringRecord,
    delimiter: u8,
}

impl Row {
    pub fn new(line: u64, record: StringRecord) -> Self {
        Self::with_delimiter(line, record, b',')
    }

    pub fn with_delimiter(line: u64, record: StringRecord, delimiter: u8) -> Self {
        Row { line, record, delimiter }
    }

    /// 1부터 시작하는 물리적 라인 번호
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.record.get(index)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.record.iter()
    }

    /// 진단용 원문. 입력과 같은 구분자와 따옴표 규칙으로 다시 직렬화한다.
    pub fn raw(&self) -> String {
        render_raw(self.record.iter(), self.delimiter)
    }
}

/// 필드를 CSV 한 줄로 직렬화 (줄바꿈 제외)
pub fn render_raw<I, T>(fields: I, delimiter: u8) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let fields: Vec<T> = fields.into_iter().collect();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());

    let written = writer
        .write_record(&fields)
        .ok()
        .and_then(|_| writer.into_inner().ok());

    match written {
        Some(bytes) => String::from_utf8_lossy(&bytes).trim_end_matches('\n').to_string(),
        None => fields
            .iter()
            .map(|f| String::from_utf8_lossy(f.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(&(delimiter as char).to_string()),
    }
}

/// UTF-8 로 해석할 수 없는 레코드 (필드는 손실 변환된 값)
struct Undecodable {
    line: u64,
    fields: Vec<String>,
}

/// 앞으로만 진행하는 행 시퀀스
///
/// 첫 행은 반드시 `read_header` 로 꺼내고, 이후 반복자는 데이터 행만 돌려준다.
pub struct RowReader<R: Read> {
    inner: csv::Reader<R>,
    record: ByteRecord,
    delimiter: u8,
    header_read: bool,
    done: bool,
}

impl RowReader<File> {
    pub fn from_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, AggregationError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(file, delimiter))
    }
}

impl<R: Read> RowReader<R> {
    pub fn from_reader(reader: R, delimiter: u8) -> Self {
        let inner = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        RowReader {
            inner,
            record: ByteRecord::new(),
            delimiter,
            header_read: false,
            done: false,
        }
    }

    /// 헤더 행 읽기. 입력이 비어 있으면 `None`.
    ///
    /// 헤더가 UTF-8 이 아니면 `SchemaError` 로 보고한다.
    pub fn read_header(&mut self) -> Result<Option<Row>, AggregationError> {
        if self.header_read {
            return Err(AggregationError::InvalidState("header already consumed".to_string()));
        }
        self.header_read = true;

        match self.read_record()? {
            None => Ok(None),
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(bad)) => Err(AggregationError::SchemaError {
                normalized: normalize_header(bad.fields.iter().map(String::as_str)),
                raw: bad.fields,
            }),
        }
    }

    fn read_data_row(&mut self) -> Result<Option<Row>, AggregationError> {
        match self.read_record()? {
            None => Ok(None),
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(bad)) => Err(AggregationError::MalformedRow {
                line: bad.line,
                fault: RowFault::InvalidEncoding,
                raw: render_raw(&bad.fields, self.delimiter),
            }),
        }
    }

    fn read_record(&mut self) -> Result<Option<Result<Row, Undecodable>>, AggregationError> {
        if self.done {
            return Ok(None);
        }

        match self.inner.read_byte_record(&mut self.record) {
            Ok(true) => {
                let line = self.record.position().map(|p| p.line()).unwrap_or(0);
                match StringRecord::from_byte_record(self.record.clone()) {
                    Ok(record) => Ok(Some(Ok(Row::with_delimiter(line, record, self.delimiter)))),
                    Err(_) => {
                        self.done = true;
                        let fields = self
                            .record
                            .iter()
                            .map(|f| String::from_utf8_lossy(f).into_owned())
                            .collect();
                        Ok(Some(Err(Undecodable { line, fields })))
                    }
                }
            }
            Ok(false) => {
                self.done = true;
                Ok(None)
            }
            Err(e) => {
                self.done = true;
                Err(map_csv_error(e))
            }
        }
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Row, AggregationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.header_read {
            self.done = true;
            return Some(Err(AggregationError::InvalidState(
                "data rows requested before read_header".to_string(),
            )));
        }
        self.read_data_row().transpose()
    }
}

fn map_csv_error(err: csv::Error) -> AggregationError {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => AggregationError::IoError(e),
        other => AggregationError::IoError(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{:?}", other),
        )),
    }
}
