//! 파일 읽기 모듈
//!
//! 선언된 형식에 따라 파일을 `Dataset`으로 읽어 들입니다.
//! CSV는 여러 인코딩을 정해진 순서로 시도합니다.

use calamine::{open_workbook, Data, Reader, Xlsx};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::dataset::{unique_column_names, Cell, Dataset, MAX_EXACT_INT};
use crate::error::{ConvertError, Result};
use crate::format::Format;

/// CSV 디코딩 후보 인코딩
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingCandidate {
    Utf8,
    Latin1,
    Windows1252,
    Utf16,
}

/// CSV 인코딩 시도 순서
pub const CSV_ENCODINGS: [EncodingCandidate; 4] = [
    EncodingCandidate::Utf8,
    EncodingCandidate::Latin1,
    EncodingCandidate::Windows1252,
    EncodingCandidate::Utf16,
];

impl EncodingCandidate {
    pub fn label(&self) -> &'static str {
        match self {
            EncodingCandidate::Utf8 => "utf-8",
            EncodingCandidate::Latin1 => "ISO-8859-1",
            EncodingCandidate::Windows1252 => "Windows-1252",
            EncodingCandidate::Utf16 => "utf-16",
        }
    }

    /// 엄격한 디코딩 (잘못된 바이트 시퀀스면 `None`)
    ///
    /// UTF-16 BOM으로 시작하는 입력은 utf-16 후보만 받아들입니다.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        if *self != EncodingCandidate::Utf16 && utf16_bom(bytes).is_some() {
            return None;
        }

        match self {
            EncodingCandidate::Utf8 => {
                let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
                (!had_errors).then_some(text)
            }
            EncodingCandidate::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
            EncodingCandidate::Windows1252 => {
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
            EncodingCandidate::Utf16 => {
                // BOM이 없으면 리틀 엔디언
                let (encoding, bom_len) = utf16_bom(bytes).unwrap_or((UTF_16LE, 0));
                encoding.decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            }
        }
    }
}

fn utf16_bom(bytes: &[u8]) -> Option<(&'static Encoding, usize)> {
    Encoding::for_bom(bytes).filter(|(encoding, _)| *encoding == UTF_16BE || *encoding == UTF_16LE)
}

/// 선언된 형식으로 파일 읽기
///
/// # Arguments
/// * `path` - 읽을 파일 경로
/// * `format` - 파일의 선언된 형식
///
/// # Returns
/// 읽어 들인 `Dataset` 또는 `UnreadableFile` 에러
pub fn load(path: &Path, format: Format) -> Result<Dataset> {
    let dataset = match format {
        Format::Csv => load_csv(path).map(|(dataset, _)| dataset)?,
        Format::Json => load_json(path)?,
        Format::Xlsx => load_xlsx(path)?,
    };

    log::debug!(
        "{} lu: {} lignes, {} colonnes",
        path.display(),
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

/// CSV 파일을 인코딩 후보 순서대로 시도하여 읽기
///
/// # Returns
/// 읽어 들인 `Dataset`과 성공한 인코딩
pub fn load_csv(path: &Path) -> Result<(Dataset, EncodingCandidate)> {
    let bytes = read_bytes(path)?;

    for candidate in CSV_ENCODINGS {
        let attempt = candidate
            .decode(&bytes)
            .ok_or_else(|| ConvertError::Malformed {
                reason: "séquence d'octets invalide".to_string(),
            })
            .and_then(|text| parse_csv(&text));

        match attempt {
            Ok(dataset) => {
                log::debug!("{} décodé avec {}", path.display(), candidate.label());
                return Ok((dataset, candidate));
            }
            Err(e) => {
                log::warn!(
                    "Erreur avec l'encodage {} pour {}: {}",
                    candidate.label(),
                    path.display(),
                    e
                );
            }
        }
    }

    let tried: Vec<&str> = CSV_ENCODINGS.iter().map(|c| c.label()).collect();
    Err(ConvertError::UnreadableFile {
        file: path.to_path_buf(),
        reason: format!("aucun des encodages tentés ({}) n'a fonctionné", tried.join(", ")),
    })
}

/// 디코딩된 CSV 텍스트 파싱
///
/// 첫 레코드는 헤더입니다. 헤더보다 필드가 많은 레코드는 에러이며,
/// 적은 레코드는 null로 채웁니다.
pub fn parse_csv(text: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(malformed)?;
    if headers.is_empty() {
        return Err(ConvertError::Malformed {
            reason: "aucune ligne d'en-tête".to_string(),
        });
    }

    let mut dataset = Dataset::new(unique_column_names(headers.iter()));
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        dataset.push_row(record.iter().map(Cell::infer).collect())?;
    }

    Ok(dataset)
}

/// JSON 파일 읽기 (행 객체 배열 또는 줄 단위 JSON)
pub fn load_json(path: &Path) -> Result<Dataset> {
    let bytes = read_bytes(path)?;
    let text = std::str::from_utf8(&bytes).map_err(|e| unreadable(path, e))?;
    parse_json(text).map_err(|e| unreadable(path, e))
}

/// JSON 텍스트 파싱
///
/// 최상위 값들의 스트림으로 읽으며, 각 값은 행 객체이거나 행 객체의 배열입니다.
pub fn parse_json(text: &str) -> Result<Dataset> {
    let mut records = Vec::new();

    for value in serde_json::Deserializer::from_str(text).into_iter::<Value>() {
        match value.map_err(malformed)? {
            Value::Array(items) => {
                for item in items {
                    records.push(json_record(item)?);
                }
            }
            other => records.push(json_record(other)?),
        }
    }

    Ok(Dataset::from_records(records))
}

fn json_record(value: Value) -> Result<Vec<(String, Cell)>> {
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, json_cell(value)))
            .collect()),
        other => Err(ConvertError::Malformed {
            reason: format!("objet JSON attendu, trouvé: {}", other),
        }),
    }
}

fn json_cell(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Bool(b) => Cell::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
        },
        Value::String(s) => Cell::String(s),
        // 중첩 구조는 보존하지 않고 JSON 텍스트로 저장
        nested => Cell::String(nested.to_string()),
    }
}

/// XLSX 파일의 첫 번째 워크시트 읽기
pub fn load_xlsx(path: &Path) -> Result<Dataset> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| unreadable(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unreadable(path, "le classeur ne contient aucune feuille"))?
        .map_err(|e| unreadable(path, e))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Dataset::default());
    };

    let mut dataset = Dataset::new(unique_column_names(header.iter().map(header_text)));
    for row in rows {
        dataset
            .push_row(row.iter().map(xlsx_cell).collect())
            .map_err(|e| unreadable(path, e))?;
    }

    Ok(dataset)
}

fn header_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn xlsx_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::Bool(b) => Cell::Bool(*b),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => whole_float_to_int(*f),
        Data::String(s) => Cell::String(s.clone()),
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        other => Cell::String(other.to_string()),
    }
}

/// XLSX는 모든 숫자를 실수로 저장하므로 정수 값은 정수로 복원
fn whole_float_to_int(value: f64) -> Cell {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT as f64 {
        Cell::Int(value as i64)
    } else {
        Cell::Float(value)
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| unreadable(path, e))
}

fn unreadable(path: &Path, reason: impl ToString) -> ConvertError {
    ConvertError::UnreadableFile {
        file: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn malformed(e: impl ToString) -> ConvertError {
    ConvertError::Malformed {
        reason: e.to_string(),
    }
}
