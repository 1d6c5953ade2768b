//! 파일 쓰기 모듈
//!
//! `Dataset`을 CSV, 줄 단위 JSON, XLSX 형식으로 저장합니다.

use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::dataset::{Cell, Dataset, MAX_EXACT_INT};
use crate::error::{ConvertError, Result};
use crate::format::Format;

/// 지정한 형식으로 `Dataset` 저장
///
/// # Arguments
/// * `dataset` - 저장할 표
/// * `format` - 출력 형식
/// * `destination` - 출력 파일 경로
///
/// # Returns
/// 저장된 파일 경로 또는 `WriteError`
pub fn write(dataset: &Dataset, format: Format, destination: &Path) -> Result<PathBuf> {
    match format {
        Format::Csv => write_csv(dataset, destination)?,
        Format::Json => write_json_lines(dataset, destination)?,
        Format::Xlsx => write_xlsx(dataset, destination)?,
    }

    log::debug!(
        "{} écrit: {} lignes ({})",
        destination.display(),
        dataset.row_count(),
        format
    );
    Ok(destination.to_path_buf())
}

/// CSV 저장 (행 인덱스 없음, 헤더 항상 포함)
fn write_csv(dataset: &Dataset, destination: &Path) -> Result<()> {
    let file = create(destination)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    if dataset.column_count() > 0 {
        writer
            .write_record(dataset.columns())
            .map_err(|e| write_error(destination, e))?;
    }
    for row in dataset.rows() {
        writer
            .write_record(row.iter().map(Cell::to_csv_field))
            .map_err(|e| write_error(destination, e))?;
    }

    writer.flush().map_err(|e| write_error(destination, e))
}

/// 줄 단위 JSON 저장 (한 줄에 한 행)
fn write_json_lines(dataset: &Dataset, destination: &Path) -> Result<()> {
    let file = create(destination)?;
    let mut writer = BufWriter::new(file);

    for record in dataset.records() {
        serde_json::to_writer(&mut writer, &record).map_err(|e| write_error(destination, e))?;
        writer
            .write_all(b"\n")
            .map_err(|e| write_error(destination, e))?;
    }

    writer.flush().map_err(|e| write_error(destination, e))
}

/// XLSX 저장 (워크시트 하나, 첫 행은 헤더)
fn write_xlsx(dataset: &Dataset, destination: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    fill_worksheet(workbook.add_worksheet(), dataset, destination)?;
    workbook
        .save(destination)
        .map_err(|e| write_error(destination, e))
}

fn fill_worksheet(worksheet: &mut Worksheet, dataset: &Dataset, destination: &Path) -> Result<()> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| write_error(destination, e);

    for (index, name) in dataset.columns().iter().enumerate() {
        let col = column_number(index, destination)?;
        worksheet.write_string(0, col, name).map_err(xlsx_err)?;
    }

    for (index, row) in dataset.rows().iter().enumerate() {
        let row_num = u32::try_from(index + 1)
            .map_err(|_| write_error(destination, "nombre de lignes trop élevé pour XLSX"))?;
        for (index, cell) in row.iter().enumerate() {
            let col = column_number(index, destination)?;
            match cell {
                Cell::Null => {}
                Cell::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b).map_err(xlsx_err)?;
                }
                Cell::Int(i) if i.unsigned_abs() <= MAX_EXACT_INT as u64 => {
                    worksheet
                        .write_number(row_num, col, *i as f64)
                        .map_err(xlsx_err)?;
                }
                // 실수로 표현하면 자릿수가 손실되는 정수는 텍스트로 저장
                Cell::Int(i) => {
                    worksheet
                        .write_string(row_num, col, i.to_string())
                        .map_err(xlsx_err)?;
                }
                Cell::Float(f) if f.is_finite() => {
                    worksheet.write_number(row_num, col, *f).map_err(xlsx_err)?;
                }
                Cell::Float(_) => {}
                Cell::String(s) => {
                    worksheet.write_string(row_num, col, s).map_err(xlsx_err)?;
                }
            }
        }
    }

    Ok(())
}

fn column_number(index: usize, destination: &Path) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| write_error(destination, "nombre de colonnes trop élevé pour XLSX"))
}

fn create(destination: &Path) -> Result<File> {
    File::create(destination).map_err(|e| write_error(destination, e))
}

fn write_error(destination: &Path, reason: impl ToString) -> ConvertError {
    ConvertError::WriteError {
        file: destination.to_path_buf(),
        reason: reason.to_string(),
    }
}
