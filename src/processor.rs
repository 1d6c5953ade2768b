//! 변환 처리 모듈
//!
//! 개별 파일의 변환 작업과 변환 결과 병합을 담당합니다.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::error::{ConvertError, Result};
use crate::format::{converted_file_name, Format};
use crate::{reader, writer};

/// 변환 결과가 저장되는 하위 폴더 이름
pub const CONVERTED_DIR_NAME: &str = "converted_files";

/// 병합 파일 이름 (확장자 제외)
pub const CONCATENATED_STEM: &str = "concatenated";

/// 파일 하나의 변환 작업
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    source: PathBuf,
    input_format: Format,
    output_format: Format,
    output_dir: PathBuf,
}

impl ConversionJob {
    pub fn new(
        source: impl Into<PathBuf>,
        input_format: Format,
        output_format: Format,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            input_format,
            output_format,
            output_dir: output_dir.into(),
        }
    }

    /// 변환 결과 파일 경로
    pub fn output_path(&self) -> PathBuf {
        let file_name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir.join(converted_file_name(
            &file_name,
            self.input_format,
            self.output_format,
        ))
    }

    /// 읽기 → 쓰기 실행
    pub fn run(&self) -> Result<ConversionResult> {
        let dataset = reader::load(&self.source, self.input_format)?;
        let output = writer::write(&dataset, self.output_format, &self.output_path())?;

        Ok(ConversionResult {
            bytes_read: file_size(&self.source),
            bytes_written: file_size(&output),
            rows: dataset.row_count(),
            source: self.source.clone(),
            output,
        })
    }
}

/// 파일 변환 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// 원본 파일 경로
    pub source: PathBuf,
    /// 생성된 파일 경로
    pub output: PathBuf,
    /// 변환된 행 수
    pub rows: usize,
    /// 원본 파일 크기
    pub bytes_read: u64,
    /// 생성된 파일 크기
    pub bytes_written: u64,
}

/// 입력 폴더 아래에 변환 결과 폴더 생성 (이미 있으면 그대로 사용)
pub fn prepare_output_dir(input_dir: &Path) -> Result<PathBuf> {
    let output_dir = input_dir.join(CONVERTED_DIR_NAME);
    fs::create_dir_all(&output_dir).map_err(|e| ConvertError::WriteError {
        file: output_dir.clone(),
        reason: e.to_string(),
    })?;
    Ok(output_dir)
}

/// 같은 형식의 변환 결과들을 하나의 파일로 병합
///
/// 각 파일을 다시 읽어 입력 순서대로 행을 쌓고
/// `<output_dir>/concatenated.<format>`으로 저장합니다.
///
/// # Arguments
/// * `paths` - 병합할 파일 목록 (순서 유지)
/// * `format` - 파일들의 형식이자 출력 형식
/// * `output_dir` - 병합 파일을 저장할 폴더
pub fn concatenate(paths: &[PathBuf], format: Format, output_dir: &Path) -> Result<PathBuf> {
    if paths.is_empty() {
        return Err(ConvertError::NothingToConcatenate);
    }

    let parts = paths
        .iter()
        .map(|path| reader::load(path, format))
        .collect::<Result<Vec<Dataset>>>()?;
    let merged = Dataset::concat(parts);

    let destination = output_dir.join(format!("{}.{}", CONCATENATED_STEM, format.extension()));
    log::debug!(
        "{} fichiers concaténés: {} lignes",
        paths.len(),
        merged.row_count()
    );
    writer::write(&merged, format, &destination)
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
