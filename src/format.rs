//! 파일 형식 모듈
//!
//! 지원하는 표 형식(csv, json, xlsx)과 출력 파일 이름 규칙을 정의합니다.

use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// 지원하는 파일 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Json,
    Xlsx,
}

impl Format {
    /// 지원하는 모든 형식
    pub const ALL: [Format; 3] = [Format::Csv, Format::Json, Format::Xlsx];

    /// 점(.) 없는 확장자
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xlsx => "xlsx",
        }
    }

    /// 파일 이름이 `.<확장자>`로 끝나는지 확인 (대소문자 무시)
    ///
    /// # Examples
    /// ```
    /// use tabconv::Format;
    ///
    /// assert!(Format::Csv.matches_file_name("ventes.csv"));
    /// assert!(Format::Csv.matches_file_name("VENTES.CSV"));
    /// assert!(!Format::Csv.matches_file_name("csv_notes.txt"));
    /// ```
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let ext = self.extension();
        let Some(split) = file_name.len().checked_sub(ext.len() + 1) else {
            return false;
        };
        file_name.is_char_boundary(split)
            && file_name[split..].starts_with('.')
            && file_name[split + 1..].eq_ignore_ascii_case(ext)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| format.extension() == normalized)
            .ok_or_else(|| ConvertError::UnsupportedFormat {
                format: s.trim().to_string(),
            })
    }
}

/// 변환된 파일의 이름 계산
///
/// 파일 이름 끝의 `.<from>` 확장자만 `.<to>`로 교체합니다.
/// 이름 중간에 형식 토큰이 있어도 건드리지 않습니다.
///
/// # Examples
/// ```
/// use tabconv::format::{converted_file_name, Format};
///
/// assert_eq!(converted_file_name("csv_report.csv", Format::Csv, Format::Json), "csv_report.json");
/// assert_eq!(converted_file_name("notes", Format::Csv, Format::Json), "notes.json");
/// ```
pub fn converted_file_name(file_name: &str, from: Format, to: Format) -> String {
    let stem = if from.matches_file_name(file_name) {
        &file_name[..file_name.len() - from.extension().len() - 1]
    } else {
        file_name
    };
    format!("{}.{}", stem, to.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("CSV".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!(" json ".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("Xlsx".parse::<Format>().unwrap(), Format::Xlsx);
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "parquet".parse::<Format>().unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { ref format } if format == "parquet"));
        assert!("".parse::<Format>().is_err());
        assert!("xls".parse::<Format>().is_err());
    }

    #[test]
    fn test_matches_file_name() {
        assert!(Format::Json.matches_file_name("a.json"));
        assert!(Format::Json.matches_file_name(".json"));
        assert!(!Format::Json.matches_file_name("json"));
        assert!(!Format::Json.matches_file_name("a.jsonl"));
        assert!(!Format::Xlsx.matches_file_name("a.xls"));
        assert!(!Format::Csv.matches_file_name("été"));
    }

    #[test]
    fn test_converted_file_name_only_touches_extension() {
        assert_eq!(
            converted_file_name("csv_report.csv", Format::Csv, Format::Xlsx),
            "csv_report.xlsx"
        );
        assert_eq!(
            converted_file_name("data.json.json", Format::Json, Format::Csv),
            "data.json.csv"
        );
        assert_eq!(
            converted_file_name("Export.CSV", Format::Csv, Format::Json),
            "Export.json"
        );
        assert_eq!(converted_file_name("a.csv", Format::Csv, Format::Csv), "a.csv");
    }

    #[test]
    fn test_display() {
        assert_eq!(Format::Xlsx.to_string(), "xlsx");
    }
}
