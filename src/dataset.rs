//! 표 데이터 모델 모듈
//!
//! 셀 값(`Cell`)과 직사각형 표(`Dataset`)를 정의합니다.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

use crate::error::{ConvertError, Result};

/// f64로 손실 없이 표현되는 정수의 최댓값 (2^53)
pub const MAX_EXACT_INT: i64 = 1 << 53;

/// 동적 타입 셀 값
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Cell {
    /// CSV 필드 텍스트로부터 타입 추론
    ///
    /// # Examples
    /// ```
    /// use tabconv::Cell;
    ///
    /// assert_eq!(Cell::infer(""), Cell::Null);
    /// assert_eq!(Cell::infer("42"), Cell::Int(42));
    /// assert_eq!(Cell::infer("4.5"), Cell::Float(4.5));
    /// assert_eq!(Cell::infer("TRUE"), Cell::Bool(true));
    /// assert_eq!(Cell::infer("Lyon"), Cell::String("Lyon".to_string()));
    /// ```
    pub fn infer(raw: &str) -> Cell {
        if raw.is_empty() {
            return Cell::Null;
        }
        if raw.eq_ignore_ascii_case("true") {
            return Cell::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Cell::Bool(false);
        }
        if let Ok(value) = raw.parse::<i64>() {
            return Cell::Int(value);
        }
        match raw.parse::<f64>() {
            // "inf", "NaN" 등은 문자열로 유지
            Ok(value) if value.is_finite() => Cell::Float(value),
            _ => Cell::String(raw.to_string()),
        }
    }

    /// CSV 필드 텍스트로 변환
    ///
    /// 실수는 항상 소수점이나 지수를 포함하므로 다시 읽어도 실수로 추론됩니다.
    pub fn to_csv_field(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Int(value) => value.to_string(),
            Cell::Float(value) if value.is_finite() => format!("{:?}", value),
            Cell::Float(_) => String::new(),
            Cell::String(value) => value.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_string())
    }
}

/// 모든 행이 같은 열 집합을 공유하는 표
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// 열 이름으로 빈 표 생성
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 행 추가
    ///
    /// 열 수보다 짧은 행은 null로 채우고, 긴 행은 `RowShape` 에러를 반환합니다.
    pub fn push_row(&mut self, mut row: Vec<Cell>) -> Result<()> {
        if row.len() > self.columns.len() {
            return Err(ConvertError::RowShape {
                row: self.rows.len() + 1,
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        row.resize(self.columns.len(), Cell::Null);
        self.rows.push(row);
        Ok(())
    }

    /// (열 이름, 값) 레코드 목록으로 표 생성
    ///
    /// 열 집합은 처음 등장한 순서대로의 합집합이며, 없는 값은 null입니다.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Vec<(String, Cell)>>,
    {
        let mut builder = UnionBuilder::default();
        for record in records {
            builder.push_record(record);
        }
        builder.finish()
    }

    /// 여러 표를 순서대로 이어 붙이기
    ///
    /// 열이 다르면 합집합 열을 사용하고 빈 칸은 null로 채웁니다.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Dataset>,
    {
        let mut builder = UnionBuilder::default();
        for part in parts {
            let Dataset { columns, rows } = part;
            for name in &columns {
                builder.column_index(name);
            }
            for row in rows {
                builder.push_record(columns.iter().cloned().zip(row).collect());
            }
        }
        builder.finish()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 열 이름으로 셀 조회
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// 특정 열의 모든 값
    pub fn column(&self, column: &str) -> Option<Vec<&Cell>> {
        let index = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(|r| &r[index]).collect())
    }

    /// 행 하나를 열 순서를 유지한 JSON 객체로 직렬화하기 위한 뷰
    pub fn record(&self, row: usize) -> Option<RecordView<'_>> {
        self.rows.get(row).map(|cells| RecordView {
            columns: &self.columns,
            cells,
        })
    }

    /// 모든 행에 대한 레코드 뷰
    pub fn records(&self) -> impl Iterator<Item = RecordView<'_>> {
        self.rows.iter().map(move |cells| RecordView {
            columns: &self.columns,
            cells,
        })
    }
}

/// 열 이름과 셀을 짝지어 직렬화하는 행 뷰
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    columns: &'a [String],
    cells: &'a [Cell],
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// 열 합집합을 유지하며 행을 쌓는 빌더
#[derive(Default)]
struct UnionBuilder {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl UnionBuilder {
    fn column_index(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.columns.len();
        self.columns.push(name.to_string());
        self.index.insert(name.to_string(), i);
        i
    }

    fn push_record(&mut self, record: Vec<(String, Cell)>) {
        let mut row = vec![Cell::Null; self.columns.len()];
        for (name, cell) in record {
            let i = self.column_index(&name);
            if i >= row.len() {
                row.resize(i + 1, Cell::Null);
            }
            row[i] = cell;
        }
        self.rows.push(row);
    }

    fn finish(self) -> Dataset {
        let width = self.columns.len();
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();
        Dataset {
            columns: self.columns,
            rows,
        }
    }
}

/// 헤더 이름을 고유하게 정리
///
/// 빈 이름은 `Unnamed: <위치>`, 중복 이름은 `.1`, `.2` 접미사를 붙입니다.
pub fn unique_column_names<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (position, name) in raw.into_iter().enumerate() {
        let name = name.as_ref();
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", position)
        } else {
            name.to_string()
        };
        let count = seen.entry(base.clone()).or_insert(0);
        let unique = if *count == 0 {
            base
        } else {
            format!("{}.{}", base, count)
        };
        *count += 1;
        names.push(unique);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_infer_numbers() {
        assert_eq!(Cell::infer("-7"), Cell::Int(-7));
        assert_eq!(Cell::infer("1e3"), Cell::Float(1000.0));
        assert_eq!(Cell::infer("2.0"), Cell::Float(2.0));
        assert_eq!(Cell::infer("NaN"), Cell::String("NaN".to_string()));
        assert_eq!(Cell::infer("inf"), Cell::String("inf".to_string()));
        assert_eq!(Cell::infer("12 rue"), Cell::String("12 rue".to_string()));
    }

    #[test]
    fn test_csv_field_round_trip() {
        for cell in [
            Cell::Null,
            Cell::Bool(false),
            Cell::Int(9),
            Cell::Float(3.0),
            Cell::Float(0.1),
            Cell::String("texte".to_string()),
        ] {
            assert_eq!(Cell::infer(&cell.to_csv_field()), cell);
        }
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut dataset = Dataset::new(columns(&["a", "b"]));
        dataset.push_row(vec![Cell::Int(1)]).unwrap();
        assert_eq!(dataset.rows()[0], vec![Cell::Int(1), Cell::Null]);
    }

    #[test]
    fn test_push_row_rejects_long_rows() {
        let mut dataset = Dataset::new(columns(&["a"]));
        dataset.push_row(vec![Cell::Int(1)]).unwrap();
        let err = dataset
            .push_row(vec![Cell::Int(1), Cell::Int(2)])
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::RowShape {
                row: 2,
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_from_records_union() {
        let dataset = Dataset::from_records(vec![
            vec![("x".to_string(), Cell::Int(1))],
            vec![
                ("y".to_string(), Cell::from("b")),
                ("x".to_string(), Cell::Int(2)),
            ],
        ]);
        assert_eq!(dataset.columns(), &columns(&["x", "y"])[..]);
        assert_eq!(dataset.rows()[0], vec![Cell::Int(1), Cell::Null]);
        assert_eq!(dataset.rows()[1], vec![Cell::Int(2), Cell::from("b")]);
    }

    #[test]
    fn test_concat_keeps_order_and_unions_columns() {
        let mut first = Dataset::new(columns(&["id", "nom"]));
        first.push_row(vec![Cell::Int(1), Cell::from("a")]).unwrap();
        let mut second = Dataset::new(columns(&["id", "ville"]));
        second.push_row(vec![Cell::Int(2), Cell::from("Paris")]).unwrap();

        let merged = Dataset::concat(vec![first, second]);
        assert_eq!(merged.columns(), &columns(&["id", "nom", "ville"])[..]);
        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.get(0, "ville"), Some(&Cell::Null));
        assert_eq!(merged.get(1, "nom"), Some(&Cell::Null));
        assert_eq!(merged.get(1, "ville"), Some(&Cell::from("Paris")));
    }

    #[test]
    fn test_concat_keeps_columns_of_empty_parts() {
        let merged = Dataset::concat(vec![Dataset::new(columns(&["a", "b"]))]);
        assert_eq!(merged.column_count(), 2);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let mut dataset = Dataset::new(columns(&["z", "a"]));
        dataset
            .push_row(vec![Cell::Float(f64::NAN), Cell::Bool(true)])
            .unwrap();
        let json = serde_json::to_string(&dataset.record(0).unwrap()).unwrap();
        assert_eq!(json, r#"{"z":null,"a":true}"#);
    }

    #[test]
    fn test_unique_column_names() {
        let names = unique_column_names(["id", "", "id", "nom", "id"]);
        assert_eq!(names, columns(&["id", "Unnamed: 1", "id.1", "nom", "id.2"]));
    }
}
