//! 파일 선택 모듈
//!
//! 입력 폴더에서 변환할 파일을 찾습니다. 확장자로 거른 뒤
//! 선택적으로 glob 패턴을 추가로 적용합니다.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ConvertError, Result};
use crate::format::Format;

/// 확장자 + glob 패턴 기반 파일 선택기
pub struct FileSelector {
    format: Format,
    pattern: Option<Pattern>,
}

/// glob 패턴 문자열 검증 및 컴파일
///
/// 세션을 시작하기 전에 호출해 잘못된 패턴을 바로 알립니다.
///
/// # Examples
/// ```
/// use tabconv::pattern::compile_pattern;
///
/// assert!(compile_pattern(Some("ventes_*")).unwrap().is_some());
/// assert!(compile_pattern(None).unwrap().is_none());
/// assert!(compile_pattern(Some("[abc")).is_err());
/// ```
pub fn compile_pattern(pattern: Option<&str>) -> Result<Option<Pattern>> {
    pattern
        .map(|p| {
            Pattern::new(p).map_err(|_| ConvertError::InvalidPattern {
                pattern: p.to_string(),
            })
        })
        .transpose()
}

impl FileSelector {
    /// 새 파일 선택기 생성
    ///
    /// # Arguments
    /// * `format` - 찾을 파일 형식
    /// * `pattern` - 컴파일된 글로브 패턴 (None이면 확장자만 검사)
    ///
    /// # Examples
    /// ```
    /// use tabconv::{pattern::compile_pattern, FileSelector, Format};
    ///
    /// let pattern = compile_pattern(Some("ventes_*")).unwrap();
    /// let selector = FileSelector::new(Format::Csv, pattern);
    /// assert!(selector.matches("ventes_mars.csv"));
    /// assert!(!selector.matches("ventes_mars.json"));
    /// assert!(!selector.matches("achats.csv"));
    /// ```
    pub fn new(format: Format, pattern: Option<Pattern>) -> Self {
        Self { format, pattern }
    }

    /// 파일 이름이 선택 조건과 일치하는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        self.format.matches_file_name(file_name)
            && self
                .pattern
                .as_ref()
                .map(|p| p.matches(file_name))
                .unwrap_or(true)
    }

    /// 패턴이 설정되어 있는지 확인
    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    /// 폴더 바로 아래의 일치하는 파일 목록 (하위 폴더는 탐색하지 않음)
    ///
    /// 결과는 파일 이름 순으로 정렬됩니다.
    pub fn scan(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| e.file_name().to_str().map(|s| self.matches(s)).unwrap_or(false))
            .map(|e| e.into_path())
            .collect()
    }
}
