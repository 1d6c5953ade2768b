//! tabconv - CSV / JSON / XLSX FOLDER CONVERTER
//!
//! 폴더 내 표 형식 파일들을 CSV, JSON, XLSX 사이에서 일괄 변환하는 대화형 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🔤 **인코딩 자동 감지**: CSV를 utf-8, ISO-8859-1, Windows-1252, utf-16 순서로 시도
//! - 🔄 **형식 변환**: csv / json / xlsx 상호 변환 (JSON은 줄 단위 출력)
//! - 🧩 **병합**: 변환된 파일들을 `concatenated.<형식>` 하나로 합치기
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터링
//! - 📈 **변환 통계**: 파일 수, 행 수, 입출력 용량, 처리 시간
//!
//! # 예제
//!
//! ```no_run
//! use std::path::Path;
//! use tabconv::{reader, writer, Format};
//!
//! let dataset = reader::load(Path::new("ventes.csv"), Format::Csv).unwrap();
//! writer::write(&dataset, Format::Json, Path::new("ventes.json")).unwrap();
//! ```

pub mod cli;
pub mod dataset;
pub mod error;
pub mod format;
pub mod pattern;
pub mod processor;
pub mod reader;
pub mod session;
pub mod stats;
pub mod writer;

// Re-exports for convenient access
pub use cli::Args;
pub use dataset::{Cell, Dataset};
pub use error::{ConvertError, Result};
pub use format::Format;
pub use pattern::FileSelector;
pub use processor::{concatenate, ConversionJob, ConversionResult};
pub use reader::{load, EncodingCandidate};
pub use session::{Session, SessionOptions, SessionOutcome};
pub use stats::{format_bytes, Statistics};
pub use writer::write;
