//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.
//! 변환 자체는 대화형으로 진행되며, 인자는 실행 환경 설정에만 쓰입니다.

use clap::Parser;

/// tabconv CLI 인자 구조체
#[derive(Parser, Debug, Default)]
#[command(
    name = "tabconv",
    author = "YourName <your@email.com>",
    version,
    about = "CSV / JSON / XLSX FOLDER CONVERTER - 폴더 내 표 형식 파일들을 일괄 변환하는 대화형 CLI 도구",
    long_about = r#"
CSV / JSON / XLSX FOLDER CONVERTER
==================================

입력 폴더, 입력 형식, 출력 형식을 차례로 물어본 뒤
폴더 안의 모든 파일을 변환하여 converted_files 폴더에 저장합니다.
변환된 파일이 둘 이상이면 하나의 파일로 병합할 수 있습니다.

특징:
  • CSV 인코딩 자동 감지 (utf-8, ISO-8859-1, Windows-1252, utf-16)
  • 줄 단위 JSON 출력
  • 변환 결과 병합 (concatenated.<형식>)

예제:
  tabconv
  tabconv --verbose
  tabconv --pattern "ventes_*"
"#
)]
pub struct Args {
    /// 상세 출력 모드 (디버그 로그 + 변환 통계)
    #[arg(short, long)]
    pub verbose: bool,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "ventes_*", "data?.csv")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 진행률 표시 끄기
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// `RUST_LOG`가 없을 때 사용할 기본 로그 필터
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
