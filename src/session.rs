//! 대화형 세션 모듈
//!
//! 폴더 입력 → 형식 선택 → 일괄 변환 → 병합 여부 확인의 순서로
//! 사용자와 주고받는 전체 흐름을 담당합니다.

use colored::Colorize;
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::pattern::FileSelector;
use crate::processor::{concatenate, prepare_output_dir, ConversionJob};
use crate::stats::Statistics;

const PROMPT_DIRECTORY: &str = "Entrez le chemin du dossier contenant les fichiers: ";
const PROMPT_INPUT_FORMAT: &str = "Entrez le format des fichiers à convertir (csv, json, xlsx): ";
const PROMPT_OUTPUT_FORMAT: &str =
    "Dans quel format voulez-vous convertir les fichiers ? (csv, json, xlsx): ";
const PROMPT_CONCATENATE: &str = "Voulez-vous concaténer les fichiers convertis ? (oui/non): ";

/// 병합을 승인하는 응답
pub const AFFIRMATIVE: &str = "oui";

/// 세션 옵션
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// 파일 이름 glob 필터 (미리 검증된 패턴)
    pub pattern: Option<Pattern>,
    /// 진행률 표시 여부
    pub progress: bool,
    /// 변환 통계 출력 여부
    pub verbose: bool,
}

impl SessionOptions {
    /// 기본 옵션 생성 (진행률 표시 켜짐)
    pub fn new() -> Self {
        Self {
            progress: true,
            ..Default::default()
        }
    }

    /// 파일 이름 패턴 설정
    pub fn with_pattern(mut self, pattern: Option<Pattern>) -> Self {
        self.pattern = pattern;
        self
    }

    /// 진행률 표시 설정
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// 상세 출력 설정
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// 세션 종료 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 입력 형식이 잘못되어 중단
    UnsupportedInputFormat(String),
    /// 일치하는 파일이 없어 중단
    NoMatchingFiles,
    /// 출력 형식이 잘못되어 중단
    UnsupportedOutputFormat(String),
    /// 변환 완료
    Completed {
        converted: Vec<PathBuf>,
        concatenated: Option<PathBuf>,
    },
}

/// 대화형 변환 세션
pub struct Session<R, W> {
    input: R,
    output: W,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: SessionOptions) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    /// 세션 실행
    ///
    /// 입력 검증 실패는 메시지를 출력하고 `Ok`로 끝나며,
    /// 읽기/쓰기 실패는 남은 파일을 처리하지 않고 에러를 반환합니다.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        let input_dir = self.prompt_directory()?;

        let answer = self.prompt(PROMPT_INPUT_FORMAT)?;
        let input_format = match answer.parse::<Format>() {
            Ok(format) => format,
            Err(e) => {
                self.warn(&e.to_string())?;
                return Ok(SessionOutcome::UnsupportedInputFormat(answer));
            }
        };

        let selector = FileSelector::new(input_format, self.options.pattern.clone());
        let files = selector.scan(&input_dir);
        if files.is_empty() {
            self.warn(&format!(
                "Aucun fichier avec le format {} trouvé dans le répertoire spécifié.",
                input_format
            ))?;
            return Ok(SessionOutcome::NoMatchingFiles);
        }
        log::debug!("{} fichier(s) trouvé(s) dans {}", files.len(), input_dir.display());

        let answer = self.prompt(PROMPT_OUTPUT_FORMAT)?;
        let output_format = match answer.parse::<Format>() {
            Ok(format) => format,
            Err(e) => {
                self.warn(&e.to_string())?;
                return Ok(SessionOutcome::UnsupportedOutputFormat(answer));
            }
        };

        let output_dir = prepare_output_dir(&input_dir)?;
        let converted = self.convert_all(&files, input_format, output_format, &output_dir)?;

        let mut concatenated = None;
        if converted.len() > 1 {
            let answer = self.prompt(PROMPT_CONCATENATE)?;
            if answer.to_lowercase() == AFFIRMATIVE {
                let merged = concatenate(&converted, output_format, &output_dir)?;
                writeln!(
                    self.output,
                    "Fichiers concaténés enregistrés dans: {}",
                    merged.display()
                )?;
                concatenated = Some(merged);
            }
        }

        Ok(SessionOutcome::Completed {
            converted,
            concatenated,
        })
    }

    /// 파일들을 순서대로 변환 (첫 실패에서 중단)
    fn convert_all(
        &mut self,
        files: &[PathBuf],
        input_format: Format,
        output_format: Format,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let pb = self.progress_bar(files.len());
        let mut stats = Statistics::new(files.len());
        let mut converted = Vec::with_capacity(files.len());

        for file in files {
            let job = ConversionJob::new(file, input_format, output_format, output_dir);
            let result = match job.run() {
                Ok(result) => result,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };
            stats.record(&result);
            pb.inc(1);

            let output = &mut self.output;
            pb.suspend(|| writeln!(output, "Fichier converti: {}", result.output.display()))?;
            converted.push(result.output);
        }

        pb.finish_and_clear();

        if self.options.verbose {
            stats.print_summary(&mut self.output)?;
        }

        Ok(converted)
    }

    /// 유효한 폴더가 입력될 때까지 반복
    fn prompt_directory(&mut self) -> Result<PathBuf> {
        loop {
            let answer = self.prompt(PROMPT_DIRECTORY)?;
            match validate_directory(&answer) {
                Ok(dir) => return Ok(dir),
                Err(e) => {
                    log::debug!("{}", e);
                    self.warn(
                        "Le chemin spécifié n'est pas un répertoire valide (Attention avec les guillemets). Veuillez essayer à nouveau.",
                    )?;
                }
            }
        }
    }

    /// 질문을 출력하고 한 줄 응답을 읽음 (앞뒤 공백 제거)
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConvertError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message.yellow())?;
        Ok(())
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.options.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .map(|s| s.progress_chars("█▓▒░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

/// 입력된 경로가 존재하는 폴더인지 확인
///
/// 경로를 감싼 따옴표(끌어다 놓기 시 흔함)는 제거합니다.
pub fn validate_directory(raw: &str) -> Result<PathBuf> {
    let trimmed = strip_quotes(raw.trim());
    let path = PathBuf::from(trimmed);
    if !trimmed.is_empty() && path.is_dir() {
        Ok(path)
    } else {
        Err(ConvertError::InvalidDirectory { path })
    }
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    s
}
