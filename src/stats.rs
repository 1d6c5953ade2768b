//! 통계 및 유틸리티 모듈
//!
//! 일괄 변환 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::processor::ConversionResult;

/// 일괄 변환 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 변환 대상 파일 수
    pub total_files: usize,
    /// 변환 완료 파일 수
    pub converted: usize,
    /// 변환된 총 행 수
    pub rows: usize,
    /// 읽은 총 바이트
    pub bytes_read: u64,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 파일 하나의 변환 결과 반영
    pub fn record(&mut self, result: &ConversionResult) {
        self.converted += 1;
        self.rows += result.rows;
        self.bytes_read += result.bytes_read;
        self.bytes_written += result.bytes_written;
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 변환 통계 요약 출력
    pub fn print_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n{}", "═".repeat(50).bright_blue())?;
        writeln!(out, "{}", " 📊 Statistiques de conversion".bright_white().bold())?;
        writeln!(out, "{}", "═".repeat(50).bright_blue())?;

        writeln!(out, "  {} Fichiers:        {}", "📁".bright_cyan(), self.total_files)?;
        writeln!(
            out,
            "  {} Convertis:       {}",
            "✅".bright_green(),
            self.converted.to_string().green()
        )?;
        writeln!(out, "  {} Lignes:          {}", "🧾".bright_white(), self.rows)?;
        writeln!(
            out,
            "  {} Volume lu:       {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        )?;
        writeln!(
            out,
            "  {} Volume écrit:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        )?;
        writeln!(
            out,
            "  {} Durée:           {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        )?;

        writeln!(out, "{}", "═".repeat(50).bright_blue())
    }
}

/// 파일 크기를 프랑스어 단위(o, Ko, Mo, Go)로 표시
///
/// 1024 미만은 정수 그대로, 그 이상은 소수 둘째 자리까지 표시합니다.
///
/// # Examples
/// ```
/// use tabconv::stats::format_bytes;
///
/// assert_eq!(format_bytes(6), "6 o");
/// assert_eq!(format_bytes(2560), "2.50 Ko");
/// assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 Mo");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Ko", "Mo", "Go"];

    if bytes < 1024 {
        return format!("{} o", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{} h {} min", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{} min {} s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03} s", secs, millis)
    } else {
        format!("{} ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 o");
        assert_eq!(format_bytes(1023), "1023 o");
        assert_eq!(format_bytes(1024), "1.00 Ko");
        assert_eq!(format_bytes(1536), "1.50 Ko");
        assert_eq!(format_bytes(1073741824), "1.00 Go");
        // Go 이상은 Go로 유지
        assert_eq!(format_bytes(2048 * 1073741824), "2048.00 Go");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500 ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.000 s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1 min 5 s");
        assert_eq!(format_duration(Duration::from_secs(3665)), "1 h 1 min");
    }

    #[test]
    fn test_record_accumulates() {
        let mut stats = Statistics::new(2);
        for rows in [3, 4] {
            stats.record(&ConversionResult {
                source: PathBuf::from("a.csv"),
                output: PathBuf::from("a.json"),
                rows,
                bytes_read: 100,
                bytes_written: 50,
            });
        }

        assert_eq!(stats.converted, 2);
        assert_eq!(stats.rows, 7);
        assert_eq!(stats.bytes_read, 200);
        assert_eq!(stats.bytes_written, 100);
    }

    #[test]
    fn test_print_summary() {
        let stats = Statistics::new(3);
        let mut out = Vec::new();
        stats.print_summary(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Statistiques de conversion"));
        assert!(text.contains("Fichiers:"));
    }
}
