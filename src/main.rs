//! tabconv - CSV / JSON / XLSX FOLDER CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io;

use tabconv::{
    cli::Args,
    pattern::compile_pattern,
    session::{Session, SessionOptions},
};

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    // 패턴 검증 (질문을 시작하기 전에 실패)
    let pattern = compile_pattern(args.pattern.as_deref())?;

    // 헤더 출력
    print_header(&args);

    let options = SessionOptions::new()
        .with_pattern(pattern)
        .with_progress(!args.no_progress)
        .with_verbose(args.verbose);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), options);
    session.run()?;

    Ok(())
}

/// 로거 초기화 (`RUST_LOG`가 있으면 우선)
fn init_logging(args: &Args) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🔄 CSV / JSON / XLSX FOLDER CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());

    if let Some(ref pattern) = args.pattern {
        println!("  {} Filtre: {}", "🔍".bright_magenta(), pattern);
    }

    if args.verbose {
        println!("  {} {}", "📝".bright_cyan(), "Mode détaillé".cyan());
    }

    println!();
}
