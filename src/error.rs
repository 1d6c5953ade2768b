//! 에러 타입 정의 모듈
//!
//! tabconv에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! 사용자에게 그대로 출력되므로 메시지는 프랑스어로 작성합니다.

use std::path::PathBuf;
use thiserror::Error;

/// tabconv에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 입력 경로가 존재하지 않거나 폴더가 아님 (재입력으로 복구)
    #[error("Le chemin spécifié n'est pas un répertoire valide: {path}")]
    InvalidDirectory { path: PathBuf },

    /// csv / json / xlsx 이외의 형식
    #[error("Format non reconnu: '{format}'. Veuillez spécifier 'csv', 'json' ou 'xlsx'.")]
    UnsupportedFormat { format: String },

    /// 어떤 인코딩/파싱 전략으로도 읽을 수 없는 파일
    #[error("Impossible de lire le fichier {file}: {reason}")]
    UnreadableFile { file: PathBuf, reason: String },

    /// 출력 파일 쓰기 실패
    #[error("Échec de l'écriture du fichier {file}: {reason}")]
    WriteError { file: PathBuf, reason: String },

    /// 헤더보다 필드가 많은 행
    #[error("ligne de données {row}: {found} champs trouvés, {expected} attendus")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// 구조적으로 잘못된 입력
    #[error("contenu mal formé: {reason}")]
    Malformed { reason: String },

    /// 유효하지 않은 패턴
    #[error("Motif invalide: {pattern}")]
    InvalidPattern { pattern: String },

    /// 병합할 파일 없음
    #[error("Aucun fichier à concaténer")]
    NothingToConcatenate,

    /// 대화 도중 표준 입력이 닫힘
    #[error("L'entrée standard a été fermée avant la fin de la saisie")]
    InputClosed,

    /// 프롬프트 입출력 실패
    #[error("Erreur d'entrée/sortie: {0}")]
    Io(#[from] std::io::Error),
}

/// tabconv 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
