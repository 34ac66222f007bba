use thiserror::Error;

/// 탐색 세션과 재생 컨트롤러가 돌려주는 오류.
/// 어느 것도 프로세스를 끝내지 않으며, 세션은 항상 계속 사용할 수 있는 상태로 남는다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// 고정된 기분 목록에 없는 이름
    #[error("알 수 없는 기분입니다: {0}")]
    UnknownMood(String),

    /// 전송 실패, 2xx가 아닌 응답, 응답 파싱 실패, 타임아웃
    #[error("검색 서비스 요청이 실패했습니다: {0}")]
    ProviderFailure(String),

    /// 검색 결과 없음
    #[error("검색 결과가 없습니다. 다른 검색어로 시도해 보세요.")]
    NoResults,

    /// 미리듣기 주소가 없는 트랙
    #[error("이 곡은 미리듣기를 지원하지 않습니다: {0}")]
    NotPlayable(String),

    /// 재생 장치가 로드/재생을 거부함
    #[error("이 곡을 재생할 수 없습니다. 다른 곡을 선택하세요. ({0})")]
    PlaybackFailure(String),

    /// 잘못된 재생목록 위치
    #[error("재생목록 위치가 범위를 벗어났습니다: {index} (항목 {len}개)")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
