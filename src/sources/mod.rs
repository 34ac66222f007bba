pub mod itunes;

use anyhow::Result;

use crate::models::Track;

/// 곡 검색 소스 트레이트.
/// 검색어 하나로 후보 트랙 목록을 가져온다.
pub trait MusicSource {
    /// 로그와 화면에 표시할 소스 이름.
    fn name(&self) -> &str;
    /// 검색어로 곡을 검색한다. 결과 개수 제한과 곡 한정은 구현체가 정한다.
    fn search(&self, term: &str) -> Result<Vec<Track>>;
}
