use crate::core::moods::{self, Mood};
use crate::core::samples;
use crate::error::{Error, Result};
use crate::models::Track;
use crate::sources::MusicSource;

/// 기분 검색 결과 요약.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodSearch {
    /// 실제로 사용한 검색어
    pub term: &'static str,
    /// 예시 곡으로 대체했는지 여부
    pub fallback: bool,
}

/// 현재 기분/검색어와 최근 검색 결과를 들고 있는 탐색 세션.
pub struct DiscoverySession {
    source: Box<dyn MusicSource>,
    current_mood: Option<Mood>,
    current_query: Option<String>,
    results: Vec<Track>,
}

impl DiscoverySession {
    pub fn new(source: Box<dyn MusicSource>) -> Self {
        Self {
            source,
            current_mood: None,
            current_query: None,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[Track] {
        &self.results
    }

    pub fn result(&self, index: usize) -> Option<&Track> {
        self.results.get(index)
    }

    pub fn current_mood(&self) -> Option<Mood> {
        self.current_mood
    }

    pub fn current_query(&self) -> Option<&str> {
        self.current_query.as_deref()
    }

    /// 결과 목록 머리말에 쓸 이름.
    pub fn context_label(&self) -> String {
        match (self.current_mood, &self.current_query) {
            (Some(mood), _) => mood.to_string(),
            (None, Some(query)) => format!("\"{}\"", query),
            (None, None) => String::new(),
        }
    }

    /// 기분 선택 화면으로 돌아간다.
    pub fn reset(&mut self) {
        self.current_mood = None;
        self.current_query = None;
        self.results.clear();
    }

    /// 기분에 맞는 검색어 하나를 무작위로 골라 검색한다.
    /// 검색이 실패하거나 결과가 없으면 기분별 예시 곡으로 대체한다.
    pub fn search_by_mood(&mut self, mood: Mood) -> MoodSearch {
        let term = moods::pick_term(mood, &mut rand::rng());
        self.current_mood = Some(mood);
        self.current_query = None;

        match self.fetch_playable(term) {
            Ok(tracks) => {
                self.results = tracks;
                MoodSearch {
                    term,
                    fallback: false,
                }
            }
            Err(e) => {
                tracing::warn!(%mood, term, error = %e, "기분 검색 실패, 예시 곡으로 대체");
                self.results = samples::fallback_tracks(mood);
                MoodSearch {
                    term,
                    fallback: true,
                }
            }
        }
    }

    /// 자유 검색어로 검색한다. 실패하거나 결과가 없으면 빈 결과를 남기고 오류를 돌려준다.
    pub fn search_by_term(&mut self, term: &str) -> Result<usize> {
        let term = term.trim();
        self.current_mood = None;
        self.current_query = Some(term.to_string());
        self.results.clear();

        if term.is_empty() {
            return Err(Error::NoResults);
        }

        let tracks = self.fetch_playable(term).inspect_err(|e| {
            tracing::info!(term, error = %e, "검색 결과 없음");
        })?;
        if tracks.is_empty() {
            return Err(Error::NoResults);
        }

        self.results = tracks;
        Ok(self.results.len())
    }

    /// 검색 후 미리듣기가 있는 곡만 남긴다.
    /// 제공자가 결과를 하나도 주지 않으면 `NoResults`.
    fn fetch_playable(&self, term: &str) -> Result<Vec<Track>> {
        tracing::info!(source = self.source.name(), term, "검색");
        let tracks = self
            .source
            .search(term)
            .map_err(|e| Error::ProviderFailure(format!("{:#}", e)))?;

        if tracks.is_empty() {
            return Err(Error::NoResults);
        }

        let total = tracks.len();
        let playable: Vec<Track> = tracks.into_iter().filter(Track::is_playable).collect();
        tracing::debug!(term, total, playable = playable.len(), "미리듣기 없는 곡 제외");
        Ok(playable)
    }
}
