const PLACEHOLDER_ARTWORK: &str = "https://via.placeholder.com/100x100/667eea/ffffff?text=%F0%9F%8E%B5";

/// 검색으로 찾은 곡 하나.
/// 생성된 뒤에는 바뀌지 않으며, 결과 목록과 재생목록에는 복제본이 들어간다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// 중복 제거에 쓰는 안정적인 식별자
    pub id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
    pub duration_ms: Option<u64>,
    pub source: String,
}

impl Track {
    /// 제공자가 트랙 ID를 주지 않을 때 미리듣기 주소, 그것도 없으면 아티스트/제목으로 식별자를 만든다.
    pub fn derive_id(
        track_id: Option<u64>,
        preview_url: Option<&str>,
        artist: Option<&str>,
        title: Option<&str>,
    ) -> String {
        match (track_id, preview_url.filter(|u| !u.is_empty())) {
            (Some(id), _) => format!("itunes:{}", id),
            (None, Some(url)) => format!("preview:{}", url),
            (None, None) => format!(
                "unknown:{}:{}",
                artist.unwrap_or_default(),
                title.unwrap_or_default()
            ),
        }
    }

    pub fn is_playable(&self) -> bool {
        self.preview_url.as_ref().is_some_and(|u| !u.is_empty())
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("알 수 없는 곡")
    }

    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or("알 수 없는 아티스트")
    }

    pub fn display_album(&self) -> &str {
        self.album.as_deref().unwrap_or("알 수 없는 앨범")
    }

    pub fn display_artwork(&self) -> &str {
        self.artwork_url.as_deref().unwrap_or(PLACEHOLDER_ARTWORK)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} - {} [{}]",
            self.display_artist(),
            self.display_title(),
            self.display_album()
        )
    }
}
