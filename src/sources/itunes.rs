use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::ItunesConfig;
use crate::models::Track;
use crate::sources::MusicSource;

/// 한 번에 가져오는 최대 결과 수
pub const SEARCH_LIMIT: u32 = 20;

/// iTunes Search API 클라이언트.
/// 인증 없이 곡(entity=song)만 검색한다.
pub struct ItunesClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    country: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ItunesTrack>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItunesTrack {
    track_id: Option<u64>,
    track_name: Option<String>,
    artist_name: Option<String>,
    collection_name: Option<String>,
    artwork_url100: Option<String>,
    artwork_url60: Option<String>,
    preview_url: Option<String>,
    track_time_millis: Option<u64>,
}

impl ItunesClient {
    pub fn new(config: &ItunesConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("iTunes HTTP 클라이언트 생성에 실패했습니다")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            country: config.country.clone().filter(|c| !c.is_empty()),
        })
    }

    /// 요청 URL을 만든다. 검색어는 URL 인코딩된다.
    fn search_url(&self, term: &str) -> Result<url::Url> {
        let limit = SEARCH_LIMIT.to_string();
        let mut params = vec![
            ("term", term),
            ("media", "music"),
            ("entity", "song"),
            ("limit", limit.as_str()),
        ];
        if let Some(country) = &self.country {
            params.push(("country", country.as_str()));
        }
        url::Url::parse_with_params(&self.endpoint, &params)
            .with_context(|| format!("잘못된 검색 주소입니다: {}", self.endpoint))
    }

    fn convert_track(track: ItunesTrack) -> Track {
        let id = Track::derive_id(
            track.track_id,
            track.preview_url.as_deref(),
            track.artist_name.as_deref(),
            track.track_name.as_deref(),
        );

        Track {
            id,
            title: track.track_name,
            artist: track.artist_name,
            album: track.collection_name,
            artwork_url: track.artwork_url100.or(track.artwork_url60),
            preview_url: track.preview_url,
            duration_ms: track.track_time_millis,
            source: "itunes".to_string(),
        }
    }

    fn parse_response(body: &str) -> Result<Vec<Track>> {
        let resp: SearchResponse =
            serde_json::from_str(body).context("iTunes 검색 응답 파싱에 실패했습니다")?;
        Ok(resp.results.into_iter().map(Self::convert_track).collect())
    }
}

impl MusicSource for ItunesClient {
    fn name(&self) -> &str {
        "iTunes"
    }

    fn search(&self, term: &str) -> Result<Vec<Track>> {
        let url = self.search_url(term)?;
        tracing::debug!(url = %url, "iTunes 검색 요청");

        let body = self
            .client
            .get(url)
            .send()
            .context("iTunes 검색에 실패했습니다")?
            .error_for_status()
            .context("iTunes 검색 요청이 실패했습니다")?
            .text()
            .context("iTunes 검색 응답 읽기에 실패했습니다")?;

        let tracks = Self::parse_response(&body)?;
        tracing::debug!(term, count = tracks.len(), "iTunes 검색 응답");
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn client() -> ItunesClient {
        ItunesClient::new(&ItunesConfig::default()).expect("ItunesClient 생성 실패")
    }

    #[test]
    fn test_search_url_has_fixed_params() {
        let url = client().search_url("rock & roll").unwrap();
        assert_eq!(url.host_str(), Some("itunes.apple.com"));
        assert_eq!(url.path(), "/search");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("term".to_string(), "rock & roll".to_string()),
                ("media".to_string(), "music".to_string()),
                ("entity".to_string(), "song".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
        assert!(url.as_str().contains("term=rock+%26+roll"));
    }

    #[test]
    fn test_search_url_with_country() {
        let config = ItunesConfig {
            country: Some("kr".to_string()),
            ..Default::default()
        };
        let url = ItunesClient::new(&config).unwrap().search_url("iu").unwrap();
        assert!(url.as_str().ends_with("&limit=20&country=kr"));
    }

    #[test]
    fn test_search_url_limit_is_fixed() {
        let config = ItunesConfig {
            endpoint: "http://127.0.0.1:9/search".to_string(),
            timeout_secs: 1,
            country: None,
        };
        let url = ItunesClient::new(&config).unwrap().search_url("x").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9/search?term=x&media=music&entity=song&limit=20"
        );
    }

    /// 요청 하나에 정해진 상태와 본문으로 답하는 로컬 서버를 띄우고 검색 주소를 돌려준다.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("로컬 포트 바인딩 실패");
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}/search", addr)
    }

    fn local_client(endpoint: String) -> ItunesClient {
        let config = ItunesConfig {
            endpoint,
            timeout_secs: 5,
            country: None,
        };
        ItunesClient::new(&config).unwrap()
    }

    const ONE_RESULT: &str = r#"{"resultCount":1,"results":[{"trackId":7,"trackName":"Hello","previewUrl":"https://example.com/p.m4a"}]}"#;

    #[test]
    fn test_search_fails_on_server_error_status() {
        let client = local_client(serve_once("503 Service Unavailable", ONE_RESULT));
        assert!(client.search("hello").is_err());
    }

    #[test]
    fn test_search_reads_success_body() {
        let client = local_client(serve_once("200 OK", ONE_RESULT));
        let tracks = client.search("hello").unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "itunes:7");
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "resultCount": 2,
            "results": [
                {
                    "wrapperType": "track",
                    "trackId": 1440833098,
                    "trackName": "Someone Like You",
                    "artistName": "Adele",
                    "collectionName": "21",
                    "artworkUrl60": "https://example.com/60.jpg",
                    "artworkUrl100": "https://example.com/100.jpg",
                    "previewUrl": "https://example.com/preview.m4a",
                    "trackTimeMillis": 285240
                },
                {
                    "trackName": "No Preview"
                }
            ]
        }"#;

        let tracks = ItunesClient::parse_response(body).unwrap();
        assert_eq!(tracks.len(), 2);

        let first = &tracks[0];
        assert_eq!(first.id, "itunes:1440833098");
        assert_eq!(first.display_title(), "Someone Like You");
        assert_eq!(first.album.as_deref(), Some("21"));
        assert_eq!(first.artwork_url.as_deref(), Some("https://example.com/100.jpg"));
        assert_eq!(first.duration_ms, Some(285240));
        assert!(first.is_playable());

        let second = &tracks[1];
        assert!(second.artist.is_none());
        assert!(!second.is_playable());
        assert_eq!(second.id, "unknown::No Preview");
    }

    #[test]
    fn test_parse_response_uses_small_artwork_when_large_missing() {
        let body = r#"{"results":[{"trackId":1,"artworkUrl60":"https://example.com/60.jpg"}]}"#;
        let tracks = ItunesClient::parse_response(body).unwrap();
        assert_eq!(tracks[0].artwork_url.as_deref(), Some("https://example.com/60.jpg"));
    }

    #[test]
    fn test_parse_response_without_results_field() {
        let tracks = ItunesClient::parse_response(r#"{"resultCount":0}"#).unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        assert!(ItunesClient::parse_response("<html>").is_err());
    }

    /// 실제 iTunes API를 호출하는 통합 테스트.
    /// 네트워크 접근이 필요하므로 기본 테스트에서는 제외한다.
    /// 실행: cargo test itunes -- --ignored
    #[test]
    #[ignore]
    fn test_search_live() {
        let tracks = client().search("adele").expect("iTunes 검색 실패");
        assert!(!tracks.is_empty());
        assert!(tracks.len() <= 20);
    }
}
