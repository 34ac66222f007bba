use crate::core::moods::Mood;
use crate::models::Track;

struct Sample {
    title: &'static str,
    artist: &'static str,
    album: &'static str,
    artwork: &'static str,
    preview: u8,
}

const PREVIEW_BASE: &str = "https://audio-samples.github.io/samples/mp3/blizzard_biased";

fn table(mood: Mood) -> [Sample; 2] {
    match mood {
        Mood::Happy => [
            sample("Happy", "Pharrell Williams", "G I R L", "FFD700", 1),
            sample("Good Time", "Owl City & Carly Rae Jepsen", "The Midsummer Station", "FF6B6B", 2),
        ],
        Mood::Sad => [
            sample("Someone Like You", "Adele", "21", "4A90E2", 3),
            sample("All of Me", "John Legend", "Love in the Future", "9B59B6", 4),
        ],
        Mood::Angry => [
            sample("In The End", "Linkin Park", "Hybrid Theory", "E74C3C", 5),
            sample("Break Stuff", "Limp Bizkit", "Significant Other", "8B4513", 6),
        ],
        Mood::Relaxed => [
            sample("Weightless", "Marconi Union", "Different Colours", "87CEEB", 7),
            sample("Claire de Lune", "Debussy", "Suite Bergamasque", "98FB98", 8),
        ],
        Mood::Energetic => [
            sample("Eye of the Tiger", "Survivor", "Eye of the Tiger", "FF4500", 9),
            sample("We Will Rock You", "Queen", "News of the World", "FFD700", 10),
        ],
        Mood::Romantic => [
            sample("Perfect", "Ed Sheeran", "÷ (Divide)", "FF69B4", 11),
            sample("Just the Way You Are", "Bruno Mars", "Doo-Wops & Hooligans", "FF1493", 12),
        ],
        Mood::Nostalgic => [
            sample("Bohemian Rhapsody", "Queen", "A Night at the Opera", "8A2BE2", 13),
            sample("Hotel California", "Eagles", "Hotel California", "CD853F", 14),
        ],
        Mood::Focused => [
            sample("Moonlight Sonata", "Beethoven", "Piano Sonatas", "2F4F4F", 15),
            sample("The Four Seasons", "Vivaldi", "Le quattro stagioni", "228B22", 16),
        ],
    }
}

// 미리듣기는 blizzard_01.mp3 ~ blizzard_16.mp3, 아트워크는 색상만 다른 placeholder
fn sample(
    title: &'static str,
    artist: &'static str,
    album: &'static str,
    artwork: &'static str,
    preview: u8,
) -> Sample {
    Sample {
        title,
        artist,
        album,
        artwork,
        preview,
    }
}

/// 검색이 실패하거나 결과가 없을 때 보여줄 기분별 예시 곡 두 개.
pub fn fallback_tracks(mood: Mood) -> Vec<Track> {
    table(mood)
        .iter()
        .enumerate()
        .map(|(i, s)| Track {
            id: format!("sample:{}:{}", mood, i + 1),
            title: Some(s.title.to_string()),
            artist: Some(s.artist.to_string()),
            album: Some(s.album.to_string()),
            artwork_url: Some(format!(
                "https://via.placeholder.com/100x100/{}/ffffff",
                s.artwork
            )),
            preview_url: Some(format!("{}/blizzard_{:02}.mp3", PREVIEW_BASE, s.preview)),
            duration_ms: None,
            source: "sample".to_string(),
        })
        .collect()
}
