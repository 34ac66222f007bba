use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use dialoguer::{Input, Select};

use crate::audio::MediaDevice;
use crate::config::{self, Config};
use crate::core::format::{format_duration_ms, truncate_text};
use crate::core::moods::Mood;
use crate::core::player::{PlayIndicator, PlaybackController};
use crate::core::session::{DiscoverySession, MoodSearch};
use crate::error::Error;
use crate::models::Track;
use crate::sources::itunes::ItunesClient;

const CELL_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "moodtune", about = "기분에 맞는 음악을 찾아 미리듣기로 재생합니다")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 선택할 수 있는 기분과 검색어 목록 표시
    Moods,
    /// 기분으로 곡 검색
    Mood {
        /// happy, sad, angry, relaxed, energetic, romantic, nostalgic, focused
        mood: String,
    },
    /// 검색어로 곡 검색
    Search {
        /// 검색어
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// 대화형으로 검색하고 미리듣기 재생
    Browse,
    /// 검색 설정
    Config,
}

pub fn run(cli: Cli, cfg: Config) -> Result<()> {
    match cli.command {
        Some(Commands::Moods) => cmd_moods(),
        Some(Commands::Mood { mood }) => cmd_mood(&cfg, &mood),
        Some(Commands::Search { query }) => cmd_search(&cfg, &query.join(" ")),
        Some(Commands::Browse) => cmd_browse(&cfg),
        Some(Commands::Config) => cmd_config(cfg),
        None => {
            println!("사용법: moodtune <명령어>");
            println!("자세한 정보는 moodtune --help를 실행하세요.");
            Ok(())
        }
    }
}

fn new_session(cfg: &Config) -> Result<DiscoverySession> {
    let client = ItunesClient::new(&cfg.itunes)?;
    Ok(DiscoverySession::new(Box::new(client)))
}

fn cmd_moods() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["기분", "검색어"]);
    for mood in Mood::ALL {
        table.add_row(vec![
            Cell::new(mood.as_str()),
            Cell::new(mood.search_terms().join(", ")),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn cmd_mood(cfg: &Config, mood: &str) -> Result<()> {
    let mood: Mood = mood.parse()?;
    let mut session = new_session(cfg)?;

    let outcome = session.search_by_mood(mood);
    print_mood_outcome(&session, &outcome);
    print_results(session.results());
    Ok(())
}

fn cmd_search(cfg: &Config, query: &str) -> Result<()> {
    let mut session = new_session(cfg)?;

    match session.search_by_term(query) {
        Ok(count) => {
            println!("{} 검색 결과 {}곡\n", session.context_label(), count);
            print_results(session.results());
        }
        Err(e) => report_search_error(&e),
    }
    Ok(())
}

fn print_mood_outcome(session: &DiscoverySession, outcome: &MoodSearch) {
    println!("기분: {} (검색어: {})", session.context_label(), outcome.term);
    if outcome.fallback {
        println!("검색에 실패해 예시 곡을 보여줍니다.");
    }
    if session.results().is_empty() {
        println!("이 기분에 맞는 곡을 찾지 못했습니다. 다른 기분을 선택해 보세요!");
    }
    println!();
}

fn report_search_error(e: &Error) {
    if let Error::ProviderFailure(detail) = e {
        tracing::warn!(%detail, "검색 실패");
    }
    // 전송 실패도 사용자에게는 결과 없음으로 보인다
    println!("{}", Error::NoResults);
}

fn print_results(tracks: &[Track]) {
    if tracks.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "제목", "아티스트", "앨범", "길이"]);
    for (i, track) in tracks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(truncate_text(track.display_title(), CELL_WIDTH)),
            Cell::new(truncate_text(track.display_artist(), CELL_WIDTH)),
            Cell::new(truncate_text(track.display_album(), CELL_WIDTH)),
            Cell::new(format_duration_ms(track.duration_ms)),
        ]);
    }
    println!("{table}");
}

#[cfg(feature = "audio")]
fn cmd_browse(cfg: &Config) -> Result<()> {
    let session = new_session(cfg)?;
    let device = crate::audio::rodio_device::RodioDevice::new()?;
    browse(session, PlaybackController::new(device))
}

#[cfg(not(feature = "audio"))]
fn cmd_browse(_cfg: &Config) -> Result<()> {
    anyhow::bail!("오디오 기능이 활성화되지 않았습니다. 다시 빌드하세요: cargo build --features audio");
}

/// 대화형 탐색 루프. 메뉴를 띄우기 전마다 장치 알림을 처리한다.
/// `audio` 기능 없이 빌드하면 이 아래 메뉴 함수들은 쓰이지 않는다.
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
fn browse<D: MediaDevice>(
    mut session: DiscoverySession,
    mut player: PlaybackController<D>,
) -> Result<()> {
    let menu = ["기분으로 찾기", "검색어로 찾기", "재생목록", "플레이어", "종료"];

    loop {
        print_status(&mut player);
        let choice = Select::new()
            .with_prompt("무엇을 할까요?")
            .items(&menu)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let names: Vec<&str> = Mood::ALL.iter().map(|m| m.as_str()).collect();
                let picked = Select::new()
                    .with_prompt("기분을 선택하세요")
                    .items(&names)
                    .default(0)
                    .interact()?;
                println!("검색 중...");
                let outcome = session.search_by_mood(Mood::ALL[picked]);
                print_mood_outcome(&session, &outcome);
                results_menu(&session, &mut player)?;
                session.reset();
            }
            1 => {
                let query: String = Input::new()
                    .with_prompt("검색어")
                    .allow_empty(true)
                    .interact_text()?;
                if query.trim().is_empty() {
                    continue;
                }
                println!("검색 중...");
                match session.search_by_term(&query) {
                    Ok(_) => results_menu(&session, &mut player)?,
                    Err(e) => report_search_error(&e),
                }
                session.reset();
            }
            2 => playlist_menu(&mut player)?,
            3 => player_menu(&mut player)?,
            _ => break,
        }
    }

    player.close_player();
    Ok(())
}

#[cfg_attr(not(feature = "audio"), allow(dead_code))]
fn print_status<D: MediaDevice>(player: &mut PlaybackController<D>) {
    player.pump_events();

    if let Some(notice) = player.take_notice() {
        println!("⚠ {}", notice);
    }
    if let Some(track) = player.current() {
        let view = player.view();
        let icon = match view.indicator {
            PlayIndicator::Playing => "▶",
            PlayIndicator::Paused => "⏸",
        };
        println!(
            "{} {}  {} / {} ({:.0}%)",
            icon,
            track.summary(),
            view.elapsed,
            view.total,
            view.progress * 100.0
        );
    }
}

#[cfg_attr(not(feature = "audio"), allow(dead_code))]
fn results_menu<D: MediaDevice>(
    session: &DiscoverySession,
    player: &mut PlaybackController<D>,
) -> Result<()> {
    if session.results().is_empty() {
        return Ok(());
    }

    loop {
        print_status(player);
        let mut items: Vec<String> = session.results().iter().map(Track::summary).collect();
        items.push("뒤로".to_string());

        let picked = Select::new()
            .with_prompt(format!("{} 검색 결과", session.context_label()))
            .items(&items)
            .default(0)
            .interact()?;

        let Some(track) = session.result(picked) else {
            return Ok(());
        };

        let action = Select::new()
            .with_prompt(track.summary())
            .items(&["재생", "재생목록에 추가", "뒤로"])
            .default(0)
            .interact()?;

        match action {
            0 => {
                if let Err(e) = player.play(track) {
                    println!("{}", e);
                }
            }
            1 => {
                if player.add_to_playlist(track) {
                    println!("재생목록에 추가했습니다: {}", track.display_title());
                } else {
                    println!("이미 재생목록에 있습니다: {}", track.display_title());
                }
            }
            _ => {}
        }
    }
}

#[cfg_attr(not(feature = "audio"), allow(dead_code))]
fn playlist_menu<D: MediaDevice>(player: &mut PlaybackController<D>) -> Result<()> {
    loop {
        print_status(player);
        if player.playlist().is_empty() {
            println!("재생목록이 비어 있습니다.");
            return Ok(());
        }

        let mut items: Vec<String> = player.playlist().tracks().iter().map(Track::summary).collect();
        items.push("뒤로".to_string());

        let picked = Select::new()
            .with_prompt(format!("재생목록 ({}곡)", player.playlist().len()))
            .items(&items)
            .default(0)
            .interact()?;

        if picked >= player.playlist().len() {
            return Ok(());
        }

        let action = Select::new()
            .with_prompt(&items[picked])
            .items(&["재생", "삭제", "뒤로"])
            .default(0)
            .interact()?;

        let result = match action {
            0 => player.play_from_playlist(picked),
            1 => player.remove_from_playlist(picked).map(|removed| {
                println!("재생목록에서 삭제했습니다: {}", removed.display_title());
            }),
            _ => Ok(()),
        };
        if let Err(e) = result {
            println!("{}", e);
        }
    }
}

#[cfg_attr(not(feature = "audio"), allow(dead_code))]
fn player_menu<D: MediaDevice>(player: &mut PlaybackController<D>) -> Result<()> {
    loop {
        print_status(player);
        if player.current().is_none() {
            println!("재생 중인 곡이 없습니다.");
            return Ok(());
        }

        let action = Select::new()
            .with_prompt("플레이어")
            .items(&["재생/일시정지", "새로고침", "플레이어 닫기", "뒤로"])
            .default(0)
            .interact()?;

        match action {
            0 => {
                if let Err(e) = player.toggle_play_pause() {
                    println!("{}", e);
                }
            }
            1 => {}
            2 => {
                player.close_player();
                return Ok(());
            }
            _ => return Ok(()),
        }
    }
}

fn cmd_config(mut cfg: Config) -> Result<()> {
    println!("iTunes 검색 설정\n");

    let country: String = Input::new()
        .with_prompt("국가 코드 (비우면 기본값)")
        .with_initial_text(cfg.itunes.country.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let timeout: String = Input::new()
        .with_prompt("요청 제한 시간(초)")
        .with_initial_text(cfg.itunes.timeout_secs.to_string())
        .interact_text()?;

    let country = country.trim().to_string();
    cfg.itunes.country = (!country.is_empty()).then_some(country);
    cfg.itunes.timeout_secs = timeout
        .trim()
        .parse()
        .context("제한 시간은 숫자여야 합니다")?;

    config::save_config(&cfg)?;
    println!("\n설정이 저장되었습니다!");
    Ok(())
}
