use std::sync::mpsc::{self, Receiver};

use crate::audio::{DeviceEvent, MediaDevice};
use crate::core::format::{format_time, progress_fraction};
use crate::error::{Error, Result};
use crate::models::Track;

pub const PLAYBACK_ERROR_NOTICE: &str = "이 곡을 재생할 수 없습니다. 다른 곡을 선택하세요.";

/// 식별자가 겹치지 않는 사용자 재생목록. 메모리에만 있다.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// 같은 식별자가 없을 때만 끝에 추가한다. 추가했으면 true.
    pub fn add(&mut self, track: Track) -> bool {
        if self.tracks.iter().any(|t| t.id == track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    pub fn remove(&mut self, index: usize) -> Result<Track> {
        if index >= self.tracks.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }
        Ok(self.tracks.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&Track> {
        self.tracks.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.tracks.len(),
        })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// 재생/일시정지 버튼 표시.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIndicator {
    Playing,
    Paused,
}

/// 플레이어 패널에 보여줄 값.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub indicator: PlayIndicator,
    pub progress: f64,
    pub elapsed: String,
    pub total: String,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self {
            indicator: PlayIndicator::Paused,
            progress: 0.0,
            elapsed: format_time(0.0),
            total: format_time(0.0),
        }
    }
}

/// 현재 곡과 재생 장치, 재생목록을 관리한다.
///
/// 장치 알림은 채널로 받고 [`PlaybackController::pump_events`]에서 하나씩 처리하므로
/// 핸들러가 동시에 돌지 않는다.
pub struct PlaybackController<D: MediaDevice> {
    device: D,
    events: Receiver<DeviceEvent>,
    current: Option<Track>,
    playlist: Playlist,
    view: PlayerView,
    notice: Option<String>,
}

impl<D: MediaDevice> PlaybackController<D> {
    pub fn new(mut device: D) -> Self {
        let (tx, rx) = mpsc::channel();
        device.subscribe(tx);
        Self {
            device,
            events: rx,
            current: None,
            playlist: Playlist::new(),
            view: PlayerView::default(),
            notice: None,
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn view(&self) -> &PlayerView {
        &self.view
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// 사용자에게 보여줄 오류 알림을 꺼낸다.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// 곡을 불러와 재생한다.
    /// 미리듣기가 없으면 상태를 바꾸지 않고 `NotPlayable`.
    /// 장치가 거부하면 현재 곡은 남기고 정지 상태로 `PlaybackFailure`.
    pub fn play(&mut self, track: &Track) -> Result<()> {
        let url = match track.preview_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => return Err(Error::NotPlayable(track.display_title().to_string())),
        };

        tracing::info!(id = %track.id, title = track.display_title(), "재생");
        self.current = Some(track.clone());
        self.view = PlayerView::default();

        let started = self.device.load(url).and_then(|_| self.device.play());
        if let Err(e) = started {
            let message = format!("{:#}", e);
            tracing::warn!(id = %track.id, error = %message, "재생 실패");
            self.view.indicator = PlayIndicator::Paused;
            self.notice = Some(PLAYBACK_ERROR_NOTICE.to_string());
            return Err(Error::PlaybackFailure(message));
        }

        self.refresh_indicator();
        Ok(())
    }

    /// 재생 중이면 멈추고, 아니면 재생한다. 불러온 곡이 없으면 아무것도 하지 않는다.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Ok(());
        }

        if self.device.is_paused() {
            if let Err(e) = self.device.play() {
                self.notice = Some(PLAYBACK_ERROR_NOTICE.to_string());
                self.refresh_indicator();
                return Err(Error::PlaybackFailure(format!("{:#}", e)));
            }
        } else {
            self.device.pause();
        }
        self.refresh_indicator();
        Ok(())
    }

    /// 플레이어 패널을 닫는다. 재생은 멈추지만 현재 곡은 유지한다.
    pub fn close_player(&mut self) {
        if self.current.is_some() {
            self.device.pause();
            self.refresh_indicator();
        }
    }

    pub fn add_to_playlist(&mut self, track: &Track) -> bool {
        let added = self.playlist.add(track.clone());
        tracing::debug!(id = %track.id, added, "재생목록 추가");
        added
    }

    pub fn remove_from_playlist(&mut self, index: usize) -> Result<Track> {
        let removed = self.playlist.remove(index)?;
        tracing::debug!(id = %removed.id, index, "재생목록 삭제");
        Ok(removed)
    }

    pub fn play_from_playlist(&mut self, index: usize) -> Result<()> {
        let track = self.playlist.get(index)?.clone();
        self.play(&track)
    }

    /// 쌓인 장치 알림을 모두 처리한다. 처리한 개수를 돌려준다.
    pub fn pump_events(&mut self) -> usize {
        self.device.tick();
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    fn handle_event(&mut self, event: DeviceEvent) {
        tracing::trace!(?event, "장치 알림");
        match event {
            DeviceEvent::MetadataReady => {
                self.view.total = format_time(self.device.duration());
            }
            DeviceEvent::PositionChanged => {
                let position = self.device.position();
                let duration = self.device.duration();
                self.view.progress = progress_fraction(position, duration);
                self.view.elapsed = format_time(position);
                self.view.total = format_time(duration);
            }
            DeviceEvent::Ended => {
                self.view.indicator = PlayIndicator::Paused;
            }
            DeviceEvent::Error(message) => {
                tracing::warn!(%message, "장치 오류");
                // 오류 뒤에는 멈춘 상태로 본다
                self.device.pause();
                self.refresh_indicator();
                self.notice = Some(PLAYBACK_ERROR_NOTICE.to_string());
            }
            DeviceEvent::PlayStateChanged => self.refresh_indicator(),
        }
    }

    fn refresh_indicator(&mut self) {
        self.view.indicator = if self.device.is_paused() {
            PlayIndicator::Paused
        } else {
            PlayIndicator::Playing
        };
    }
}
