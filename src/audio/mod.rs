#[cfg(feature = "audio")]
pub mod rodio_device;

use std::sync::mpsc::Sender;

use anyhow::Result;

/// 재생 장치가 보내는 알림.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// 길이 정보를 읽음
    MetadataReady,
    /// 재생 위치가 바뀜
    PositionChanged,
    /// 끝까지 재생함. 장치는 스스로 멈춘다.
    Ended,
    /// 디코딩/출력 오류
    Error(String),
    /// 재생/일시정지 상태가 바뀜
    PlayStateChanged,
}

/// 한 번에 하나의 오디오만 다루는 재생 장치.
/// 위치와 길이는 초 단위이며, 길이를 모르면 NaN이다.
pub trait MediaDevice {
    /// 알림을 받을 채널을 등록한다. 컨트롤러가 한 번만 호출한다.
    fn subscribe(&mut self, events: Sender<DeviceEvent>);
    /// 새 오디오를 불러온다. 이전 오디오는 버린다.
    fn load(&mut self, url: &str) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn position(&self) -> f64;
    fn duration(&self) -> f64;
    /// 폴링 방식 장치가 위치/종료 알림을 보낼 기회.
    fn tick(&mut self) {}
}
