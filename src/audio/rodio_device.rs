use std::io::Cursor;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::audio::{DeviceEvent, MediaDevice};

/// 기본 출력 장치로 미리듣기를 재생하는 rodio 장치.
/// 미리듣기는 30초 남짓이라 통째로 받아서 메모리에서 디코딩한다.
pub struct RodioDevice {
    client: reqwest::blocking::Client,
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    data: Option<Arc<[u8]>>,
    duration: f64,
    ended: bool,
    events: Option<Sender<DeviceEvent>>,
}

impl RodioDevice {
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("기본 오디오 출력 장치를 열 수 없습니다")?;
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("미리듣기 HTTP 클라이언트 생성에 실패했습니다")?;

        Ok(Self {
            client,
            _stream: stream,
            handle,
            sink: None,
            data: None,
            duration: f64::NAN,
            ended: false,
            events: None,
        })
    }

    fn emit(&self, event: DeviceEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    /// 받아 둔 데이터로 새 sink를 만든다. 일시정지 상태로 시작한다.
    fn prepare_sink(&mut self) -> Result<()> {
        let data = self.data.clone().context("불러온 오디오가 없습니다")?;
        let decoder = Decoder::new(Cursor::new(data)).context("오디오 디코딩에 실패했습니다")?;
        self.duration = decoder
            .total_duration()
            .map(|d| d.as_secs_f64())
            .unwrap_or(f64::NAN);

        let sink = Sink::try_new(&self.handle).context("오디오 출력을 만들 수 없습니다")?;
        sink.pause();
        sink.append(decoder);
        self.sink = Some(sink);
        self.ended = false;
        Ok(())
    }
}

impl MediaDevice for RodioDevice {
    fn subscribe(&mut self, events: Sender<DeviceEvent>) {
        self.events = Some(events);
    }

    fn load(&mut self, url: &str) -> Result<()> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.data = None;
        self.duration = f64::NAN;

        tracing::debug!(url, "미리듣기 다운로드");
        let bytes = self
            .client
            .get(url)
            .send()
            .context("미리듣기 다운로드에 실패했습니다")?
            .error_for_status()
            .context("미리듣기 요청이 실패했습니다")?
            .bytes()
            .context("미리듣기 데이터 읽기에 실패했습니다")?;

        self.data = Some(Arc::from(bytes.as_ref()));
        self.prepare_sink()?;
        self.emit(DeviceEvent::MetadataReady);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.ended {
            self.prepare_sink()?;
        }
        let sink = self.sink.as_ref().context("불러온 오디오가 없습니다")?;
        sink.play();
        self.emit(DeviceEvent::PlayStateChanged);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
            self.emit(DeviceEvent::PlayStateChanged);
        }
    }

    fn is_paused(&self) -> bool {
        match &self.sink {
            Some(sink) => self.ended || sink.is_paused(),
            None => true,
        }
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|s| s.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };
        if self.ended || sink.is_paused() {
            return;
        }
        if sink.empty() {
            self.ended = true;
            self.emit(DeviceEvent::Ended);
        } else {
            self.emit(DeviceEvent::PositionChanged);
        }
    }
}
