//! Replays UI messages against a shared paint session

use std::path::{Path, PathBuf};
use std::sync::{MutexGuard, PoisonError};

use doodle_config::BrushConfig;
use doodle_ipc::{EngineToUi, PaintCommand, UiToEngine, encode_event};
use doodle_painting::{CommandEffect, LoadOutcome, PaintSession, PendingLoad, SharedSession};
use doodle_source::{ColoringSource, ImageProvider, ImageRequest, SourceError, decode_data_uri};
use tracing::{debug, info, warn};

use crate::error::AppError;

/// Feeds messages to a session the way the UI would
pub struct Driver<F> {
    session: SharedSession,
    source: ColoringSource<F>,
    brush: BrushConfig,
    /// Notifications produced so far
    events: Vec<EngineToUi>,
}

impl<F: ImageProvider> Driver<F> {
    pub fn new(session: PaintSession, source: ColoringSource<F>, brush: BrushConfig) -> Self {
        Self {
            session: session.into_shared(),
            source,
            brush,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[EngineToUi] {
        &self.events
    }

    /// Tell the UI the canvas size and palette
    pub fn announce(&mut self) {
        let (width, height) = {
            let session = self.lock();
            (session.width(), session.height())
        };
        let palette = self.brush.palette.clone();
        self.emit(EngineToUi::Ready {
            width,
            height,
            palette,
        });
    }

    fn lock(&self) -> MutexGuard<'_, PaintSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&mut self, event: EngineToUi) {
        match encode_event(&event) {
            Ok(json) => info!("-> {}", json),
            Err(e) => warn!("Could not encode {:?}: {}", event, e),
        }
        self.events.push(event);
    }

    fn emit_error(&mut self, code: &str, message: impl ToString) {
        self.emit(EngineToUi::Error {
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    /// Run every step in order. Failures inside a step are reported as
    /// error notifications and do not stop the script.
    pub async fn run(&mut self, steps: Vec<UiToEngine>) {
        let total = steps.len();
        for (index, step) in steps.into_iter().enumerate() {
            debug!("Step {}/{}: {:?}", index + 1, total, step);
            self.step(step).await;
        }
    }

    pub async fn step(&mut self, step: UiToEngine) {
        match step {
            UiToEngine::Pointer { rect, event } => {
                let result = self.lock().handle_pointer(&rect, &event);
                if let Err(e) = result {
                    self.emit_error("paint", e);
                }
            }
            UiToEngine::Command(command) => self.command(command).await,
        }
    }

    async fn command(&mut self, command: PaintCommand) {
        // Operating range of the size slider
        let command = match command {
            PaintCommand::SetBrushSize { size } => PaintCommand::SetBrushSize {
                size: self.brush.clamp_size(size),
            },
            other => other,
        };

        let effect = self.lock().apply_command(&command);
        match effect {
            Ok(CommandEffect::Applied(events)) => events.into_iter().for_each(|e| self.emit(e)),
            Ok(CommandEffect::FetchImage { topic, complexity }) => {
                self.load_topic(ImageRequest::new(topic, complexity)).await
            }
            Ok(CommandEffect::DecodeImage { data_uri }) => {
                let pending = PaintSession::begin_load(&self.session);
                self.finish_load(pending, decode_data_uri(&data_uri), "inline image");
            }
            Ok(CommandEffect::Export { path }) => {
                if let Err(e) = self.export(Path::new(&path)) {
                    self.emit_error("export", e);
                }
            }
            Err(e) => self.emit_error("paint", e),
        }
    }

    async fn load_topic(&mut self, request: ImageRequest) {
        let pending = PaintSession::begin_load(&self.session);
        let fetched = self.source.fetch(&request).await;
        self.finish_load(pending, fetched, &request.topic);
    }

    fn finish_load(
        &mut self,
        pending: PendingLoad,
        fetched: Result<image::RgbaImage, SourceError>,
        label: &str,
    ) {
        let dimensions = fetched.as_ref().map(|image| image.dimensions()).ok();

        match pending.complete(fetched) {
            LoadOutcome::Applied | LoadOutcome::Queued => {
                if let Some((width, height)) = dimensions {
                    self.emit(EngineToUi::ImageLoaded { width, height });
                }
                let history = self.lock().history_event();
                self.emit(history);
            }
            LoadOutcome::Failed(e) => self.emit_error("load", e),
            LoadOutcome::Superseded | LoadOutcome::Detached => {
                debug!("Dropped result for \"{}\"", label)
            }
        }
    }

    /// Encode the current canvas as PNG
    pub fn export(&mut self, path: &Path) -> Result<(), AppError> {
        let snapshot = self.lock().export();
        snapshot
            .to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| AppError::Export {
                path: PathBuf::from(path),
                source,
            })?;
        info!(
            "Exported {}x{} canvas to {}",
            snapshot.width(),
            snapshot.height(),
            path.display()
        );
        self.emit(EngineToUi::Exported {
            path: path.display().to_string(),
        });
        Ok(())
    }

    #[cfg(test)]
    fn canvas(&self) -> image::RgbaImage {
        self.lock().export().to_rgba_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doodle_ipc::{PointerEvent, PointerSource, SurfaceRect, ToolKind, parse_script};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use doodle_source::{PresetLibrary, Unavailable};

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn driver(width: u32, height: u32) -> Driver<Unavailable> {
        let session = PaintSession::new(width, height, 11).unwrap();
        let source = ColoringSource::presets_only(PresetLibrary::new("no-such-dir"));
        Driver::new(session, source, BrushConfig::default())
    }

    fn pointer(event: PointerEvent) -> UiToEngine {
        UiToEngine::Pointer {
            rect: SurfaceRect::new(0.0, 0.0, 100.0, 100.0),
            event,
        }
    }

    fn mouse(x: f32, y: f32) -> PointerSource {
        PointerSource::Mouse { x, y }
    }

    /// Fallback that always returns a black page
    struct BlackPage;

    impl ImageProvider for BlackPage {
        async fn fetch(&mut self, _: &ImageRequest) -> Result<image::RgbaImage, SourceError> {
            Ok(image::RgbaImage::from_pixel(10, 10, image::Rgba(BLACK)))
        }
    }

    #[tokio::test]
    async fn test_stroke_then_undo() {
        let mut driver = driver(100, 100);
        driver
            .run(vec![
                UiToEngine::Command(PaintCommand::SelectColor {
                    color: "#000000".to_string(),
                }),
                pointer(PointerEvent::Down { source: mouse(10.0, 50.0) }),
                pointer(PointerEvent::Move { source: mouse(90.0, 50.0) }),
                pointer(PointerEvent::Up),
            ])
            .await;
        assert_eq!(driver.canvas().get_pixel(50, 50).0, BLACK);

        driver.run(vec![UiToEngine::Command(PaintCommand::Undo)]).await;
        assert_eq!(driver.canvas().get_pixel(50, 50).0, WHITE);
        assert_eq!(
            driver.events().last(),
            Some(&EngineToUi::HistoryChanged {
                snapshots: 1,
                can_undo: false
            })
        );
    }

    #[tokio::test]
    async fn test_brush_size_clamped_to_slider_range() {
        let mut driver = driver(20, 20);
        driver
            .step(UiToEngine::Command(PaintCommand::SetBrushSize { size: 500 }))
            .await;
        driver
            .step(UiToEngine::Command(PaintCommand::SetBrushSize { size: 1 }))
            .await;

        let sizes: Vec<u32> = driver
            .events()
            .iter()
            .filter_map(|e| match e {
                EngineToUi::ToolChanged { brush_size, .. } => Some(*brush_size),
                _ => None,
            })
            .collect();
        assert_eq!(sizes, vec![50, 5]);
    }

    #[tokio::test]
    async fn test_invalid_color_reported() {
        let mut driver = driver(20, 20);
        driver
            .step(UiToEngine::Command(PaintCommand::SelectColor {
                color: "teal".to_string(),
            }))
            .await;
        assert!(matches!(
            driver.events(),
            [EngineToUi::Error { code, .. }] if code == "paint"
        ));
    }

    #[tokio::test]
    async fn test_load_topic_without_source_reports_error() {
        let mut driver = driver(20, 20);
        driver
            .step(UiToEngine::Command(PaintCommand::LoadTopic {
                topic: "a whale".to_string(),
                complexity: "simple".to_string(),
            }))
            .await;
        assert!(matches!(
            driver.events(),
            [EngineToUi::Error { code, .. }] if code == "load"
        ));
        assert_eq!(driver.canvas().get_pixel(0, 0).0, WHITE);
    }

    #[tokio::test]
    async fn test_load_topic_applies_page() {
        let session = PaintSession::new(20, 20, 11).unwrap();
        let source = ColoringSource::new(PresetLibrary::new("no-such-dir"), BlackPage);
        let mut driver = Driver::new(session, source, BrushConfig::default());

        driver
            .step(UiToEngine::Command(PaintCommand::LoadTopic {
                topic: "a whale".to_string(),
                complexity: String::new(),
            }))
            .await;
        assert_eq!(driver.canvas().get_pixel(10, 10).0, BLACK);
        assert_eq!(
            driver.events(),
            &[
                EngineToUi::ImageLoaded {
                    width: 10,
                    height: 10
                },
                EngineToUi::HistoryChanged {
                    snapshots: 2,
                    can_undo: true
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_announce_reports_palette() {
        let mut driver = driver(30, 20);
        driver.announce();
        match driver.events() {
            [EngineToUi::Ready {
                width,
                height,
                palette,
            }] => {
                assert_eq!((*width, *height), (30, 20));
                assert_eq!(palette.len(), 10);
                assert_eq!(palette[0], doodle_config::DEFAULT_COLOR);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_inline_image() {
        let page = image::RgbaImage::from_pixel(4, 4, image::Rgba(BLACK));
        let mut bytes = Vec::new();
        page.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(&bytes));

        let mut driver = driver(20, 20);
        driver
            .step(UiToEngine::Command(PaintCommand::LoadImage { data_uri: uri }))
            .await;
        assert_eq!(driver.canvas().get_pixel(10, 10).0, BLACK);
        assert_eq!(
            driver.events().first(),
            Some(&EngineToUi::ImageLoaded {
                width: 4,
                height: 4
            })
        );

        driver
            .step(UiToEngine::Command(PaintCommand::LoadImage {
                data_uri: "data:image/png;base64,aGVsbG8=".to_string(),
            }))
            .await;
        assert!(matches!(
            driver.events().last(),
            Some(EngineToUi::Error { code, .. }) if code == "load"
        ));
        assert_eq!(driver.canvas().get_pixel(10, 10).0, BLACK);
    }

    #[tokio::test]
    async fn test_script_export_writes_png() {
        let path = std::env::temp_dir().join(format!("doodle-export-{}.png", std::process::id()));
        let script = format!(
            r##"[
                {{ "type": "Command", "data": {{ "command": "select_tool", "tool": "bucket" }} }},
                {{ "type": "Command", "data": {{ "command": "select_color", "color": "#4ECDC4" }} }},
                {{ "type": "Pointer", "data": {{
                    "rect": {{ "left": 0.0, "top": 0.0, "width": 100.0, "height": 100.0 }},
                    "event": {{ "phase": "down", "source": {{ "kind": "touch", "points": [[5.0, 5.0]] }} }}
                }} }},
                {{ "type": "Command", "data": {{ "command": "export", "path": {:?} }} }}
            ]"##,
            path.display().to_string()
        );

        let mut driver = driver(8, 8);
        driver.run(parse_script(&script).unwrap()).await;

        let written = image::open(&path).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (8, 8));
        assert_eq!(written.get_pixel(7, 7).0, [0x4E, 0xCD, 0xC4, 255]);
        assert!(matches!(
            driver.events().first(),
            Some(EngineToUi::ToolChanged {
                tool: ToolKind::Bucket,
                ..
            })
        ));
        assert!(matches!(driver.events().last(), Some(EngineToUi::Exported { .. })));

        std::fs::remove_file(&path).unwrap();
    }
}
