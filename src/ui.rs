use std::ffi::CString;
use arboard::Clipboard;
use raylib::color::Color;
use raylib::consts::KeyboardKey::KEY_C;
use raylib::consts::MouseButton::MOUSE_BUTTON_LEFT;
use raylib::drawing::RaylibDraw;
use raylib::math::{Rectangle, Vector2};
use raylib::misc::AsF32;
use raylib::prelude::RaylibDrawGui;
use raylib::texture::{Image, Texture2D};
use raylib::{ffi, RaylibHandle, RaylibThread};
use tracing::{debug, info, warn};
use crate::earth_position::WorldCanvas;
use crate::error::TrackerError;
use crate::overhead_pass::OverheadPassInfo;
use crate::position::Position;

const UI_GRID_SIZE: f32 = 8.0;

fn grid_value(value: f32) -> f32 {
    value / UI_GRID_SIZE
}

fn grid_anchor(x: f32, y: f32) -> Vector2 {
    Vector2::new(x * UI_GRID_SIZE, y * UI_GRID_SIZE)
}

fn grid_rectangle(anchor: Vector2, x: f32, y: f32, w: f32, h: f32) -> Rectangle {
    Rectangle::new(
        anchor.x + x * UI_GRID_SIZE,
        anchor.y + y * UI_GRID_SIZE,
        w * UI_GRID_SIZE,
        h * UI_GRID_SIZE
    )
}

/// Width in pixels of `text` in the default font.
fn text_width(text: &str, font_size: i32) -> i32 {
    match CString::new(text) {
        Ok(c_text) => unsafe { ffi::MeasureText(c_text.as_ptr(), font_size) },
        Err(_) => 0,
    }
}

fn load_image(path: &str) -> Result<Image, TrackerError> {
    let asset_error = |reason: String| TrackerError::AssetLoad { path: path.to_string(), reason };

    std::fs::metadata(path).map_err(|err| asset_error(err.to_string()))?;
    let image = Image::load_image(path).map_err(|err| asset_error(err.to_string()))?;

    debug!(path, width = image.width, height = image.height, "loaded asset");
    Ok(image)
}

/// Map background and station icon, decoded before any window is opened.
pub(crate) struct Assets {
    map: Image,
    icon: Image,
}

impl Assets {
    pub(crate) const MAP_PATH: &'static str = "map.gif";
    pub(crate) const ICON_PATH: &'static str = "iss.gif";

    pub(crate) fn load() -> Result<Assets, TrackerError> {
        Self::load_from(Self::MAP_PATH, Self::ICON_PATH)
    }

    pub(crate) fn load_from(map_path: &str, icon_path: &str) -> Result<Assets, TrackerError> {
        Ok(Assets {
            map: load_image(map_path)?,
            icon: load_image(icon_path)?,
        })
    }
}

///
/// World map with the station and the observer marked on it.
///
/// Owning the raylib handle makes the window a scoped resource: it is closed
/// when the `Window` is dropped, whichever way the run ends.
///
pub(crate) struct Window {
    // Textures must be unloaded before the handle closes the GL context
    map: Texture2D,
    icon: Texture2D,

    rl: RaylibHandle,
    thread: RaylibThread,

    canvas: WorldCanvas,
    station: Position,
    pass: OverheadPassInfo,

    caption: String,
    caption_rectangle: Rectangle,
    copy_rectangle: Rectangle,
    update_clipboard: bool,
    dismissed: bool,
}

impl Window {
    const WIDTH: i32 = 720;
    const HEIGHT: i32 = 360;

    const FPS: u32 = 30;

    const OBSERVER_RADIUS: f32 = 3.0;
    const LABEL_FONT_SIZE: i32 = 10;
    const LABEL_MARGIN: i32 = 4;

    pub(crate) fn open(assets: &Assets, station: &Position,
                       pass: &OverheadPassInfo) -> Result<Window, TrackerError> {
        let (mut rl, thread) = raylib::init()
            .size(Self::WIDTH, Self::HEIGHT)
            .title("ISS Visualizer")
            .build();

        let map = rl.load_texture_from_image(&thread, &assets.map)
            .map_err(|err| TrackerError::Window(err.to_string()))?;
        let icon = rl.load_texture_from_image(&thread, &assets.icon)
            .map_err(|err| TrackerError::Window(err.to_string()))?;

        let canvas = WorldCanvas::new(Self::WIDTH.as_f32(), Self::HEIGHT.as_f32());

        let caption = format!("ISS {}  |  click to close, C to copy", station.report());
        let caption_rectangle = grid_rectangle(grid_anchor(1.0, 0.5), 0.0, 0.0,
                                               grid_value(Self::WIDTH.as_f32()) - 2.0, 2.0);

        let copy_button_height = 2.5;
        let copy_anchor = grid_anchor(1.0, grid_value(Self::HEIGHT.as_f32()) - copy_button_height - 0.5);
        let copy_rectangle = grid_rectangle(copy_anchor, 0.0, 0.0, 8.0, copy_button_height);

        rl.set_target_fps(Self::FPS);
        info!(width = Self::WIDTH, height = Self::HEIGHT, "window open");

        Ok(Window {
            map,
            icon,
            rl,
            thread,
            canvas,
            station: *station,
            pass: *pass,
            caption,
            caption_rectangle,
            copy_rectangle,
            update_clipboard: false,
            dismissed: false,
        })
    }

    /// Blocks until the user clicks the map or closes the window.
    pub(crate) fn run(mut self) {
        while !self.dismissed && !self.rl.window_should_close() {
            self.update();
            self.draw();
        }
        info!("window closed");
    }

    fn update(&mut self) {
        let mouse = self.rl.get_mouse_position();
        let clicked = self.rl.is_mouse_button_pressed(MOUSE_BUTTON_LEFT);

        // The copy button handles its own clicks in draw
        if clicked && !self.copy_rectangle.check_collision_point_rec(mouse) {
            self.dismissed = true;
        }
        if self.rl.is_key_pressed(KEY_C) {
            self.update_clipboard = true;
        }
    }

    fn clipboard_text(&self) -> String {
        format!("{}\nNext pass: {}", self.station.report(), self.pass.pass_time)
    }

    fn draw(&mut self) {
        let (station_x, station_y) = self.canvas.to_screen(self.station.geo());
        let (observer_x, observer_y) = self.canvas.to_screen(self.pass.observer());
        let label = self.pass.pass_time.to_string();
        let label_width = text_width(&label, Self::LABEL_FONT_SIZE);

        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);

        // Background stretched over the whole world
        let map_source = Rectangle::new(0.0, 0.0, self.map.width.as_f32(), self.map.height.as_f32());
        let map_destination = Rectangle::new(0.0, 0.0, self.canvas.width, self.canvas.height);
        d.draw_texture_pro(&self.map, map_source, map_destination, Vector2::zero(), 0.0, Color::WHITE);

        // Observer, labelled with the pass time ending at the marker
        d.draw_circle_v(Vector2::new(observer_x, observer_y), Self::OBSERVER_RADIUS, Color::YELLOW);
        d.draw_text(&label,
                    observer_x as i32 - label_width - Self::LABEL_MARGIN,
                    observer_y as i32 - Self::LABEL_FONT_SIZE / 2,
                    Self::LABEL_FONT_SIZE,
                    Color::YELLOW);

        // Station icon centred on its position
        d.draw_texture(&self.icon,
                       station_x as i32 - self.icon.width / 2,
                       station_y as i32 - self.icon.height / 2,
                       Color::WHITE);

        d.gui_label(self.caption_rectangle, self.caption.as_str());
        if d.gui_button(self.copy_rectangle, "Copy") { self.update_clipboard = true; }

        drop(d);

        if self.update_clipboard {
            let text = self.clipboard_text();
            let clipboard_result = Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_text(text));

            match clipboard_result {
                Ok(()) => info!("copied station position to clipboard"),
                Err(error) => warn!(%error, "could not copy to clipboard"),
            }

            self.update_clipboard = false;
        }
    }
}
