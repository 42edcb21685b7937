//! Scratch-off container: content underneath, an erasable cover on top.

use std::hash::Hash;

use egui::{
    Align, Color32, ColorImage, Id, Layout, Rect, Response, Sense, TextureHandle, TextureOptions,
    Ui, Vec2, pos2,
};
use kurbo::Size;
use scratchable_core::{ContentAlignment, RevealPhase, Scratchable};
use scratchable_render::{PixelRenderer, render_scratchable};

use crate::pointer::PointerTranslator;

/// Result of showing a [`ScratchArea`].
pub struct ScratchAreaResponse<R> {
    /// What the content closure returned.
    pub inner: R,
    /// The cover response while covered, the content response afterwards.
    pub response: Response,
    /// Reveal phase after this frame.
    pub phase: RevealPhase,
}

/// Hosts a [`Scratchable`] in an egui layout.
///
/// The caller owns the controller and keeps it across frames:
///
/// ```ignore
/// ScratchArea::new("fortune", &mut self.fortune).show(ui, |ui| {
///     ui.label("Lucky!");
/// });
/// ```
pub struct ScratchArea<'a> {
    id_salt: Id,
    scratchable: &'a mut Scratchable,
}

impl<'a> ScratchArea<'a> {
    pub fn new(id_salt: impl Hash, scratchable: &'a mut Scratchable) -> Self {
        Self {
            id_salt: Id::new(id_salt),
            scratchable,
        }
    }

    /// Show the content and, on top of it, the cover.
    pub fn show<R>(
        self,
        ui: &mut Ui,
        add_contents: impl FnOnce(&mut Ui) -> R,
    ) -> ScratchAreaResponse<R> {
        let Self {
            id_salt,
            scratchable,
        } = self;
        let id = ui.make_persistent_id(id_salt);

        let layout = layout_for(scratchable.config().content_alignment);
        let content = ui.with_layout(layout, add_contents);
        let rect = content.response.rect;

        // The controller works in cover texture pixels
        let (now_ms, max_side) = ui.input(|i| ((i.time * 1000.0) as u64, i.max_texture_side));
        let texels = texels_per_point(rect.size(), ui.ctx().pixels_per_point(), max_side);
        scratchable.set_scale_factor(texels as f64);
        scratchable.set_content_size(Size::new(
            (rect.width() * texels) as f64,
            (rect.height() * texels) as f64,
        ));

        let response = if scratchable.intercepts_input() {
            // Registered after the content, so it wins hit-testing over it
            let response = ui.interact(rect, id.with("cover"), Sense::click_and_drag());
            route_pointer_events(ui, id, rect, texels, now_ms, scratchable);
            response
        } else {
            content.response
        };

        scratchable.advance(now_ms);
        paint_cover(ui, id, rect, now_ms, scratchable);

        let phase = scratchable.phase();
        if phase == RevealPhase::Revealing {
            ui.ctx().request_repaint();
        }

        ScratchAreaResponse {
            inner: content.inner,
            response,
            phase,
        }
    }
}

/// Feed this frame's pointer events to the controller, in arrival order.
fn route_pointer_events(
    ui: &Ui,
    id: Id,
    rect: Rect,
    texels_per_point: f32,
    now_ms: u64,
    scratchable: &mut Scratchable,
) {
    let translator_id = id.with("pointer");
    let mut translator: PointerTranslator =
        ui.data(|d| d.get_temp(translator_id)).unwrap_or_default();
    let events = ui.input(|i| i.events.clone());

    for event in translator.translate(&events, rect, texels_per_point, now_ms) {
        let response = scratchable.handle_pointer_event(&event);
        if !response.handled {
            break;
        }
    }
    ui.data_mut(|d| d.insert_temp(translator_id, translator));
}

/// Render the cover into a texture when it changed and paint it over `rect`,
/// stretched if the texture was rendered below display resolution.
fn paint_cover(ui: &Ui, id: Id, rect: Rect, now_ms: u64, scratchable: &mut Scratchable) {
    let renderer_id = id.with("renderer");
    let texture_id = id.with("texture");

    if !scratchable.phase().is_drawn() {
        ui.data_mut(|d| {
            d.remove::<PixelRenderer>(renderer_id);
            d.remove::<TextureHandle>(texture_id);
        });
        return;
    }

    if scratchable.take_redraw() {
        let mut renderer: PixelRenderer = ui
            .data_mut(|d| d.remove_temp(renderer_id))
            .unwrap_or_default();
        match render_scratchable(&mut renderer, scratchable, now_ms) {
            Ok(true) if renderer.width() > 0 && renderer.height() > 0 => {
                let image = ColorImage::from_rgba_unmultiplied(
                    [renderer.width() as usize, renderer.height() as usize],
                    renderer.rgba(),
                );
                let existing: Option<TextureHandle> = ui.data(|d| d.get_temp(texture_id));
                let texture = match existing {
                    Some(mut texture) => {
                        texture.set(image, TextureOptions::LINEAR);
                        texture
                    }
                    None => ui
                        .ctx()
                        .load_texture("scratchable-cover", image, TextureOptions::LINEAR),
                };
                ui.data_mut(|d| d.insert_temp(texture_id, texture));
            }
            Ok(_) => {
                ui.data_mut(|d| d.remove::<TextureHandle>(texture_id));
            }
            Err(e) => log::warn!("Failed to render scratch cover: {}", e),
        }
        ui.data_mut(|d| d.insert_temp(renderer_id, renderer));
    }

    if let Some(texture) = ui.data(|d| d.get_temp::<TextureHandle>(texture_id)) {
        ui.painter().image(
            texture.id(),
            rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }
}

/// Cover texture pixels per point for content of `size` points.
///
/// Display density, lowered when the longest side would not fit in a
/// texture of `max_side` pixels.
fn texels_per_point(size: Vec2, pixels_per_point: f32, max_side: usize) -> f32 {
    let longest = size.max_elem() * pixels_per_point;
    // Stay one texel short so the mask's rounded-up size still fits
    let limit = (max_side as f32 - 1.0).max(1.0);
    if longest <= limit {
        pixels_per_point
    } else {
        pixels_per_point * limit / longest
    }
}

/// egui layout placing content the way `alignment` asks.
pub fn layout_for(alignment: ContentAlignment) -> Layout {
    Layout::top_down(align_for_bias(alignment.horizontal_bias()))
        .with_main_align(align_for_bias(alignment.vertical_bias()))
}

fn align_for_bias(bias: f64) -> Align {
    if bias < 0.0 {
        Align::Min
    } else if bias > 0.0 {
        Align::Max
    } else {
        Align::Center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{CentralPanel, Context, Event, Modifiers, PointerButton, Pos2, RawInput, vec2};
    use scratchable_core::{ExitTransition, ScratchConfig};

    /// Drives a `ScratchArea` holding one button through headless frames.
    struct Harness {
        ctx: Context,
        widget: Scratchable,
        screen: Rect,
        clicks: u32,
        button: Rect,
        phase: RevealPhase,
    }

    impl Harness {
        fn new(config: ScratchConfig, screen: Vec2) -> Self {
            Self {
                ctx: Context::default(),
                widget: Scratchable::new(config),
                screen: Rect::from_min_size(Pos2::ZERO, screen),
                clicks: 0,
                button: Rect::NOTHING,
                phase: RevealPhase::Covered,
            }
        }

        fn frame(&mut self, time: f64, events: Vec<Event>) {
            let input = RawInput {
                screen_rect: Some(self.screen),
                time: Some(time),
                events,
                ..Default::default()
            };
            let ctx = self.ctx.clone();
            let _ = ctx.run(input, |ctx| {
                CentralPanel::default().show(ctx, |ui| {
                    let out = ScratchArea::new("card", &mut self.widget)
                        .show(ui, |ui| ui.button("Claim prize"));
                    if out.inner.clicked() {
                        self.clicks += 1;
                    }
                    self.button = out.inner.rect;
                    self.phase = out.phase;
                });
            });
        }

        /// Move over the button, press, release: one frame each.
        fn click_button(&mut self, start: f64) {
            let pos = self.button.center();
            self.frame(start, vec![Event::PointerMoved(pos)]);
            self.frame(start + 0.02, vec![button(pos, true)]);
            self.frame(start + 0.04, vec![button(pos, false)]);
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn config() -> ScratchConfig {
        ScratchConfig::default()
            .with_threshold_millis(100)
            .with_exit_transition(ExitTransition::Fade { duration_ms: 200 })
    }

    #[test]
    fn test_covered_button_not_clickable() {
        let mut harness = Harness::new(config(), vec2(400.0, 300.0));
        harness.frame(0.0, Vec::new());
        harness.frame(0.1, Vec::new());
        assert!(harness.button.is_positive());

        harness.click_button(1.0);
        assert_eq!(harness.clicks, 0);
        assert_eq!(harness.phase, RevealPhase::Covered);
        assert!(!harness.widget.session().points().is_empty());
    }

    #[test]
    fn test_scratch_reveals_then_button_clickable() {
        let mut harness = Harness::new(config(), vec2(400.0, 300.0));
        harness.frame(0.0, Vec::new());
        harness.frame(0.1, Vec::new());

        let start = harness.button.center();
        harness.frame(1.0, vec![Event::PointerMoved(start)]);
        harness.frame(1.05, vec![button(start, true)]);
        for step in 1..=5 {
            let pos = start + vec2(step as f32, 0.0);
            harness.frame(1.05 + step as f64 * 0.1, vec![Event::PointerMoved(pos)]);
        }
        assert_eq!(harness.phase, RevealPhase::Scratching);
        assert!(harness.widget.session().scratching_millis() >= 100);

        harness.frame(1.6, vec![button(start + vec2(5.0, 0.0), false)]);
        assert_eq!(harness.phase, RevealPhase::Revealing);

        harness.frame(2.0, Vec::new());
        assert_eq!(harness.phase, RevealPhase::Revealed);

        // A frame without the cover so hit-testing forgets it
        harness.frame(2.1, Vec::new());
        harness.click_button(2.5);
        assert!(harness.clicks > 0);
    }

    #[test]
    fn test_large_area_fits_texture_limit() {
        let mut harness = Harness::new(config(), vec2(6000.0, 4000.0));
        harness.frame(0.0, Vec::new());
        harness.frame(0.1, Vec::new());

        let size = harness.widget.content_size();
        assert!(size.width > 0.0);
        assert!(size.width.ceil() <= 2048.0);
        assert!(size.height.ceil() <= 2048.0);
        assert_eq!(harness.phase, RevealPhase::Covered);
    }

    #[test]
    fn test_texels_per_point() {
        let ppp = texels_per_point(vec2(100.0, 50.0), 2.0, 2048);
        assert!((ppp - 2.0).abs() < f32::EPSILON);

        let reduced = texels_per_point(vec2(1000.0, 20.0), 3.0, 2048);
        assert!(reduced < 3.0);
        assert!((1000.0 * reduced).ceil() <= 2048.0);

        let empty = texels_per_point(Vec2::ZERO, 1.5, 2048);
        assert!((empty - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_layout_for_alignment() {
        let layout = layout_for(ContentAlignment::TopStart);
        assert_eq!(layout.cross_align, Align::Min);
        assert_eq!(layout.main_align, Align::Min);

        let layout = layout_for(ContentAlignment::Center);
        assert_eq!(layout.cross_align, Align::Center);
        assert_eq!(layout.main_align, Align::Center);

        let layout = layout_for(ContentAlignment::BottomEnd);
        assert_eq!(layout.cross_align, Align::Max);
        assert_eq!(layout.main_align, Align::Max);
    }
}
