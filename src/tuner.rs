use crate::input::TuneCommand;
use crate::render::{self, BIRD_Y, PixelBuf, SHADOW, WHITE};
use crate::vision::{Slider, Tunables};
use std::sync::Arc;

/// Keyboard front end for the six threshold sliders, with an overlay that
/// shows their current values.
pub struct Tuner {
    tunables: Arc<Tunables>,
    selected: Slider,
    visible: bool,
}

impl Tuner {
    pub fn new(tunables: Arc<Tunables>) -> Self {
        Self {
            tunables,
            selected: Slider::HueMin,
            visible: false,
        }
    }

    pub fn selected(&self) -> Slider {
        self.selected
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn apply(&mut self, cmd: TuneCommand) {
        match cmd {
            TuneCommand::Select(slider) => {
                self.selected = slider;
                self.visible = true;
            }
            TuneCommand::Adjust(delta) => {
                let v = self.tunables.adjust(self.selected, delta);
                self.visible = true;
                tracing::debug!("{} = {v}", self.selected.label());
            }
            TuneCommand::ToggleHud => self.visible = !self.visible,
        }
    }

    pub fn draw(&self, buf: &mut PixelBuf) {
        if !self.visible {
            return;
        }
        let w = render::text_width("H- 000", 1);
        let x = buf.width() as i32 - w - 3;
        let mut y = 2;
        buf.fill_rect(x - 2, y - 2, w + 5, Slider::ALL.len() as i32 * 6 + 3, SHADOW);
        for slider in Slider::ALL {
            let fg = if slider == self.selected { BIRD_Y } else { WHITE };
            let line = format!("{} {:>3}", slider.label(), self.tunables.get(slider));
            render::draw_text(buf, x, y, &line, fg, 1);
            y += 6;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_moves_the_selected_slider() {
        let tunables = Arc::new(Tunables::default());
        let mut tuner = Tuner::new(Arc::clone(&tunables));
        assert!(!tuner.visible());

        tuner.apply(TuneCommand::Select(Slider::SatMin));
        tuner.apply(TuneCommand::Adjust(10));
        tuner.apply(TuneCommand::Adjust(10));
        tuner.apply(TuneCommand::Adjust(-1));
        assert_eq!(tunables.get(Slider::SatMin), 19);
        assert_eq!(tunables.get(Slider::HueMin), 0);
        assert_eq!(tuner.selected(), Slider::SatMin);
        assert!(tuner.visible());

        tuner.apply(TuneCommand::ToggleHud);
        assert!(!tuner.visible());
    }

    #[test]
    fn overlay_fits_narrow_buffers() {
        let tuner = {
            let mut t = Tuner::new(Arc::new(Tunables::default()));
            t.apply(TuneCommand::ToggleHud);
            t
        };
        let mut buf = PixelBuf::new(20, 30);
        tuner.draw(&mut buf);
    }
}
