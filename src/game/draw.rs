use super::{Game, Phase};
use crate::render::*;

impl Game {
    /// Paint the whole scene. `tracked` adds a marker on the right edge where
    /// the camera currently puts the target.
    pub fn draw(&self, buf: &mut PixelBuf, tracked: Option<f32>) {
        self.draw_sky(buf);
        self.draw_hills(buf);
        self.draw_pipes(buf);
        self.draw_ground(buf);
        self.draw_bird(buf);
        if let Some(t) = tracked {
            self.draw_marker(buf, t);
        }

        let size = (self.layout.scale.round() as i32).max(1);
        match self.round.phase {
            Phase::Splash => self.draw_title(buf, size),
            Phase::Play => {
                let text = self.round.score.to_string();
                draw_text_centered(buf, self.layout.width as i32 / 2, 4, &text, WHITE, size);
            }
            Phase::GameOver => {
                let text = self.round.score.to_string();
                draw_text_centered(buf, self.layout.width as i32 / 2, 4, &text, WHITE, size);
                // Hold the panel back until the bird has landed.
                if self.round.player.on_floor(&self.layout) && self.round.phase_ticks > 15 {
                    self.draw_game_over(buf);
                }
            }
        }
    }

    fn draw_sky(&self, buf: &mut PixelBuf) {
        let sky_h = self.layout.floor_y() as usize;
        for y in 0..sky_h {
            let c = Rgb::lerp(SKY_TOP, SKY_BOT, (y * 256 / sky_h.max(1)) as u16);
            for x in 0..self.layout.width {
                buf.set(x as i32, y as i32, c);
            }
        }
    }

    fn draw_hills(&self, buf: &mut PixelBuf) {
        let base = self.layout.floor_y() as i32;
        let s = self.layout.scale;
        // (parallax, frequency, amplitude, second harmonic, lift, color)
        let bands = [
            (0.2, 0.04, 6.0, 1.7, 4.0, HILL_FAR),
            (0.4, 0.06, 4.0, 2.3, 2.0, HILL_NEAR),
        ];
        for (parallax, freq, amp, harmonic, lift, color) in bands {
            for x in 0..self.layout.width as i32 {
                let fx = (x as f64 + self.round.ground_x * parallax) * freq;
                let h = (fx.sin() * amp + (fx * harmonic).sin() * amp / 2.0) * s;
                for y in (base - h as i32 - (lift * s) as i32)..base {
                    buf.set(x, y, color);
                }
            }
        }
    }

    fn draw_ground(&self, buf: &mut PixelBuf) {
        let gy = self.layout.floor_y() as i32;
        let w = self.layout.width as i32;
        let scroll = self.round.ground_x;
        for x in 0..w {
            let alt = ((x as f64 + scroll) as i32 / 3) % 2 == 0;
            buf.set(x, gy, if alt { GRASS } else { GRASS_LIGHT });
            buf.set(x, gy + 1, GRASS);
        }
        for y in (gy + 2)..self.layout.height as i32 {
            for x in 0..w {
                let stripe = ((x as f64 + scroll * 0.8) as i32 + (y - gy) * 2) % 12 < 6;
                buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
            }
        }
    }

    fn draw_pipes(&self, buf: &mut PixelBuf) {
        let s = self.layout.scale;
        let lip = (2.0 * s).max(1.0) as i32;
        let cap_h = (3.0 * s).max(2.0) as i32;
        let floor = self.layout.floor_y() as i32;

        for pair in self.round.obstacles.pairs() {
            let px = pair.x as i32;
            let pw = pair.width as i32;
            let top = pair.gap_top() as i32;
            let bot = pair.gap_bottom() as i32;

            // Bodies, then caps overhanging by `lip` on each side.
            for x in 0..pw {
                let c = pipe_shade(x, pw);
                for y in (0..top - cap_h).chain(bot + cap_h..floor) {
                    buf.set(px + x, y, c);
                }
            }
            for x in -lip..pw + lip {
                let c = pipe_shade(x + lip, pw + lip * 2);
                for y in (top - cap_h..top).chain(bot..bot + cap_h) {
                    buf.set(px + x, y, c);
                }
                for y in [top - cap_h, top - 1, bot, bot + cap_h - 1] {
                    buf.set(px + x, y, CAP_DARK);
                }
            }
        }
    }

    fn draw_bird(&self, buf: &mut PixelBuf) {
        let p = &self.round.player;
        let s = self.layout.scale;
        let cx = p.x as i32;
        let cy = p.y as i32;
        // Nose up shifts the beak up a pixel, nose down shifts it down.
        let tilt = (-p.rot / 30.0).round().clamp(-1.0, 2.0) as i32;

        let bw = (3.0 * s).max(2.0) as i32;
        let bh = (2.0 * s).max(2.0) as i32;
        buf.fill_rect(cx - bw, cy - bh, bw * 2 + 1, bh * 2, BIRD_Y);
        buf.fill_rect(cx - bw + 1, cy - bh, bw * 2 - 2, 1.max((s * 0.8) as i32), BIRD_HI);

        let flapping = p.mode() != super::PlayerMode::Crashed;
        let wing_y = if flapping && self.round.phase_ticks % 8 < 4 { -1 } else { 1 };
        buf.fill_rect(
            cx - bw + 1,
            cy + wing_y,
            (2.0 * s).max(1.0) as i32,
            (1.5 * s).max(1.0) as i32,
            BIRD_WING,
        );

        let eye = (0.8 * s).max(1.0) as i32;
        let ex = cx + bw - (1.5 * s) as i32;
        let ey = cy - bh + (1.0 * s).max(1.0) as i32;
        buf.fill_rect(ex, ey, eye + 1, eye + 1, BIRD_EYE);
        buf.set(ex + eye, ey + eye, BIRD_PUPIL);

        let beak_w = (2.5 * s).max(2.0) as i32;
        let beak_h = (1.5 * s).max(1.0) as i32;
        buf.fill_rect(cx + bw, cy - (0.5 * s) as i32 + tilt, beak_w, beak_h, BIRD_BEAK);

        let tail = (1.5 * s).max(1.0) as i32;
        buf.fill_rect(cx - bw - tail, cy - 1 - tilt, tail, 2, BIRD_WING);
    }

    fn draw_marker(&self, buf: &mut PixelBuf, t: f32) {
        let y = self.layout.map_tracked(t) as i32;
        let x = self.layout.width as i32 - 2;
        buf.fill_rect(x, y - 1, 2, 3, MARKER);
        buf.set(x - 1, y, MARKER);
    }

    fn draw_title(&self, buf: &mut PixelBuf, size: i32) {
        let cx = self.layout.width as i32 / 2;
        let cy = self.layout.height as i32 / 5;
        draw_text_centered(buf, cx, cy, "FLAPPY", BIRD_Y, size * 2);
        draw_text_centered(buf, cx, cy + 12 * size, "SPACE TO START", WHITE, 1);
    }

    fn draw_game_over(&self, buf: &mut PixelBuf) {
        let s = self.layout.scale;
        let cx = self.layout.width as i32 / 2;
        let cy = self.layout.height as i32 / 2;
        let panel_w = (40.0 * s).max(30.0) as i32;
        let panel_h = (24.0 * s).max(22.0) as i32;

        buf.darken();

        let px = cx - panel_w / 2;
        let py = cy - panel_h / 2;
        buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
        buf.fill_rect(px, py, panel_w, panel_h, DIRT);
        buf.fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL);

        draw_text_centered(buf, cx, py + 2, "GAME OVER", BIRD_BEAK, 1);
        draw_text_centered(buf, cx, py + 9, &self.round.score.to_string(), WHITE, 1);
        let best = format!("BEST {}", self.best);
        draw_text_centered(buf, cx, py + 16, &best, BIRD_Y, 1);
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}
