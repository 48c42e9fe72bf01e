//! Canvas 2D playback of display lists

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::display::{DisplayList, DrawCmd};

/// Replays display lists onto a 2D context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub size: (u32, u32),
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self {
            ctx,
            size: (width, height),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Draw every command in order
    pub fn render(&self, list: &DisplayList) {
        for cmd in list.iter() {
            self.draw(cmd);
        }
    }

    fn draw(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Fill { color } => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(0.0, 0.0, self.size.0 as f64, self.size.1 as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                if let Err(e) = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU) {
                    log::warn!("arc failed: {:?}", e);
                    return;
                }
                ctx.set_fill_style_str(&color.css());
                ctx.fill();
            }
            DrawCmd::Trail {
                head,
                tail,
                color,
                width,
            } => {
                let grad = ctx.create_linear_gradient(
                    head.x as f64,
                    head.y as f64,
                    tail.x as f64,
                    tail.y as f64,
                );
                let stops = grad
                    .add_color_stop(0.0, &color.css())
                    .and_then(|_| grad.add_color_stop(1.0, &color.with_alpha(0.0).css()));
                if let Err(e) = stops {
                    log::warn!("gradient stop rejected: {:?}", e);
                    return;
                }

                ctx.set_stroke_style_canvas_gradient(&grad);
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(head.x as f64, head.y as f64);
                ctx.line_to(tail.x as f64, tail.y as f64);
                ctx.stroke();
            }
        }
    }
}
