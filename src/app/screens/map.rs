//! Decorative route map
//!
//! Draws the curved path through a preset's waypoints on a braille canvas.
//! Waypoints live in a 420x400 space with y growing downward, so y is
//! flipped before drawing.

use crate::models::route::{curve_path, MapColor, RoutePreset};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders,
    },
    Frame,
};

const MAP_WIDTH: f64 = 420.0;
const MAP_HEIGHT: f64 = 400.0;
const CURVE_STEPS: usize = 16;

impl From<MapColor> for Color {
    fn from(color: MapColor) -> Self {
        match color {
            MapColor::Red => Color::Red,
            MapColor::Green => Color::Green,
            MapColor::Blue => Color::Blue,
        }
    }
}

fn flip(y: f64) -> f64 {
    MAP_HEIGHT - y
}

/// Render the route of `preset` into `area`
pub fn render_route_map(f: &mut Frame, area: Rect, preset: &RoutePreset) {
    let color = Color::from(preset.color);
    let path = curve_path(&preset.waypoints, CURVE_STEPS);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" 🗺 {} ", preset.name))
                .border_style(Style::default().fg(color)),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, MAP_WIDTH])
        .y_bounds([0.0, MAP_HEIGHT])
        .paint(move |ctx| {
            for pair in path.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: pair[0].0,
                    y1: flip(pair[0].1),
                    x2: pair[1].0,
                    y2: flip(pair[1].1),
                    color,
                });
            }
            let coords: Vec<(f64, f64)> = preset
                .waypoints
                .iter()
                .map(|p| (p.x, flip(p.y)))
                .collect();
            ctx.draw(&Points {
                coords: &coords,
                color: Color::White,
            });
            ctx.layer();
            for point in &preset.waypoints {
                ctx.print(
                    point.x + 8.0,
                    flip(point.y),
                    Line::from(vec![
                        Span::styled(
                            point.icon,
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!(" {}", point.label)),
                    ]),
                );
            }
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouteKey;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_waypoints_fit_map_bounds() {
        for key in RouteKey::ALL {
            for point in key.preset().waypoints {
                assert!((0.0..=MAP_WIDTH).contains(&point.x));
                assert!((0.0..=MAP_HEIGHT).contains(&flip(point.y)));
            }
        }
    }

    #[test]
    fn test_render_every_route() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        for key in RouteKey::ALL {
            terminal
                .draw(|f| render_route_map(f, f.size(), key.preset()))
                .unwrap();
        }
    }
}
