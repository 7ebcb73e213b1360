use crate::colors::FireColor;
use crate::terminal::Surface;

/// Width of the help panel, borders included
pub const HELP_WIDTH: i32 = 30;

pub const HELP_TEXT: &str = "\
CONTROLS
W / Left     Wind left
E / Right    Wind right
+ / Up       More fuel
- / Down     Less fuel
Space        Pause / resume
C            Cycle colors
R            Reset fire
S            Detailed stats
H / ?        Toggle help
Q / Esc      Quit

MOUSE
Left click   Ignite spot
Wheel        Adjust fuel";

/// Draw a box with a single-line border and an optional centered title.
/// Interior is blanked.
pub fn draw_box<S: Surface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    title: Option<&str>,
    border: FireColor,
) {
    if width < 2 || height < 2 {
        return;
    }
    let right = x + width - 1;
    let bottom = y + height - 1;

    // Top border: ┌─────┐
    surface.set_cell(x, y, '┌', border);
    for bx in x + 1..right {
        surface.set_cell(bx, y, '─', border);
    }
    surface.set_cell(right, y, '┐', border);

    for by in y + 1..bottom {
        surface.set_cell(x, by, '│', border);
        for bx in x + 1..right {
            surface.set_cell(bx, by, ' ', FireColor::Black);
        }
        surface.set_cell(right, by, '│', border);
    }

    // Bottom border: └─────┘
    surface.set_cell(x, bottom, '└', border);
    for bx in x + 1..right {
        surface.set_cell(bx, bottom, '─', border);
    }
    surface.set_cell(right, bottom, '┘', border);

    if let Some(title) = title {
        let label = format!(" {} ", title);
        let len = label.chars().count() as i32;
        if len <= width - 2 {
            surface.set_str(x + (width - len) / 2, y, &label, FireColor::UiHighlight);
        }
    }
}

/// Render the help panel with its top-left corner at (x, y).
/// Lines that do not fit in `max_height` rows are dropped.
pub fn render_help_panel<S: Surface + ?Sized>(surface: &mut S, x: i32, y: i32, max_height: i32) {
    let lines: Vec<&str> = HELP_TEXT.lines().collect();
    let height = (lines.len() as i32 + 2).min(max_height);
    if height < 3 {
        return;
    }

    draw_box(surface, x, y, HELP_WIDTH, height, Some("HELP"), FireColor::UiBorder);

    let inner = (HELP_WIDTH - 4) as usize;
    for (i, line) in lines.iter().take((height - 2) as usize).enumerate() {
        let color = if line.chars().all(|c| c.is_ascii_uppercase()) && !line.is_empty() {
            FireColor::UiHighlight
        } else {
            FireColor::UiText
        };
        let text: String = line.chars().take(inner).collect();
        surface.set_str(x + 2, y + 1 + i as i32, &text, color);
    }
}
