// MIT License

/*Copyright (c) 2024 Based Labs

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.*/

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// On/off switch drawn as a filled track with its state label.
pub struct ToggleSwitch {
    on: bool,
    focused: bool,
}

impl ToggleSwitch {
    pub fn new(on: bool, focused: bool) -> Self {
        ToggleSwitch { on, focused }
    }
}

impl Widget for ToggleSwitch {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 1 {
            return;
        }

        let (track, label, color) = if self.on {
            ("██████", " ON ", Color::Rgb(0, 255, 150))
        } else {
            ("░░░░░░", " OFF", Color::Rgb(0, 128, 128))
        };
        // column width, not byte length: the track glyphs are 3 bytes each
        let track_width = track.chars().count() as u16;

        let mut style = Style::default().fg(color);
        if self.focused {
            style = style.add_modifier(Modifier::BOLD);
        }

        buf.set_string(area.x, area.y, track, style);
        buf.set_string(area.x + track_width, area.y, label, style);
    }
}

/// Dropdown rows for the tech-stack field: label on the left, wire value
/// right-aligned, one row highlighted as the cursor.
pub struct SuggestionList {
    items: Vec<(&'static str, &'static str)>,
    selected: usize,
}

impl SuggestionList {
    pub fn new(items: Vec<(&'static str, &'static str)>, selected: usize) -> Self {
        SuggestionList { items, selected }
    }
}

impl Widget for SuggestionList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, (value, label)) in self.items.iter().enumerate() {
            if row as u16 >= area.height {
                break;
            }
            let y = area.y + row as u16;
            let selected = row == self.selected;

            let (marker, row_style) = if selected {
                (
                    '▶',
                    Style::default()
                        .fg(Color::Rgb(0, 255, 255))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ('·', Style::default().fg(Color::Rgb(41, 171, 226)))
            };

            buf.get_mut(area.x, y).set_char(marker).set_style(row_style);

            let label_x = area.x + 2;
            let label_width = area.width.saturating_sub(2);
            buf.set_stringn(label_x, y, label, label_width as usize, row_style);

            // wire value rides the right edge when there is room for it;
            // width covers both angle brackets
            let value_width = value.len() as u16 + 2;
            if label_width > label.len() as u16 + value_width + 1 {
                let value_x = area.x + area.width - value_width;
                buf.set_string(
                    value_x,
                    y,
                    format!("<{}>", value),
                    Style::default().fg(Color::Rgb(0, 128, 128)),
                );
            }
        }
    }
}
